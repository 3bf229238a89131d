//! Checks that look at more than one field of a stanza.

use crate::config::Check;
use crate::refs;
use crate::report::Context;
use crate::stanza::Stanza;
use crate::tables;
use std::cmp::Ordering;
use std::collections::BTreeSet;

const CHECKSUM_FIELDS: &[&str] = &["Checksums-Sha1", "Checksums-Sha256"];

/// Flag a Source field that repeats the value of the Version field.
pub(super) fn source(stanza: &Stanza, cx: &mut Context) {
    if !cx.enabled(Check::SourceRedundantVersion) {
        return;
    }
    let (Some(source), Some(version)) = (stanza.field("Source"), stanza.field("Version")) else {
        return;
    };
    let Some(declared) = source
        .data
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(v, _)| v.trim())
    else {
        return;
    };

    let redundant = match (
        declared.parse::<debversion::Version>(),
        version.data.parse::<debversion::Version>(),
    ) {
        (Ok(a), Ok(b)) => a.cmp(&b) == Ordering::Equal,
        _ => declared == version.data,
    };
    if redundant {
        cx.check(
            Check::SourceRedundantVersion,
            format!(
                "Please omit the source version when the Version field has the same value: {}",
                source.data
            ),
            Some(refs::SOURCE),
        );
    }
}

/// Flag stanzas declaring more than one version control system.
pub(super) fn vcs(stanza: &Stanza, cx: &mut Context) {
    let mut declared = tables::VCS_FIELDS
        .iter()
        .filter(|name| stanza.contains(name));
    if declared.next().is_none() {
        return;
    }
    for name in declared {
        cx.check(
            Check::DuplicateVcs,
            format!("Multiple VCS fields are declared: {}", name),
            Some(refs::VCS),
        );
    }
}

/// The file names listed in a Files or Checksums-* field.
fn file_names(data: &str) -> impl Iterator<Item = &str> {
    data.lines()
        .filter_map(|line| line.split_whitespace().last())
}

/// Every file in Files must appear exactly once in each checksum list.
pub(super) fn checksums(stanza: &Stanza, cx: &mut Context) {
    let Some(files) = stanza.field("Files") else {
        return;
    };
    let files: BTreeSet<&str> = file_names(&files.data).collect();
    for name in CHECKSUM_FIELDS {
        let Some(field) = stanza.field(name) else {
            continue;
        };
        let mut missing = files.clone();
        for file in file_names(&field.data) {
            if !missing.remove(file) {
                cx.error(
                    format!(
                        "Checksummed file is not in the file list, or is already checksummed: {}",
                        file
                    ),
                    Some(refs::CHECKSUMS),
                );
            }
        }
        if !missing.is_empty() {
            cx.error(
                format!(
                    "File is not in the {} list: {}",
                    name,
                    missing.into_iter().collect::<Vec<_>>().join(", ")
                ),
                Some(refs::CHECKSUMS),
            );
        }
    }
}

/// A Copyright field in the header needs a License field to go with it.
pub(super) fn copyright_header(stanza: &Stanza, cx: &mut Context) {
    if stanza.contains("Copyright") && !stanza.contains("License") {
        cx.error(
            "A Copyright field alone is not sufficient in the header; add a License field as well",
            Some(refs::COPYRIGHT_HEADER),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::field::{DataField, FieldType};
    use crate::report::Report;

    fn stanza(fields: &[(&str, &str)]) -> Stanza {
        Stanza::new(
            1,
            fields
                .iter()
                .enumerate()
                .map(|(i, (name, data))| {
                    let field_type = if data.contains('\n') {
                        FieldType::Multiline
                    } else {
                        FieldType::Simple
                    };
                    DataField::new(name, data, field_type, i + 1)
                })
                .collect(),
        )
    }

    fn run(check: fn(&Stanza, &mut Context), stanza: &Stanza, preset: Preset) -> Report {
        let config = preset.configuration();
        let mut report = Report::default();
        check(stanza, &mut Context::offline(&config, &mut report));
        report
    }

    #[test]
    fn test_source_redundant_version() {
        let redundant = stanza(&[("Source", "foo (1.0-1)"), ("Version", "1.0-1")]);
        assert_eq!(run(source, &redundant, Preset::Exact).len(), 1);
        assert!(run(source, &redundant, Preset::Strict).is_empty());

        let different = stanza(&[("Source", "foo (1.0-1)"), ("Version", "1.0-2")]);
        assert!(run(source, &different, Preset::Exact).is_empty());

        let plain = stanza(&[("Source", "foo"), ("Version", "1.0-1")]);
        assert!(run(source, &plain, Preset::Exact).is_empty());
    }

    #[test]
    fn test_vcs() {
        let single = stanza(&[("Vcs-Git", "https://example.org/foo.git"), ("Vcs-Browser", "https://example.org/foo")]);
        assert!(run(vcs, &single, Preset::Normal).is_empty());

        let double = stanza(&[("Vcs-Git", "https://example.org/foo.git"), ("Vcs-Hg", "https://example.org/foo")]);
        let report = run(vcs, &double, Preset::Normal);
        assert_eq!(report.count(Check::DuplicateVcs), 1);
        assert!(report.violations()[0].message.ends_with("Vcs-Hg"));
        assert!(run(vcs, &double, Preset::Quirks).is_empty());
    }

    #[test]
    fn test_checksums() {
        let files = "\n 0123 10 a.tar.gz\n 4567 20 a.dsc";
        let good = stanza(&[
            ("Files", files),
            ("Checksums-Sha1", "\n 89ab 10 a.tar.gz\n cdef 20 a.dsc"),
            ("Checksums-Sha256", "\n 89ab 20 a.dsc\n cdef 10 a.tar.gz"),
        ]);
        assert!(run(checksums, &good, Preset::Quirks).is_empty());

        let bad = stanza(&[
            ("Files", files),
            ("Checksums-Sha1", "\n 89ab 10 a.tar.gz\n 89ab 10 a.tar.gz\n cdef 20 b.dsc"),
        ]);
        let report = run(checksums, &bad, Preset::Quirks);
        assert_eq!(report.len(), 3);
        assert_eq!(
            report.violations()[2].message,
            "File is not in the Checksums-Sha1 list: a.dsc"
        );
    }

    #[test]
    fn test_copyright_header() {
        let alone = stanza(&[("Format", "x"), ("Copyright", "2024 Someone")]);
        assert_eq!(run(copyright_header, &alone, Preset::Quirks).len(), 1);

        let explained = stanza(&[("Copyright", "2024 Someone"), ("License", "MIT")]);
        assert!(run(copyright_header, &explained, Preset::Quirks).is_empty());
    }
}
