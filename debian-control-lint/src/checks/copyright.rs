//! Cross-stanza checks of machine-readable copyright files.

use super::fields::LICENSE_SEPARATOR;
use crate::config::Check;
use crate::control::ControlFile;
use crate::control_type::{FILES_STANZA, LICENSE_STANZA};
use crate::glob::GlobCache;
use crate::refs;
use crate::report::Context;
use crate::stanza::Stanza;
use std::collections::{BTreeMap, BTreeSet};

/// Normalize a license short name for comparison.
///
/// Trailing `.0` components and a trailing `-1` are dropped from the first
/// word, so `GPL-3.0` and `GPL-3` compare equal.
///
/// ```
/// use debian_control_lint::checks::simple_license_name;
/// assert_eq!(simple_license_name("GPL-3.0"), "GPL-3");
/// assert_eq!(simple_license_name("Apache-2.0 with Foo exception"), "Apache-2 with Foo exception");
/// ```
pub fn simple_license_name(name: &str) -> String {
    let (mut base, rest) = match name.split_once(' ') {
        Some((base, rest)) => (base, Some(rest)),
        None => (name, None),
    };
    while let Some(stripped) = base.strip_suffix(".0") {
        base = stripped;
    }
    if let Some(stripped) = base.strip_suffix("-1") {
        base = stripped;
    }
    match rest {
        Some(rest) => format!("{} {}", base, rest),
        None => base.to_string(),
    }
}

/// The stanzas matched to the spec called `name`.
fn stanzas_named<'a>(file: &'a ControlFile, name: &'a str) -> impl Iterator<Item = &'a Stanza> {
    file.stanzas()
        .iter()
        .zip(file.specs())
        .filter(move |(_, spec)| spec.name == name)
        .map(|(stanza, _)| stanza)
}

/// Check the ordering and redundancy of the patterns in `Files` fields.
pub(super) fn file_patterns(file: &ControlFile, cx: &mut Context) {
    let redundancy = cx.enabled(Check::RedundantFilePattern) || cx.enabled(Check::DuplicateFilePattern);
    let generality = cx.enabled(Check::CopyrightFilePatternGenerality);
    if !redundancy && !generality {
        return;
    }

    let mut cache = GlobCache::new();
    let mut previous: Vec<&str> = Vec::new();
    for stanza in stanzas_named(file, FILES_STANZA) {
        let Some(field) = stanza.field("Files") else {
            continue;
        };
        cx.set_line(Some(field.line));
        let current: Vec<&str> = field.data.split_whitespace().collect();

        if redundancy {
            for (i, a) in current.iter().enumerate() {
                for b in &current[i + 1..] {
                    if a == b {
                        let check = if cx.enabled(Check::DuplicateFilePattern) {
                            Check::DuplicateFilePattern
                        } else {
                            Check::RedundantFilePattern
                        };
                        cx.check(check, format!("Duplicate file pattern: {}", a), Some(refs::COPYRIGHT_FILES));
                    } else if cache.is_more_generic(a, b) || cache.is_more_generic(b, a) {
                        cx.check(
                            Check::RedundantFilePattern,
                            format!("File stanza includes redundant patterns: {} and {} cannot both be needed", a, b),
                            Some(refs::COPYRIGHT_FILES),
                        );
                    }
                }
            }
        }

        if generality {
            for pattern in &current {
                for earlier in &previous {
                    if cache.is_more_generic(pattern, earlier) {
                        cx.check(
                            Check::CopyrightFilePatternGenerality,
                            format!("More generic patterns should precede specific ones: {} and {}", earlier, pattern),
                            Some(refs::COPYRIGHT_FILES),
                        );
                    }
                }
            }
        }

        for pattern in current {
            if !previous.contains(&pattern) {
                previous.push(pattern);
            }
        }
    }
    cx.set_line(None);
}

/// Check that every license used by a file stanza is explained exactly once.
///
/// A license in a file stanza either comes with its text in the same field,
/// or needs a stand-alone license stanza.
pub(super) fn license_names(file: &ControlFile, cx: &mut Context) {
    if !cx.enabled(Check::LicenseDeclarations) {
        return;
    }

    // licenses without text, with the line they were first used on
    let mut required: BTreeMap<String, usize> = BTreeMap::new();
    let mut explained: BTreeSet<String> = BTreeSet::new();
    for stanza in stanzas_named(file, FILES_STANZA) {
        let Some(license) = stanza.field("License") else {
            continue;
        };
        let short_names = license.data.lines().next().unwrap_or_default().trim();
        let has_text = short_names != license.data.trim();
        for name in LICENSE_SEPARATOR.split(&short_names.replace(',', "")) {
            let name = simple_license_name(name.trim());
            if has_text {
                explained.insert(name);
            } else {
                required.entry(name).or_insert(license.line);
            }
        }
    }
    explained.retain(|name| !required.contains_key(name));
    explained.remove("public-domain");

    for stanza in stanzas_named(file, LICENSE_STANZA) {
        let Some(license) = stanza.field("License") else {
            continue;
        };
        cx.set_line(Some(license.line));
        let first = license.data.lines().next().unwrap_or_default().trim();
        let name = simple_license_name(first);
        if first == license.data.trim() {
            cx.check(
                Check::LicenseDeclarations,
                format!("License text is missing: {}", name),
                Some(refs::COPYRIGHT_STANDALONE),
            );
        }
        if required.remove(&name).is_some() {
            continue;
        }
        if explained.remove(&name) {
            cx.check(
                Check::LicenseDeclaredAfterExplanation,
                format!("Stand-alone license stanza is not required; this license has an explanation: {}", name),
                Some(refs::COPYRIGHT_STANDALONE),
            );
        } else {
            cx.check(
                Check::LicenseDeclarations,
                format!("Stand-alone license stanza is not required; maybe the license was already defined: {}", name),
                Some(refs::COPYRIGHT_STANDALONE),
            );
        }
    }

    for (name, line) in required {
        if name == "public-domain" {
            continue;
        }
        cx.set_line(Some(line));
        cx.check(
            Check::LicenseDeclarations,
            format!("License text is missing: {}", name),
            Some(refs::COPYRIGHT_LICENSE),
        );
    }
    cx.set_line(None);
}
