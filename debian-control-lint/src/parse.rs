//! Turning raw input lines into stanzas.
//!
//! This strips an optional PGP cleartext signature, removes comment lines,
//! reports layout problems (trailing whitespace, whitespace-only separators)
//! and then splits the remaining lines into [`Stanza`]s.

use crate::config::Check;
use crate::error::Error;
use crate::field::DataField;
use crate::refs;
use crate::report::Context;
use crate::stanza::Stanza;
use std::collections::VecDeque;

const PGP_SIGNED_MESSAGE: &str = "-----BEGIN PGP SIGNED MESSAGE-----";
const PGP_SIGNATURE: &str = "-----BEGIN PGP SIGNATURE-----";

/// One physical line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Text of the line, without the line terminator
    pub text: String,

    /// 1-based line number
    pub number: usize,
}

impl Line {
    /// Number a sequence of lines, starting at 1.
    pub fn numbered<I, S>(lines: I) -> VecDeque<Line>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| Line {
                text: text.into(),
                number: i + 1,
            })
            .collect()
    }

    /// Split `text` into numbered lines.
    pub fn split(text: &str) -> VecDeque<Line> {
        Self::numbered(text.lines())
    }
}

/// Whether a line only contains spaces and tabs.
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || c == '\t')
}

/// Remove the PGP envelope and comments, and report layout problems.
pub(crate) fn strip(mut lines: VecDeque<Line>, cx: &mut Context) -> Result<VecDeque<Line>, Error> {
    if lines.is_empty() {
        return Err(Error::EmptyInput);
    }
    let control_type = cx.control_type();

    if control_type.supports_pgp()
        && lines.front().is_some_and(|l| l.text == PGP_SIGNED_MESSAGE)
    {
        log::debug!("Stripping PGP envelope");
        lines.pop_front();
        match DataField::parse_next(&mut lines, cx) {
            Some(field) if field.name.eq_ignore_ascii_case("Hash") => {}
            _ => return Err(Error::UnrecognizedSignature),
        }
        while lines.front().is_some_and(|l| is_blank(&l.text)) {
            lines.pop_front();
        }
        let end = lines
            .iter()
            .position(|l| l.text == PGP_SIGNATURE)
            .ok_or(Error::MissingSignature)?;
        lines.truncate(end);
        if lines.is_empty() {
            return Err(Error::SignatureOnly);
        }
        // Dash-escaped lines in the signed text
        for line in lines.iter_mut() {
            if let Some(rest) = line.text.strip_prefix("- ") {
                line.text = rest.to_string();
            }
        }
    }

    let allows_comments = control_type.allows_comments();
    lines.retain(|line| {
        if !line.text.starts_with('#') {
            return true;
        }
        if !allows_comments {
            cx.set_line(Some(line.number));
            cx.check(
                Check::Comments,
                format!("Comments are not allowed in {} files", control_type),
                Some(refs::SYNTAX),
            );
        }
        false
    });

    for line in &lines {
        if line.text.ends_with([' ', '\t']) {
            cx.set_line(Some(line.number));
            cx.check(
                Check::TrailingSpace,
                "Line ends with trailing whitespace",
                Some(refs::SYNTAX),
            );
        }
    }
    cx.set_line(None);

    Ok(lines)
}

/// Split stripped lines into stanzas.
pub(crate) fn stanzas(mut lines: VecDeque<Line>, cx: &mut Context) -> Result<Vec<Stanza>, Error> {
    let mut stanzas = Vec::new();
    loop {
        while let Some(line) = lines.front() {
            if !is_blank(&line.text) {
                break;
            }
            if !line.text.is_empty() {
                cx.set_line(Some(line.number));
                cx.check(
                    Check::EmptyStanzaSeparators,
                    "Stanza separator contains whitespace",
                    Some(refs::SYNTAX),
                );
            }
            lines.pop_front();
        }
        if lines.is_empty() {
            break;
        }
        match Stanza::parse_next(&mut lines, cx) {
            Some(stanza) => stanzas.push(stanza),
            None => break,
        }
    }
    cx.set_line(None);

    if stanzas.is_empty() {
        return Err(Error::NoStanzas);
    }
    log::debug!("Parsed {} stanzas", stanzas.len());
    Ok(stanzas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, Preset};
    use crate::control_type::ControlType;
    use crate::report::Report;
    use indoc::indoc;

    fn config(preset: Preset, control_type: ControlType) -> Configuration {
        let mut config = preset.configuration();
        config.set_control_type(control_type);
        config
    }

    fn run(text: &str, config: &Configuration) -> (Result<Vec<Stanza>, Error>, Report) {
        let mut report = Report::default();
        let result = {
            let mut cx = Context::offline(config, &mut report);
            strip(Line::split(text), &mut cx).and_then(|lines| stanzas(lines, &mut cx))
        };
        (result, report)
    }

    const SIGNED: &str = indoc! {"
        -----BEGIN PGP SIGNED MESSAGE-----
        Hash: SHA256

        Format: 3.0 (quilt)
        Source: foo
        - Weird: dash
        -----BEGIN PGP SIGNATURE-----

        iQIzBAEBCAAdFiEE
        -----END PGP SIGNATURE-----
    "};

    #[test]
    fn test_pgp_envelope() {
        let config = config(Preset::Normal, ControlType::SourceControl);
        let (stanzas, report) = run(SIGNED, &config);
        let stanzas = stanzas.unwrap();
        assert_eq!(stanzas.len(), 1);
        assert_eq!(stanzas[0].first_line(), 4);
        assert_eq!(stanzas[0].fields().len(), 3);
        assert_eq!(stanzas[0].field("Weird").unwrap().data, "dash");
        assert!(report.is_empty());
    }

    #[test]
    fn test_pgp_not_supported() {
        let config = config(Preset::Normal, ControlType::SourcePackageControl);
        let (stanzas, report) = run(SIGNED, &config);
        assert!(matches!(stanzas, Err(Error::NoStanzas)));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_pgp_errors() {
        let config = config(Preset::Normal, ControlType::Changes);
        let (result, _) = run("-----BEGIN PGP SIGNED MESSAGE-----\nFoo: bar\n", &config);
        assert!(matches!(result, Err(Error::UnrecognizedSignature)));
        let (result, _) = run("-----BEGIN PGP SIGNED MESSAGE-----\nHash: SHA1\n\nSource: foo\n", &config);
        assert!(matches!(result, Err(Error::MissingSignature)));
        let (result, _) = run(
            "-----BEGIN PGP SIGNED MESSAGE-----\nHash: SHA1\n\n-----BEGIN PGP SIGNATURE-----\n",
            &config,
        );
        assert!(matches!(result, Err(Error::SignatureOnly)));
    }

    #[test]
    fn test_empty() {
        let config = config(Preset::Normal, ControlType::Copyright);
        assert!(matches!(run("", &config).0, Err(Error::EmptyInput)));
        assert!(matches!(run("\n  \n", &config).0, Err(Error::NoStanzas)));
        assert!(matches!(run("# only\n", &config).0, Err(Error::NoStanzas)));
    }

    #[test]
    fn test_comments() {
        let text = "# comment\nSource: foo\n";
        let (result, report) = run(text, &config(Preset::Normal, ControlType::SourcePackageControl));
        assert_eq!(result.unwrap()[0].first_line(), 2);
        assert!(report.is_empty());

        let (_, report) = run(text, &config(Preset::Normal, ControlType::Copyright));
        assert_eq!(report.count(Check::Comments), 1);
        assert_eq!(report.violations()[0].line, Some(1));
    }

    #[test]
    fn test_layout() {
        let text = "Source: foo \n \t\nPackage: foo\n\n\nPackage: bar\n";
        let (result, report) = run(text, &config(Preset::Exact, ControlType::SourcePackageControl));
        assert_eq!(result.unwrap().len(), 3);
        assert_eq!(report.count(Check::TrailingSpace), 2);
        assert_eq!(report.count(Check::EmptyStanzaSeparators), 1);

        let (_, report) = run(text, &config(Preset::Normal, ControlType::SourcePackageControl));
        assert!(report.is_empty());
    }
}
