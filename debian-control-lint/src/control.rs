//! The control file being linted, and the three phases it goes through.

use crate::config::{Check, Configuration};
use crate::error::Error;
use crate::mailbox::{MailboxValidator, Rfc5322Validator};
use crate::parse::{self, Line};
use crate::probe::{OfflineProber, UrlProber};
use crate::report::{Context, Report, Violation};
use crate::spec::{StanzaSpec, BLANK_STANZA};
use crate::stanza::Stanza;
use std::collections::VecDeque;

/// How far a [`ControlFile`] has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Nothing has been read yet
    New,
    /// The input was split into stanzas
    Parsed,
    /// Every stanza was assigned a stanza spec
    Matched,
    /// All checks have run
    Linted,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Phase::New => "fresh",
            Phase::Parsed => "parsed",
            Phase::Matched => "matched",
            Phase::Linted => "linted",
        })
    }
}

/// A control file together with everything found while linting it.
///
/// Linting happens in three steps, each of which can only run once and in
/// order: [`ControlFile::parse`], [`ControlFile::match_stanzas`] and
/// [`ControlFile::lint_stanzas`]. Violations from all steps end up in
/// [`ControlFile::report`].
///
/// ```
/// use debian_control_lint::{ControlFile, ControlType, Preset};
///
/// let mut config = Preset::Normal.configuration();
/// config.set_control_type(ControlType::BinaryPackageControl);
///
/// let mut file = ControlFile::new(&config);
/// file.parse_str("Package: foo\nVersion: 1.0\nArchitecture: all\nMaintainer: A <a@b.com>\nDescription: x\n").unwrap();
/// file.match_stanzas().unwrap();
/// file.lint_stanzas().unwrap();
/// assert!(file.report().is_empty());
/// ```
pub struct ControlFile {
    config: Configuration,
    mailbox: Box<dyn MailboxValidator>,
    prober: Box<dyn UrlProber>,
    phase: Phase,
    stanzas: Vec<Stanza>,
    specs: Vec<&'static StanzaSpec>,
    report: Report,
}

impl std::fmt::Debug for ControlFile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ControlFile")
            .field("control_type", &self.config.control_type())
            .field("phase", &self.phase)
            .field("stanzas", &self.stanzas.len())
            .field("violations", &self.report.len())
            .finish()
    }
}

impl ControlFile {
    /// Create a control file with its own copy of `config`.
    ///
    /// URLs are not probed; use [`ControlFile::with_url_prober`] to enable
    /// reachability checks.
    pub fn new(config: &Configuration) -> Self {
        Self {
            config: config.clone(),
            mailbox: Box::new(Rfc5322Validator),
            prober: Box::new(OfflineProber),
            phase: Phase::New,
            stanzas: Vec::new(),
            specs: Vec::new(),
            report: Report::default(),
        }
    }

    /// Use `prober` for the `urlExists` check.
    pub fn with_url_prober(mut self, prober: Box<dyn UrlProber>) -> Self {
        self.prober = prober;
        self
    }

    /// Use `mailbox` to validate email addresses.
    pub fn with_mailbox_validator(mut self, mailbox: Box<dyn MailboxValidator>) -> Self {
        self.mailbox = mailbox;
        self
    }

    fn enter(&mut self, expected: Phase, next: Phase, operation: &'static str) -> Result<(), Error> {
        if self.phase != expected {
            return Err(Error::Phase {
                operation,
                phase: self.phase,
            });
        }
        log::debug!("{}: {} -> {}", operation, self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Read the stanzas from `lines`.
    pub fn parse(&mut self, lines: VecDeque<Line>) -> Result<(), Error> {
        if self.phase != Phase::New {
            return Err(Error::Phase {
                operation: "parse",
                phase: self.phase,
            });
        }
        let mut cx = Context::new(
            &self.config,
            &mut self.report,
            self.mailbox.as_ref(),
            self.prober.as_ref(),
        );
        let parsed = parse::strip(lines, &mut cx).and_then(|lines| parse::stanzas(lines, &mut cx));
        match parsed {
            Ok(stanzas) => {
                self.stanzas = stanzas;
                self.enter(Phase::New, Phase::Parsed, "parse")
            }
            Err(e) => {
                // the file stays New, so a retry starts from an empty report
                self.report = Report::default();
                Err(e)
            }
        }
    }

    /// Read the stanzas from `text`.
    pub fn parse_str(&mut self, text: &str) -> Result<(), Error> {
        self.parse(Line::split(text))
    }

    /// Assign a stanza spec to every stanza, converting fields to their
    /// declared types on the way.
    pub fn match_stanzas(&mut self) -> Result<(), Error> {
        self.enter(Phase::Parsed, Phase::Matched, "match")?;
        let all = self.config.control_type().stanzas();
        self.match_against(all);
        Ok(())
    }

    /// Match the parsed stanzas against `all`, in declaration order.
    fn match_against(&mut self, all: &'static [StanzaSpec]) {
        let mut cx = Context::new(
            &self.config,
            &mut self.report,
            self.mailbox.as_ref(),
            self.prober.as_ref(),
        );
        // indices into `all` that can still match a later stanza
        let mut candidates: VecDeque<usize> = (0..all.len()).collect();
        let mut used: Vec<Option<usize>> = Vec::with_capacity(self.stanzas.len());

        for stanza in self.stanzas.iter_mut() {
            let mut matching = None;
            let mut attempted = Vec::new();
            for (position, &index) in candidates.iter().enumerate() {
                let spec = &all[index];
                attempted.push(spec.name);
                if spec.mandatory {
                    if spec.can_match(stanza) {
                        matching = Some((position, index));
                        break;
                    }
                    if used.last() != Some(&Some(index)) {
                        break;
                    }
                } else if spec.can_match(stanza) {
                    matching = Some((position, index));
                }
            }

            match matching {
                Some((position, index)) => {
                    let spec = &all[index];
                    log::debug!("Stanza at line {} is a {}", stanza.first_line(), spec.name);
                    candidates.drain(..position);
                    if !spec.repeatable {
                        candidates.pop_front();
                    }
                    used.push(Some(index));
                    self.specs.push(spec);
                    spec.reconcile(stanza, &mut cx);
                }
                None => {
                    let attempts = if attempted.is_empty() {
                        "no stanzas were left to match; maybe the error is in an earlier stanza".to_string()
                    } else {
                        format!("attempted matching with: {}", attempted.join(", "))
                    };
                    cx.report(
                        Violation::new(format!(
                            "Cannot match stanza; possibly missing fields or incorrect stanza order: no. {} ({})",
                            used.len() + 1,
                            attempts
                        ))
                        .at_line(stanza.first_line()),
                    );
                    used.push(None);
                    self.specs.push(&BLANK_STANZA);
                }
            }
        }

        for (index, spec) in all.iter().enumerate() {
            if spec.mandatory && !used.contains(&Some(index)) {
                cx.report(Violation::new(format!("Missing mandatory stanza: {}", spec.name)));
            }
        }
    }

    /// Run the field, stanza and file checks.
    pub fn lint_stanzas(&mut self) -> Result<(), Error> {
        self.enter(Phase::Matched, Phase::Linted, "lint")?;

        // file checks read the whole file while reporting
        let mut report = std::mem::take(&mut self.report);
        let mut cx = Context::new(
            &self.config,
            &mut report,
            self.mailbox.as_ref(),
            self.prober.as_ref(),
        );
        for (stanza, spec) in self.stanzas.iter().zip(&self.specs) {
            for (name, field_spec) in &spec.fields {
                let Some(field) = stanza.field(name) else {
                    continue;
                };
                cx.set_line(Some(field.line));
                if field.name != *name {
                    cx.check(
                        Check::FieldNameCapitalization,
                        format!("Field name is not properly capitalized: {}", field.name),
                        None,
                    );
                }
                field_spec.check.run(&field.data, &mut cx);
            }
            cx.set_line(Some(stanza.first_line()));
            for check in spec.checks {
                check.run(stanza, &mut cx);
            }
        }
        cx.set_line(None);
        self.config.control_type().file_check().run(self, &mut cx);

        self.report = report;
        Ok(())
    }

    /// The configuration this file is linted with.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// How far the file has been processed.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The parsed stanzas.
    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    /// The spec matched to each stanza; empty before [`ControlFile::match_stanzas`].
    pub fn specs(&self) -> &[&'static StanzaSpec] {
        &self.specs
    }

    /// Violations found so far.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Consume the file, returning the violations.
    pub fn into_report(self) -> Report {
        self.report
    }
}

/// Parse, match and lint `text` in one go.
pub fn lint(text: &str, config: &Configuration) -> Result<Report, Error> {
    let mut file = ControlFile::new(config);
    file.parse_str(text)?;
    file.match_stanzas()?;
    file.lint_stanzas()?;
    Ok(file.into_report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::FieldCheck;
    use crate::config::Preset;
    use crate::control_type::ControlType;
    use crate::field::FieldType;
    use crate::spec::{FieldSpec, Requirement};
    use indoc::indoc;

    fn config(preset: Preset, control_type: ControlType) -> Configuration {
        let mut config = preset.configuration();
        config.set_control_type(control_type);
        config
    }

    fn matched(text: &str, config: &Configuration) -> ControlFile {
        let mut file = ControlFile::new(config);
        file.parse_str(text).unwrap();
        file.match_stanzas().unwrap();
        file
    }

    fn spec_names(file: &ControlFile) -> Vec<&'static str> {
        file.specs().iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_phase_order() {
        let config = config(Preset::Normal, ControlType::BinaryPackageControl);
        let mut file = ControlFile::new(&config);
        assert!(matches!(
            file.match_stanzas(),
            Err(Error::Phase { operation: "match", phase: Phase::New })
        ));
        file.parse_str("Package: foo\n").unwrap();
        assert_eq!(file.phase(), Phase::Parsed);
        assert!(matches!(file.parse_str("Package: foo\n"), Err(Error::Phase { .. })));
        assert!(matches!(file.lint_stanzas(), Err(Error::Phase { .. })));
        file.match_stanzas().unwrap();
        file.lint_stanzas().unwrap();
        assert!(matches!(
            file.lint_stanzas(),
            Err(Error::Phase { operation: "lint", phase: Phase::Linted })
        ));
    }

    #[test]
    fn test_structural_errors() {
        let config = config(Preset::Normal, ControlType::Copyright);
        let mut file = ControlFile::new(&config);
        assert!(matches!(file.parse_str(""), Err(Error::EmptyInput)));
        assert!(matches!(file.parse_str("\n\n"), Err(Error::NoStanzas)));
        assert_eq!(file.phase(), Phase::New);
    }

    #[test]
    fn test_failed_parse_leaves_no_violations() {
        let mut config = config(Preset::Normal, ControlType::Copyright);
        config.enable(Check::TrailingSpace);
        config.enable(Check::EmptyStanzaSeparators);
        let mut file = ControlFile::new(&config);
        assert!(matches!(file.parse_str("\n  \n"), Err(Error::NoStanzas)));
        assert!(file.report().is_empty());
        assert_eq!(file.phase(), Phase::New);

        file.parse_str("Format: x \n").unwrap();
        assert_eq!(file.report().len(), 1);
        assert_eq!(file.report().violations()[0].line, Some(1));
    }

    #[test]
    fn test_match_source_package_control() {
        let config = config(Preset::Normal, ControlType::SourcePackageControl);
        let file = matched(
            indoc! {"
                Source: foo
                Maintainer: A <a@b.com>
                Standards-Version: 4.6.2

                Package: foo
                Architecture: any
                Description: x

                Package: foo-doc
                Architecture: all
                Description: docs
            "},
            &config,
        );
        assert_eq!(
            spec_names(&file),
            vec!["general stanza", "binary package stanza", "binary package stanza"]
        );
        assert!(file.report().is_empty(), "{:?}", file.report());
    }

    #[test]
    fn test_match_is_deterministic() {
        let config = config(Preset::Exact, ControlType::Copyright);
        let text = indoc! {"
            Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/

            Files: *
            Copyright: a
            License: MIT

            License: MIT
             text
        "};
        let first = spec_names(&matched(text, &config));
        for _ in 0..3 {
            assert_eq!(spec_names(&matched(text, &config)), first);
        }
        assert_eq!(
            first,
            vec!["header stanza", "file stanza", "stand-alone license stanza"]
        );
    }

    fn synthetic(name: &'static str, mandatory: bool, field: &'static str) -> StanzaSpec {
        StanzaSpec {
            name,
            mandatory,
            repeatable: false,
            fields: vec![(
                field,
                FieldSpec::new(Requirement::Mandatory, FieldType::Simple, FieldCheck::None),
            )],
            checks: &[],
        }
    }

    /// Optional `first` and `second` both accept `A`; mandatory `anchor` needs `M`.
    fn synthetic_specs() -> &'static [StanzaSpec] {
        Box::leak(
            vec![
                synthetic("first", false, "A"),
                synthetic("second", false, "A"),
                synthetic("anchor", true, "M"),
            ]
            .into_boxed_slice(),
        )
    }

    fn matched_against(text: &str, specs: &'static [StanzaSpec]) -> ControlFile {
        let mut file = ControlFile::new(&config(Preset::Normal, ControlType::SourcePackageControl));
        file.parse_str(text).unwrap();
        file.match_against(specs);
        file
    }

    #[test]
    fn test_last_optional_candidate_wins() {
        let file = matched_against("A: x\n\nM: y\n", synthetic_specs());
        assert_eq!(spec_names(&file), vec!["second", "anchor"]);
        assert!(file.report().is_empty(), "{:?}", file.report());
    }

    #[test]
    fn test_optional_specs_are_dropped_after_mandatory_match() {
        let file = matched_against("M: y\n\nA: x\n", synthetic_specs());
        assert_eq!(spec_names(&file), vec!["anchor", "blank stanza"]);
        assert_eq!(file.report().len(), 1);
        assert!(file.report().violations()[0]
            .message
            .ends_with("(no stanzas were left to match; maybe the error is in an earlier stanza)"));
    }

    #[test]
    fn test_mandatory_spec_stops_the_scan() {
        let specs: &'static [StanzaSpec] = Box::leak(
            vec![synthetic("anchor", true, "M"), synthetic("trailer", false, "A")].into_boxed_slice(),
        );
        let file = matched_against("A: x\n\nM: y\n", specs);
        assert_eq!(spec_names(&file), vec!["blank stanza", "anchor"]);
        assert_eq!(
            file.report().violations()[0].message,
            "Cannot match stanza; possibly missing fields or incorrect stanza order: no. 1 (attempted matching with: anchor)"
        );
        assert_eq!(file.report().len(), 1);
    }

    #[test]
    fn test_unmatched_stanza() {
        let config = config(Preset::Normal, ControlType::SourcePackageControl);
        let file = matched(
            indoc! {"
                Source: foo
                Maintainer: A <a@b.com>
                Standards-Version: 4.6.2

                Architecture: any
                Description: x
            "},
            &config,
        );
        assert_eq!(spec_names(&file), vec!["general stanza", "blank stanza"]);
        let messages: Vec<_> = file.report().violations().iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Cannot match stanza; possibly missing fields or incorrect stanza order: no. 2 (attempted matching with: binary package stanza)",
                "Missing mandatory stanza: binary package stanza",
            ]
        );
        assert_eq!(file.report().violations()[0].line, Some(5));
        assert_eq!(file.report().violations()[1].line, None);
    }

    #[test]
    fn test_nothing_left_to_match() {
        let config = config(Preset::Normal, ControlType::BinaryPackageControl);
        let file = matched(
            "Package: foo\nVersion: 1.0\nArchitecture: all\nMaintainer: A <a@b.com>\n\nPackage: bar\n",
            &config,
        );
        assert_eq!(spec_names(&file).len(), 2);
        assert!(file.report().violations()[0]
            .message
            .ends_with("(no stanzas were left to match; maybe the error is in an earlier stanza)"));
    }

    #[test]
    fn test_field_name_capitalization() {
        let text = "package: foo\nVersion: 1.0\nArchitecture: all\nMaintainer: A <a@b.com>\nDescription: x\n";
        let report = lint(text, &config(Preset::Exact, ControlType::BinaryPackageControl)).unwrap();
        let capitalization: Vec<_> = report
            .violations()
            .iter()
            .filter(|v| v.check == Some(Check::FieldNameCapitalization))
            .collect();
        assert_eq!(capitalization.len(), 1);
        assert_eq!(capitalization[0].line, Some(1));

        let report = lint(text, &config(Preset::Strict, ControlType::BinaryPackageControl)).unwrap();
        assert_eq!(report.count(Check::FieldNameCapitalization), 0);
    }

    #[test]
    fn test_field_checks_get_field_line() {
        let text = "Package: foo\nVersion: 1.0\nArchitecture: all\nMaintainer: A <a@b.com>\nPriority: extra\nDescription: x\n";
        let report = lint(text, &config(Preset::Normal, ControlType::BinaryPackageControl)).unwrap();
        assert_eq!(report.count(Check::ExtraPriority), 1);
        assert_eq!(report.violations()[0].line, Some(5));
    }
}
