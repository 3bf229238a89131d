//! Violation records and the sink that checks report into.

use crate::config::{Check, Configuration};
use crate::control_type::ControlType;
use crate::mailbox::{MailboxValidator, Rfc5322Validator};
use crate::probe::{OfflineProber, UrlProber};

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// What is wrong
    pub message: String,

    /// The check that found the problem; `None` for plain syntax errors
    pub check: Option<Check>,

    /// Link to the relevant section of Debian Policy or the copyright format
    pub reference: Option<&'static str>,

    /// Line the problem was found on
    pub line: Option<usize>,
}

impl Violation {
    /// Create a violation that is not tied to any check.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            check: None,
            reference: None,
            line: None,
        }
    }

    /// Attach the check that produced this violation.
    pub fn with_check(mut self, check: Check) -> Self {
        self.check = Some(check);
        self
    }

    /// Attach a reference URL.
    pub fn with_reference(mut self, reference: &'static str) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Attach a line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Format the violation for display.
    pub fn render(&self, show_check: bool, show_reference: bool) -> String {
        let mut out = String::from("Error: ");
        if show_check {
            if let Some(check) = self.check {
                out.push_str(&format!("[{}] ", check));
            }
        }
        if let Some(line) = self.line {
            out.push_str(&format!("line {}: ", line));
        }
        out.push_str(&self.message);
        if show_reference {
            if let Some(reference) = self.reference {
                out.push_str(&format!(" <{}>", reference));
            }
        }
        out
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.render(true, true))
    }
}

/// All violations found in one file, in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    /// Add a violation.
    pub fn push(&mut self, violation: Violation) {
        log::trace!("{}", violation);
        self.violations.push(violation);
    }

    /// The collected violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations reported by `check`.
    pub fn count(&self, check: Check) -> usize {
        self.violations
            .iter()
            .filter(|v| v.check == Some(check))
            .count()
    }

    /// Consume the report, returning the violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl IntoIterator for Report {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

/// Everything a check needs: the configuration, the collaborators and a
/// place to report to.
pub struct Context<'a> {
    config: &'a Configuration,
    report: &'a mut Report,
    mailbox: &'a dyn MailboxValidator,
    prober: &'a dyn UrlProber,
    line: Option<usize>,
}

impl<'a> Context<'a> {
    /// Create a new context.
    pub fn new(
        config: &'a Configuration,
        report: &'a mut Report,
        mailbox: &'a dyn MailboxValidator,
        prober: &'a dyn UrlProber,
    ) -> Self {
        Self {
            config,
            report,
            mailbox,
            prober,
            line: None,
        }
    }

    /// Create a context that never touches the network.
    pub fn offline(config: &'a Configuration, report: &'a mut Report) -> Self {
        Self::new(config, report, &Rfc5322Validator, &OfflineProber)
    }

    /// The active configuration.
    pub fn config(&self) -> &Configuration {
        self.config
    }

    /// Whether `check` is enabled.
    pub fn enabled(&self, check: Check) -> bool {
        self.config.is_enabled(check)
    }

    /// The type of file being linted.
    pub fn control_type(&self) -> ControlType {
        self.config.control_type()
    }

    /// The mailbox validator.
    pub fn mailbox(&self) -> &dyn MailboxValidator {
        self.mailbox
    }

    /// The URL prober.
    pub fn prober(&self) -> &dyn UrlProber {
        self.prober
    }

    /// Set the line attached to violations that do not carry their own.
    pub fn set_line(&mut self, line: Option<usize>) {
        self.line = line;
    }

    /// Report a violation.
    pub fn report(&mut self, mut violation: Violation) {
        debug_assert!(
            violation.check.map_or(true, |c| Check::ALL.contains(&c)),
            "unregistered check"
        );
        if violation.line.is_none() {
            violation.line = self.line;
        }
        self.report.push(violation);
    }

    /// Report `message` under `check`, if the check is enabled.
    pub fn check(&mut self, check: Check, message: impl Into<String>, reference: Option<&'static str>) {
        if self.enabled(check) {
            let mut violation = Violation::new(message).with_check(check);
            violation.reference = reference;
            self.report(violation);
        }
    }

    /// Report a syntax error that is not tied to any check.
    pub fn error(&mut self, message: impl Into<String>, reference: Option<&'static str>) {
        let mut violation = Violation::new(message);
        violation.reference = reference;
        self.report(violation);
    }
}
