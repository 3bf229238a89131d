//! Declarative descriptions of the stanzas and fields a control file may contain.

use crate::checks::{FieldCheck, StanzaCheck};
use crate::config::Check;
use crate::field::FieldType;
use crate::refs;
use crate::report::{Context, Violation};
use crate::stanza::Stanza;
use once_cell::sync::Lazy;
use regex::Regex;

static CUSTOM_FIELD_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^X[BCS]{1,3}-.+$").unwrap());

/// How necessary a field is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// The stanza is not valid without it
    Mandatory,

    /// Should be present, but can be omitted
    Recommended,

    /// May be present
    Optional,
}

/// Description of one field of a stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// How necessary the field is
    pub requirement: Requirement,

    /// The type the value must have
    pub field_type: FieldType,

    /// Check run on the value of the field
    pub check: FieldCheck,
}

impl FieldSpec {
    /// Create a new field spec.
    pub const fn new(requirement: Requirement, field_type: FieldType, check: FieldCheck) -> Self {
        Self {
            requirement,
            field_type,
            check,
        }
    }
}

/// Description of one kind of stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StanzaSpec {
    /// Name used in messages
    pub name: &'static str,

    /// Whether the stanza must be present
    pub mandatory: bool,

    /// Whether the stanza may appear more than once in a row
    pub repeatable: bool,

    /// The known fields, in their conventional order
    pub fields: Vec<(&'static str, FieldSpec)>,

    /// Checks run on the whole stanza
    pub checks: &'static [StanzaCheck],
}

/// The placeholder assigned to stanzas that match no spec.
pub static BLANK_STANZA: StanzaSpec = StanzaSpec {
    name: "blank stanza",
    mandatory: false,
    repeatable: false,
    fields: Vec::new(),
    checks: &[],
};

impl StanzaSpec {
    /// Look up the spec of a field, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, spec)| spec)
    }

    /// Whether all mandatory fields of this spec are present in `stanza`.
    pub fn can_match(&self, stanza: &Stanza) -> bool {
        self.fields
            .iter()
            .filter(|(_, spec)| spec.requirement == Requirement::Mandatory)
            .all(|(name, _)| stanza.contains(name))
    }

    /// Bring the fields of `stanza` in line with this spec.
    ///
    /// Fields are converted to their declared type, missing recommended fields
    /// are reported, and fields the spec does not know about are checked
    /// against the naming scheme for user-defined fields.
    pub(crate) fn reconcile(&self, stanza: &mut Stanza, cx: &mut Context) {
        for (name, spec) in &self.fields {
            match stanza.field(name) {
                Some(field) => {
                    let converted = match field.change_type(spec.field_type, false) {
                        Some(converted) => converted,
                        None => {
                            if cx.enabled(Check::FieldType) {
                                cx.report(
                                    Violation::new(format!(
                                        "Invalid field type for field {}: expected {}, found {}",
                                        field.name, spec.field_type, field.field_type
                                    ))
                                    .with_check(Check::FieldType)
                                    .with_reference(refs::SYNTAX)
                                    .at_line(field.line),
                                );
                            }
                            match field.change_type(spec.field_type, true) {
                                Some(converted) => converted,
                                None => continue,
                            }
                        }
                    };
                    stanza.replace(converted);
                }
                None if spec.requirement == Requirement::Recommended => {
                    if cx.enabled(Check::RecommendedFields) {
                        cx.report(
                            Violation::new(format!(
                                "Missing recommended field in {}: {}",
                                self.name, name
                            ))
                            .with_check(Check::RecommendedFields)
                            .at_line(stanza.first_line()),
                        );
                    }
                }
                None => {}
            }
        }

        if !cx.enabled(Check::CustomFields) {
            return;
        }
        for field in stanza.fields() {
            if self.field(&field.name).is_some() {
                continue;
            }
            cx.report(
                Violation::new(format!("Custom field: {}", field.name))
                    .with_check(Check::CustomFields)
                    .with_reference(refs::USER_DEFINED_FIELDS)
                    .at_line(field.line),
            );
            if cx.enabled(Check::CustomFieldNames) && !is_valid_custom_name(&field.name) {
                cx.report(
                    Violation::new(format!("Invalid custom field name: {}", field.name))
                        .with_check(Check::CustomFieldNames)
                        .with_reference(refs::USER_DEFINED_FIELDS)
                        .at_line(field.line),
                );
            }
        }
    }
}

/// Whether `name` follows the `X[BCS]-Name` scheme for user-defined fields.
fn is_valid_custom_name(name: &str) -> bool {
    if !CUSTOM_FIELD_NAME.is_match(name) {
        return false;
    }
    let prefix = name[1..].split('-').next().unwrap_or_default();
    ['B', 'C', 'S']
        .iter()
        .all(|letter| prefix.chars().filter(|c| c == letter).count() <= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::field::DataField;
    use crate::report::Report;

    fn spec() -> StanzaSpec {
        StanzaSpec {
            name: "test stanza",
            mandatory: true,
            repeatable: false,
            fields: vec![
                ("Package", FieldSpec::new(Requirement::Mandatory, FieldType::Simple, FieldCheck::PackageName)),
                ("Section", FieldSpec::new(Requirement::Recommended, FieldType::Simple, FieldCheck::Section)),
                ("Depends", FieldSpec::new(Requirement::Optional, FieldType::Folded, FieldCheck::Dependency)),
                ("Description", FieldSpec::new(Requirement::Optional, FieldType::Multiline, FieldCheck::Description)),
            ],
            checks: &[],
        }
    }

    fn stanza(fields: &[(&str, &str, FieldType)]) -> Stanza {
        Stanza::new(
            10,
            fields
                .iter()
                .enumerate()
                .map(|(i, (name, data, t))| DataField::new(name, data, *t, 10 + i))
                .collect(),
        )
    }

    #[test]
    fn test_can_match() {
        let spec = spec();
        assert!(spec.can_match(&stanza(&[("package", "foo", FieldType::Simple)])));
        assert!(!spec.can_match(&stanza(&[("Section", "misc", FieldType::Simple)])));
        assert!(BLANK_STANZA.can_match(&stanza(&[("Section", "misc", FieldType::Simple)])));
    }

    #[test]
    fn test_reconcile_types() {
        let config = Preset::Normal.configuration();
        let mut report = Report::default();
        let mut stanza = stanza(&[
            ("Package", "foo\n bar", FieldType::Multiline),
            ("Depends", "a,\n b", FieldType::Multiline),
            ("Description", "x", FieldType::Simple),
        ]);
        spec().reconcile(&mut stanza, &mut Context::offline(&config, &mut report));

        assert_eq!(report.count(Check::FieldType), 1);
        assert_eq!(report.violations()[0].line, Some(10));
        assert_eq!(stanza.field("Package").unwrap().data, "foo");
        assert_eq!(stanza.field("Depends").unwrap().data, "a,b");
        assert_eq!(stanza.field("Depends").unwrap().field_type, FieldType::Folded);
        assert_eq!(
            stanza.field("Description").unwrap().field_type,
            FieldType::Multiline
        );
        assert_eq!(stanza.fields()[0].name, "Package");
    }

    #[test]
    fn test_field_type_disabled_still_converts() {
        let mut config = Preset::Exact.configuration();
        config.disable(Check::FieldType);
        for config in [config, Preset::Quirks.configuration()] {
            assert!(!config.is_enabled(Check::FieldType));
            let mut report = Report::default();
            let mut stanza = stanza(&[("Package", "foo\n bar", FieldType::Multiline)]);
            spec().reconcile(&mut stanza, &mut Context::offline(&config, &mut report));

            assert_eq!(report.count(Check::FieldType), 0);
            assert_eq!(stanza.field("Package").unwrap().data, "foo");
            assert_eq!(stanza.field("Package").unwrap().field_type, FieldType::Simple);
        }
    }

    #[test]
    fn test_reconcile_recommended_and_custom() {
        let config = Preset::Strict.configuration();
        let mut report = Report::default();
        let mut stanza = stanza(&[
            ("Package", "foo", FieldType::Simple),
            ("XS-Foo", "bar", FieldType::Simple),
            ("XBB-Foo", "bar", FieldType::Simple),
        ]);
        spec().reconcile(&mut stanza, &mut Context::offline(&config, &mut report));

        assert_eq!(report.count(Check::RecommendedFields), 1);
        assert_eq!(report.count(Check::CustomFields), 2);
        assert_eq!(report.count(Check::CustomFieldNames), 1);
    }

    #[test]
    fn test_custom_names() {
        assert!(is_valid_custom_name("XS-Foo"));
        assert!(is_valid_custom_name("XBCS-Foo"));
        assert!(is_valid_custom_name("XSB-Foo-Bar"));
        assert!(!is_valid_custom_name("XSS-Foo"));
        assert!(!is_valid_custom_name("X-Foo"));
        assert!(!is_valid_custom_name("Foo"));
        assert!(!is_valid_custom_name("XS-"));
    }
}
