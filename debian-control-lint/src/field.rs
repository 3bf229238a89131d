//! Parsing of individual `Name: value` declarations.

use crate::config::Check;
use crate::parse::Line;
use crate::refs;
use crate::report::{Context, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;

static FIELD_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^[!-"$-,.-9;-~][!-9;-~]*$"#).unwrap());
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// How the value of a field may span lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A single line
    Simple,

    /// Continuation lines are joined into one logical line
    Folded,

    /// Line breaks are significant
    Multiline,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            FieldType::Simple => "simple",
            FieldType::Folded => "folded",
            FieldType::Multiline => "multiline",
        })
    }
}

/// A single field of a stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField {
    /// Name of the field, as written in the file
    pub name: String,

    /// Value of the field.
    ///
    /// Trailing whitespace is removed, as is the indentation of the first line.
    /// Continuation lines are separated by `\n` and keep their indentation.
    pub data: String,

    /// Type of the field
    pub field_type: FieldType,

    /// Line number of the field name
    pub line: usize,
}

impl DataField {
    /// Create a new field, normalizing the surrounding whitespace of `data`.
    pub fn new(name: &str, data: &str, field_type: FieldType, line: usize) -> Self {
        Self {
            name: name.to_string(),
            data: data.trim_end().trim_start_matches([' ', '\t']).to_string(),
            field_type,
            line,
        }
    }

    /// Parse the next field from the front of `lines`.
    ///
    /// Returns `None` if there are no lines left, or if the first line does not
    /// declare a field. In the latter case the problem has already been reported
    /// and no lines are consumed.
    pub(crate) fn parse_next(lines: &mut VecDeque<Line>, cx: &mut Context) -> Option<DataField> {
        let first = lines.front()?;
        let line = first.number;
        let (name, value) = match first.text.split_once(':') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => {
                cx.report(
                    Violation::new(format!(
                        "Data field declaration is missing colon: {}",
                        first.text
                    ))
                    .with_reference(refs::SYNTAX)
                    .at_line(line),
                );
                return None;
            }
        };
        lines.pop_front();

        if cx.enabled(Check::FieldName) && !FIELD_NAME.is_match(&name) {
            cx.report(
                Violation::new(format!("Invalid field name: {}", name))
                    .with_check(Check::FieldName)
                    .with_reference(refs::SYNTAX)
                    .at_line(line),
            );
        }
        if cx.enabled(Check::SpaceAfterColon) && !value.is_empty() && !value.starts_with(' ') {
            cx.report(
                Violation::new(format!("Missing space after colon in field: {}", name))
                    .with_check(Check::SpaceAfterColon)
                    .with_reference(refs::SYNTAX)
                    .at_line(line),
            );
        }

        let mut contents = value;
        let mut field_type = FieldType::Simple;
        while let Some(next) = lines.front() {
            if !next.text.starts_with([' ', '\t']) {
                break;
            }
            contents.push('\n');
            contents.push_str(&next.text);
            field_type = FieldType::Multiline;
            lines.pop_front();
        }

        Some(DataField::new(&name, &contents, field_type, line))
    }

    /// Convert the field to a different type.
    ///
    /// Simple fields can be widened to any type, and multiline and folded fields
    /// can be converted into each other. Narrowing a field to [`FieldType::Simple`]
    /// only happens when `force` is set, and keeps the first line. Returns `None`
    /// for conversions that are not allowed.
    pub fn change_type(&self, target: FieldType, force: bool) -> Option<DataField> {
        let data = match (self.field_type, target) {
            (from, to) if from == to => self.data.clone(),
            (FieldType::Multiline, FieldType::Folded) => {
                NEWLINE_RUN.replace_all(&self.data, "").into_owned()
            }
            (FieldType::Folded, FieldType::Multiline) => self.data.clone(),
            (FieldType::Simple, _) => self.data.clone(),
            (_, FieldType::Simple) if force => {
                self.data.lines().next().unwrap_or_default().to_string()
            }
            _ => return None,
        };
        Some(DataField {
            name: self.name.clone(),
            data,
            field_type: target,
            line: self.line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::report::Report;

    fn parse(text: &str, preset: Preset) -> (Option<DataField>, Report) {
        let config = preset.configuration();
        let mut report = Report::default();
        let mut lines = Line::split(text);
        let field = {
            let mut cx = Context::offline(&config, &mut report);
            DataField::parse_next(&mut lines, &mut cx)
        };
        (field, report)
    }

    #[test]
    fn test_new_trims() {
        let field = DataField::new("Source", " \tfoo  \n", FieldType::Simple, 1);
        assert_eq!(field.data, "foo");
    }

    #[test]
    fn test_simple() {
        let (field, report) = parse("Source: foo", Preset::Exact);
        let field = field.unwrap();
        assert_eq!(field.name, "Source");
        assert_eq!(field.data, "foo");
        assert_eq!(field.field_type, FieldType::Simple);
        assert_eq!(field.line, 1);
        assert!(report.is_empty());
    }

    #[test]
    fn test_continuation() {
        let (field, _) = parse("Description: x\n y\n\tz\nPackage: foo", Preset::Normal);
        let field = field.unwrap();
        assert_eq!(field.data, "x\n y\n\tz");
        assert_eq!(field.field_type, FieldType::Multiline);
    }

    #[test]
    fn test_empty_first_line() {
        let (field, _) = parse("Files:\n abc 1 foo", Preset::Normal);
        assert_eq!(field.unwrap().data, "\n abc 1 foo");
    }

    #[test]
    fn test_missing_colon() {
        let (field, report) = parse("Source foo", Preset::Quirks);
        assert!(field.is_none());
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].check, None);
    }

    #[test]
    fn test_field_name() {
        let (_, report) = parse("#Source: foo", Preset::Normal);
        assert_eq!(report.count(Check::FieldName), 1);
        let (_, report) = parse("Sour ce: foo", Preset::Normal);
        assert_eq!(report.count(Check::FieldName), 1);
        let (_, report) = parse("X-Foo: foo", Preset::Normal);
        assert!(report.is_empty());
    }

    #[test]
    fn test_space_after_colon() {
        let (_, report) = parse("Source:foo", Preset::Strict);
        assert_eq!(report.count(Check::SpaceAfterColon), 1);
        let (_, report) = parse("Source:", Preset::Strict);
        assert!(report.is_empty());
        let (_, report) = parse("Source:foo", Preset::Normal);
        assert!(report.is_empty());
    }

    #[test]
    fn test_change_type() {
        let multi = DataField::new("Depends", "foo,\n  bar,\n baz", FieldType::Multiline, 3);
        let folded = multi.change_type(FieldType::Folded, false).unwrap();
        assert_eq!(folded.data, "foo,bar,baz");
        assert_eq!(folded.line, 3);
        let back = folded.change_type(FieldType::Multiline, false).unwrap();
        assert_eq!(back.change_type(FieldType::Folded, false).unwrap(), folded);

        assert!(multi.change_type(FieldType::Simple, false).is_none());
        let forced = multi.change_type(FieldType::Simple, true).unwrap();
        assert_eq!(forced.data, "foo,");
        assert_eq!(forced.field_type, FieldType::Simple);

        let simple = DataField::new("Source", "foo", FieldType::Simple, 1);
        assert_eq!(
            simple.change_type(FieldType::Multiline, false).unwrap().data,
            "foo"
        );
    }
}
