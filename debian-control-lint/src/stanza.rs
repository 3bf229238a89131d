//! Stanzas: blank-line separated groups of fields.

use crate::config::Check;
use crate::field::DataField;
use crate::parse::{is_blank, Line};
use crate::refs;
use crate::report::Context;
use std::collections::{HashSet, VecDeque};

/// A paragraph of fields.
///
/// Field names are unique within a stanza, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    first_line: usize,
    fields: Vec<DataField>,
}

impl Stanza {
    /// Create a stanza from its fields.
    pub fn new(first_line: usize, fields: Vec<DataField>) -> Self {
        Self { first_line, fields }
    }

    /// Line number of the first field.
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// The fields, in the order they were declared.
    pub fn fields(&self) -> &[DataField] {
        &self.fields
    }

    /// Look up a field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&DataField> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Whether a field is present, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Replace the field with the same name, keeping its position.
    pub(crate) fn replace(&mut self, field: DataField) {
        if let Some(existing) = self
            .fields
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(&field.name))
        {
            *existing = field;
        }
    }

    /// Read the next stanza from the front of `lines`.
    ///
    /// Stops at the first blank line, which is left in place. Returns `None` if
    /// no field could be read. A line that does not declare a field ends
    /// parsing of the whole input.
    pub(crate) fn parse_next(lines: &mut VecDeque<Line>, cx: &mut Context) -> Option<Stanza> {
        let first_line = lines.front()?.number;
        let mut fields: Vec<DataField> = Vec::new();
        let mut seen = HashSet::new();

        while lines.front().is_some_and(|l| !is_blank(&l.text)) {
            let Some(field) = DataField::parse_next(lines, cx) else {
                log::warn!(
                    "Giving up after malformed line {}",
                    lines.front().map_or(0, |l| l.number)
                );
                lines.clear();
                break;
            };
            cx.set_line(Some(field.line));
            if !seen.insert(field.name.to_ascii_lowercase()) {
                cx.check(
                    Check::DuplicateField,
                    format!("Duplicate field: {}", field.name),
                    Some(refs::SYNTAX),
                );
                continue;
            }
            if field.data.is_empty() {
                cx.check(
                    Check::EmptyFields,
                    format!("Empty field: {}", field.name),
                    Some(refs::SYNTAX),
                );
            }
            fields.push(field);
        }
        cx.set_line(None);

        if fields.is_empty() {
            None
        } else {
            Some(Stanza::new(first_line, fields))
        }
    }
}
