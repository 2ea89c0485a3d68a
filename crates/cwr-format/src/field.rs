//! Field descriptors: one entry of a record template.

use crate::buffer::PadMode;

/// Where a field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A constant written as-is.
    Literal(&'static str),
    /// A key looked up in the record's [`FieldValues`](crate::FieldValues).
    Placeholder(&'static str),
}

/// Character class a validator expects in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Free text (names, titles, codes).
    Alpha,
    /// ASCII digits only.
    Numeric,
}

/// One field of a fixed-width record.
///
/// Offsets are 0-based; the field covers `[offset, offset + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub offset: usize,
    pub length: usize,
    pub source: FieldSource,
    pub pad: PadMode,
    pub format: FieldFormat,
    pub required: bool,
    /// Report a value that fills the whole field as possibly truncated.
    pub watch_truncation: bool,
}

impl FieldDescriptor {
    /// Space-padded free text read from `key`.
    pub const fn text(name: &'static str, offset: usize, length: usize, key: &'static str) -> Self {
        Self {
            name,
            offset,
            length,
            source: FieldSource::Placeholder(key),
            pad: PadMode::Space,
            format: FieldFormat::Alpha,
            required: false,
            watch_truncation: false,
        }
    }

    /// Zero-padded digits read from `key`.
    pub const fn numeric(
        name: &'static str,
        offset: usize,
        length: usize,
        key: &'static str,
    ) -> Self {
        Self {
            name,
            offset,
            length,
            source: FieldSource::Placeholder(key),
            pad: PadMode::Zero,
            format: FieldFormat::Numeric,
            required: false,
            watch_truncation: false,
        }
    }

    /// A constant value.
    pub const fn literal(
        name: &'static str,
        offset: usize,
        length: usize,
        value: &'static str,
    ) -> Self {
        Self {
            name,
            offset,
            length,
            source: FieldSource::Literal(value),
            pad: PadMode::Space,
            format: FieldFormat::Alpha,
            required: false,
            watch_truncation: false,
        }
    }

    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Digits that stay blank (space-padded) when absent, e.g. society codes.
    #[must_use]
    pub const fn digits(self) -> Self {
        Self {
            format: FieldFormat::Numeric,
            pad: PadMode::Space,
            ..self
        }
    }

    #[must_use]
    pub const fn watch_truncation(self) -> Self {
        Self {
            watch_truncation: true,
            ..self
        }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Placeholder key, if the field is not a literal.
    pub const fn key(&self) -> Option<&'static str> {
        match self.source {
            FieldSource::Placeholder(key) => Some(key),
            FieldSource::Literal(_) => None,
        }
    }

    pub const fn is_literal(&self) -> bool {
        matches!(self.source, FieldSource::Literal(_))
    }

    pub const fn same_span(&self, other: &FieldDescriptor) -> bool {
        self.offset == other.offset && self.length == other.length
    }

    /// This field's characters in `line`, or `None` when the line ends
    /// before the field starts. A field cut short by trailing-space trimming
    /// comes back without its missing tail.
    pub fn read<'a>(&self, line: &'a str) -> Option<&'a str> {
        field_text(line, self.offset, self.length)
    }
}

/// Characters `[offset, offset + length)` of `line`, counted in characters.
///
/// Returns `None` when `line` has no character at `offset`.
pub fn field_text(line: &str, offset: usize, length: usize) -> Option<&str> {
    let mut indices = line.char_indices().map(|(idx, _)| idx).chain([line.len()]);
    let start = indices.nth(offset)?;
    if start == line.len() {
        return None;
    }
    let end = if length == 0 {
        start
    } else {
        indices.nth(length - 1).unwrap_or(line.len())
    };
    Some(&line[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_text_slices_by_characters() {
        let line = "SWR0000000100000002ÉTIENNE";
        assert_eq!(field_text(line, 0, 3), Some("SWR"));
        assert_eq!(field_text(line, 19, 7), Some("ÉTIENNE"));
        assert_eq!(field_text(line, 19, 3), Some("ÉTI"));
    }

    #[test]
    fn field_text_returns_partial_tail() {
        assert_eq!(field_text("TRL00001", 3, 8), Some("00001"));
        assert_eq!(field_text("TRL", 3, 5), None);
        assert_eq!(field_text("", 0, 3), None);
    }

    #[test]
    fn builders_set_padding_and_format() {
        let share = FieldDescriptor::numeric("PR Share", 115, 5, "pr_share").required();
        assert_eq!(share.pad, PadMode::Zero);
        assert_eq!(share.format, FieldFormat::Numeric);
        assert!(share.required);
        assert_eq!(share.end(), 120);

        let society = FieldDescriptor::text("PR Society", 112, 3, "pr_society").digits();
        assert_eq!(society.pad, PadMode::Space);
        assert_eq!(society.format, FieldFormat::Numeric);
        assert_eq!(society.key(), Some("pr_society"));
    }
}
