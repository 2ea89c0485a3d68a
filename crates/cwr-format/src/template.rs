//! Record templates and the assembler.

use crate::buffer::{FixedWidthBuffer, LINE_BUFFER_WIDTH, PadMode};
use crate::error::{Result, TemplateError};
use crate::field::{FieldDescriptor, FieldSource};
use crate::format::normalize_value;
use crate::layout::{RecordType, TAG_WIDTH};
use crate::values::FieldValues;

/// The ordered field list of one record type.
///
/// Fields are in ascending offset order and never overlap, except that a
/// placeholder may directly follow a literal with the identical span. That
/// placeholder overrides the literal default when it has a value and leaves
/// the default in place when it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTemplate {
    record_type: RecordType,
    fields: &'static [FieldDescriptor],
}

impl RecordTemplate {
    pub const fn new(record_type: RecordType, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            record_type,
            fields,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn tag(&self) -> &'static str {
        self.record_type.tag()
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Rightmost field end: the length of a line with no trailing blanks.
    pub fn width(&self) -> usize {
        self.fields
            .iter()
            .map(FieldDescriptor::end)
            .max()
            .unwrap_or(TAG_WIDTH)
            .max(TAG_WIDTH)
    }

    /// The field fed by placeholder `key`.
    pub fn field(&self, key: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.key() == Some(key))
    }

    /// Fields a validator should inspect: literal defaults that are followed
    /// by an override are folded into the override.
    pub fn checked_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        let fields = self.fields;
        fields.iter().enumerate().filter_map(move |(idx, field)| {
            let overridden = fields
                .get(idx + 1)
                .is_some_and(|next| field.is_literal() && !next.is_literal() && next.same_span(field));
            (!overridden).then_some(field)
        })
    }

    fn overrides_default(&self, idx: usize) -> bool {
        let Some(field) = self.fields.get(idx) else {
            return false;
        };
        idx > 0 && {
            let previous = &self.fields[idx - 1];
            previous.is_literal() && !field.is_literal() && previous.same_span(field)
        }
    }

    /// Check geometry: lengths, bounds, ordering and overlaps.
    pub fn validate(&self) -> Result<()> {
        let record = self.tag();
        let mut previous: Option<&FieldDescriptor> = None;
        for (idx, field) in self.fields.iter().enumerate() {
            if field.length == 0 {
                return Err(TemplateError::ZeroLength {
                    record,
                    field: field.name,
                });
            }
            if field.offset < TAG_WIDTH {
                return Err(TemplateError::OverlapsTag {
                    record,
                    field: field.name,
                    offset: field.offset,
                });
            }
            if field.end() > LINE_BUFFER_WIDTH {
                return Err(TemplateError::OutOfBounds {
                    record,
                    field: field.name,
                    end: field.end(),
                    width: LINE_BUFFER_WIDTH,
                });
            }
            if let FieldSource::Literal(value) = field.source {
                if value.chars().count() > field.length {
                    return Err(TemplateError::LiteralTooLong {
                        record,
                        field: field.name,
                        length: field.length,
                    });
                }
            }
            if let Some(prev) = previous {
                if field.offset < prev.offset {
                    return Err(TemplateError::OutOfOrder {
                        record,
                        field: field.name,
                        offset: field.offset,
                    });
                }
                if field.offset < prev.end() && !self.overrides_default(idx) {
                    return Err(TemplateError::Overlap {
                        record,
                        field: field.name,
                        previous: prev.name,
                    });
                }
            }
            previous = Some(field);
        }
        Ok(())
    }

    /// Assemble one line from `values`.
    ///
    /// Missing placeholders render as blanks (or zeros for zero-padded
    /// fields). Values are stripped, uppercased, and cut to their field
    /// length. Trailing spaces are trimmed from the result.
    pub fn build(&self, values: &FieldValues) -> String {
        let mut buffer = FixedWidthBuffer::new(LINE_BUFFER_WIDTH);
        buffer.write(0, self.tag(), TAG_WIDTH, PadMode::Space);
        for (idx, field) in self.fields.iter().enumerate() {
            let raw = match field.source {
                FieldSource::Literal(value) => value.to_string(),
                FieldSource::Placeholder(key) => values.text(key),
            };
            let value = normalize_value(&raw);
            if value.is_empty() && self.overrides_default(idx) {
                continue;
            }
            buffer.write(field.offset, &value, field.length, field.pad);
        }
        buffer.render()
    }
}

/// Assemble one line of `template` from `values`.
pub fn build(template: &RecordTemplate, values: &FieldValues) -> String {
    template.build(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::field_text;

    const SAMPLE: &[FieldDescriptor] = &[
        FieldDescriptor::numeric("Counter", 3, 4, "counter").required(),
        FieldDescriptor::literal("Kind", 7, 3, "ABC"),
        FieldDescriptor::text("Kind", 7, 3, "kind"),
        FieldDescriptor::text("Name", 12, 6, "name"),
    ];

    fn sample() -> RecordTemplate {
        RecordTemplate::new(RecordType::Grh, SAMPLE)
    }

    #[test]
    fn build_writes_tag_and_fields() {
        let values: FieldValues = [("counter", "7"), ("name", "bob")].into_iter().collect();
        let line = sample().build(&values);
        assert_eq!(line, "GRH0007ABC  BOB");
    }

    #[test]
    fn override_replaces_literal_default() {
        let values: FieldValues = [("kind", "xyz")].into_iter().collect();
        let line = sample().build(&values);
        assert_eq!(field_text(&line, 7, 3), Some("XYZ"));
        assert_eq!(field_text(&line, 3, 4), Some("0000"));
    }

    #[test]
    fn sample_geometry_is_valid() {
        assert_eq!(sample().validate(), Ok(()));
        assert_eq!(sample().width(), 18);
        assert_eq!(sample().checked_fields().count(), 3);
        assert_eq!(sample().field("name").map(|f| f.offset), Some(12));
    }

    #[test]
    fn overlapping_placeholders_are_rejected() {
        const BAD: &[FieldDescriptor] = &[
            FieldDescriptor::text("First", 3, 5, "first"),
            FieldDescriptor::text("Second", 6, 5, "second"),
        ];
        let err = RecordTemplate::new(RecordType::Spu, BAD).validate();
        assert_eq!(
            err,
            Err(TemplateError::Overlap {
                record: "SPU",
                field: "Second",
                previous: "First",
            })
        );
    }

    #[test]
    fn out_of_order_and_out_of_bounds_are_rejected() {
        const UNORDERED: &[FieldDescriptor] = &[
            FieldDescriptor::text("Late", 20, 2, "late"),
            FieldDescriptor::text("Early", 5, 2, "early"),
        ];
        assert!(matches!(
            RecordTemplate::new(RecordType::Swr, UNORDERED).validate(),
            Err(TemplateError::OutOfOrder { field: "Early", .. })
        ));

        const WIDE: &[FieldDescriptor] = &[FieldDescriptor::text("Huge", 500, 20, "huge")];
        assert!(matches!(
            RecordTemplate::new(RecordType::Rec, WIDE).validate(),
            Err(TemplateError::OutOfBounds { end: 520, .. })
        ));

        const TAGGED: &[FieldDescriptor] = &[FieldDescriptor::text("Tag", 1, 2, "tag")];
        assert!(matches!(
            RecordTemplate::new(RecordType::Hdr, TAGGED).validate(),
            Err(TemplateError::OverlapsTag { offset: 1, .. })
        ));

        const LONG_LITERAL: &[FieldDescriptor] = &[FieldDescriptor::literal("Type", 3, 2, "ORI")];
        assert!(matches!(
            RecordTemplate::new(RecordType::Nwr, LONG_LITERAL).validate(),
            Err(TemplateError::LiteralTooLong { length: 2, .. })
        ));
    }
}
