//! Error types for record geometry.

use thiserror::Error;

/// A record template whose geometry cannot be assembled safely.
///
/// These are configuration bugs, raised before any row is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Field has zero length.
    #[error("{record}: field '{field}' has zero length")]
    ZeroLength { record: &'static str, field: &'static str },

    /// Field runs past the line buffer.
    #[error("{record}: field '{field}' ends at {end}, beyond the {width}-character line buffer")]
    OutOfBounds {
        record: &'static str,
        field: &'static str,
        end: usize,
        width: usize,
    },

    /// Field overwrites the 3-character record tag.
    #[error("{record}: field '{field}' at offset {offset} overlaps the record tag")]
    OverlapsTag {
        record: &'static str,
        field: &'static str,
        offset: usize,
    },

    /// Field starts before the previous one.
    #[error("{record}: field '{field}' at offset {offset} is out of ascending order")]
    OutOfOrder {
        record: &'static str,
        field: &'static str,
        offset: usize,
    },

    /// Field overlaps the previous one without being an override of a literal default.
    #[error("{record}: field '{field}' overlaps '{previous}'")]
    Overlap {
        record: &'static str,
        field: &'static str,
        previous: &'static str,
    },

    /// Literal does not fit its field.
    #[error("{record}: literal for '{field}' is longer than {length} characters")]
    LiteralTooLong {
        record: &'static str,
        field: &'static str,
        length: usize,
    },
}

/// Result type alias for template checks.
pub type Result<T> = std::result::Result<T, TemplateError>;
