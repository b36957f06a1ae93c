//! Error types for MPX record encoding and decoding.

use std::path::PathBuf;
use thiserror::Error;

use crate::fields::{FieldType, RecordKind};
use crate::registry::CodePage;

/// Errors that can occur when reading or writing MPX records.
#[derive(Debug, Error)]
pub enum MpxError {
    // === Tokenizer Errors ===
    /// A line could not be split into tokens (unterminated quote or
    /// characters between a closing quote and the next delimiter).
    #[error("malformed record at line {line}: {content}")]
    MalformedRecord { line: usize, content: String },

    // === Registry Errors ===
    /// Locale identifier is not in the locale table.
    #[error("unsupported locale: {locale}")]
    UnsupportedLocale { locale: String },

    /// Code page token is not one of the supported code pages.
    #[error("unknown code page: '{token}'")]
    UnknownCodePage { token: String },

    /// File version token is not one of the supported versions.
    #[error("unknown file version: '{token}'")]
    UnknownVersion { token: String },

    // === Field Errors ===
    /// A present slot holds a token that does not parse as its type.
    #[error("cannot decode {kind} slot {slot} at line {line}: '{token}'")]
    FieldDecode {
        kind: RecordKind,
        slot: usize,
        token: String,
        line: usize,
    },

    /// A value written into a slot does not match the slot type, or the slot
    /// does not exist at the negotiated version.
    #[error("{kind} slot {slot} expects {expected}")]
    FieldTypeMismatch {
        kind: RecordKind,
        slot: usize,
        expected: FieldType,
    },

    // === Header Errors ===
    /// The header record was mutated after it was frozen.
    #[error("header is frozen; cannot change {field}")]
    FrozenHeader { field: &'static str },

    /// The delimiter collides with the decimal separator of the locale.
    #[error("delimiter '{delimiter}' conflicts with decimal separator '{decimal_separator}'")]
    DelimiterConflict {
        delimiter: char,
        decimal_separator: char,
    },

    /// The delimiter cannot be used to separate fields.
    #[error("invalid delimiter: {delimiter:?}")]
    InvalidDelimiter { delimiter: char },

    /// The input holds no header line.
    #[error("missing header record")]
    MissingHeader,

    /// The header line does not hold program name, version and code page.
    #[error("header record has {found} fields, expected 3")]
    HeaderFieldCount { found: usize },

    // === Session Errors ===
    /// A record line starts with a tag that names no known record kind.
    #[error("unknown record type '{tag}' at line {line}")]
    UnknownRecordKind { line: usize, tag: String },

    /// Text holds characters the code page cannot represent.
    #[error("text cannot be encoded with code page {code_page}")]
    UnencodableText { code_page: CodePage },

    /// A value holds a line break, which cannot be read back from a
    /// line-oriented file.
    #[error("{field} contains a line break")]
    LineBreakInText { field: String },

    /// Bytes of a line are not valid in the file code page.
    #[error("line {line} is not valid {code_page} text")]
    UndecodableText { code_page: CodePage, line: usize },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for MPX operations.
pub type Result<T> = std::result::Result<T, MpxError>;

impl MpxError {
    /// Create a MalformedRecord error.
    pub fn malformed(line: usize, content: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            content: content.into(),
        }
    }

    /// Create an UnsupportedLocale error.
    pub fn unsupported_locale(locale: impl Into<String>) -> Self {
        Self::UnsupportedLocale {
            locale: locale.into(),
        }
    }

    /// Create an UnknownCodePage error.
    pub fn unknown_code_page(token: impl Into<String>) -> Self {
        Self::UnknownCodePage {
            token: token.into(),
        }
    }

    /// Create an UnknownVersion error.
    pub fn unknown_version(token: impl Into<String>) -> Self {
        Self::UnknownVersion {
            token: token.into(),
        }
    }

    /// Create a FieldDecode error.
    pub fn field_decode(
        kind: RecordKind,
        slot: usize,
        token: impl Into<String>,
        line: usize,
    ) -> Self {
        Self::FieldDecode {
            kind,
            slot,
            token: token.into(),
            line,
        }
    }

    /// Line number the error refers to, when it has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. }
            | Self::FieldDecode { line, .. }
            | Self::UnknownRecordKind { line, .. }
            | Self::UndecodableText { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Attach a line number to an error raised before it was known.
    #[must_use]
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::MalformedRecord { content, .. } => Self::MalformedRecord { line, content },
            Self::FieldDecode {
                kind, slot, token, ..
            } => Self::FieldDecode {
                kind,
                slot,
                token,
                line,
            },
            Self::UnknownRecordKind { tag, .. } => Self::UnknownRecordKind { line, tag },
            Self::UndecodableText { code_page, .. } => Self::UndecodableText { code_page, line },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MpxError::malformed(7, "\"unterminated");
        assert_eq!(
            format!("{err}"),
            "malformed record at line 7: \"unterminated"
        );

        let err = MpxError::unknown_version("9.9");
        assert_eq!(format!("{err}"), "unknown file version: '9.9'");
    }

    #[test]
    fn test_field_decode_display() {
        let err = MpxError::field_decode(RecordKind::Task, 3, "abc", 12);
        assert_eq!(
            format!("{err}"),
            "cannot decode task slot 3 at line 12: 'abc'"
        );
    }

    #[test]
    fn test_at_line_rewrites_line() {
        let err = MpxError::malformed(0, "x").at_line(42);
        assert_eq!(err.line(), Some(42));

        let err = MpxError::UndecodableText {
            code_page: CodePage::Zh,
            line: 0,
        }
        .at_line(5);
        assert_eq!(format!("{err}"), "line 5 is not valid ZH text");

        let err = MpxError::unknown_code_page("UTF9").at_line(42);
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: MpxError = io_err.into();
        assert!(matches!(err, MpxError::Io(_)));
    }
}
