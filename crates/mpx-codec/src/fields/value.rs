//! Typed field values.

use chrono::NaiveDateTime;

use super::FieldType;
use crate::locale::LocaleProfile;

/// Decoded form of one token.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDateTime),
    Integer(i64),
    Decimal(f64),
    Currency(f64),
    /// The slot exists but holds no value.
    Null,
    /// The slot does not exist at the negotiated file version.
    Absent,
}

impl FieldValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Parse a non-empty token as `field_type` under `locale`.
    ///
    /// Returns `None` when the token does not match the locale pattern.
    #[must_use]
    pub fn parse(token: &str, field_type: FieldType, locale: &LocaleProfile) -> Option<Self> {
        match field_type {
            FieldType::Text => Some(Self::Text(token.to_string())),
            FieldType::Date => locale.date.parse(token).map(Self::Date),
            FieldType::Integer => locale.number.parse_integer(token).map(Self::Integer),
            FieldType::Decimal => locale.number.parse_decimal(token).map(Self::Decimal),
            FieldType::Currency => locale
                .currency
                .parse(token, &locale.number)
                .map(Self::Currency),
        }
    }

    /// Format as a token under `locale`. `Null` and `Absent` become empty
    /// tokens.
    #[must_use]
    pub fn format(&self, locale: &LocaleProfile) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Date(value) => locale.date.format(*value),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => locale.number.format_decimal(*value),
            Self::Currency(value) => locale.currency.format(*value, &locale.number),
            Self::Null | Self::Absent => String::new(),
        }
    }

    /// Type of a concrete value; `None` for `Null` and `Absent`.
    #[must_use]
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Self::Text(_) => Some(FieldType::Text),
            Self::Date(_) => Some(FieldType::Date),
            Self::Integer(_) => Some(FieldType::Integer),
            Self::Decimal(_) => Some(FieldType::Decimal),
            Self::Currency(_) => Some(FieldType::Currency),
            Self::Null | Self::Absent => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value of a decimal or currency.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Decimal(value) | Self::Currency(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
