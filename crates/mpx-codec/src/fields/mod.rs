//! Versioned field resolution.
//!
//! The layout tables in [`layout`] are the single source of truth for which
//! slots a record kind has at each file version and what type they hold.
//! [`decode_field`] and [`encode_field`] apply them to single tokens.

pub mod layout;
mod value;

pub use layout::{CustomField, FieldDef, FieldName, FieldSpec, FieldType, RecordKind, field_spec};
pub use value::FieldValue;

use crate::error::{MpxError, Result};
use crate::locale::LocaleProfile;
use crate::registry::FileVersion;

/// Decode the token found in `slot` of a `kind` record.
///
/// Slots that do not exist at `version` decode as [`FieldValue::Absent`]
/// whatever the token holds. An empty token in a present slot is
/// [`FieldValue::Null`], except for text slots where it is empty text.
///
/// # Errors
///
/// Returns [`MpxError::FieldDecode`] (line 0) when the token does not parse
/// as the slot type.
pub fn decode_field(
    kind: RecordKind,
    version: FileVersion,
    slot: usize,
    token: &str,
    locale: &LocaleProfile,
) -> Result<FieldValue> {
    let spec = field_spec(kind, version, slot);
    if !spec.present {
        return Ok(FieldValue::Absent);
    }
    if token.is_empty() {
        return Ok(match spec.field_type {
            FieldType::Text => FieldValue::Text(String::new()),
            _ => FieldValue::Null,
        });
    }
    FieldValue::parse(token, spec.field_type, locale)
        .ok_or_else(|| MpxError::field_decode(kind, slot, token, 0))
}

/// Encode `value` for `slot` of a `kind` record.
///
/// # Errors
///
/// Returns [`MpxError::FieldTypeMismatch`] when a concrete value does not
/// match the slot type or targets a slot missing at `version`.
pub fn encode_field(
    kind: RecordKind,
    version: FileVersion,
    slot: usize,
    value: &FieldValue,
    locale: &LocaleProfile,
) -> Result<String> {
    check_value(kind, version, slot, value)?;
    Ok(value.format(locale))
}

/// Check that `value` may be stored in `slot`.
pub(crate) fn check_value(
    kind: RecordKind,
    version: FileVersion,
    slot: usize,
    value: &FieldValue,
) -> Result<()> {
    let Some(value_type) = value.field_type() else {
        return Ok(());
    };
    let spec = field_spec(kind, version, slot);
    if !spec.present || spec.field_type != value_type {
        return Err(MpxError::FieldTypeMismatch {
            kind,
            slot,
            expected: spec.field_type,
        });
    }
    Ok(())
}
