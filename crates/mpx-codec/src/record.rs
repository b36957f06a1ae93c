//! Data records.
//!
//! A [`Record`] is the raw token view of one line. It is decoded straight
//! into a [`TypedRecord`] and not kept.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::{MpxError, Result};
use crate::fields::{
    self, CustomField, FieldName, FieldValue, RecordKind, decode_field, encode_field, layout,
};
use crate::header::{HeaderRecord, RecordFormat};
use crate::registry::FileVersion;
use crate::tokenizer;

/// Tag of comment lines.
pub const COMMENT_TAG: &str = "0";

/// Raw tokens of one data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the file.
    pub line: usize,
    pub kind: RecordKind,
    /// Field tokens after the record tag.
    pub tokens: Vec<String>,
}

impl Record {
    /// Split a data line.
    ///
    /// Returns `None` for blank lines and comments.
    ///
    /// # Errors
    ///
    /// [`MpxError::MalformedRecord`] when the line does not split and
    /// [`MpxError::UnknownRecordKind`] for an unknown tag.
    pub fn parse(line_number: usize, line: &str, delimiter: char) -> Result<Option<Self>> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let mut tokens = tokenizer::split(line, delimiter).map_err(|e| e.at_line(line_number))?;
        let tag = tokens.remove(0);
        if tag == COMMENT_TAG {
            return Ok(None);
        }
        let kind = RecordKind::from_tag(&tag).ok_or(MpxError::UnknownRecordKind {
            line: line_number,
            tag,
        })?;

        Ok(Some(Self {
            line: line_number,
            kind,
            tokens,
        }))
    }
}

/// Record with every slot decoded for a file version.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRecord {
    kind: RecordKind,
    version: FileVersion,
    line: usize,
    values: Vec<FieldValue>,
}

static ABSENT: FieldValue = FieldValue::Absent;

impl TypedRecord {
    /// Empty record: present slots are null, missing slots absent.
    pub fn new(kind: RecordKind, version: FileVersion) -> Self {
        let values = (0..layout::fields(kind).len())
            .map(|slot| {
                if version.field_spec(kind, slot).present {
                    FieldValue::Null
                } else {
                    FieldValue::Absent
                }
            })
            .collect();
        Self {
            kind,
            version,
            line: 0,
            values,
        }
    }

    /// Decode every slot of a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`MpxError::FieldDecode`] for the first token that does not
    /// parse.
    pub fn decode(record: &Record, format: &RecordFormat) -> Result<Self> {
        let kind = record.kind;
        let version = format.file_version;
        let layout_len = layout::fields(kind).len();

        if record.tokens.len() > layout_len {
            warn!(
                line = record.line,
                kind = %kind,
                extra = record.tokens.len() - layout_len,
                "ignoring tokens past the record layout"
            );
        }

        let values = (0..layout_len)
            .map(|slot| {
                let token = record.tokens.get(slot).map_or("", String::as_str);
                decode_field(kind, version, slot, token, format.locale)
                    .map_err(|e| e.at_line(record.line))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            version,
            line: record.line,
            values,
        })
    }

    /// Tokens for every slot, without the record tag. Trailing empty tokens
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MpxError::FieldTypeMismatch`] if the record was built for
    /// another version than `format` and holds values the format lacks.
    pub fn encode(&self, format: &RecordFormat) -> Result<Vec<String>> {
        let mut tokens = self
            .values
            .iter()
            .enumerate()
            .map(|(slot, value)| {
                encode_field(self.kind, format.file_version, slot, value, format.locale)
            })
            .collect::<Result<Vec<_>>>()?;
        while tokens.last().is_some_and(String::is_empty) {
            tokens.pop();
        }
        Ok(tokens)
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    #[must_use]
    pub fn version(&self) -> FileVersion {
        self.version
    }

    /// Line the record was read from; 0 for records built in memory.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Value of a slot. Slots outside the layout are absent.
    #[must_use]
    pub fn value(&self, slot: usize) -> &FieldValue {
        self.values.get(slot).unwrap_or(&ABSENT)
    }

    /// Text of a slot; `None` unless the slot holds text.
    #[must_use]
    pub fn text(&self, slot: usize) -> Option<&str> {
        self.value(slot).as_text()
    }

    /// Value of a named slot.
    #[must_use]
    pub fn field(&self, name: FieldName) -> &FieldValue {
        match layout::slot_of(self.kind, name) {
            Some(slot) => self.value(slot),
            None => &ABSENT,
        }
    }

    /// Value of custom field `n` (1-based) of a family.
    #[must_use]
    pub fn custom(&self, family: CustomField, n: u8) -> &FieldValue {
        self.field(FieldName::Custom(family, n))
    }

    /// `Name` of the task or resource.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.field(FieldName::Standard("Name")).as_text()
    }

    /// `ID` of the task or resource.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.field(FieldName::Standard("ID")).as_integer()
    }

    /// Custom date `n`; `None` when null or absent.
    #[must_use]
    pub fn custom_date(&self, n: u8) -> Option<NaiveDateTime> {
        self.custom(CustomField::Date, n).as_date()
    }

    /// Custom text `n`; `None` when absent.
    #[must_use]
    pub fn custom_text(&self, n: u8) -> Option<&str> {
        self.custom(CustomField::Text, n).as_text()
    }

    /// Custom number `n`; `None` when null or absent.
    #[must_use]
    pub fn custom_number(&self, n: u8) -> Option<f64> {
        self.custom(CustomField::Number, n).as_f64()
    }

    /// Custom cost `n`; `None` when null or absent.
    #[must_use]
    pub fn custom_cost(&self, n: u8) -> Option<f64> {
        self.custom(CustomField::Cost, n).as_f64()
    }

    /// Store a value in a slot.
    ///
    /// # Errors
    ///
    /// Returns [`MpxError::FieldTypeMismatch`] when the value type differs
    /// from the slot type or the slot is missing at this record's version.
    pub fn set(&mut self, slot: usize, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        fields::check_value(self.kind, self.version, slot, &value)?;
        match self.values.get_mut(slot) {
            Some(current) => {
                // Missing slots stay absent; present slots are never absent.
                let missing = current.is_absent();
                *current = match value {
                    FieldValue::Null | FieldValue::Absent if missing => FieldValue::Absent,
                    FieldValue::Absent => FieldValue::Null,
                    value => value,
                };
                Ok(())
            }
            None => Err(MpxError::FieldTypeMismatch {
                kind: self.kind,
                slot,
                expected: self.version.field_spec(self.kind, slot).field_type,
            }),
        }
    }

    /// Store a value in a named slot.
    ///
    /// # Errors
    ///
    /// As [`TypedRecord::set`]; unknown names fail like out-of-layout slots.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<FieldValue>) -> Result<()> {
        let slot = layout::slot_of(self.kind, name).unwrap_or(usize::MAX);
        self.set(slot, value)
    }

    /// Store custom field `n` of a family.
    ///
    /// # Errors
    ///
    /// As [`TypedRecord::set`].
    pub fn set_custom(
        &mut self,
        family: CustomField,
        n: u8,
        value: impl Into<FieldValue>,
    ) -> Result<()> {
        self.set_field(FieldName::Custom(family, n), value)
    }
}

/// Header and records of a whole file.
#[derive(Debug, Clone)]
pub struct MpxDocument {
    pub header: HeaderRecord,
    pub records: Vec<TypedRecord>,
}

impl MpxDocument {
    /// Empty document with the given header.
    pub fn new(header: HeaderRecord) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    /// Records of one kind, in file order.
    pub fn records_of(&self, kind: RecordKind) -> impl Iterator<Item = &TypedRecord> {
        self.records.iter().filter(move |record| record.kind() == kind)
    }

    /// Task with the given `ID`.
    #[must_use]
    pub fn task_by_id(&self, id: i64) -> Option<&TypedRecord> {
        self.records_of(RecordKind::Task)
            .find(|record| record.id() == Some(id))
    }
}
