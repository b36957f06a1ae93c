//! Slot layouts of each record kind.
//!
//! A layout lists every slot a record kind has in the newest version, in
//! slot order. Slot positions never move between versions; a slot simply
//! does not exist before the version that introduced it.

use std::fmt;
use std::sync::LazyLock;

use crate::registry::FileVersion;

/// Record kinds that carry typed slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Resource,
    Task,
}

impl RecordKind {
    /// Record type tag leading each line of this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Resource => "50",
            Self::Task => "70",
        }
    }

    /// Record kind for a line tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "50" => Some(Self::Resource),
            "70" => Some(Self::Task),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource => write!(f, "resource"),
            Self::Task => write!(f, "task"),
        }
    }
}

/// Value type expected in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Date,
    Integer,
    Decimal,
    Currency,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Currency => "currency",
        };
        f.write_str(name)
    }
}

/// Numbered user-defined field families (`Text1`, `Date7`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomField {
    Text,
    Number,
    Cost,
    Date,
}

impl CustomField {
    /// Type of every slot in this family.
    #[must_use]
    pub const fn field_type(self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::Number => FieldType::Decimal,
            Self::Cost => FieldType::Currency,
            Self::Date => FieldType::Date,
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Cost => "Cost",
            Self::Date => "Date",
        }
    }
}

/// Name of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Standard(&'static str),
    /// Custom field family and 1-based ordinal.
    Custom(CustomField, u8),
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(name) => f.write_str(name),
            Self::Custom(family, n) => write!(f, "{}{n}", family.prefix()),
        }
    }
}

/// One slot of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: FieldName,
    pub field_type: FieldType,
    /// First version that has this slot.
    pub since: FileVersion,
}

/// Presence and type of a slot at a given version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub present: bool,
    pub field_type: FieldType,
}

static TASK_FIELDS: LazyLock<Vec<FieldDef>> = LazyLock::new(|| {
    let mut fields = vec![
        standard("ID", FieldType::Integer),
        standard("Name", FieldType::Text),
        standard("Unique ID", FieldType::Integer),
        standard("Start", FieldType::Date),
        standard("Finish", FieldType::Date),
        standard("Cost", FieldType::Currency),
        standard("Percent Complete", FieldType::Decimal),
    ];
    push_custom(
        &mut fields,
        CustomField::Text,
        &[(5, FileVersion::V1_0), (10, FileVersion::V3_0)],
    );
    push_custom(&mut fields, CustomField::Number, &[(5, FileVersion::V3_0)]);
    push_custom(&mut fields, CustomField::Cost, &[(3, FileVersion::V3_0)]);
    push_custom(
        &mut fields,
        CustomField::Date,
        &[(5, FileVersion::V3_0), (10, FileVersion::V4_0)],
    );
    fields
});

static RESOURCE_FIELDS: LazyLock<Vec<FieldDef>> = LazyLock::new(|| {
    let mut fields = vec![
        standard("ID", FieldType::Integer),
        standard("Name", FieldType::Text),
        standard("Unique ID", FieldType::Integer),
        standard("Standard Rate", FieldType::Currency),
        standard("Max Units", FieldType::Decimal),
        standard("Cost", FieldType::Currency),
    ];
    push_custom(&mut fields, CustomField::Text, &[(5, FileVersion::V1_0)]);
    push_custom(&mut fields, CustomField::Number, &[(5, FileVersion::V3_0)]);
    push_custom(&mut fields, CustomField::Date, &[(5, FileVersion::V4_0)]);
    fields
});

fn standard(name: &'static str, field_type: FieldType) -> FieldDef {
    FieldDef {
        name: FieldName::Standard(name),
        field_type,
        since: FileVersion::V1_0,
    }
}

/// Append a custom family. Each tier gives the highest ordinal introduced by
/// a version.
fn push_custom(fields: &mut Vec<FieldDef>, family: CustomField, tiers: &[(u8, FileVersion)]) {
    let mut n = 1;
    for &(upto, since) in tiers {
        while n <= upto {
            fields.push(FieldDef {
                name: FieldName::Custom(family, n),
                field_type: family.field_type(),
                since,
            });
            n += 1;
        }
    }
}

/// Full layout of a record kind.
#[must_use]
pub fn fields(kind: RecordKind) -> &'static [FieldDef] {
    match kind {
        RecordKind::Resource => &RESOURCE_FIELDS,
        RecordKind::Task => &TASK_FIELDS,
    }
}

/// Presence and type of `slot` for `kind` at `version`.
///
/// Slots past the end of the layout are never present and read as text.
#[must_use]
pub fn field_spec(kind: RecordKind, version: FileVersion, slot: usize) -> FieldSpec {
    match fields(kind).get(slot) {
        Some(def) => FieldSpec {
            present: def.since <= version,
            field_type: def.field_type,
        },
        None => FieldSpec {
            present: false,
            field_type: FieldType::Text,
        },
    }
}

/// Slot holding `name`, if the layout has one.
#[must_use]
pub fn slot_of(kind: RecordKind, name: FieldName) -> Option<usize> {
    fields(kind).iter().position(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_dates_present(version: FileVersion) -> usize {
        (1..=10)
            .filter_map(|n| slot_of(RecordKind::Task, FieldName::Custom(CustomField::Date, n)))
            .filter(|&slot| field_spec(RecordKind::Task, version, slot).present)
            .count()
    }

    #[test]
    fn test_task_custom_dates_by_version() {
        assert_eq!(custom_dates_present(FileVersion::V4_0), 10);
        assert_eq!(custom_dates_present(FileVersion::V3_0), 5);
        assert_eq!(custom_dates_present(FileVersion::V1_0), 0);
    }

    #[test]
    fn test_field_spec_types() {
        let slot = slot_of(RecordKind::Task, FieldName::Custom(CustomField::Date, 3)).unwrap();
        let spec = field_spec(RecordKind::Task, FileVersion::V4_0, slot);
        assert!(spec.present);
        assert_eq!(spec.field_type, FieldType::Date);

        let name = slot_of(RecordKind::Task, FieldName::Standard("Name")).unwrap();
        assert_eq!(name, 1);
        assert_eq!(
            field_spec(RecordKind::Task, FileVersion::V1_0, name).field_type,
            FieldType::Text
        );
    }

    #[test]
    fn test_field_spec_past_layout() {
        let spec = field_spec(RecordKind::Resource, FileVersion::V4_0, 500);
        assert!(!spec.present);
    }

    #[test]
    fn test_layout_names_are_unique() {
        for kind in [RecordKind::Task, RecordKind::Resource] {
            let layout = fields(kind);
            for (idx, def) in layout.iter().enumerate() {
                assert_eq!(slot_of(kind, def.name), Some(idx), "{kind} {}", def.name);
            }
        }
    }

    #[test]
    fn test_field_name_display() {
        assert_eq!(FieldName::Custom(CustomField::Date, 7).to_string(), "Date7");
        assert_eq!(FieldName::Standard("Unique ID").to_string(), "Unique ID");
    }

    #[test]
    fn test_record_kind_tags() {
        for kind in [RecordKind::Task, RecordKind::Resource] {
            assert_eq!(RecordKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(RecordKind::from_tag("0"), None);
    }
}
