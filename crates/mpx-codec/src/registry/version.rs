//! MPX file versions.

use std::fmt;
use std::str::FromStr;

use crate::error::{MpxError, Result};
use crate::fields::{FieldSpec, RecordKind, layout};

/// Version of the MPX format written in the header record.
///
/// Versions are totally ordered; a field introduced in one version exists in
/// every later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FileVersion {
    /// MPX 1.0.
    V1_0,
    /// MPX 3.0.
    V3_0,
    /// MPX 4.0 (default).
    #[default]
    V4_0,
}

impl FileVersion {
    /// All supported versions, oldest first.
    pub const ALL: [FileVersion; 3] = [FileVersion::V1_0, FileVersion::V3_0, FileVersion::V4_0];

    /// Token as written in the header record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V3_0 => "3.0",
            Self::V4_0 => "4.0",
        }
    }

    /// Presence and type of a slot of `kind` at this version.
    #[must_use]
    pub fn field_spec(self, kind: RecordKind, slot: usize) -> FieldSpec {
        layout::field_spec(kind, self, slot)
    }

    /// Number of slots of `kind` that exist at this version.
    #[must_use]
    pub fn slot_count(self, kind: RecordKind) -> usize {
        layout::fields(kind)
            .iter()
            .filter(|def| def.since <= self)
            .count()
    }
}

/// Resolves a header token to its file version. Matching is exact.
///
/// # Errors
///
/// Returns [`MpxError::UnknownVersion`] for any other token.
pub fn version_for(token: &str) -> Result<FileVersion> {
    FileVersion::ALL
        .into_iter()
        .find(|version| version.as_str() == token)
        .ok_or_else(|| MpxError::unknown_version(token))
}

impl fmt::Display for FileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileVersion {
    type Err = MpxError;

    fn from_str(s: &str) -> Result<Self> {
        version_for(s)
    }
}
