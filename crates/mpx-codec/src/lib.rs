//! MPX project file record codec.
//!
//! This crate reads and writes the line-oriented, delimiter-separated MPX
//! project exchange format.
//!
//! # Features
//!
//! - Quote-aware tokenizer with a configurable delimiter
//! - Locale table supplying delimiter, program name, code page and the date,
//!   number and currency patterns
//! - Code page registry (ANSI, MAC, 850, 437, ZH, RU)
//! - File version registry (1.0, 3.0, 4.0) with versioned field layouts
//! - Header record that configures every record after it and freezes once
//!   in use
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mpx_codec::{RecordKind, read_mpx, write_mpx};
//!
//! // Read an MPX file
//! let document = read_mpx(Path::new("plan.mpx")).unwrap();
//! println!(
//!     "{} {}",
//!     document.header.program_name(),
//!     document.header.file_version()
//! );
//! for task in document.records_of(RecordKind::Task) {
//!     println!("{:?}: {:?}", task.name(), task.custom_date(3));
//! }
//!
//! // Write it back
//! write_mpx(Path::new("plan_out.mpx"), &document).unwrap();
//! ```
//!
//! # Versioned fields
//!
//! A slot the file version does not define reads as absent, which differs
//! from a present slot left empty:
//!
//! ```
//! use mpx_codec::{CustomField, FileVersion, RecordKind, TypedRecord};
//!
//! let record = TypedRecord::new(RecordKind::Task, FileVersion::V3_0);
//! assert!(record.custom(CustomField::Date, 5).is_null());
//! assert!(record.custom(CustomField::Date, 6).is_absent());
//! ```

mod error;
pub mod fields;
pub mod header;
pub mod locale;
mod options;
mod reader;
mod record;
pub mod registry;
pub mod tokenizer;
mod writer;

// Re-export error types
pub use error::{MpxError, Result};

// Re-export core types
pub use fields::{CustomField, FieldName, FieldType, FieldValue, RecordKind};
pub use header::{HeaderRecord, RecordFormat};
pub use locale::LocaleProfile;
pub use options::{MpxReaderOptions, MpxWriterOptions};
pub use record::{MpxDocument, Record, TypedRecord};
pub use registry::{CodePage, FileVersion};

// Re-export reader functionality
pub use reader::{MpxReader, read_mpx, read_mpx_with_options};

// Re-export writer functionality
pub use writer::{MpxWriter, write_mpx};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
