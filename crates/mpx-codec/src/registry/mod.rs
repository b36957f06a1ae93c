//! Closed registries for the code page and version tokens of the header
//! record. Lookups never fall back to a default.

mod code_page;
mod version;

pub use code_page::{CodePage, code_page_for};
pub use version::{FileVersion, version_for};
