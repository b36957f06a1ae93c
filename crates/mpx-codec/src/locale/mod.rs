//! Locale-specific formatting.
//!
//! A [`LocaleProfile`] bundles the delimiter, program name, code page and the
//! date/number/currency patterns of one locale. Profiles live in an immutable
//! table built once per process; switching locale means resolving another
//! profile, never editing one.

mod patterns;
mod table;

pub use patterns::{CurrencyPattern, CurrencySymbolPosition, DatePattern, NumberPattern};
pub use table::{DEFAULT_LOCALE, LocaleProfile, LocaleTable, resolve};
