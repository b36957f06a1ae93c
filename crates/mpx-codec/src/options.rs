//! Reader and writer options.

use crate::locale::DEFAULT_LOCALE;
use crate::registry::{CodePage, FileVersion};

/// Options for reading MPX files.
#[derive(Debug, Clone)]
pub struct MpxReaderOptions {
    /// Locale supplying the default header values and the date, number and
    /// currency patterns (default: `"en"`).
    pub locale: String,
}

impl Default for MpxReaderOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl MpxReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Options for writing MPX files.
///
/// Unset values come from the locale profile.
#[derive(Debug, Clone)]
pub struct MpxWriterOptions {
    /// Locale (default: `"en"`).
    pub locale: String,
    /// File version (default: 4.0).
    pub file_version: FileVersion,
    pub program_name: Option<String>,
    pub code_page: Option<CodePage>,
    pub delimiter: Option<char>,
}

impl Default for MpxWriterOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            file_version: FileVersion::default(),
            program_name: None,
            code_page: None,
            delimiter: None,
        }
    }
}

impl MpxWriterOptions {
    /// Create writer options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the file version.
    #[must_use]
    pub fn with_version(mut self, version: FileVersion) -> Self {
        self.file_version = version;
        self
    }

    /// Set the program name.
    #[must_use]
    pub fn with_program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    /// Set the code page.
    #[must_use]
    pub fn with_code_page(mut self, code_page: CodePage) -> Self {
        self.code_page = Some(code_page);
        self
    }

    /// Set the delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}
