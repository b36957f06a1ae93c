//! Header record handling.
//!
//! The header record is the first line of an MPX file. It names the
//! originating program, the file version and the code page, and its
//! signature announces the delimiter used by every later line.
//!
//! # Structure
//!
//! `MPX<d><program name><d><file version><d><code page>`
//!
//! A header line without the `MPX` signature is split on the default
//! delimiter and carries no delimiter of its own.
//!
//! # Lifecycle
//!
//! A [`HeaderRecord`] starts from a locale profile and may be changed until
//! it is frozen. Readers freeze it once the parsed values are applied;
//! writers freeze it when the header line is emitted. Any later change fails
//! with [`MpxError::FrozenHeader`].

use tracing::debug;

use crate::error::{MpxError, Result};
use crate::locale::{self, LocaleProfile};
use crate::registry::{CodePage, FileVersion, code_page_for, version_for};
use crate::tokenizer::{self, DEFAULT_DELIMITER};

/// Signature leading the header line.
pub const SIGNATURE: &str = "MPX";

/// Number of fields in the header record.
const HEADER_FIELDS: usize = 3;

/// Settings every record of a session is encoded with.
///
/// Derived from the [`HeaderRecord`] on demand; the header stays the only
/// owner of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    pub delimiter: char,
    pub code_page: CodePage,
    pub file_version: FileVersion,
    pub locale: &'static LocaleProfile,
}

/// First record of an MPX file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    locale: &'static LocaleProfile,
    delimiter: char,
    program_name: String,
    file_version: FileVersion,
    code_page: CodePage,
    frozen: bool,
}

impl HeaderRecord {
    /// Create a header with the defaults of `locale` and version 4.0.
    pub fn new(locale: &'static LocaleProfile) -> Self {
        Self {
            locale,
            delimiter: locale.delimiter,
            program_name: locale.program_name.to_string(),
            file_version: FileVersion::default(),
            code_page: locale.code_page,
            frozen: false,
        }
    }

    /// Create a header for a locale identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MpxError::UnsupportedLocale`] for unknown identifiers.
    pub fn for_locale(locale: &str) -> Result<Self> {
        Ok(Self::new(locale::resolve(locale)?))
    }

    /// Field delimiter for the rest of the file.
    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Program that created the file.
    #[must_use]
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    #[must_use]
    pub fn file_version(&self) -> FileVersion {
        self.file_version
    }

    #[must_use]
    pub fn code_page(&self) -> CodePage {
        self.code_page
    }

    /// Locale profile supplying the date, number and currency patterns.
    #[must_use]
    pub fn locale(&self) -> &'static LocaleProfile {
        self.locale
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Disallow further changes.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Settings the session applies to every record.
    #[must_use]
    pub fn format(&self) -> RecordFormat {
        RecordFormat {
            delimiter: self.delimiter,
            code_page: self.code_page,
            file_version: self.file_version,
            locale: self.locale,
        }
    }

    /// Set the delimiter.
    ///
    /// # Errors
    ///
    /// Fails when frozen, or when the delimiter is a quote, a line break or
    /// the decimal separator of the current locale.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        self.ensure_open("delimiter")?;
        self.locale.check_delimiter(delimiter)?;
        self.delimiter = delimiter;
        Ok(())
    }

    /// Set the program name.
    ///
    /// # Errors
    ///
    /// Fails when frozen.
    pub fn set_program_name(&mut self, program_name: impl Into<String>) -> Result<()> {
        self.ensure_open("program name")?;
        self.program_name = program_name.into();
        Ok(())
    }

    /// Set the file version.
    ///
    /// # Errors
    ///
    /// Fails when frozen.
    pub fn set_file_version(&mut self, file_version: FileVersion) -> Result<()> {
        self.ensure_open("file version")?;
        self.file_version = file_version;
        Ok(())
    }

    /// Set the code page.
    ///
    /// # Errors
    ///
    /// Fails when frozen.
    pub fn set_code_page(&mut self, code_page: CodePage) -> Result<()> {
        self.ensure_open("code page")?;
        self.code_page = code_page;
        Ok(())
    }

    /// Switch locale, taking delimiter, program name and code page from the
    /// new profile together. Nothing changes when any step fails.
    ///
    /// # Errors
    ///
    /// Fails when frozen or when the locale is not in the table.
    pub fn set_locale(&mut self, locale: &str) -> Result<()> {
        self.ensure_open("locale")?;
        let profile = locale::resolve(locale)?;
        profile.check_delimiter(profile.delimiter)?;

        self.locale = profile;
        self.delimiter = profile.delimiter;
        self.program_name = profile.program_name.to_string();
        self.code_page = profile.code_page;
        Ok(())
    }

    /// Overwrite program name, file version and code page with the fields of
    /// a parsed header line, then freeze.
    ///
    /// # Errors
    ///
    /// Fails when frozen, when the field count is wrong, or when the version
    /// or code page token is unknown. Nothing changes on failure.
    pub fn apply_parsed_values<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        self.ensure_open("program name")?;
        let extra_values = fields
            .iter()
            .skip(HEADER_FIELDS)
            .any(|field| !field.as_ref().is_empty());
        if fields.len() < HEADER_FIELDS || extra_values {
            return Err(MpxError::HeaderFieldCount {
                found: fields.len(),
            });
        }

        let file_version = version_for(fields[1].as_ref())?;
        let code_page = code_page_for(fields[2].as_ref())?;

        self.program_name = fields[0].as_ref().to_string();
        self.file_version = file_version;
        self.code_page = code_page;
        self.frozen = true;

        debug!(
            program = %self.program_name,
            version = %self.file_version,
            code_page = %self.code_page,
            delimiter = ?self.delimiter,
            "applied header record"
        );
        Ok(())
    }

    /// Header line as written to a file.
    #[must_use]
    pub fn to_line(&self) -> String {
        let fields = [
            self.program_name.as_str(),
            self.file_version.as_str(),
            self.code_page.as_str(),
        ];
        format!(
            "{SIGNATURE}{}{}",
            self.delimiter,
            tokenizer::join(&fields, self.delimiter)
        )
    }

    fn ensure_open(&self, field: &'static str) -> Result<()> {
        if self.frozen {
            return Err(MpxError::FrozenHeader { field });
        }
        Ok(())
    }
}

/// Tokens of a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    /// Delimiter announced after the signature, if the line has one.
    pub delimiter: Option<char>,
    pub fields: Vec<String>,
}

/// Split a header line.
///
/// `MPX` followed by a non-alphanumeric character is read as the signature
/// form when the rest of the line holds a valid header on that delimiter. A
/// program name that merely starts with `MPX` (`MPX Planner,4.0,ANSI`) is
/// read with the default delimiter instead.
///
/// # Errors
///
/// Returns [`MpxError::MalformedRecord`] when the line cannot be tokenized.
pub fn parse_header_line(line: &str) -> Result<HeaderLine> {
    let plain = tokenizer::split(line, DEFAULT_DELIMITER);
    let Some((delimiter, rest)) = signature_delimiter(line) else {
        return Ok(HeaderLine {
            delimiter: None,
            fields: plain?,
        });
    };

    let signed = tokenizer::split(rest, delimiter);
    if let Ok(fields) = &signed
        && is_valid_header(fields)
    {
        return Ok(HeaderLine {
            delimiter: Some(delimiter),
            fields: fields.clone(),
        });
    }
    if let Ok(fields) = &plain
        && is_valid_header(fields)
    {
        return Ok(HeaderLine {
            delimiter: None,
            fields: fields.clone(),
        });
    }

    // Neither reading is valid; keep the signature form so the caller reports
    // what is wrong with its fields.
    Ok(HeaderLine {
        delimiter: Some(delimiter),
        fields: signed?,
    })
}

fn signature_delimiter(line: &str) -> Option<(char, &str)> {
    let mut chars = line.strip_prefix(SIGNATURE)?.chars();
    let delimiter = chars.next().filter(|c| !c.is_alphanumeric())?;
    Some((delimiter, chars.as_str()))
}

fn is_valid_header(fields: &[String]) -> bool {
    fields.len() >= HEADER_FIELDS
        && fields[HEADER_FIELDS..].iter().all(String::is_empty)
        && version_for(&fields[1]).is_ok()
        && code_page_for(&fields[2]).is_ok()
}
