//! MPX file reader.
//!
//! The header line is read first with the baseline code page. Its values
//! configure the delimiter, code page and field layout of every line after
//! it. Records are read one line at a time.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{MpxError, Result};
use crate::header::{HeaderRecord, parse_header_line};
use crate::locale;
use crate::options::MpxReaderOptions;
use crate::record::{MpxDocument, Record, TypedRecord};
use crate::registry::CodePage;

/// Code page of the header line.
pub const BASELINE_CODE_PAGE: CodePage = CodePage::Ansi;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// MPX file reader.
pub struct MpxReader<R: Read> {
    reader: BufReader<R>,
    header: HeaderRecord,
    line_number: usize,
    buffer: Vec<u8>,
    failed: bool,
}

impl<R: Read> MpxReader<R> {
    /// Create a reader with default options and read the header line.
    ///
    /// # Errors
    ///
    /// Fails when the header line is missing or invalid.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_options(reader, MpxReaderOptions::default())
    }

    /// Create a reader with options and read the header line.
    ///
    /// # Errors
    ///
    /// Fails when the locale is unsupported or the header line is missing or
    /// invalid.
    pub fn with_options(reader: R, options: MpxReaderOptions) -> Result<Self> {
        let profile = locale::resolve(&options.locale)?;
        let mut session = Self {
            reader: BufReader::new(reader),
            header: HeaderRecord::new(profile),
            line_number: 0,
            buffer: Vec::new(),
            failed: false,
        };
        session.read_header()?;
        Ok(session)
    }

    /// Header record of the file. Frozen for the whole read.
    pub fn header(&self) -> &HeaderRecord {
        &self.header
    }

    /// Number of physical lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next data record, skipping blank lines and comments.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, malformed lines, unknown record tags and tokens
    /// that do not decode.
    pub fn next_record(&mut self) -> Result<Option<TypedRecord>> {
        while self.next_line()? {
            let format = self.header.format();
            let line = format
                .code_page
                .decode(&self.buffer)
                .map_err(|e| e.at_line(self.line_number))?;
            let Some(record) = Record::parse(self.line_number, &line, format.delimiter)? else {
                continue;
            };
            trace!(
                line = record.line,
                kind = %record.kind,
                tokens = record.tokens.len(),
                "read record"
            );
            return TypedRecord::decode(&record, &format).map(Some);
        }
        Ok(None)
    }

    /// Read every remaining record.
    ///
    /// # Errors
    ///
    /// Stops at the first failing record.
    pub fn read_document(mut self) -> Result<MpxDocument> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        debug!(
            records = records.len(),
            lines = self.line_number,
            "read MPX document"
        );
        Ok(MpxDocument {
            header: self.header,
            records,
        })
    }

    fn read_header(&mut self) -> Result<()> {
        if !self.next_line()? {
            return Err(MpxError::MissingHeader);
        }
        let bytes = self
            .buffer
            .strip_prefix(UTF8_BOM)
            .unwrap_or(&self.buffer);
        let line = BASELINE_CODE_PAGE
            .decode(bytes)
            .map_err(|e| e.at_line(self.line_number))?;
        if line.trim().is_empty() {
            return Err(MpxError::MissingHeader);
        }

        let parsed = parse_header_line(&line).map_err(|e| e.at_line(self.line_number))?;
        if let Some(delimiter) = parsed.delimiter
            && delimiter != self.header.delimiter()
        {
            self.header.set_delimiter(delimiter)?;
        }
        self.header.apply_parsed_values(&parsed.fields)
    }

    /// Load the next physical line into the buffer without its line break.
    fn next_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }
        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }
        Ok(true)
    }
}

impl<R: Read> Iterator for MpxReader<R> {
    type Item = Result<TypedRecord>;

    /// Yields records until the input ends or a record fails; the failure is
    /// the last item.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_record().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

impl MpxReader<File> {
    /// Open an MPX file for reading.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be opened or its header is invalid.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, MpxReaderOptions::default())
    }

    /// Open an MPX file with options.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be opened or its header is invalid.
    pub fn open_with_options(path: &Path, options: MpxReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MpxError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                MpxError::Io(e)
            }
        })?;
        debug!(path = %path.display(), locale = %options.locale, "opening MPX file");
        Self::with_options(file, options)
    }
}

/// Read a whole MPX file.
///
/// # Errors
///
/// Fails on the first invalid line.
pub fn read_mpx(path: &Path) -> Result<MpxDocument> {
    MpxReader::open(path)?.read_document()
}

/// Read a whole MPX file with options.
///
/// # Errors
///
/// Fails on the first invalid line.
pub fn read_mpx_with_options(path: &Path, options: MpxReaderOptions) -> Result<MpxDocument> {
    MpxReader::open_with_options(path, options)?.read_document()
}
