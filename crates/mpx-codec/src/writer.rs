//! MPX file writer.
//!
//! The header record may be adjusted until the header line is written.
//! The header line goes out before the first record at the latest; after
//! that the header is frozen and drives the encoding of every record.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{MpxError, Result};
use crate::fields::layout;
use crate::header::HeaderRecord;
use crate::locale;
use crate::options::MpxWriterOptions;
use crate::reader::BASELINE_CODE_PAGE;
use crate::record::{MpxDocument, TypedRecord};
use crate::tokenizer;

/// Line terminator written after every record.
const LINE_END: &[u8] = b"\r\n";

/// MPX file writer.
pub struct MpxWriter<W: Write> {
    writer: BufWriter<W>,
    header: HeaderRecord,
    header_written: bool,
    records_written: usize,
}

impl<W: Write> MpxWriter<W> {
    /// Create a writer with default options.
    pub fn new(writer: W) -> Result<Self> {
        Self::with_options(writer, MpxWriterOptions::default())
    }

    /// Create a writer with options.
    ///
    /// # Errors
    ///
    /// Fails when the locale is unsupported or the delimiter is invalid or
    /// conflicts with the locale's decimal separator.
    pub fn with_options(writer: W, options: MpxWriterOptions) -> Result<Self> {
        let mut header = HeaderRecord::new(locale::resolve(&options.locale)?);
        header.set_file_version(options.file_version)?;
        if let Some(program_name) = options.program_name {
            header.set_program_name(program_name)?;
        }
        if let Some(code_page) = options.code_page {
            header.set_code_page(code_page)?;
        }
        if let Some(delimiter) = options.delimiter {
            header.set_delimiter(delimiter)?;
        }
        Ok(Self::with_header(writer, header))
    }

    /// Create a writer for an existing header, such as one read from
    /// another file.
    pub fn with_header(writer: W, header: HeaderRecord) -> Self {
        Self {
            writer: BufWriter::new(writer),
            header,
            header_written: false,
            records_written: 0,
        }
    }

    pub fn header(&self) -> &HeaderRecord {
        &self.header
    }

    /// Header record for changes before the header line is written.
    pub fn header_mut(&mut self) -> &mut HeaderRecord {
        &mut self.header
    }

    /// Write the header line and freeze the header. Does nothing when the
    /// header line is already written.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, or when the program name holds a line break or
    /// text the baseline code page cannot encode.
    pub fn write_header(&mut self) -> Result<()> {
        if self.header_written {
            return Ok(());
        }
        if has_line_break(self.header.program_name()) {
            return Err(MpxError::LineBreakInText {
                field: "program name".to_string(),
            });
        }
        let bytes = BASELINE_CODE_PAGE.encode(&self.header.to_line())?;
        self.writer.write_all(&bytes)?;
        self.writer.write_all(LINE_END)?;
        self.header.freeze();
        self.header_written = true;

        debug!(
            program = %self.header.program_name(),
            version = %self.header.file_version(),
            code_page = %self.header.code_page(),
            delimiter = ?self.header.delimiter(),
            "wrote header record"
        );
        Ok(())
    }

    /// Write one record, writing the header line first if needed.
    ///
    /// # Errors
    ///
    /// Fails when a value does not fit its slot at the file version, when
    /// text holds a line break or cannot be encoded in the file code page,
    /// or on I/O errors. Nothing is written on failure.
    pub fn write_record(&mut self, record: &TypedRecord) -> Result<()> {
        self.write_header()?;
        let format = self.header.format();

        let encoded = record.encode(&format)?;
        if let Some(slot) = encoded.iter().position(|token| has_line_break(token)) {
            let field = layout::fields(record.kind())
                .get(slot)
                .map_or_else(|| format!("slot {slot}"), |def| def.name.to_string());
            return Err(MpxError::LineBreakInText {
                field: format!("{} {field}", record.kind()),
            });
        }
        let mut tokens = vec![record.kind().tag().to_string()];
        tokens.extend(encoded);
        let line = tokenizer::join(&tokens, format.delimiter);
        let bytes = format.code_page.encode(&line)?;

        self.writer.write_all(&bytes)?;
        self.writer.write_all(LINE_END)?;
        self.records_written += 1;
        trace!(kind = %record.kind(), tokens = tokens.len(), "wrote record");
        Ok(())
    }

    /// Write every record of a slice.
    ///
    /// # Errors
    ///
    /// Stops at the first record that fails.
    pub fn write_records(&mut self, records: &[TypedRecord]) -> Result<()> {
        records
            .iter()
            .try_for_each(|record| self.write_record(record))
    }

    /// Write the header line if nothing was written yet, flush and return
    /// the inner writer.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors.
    pub fn finish(mut self) -> Result<W> {
        self.write_header()?;
        debug!(records = self.records_written, "finished MPX file");
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\r', '\n'])
}

impl MpxWriter<File> {
    /// Create an MPX file for writing.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        Self::create_with_options(path, MpxWriterOptions::default())
    }

    /// Create an MPX file with options.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be created or the options are invalid.
    pub fn create_with_options(path: &Path, options: MpxWriterOptions) -> Result<Self> {
        let file = File::create(path)?;
        Self::with_options(file, options)
    }
}

/// Write a document to an MPX file using the document's header.
///
/// # Errors
///
/// Fails when the file cannot be created or a record cannot be written.
pub fn write_mpx(path: &Path, document: &MpxDocument) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = MpxWriter::with_header(file, document.header.clone());
    writer.write_records(&document.records)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::RecordKind;
    use crate::registry::{CodePage, FileVersion};

    fn written(writer: MpxWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_default_header_line() {
        let writer = MpxWriter::new(Vec::new()).unwrap();
        assert_eq!(
            written(writer),
            "MPX,Microsoft Project for Windows,4.0,ANSI\r\n"
        );
    }

    #[test]
    fn test_header_is_frozen_after_write() {
        let mut writer = MpxWriter::new(Vec::new()).unwrap();
        writer.header_mut().set_program_name("Planner").unwrap();
        writer.write_header().unwrap();
        assert!(matches!(
            writer.header_mut().set_delimiter(';'),
            Err(MpxError::FrozenHeader { .. })
        ));
        assert_eq!(written(writer), "MPX,Planner,4.0,ANSI\r\n");
    }

    #[test]
    fn test_record_uses_header_delimiter() {
        let options = MpxWriterOptions::new().with_delimiter('|');
        let mut writer = MpxWriter::with_options(Vec::new(), options).unwrap();
        let mut record = TypedRecord::new(RecordKind::Task, FileVersion::V4_0);
        record.set(0, 1_i64).unwrap();
        record.set(1, "Design | Build").unwrap();
        writer.write_record(&record).unwrap();
        assert_eq!(
            written(writer),
            "MPX|Microsoft Project for Windows|4.0|ANSI\r\n70|1|\"Design | Build\"\r\n"
        );
    }

    #[test]
    fn test_options_conflicting_delimiter() {
        let options = MpxWriterOptions::new().with_locale("de").with_delimiter(',');
        assert!(matches!(
            MpxWriter::with_options(Vec::new(), options),
            Err(MpxError::DelimiterConflict { .. })
        ));
    }

    #[test]
    fn test_unencodable_record_text() {
        let options = MpxWriterOptions::new().with_code_page(CodePage::Us);
        let mut writer = MpxWriter::with_options(Vec::new(), options).unwrap();
        let mut record = TypedRecord::new(RecordKind::Resource, FileVersion::V4_0);
        record.set(1, "Øystein").unwrap();
        assert!(matches!(
            writer.write_record(&record),
            Err(MpxError::UnencodableText {
                code_page: CodePage::Us
            })
        ));
    }

    #[test]
    fn test_line_breaks_are_rejected() {
        let mut writer = MpxWriter::new(Vec::new()).unwrap();
        let mut record = TypedRecord::new(RecordKind::Task, FileVersion::V4_0);
        record.set(1, "first\r\nsecond").unwrap();
        match writer.write_record(&record) {
            Err(MpxError::LineBreakInText { field }) => assert_eq!(field, "task Name"),
            other => panic!("expected line break error, got {other:?}"),
        }
        assert_eq!(
            written(writer),
            "MPX,Microsoft Project for Windows,4.0,ANSI\r\n"
        );

        let mut writer = MpxWriter::new(Vec::new()).unwrap();
        writer.header_mut().set_program_name("Plan\nner").unwrap();
        assert!(matches!(
            writer.write_header(),
            Err(MpxError::LineBreakInText { .. })
        ));
    }
}
