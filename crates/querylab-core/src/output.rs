//! Label file output.
//!
//! Writes one `<prefix><category> <query>` line per record, the format the
//! fastText supervised trainer reads. The file is treated as a single-column
//! delimited file: any delimiter, quote or escape character inside a line is
//! prefixed with the escape character rather than splitting the line.

use std::io::{self, Write};

use crate::config::LabelingConfig;
use crate::types::QueryRecord;

/// Quote character of the CSV dialect; escaped since quoting is disabled.
const QUOTE: char = '"';

/// A writer that emits labeled training lines.
pub struct LabelWriter<W: Write> {
    writer: W,
    label_prefix: String,
    delimiter: char,
    escape: char,
    lines_written: usize,
}

impl<W: Write> LabelWriter<W> {
    /// Create a new label writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The underlying writer (file, stdout, etc.)
    /// * `label_prefix` - Prepended to each category id, e.g. `__label__`
    /// * `delimiter` - Field delimiter that must be escaped inside a line
    /// * `escape` - Escape character
    pub fn new(writer: W, label_prefix: impl Into<String>, delimiter: char, escape: char) -> Self {
        Self {
            writer,
            label_prefix: label_prefix.into(),
            delimiter,
            escape,
            lines_written: 0,
        }
    }

    /// Create a label writer from the labeling configuration.
    pub fn from_config(writer: W, config: &LabelingConfig) -> Self {
        Self::new(writer, &config.label_prefix, config.delimiter, config.escape)
    }

    /// Format a single line (without the trailing newline).
    pub fn format_line(&self, category_id: &str, query: &str) -> String {
        let raw = format!("{}{} {}", self.label_prefix, category_id, query);
        let mut line = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c == self.delimiter || c == self.escape || c == QUOTE {
                line.push(self.escape);
            }
            line.push(c);
        }
        line
    }

    /// Write one labeled line.
    pub fn write_line(&mut self, category_id: &str, query: &str) -> io::Result<()> {
        let line = self.format_line(category_id, query);
        writeln!(self.writer, "{line}")?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write every record using its rolled-up category and normalized query.
    pub fn write_records(&mut self, records: &[QueryRecord]) -> io::Result<()> {
        for record in records {
            self.write_line(&record.current_category_id, &record.normalized_query)?;
        }
        Ok(())
    }

    /// Get the number of lines written.
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
