//! Buffered output for selected rows.
//!
//! Uses itoa for integer formatting to avoid allocation in the hot path.

use crate::error::Result;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use crate::streaming::parsing::{COLUMN_DELIMITER, ROW_DELIMITER};
use std::io::{BufWriter, Write};

/// Large-buffer writer for tab-separated output.
pub struct TsvWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    bytes_written: usize,
}

impl<W: Write> TsvWriter<W> {
    /// Create a new TsvWriter with the default 2MB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            bytes_written: 0,
        }
    }

    /// Write raw bytes, e.g. one engine step's output.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.bytes_written += bytes.len();
        Ok(())
    }

    #[inline]
    pub fn write_tab(&mut self) -> Result<()> {
        self.write_bytes(&[COLUMN_DELIMITER])
    }

    #[inline]
    pub fn write_newline(&mut self) -> Result<()> {
        self.write_bytes(&[ROW_DELIMITER])
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<()> {
        let formatted = self.itoa_buf.format(n);
        self.writer.write_all(formatted.as_bytes())?;
        self.bytes_written += formatted.len();
        Ok(())
    }

    /// Total bytes handed to the writer so far.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
