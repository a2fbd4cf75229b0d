//! List the header row of a tab-separated stream.
//!
//! Prints one `index<TAB>name` line per header cell, which is the index a
//! caller would pass to select that column by position.

use crate::error::Result;
use crate::streaming::buffers::LOW_MEMORY_CHUNK_SIZE;
use crate::streaming::parsing::first_row;
use crate::streaming::{cells, TsvWriter};
use std::fs::File;
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

/// Header listing command.
#[derive(Debug, Clone, Default)]
pub struct HeadersCommand;

impl HeadersCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn run<P: AsRef<Path>, W: Write>(&self, input_path: P, output: &mut W) -> Result<usize> {
        let file = File::open(input_path.as_ref())?;
        self.run_reader(file, output)
    }

    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<usize> {
        let stdin = io::stdin();
        self.run_reader(stdin.lock(), output)
    }

    /// Read only as far as the first row delimiter and list its cells.
    ///
    /// Returns the number of header cells; empty input has none.
    pub fn run_reader<R: Read, W: Write>(&self, mut reader: R, output: &mut W) -> Result<usize> {
        let mut header = Vec::new();
        let mut buf = vec![0u8; LOW_MEMORY_CHUNK_SIZE];
        let mut scanned = 0;

        loop {
            let bytes_read = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            header.extend_from_slice(&buf[..bytes_read]);
            if let Some((row, _)) = first_row(&header[scanned..]) {
                let end = scanned + row.len();
                header.truncate(end);
                return self.write_header(&header, output);
            }
            scanned = header.len();
        }

        if header.is_empty() {
            return Ok(0);
        }
        self.write_header(&header, output)
    }

    fn write_header<W: Write>(&self, header: &[u8], output: &mut W) -> Result<usize> {
        let mut writer = TsvWriter::with_capacity(8 * 1024, output);
        let mut count = 0;
        for (index, name) in cells(header).enumerate() {
            writer.write_int(index)?;
            writer.write_tab()?;
            writer.write_bytes(name)?;
            writer.write_newline()?;
            count += 1;
        }
        writer.flush()?;
        Ok(count)
    }
}
