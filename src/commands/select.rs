//! Streaming column selection over files and pipes.
//!
//! Reads fixed-size chunks, hands each to a [`ColumnSelectionEngine`] and
//! writes whatever it returns. Large files can be memory-mapped instead, in
//! which case the mapping is fed to the engine slice by slice.
//!
//! Memory: O(chunk + widest row)

use crate::config::SelectorOptions;
use crate::engine::{ColumnSelectionEngine, SelectStats};
use crate::error::Result;
use crate::streaming::buffers::{chunk_size, output_buffer_size};
use crate::streaming::TsvWriter;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

/// Column selection command.
#[derive(Debug, Clone)]
pub struct SelectCommand {
    pub options: SelectorOptions,
    /// Bytes read per engine step.
    pub chunk_size: usize,
    /// Use smaller I/O buffers.
    pub low_memory: bool,
}

impl SelectCommand {
    pub fn new(options: SelectorOptions) -> Self {
        Self {
            options,
            chunk_size: chunk_size(false),
            low_memory: false,
        }
    }

    /// Set chunk size. Zero keeps the default for the memory mode.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        if size > 0 {
            self.chunk_size = size;
        }
        self
    }

    pub fn with_low_memory(mut self, low_memory: bool) -> Self {
        if low_memory && self.chunk_size == chunk_size(false) {
            self.chunk_size = chunk_size(true);
        }
        self.low_memory = low_memory;
        self
    }

    /// Run selection on a file.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input_path: P, output: &mut W) -> Result<SelectStats> {
        let file = File::open(input_path.as_ref())?;
        self.run_reader(file, output)
    }

    /// Run selection from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<SelectStats> {
        let stdin = io::stdin();
        self.run_reader(stdin.lock(), output)
    }

    /// Run selection on a memory-mapped file.
    pub fn run_mmap<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<SelectStats> {
        let file = File::open(input_path.as_ref())?;
        if file.metadata()?.len() == 0 {
            // Zero-length files cannot be mapped on every platform.
            return self.run_slices(&[], output);
        }
        // SAFETY: the mapping is read-only and dropped before returning.
        let mmap = unsafe { Mmap::map(&file)? };
        self.run_slices(&mmap, output)
    }

    /// Feed an in-memory buffer to the engine in chunk-size slices.
    pub fn run_slices<W: Write>(&self, data: &[u8], output: &mut W) -> Result<SelectStats> {
        let mut engine = ColumnSelectionEngine::from_options(&self.options)?;
        let mut writer = TsvWriter::with_capacity(output_buffer_size(self.low_memory), output);

        for chunk in data.chunks(self.chunk_size) {
            let selected = engine.process(chunk)?;
            writer.write_bytes(&selected)?;
        }
        self.finish(engine, writer)
    }

    /// Core loop: read a chunk, process it, write the result.
    pub fn run_reader<R: Read, W: Write>(&self, mut reader: R, output: &mut W) -> Result<SelectStats> {
        let mut engine = ColumnSelectionEngine::from_options(&self.options)?;
        let mut writer = TsvWriter::with_capacity(output_buffer_size(self.low_memory), output);
        let mut buf = vec![0u8; self.chunk_size];

        loop {
            let bytes_read = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            let selected = engine.process(&buf[..bytes_read])?;
            writer.write_bytes(&selected)?;
        }
        self.finish(engine, writer)
    }

    fn finish<W: Write>(
        &self,
        mut engine: ColumnSelectionEngine,
        mut writer: TsvWriter<W>,
    ) -> Result<SelectStats> {
        let tail = engine.flush()?;
        writer.write_bytes(&tail)?;
        writer.flush()?;

        let stats = engine.stats().clone();
        tracing::debug!(
            chunks = stats.chunks,
            rows = stats.rows,
            bytes_written = writer.bytes_written(),
            "selection finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectError;

    fn select(cmd: &SelectCommand, input: &[u8]) -> Vec<u8> {
        let mut output = Vec::new();
        cmd.run_reader(input, &mut output).unwrap();
        output
    }

    #[test]
    fn test_select_indexes() {
        let cmd = SelectCommand::new(SelectorOptions::new().with_col_indexes([0, 2]));
        assert_eq!(select(&cmd, b"a\tb\tc\n1\t2\t3\n"), b"a\tc\n1\t3\n");
    }

    #[test]
    fn test_small_chunks_match_default() {
        let input = b"name\tage\tcity\nAda\t30\tLondon\nAlan\t41\n\n";
        let opts = SelectorOptions::new().with_col_names(["city", "name"]);
        let whole = select(&SelectCommand::new(opts.clone()), input);
        for size in [1, 2, 3, 7, 64] {
            let cmd = SelectCommand::new(opts.clone()).with_chunk_size(size);
            assert_eq!(select(&cmd, input), whole, "chunk size {size}");
        }
        assert_eq!(whole, b"name\tcity\nAda\tLondon\nAlan\n\n");
    }

    #[test]
    fn test_run_slices() {
        let cmd = SelectCommand::new(SelectorOptions::new().with_col_indexes([1]))
            .with_chunk_size(3);
        let mut output = Vec::new();
        let stats = cmd.run_slices(b"a\tb\n1\t2", &mut output).unwrap();
        assert_eq!(output, b"b\n2");
        assert_eq!(stats.chunks, 3);
        assert_eq!(stats.rows, 2);
    }

    #[test]
    fn test_stats_from_reader() {
        let cmd = SelectCommand::new(SelectorOptions::new().with_col_indexes([0]));
        let mut output = Vec::new();
        let stats = cmd.run_reader(&b"a\tb\n1\t2\n"[..], &mut output).unwrap();
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.bytes_read, 8);
        assert_eq!(stats.bytes_written, 4);
    }

    #[test]
    fn test_missing_criteria_before_reading() {
        let cmd = SelectCommand::new(SelectorOptions::new());
        let mut output = Vec::new();
        let err = cmd.run_reader(&b"a\tb\n"[..], &mut output).unwrap_err();
        assert!(matches!(err, SelectError::MissingSelectionCriteria));
        assert!(output.is_empty());
    }

    #[test]
    fn test_no_match_propagates() {
        let cmd = SelectCommand::new(SelectorOptions::new().with_col_names(["zzz"]));
        let mut output = Vec::new();
        let err = cmd.run_reader(&b"a\tb\n1\t2\n"[..], &mut output).unwrap_err();
        assert!(matches!(err, SelectError::NoMatchingColumns { .. }));
    }

    #[test]
    fn test_low_memory_chunk_size() {
        let cmd = SelectCommand::new(SelectorOptions::new().with_col_indexes([0]))
            .with_low_memory(true);
        assert_eq!(cmd.chunk_size, chunk_size(true));

        let cmd = SelectCommand::new(SelectorOptions::new().with_col_indexes([0]))
            .with_chunk_size(10)
            .with_low_memory(true);
        assert_eq!(cmd.chunk_size, 10);
    }
}
