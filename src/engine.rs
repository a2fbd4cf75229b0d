//! Chunked column selection engine.
//!
//! The engine accepts input in arbitrarily sized chunks. Each call scans the
//! carryover from the previous call plus the new chunk, emits every complete
//! row it finds, and keeps the trailing partial row for the next call. The
//! concatenated output of all `process` calls and the final `flush` is the
//! same no matter how the input was split.
//!
//! Memory: O(chunk + widest row).

use crate::config::SelectorOptions;
use crate::error::{Result, SelectError};
use crate::selection::{ColumnIndexSet, HeaderResolver, Selection};
use crate::streaming::buffers::DEFAULT_PENDING_CAPACITY;
use crate::streaming::parsing::{
    cells, complete_rows, complete_rows_end, first_row, COLUMN_DELIMITER, ROW_DELIMITER,
};

#[derive(Debug)]
enum State {
    /// Selection by name; header row not complete yet.
    AwaitingHeader(Vec<String>),
    Selecting(ColumnIndexSet),
    /// Header resolution failed; the stream is dead.
    Failed(Vec<String>),
}

/// Streaming column selector over tab-separated bytes.
///
/// Output columns are always in ascending index order, whatever order the
/// caller asked for them in. Every complete input row yields exactly one
/// output row, so row delimiters are never added or lost.
///
/// # Example
///
/// ```
/// use tabsel::ColumnSelectionEngine;
///
/// let mut engine = ColumnSelectionEngine::with_indexes([2, 0]).unwrap();
/// let mut out = engine.process(b"a\tb\tc\n1\t2").unwrap();
/// out.extend(engine.process(b"\t3\n").unwrap());
/// out.extend(engine.flush().unwrap());
/// assert_eq!(out, b"a\tc\n1\t3\n");
/// ```
#[derive(Debug)]
pub struct ColumnSelectionEngine {
    state: State,
    pending: Vec<u8>,
    /// Leading bytes of `pending` known to hold no row delimiter while the
    /// header is still incomplete.
    header_scanned: usize,
    multiplier: f64,
    stats: SelectStats,
}

impl ColumnSelectionEngine {
    /// Create an engine for an already validated selection.
    pub fn new(selection: Selection, multiplier: f64) -> Result<Self> {
        let multiplier = crate::config::validate_multiplier(multiplier)?;
        let state = match selection {
            Selection::ByIndex(columns) => State::Selecting(columns),
            Selection::ByName(names) if names.is_empty() => {
                return Err(SelectError::MissingSelectionCriteria)
            }
            Selection::ByName(names) => State::AwaitingHeader(names),
        };
        Ok(Self {
            state,
            pending: Vec::with_capacity(DEFAULT_PENDING_CAPACITY),
            header_scanned: 0,
            multiplier,
            stats: SelectStats::default(),
        })
    }

    /// Create an engine from caller options, validating them first.
    pub fn from_options(options: &SelectorOptions) -> Result<Self> {
        let (selection, multiplier) = options.validate()?;
        Self::new(selection, multiplier)
    }

    /// Select by position with the default multiplier.
    pub fn with_indexes<I: IntoIterator<Item = usize>>(indexes: I) -> Result<Self> {
        Self::from_options(&SelectorOptions::new().with_col_indexes(indexes))
    }

    /// Select by header name with the default multiplier.
    pub fn with_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_options(&SelectorOptions::new().with_col_names(names))
    }

    /// Feed the next chunk and return the output for every row it completes.
    pub fn process(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        self.stats.chunks += 1;
        self.stats.bytes_read += chunk.len();

        if self.pending.is_empty() {
            let (out, consumed) = self.step(chunk, false)?;
            self.pending.extend_from_slice(&chunk[consumed..]);
            Ok(out)
        } else {
            let mut buf = std::mem::take(&mut self.pending);
            buf.extend_from_slice(chunk);
            let (out, consumed) = self.step(&buf, false)?;
            buf.drain(..consumed);
            self.pending = buf;
            Ok(out)
        }
    }

    /// Signal end of input and return the output for the final partial row.
    ///
    /// The final row has no row delimiter in the input, so none is added.
    /// Must be called once after the last chunk, even for empty input.
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        let mut buf = std::mem::take(&mut self.pending);
        let (out, _) = self.step(&buf, true)?;
        buf.clear();
        self.pending = buf;
        Ok(out)
    }

    /// True once the column set is known.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Selecting(_))
    }

    /// The resolved column set, if any.
    pub fn columns(&self) -> Option<&ColumnIndexSet> {
        match &self.state {
            State::Selecting(columns) => Some(columns),
            _ => None,
        }
    }

    /// Bytes carried over to the next call.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> &SelectStats {
        &self.stats
    }

    /// Resolve header names if still pending.
    ///
    /// Returns false when more input is needed before anything can be emitted.
    fn ensure_resolved(&mut self, buf: &[u8], is_final: bool) -> Result<bool> {
        let resolved = match &self.state {
            State::Selecting(_) => return Ok(true),
            State::Failed(wanted) => {
                return Err(SelectError::NoMatchingColumns {
                    wanted: wanted.clone(),
                })
            }
            State::AwaitingHeader(names) => {
                let scanned = self.header_scanned.min(buf.len());
                let header = match first_row(&buf[scanned..]) {
                    Some((row, _)) => &buf[..scanned + row.len()],
                    // No input at all: no header, nothing to select.
                    None if is_final && buf.is_empty() => return Ok(false),
                    // Single-row input without a row delimiter.
                    None if is_final => buf,
                    None => {
                        self.header_scanned = buf.len();
                        return Ok(false);
                    }
                };
                HeaderResolver::resolve(header, names)
            }
        };

        match resolved {
            Ok(columns) => {
                self.state = State::Selecting(columns);
                Ok(true)
            }
            Err(SelectError::NoMatchingColumns { wanted }) => {
                self.state = State::Failed(wanted.clone());
                self.pending.clear();
                Err(SelectError::NoMatchingColumns { wanted })
            }
            Err(e) => Err(e),
        }
    }

    /// Emit every complete row of `buf` (and the final partial row when
    /// `is_final`). Returns the output and how many leading bytes of `buf`
    /// were consumed; the rest is carryover.
    fn step(&mut self, buf: &[u8], is_final: bool) -> Result<(Vec<u8>, usize)> {
        if !self.ensure_resolved(buf, is_final)? {
            return Ok((Vec::new(), 0));
        }
        let State::Selecting(columns) = &self.state else {
            return Ok((Vec::new(), 0));
        };

        let rows_end = complete_rows_end(buf);
        let mut out = Vec::with_capacity(output_capacity(buf.len(), self.multiplier));

        for row in complete_rows(&buf[..rows_end]) {
            write_selected(row, columns, &mut out);
            out.push(ROW_DELIMITER);
            self.stats.rows += 1;
        }

        let mut consumed = rows_end;
        if is_final && rows_end < buf.len() {
            write_selected(&buf[rows_end..], columns, &mut out);
            self.stats.rows += 1;
            consumed = buf.len();
        }

        self.stats.bytes_written += out.len();
        tracing::trace!(
            input = buf.len(),
            output = out.len(),
            carryover = buf.len() - consumed,
            "processed step"
        );
        Ok((out, consumed))
    }
}

/// Pre-allocation size for one step's output.
///
/// The multiplier is only a hint: selection never grows a row, so the hint
/// is capped at twice the input and the buffer grows on demand past that.
#[inline]
fn output_capacity(input_len: usize, multiplier: f64) -> usize {
    let hint = (input_len as f64 * multiplier).ceil();
    hint.min(input_len.saturating_mul(2) as f64) as usize
}

/// Append the selected cells of `row`, tab-separated, to `out`.
///
/// Stops scanning once the largest wanted index has been copied. Wanted
/// indexes past the end of a short row are skipped, not padded.
#[inline]
fn write_selected(row: &[u8], columns: &ColumnIndexSet, out: &mut Vec<u8>) {
    let wanted = columns.as_slice();
    let max_index = columns.max_index();
    let mut next = 0;

    for (index, cell) in cells(row).enumerate() {
        if index != wanted[next] {
            continue;
        }
        if next > 0 {
            out.push(COLUMN_DELIMITER);
        }
        out.extend_from_slice(cell);
        if index == max_index {
            break;
        }
        next += 1;
    }
}

/// Running statistics for one engine.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectStats {
    pub chunks: usize,
    pub rows: usize,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

impl SelectStats {
    /// Output size as a fraction of input size.
    pub fn output_ratio(&self) -> f64 {
        if self.bytes_read == 0 {
            0.0
        } else {
            self.bytes_written as f64 / self.bytes_read as f64
        }
    }
}

impl std::fmt::Display for SelectStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {}, Rows: {}, Read: {} bytes, Written: {} bytes, Ratio: {:.2}",
            self.chunks,
            self.rows,
            self.bytes_read,
            self.bytes_written,
            self.output_ratio()
        )
    }
}
