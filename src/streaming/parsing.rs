//! Zero-allocation row and cell scanning.
//!
//! Rows and cells are never copied out of the working buffer; they are
//! borrowed slices found with memchr.

use memchr::{memchr, memchr_iter, memrchr};

/// Separates cells within a row.
pub const COLUMN_DELIMITER: u8 = b'\t';

/// Terminates a row.
pub const ROW_DELIMITER: u8 = b'\n';

/// Iterator over the cells of a single row.
///
/// The row must not contain its row delimiter. A row without any column
/// delimiter is one cell, and an empty row is one empty cell.
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    row: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> Iterator for Cells<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<&'a [u8]> {
        if self.done {
            return None;
        }
        let rest = &self.row[self.pos..];
        match memchr(COLUMN_DELIMITER, rest) {
            Some(tab) => {
                self.pos += tab + 1;
                Some(&rest[..tab])
            }
            None => {
                self.done = true;
                Some(rest)
            }
        }
    }
}

/// Split a row into cells on the column delimiter.
#[inline]
pub fn cells(row: &[u8]) -> Cells<'_> {
    Cells {
        row,
        pos: 0,
        done: false,
    }
}

/// Split off the first complete row of `buf`.
///
/// Returns the row (without delimiter) and the offset just past its
/// delimiter, or None if no row delimiter has arrived yet.
#[inline]
pub fn first_row(buf: &[u8]) -> Option<(&[u8], usize)> {
    let end = memchr(ROW_DELIMITER, buf)?;
    Some((&buf[..end], end + 1))
}

/// Offset just past the last row delimiter in `buf`, or 0 if there is none.
///
/// Everything before this offset is complete rows; everything after is
/// carryover.
#[inline]
pub fn complete_rows_end(buf: &[u8]) -> usize {
    memrchr(ROW_DELIMITER, buf).map_or(0, |pos| pos + 1)
}

/// Iterator over complete rows in `buf`, each without its delimiter.
///
/// Bytes after the last row delimiter are not yielded.
pub fn complete_rows(buf: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    let mut start = 0;
    memchr_iter(ROW_DELIMITER, buf).map(move |end| {
        let row = &buf[start..end];
        start = end + 1;
        row
    })
}
