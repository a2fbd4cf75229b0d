//! Column selection sets and header-name resolution.
//!
//! A selection is either a list of positional indexes or a list of header
//! names. Either way it ends up as a [`ColumnIndexSet`]: sorted ascending with
//! duplicates removed. Output columns always follow that ascending order, no
//! matter the order the caller listed them in.

use crate::error::{Result, SelectError};
use crate::streaming::parsing::cells;
use rustc_hash::FxHashMap;

/// Ascending, duplicate-free, non-empty set of column indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndexSet {
    indexes: Vec<usize>,
}

impl ColumnIndexSet {
    /// Build a set from caller-supplied indexes, sorting and de-duplicating.
    ///
    /// Fails with `InvalidConfiguration` when no index is given.
    pub fn new(mut indexes: Vec<usize>) -> Result<Self> {
        if indexes.is_empty() {
            return Err(SelectError::InvalidConfiguration(
                "column index list is empty".to_string(),
            ));
        }
        indexes.sort_unstable();
        indexes.dedup();
        Ok(Self { indexes })
    }

    /// Largest selected index. Scanning a row never needs to go past it.
    #[inline]
    pub fn max_index(&self) -> usize {
        // Non-empty by construction.
        self.indexes[self.indexes.len() - 1]
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.indexes
    }
}

/// How columns are chosen: by position or by header name.
///
/// `ByName` is turned into a [`ColumnIndexSet`] once the header row has been
/// read; after that both modes behave identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    ByIndex(ColumnIndexSet),
    ByName(Vec<String>),
}

/// Resolves wanted column names against a header row.
pub struct HeaderResolver;

impl HeaderResolver {
    /// Map `wanted` names to the positions of their first occurrence in `header`.
    ///
    /// `header` is the raw first row without its row delimiter. Names are
    /// compared byte for byte. Names that are absent are skipped; if none is
    /// found the result is `NoMatchingColumns`.
    pub fn resolve(header: &[u8], wanted: &[String]) -> Result<ColumnIndexSet> {
        let mut first_seen: FxHashMap<&[u8], usize> = FxHashMap::default();
        for (index, cell) in cells(header).enumerate() {
            first_seen.entry(cell).or_insert(index);
        }

        let mut indexes = Vec::with_capacity(wanted.len());
        for name in wanted {
            match first_seen.get(name.as_bytes()) {
                Some(&index) => indexes.push(index),
                None => tracing::warn!(column = %name, "column name not found in header"),
            }
        }

        if indexes.is_empty() {
            return Err(SelectError::NoMatchingColumns {
                wanted: wanted.to_vec(),
            });
        }

        let columns = ColumnIndexSet::new(indexes)?;
        tracing::debug!(columns = ?columns.as_slice(), "resolved header names");
        Ok(columns)
    }
}
