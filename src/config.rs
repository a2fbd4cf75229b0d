//! Caller-facing options for a column selection run.
//!
//! Options are validated eagerly: a [`SelectorOptions`] is turned into a
//! [`Selection`] and output multiplier before any data is read.

use crate::error::{Result, SelectError};
use crate::selection::{ColumnIndexSet, Selection};

/// Default pre-allocation factor for each step's output buffer.
pub const DEFAULT_CACHE_BUFFER_MULTIPLIER: f64 = 1.0;

/// Options for a column selection run.
///
/// When both `col_indexes` and `col_names` are set, indexes win and the
/// header row is treated as ordinary data. Empty lists count as unset.
///
/// # Example
///
/// ```
/// use tabsel::config::SelectorOptions;
///
/// let opts = SelectorOptions::new()
///     .with_col_names(["age", "name"])
///     .with_cache_buffer_multiplier(1.5);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOptions {
    /// Select by position (0-based).
    pub col_indexes: Option<Vec<usize>>,
    /// Select by header name; the first row must be the header.
    pub col_names: Option<Vec<String>>,
    /// Output buffer pre-allocation factor, must be >= 1.
    pub cache_buffer_multiplier: f64,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorOptions {
    pub fn new() -> Self {
        Self {
            col_indexes: None,
            col_names: None,
            cache_buffer_multiplier: DEFAULT_CACHE_BUFFER_MULTIPLIER,
        }
    }

    pub fn with_col_indexes<I: IntoIterator<Item = usize>>(mut self, indexes: I) -> Self {
        self.col_indexes = Some(indexes.into_iter().collect());
        self
    }

    pub fn with_col_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.col_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_cache_buffer_multiplier(mut self, multiplier: f64) -> Self {
        self.cache_buffer_multiplier = multiplier;
        self
    }

    /// Check the multiplier and pick the selection mode.
    pub fn validate(&self) -> Result<(Selection, f64)> {
        let multiplier = validate_multiplier(self.cache_buffer_multiplier)?;

        let selection = match (&self.col_indexes, &self.col_names) {
            (Some(indexes), _) if !indexes.is_empty() => {
                Selection::ByIndex(ColumnIndexSet::new(indexes.clone())?)
            }
            (_, Some(names)) if !names.is_empty() => Selection::ByName(names.clone()),
            _ => return Err(SelectError::MissingSelectionCriteria),
        };

        Ok((selection, multiplier))
    }
}

/// Reject multipliers below 1, NaN and infinity.
pub fn validate_multiplier(multiplier: f64) -> Result<f64> {
    if !multiplier.is_finite() || multiplier < 1.0 {
        return Err(SelectError::InvalidConfiguration(format!(
            "cache buffer multiplier must be a finite number >= 1, got {multiplier}"
        )));
    }
    Ok(multiplier)
}

/// Parse a comma-separated index list such as `0,2,5`.
pub fn parse_index_list(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>().map_err(|_| {
                SelectError::InvalidConfiguration(format!("invalid column index '{s}'"))
            })
        })
        .collect()
}
