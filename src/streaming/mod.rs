//! Shared streaming building blocks.
//!
//! - Zero-allocation row and cell scanning
//! - Buffer size constants
//! - Buffered output writing

pub mod buffers;
pub mod output;
pub mod parsing;

pub use output::TsvWriter;
pub use parsing::{cells, Cells, COLUMN_DELIMITER, ROW_DELIMITER};
