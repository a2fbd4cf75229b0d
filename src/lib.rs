//! tabsel: streaming column selection for tab-separated data
//!
//! Picks columns out of a tab-delimited, newline-terminated byte stream by
//! position or by header name, without ever holding more than one chunk and
//! one partial row in memory.
//!
//! # Features
//!
//! - **Chunk-size independent**: rows and cells split across chunk
//!   boundaries are reassembled, so output never depends on how input arrives
//! - **Row preserving**: every input row, including blank lines, yields
//!   exactly one output row
//! - **Zero-copy scanning**: memchr over borrowed slices
//!
//! Selected columns are always emitted in ascending index order.
//!
//! # Example
//!
//! ```rust
//! use tabsel::ColumnSelectionEngine;
//!
//! let mut engine = ColumnSelectionEngine::with_names(["age"]).unwrap();
//! let mut out = engine.process(b"name\tage\nAda\t30\n").unwrap();
//! out.extend(engine.flush().unwrap());
//! assert_eq!(out, b"age\n30\n");
//! ```

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod selection;
pub mod streaming;

// Re-export commonly used types
pub use config::SelectorOptions;
pub use engine::{ColumnSelectionEngine, SelectStats};
pub use error::{Result, SelectError};
pub use selection::{ColumnIndexSet, HeaderResolver, Selection};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{HeadersCommand, SelectCommand};
    pub use crate::config::SelectorOptions;
    pub use crate::engine::{ColumnSelectionEngine, SelectStats};
    pub use crate::error::{Result, SelectError};
    pub use crate::selection::{ColumnIndexSet, HeaderResolver, Selection};
}
