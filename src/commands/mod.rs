//! Command implementations for tabsel.

pub mod headers;
pub mod select;

pub use headers::HeadersCommand;
pub use select::SelectCommand;
