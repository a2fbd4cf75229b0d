//! Buffer size constants for streaming column selection.
//!
//! These control memory usage vs I/O throughput. The engine itself only ever
//! holds one chunk plus the carryover of a partial row.

/// Default input chunk size (2 MB).
pub const DEFAULT_CHUNK_SIZE: usize = 2 * 1024 * 1024;

/// Low-memory input chunk size (64 KB).
pub const LOW_MEMORY_CHUNK_SIZE: usize = 64 * 1024;

/// Default output writer buffer (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Low-memory output writer buffer (256 KB).
pub const LOW_MEMORY_OUTPUT_BUFFER: usize = 256 * 1024;

/// Initial carryover capacity (4 KB). Enough for most rows.
pub const DEFAULT_PENDING_CAPACITY: usize = 4 * 1024;

/// Returns the input chunk size for the low_memory flag.
#[inline]
pub const fn chunk_size(low_memory: bool) -> usize {
    if low_memory {
        LOW_MEMORY_CHUNK_SIZE
    } else {
        DEFAULT_CHUNK_SIZE
    }
}

/// Returns the output writer buffer size for the low_memory flag.
#[inline]
pub const fn output_buffer_size(low_memory: bool) -> usize {
    if low_memory {
        LOW_MEMORY_OUTPUT_BUFFER
    } else {
        DEFAULT_OUTPUT_BUFFER
    }
}
