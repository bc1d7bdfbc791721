//! Error types for the checked encode/decode layer.

use thiserror::Error;

/// Errors reported by the checked entry points.
///
/// The core [`put_float`](crate::put_float) and [`get_float`](crate::get_float)
/// never return errors; these are produced only by the `try_*` functions that
/// validate buffer lengths first.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SfpcError {
    /// The destination buffer cannot hold the encoded record.
    #[error("buffer too small: record needs {needed} bytes, only {available} available")]
    BufferTooSmall {
        /// Bytes the record requires.
        needed: usize,
        /// Bytes the buffer provides.
        available: usize,
    },

    /// The input ends before the record its prefix announces.
    #[error("truncated record: needs {needed} bytes, only {available} available")]
    Truncated {
        /// Bytes the record requires (at least).
        needed: usize,
        /// Bytes the input provides.
        available: usize,
    },

    /// A varuint payload is unterminated or longer than a record allows.
    #[error("varuint payload exceeds the maximum record length")]
    VarintOverflow,

    /// Conversion between a decimal and a float failed.
    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),
}
