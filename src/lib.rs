//! # sfpc-rs
//!
//! A *simple floating point compressor*: a lossy, variable-length encoding for
//! individual `f64` values with a fractional accuracy of 10^-9.
//!
//! ## Overview
//!
//! Sensor metrics (SCADA systems and the like) are often fixed point decimals
//! that end up being processed as doubles. A value such as 0.2 cannot be stored
//! exactly in a double anyway, and most of its 8 bytes are noise. Scaling it by
//! 10 and storing the integer 2 as a varint keeps the value to within 10^-9
//! using two bytes instead of eight.
//!
//! Every record starts with a prefix byte:
//!
//! 1. **Embedded integers**: natural numbers between -113 and 127 are the prefix
//!    itself (1 byte).
//! 2. **Scaled integers**: larger integers, and decimals with up to four
//!    fractional digits, are a prefix plus an unsigned varint of `|v| * 10^k`.
//! 3. **Special values**: +Inf, -Inf and NaN are a bare prefix.
//! 4. **Float32**: values an `f32` reproduces within tolerance (5 bytes).
//! 5. **Float64**: everything else is stored losslessly (9 bytes).
//!
//! ## Quick Start
//!
//! ```rust
//! use sfpc_rs::{get_float, put_float, MAX_LEN};
//!
//! let mut buf = [0u8; MAX_LEN];
//!
//! let n = put_float(&mut buf, 128.0);
//! assert_eq!(n, 3);
//!
//! let (v, read) = get_float(&buf);
//! assert_eq!(v, 128.0);
//! assert_eq!(read, n);
//! ```
//!
//! ## Accuracy
//!
//! | Input | Decoded |
//! |-------|---------|
//! | finite `v` | within 10^-9 (absolute below 1, relative above) |
//! | NaN | NaN |
//! | ±Inf | the same infinity |
//!
//! ## Trusted and Untrusted Input
//!
//! [`get_float`] trusts its input: the prefix decides how many bytes are read,
//! and a short buffer panics on the slice index. [`try_get_float`] and
//! [`try_put_float`] check lengths first and return [`SfpcError`] instead.
//! Records carry their own length, so concatenated records can be walked with
//! [`record_len`] without separators.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod error;
pub mod precision;
pub mod tag;
pub mod varint;

#[cfg(feature = "decimal")]
mod decimal_interop;

pub use codec::{
    encoded_len, get_float, put_float, record_len, try_get_float, try_put_float, MAX_LEN,
};
pub use error::SfpcError;
pub use tag::{Prefix, Tag};

#[cfg(feature = "decimal")]
pub use decimal_interop::{get_decimal, put_decimal};

/// Convenience type alias for Results with SfpcError.
pub type Result<T> = std::result::Result<T, SfpcError>;
