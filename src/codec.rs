//! Variable-length encoding and decoding of single `f64` values.
//!
//! ## Record Format
//!
//! A record is one prefix byte followed by 0 to 8 payload bytes:
//! - Embedded integer (-113..=127): prefix only
//! - Scaled integer: prefix + varuint of `|v| * 10^k`, k in 0..=4
//! - +Inf, -Inf, NaN: prefix only
//! - Float32: prefix + 4 bytes little-endian
//! - Float64: prefix + 8 bytes little-endian
//!
//! The encoder tries these in order of increasing size and takes the first
//! one that reproduces the value within [`EPSILON`](crate::precision::EPSILON).
//! The order is part of the format: changing it changes which record a given
//! value produces.

use tracing::debug;

use crate::error::SfpcError;
use crate::precision::{
    in_integer_range, is_near_integer, round_magnitude, scale_factor, EPSILON,
    MAX_EXACT_INTEGER,
};
use crate::tag::{Payload, Prefix, Tag, MAX_SCALE};
use crate::varint::{put_uvarint, try_uvarint, uvarint, uvarint_len};

/// Maximum length of an encoded record.
pub const MAX_LEN: usize = 9;

/// Maximum varuint payload inside a record.
const MAX_VARUINT_PAYLOAD: usize = MAX_LEN - 1;

/// Encode `v` into the start of `dst` and return the number of bytes written.
///
/// Every value has an encoding, so this never fails. Natural numbers between
/// -113 and 127 take a single byte, larger ones and decimals with up to four
/// fractional digits take a prefix plus a varuint, and everything else falls
/// back to an `f32` or the full `f64`.
///
/// # Panics
/// Panics if `dst` is shorter than the record. A buffer of [`MAX_LEN`] bytes
/// always suffices; use [`try_put_float`] for smaller buffers.
///
/// # Example
/// ```
/// use sfpc_rs::{get_float, put_float, MAX_LEN};
///
/// let mut buf = [0u8; MAX_LEN];
/// assert_eq!(put_float(&mut buf, 0.2), 2);
///
/// let (v, n) = get_float(&buf);
/// assert_eq!(n, 2);
/// assert!((v - 0.2).abs() < 1e-9);
/// ```
pub fn put_float(dst: &mut [u8], v: f64) -> usize {
    if in_integer_range(v) {
        if is_near_integer(v) {
            if let Some(prefix) = Prefix::embed(v.round() as i64) {
                dst[0] = prefix.to_byte();
                return 1;
            }
            if let Some(n) = put_scaled(dst, v < 0.0, 0, round_magnitude(v)) {
                return n;
            }
        } else if let Some(n) = put_fraction(dst, v) {
            return n;
        }
    }

    if v == f64::INFINITY {
        dst[0] = Tag::PositiveInfinity.to_byte();
        return 1;
    }

    if v == f64::NEG_INFINITY {
        dst[0] = Tag::NegativeInfinity.to_byte();
        return 1;
    }

    if v.is_nan() {
        dst[0] = Tag::NotANumber.to_byte();
        return 1;
    }

    // Absolute bound: a large value must not lose its fraction to the f32.
    let narrowed = v as f32;
    if (v - narrowed as f64).abs() < EPSILON {
        dst[0] = Tag::Float32.to_byte();
        dst[1..5].copy_from_slice(&narrowed.to_le_bytes());
        return 5;
    }

    dst[0] = Tag::Float64.to_byte();
    dst[1..9].copy_from_slice(&v.to_le_bytes());
    MAX_LEN
}

/// Try scale steps 1..=4 on a non-integral value.
///
/// Stops at the first step whose product is integral, or as soon as the
/// product leaves the range where doubles hold every integer exactly.
#[inline]
fn put_fraction(dst: &mut [u8], v: f64) -> Option<usize> {
    for power in 1..=MAX_SCALE {
        let scaled = v * scale_factor(power);
        if scaled.abs() >= MAX_EXACT_INTEGER {
            return None;
        }
        if is_near_integer(scaled) {
            return put_scaled(dst, v < 0.0, power, round_magnitude(scaled));
        }
    }
    None
}

/// Write a scale tag and its varuint, unless the varuint would not fit.
#[inline]
fn put_scaled(dst: &mut [u8], negative: bool, power: u8, magnitude: u64) -> Option<usize> {
    if uvarint_len(magnitude) > MAX_VARUINT_PAYLOAD {
        return None;
    }
    let tag = Tag::scaled(negative, power)?;
    let n = put_uvarint(&mut dst[1..], magnitude);
    dst[0] = tag.to_byte();
    Some(n + 1)
}

/// Decode the record at the start of `src`, returning the value and the number
/// of bytes read.
///
/// The input is trusted: the prefix alone decides how many bytes are read and
/// nothing is validated. Use [`try_get_float`] for untrusted input.
///
/// # Panics
/// Panics if `src` is shorter than the record its prefix announces.
pub fn get_float(src: &[u8]) -> (f64, usize) {
    let tag = match Prefix::from_byte(src[0]) {
        Prefix::Embedded(v) => return (v as f64, 1),
        Prefix::Tag(tag) => tag,
    };

    if let Some((negative, power)) = tag.scale() {
        let (magnitude, n) = uvarint(&src[1..]);
        let mut v = magnitude as f64;
        if negative {
            v = -v;
        }
        return (v / scale_factor(power), n + 1);
    }

    match tag {
        Tag::PositiveInfinity => (f64::INFINITY, 1),
        Tag::NegativeInfinity => (f64::NEG_INFINITY, 1),
        Tag::NotANumber => (f64::NAN, 1),
        Tag::Float32 => {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&src[1..5]);
            (f32::from_le_bytes(bytes) as f64, 5)
        }
        _ => {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&src[1..9]);
            (f64::from_le_bytes(bytes), MAX_LEN)
        }
    }
}

/// Number of bytes [`put_float`] writes for `v`.
pub fn encoded_len(v: f64) -> usize {
    let mut scratch = [0u8; MAX_LEN];
    put_float(&mut scratch, v)
}

/// Encode `v` into `dst`, failing instead of panicking when `dst` is too short.
pub fn try_put_float(dst: &mut [u8], v: f64) -> crate::Result<usize> {
    if dst.len() >= MAX_LEN {
        return Ok(put_float(dst, v));
    }

    let mut scratch = [0u8; MAX_LEN];
    let n = put_float(&mut scratch, v);
    if n > dst.len() {
        let err = SfpcError::BufferTooSmall {
            needed: n,
            available: dst.len(),
        };
        debug!(value = v, error = %err, "rejected float encode");
        return Err(err);
    }
    dst[..n].copy_from_slice(&scratch[..n]);
    Ok(n)
}

/// Length of the record at the start of `src`, without decoding its value.
///
/// Records carry their own length, so this can walk a buffer of concatenated
/// records.
pub fn record_len(src: &[u8]) -> crate::Result<usize> {
    let first = *src.first().ok_or(SfpcError::Truncated {
        needed: 1,
        available: 0,
    })?;

    let tag = match Prefix::from_byte(first) {
        Prefix::Embedded(_) => return Ok(1),
        Prefix::Tag(tag) => tag,
    };

    match tag.payload() {
        Payload::None => Ok(1),
        Payload::Fixed(n) => {
            if src.len() < n + 1 {
                return Err(SfpcError::Truncated {
                    needed: n + 1,
                    available: src.len(),
                });
            }
            Ok(n + 1)
        }
        Payload::Varuint => match try_uvarint(&src[1..], MAX_VARUINT_PAYLOAD) {
            Ok((_, n)) => Ok(n + 1),
            Err(SfpcError::Truncated { needed, available }) => Err(SfpcError::Truncated {
                needed: needed + 1,
                available: available + 1,
            }),
            Err(err) => Err(err),
        },
    }
}

/// Decode the record at the start of `src`, validating its length first.
pub fn try_get_float(src: &[u8]) -> crate::Result<(f64, usize)> {
    match record_len(src) {
        Ok(n) => Ok(get_float(&src[..n])),
        Err(err) => {
            debug!(available = src.len(), error = %err, "rejected float record");
            Err(err)
        }
    }
}
