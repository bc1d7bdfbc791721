//! Unsigned varint (protobuf/LEB128) primitives.
//!
//! Seven value bits per byte, least significant group first, with the most
//! significant bit of each byte set while more bytes follow.

use crate::error::SfpcError;

/// Maximum encoded length of a `u64`.
pub const MAX_VARUINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const VALUE_MASK: u8 = 0x7f;

/// Number of bytes [`put_uvarint`] writes for `v`.
#[inline]
pub fn uvarint_len(v: u64) -> usize {
    let bits = 64 - (v | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Write `v` at the start of `dst` and return the number of bytes written.
///
/// # Panics
/// Panics if `dst` is shorter than [`uvarint_len`] of `v`.
#[inline]
pub fn put_uvarint(dst: &mut [u8], mut v: u64) -> usize {
    let mut i = 0;
    while v >= CONTINUATION as u64 {
        dst[i] = (v as u8 & VALUE_MASK) | CONTINUATION;
        v >>= 7;
        i += 1;
    }
    dst[i] = v as u8;
    i + 1
}

/// Read a varuint from the start of `src`, returning the value and its length.
///
/// Input is trusted: no overflow detection is done and bits past the 64th
/// are dropped.
///
/// # Panics
/// Panics if `src` ends before the terminating byte.
#[inline]
pub fn uvarint(src: &[u8]) -> (u64, usize) {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut i = 0;
    loop {
        let b = src[i];
        i += 1;
        result |= ((b & VALUE_MASK) as u64).checked_shl(shift).unwrap_or(0);
        if b & CONTINUATION == 0 {
            return (result, i);
        }
        shift += 7;
    }
}

/// Read a varuint of at most `max_len` bytes from the start of `src`.
///
/// Fails with [`SfpcError::Truncated`] if `src` ends before the terminating
/// byte, and with [`SfpcError::VarintOverflow`] if no terminator appears within
/// `max_len` bytes or the value does not fit a `u64`.
pub fn try_uvarint(src: &[u8], max_len: usize) -> Result<(u64, usize), SfpcError> {
    let max_len = max_len.min(MAX_VARUINT_LEN);
    let mut result = 0u64;
    let mut shift = 0u32;
    for i in 0..max_len {
        let b = *src.get(i).ok_or(SfpcError::Truncated {
            needed: i + 1,
            available: src.len(),
        })?;
        if i == MAX_VARUINT_LEN - 1 && b > 1 {
            return Err(SfpcError::VarintOverflow);
        }
        result |= ((b & VALUE_MASK) as u64) << shift;
        if b & CONTINUATION == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }
    Err(SfpcError::VarintOverflow)
}
