//! Optional interop with the `decimal-bytes` crate.
//!
//! Enable the `decimal` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sfpc-rs = { version = "0.1", features = ["decimal"] }
//! ```
//!
//! **Important**: decimals pass through `f64` on the way in, so digits beyond
//! what a double holds are lost. On the way out the record's scale decides how
//! many fractional digits the decimal gets: a value stored with scale 10^2
//! comes back as exactly two digits, which removes the float noise again.
//!
//! ```ignore
//! use decimal_bytes::Decimal;
//! use sfpc_rs::{get_decimal, put_decimal, MAX_LEN};
//!
//! let mut buf = [0u8; MAX_LEN];
//! let price: Decimal = "12.24".parse().unwrap();
//! let n = put_decimal(&mut buf, &price).unwrap();
//!
//! let (decoded, read) = get_decimal(&buf[..n]).unwrap();
//! assert_eq!(decoded.to_string(), "12.24");
//! ```

use decimal_bytes::Decimal;

use crate::codec::{try_get_float, try_put_float};
use crate::error::SfpcError;
use crate::tag::{Prefix, Tag};

/// Encode a decimal as a float record, returning the number of bytes written.
///
/// Fails if `dst` cannot hold the record or the decimal does not parse as an
/// `f64`.
pub fn put_decimal(dst: &mut [u8], decimal: &Decimal) -> crate::Result<usize> {
    try_put_float(dst, decimal_to_f64(decimal)?)
}

/// Decode the record at the start of `src` as a decimal.
pub fn get_decimal(src: &[u8]) -> crate::Result<(Decimal, usize)> {
    let (value, n) = try_get_float(src)?;

    if value.is_nan() {
        return Ok((Decimal::nan(), n));
    }
    if value == f64::INFINITY {
        return Ok((Decimal::infinity(), n));
    }
    if value == f64::NEG_INFINITY {
        return Ok((Decimal::neg_infinity(), n));
    }

    let formatted = match fraction_digits(src[0]) {
        Some(digits) => format!("{:.prec$}", value, prec = digits as usize),
        None => format!("{}", value),
    };
    let decimal = formatted
        .parse::<Decimal>()
        .map_err(|e| SfpcError::InvalidDecimal(format!("failed to parse decimal: {}", e)))?;

    Ok((decimal, n))
}

/// Fractional digits implied by a prefix, `None` for raw float records.
fn fraction_digits(prefix: u8) -> Option<u8> {
    match Prefix::from_byte(prefix) {
        Prefix::Embedded(_) => Some(0),
        Prefix::Tag(tag) => match tag.scale() {
            Some((_, power)) => Some(power),
            None if matches!(tag, Tag::Float32 | Tag::Float64) => None,
            None => Some(0),
        },
    }
}

fn decimal_to_f64(decimal: &Decimal) -> crate::Result<f64> {
    if decimal.is_nan() {
        Ok(f64::NAN)
    } else if decimal.is_infinity() {
        if decimal.is_negative() {
            Ok(f64::NEG_INFINITY)
        } else {
            Ok(f64::INFINITY)
        }
    } else {
        let s = decimal.to_string();
        s.parse::<f64>()
            .map_err(|e| SfpcError::InvalidDecimal(format!("{}: {}", s, e)))
    }
}
