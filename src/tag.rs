//! Prefix byte taxonomy.
//!
//! Every record starts with one prefix byte. Read as an `i8`, the byte falls in
//! one of two disjoint regions:
//!
//! | Bytes | As `i8` | Meaning |
//! |-------|---------|---------|
//! | `0x8F..=0xFF`, `0x00..=0x7F` | -113 ..= 127 | embedded integer, no payload |
//! | `0x80..=0x8E` | -128 ..= -114 | structured [`Tag`] |
//!
//! The structured tags occupy the bottom of the `i8` range so that the
//! embedded region stays contiguous and covers all small natural numbers.

/// Smallest integer stored directly in the prefix byte.
pub const EMBEDDED_MIN: i8 = -113;

/// Largest integer stored directly in the prefix byte.
pub const EMBEDDED_MAX: i8 = i8::MAX;

/// Highest power of ten used by the scale tags.
pub const MAX_SCALE: u8 = 4;

/// Structured prefix tags.
///
/// The discriminants are the wire bytes and are part of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Positive varuint, unscaled.
    PositiveScale0 = 0x80,
    /// Positive varuint divided by 10.
    PositiveScale1 = 0x81,
    /// Positive varuint divided by 100.
    PositiveScale2 = 0x82,
    /// Positive varuint divided by 1 000.
    PositiveScale3 = 0x83,
    /// Positive varuint divided by 10 000.
    PositiveScale4 = 0x84,
    /// Negative varuint, unscaled.
    NegativeScale0 = 0x85,
    /// Negative varuint divided by 10.
    NegativeScale1 = 0x86,
    /// Negative varuint divided by 100.
    NegativeScale2 = 0x87,
    /// Negative varuint divided by 1 000.
    NegativeScale3 = 0x88,
    /// Negative varuint divided by 10 000.
    NegativeScale4 = 0x89,
    /// Positive infinity (+∞).
    PositiveInfinity = 0x8A,
    /// Negative infinity (-∞).
    NegativeInfinity = 0x8B,
    /// Not a Number.
    NotANumber = 0x8C,
    /// Single precision, 4 bytes little-endian.
    Float32 = 0x8D,
    /// Double precision, 8 bytes little-endian.
    Float64 = 0x8E,
}

// The tag block must end right below the embedded region and must not reach
// into it, otherwise a prefix byte could mean two things.
const _: () = assert!(Tag::PositiveScale0 as u8 as i8 == i8::MIN);
const _: () = assert!(Tag::Float64 as u8 as i8 == EMBEDDED_MIN - 1);
const _: () = assert!(Tag::ALL.len() == (EMBEDDED_MIN as i16 - i8::MIN as i16) as usize);

/// Shape of the bytes following a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Nothing follows the prefix.
    None,
    /// A self-terminating varuint follows.
    Varuint,
    /// Exactly this many bytes follow.
    Fixed(usize),
}

impl Tag {
    /// All tags in wire order.
    pub const ALL: [Tag; 15] = [
        Tag::PositiveScale0,
        Tag::PositiveScale1,
        Tag::PositiveScale2,
        Tag::PositiveScale3,
        Tag::PositiveScale4,
        Tag::NegativeScale0,
        Tag::NegativeScale1,
        Tag::NegativeScale2,
        Tag::NegativeScale3,
        Tag::NegativeScale4,
        Tag::PositiveInfinity,
        Tag::NegativeInfinity,
        Tag::NotANumber,
        Tag::Float32,
        Tag::Float64,
    ];

    /// The wire byte of this tag.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Look up the tag for a wire byte, `None` for embedded-region bytes.
    #[inline]
    pub fn from_byte(b: u8) -> Option<Self> {
        let first = Tag::PositiveScale0 as u8;
        if (first..=Tag::Float64 as u8).contains(&b) {
            Some(Self::ALL[(b - first) as usize])
        } else {
            None
        }
    }

    /// Scale tag for the given sign and power of ten.
    ///
    /// Returns `None` if `power` exceeds [`MAX_SCALE`].
    #[inline]
    pub fn scaled(negative: bool, power: u8) -> Option<Self> {
        if power > MAX_SCALE {
            return None;
        }
        let base = if negative {
            Tag::NegativeScale0
        } else {
            Tag::PositiveScale0
        };
        Some(Self::ALL[(base as u8 - Tag::PositiveScale0 as u8 + power) as usize])
    }

    /// Sign and power of ten of a scale tag, `None` for other tags.
    #[inline]
    pub fn scale(self) -> Option<(bool, u8)> {
        let b = self as u8;
        if b <= Tag::PositiveScale4 as u8 {
            Some((false, b - Tag::PositiveScale0 as u8))
        } else if b <= Tag::NegativeScale4 as u8 {
            Some((true, b - Tag::NegativeScale0 as u8))
        } else {
            None
        }
    }

    /// What follows this tag on the wire.
    #[inline]
    pub fn payload(self) -> Payload {
        match self {
            Tag::PositiveInfinity | Tag::NegativeInfinity | Tag::NotANumber => Payload::None,
            Tag::Float32 => Payload::Fixed(4),
            Tag::Float64 => Payload::Fixed(8),
            _ => Payload::Varuint,
        }
    }
}

/// A classified prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// The byte itself is the value.
    Embedded(i8),
    /// The byte selects a payload encoding.
    Tag(Tag),
}

impl Prefix {
    /// Classify a prefix byte. Every byte maps to exactly one variant.
    #[inline]
    pub fn from_byte(b: u8) -> Self {
        let signed = b as i8;
        if signed >= EMBEDDED_MIN {
            return Prefix::Embedded(signed);
        }
        match Tag::from_byte(b) {
            Some(tag) => Prefix::Tag(tag),
            // Unreachable: every byte below the embedded region is a tag.
            None => Prefix::Tag(Tag::Float64),
        }
    }

    /// Embedded prefix for `v`, if it falls in the embedded region.
    #[inline]
    pub fn embed(v: i64) -> Option<Self> {
        if (EMBEDDED_MIN as i64..=EMBEDDED_MAX as i64).contains(&v) {
            Some(Prefix::Embedded(v as i8))
        } else {
            None
        }
    }

    /// The wire byte.
    #[inline]
    pub fn to_byte(self) -> u8 {
        match self {
            Prefix::Embedded(v) => v as u8,
            Prefix::Tag(tag) => tag.to_byte(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_byte_classifies_once() {
        let mut embedded = 0;
        let mut tagged = 0;
        for b in 0..=u8::MAX {
            let prefix = Prefix::from_byte(b);
            assert_eq!(prefix.to_byte(), b, "byte {:#04x} does not round trip", b);
            match prefix {
                Prefix::Embedded(_) => embedded += 1,
                Prefix::Tag(_) => tagged += 1,
            }
        }
        assert_eq!(tagged, Tag::ALL.len());
        assert_eq!(embedded, 256 - Tag::ALL.len());
    }

    #[test]
    fn test_tags_do_not_alias() {
        for (i, a) in Tag::ALL.iter().enumerate() {
            for b in &Tag::ALL[i + 1..] {
                assert_ne!(a.to_byte(), b.to_byte(), "{:?} aliases {:?}", a, b);
            }
            assert_eq!(Tag::from_byte(a.to_byte()), Some(*a));
            assert!((a.to_byte() as i8) < EMBEDDED_MIN);
        }
    }

    #[test]
    fn test_embedded_bounds() {
        assert_eq!(Prefix::embed(0), Some(Prefix::Embedded(0)));
        assert_eq!(Prefix::embed(127), Some(Prefix::Embedded(127)));
        assert_eq!(Prefix::embed(-113), Some(Prefix::Embedded(-113)));
        assert_eq!(Prefix::embed(128), None);
        assert_eq!(Prefix::embed(-114), None);
        assert_eq!(Tag::from_byte(0x8F), None);
        assert_eq!(Tag::from_byte(0x7F), None);
    }

    #[test]
    fn test_scaled_tags() {
        assert_eq!(Tag::scaled(false, 0), Some(Tag::PositiveScale0));
        assert_eq!(Tag::scaled(false, 4), Some(Tag::PositiveScale4));
        assert_eq!(Tag::scaled(true, 1), Some(Tag::NegativeScale1));
        assert_eq!(Tag::scaled(true, 4), Some(Tag::NegativeScale4));
        assert_eq!(Tag::scaled(true, 5), None);

        for negative in [false, true] {
            for power in 0..=MAX_SCALE {
                let tag = Tag::scaled(negative, power).unwrap();
                assert_eq!(tag.scale(), Some((negative, power)));
                assert_eq!(tag.payload(), Payload::Varuint);
            }
        }
        assert_eq!(Tag::Float32.scale(), None);
        assert_eq!(Tag::NotANumber.scale(), None);
    }

    #[test]
    fn test_payload_shapes() {
        assert_eq!(Tag::PositiveInfinity.payload(), Payload::None);
        assert_eq!(Tag::NegativeInfinity.payload(), Payload::None);
        assert_eq!(Tag::NotANumber.payload(), Payload::None);
        assert_eq!(Tag::Float32.payload(), Payload::Fixed(4));
        assert_eq!(Tag::Float64.payload(), Payload::Fixed(8));
    }
}
