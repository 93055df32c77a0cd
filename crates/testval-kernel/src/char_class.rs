//! Character classes: fixed sets of bytes.
//!
//! A class is a 256-bit membership table. It answers one question, "is this
//! byte in the set?", and nothing more.

use std::fmt;

use crate::error::ValidatorError;

/// An immutable set of single-byte characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharClass {
    bits: [u64; 4],
}

impl CharClass {
    /// `0-9`
    pub const DIGITS: CharClass = CharClass::range(b'0', b'9');
    /// `a-z`
    pub const LOWERCASE: CharClass = CharClass::range(b'a', b'z');
    /// `A-Z`
    pub const UPPERCASE: CharClass = CharClass::range(b'A', b'Z');
    /// `a-zA-Z`
    pub const LETTERS: CharClass = CharClass::LOWERCASE.union(CharClass::UPPERCASE);
    /// `a-zA-Z0-9`
    pub const ALPHANUMERIC: CharClass = CharClass::LETTERS.union(CharClass::DIGITS);

    /// The empty class.
    pub const fn empty() -> Self {
        Self { bits: [0; 4] }
    }

    /// Every byte from `lo` to `hi`, inclusive. Empty when `lo > hi`.
    pub const fn range(lo: u8, hi: u8) -> Self {
        let mut class = Self::empty();
        let mut b = lo as usize;
        while b <= hi as usize {
            class.bits[b / 64] |= 1 << (b % 64);
            b += 1;
        }
        class
    }

    /// Exactly the given bytes.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut class = Self::empty();
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i] as usize;
            class.bits[b / 64] |= 1 << (b % 64);
            i += 1;
        }
        class
    }

    /// Bytes in either class.
    pub const fn union(self, other: CharClass) -> Self {
        Self {
            bits: [
                self.bits[0] | other.bits[0],
                self.bits[1] | other.bits[1],
                self.bits[2] | other.bits[2],
                self.bits[3] | other.bits[3],
            ],
        }
    }

    /// Parse a compact class description such as `a-z0-9_`.
    ///
    /// Single bytes stand for themselves and `x-y` is an inclusive range. A
    /// `-` at the very start or end is literal. No escapes, no negation.
    pub fn parse(pattern: &str) -> Result<Self, ValidatorError> {
        let bytes = pattern.as_bytes();
        let mut class = Self::empty();
        let mut i = 0;
        while i < bytes.len() {
            let lo = bytes[i];
            if i + 2 < bytes.len() && bytes[i + 1] == b'-' {
                let hi = bytes[i + 2];
                if lo > hi {
                    return Err(ValidatorError::InvalidArgument(format!(
                        "character class range {}-{} is reversed",
                        lo as char, hi as char
                    )));
                }
                class = class.union(Self::range(lo, hi));
                i += 3;
            } else {
                class = class.union(Self::from_bytes(&[lo]));
                i += 1;
            }
        }
        Ok(class)
    }

    /// Membership test.
    pub const fn contains(&self, byte: u8) -> bool {
        let b = byte as usize;
        self.bits[b / 64] & (1 << (b % 64)) != 0
    }

    /// Number of bytes in the class.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == [0; 4]
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&b| self.contains(b))
    }
}

impl Default for CharClass {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharClass(")?;
        for b in self.iter() {
            write!(f, "{}", std::ascii::escape_default(b))?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_inclusive() {
        let class = CharClass::range(b'a', b'c');
        assert!(class.contains(b'a'));
        assert!(class.contains(b'c'));
        assert!(!class.contains(b'd'));
        assert_eq!(class.len(), 3);
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(CharClass::range(b'z', b'a').is_empty());
    }

    #[test]
    fn full_byte_range_fits() {
        let all = CharClass::range(0, u8::MAX);
        assert_eq!(all.len(), 256);
        assert!(all.contains(0xff));
    }

    #[test]
    fn predefined_classes() {
        assert_eq!(CharClass::DIGITS.len(), 10);
        assert_eq!(CharClass::LETTERS.len(), 52);
        assert_eq!(CharClass::ALPHANUMERIC.len(), 62);
        assert!(CharClass::ALPHANUMERIC.contains(b'Q'));
        assert!(!CharClass::ALPHANUMERIC.contains(b'_'));
    }

    #[test]
    fn parse_ranges_and_literals() {
        let class = CharClass::parse("a-c_X").unwrap();
        assert_eq!(class, CharClass::from_bytes(b"abc_X"));
    }

    #[test]
    fn parse_dash_at_edges_is_literal() {
        let class = CharClass::parse("-a").unwrap();
        assert_eq!(class, CharClass::from_bytes(b"-a"));
        let class = CharClass::parse("a-").unwrap();
        assert_eq!(class, CharClass::from_bytes(b"a-"));
    }

    #[test]
    fn parse_rejects_reversed_range() {
        assert!(matches!(
            CharClass::parse("z-a"),
            Err(ValidatorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn debug_lists_members() {
        assert_eq!(format!("{:?}", CharClass::from_bytes(b".#")), "CharClass(#.)");
    }
}
