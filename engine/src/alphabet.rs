//! The fixed digit alphabet and the base bounds derived from it.
//!
//! Every base `B` uses the first `B` symbols of [`ALPHABET`], so digit value
//! `v` is always written with the same symbol regardless of the base.

/// Ordered digit symbols: `0-9`, `A-Z`, then `@ # $ £`.
pub const ALPHABET: [char; 40] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', //
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', //
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', //
    'U', 'V', 'W', 'X', 'Y', 'Z', '@', '#', '$', '£',
];

/// Smallest supported base.
pub const MIN_BASE: u32 = 2;

/// Largest supported base (one digit per alphabet symbol).
pub const MAX_BASE: u32 = ALPHABET.len() as u32;

/// Upper bound of the default active range (`2..=16`).
pub const DEFAULT_MAX_BASE: u32 = 16;

/// The base used as the default reference for cross-base comparisons.
pub const DECIMAL: u32 = 10;

/// Returns the symbol for a digit value, or `None` past the alphabet.
#[inline]
#[must_use]
pub fn symbol(value: u32) -> Option<char> {
    ALPHABET.get(value as usize).copied()
}

/// Returns the alphabet position of a symbol.
///
/// Lowercase ASCII letters resolve to their uppercase position.
#[inline]
#[must_use]
pub fn position(c: char) -> Option<u32> {
    let c = c.to_ascii_uppercase();
    ALPHABET.iter().position(|&s| s == c).map(|p| p as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(MIN_BASE, 2);
        assert_eq!(MAX_BASE, 40);
        assert!(DEFAULT_MAX_BASE <= MAX_BASE);
    }

    #[test]
    fn test_alphabet_is_unique() {
        for (i, a) in ALPHABET.iter().enumerate() {
            for b in &ALPHABET[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_symbol_position_bijection() {
        for v in 0..MAX_BASE {
            let c = symbol(v).unwrap();
            assert_eq!(position(c), Some(v));
        }
        assert_eq!(symbol(MAX_BASE), None);
    }

    #[test]
    fn test_key_symbols() {
        assert_eq!(symbol(9), Some('9'));
        assert_eq!(symbol(10), Some('A'));
        assert_eq!(symbol(35), Some('Z'));
        assert_eq!(symbol(36), Some('@'));
        assert_eq!(symbol(39), Some('£'));
        assert_eq!(position('f'), Some(15));
        assert_eq!(position('!'), None);
    }
}
