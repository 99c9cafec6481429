//! Master-pattern detection.
//!
//! A master pattern (a "magic number") is a digit string of two or more
//! identical symbols: `11`, `222`, `AA`. The rule does not depend on the base,
//! but the repeated symbol must belong to the digit alphabet.

use crate::alphabet;

/// Returns true if `s` has more than one symbol, all symbols are equal and
/// the symbol is in the alphabet.
///
/// # Example
///
/// ```
/// use basex_engine::pattern::is_master_pattern;
///
/// assert!(is_master_pattern("11"));
/// assert!(is_master_pattern("AA"));
/// assert!(!is_master_pattern("121"));
/// assert!(!is_master_pattern("1"));
/// assert!(!is_master_pattern("!!"));
/// ```
#[must_use]
pub fn is_master_pattern(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if alphabet::position(first).is_none() {
        return false;
    }
    let mut rest = chars.peekable();
    rest.peek().is_some() && rest.all(|c| c == first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_patterns() {
        assert!(is_master_pattern("11"));
        assert!(is_master_pattern("222"));
        assert!(is_master_pattern("AA"));
        assert!(is_master_pattern("££"));
        assert!(is_master_pattern("0000"));
    }

    #[test]
    fn test_not_master_patterns() {
        assert!(!is_master_pattern(""));
        assert!(!is_master_pattern("1"));
        assert!(!is_master_pattern("121"));
        assert!(!is_master_pattern("10"));
        assert!(!is_master_pattern("AAB"));
    }

    #[test]
    fn test_repeats_outside_alphabet() {
        assert!(!is_master_pattern("!!"));
        assert!(!is_master_pattern("  "));
        assert!(!is_master_pattern("€€€"));
    }
}
