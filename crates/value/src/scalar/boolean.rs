//! Boolean scalar helpers
//!
//! Booleans order `false < true`. Their hashes are fixed at the historical
//! boxed-boolean hash codes so external systems that persisted them keep
//! matching.

use core::cmp::Ordering;

/// Hash of `true`
pub const TRUE_HASH: i32 = 1231;

/// Hash of `false`
pub const FALSE_HASH: i32 = 1237;

/// Hash of a boolean
#[inline]
pub const fn hash_boolean(value: bool) -> i32 {
    if value { TRUE_HASH } else { FALSE_HASH }
}

/// Compare two booleans, `false` first
#[inline]
pub fn compare_booleans(a: bool, b: bool) -> Ordering {
    a.cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_hashes() {
        assert_eq!(hash_boolean(true), 1231);
        assert_eq!(hash_boolean(false), 1237);
    }

    #[test]
    fn test_true_after_false() {
        assert_eq!(compare_booleans(true, false), Ordering::Greater);
        assert_eq!(compare_booleans(false, false), Ordering::Equal);
    }
}
