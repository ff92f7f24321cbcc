//! Construction limits
//!
//! Bounds applied when values are built from untrusted input: the
//! `*_with_limits` factories and the binary reader consult them before
//! allocating.

use crate::error::{ValueError, ValueResult};

/// Configurable limits for value construction
///
/// # Example
///
/// ```
/// use strata_value::ValueLimits;
///
/// let limits = ValueLimits::default();
/// assert_eq!(limits.max_array_length, 1_000_000);
///
/// let strict = ValueLimits::strict();
/// assert_eq!(strict.max_array_length, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueLimits {
    /// Maximum number of elements in an array
    pub max_array_length: usize,

    /// Maximum text length in UTF-8 bytes
    pub max_string_bytes: usize,

    /// Maximum number of points in a polygon or shapes in a collection
    pub max_shape_points: usize,
}

impl Default for ValueLimits {
    fn default() -> Self {
        Self {
            max_array_length: 1_000_000,
            max_string_bytes: 10_000_000,
            max_shape_points: 100_000,
        }
    }
}

impl ValueLimits {
    /// Permissive limits for trusted environments
    pub const fn permissive() -> Self {
        Self {
            max_array_length: 10_000_000,
            max_string_bytes: 100_000_000,
            max_shape_points: 1_000_000,
        }
    }

    /// Strict limits for untrusted input
    pub const fn strict() -> Self {
        Self {
            max_array_length: 10_000,
            max_string_bytes: 1_000_000,
            max_shape_points: 10_000,
        }
    }

    /// No limits
    pub const fn unlimited() -> Self {
        Self {
            max_array_length: usize::MAX,
            max_string_bytes: usize::MAX,
            max_shape_points: usize::MAX,
        }
    }

    /// Validate array length
    #[inline]
    pub fn check_array_length(&self, len: usize) -> ValueResult<()> {
        check("Array length", len, self.max_array_length)
    }

    /// Validate text byte length
    #[inline]
    pub fn check_string_bytes(&self, bytes: usize) -> ValueResult<()> {
        check("Text byte length", bytes, self.max_string_bytes)
    }

    /// Validate the number of points in a shape
    #[inline]
    pub fn check_shape_points(&self, points: usize) -> ValueResult<()> {
        check("Shape point count", points, self.max_shape_points)
    }
}

fn check(what: &str, actual: usize, max: usize) -> ValueResult<()> {
    if actual > max {
        Err(ValueError::invalid_argument(format!(
            "{what} {actual} exceeds maximum of {max}"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_ordered() {
        let strict = ValueLimits::strict();
        let default = ValueLimits::default();
        let permissive = ValueLimits::permissive();
        assert!(strict.max_array_length < default.max_array_length);
        assert!(default.max_array_length < permissive.max_array_length);
        assert!(strict.max_string_bytes < permissive.max_string_bytes);
    }

    #[test]
    fn test_checks() {
        let limits = ValueLimits::strict();
        assert!(limits.check_array_length(10_000).is_ok());
        let err = limits.check_array_length(10_001).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("10001"));
        assert!(ValueLimits::unlimited().check_shape_points(usize::MAX).is_ok());
    }
}
