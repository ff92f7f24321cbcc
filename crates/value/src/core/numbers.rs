//! Numeric kernel
//!
//! Cross-representation equality and ordering between integral (`i64`) and
//! floating point (`f64`) numbers, and the hash primitives shared by scalar and
//! array values.
//!
//! A naive `l as f64 == d` check is wrong for longs above 2^53: two distinct
//! longs can round to the same double. Every helper here keeps the comparison
//! exact across the full `i64` / `f64` range.

use core::cmp::Ordering;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// Number of leading array elements that contribute to an array hash
///
/// Arrays longer than this hash their first `MAX_HASHED_ARRAY_LENGTH` element
/// hashes and then fold in the total length once more.
pub const MAX_HASHED_ARRAY_LENGTH: usize = 10_000;

/// Seed of the 64-bit streaming value hash
///
/// Part of the persisted fingerprint format; changing it invalidates every
/// stored hash.
pub const HASH_SEED: u64 = 0x5354_5241_5441_0001;

/// Largest magnitude at which every integer is exactly representable as `f64`
const MAX_EXACT_DOUBLE_INTEGER: u64 = 1 << 53;

/// `2^63` as a double; the first double above the `i64` range
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Powers of 31, `COEFFICIENTS[k] == 31^k` with wrapping `i32` arithmetic
static COEFFICIENTS: Lazy<Box<[i32]>> = Lazy::new(|| {
    tracing::trace!(len = MAX_HASHED_ARRAY_LENGTH + 1, "building array hash coefficient table");
    let mut table = Vec::with_capacity(MAX_HASHED_ARRAY_LENGTH + 1);
    let mut power: i32 = 1;
    for _ in 0..=MAX_HASHED_ARRAY_LENGTH {
        table.push(power);
        power = power.wrapping_mul(31);
    }
    table.into_boxed_slice()
});

// ==================== Scalar hashing ====================

/// Hash of an integral value
#[inline]
pub fn hash_long(value: i64) -> i32 {
    (value ^ ((value as u64) >> 32) as i64) as i32
}

/// Hash of a double
///
/// Doubles holding an exact `i64` hash like that long, so `3.0` and `3`
/// collide on purpose. All NaNs share one hash, and `-0.0` hashes like `0`.
#[inline]
pub fn hash_double(value: f64) -> i32 {
    match exact_long(value) {
        Some(long) => hash_long(long),
        None => hash_long(canonical_bits(value) as i64),
    }
}

/// Bit pattern of a double with every NaN collapsed to the canonical NaN
#[inline]
pub fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// The `i64` a double holds exactly, if any
#[inline]
pub fn exact_long(value: f64) -> Option<i64> {
    if value.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

// ==================== Array hashing ====================

/// Position weighted polynomial hash over element hashes
///
/// Equivalent to `h = 1; for e in elements { h = 31 * h + e }` evaluated as a
/// dot product against the coefficient table.
pub fn hash_array<I>(element_hashes: I) -> i32
where
    I: IntoIterator<Item = i32>,
    I::IntoIter: ExactSizeIterator,
{
    let iter = element_hashes.into_iter();
    let len = iter.len();
    let hashed = len.min(MAX_HASHED_ARRAY_LENGTH);
    let table = &*COEFFICIENTS;

    let mut result = table[hashed];
    for (position, hash) in iter.take(hashed).enumerate() {
        result = result.wrapping_add(table[hashed - 1 - position].wrapping_mul(hash));
    }
    if len > hashed {
        result = result.wrapping_mul(31).wrapping_add(len as i32);
    }
    result
}

/// Hash of a boolean array
pub fn hash_booleans(values: &[bool]) -> i32 {
    hash_array(values.iter().map(|&b| crate::scalar::boolean::hash_boolean(b)))
}

/// Hash of a byte array
pub fn hash_bytes(values: &[i8]) -> i32 {
    hash_array(values.iter().map(|&v| hash_long(i64::from(v))))
}

/// Hash of a short array
pub fn hash_shorts(values: &[i16]) -> i32 {
    hash_array(values.iter().map(|&v| hash_long(i64::from(v))))
}

/// Hash of an int array
pub fn hash_ints(values: &[i32]) -> i32 {
    hash_array(values.iter().map(|&v| hash_long(i64::from(v))))
}

/// Hash of a long array
pub fn hash_longs(values: &[i64]) -> i32 {
    hash_array(values.iter().map(|&v| hash_long(v)))
}

/// Hash of a float array
pub fn hash_floats(values: &[f32]) -> i32 {
    hash_array(values.iter().map(|&v| hash_double(f64::from(v))))
}

/// Hash of a double array
pub fn hash_doubles(values: &[f64]) -> i32 {
    hash_array(values.iter().map(|&v| hash_double(v)))
}

// ==================== Cross-type comparison ====================

/// Exact equality between a double and a long
///
/// Never panics; NaN and infinities are unequal to every long.
pub fn numbers_equal(double: f64, long: i64) -> bool {
    if !double.is_finite() {
        return false;
    }
    if long.unsigned_abs() <= MAX_EXACT_DOUBLE_INTEGER {
        return double == long as f64;
    }
    exact_long(double) == Some(long)
}

/// Total comparison of a double against a long
///
/// NaN sorts above every long, infinities compare by sign. When the long is
/// outside the exact double range both sides are compared as decimals.
pub fn compare_double_against_long(double: f64, long: i64) -> Ordering {
    if double.is_nan() {
        return Ordering::Greater;
    }
    if double.is_infinite() {
        return if double > 0.0 { Ordering::Greater } else { Ordering::Less };
    }
    if long.unsigned_abs() <= MAX_EXACT_DOUBLE_INTEGER {
        return compare_doubles(double, long as f64);
    }
    if double.abs() < MAX_EXACT_DOUBLE_INTEGER as f64 {
        // |double| < 2^53 < |long|: the sign of the long decides
        return if long > 0 { Ordering::Less } else { Ordering::Greater };
    }
    // |double| >= 2^53 so it is integral; exact as a decimal below 2^96
    match Decimal::from_f64_retain(double) {
        Some(wide) => wide.cmp(&Decimal::from(long)),
        None if double > 0.0 => Ordering::Greater,
        None => Ordering::Less,
    }
}

/// Total comparison of a long against a double, the mirror of
/// [`compare_double_against_long`]
#[inline]
pub fn compare_long_against_double(long: i64, double: f64) -> Ordering {
    compare_double_against_long(double, long).reverse()
}

/// Total comparison of two doubles
///
/// NaN is greater than everything and equal to itself; `-0.0 == 0.0`.
pub fn compare_doubles(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            _ => Ordering::Less,
        },
    }
}

// ==================== Numeric view ====================

/// A number seen through its comparison-relevant representation
#[derive(Debug, Clone, Copy)]
pub enum Numeric {
    Integral(i64),
    FloatingPoint(f64),
}

impl Numeric {
    /// Exact numeric equality; NaN is unequal to everything
    pub fn equals(self, other: Self) -> bool {
        match (self, other) {
            (Self::Integral(a), Self::Integral(b)) => a == b,
            (Self::FloatingPoint(a), Self::FloatingPoint(b)) => a == b,
            (Self::FloatingPoint(d), Self::Integral(l)) | (Self::Integral(l), Self::FloatingPoint(d)) => {
                numbers_equal(d, l)
            }
        }
    }

    /// Total order with NaN last
    pub fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Integral(a), Self::Integral(b)) => a.cmp(&b),
            (Self::FloatingPoint(a), Self::FloatingPoint(b)) => compare_doubles(a, b),
            (Self::FloatingPoint(d), Self::Integral(l)) => compare_double_against_long(d, l),
            (Self::Integral(l), Self::FloatingPoint(d)) => compare_long_against_double(l, d),
        }
    }

    /// Check if this is a NaN
    pub fn is_nan(self) -> bool {
        matches!(self, Self::FloatingPoint(d) if d.is_nan())
    }

    /// Hash consistent with [`Numeric::equals`]
    pub fn hash_code(self) -> i32 {
        match self {
            Self::Integral(l) => hash_long(l),
            Self::FloatingPoint(d) => hash_double(d),
        }
    }
}
