//! Value hashing
//!
//! Two hashes are exposed for every value:
//!
//! - [`Value::hash_code`], a 32-bit hash for in-memory maps
//! - [`Value::hash64`], a 64-bit streaming hash built with [`ValueHasher`]
//!   and stable across processes, suitable for persisted fingerprints
//!
//! Both agree with [`Value::equals`]: `3_i32`, `3_i64` and `3.0_f64` hash the
//! same, as do a `char` and the one-code-point text holding it.
//!
//! [`HashableValue`] makes a value usable as a `HashMap` key. Its equality is
//! the total order's, so NaN equals NaN there.

use core::cmp::Ordering;
use std::hash::{Hash, Hasher};

use xxhash_rust::xxh64::Xxh64;

use crate::core::compare::ValueComparator;
use crate::core::group::ValueGroup;
use crate::core::numbers::{canonical_bits, exact_long, Numeric, HASH_SEED};
use crate::core::value::Value;

const INTEGRAL_MARKER: u8 = 0;
const FLOATING_MARKER: u8 = 1;

/// 64-bit streaming hash over xxh64
///
/// Numbers are normalised before hashing so that equal numbers of different
/// widths produce equal hashes.
#[derive(Clone)]
pub struct ValueHasher {
    state: Xxh64,
}

impl ValueHasher {
    /// Create a hasher with the crate's fixed seed
    pub fn new() -> Self {
        Self::with_seed(HASH_SEED)
    }

    /// Create a hasher with a custom seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: Xxh64::new(seed),
        }
    }

    /// Mix in a group tag
    pub fn update_group(&mut self, group: ValueGroup) {
        self.state.update(&[group.order()]);
    }

    pub fn update_boolean(&mut self, value: bool) {
        self.state.update(&[u8::from(value)]);
    }

    /// Mix in a raw integer, without number normalisation
    pub fn update_long(&mut self, value: i64) {
        self.state.update(&value.to_le_bytes());
    }

    /// Mix in a raw integer, without number normalisation
    pub fn update_int(&mut self, value: i32) {
        self.state.update(&value.to_le_bytes());
    }

    /// Mix in a length
    pub fn update_len(&mut self, len: usize) {
        self.update_long(len as i64);
    }

    /// Mix in a number; integral doubles hash like the equal long
    pub fn update_number(&mut self, number: Numeric) {
        match number {
            Numeric::Integral(l) => self.update_integral(l),
            Numeric::FloatingPoint(d) => match exact_long(d) {
                Some(l) => self.update_integral(l),
                None => {
                    self.state.update(&[FLOATING_MARKER]);
                    self.state.update(&canonical_bits(d).to_le_bytes());
                }
            },
        }
    }

    /// Mix in a double that is not compared numerically against longs
    pub fn update_double(&mut self, value: f64) {
        let bits = if value == 0.0 { 0 } else { canonical_bits(value) };
        self.state.update(&bits.to_le_bytes());
    }

    /// Mix in text by code point
    pub fn update_text(&mut self, text: &str) {
        self.update_code_points(text.chars());
    }

    /// Mix in a single code point, identical to a one-code-point text
    pub fn update_char(&mut self, c: char) {
        self.update_code_points(core::iter::once(c));
    }

    fn update_code_points(&mut self, chars: impl Iterator<Item = char>) {
        let mut count: i64 = 0;
        for c in chars {
            self.state.update(&(c as u32).to_le_bytes());
            count += 1;
        }
        self.update_long(count);
    }

    fn update_integral(&mut self, value: i64) {
        self.state.update(&[INTEGRAL_MARKER]);
        self.state.update(&value.to_le_bytes());
    }

    /// Current hash
    pub fn finish(&self) -> u64 {
        self.state.digest()
    }
}

impl Default for ValueHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ValueHasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValueHasher").field("digest", &self.finish()).finish()
    }
}

impl Hasher for ValueHasher {
    fn finish(&self) -> u64 {
        ValueHasher::finish(self)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }
}

/// Wrapper for Value that can be used as HashMap key
///
/// Equality and ordering follow [`ValueComparator::compare`]: NaN equals NaN
/// and `-0.0` equals `0.0`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use strata_value::{values, HashableValue};
///
/// let mut map = HashMap::new();
/// map.insert(HashableValue::new(values::int_value(42)), "answer");
///
/// assert_eq!(map.get(&HashableValue::new(values::double_value(42.0))), Some(&"answer"));
/// ```
#[derive(Debug, Clone)]
pub struct HashableValue(pub Value);

impl HashableValue {
    /// Create a new hashable value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Get a reference to the inner value
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.0.hash_code());
    }
}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        ValueComparator::compare(&self.0, &other.0) == Ordering::Equal
    }
}

impl Eq for HashableValue {}

impl PartialOrd for HashableValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashableValue {
    fn cmp(&self, other: &Self) -> Ordering {
        ValueComparator::compare(&self.0, &other.0)
    }
}

impl From<Value> for HashableValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
