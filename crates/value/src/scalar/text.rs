//! Text value
//!
//! This module provides a Text type that:
//! - Guarantees UTF-8 validity
//! - Counts, slices and reverses by Unicode code point, never by byte
//! - Clones cheaply via `Arc<str>`
//! - Interns the empty string: every empty text shares one allocation

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::core::limits::ValueLimits;
use crate::error::{ValueError, ValueResult};

static EMPTY: Lazy<TextValue> = Lazy::new(|| TextValue {
    inner: Arc::from(""),
});

/// UTF-8 text with code point semantics
#[derive(Debug, Clone)]
pub struct TextValue {
    inner: Arc<str>,
}

impl TextValue {
    /// Create a text value, returning the interned instance for `""`
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            return Self::empty();
        }
        Self {
            inner: Arc::from(s.into_boxed_str()),
        }
    }

    /// Create from UTF-8 bytes
    pub fn from_utf8(bytes: &[u8]) -> ValueResult<Self> {
        checked_utf8(bytes).map(Self::from)
    }

    /// Create with length validation
    pub fn with_limits(s: &str, limits: &ValueLimits) -> ValueResult<Self> {
        limits.check_string_bytes(s.len())?;
        Ok(Self::from(s))
    }

    /// The interned empty text
    #[inline]
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Check if two texts share the same allocation
    #[inline]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get the string as &str
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Length in code points
    pub fn length(&self) -> usize {
        self.inner.chars().count()
    }

    /// Byte length of the UTF-8 encoding
    #[inline]
    pub fn utf8_len(&self) -> usize {
        self.inner.len()
    }

    /// Check if this text is exactly the single code point `c`
    pub fn is_char(&self, c: char) -> bool {
        let mut chars = self.inner.chars();
        chars.next() == Some(c) && chars.next().is_none()
    }

    // ==================== Operations ====================

    /// Substring of `length` code points starting at code point `start`
    ///
    /// Ranges past the end are clamped, so asking beyond the text yields the
    /// empty text.
    pub fn substring(&self, start: usize, length: usize) -> Self {
        if self.is_empty() || length == 0 {
            return Self::empty();
        }
        let mut indices = self.inner.char_indices().map(|(i, _)| i);
        let Some(from) = indices.nth(start) else {
            return Self::empty();
        };
        let to = self.inner[from..]
            .char_indices()
            .nth(length)
            .map_or(self.inner.len(), |(i, _)| from + i);
        if from == 0 && to == self.inner.len() {
            return self.clone();
        }
        Self::from(&self.inner[from..to])
    }

    /// Trim whitespace from both ends
    pub fn trim(&self) -> Self {
        self.reuse_or_copy(self.inner.trim())
    }

    /// Trim leading whitespace
    pub fn ltrim(&self) -> Self {
        self.reuse_or_copy(self.inner.trim_start())
    }

    /// Trim trailing whitespace
    pub fn rtrim(&self) -> Self {
        self.reuse_or_copy(self.inner.trim_end())
    }

    /// Reverse by code point
    pub fn reverse(&self) -> Self {
        if self.inner.chars().nth(1).is_none() {
            return self.clone();
        }
        Self::new(self.inner.chars().rev().collect::<String>())
    }

    /// Convert to uppercase
    pub fn to_upper(&self) -> Self {
        Self::new(self.inner.to_uppercase())
    }

    /// Convert to lowercase
    pub fn to_lower(&self) -> Self {
        Self::new(self.inner.to_lowercase())
    }

    /// Split by a delimiter
    ///
    /// An empty delimiter splits into single code points.
    pub fn split(&self, delimiter: &str) -> Vec<Self> {
        if self.is_empty() {
            return vec![Self::empty()];
        }
        if delimiter.is_empty() {
            return self
                .inner
                .chars()
                .map(|c| Self::new(c.to_string()))
                .collect();
        }
        self.inner.split(delimiter).map(Self::from).collect()
    }

    /// Split on any of several delimiters
    pub fn split_any(&self, delimiters: &[&str]) -> Vec<Self> {
        let delimiters: Vec<&str> = delimiters.iter().copied().filter(|d| !d.is_empty()).collect();
        if delimiters.is_empty() {
            return self.split("");
        }

        let mut parts = Vec::new();
        let mut rest = self.as_str();
        loop {
            let next = delimiters
                .iter()
                .filter_map(|d| rest.find(d).map(|at| (at, d.len())))
                .min_by_key(|&(at, _)| at);
            match next {
                Some((at, len)) => {
                    parts.push(Self::from(&rest[..at]));
                    rest = &rest[at + len..];
                }
                None => {
                    parts.push(Self::from(rest));
                    return parts;
                }
            }
        }
    }

    /// Replace all occurrences of a pattern
    pub fn replace(&self, find: &str, replacement: &str) -> Self {
        if find.is_empty() || !self.inner.contains(find) {
            return self.clone();
        }
        Self::new(self.inner.replace(find, replacement))
    }

    /// Concatenate with another text
    pub fn plus(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut s = String::with_capacity(self.utf8_len() + other.utf8_len());
        s.push_str(self.as_str());
        s.push_str(other.as_str());
        Self::new(s)
    }

    /// Check if this text starts with the given pattern
    pub fn starts_with(&self, pattern: &str) -> bool {
        self.inner.starts_with(pattern)
    }

    /// Check if this text ends with the given pattern
    pub fn ends_with(&self, pattern: &str) -> bool {
        self.inner.ends_with(pattern)
    }

    /// Check if this text contains the given pattern
    pub fn contains(&self, pattern: &str) -> bool {
        self.inner.contains(pattern)
    }

    /// Code point lexicographic comparison
    ///
    /// UTF-8 byte order coincides with code point order.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }

    /// Hash over code points, identical for a one-code-point text and the
    /// equivalent `char`
    pub fn hash_code(&self) -> i32 {
        hash_code_points(self.inner.chars())
    }

    fn reuse_or_copy(&self, slice: &str) -> Self {
        if slice.len() == self.inner.len() {
            self.clone()
        } else {
            Self::from(slice)
        }
    }
}

/// Polynomial hash over code points: `h = 1; h = 31 * h + code_point`
pub fn hash_code_points(chars: impl Iterator<Item = char>) -> i32 {
    chars.fold(1_i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32))
}

/// Hash of a single `char`, equal to the hash of the one-code-point text
#[inline]
pub fn hash_char(c: char) -> i32 {
    hash_code_points(core::iter::once(c))
}

/// Compare a `char` against a text by code point
pub fn compare_char_to_text(c: char, text: &TextValue) -> Ordering {
    let mut buf = [0_u8; 4];
    let encoded: &str = c.encode_utf8(&mut buf);
    encoded.cmp(text.as_str())
}

impl PartialEq for TextValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other) || self.inner == other.inner
    }
}

impl Eq for TextValue {}

impl PartialOrd for TextValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

/// Borrow UTF-8 bytes as text, rejecting invalid sequences
pub(crate) fn checked_utf8(bytes: &[u8]) -> ValueResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| ValueError::invalid_argument(format!("Invalid UTF-8 text: {e}")))
}

impl std::hash::Hash for TextValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl AsRef<str> for TextValue {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for TextValue {
    /// Copies the slice, allocating unless empty
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Self::empty();
        }
        Self { inner: Arc::from(s) }
    }
}

impl FromStr for TextValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for TextValue {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
