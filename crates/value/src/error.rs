//! Value Error Types
//!
//! Every fallible operation in the crate returns [`ValueError`]. The variants
//! follow the three failure classes of the value system:
//!
//! - `InvalidArgument` - malformed input: parse failures, conflicting builder
//!   fields, unknown field or zone names, out of range components.
//! - `UnsupportedOperation` - the value structurally lacks what was asked for
//!   (a date has no time zone) or the operands have no defined result.
//! - `IllegalState` - a caller broke a protocol invariant (unbalanced writer
//!   framing, truncated binary input).

use thiserror::Error;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Value errors
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Malformed or contradictory input
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Operation not supported for this value type
    #[error("Operation '{operation}' not supported for {value_type}")]
    UnsupportedOperation {
        operation: String,
        value_type: String,
    },

    /// A protocol invariant was violated by the caller
    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    /// Checked arithmetic overflowed
    #[error("Numeric overflow in {operation}: {value}")]
    Overflow { operation: String, value: String },

    /// Context information (nested error with additional info)
    #[error("{message}: {source}")]
    WithContext {
        message: String,
        #[source]
        source: Box<ValueError>,
    },
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValueError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid argument error for text that failed to parse.
    ///
    /// The offending text is embedded in the message.
    pub fn parse_error(format_type: &str, input: &str) -> Self {
        Self::InvalidArgument {
            message: format!("Text cannot be parsed to a {format_type}: \"{input}\""),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            value_type: value_type.into(),
        }
    }

    /// Create an illegal state error
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Create a numeric overflow error
    pub fn overflow(operation: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
            value: value.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, message: impl Into<String>) -> Self {
        Self::WithContext {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// Strip all context layers and return the underlying error
    pub fn root(&self) -> &Self {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl ValueError {
    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "VALUE_INVALID_ARGUMENT",
            Self::UnsupportedOperation { .. } => "VALUE_UNSUPPORTED_OPERATION",
            Self::IllegalState { .. } => "VALUE_ILLEGAL_STATE",
            Self::Overflow { .. } => "VALUE_OVERFLOW",
            Self::WithContext { source, .. } => source.code(),
        }
    }

    /// Check if this is an invalid argument error (context layers are skipped)
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.root(), Self::InvalidArgument { .. })
    }

    /// Check if this is an unsupported operation error
    pub fn is_unsupported(&self) -> bool {
        matches!(self.root(), Self::UnsupportedOperation { .. })
    }

    /// Check if this is an illegal state error
    pub fn is_illegal_state(&self) -> bool {
        matches!(self.root(), Self::IllegalState { .. })
    }

    /// Check if this is an arithmetic overflow
    pub fn is_overflow(&self) -> bool {
        matches!(self.root(), Self::Overflow { .. })
    }

    /// Check if this is the caller's fault
    pub fn is_client_error(&self) -> bool {
        !self.is_illegal_state()
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for value operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Extension trait for attaching context to value results
pub trait ValueResultExt<T> {
    /// Add a static context message to the error
    fn context(self, message: &str) -> ValueResult<T>;

    /// Add a lazily built context message to the error
    fn with_context<S: Into<String>, F>(self, f: F) -> ValueResult<T>
    where
        F: FnOnce() -> S;
}

impl<T> ValueResultExt<T> for ValueResult<T> {
    fn context(self, message: &str) -> ValueResult<T> {
        self.map_err(|e| e.with_context(message))
    }

    fn with_context<S: Into<String>, F>(self, f: F) -> ValueResult<T>
    where
        F: FnOnce() -> S,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
