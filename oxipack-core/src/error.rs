//! Error types for OxiPack operations.
//!
//! This module provides a single error type covering both compile-time
//! failures (a malformed or inconsistent format string) and run-time
//! failures (truncated input, argument list mismatches). Compile errors are
//! always raised before any bit is written or read.

use thiserror::Error;

/// The main error type for OxiPack operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OxiPackError {
    /// The format string is syntactically malformed.
    #[error("malformed format string at byte {position}: {message}")]
    Format {
        /// Byte offset of the offending character.
        position: usize,
        /// Description of the syntax problem.
        message: String,
    },

    /// A directive names a type character outside {i, y, w, d, q, s}.
    #[error("unknown type character '{ch}' at byte {position}")]
    UnknownType {
        /// The unrecognized character.
        ch: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// A directive is syntactically valid but semantically inconsistent.
    #[error("invalid directive at byte {position}: {message}")]
    InvalidDirective {
        /// Byte offset of the directive's `%`.
        position: usize,
        /// Description of the inconsistency.
        message: String,
    },

    /// A read consumed past the end of the supplied buffer.
    #[error("truncated input: {needed} bits required, {available} available")]
    TruncatedInput {
        /// Bits the directive needed.
        needed: usize,
        /// Bits left in the buffer.
        available: usize,
    },

    /// The value list holds a different number of entries than the compiled
    /// directive sequence requires.
    #[error("argument count mismatch: {expected} values required, {supplied} supplied")]
    ArgumentCount {
        /// Values the directive sequence consumes.
        expected: usize,
        /// Values actually supplied.
        supplied: usize,
    },

    /// A supplied value's kind does not match the directive it feeds.
    #[error("argument {index}: expected {expected}, found {found}")]
    ArgumentKind {
        /// Zero-based position in the value list.
        index: usize,
        /// Kind the directive requires.
        expected: &'static str,
        /// Kind that was supplied.
        found: &'static str,
    },

    /// An array value's length does not match its directive's quantity.
    #[error("argument {index}: array of length {found} where {expected} elements are required")]
    ArrayLength {
        /// Zero-based position in the value list.
        index: usize,
        /// Element count the directive requires.
        expected: usize,
        /// Element count actually supplied.
        found: usize,
    },
}

/// Result type alias for OxiPack operations.
pub type Result<T> = std::result::Result<T, OxiPackError>;

impl OxiPackError {
    /// Create a malformed-format error.
    pub fn format(position: usize, message: impl Into<String>) -> Self {
        Self::Format {
            position,
            message: message.into(),
        }
    }

    /// Create an unknown type character error.
    pub fn unknown_type(ch: char, position: usize) -> Self {
        Self::UnknownType { ch, position }
    }

    /// Create an invalid directive error.
    pub fn invalid_directive(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidDirective {
            position,
            message: message.into(),
        }
    }

    /// Create a truncated input error.
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::TruncatedInput { needed, available }
    }

    /// Create an argument count mismatch error.
    pub fn argument_count(expected: usize, supplied: usize) -> Self {
        Self::ArgumentCount { expected, supplied }
    }

    /// Create an argument kind mismatch error.
    pub fn argument_kind(index: usize, expected: &'static str, found: &'static str) -> Self {
        Self::ArgumentKind {
            index,
            expected,
            found,
        }
    }

    /// Create an array length mismatch error.
    pub fn array_length(index: usize, expected: usize, found: usize) -> Self {
        Self::ArrayLength {
            index,
            expected,
            found,
        }
    }
}
