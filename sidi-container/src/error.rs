//! Error types for SiDI container operations.
//!
//! Lookups of unknown names are never errors; they return `None`.
//! Errors only describe badly shaped arguments, type mismatches on
//! typed reads, and failures reported by a factory itself.

use std::error::Error as StdError;

use sidi_support::rendering::shorten_type_name;

/// Boxed error produced by a factory's own construction logic.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Main error type for all SiDI operations.
#[derive(Debug, thiserror::Error)]
pub enum SidiError {
    /// A factory asked for an argument position the caller did not supply.
    #[error(
        "Missing construction argument #{index} (expected {})\n  Hint: pass it in the args![..] list given to create()",
        shorten_type_name(.expected)
    )]
    ArgumentMissing {
        index: usize,
        expected: &'static str,
    },

    /// An argument was supplied but holds a different type.
    #[error(
        "Construction argument #{index} has type {}, expected {}",
        shorten_type_name(.found),
        shorten_type_name(.expected)
    )]
    ArgumentType {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A stored value was read back as the wrong type.
    #[error(
        "Value {name:?} is not a {}\n  Hint: read it with the type it was set with",
        shorten_type_name(.expected)
    )]
    ValueType {
        name: String,
        expected: &'static str,
    },

    /// A factory produced an instance of a different type than requested.
    #[error(
        "Factory {name:?} produces {}, not {}",
        shorten_type_name(.produced),
        shorten_type_name(.expected)
    )]
    InstanceType {
        name: String,
        expected: &'static str,
        produced: &'static str,
    },

    /// The factory's own construction logic failed.
    #[error("Construction failed: {0}")]
    Construction(#[source] BoxError),
}

impl SidiError {
    /// Wraps a factory failure so it can be returned from a factory.
    ///
    /// ```
    /// use sidi_container::error::SidiError;
    ///
    /// let err = SidiError::construction("size must be positive");
    /// assert_eq!(err.to_string(), "Construction failed: size must be positive");
    /// ```
    pub fn construction(err: impl Into<BoxError>) -> Self {
        SidiError::Construction(err.into())
    }
}

/// Convenient Result type for SiDI operations.
pub type Result<T> = std::result::Result<T, SidiError>;
