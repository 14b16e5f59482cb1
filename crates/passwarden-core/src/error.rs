//! Policy error types for `passwarden-core`.

use thiserror::Error;

/// Errors produced when a password cannot be generated from a policy.
///
/// Policy *violations* (e.g. no character class selected) are not errors:
/// the validator repairs them and reports a [`crate::PolicyViolation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Requested length is outside the supported range.
    #[error("password length must be between {min} and {max}, got {actual}")]
    LengthOutOfRange {
        /// Smallest supported length.
        min: u32,
        /// Largest supported length.
        max: u32,
        /// The rejected length.
        actual: u32,
    },

    /// Requested length cannot hold every mandatory character.
    #[error("password length {length} is below the policy minimum of {minimum}")]
    BelowMinimum {
        /// The rejected length.
        length: u32,
        /// Derived minimum length of the policy.
        minimum: u32,
    },
}
