//! Error types for option registration and typed value access.
//!
//! Registration errors are configuration mistakes made while building an
//! [`OptionSet`](crate::OptionSet); they are always returned to the caller and
//! leave the set unchanged. Value errors come from the typed getters on
//! [`ParseResult`](crate::ParseResult) and are distinct from a missing key,
//! which is reported as `Ok(None)`.

use thiserror::Error;

/// Errors returned by [`OptionSet::append`](crate::OptionSet::append).
///
/// # Examples
///
/// ```
/// use nixargs_core::{ArgOption, OptionSet, RegistrationError};
///
/// let mut set = OptionSet::new();
/// set.add_flag("verbose", "-v", "").unwrap();
///
/// let err = set.add_flag("quiet", "-v", "").unwrap_err();
/// assert_eq!(err, RegistrationError::DuplicateFlag("-v".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Option key is empty.
    #[error("option key cannot be empty")]
    EmptyKey,
    /// Another option already uses this key.
    #[error("option key '{0}' already exists")]
    DuplicateKey(String),
    /// Option was given no flags.
    #[error("option '{0}' has no flags")]
    NoFlags(String),
    /// One of the option's flags has an empty name.
    #[error("option '{0}' has a flag with an empty name")]
    EmptyFlagName(String),
    /// Flag name already registered in this set.
    #[error("flag '{0}' already exists")]
    DuplicateFlag(String),
}

/// Conversion failure from a typed getter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The resolved value could not be converted to the requested type.
    #[error("invalid value '{value}' for '{key}': {reason}")]
    Invalid {
        /// Option key being read.
        key: String,
        /// Raw value that failed to convert.
        value: String,
        /// Conversion error message.
        reason: String,
    },
}
