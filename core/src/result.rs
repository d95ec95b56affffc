//! Parse results and precedence-based value lookup.
//!
//! A [`ParseResult`] keeps each value source separately and resolves a key by
//! looking at them in a fixed order: specified arguments, environment,
//! config arguments, then registered defaults.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValueError;

/// Key → values overlay supplied by the caller, typically resolved from
/// environment variables.
pub type EnvValues = HashMap<String, Vec<String>>;

/// Outcome of parsing one group of arguments.
///
/// # Examples
///
/// ```
/// use nixargs_core::{EnvValues, OptionSet};
///
/// let mut set = OptionSet::new();
/// set.add_flag_value("port", "--port", "80", "").unwrap();
///
/// let mut env = EnvValues::new();
/// env.insert("port".to_string(), vec!["8080".to_string()]);
///
/// let none: &[&str] = &[];
/// let result = set.parse_with_env(none, &["--port", "443"], &env);
/// assert_eq!(result.value("port"), Some("8080"));
/// assert_eq!(result.get_int("port").unwrap(), Some(8080));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub(crate) commands: Vec<String>,
    pub(crate) values: BTreeMap<String, Vec<String>>,
    pub(crate) env_values: BTreeMap<String, Vec<String>>,
    pub(crate) config_values: BTreeMap<String, Vec<String>>,
    pub(crate) default_values: BTreeMap<String, Vec<String>>,
    pub(crate) rests: Vec<String>,
    pub(crate) config_rests: Vec<String>,
    pub(crate) ambiguous_flags: Vec<String>,
    pub(crate) config_ambiguous_flags: Vec<String>,
    pub(crate) undefined_flags: Vec<String>,
    pub(crate) config_undefined_flags: Vec<String>,
}

impl ParseResult {
    fn sources(&self) -> [&BTreeMap<String, Vec<String>>; 4] {
        [
            &self.values,
            &self.env_values,
            &self.config_values,
            &self.default_values,
        ]
    }

    /// Values for `key` from the first source that knows it.
    ///
    /// A source that only records presence (an empty list) still shadows the
    /// sources below it. Returns `None` when no source knows the key.
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.sources()
            .into_iter()
            .find_map(|source| source.get(key))
            .map(Vec::as_slice)
    }

    /// First value for `key` from the first source that knows it; `None`
    /// when that source only records presence.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if any source knows `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.sources().iter().any(|s| s.contains_key(key))
    }

    /// Returns `true` if the first source knowing `key` has a value for it.
    pub fn has_value(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Key was given in the specified arguments.
    pub fn has_flag_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Key was given in the specified arguments with at least one value.
    pub fn has_flag_value(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Key was supplied by the environment overlay.
    pub fn has_env_key(&self, key: &str) -> bool {
        self.env_values.contains_key(key)
    }

    /// Key was given in the config arguments.
    pub fn has_config_key(&self, key: &str) -> bool {
        self.config_values.contains_key(key)
    }

    /// Key has registered defaults.
    pub fn has_default_key(&self, key: &str) -> bool {
        self.default_values.contains_key(key)
    }

    /// Sets config-sourced values for `key` after parsing, e.g. when a config
    /// file is read only once the first parse says where it is.
    pub fn set_config_values(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.config_values.insert(key.into(), values);
    }

    /// First value as a string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.value(key).map(str::to_string)
    }

    /// First value as a boolean.
    ///
    /// Presence without a value counts as `true`. Accepts `true/false`,
    /// `yes/no`, `on/off` and `1/0` in any case.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] for any other text.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ValueError> {
        let Some(values) = self.values(key) else {
            return Ok(None);
        };
        let Some(value) = values.first() else {
            return Ok(Some(true));
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "off" | "0" => Ok(Some(false)),
            _ => Err(ValueError::Invalid {
                key: key.to_string(),
                value: value.clone(),
                reason: "expected a boolean".to_string(),
            }),
        }
    }

    /// First value as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] if the value is not an integer.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, ValueError> {
        self.get_parsed(key)
    }

    /// First value as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] if the value is not an unsigned integer.
    pub fn get_uint(&self, key: &str) -> Result<Option<u64>, ValueError> {
        self.get_parsed(key)
    }

    /// First value as a float.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Invalid`] if the value is not a number.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>, ValueError> {
        self.get_parsed(key)
    }

    fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, ValueError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.value(key) else {
            return Ok(None);
        };
        value.parse::<T>().map(Some).map_err(|err| ValueError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: err.to_string(),
        })
    }

    /// Resolved command path (canonical names), empty when parsed without a
    /// command tree.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Positional rests from the specified arguments.
    pub fn rests(&self) -> &[String] {
        &self.rests
    }

    /// Positional rests from the config arguments.
    pub fn config_rests(&self) -> &[String] {
        &self.config_rests
    }

    /// Ambiguous flags from the specified arguments.
    pub fn ambiguous_flags(&self) -> &[String] {
        &self.ambiguous_flags
    }

    /// Ambiguous flags from the config arguments.
    pub fn config_ambiguous_flags(&self) -> &[String] {
        &self.config_ambiguous_flags
    }

    /// Undefined flags from the specified arguments.
    pub fn undefined_flags(&self) -> &[String] {
        &self.undefined_flags
    }

    /// Undefined flags from the config arguments.
    pub fn config_undefined_flags(&self) -> &[String] {
        &self.config_undefined_flags
    }

    /// Returns `true` if either input produced ambiguous or undefined flags.
    pub fn has_diagnostics(&self) -> bool {
        !(self.ambiguous_flags.is_empty()
            && self.config_ambiguous_flags.is_empty()
            && self.undefined_flags.is_empty()
            && self.config_undefined_flags.is_empty())
    }
}
