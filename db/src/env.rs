//! Environment-variable bindings for option keys.
//!
//! The parser never reads the process environment itself. Bindings are
//! resolved here into the key to values overlay accepted by
//! `parse_with_env`.

use nixargs_core::EnvValues;
use tracing::debug;

/// Variables consulted for one option key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    /// Option key the resolved values are stored under.
    pub key: String,
    /// Variable names, in lookup order.
    pub variables: Vec<String>,
    /// Characters splitting the variable's value; empty keeps it whole.
    pub delimiters: Vec<char>,
}

/// Ordered set of [`EnvBinding`]s.
///
/// # Examples
///
/// ```
/// use nixargs_config::EnvBindings;
///
/// let mut bindings = EnvBindings::new();
/// bindings.bind("paths", &["APP_PATHS"], ":");
///
/// let env = bindings.resolve(|_| Some("/bin:/usr/bin".to_string()));
/// assert_eq!(env["paths"], vec!["/bin", "/usr/bin"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvBindings {
    bindings: Vec<EnvBinding>,
}

impl EnvBindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to the first set variable of `variables`. A later binding
    /// for the same key replaces the earlier one.
    pub fn bind<S: AsRef<str>>(&mut self, key: &str, variables: &[S], delimiters: &str) {
        let binding = EnvBinding {
            key: key.to_string(),
            variables: variables.iter().map(|v| v.as_ref().to_string()).collect(),
            delimiters: delimiters.chars().collect(),
        };
        match self.bindings.iter_mut().find(|b| b.key == key) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no key is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in the order their keys were first bound.
    pub fn iter(&self) -> impl Iterator<Item = &EnvBinding> {
        self.bindings.iter()
    }

    /// Resolves every binding through `lookup`.
    ///
    /// For each key the first variable with a non-empty value wins; keys
    /// whose variables are all unset or empty are left out.
    pub fn resolve<F>(&self, lookup: F) -> EnvValues
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = EnvValues::new();
        for binding in &self.bindings {
            let found = binding.variables.iter().find_map(|name| {
                lookup(name.as_str())
                    .filter(|v| !v.is_empty())
                    .map(|v| (name, v))
            });
            let Some((name, value)) = found else {
                continue;
            };

            let split = if binding.delimiters.is_empty() {
                vec![value]
            } else {
                value
                    .split(|c: char| binding.delimiters.contains(&c))
                    .filter(|piece| !piece.is_empty())
                    .map(str::to_string)
                    .collect()
            };
            debug!(
                key = %binding.key,
                variable = %name,
                values = split.len(),
                "Resolved environment binding"
            );
            values.insert(binding.key.clone(), split);
        }
        values
    }

    /// Resolves every binding against the process environment.
    pub fn resolve_from_process(&self) -> EnvValues {
        self.resolve(|name| std::env::var(name).ok())
    }
}
