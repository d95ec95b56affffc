//! Option registry and flag lookup.
//!
//! [`OptionSet`] owns the registered [`ArgOption`]s and the settings that
//! drive matching. Registration order is preserved everywhere it matters:
//! first-match rules in the rewrite passes iterate flags in the order they
//! were appended.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::RegistrationError;
use crate::types::{ArgOption, Flag, ParserSettings};

/// Result of looking a flag up by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatch<'a> {
    /// No registered flag starts with the text.
    None,
    /// Exactly one flag matches; holds its full name.
    Unique(&'a str),
    /// Two or more flags start with the text.
    Ambiguous,
}

#[derive(Debug, Clone, Copy)]
struct FlagRef {
    option: usize,
    flag: usize,
}

/// Registry of options plus the settings used to parse against them.
///
/// # Examples
///
/// ```
/// use nixargs_core::OptionSet;
///
/// let mut set = OptionSet::new();
/// set.add_flag("tag", "--tag", "tag the build").unwrap();
/// set.add_flags_values("multi", &["-m", "--multi"], &[], "").unwrap();
///
/// let result = set.parse(&["--tag", "-m", "a", "b"], &[] as &[&str]);
/// assert!(result.has_flag_key("tag"));
/// assert_eq!(result.values("multi"), Some(&["a".to_string(), "b".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    settings: ParserSettings,
    options: Vec<ArgOption>,
    key_option_map: HashMap<String, usize>,
    flag_map: IndexMap<String, FlagRef>,
    key_default_map: HashMap<String, Vec<String>>,
    has_mergeable_flags: bool,
    has_assign_signs: bool,
    has_concat_assign_flags: bool,
}

impl OptionSet {
    /// Creates an empty set with [`ParserSettings::default`].
    pub fn new() -> Self {
        Self::with_settings(ParserSettings::default())
    }

    /// Creates an empty set with explicit settings.
    pub fn with_settings(settings: ParserSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Returns the matching settings.
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Registers an option.
    ///
    /// The set is left untouched when any check fails.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] if the key is empty or taken, the option
    /// has no flags, a flag name is empty, or a flag name is already used.
    pub fn append(&mut self, option: ArgOption) -> Result<(), RegistrationError> {
        self.validate(&option)?;

        let mut option = option;
        for flag in &mut option.flags {
            if flag.can_follow_assign && flag.assign_signs.is_empty() {
                flag.assign_signs = self.settings.assign_signs.clone();
            }
        }

        let index = self.options.len();
        self.key_option_map.insert(option.key.clone(), index);
        for (flag_index, flag) in option.flags.iter().enumerate() {
            self.flag_map.insert(
                flag.name.clone(),
                FlagRef {
                    option: index,
                    flag: flag_index,
                },
            );
        }
        if !option.default_values.is_empty() {
            self.key_default_map
                .insert(option.key.clone(), option.default_values.clone());
        }

        self.has_mergeable_flags |= option.flags.iter().any(|f| f.can_merge);
        if option.accepts_value {
            self.has_assign_signs |= option
                .flags
                .iter()
                .any(|f| f.can_follow_assign && !f.assign_signs.is_empty());
            self.has_concat_assign_flags |= option.flags.iter().any(|f| f.can_concat_assign);
        }

        debug!(key = %option.key, flags = ?option.flag_names(), "Registered option");
        self.options.push(option);
        Ok(())
    }

    fn validate(&self, option: &ArgOption) -> Result<(), RegistrationError> {
        if option.key.is_empty() {
            return Err(RegistrationError::EmptyKey);
        }
        if self.key_option_map.contains_key(&option.key) {
            return Err(RegistrationError::DuplicateKey(option.key.clone()));
        }
        if option.flags.is_empty() {
            return Err(RegistrationError::NoFlags(option.key.clone()));
        }

        let mut seen = Vec::with_capacity(option.flags.len());
        for flag in &option.flags {
            if flag.name.is_empty() {
                return Err(RegistrationError::EmptyFlagName(option.key.clone()));
            }
            if self.flag_map.contains_key(&flag.name) || seen.contains(&flag.name.as_str()) {
                return Err(RegistrationError::DuplicateFlag(flag.name.clone()));
            }
            seen.push(flag.name.as_str());
        }
        Ok(())
    }

    /// Registers a no-value option with one flag.
    pub fn add_flag(&mut self, key: &str, flag: &str, summary: &str) -> Result<(), RegistrationError> {
        self.append(ArgOption::new(key, vec![Flag::new(flag)]).with_summary(summary))
    }

    /// Registers a no-value option with several flags.
    pub fn add_flags(
        &mut self,
        key: &str,
        flags: &[&str],
        summary: &str,
    ) -> Result<(), RegistrationError> {
        self.append(ArgOption::new(key, Flag::from_names(flags)).with_summary(summary))
    }

    /// Registers a single-value option with one flag.
    ///
    /// An empty `default_value` registers no default.
    pub fn add_flag_value(
        &mut self,
        key: &str,
        flag: &str,
        default_value: &str,
        summary: &str,
    ) -> Result<(), RegistrationError> {
        self.add_flags_value(key, &[flag], default_value, summary)
    }

    /// Registers a multi-value option with one flag.
    pub fn add_flag_values(
        &mut self,
        key: &str,
        flag: &str,
        default_values: &[&str],
        summary: &str,
    ) -> Result<(), RegistrationError> {
        self.add_flags_values(key, &[flag], default_values, summary)
    }

    /// Registers a single-value option with several flags.
    pub fn add_flags_value(
        &mut self,
        key: &str,
        flags: &[&str],
        default_value: &str,
        summary: &str,
    ) -> Result<(), RegistrationError> {
        let defaults: &[&str] = if default_value.is_empty() {
            &[]
        } else {
            std::slice::from_ref(&default_value)
        };
        self.append(
            ArgOption::new(key, Flag::from_names(flags))
                .with_value()
                .with_defaults(defaults)
                .with_summary(summary),
        )
    }

    /// Registers a multi-value option with several flags.
    pub fn add_flags_values(
        &mut self,
        key: &str,
        flags: &[&str],
        default_values: &[&str],
        summary: &str,
    ) -> Result<(), RegistrationError> {
        self.append(
            ArgOption::new(key, Flag::from_names(flags))
                .with_values()
                .with_defaults(default_values)
                .with_summary(summary),
        )
    }

    /// Registered options in insertion order.
    pub fn options(&self) -> &[ArgOption] {
        &self.options
    }

    /// Looks an option up by key.
    pub fn option(&self, key: &str) -> Option<&ArgOption> {
        self.key_option_map.get(key).map(|&i| &self.options[i])
    }

    /// Looks an option up by one of its flag names.
    pub fn option_by_flag(&self, name: &str) -> Option<&ArgOption> {
        self.flag_map.get(name).map(|r| &self.options[r.option])
    }

    /// All flag names in registration order.
    pub fn flag_names(&self) -> impl Iterator<Item = &str> {
        self.flag_map.keys().map(String::as_str)
    }

    /// Returns `true` if `name` is a registered flag.
    pub fn is_flag(&self, name: &str) -> bool {
        self.flag_map.contains_key(name)
    }

    pub(crate) fn flag(&self, name: &str) -> Option<(&Flag, &ArgOption)> {
        self.flag_map.get(name).map(|r| self.resolve_ref(*r))
    }

    pub(crate) fn flags_in_order(&self) -> impl Iterator<Item = (&Flag, &ArgOption)> {
        self.flag_map.values().map(|r| self.resolve_ref(*r))
    }

    fn resolve_ref(&self, r: FlagRef) -> (&Flag, &ArgOption) {
        let option = &self.options[r.option];
        (&option.flags[r.flag], option)
    }

    pub(crate) fn defaults(&self) -> &HashMap<String, Vec<String>> {
        &self.key_default_map
    }

    pub(crate) fn has_mergeable_flags(&self) -> bool {
        self.has_mergeable_flags
    }

    pub(crate) fn has_assign_signs(&self) -> bool {
        self.has_assign_signs
    }

    pub(crate) fn has_concat_assign_flags(&self) -> bool {
        self.has_concat_assign_flags
    }

    /// Finds the flag whose name starts with `text`.
    ///
    /// An exact name always wins over longer names sharing the prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixargs_core::{OptionSet, PrefixMatch};
    ///
    /// let mut set = OptionSet::new();
    /// set.add_flag("one", "--foo-one", "").unwrap();
    /// set.add_flag("two", "--foo-two", "").unwrap();
    ///
    /// assert_eq!(set.find_flag_by_prefix("--foo-o"), PrefixMatch::Unique("--foo-one"));
    /// assert_eq!(set.find_flag_by_prefix("--foo"), PrefixMatch::Ambiguous);
    /// assert_eq!(set.find_flag_by_prefix("--bar"), PrefixMatch::None);
    /// ```
    pub fn find_flag_by_prefix(&self, text: &str) -> PrefixMatch<'_> {
        if let Some((name, _)) = self.flag_map.get_key_value(text) {
            return PrefixMatch::Unique(name.as_str());
        }

        let mut found = PrefixMatch::None;
        for name in self.flag_map.keys() {
            if name.starts_with(text) {
                if found != PrefixMatch::None {
                    return PrefixMatch::Ambiguous;
                }
                found = PrefixMatch::Unique(name.as_str());
            }
        }
        found
    }

    /// Returns `true` if `text` starts with an undefined-flag prefix and has
    /// something after it.
    pub fn looks_like_flag(&self, text: &str) -> bool {
        self.settings
            .undefined_flag_prefixes
            .iter()
            .any(|p| !p.is_empty() && text.len() > p.len() && text.starts_with(p.as_str()))
    }

    /// Resolves an abbreviated flag. Only flag-looking text is considered.
    pub(crate) fn resolve_abbreviation(&self, text: &str) -> PrefixMatch<'_> {
        if !self.looks_like_flag(text) {
            return PrefixMatch::None;
        }
        self.find_flag_by_prefix(text)
    }
}
