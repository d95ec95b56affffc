//! Option and flag definitions plus parser settings.
//!
//! An [`ArgOption`] is a logical setting identified by a key. Each of its
//! [`Flag`]s is one spelling that resolves to that setting. The capability
//! bits on a flag decide which rewrite passes may split tokens around it.

use serde::{Deserialize, Serialize};

/// A single recognized spelling of an option.
///
/// [`Flag::new`] infers capabilities from the spelling: short flags such as
/// `-x` may take a concatenated value (`-xVALUE`), every flag may be merged
/// (`-abc`, only single-character flags can ever match) and may take a value
/// after an assignment sign (`--name=VALUE`).
///
/// # Examples
///
/// ```
/// use nixargs_core::Flag;
///
/// let short = Flag::new("-o");
/// assert!(short.can_concat_assign);
///
/// let long = Flag::new("--output").with_assign_signs(&[":"]);
/// assert!(!long.can_concat_assign);
/// assert_eq!(long.assign_signs, vec![":"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Exact text that selects this flag.
    pub name: String,
    /// Participates in merged short flags (`-abc`).
    pub can_merge: bool,
    /// Accepts a value after an assignment sign (`--name=VALUE`).
    pub can_follow_assign: bool,
    /// Accepts a value concatenated to its name (`-nVALUE`).
    pub can_concat_assign: bool,
    /// Assignment signs; empty means "inherit the option set's signs".
    #[serde(default)]
    pub assign_signs: Vec<String>,
}

impl Flag {
    /// Creates a flag with capabilities inferred from its spelling.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let short = is_short_flag(&name);
        Self {
            name,
            can_merge: true,
            can_follow_assign: true,
            can_concat_assign: short,
            assign_signs: Vec::new(),
        }
    }

    /// Creates one flag per name.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        names.iter().map(|n| Self::new(n.as_ref())).collect()
    }

    /// Sets whether the flag participates in merged short flags.
    pub fn mergeable(mut self, can_merge: bool) -> Self {
        self.can_merge = can_merge;
        self
    }

    /// Sets whether the flag may be followed by an assignment sign.
    pub fn follow_assign(mut self, can_follow_assign: bool) -> Self {
        self.can_follow_assign = can_follow_assign;
        self
    }

    /// Sets whether the flag may carry a concatenated value.
    pub fn concat_assign(mut self, can_concat_assign: bool) -> Self {
        self.can_concat_assign = can_concat_assign;
        self
    }

    /// Uses these assignment signs instead of the option set's.
    pub fn with_assign_signs<S: AsRef<str>>(mut self, signs: &[S]) -> Self {
        self.assign_signs = signs.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

fn is_short_flag(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('-'), Some(c), None) if c != '-'
    )
}

/// A logical setting bound to one or more flags.
///
/// Values, multiplicity, delimiters and defaults only matter when
/// `accepts_value` is set.
///
/// # Examples
///
/// ```
/// use nixargs_core::{ArgOption, Flag};
///
/// let opt = ArgOption::new("include", vec![Flag::new("-I"), Flag::new("--include")])
///     .with_values()
///     .with_delimiters(",")
///     .with_defaults(&["."]);
/// assert!(opt.accepts_value && opt.multi_value);
/// assert_eq!(opt.flag_names(), vec!["-I", "--include"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgOption {
    /// Stable key the parsed values are stored under.
    pub key: String,
    /// One-line summary for help output.
    pub summary: String,
    /// Longer description for help output.
    pub description: String,
    /// Spellings that select this option.
    pub flags: Vec<Flag>,
    /// Takes at least one value.
    pub accepts_value: bool,
    /// Takes any number of values.
    pub multi_value: bool,
    /// A repeated occurrence replaces earlier values instead of keeping/appending.
    pub override_previous: bool,
    /// Drops values already recorded for the key.
    pub unique_values: bool,
    /// Characters that split a single argument into several values.
    pub delimiters: Vec<char>,
    /// Values used when nothing else supplies the key.
    pub default_values: Vec<String>,
}

impl ArgOption {
    /// Creates a no-value option.
    pub fn new(key: impl Into<String>, flags: Vec<Flag>) -> Self {
        Self {
            key: key.into(),
            flags,
            ..Default::default()
        }
    }

    /// Accepts a single value.
    pub fn with_value(mut self) -> Self {
        self.accepts_value = true;
        self.multi_value = false;
        self
    }

    /// Accepts multiple values.
    pub fn with_values(mut self) -> Self {
        self.accepts_value = true;
        self.multi_value = true;
        self
    }

    /// Replaces earlier values on repeated occurrences.
    pub fn override_previous(mut self) -> Self {
        self.override_previous = true;
        self
    }

    /// Deduplicates values per key.
    pub fn unique(mut self) -> Self {
        self.unique_values = true;
        self
    }

    /// Splits values on any of these characters.
    pub fn with_delimiters(mut self, delimiters: &str) -> Self {
        self.delimiters = delimiters.chars().collect();
        self
    }

    /// Sets default values.
    pub fn with_defaults<S: AsRef<str>>(mut self, defaults: &[S]) -> Self {
        self.default_values = defaults.iter().map(|d| d.as_ref().to_string()).collect();
        self
    }

    /// Sets the help summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the help description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the flag spellings in declaration order.
    pub fn flag_names(&self) -> Vec<&str> {
        self.flags.iter().map(|f| f.name.as_str()).collect()
    }

    pub(crate) fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }
}

/// Matching configuration shared by all options of an
/// [`OptionSet`](crate::OptionSet).
///
/// The defaults follow the usual Unix conventions: `-` merges short flags,
/// `--` starts positional rests, `,,` separates groups, `=` assigns values and
/// anything starting with `-` that is not registered is an undefined flag.
///
/// # Examples
///
/// ```
/// use nixargs_core::ParserSettings;
///
/// let settings: ParserSettings = serde_yaml::from_str("group_separators: []").unwrap();
/// assert_eq!(settings.merge_flag_prefix, "-");
/// assert!(settings.group_separators.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Prefix of merged single-character flags. May be empty, in which case
    /// bare characters are merged.
    pub merge_flag_prefix: String,
    /// Arguments after which everything in the group is a positional rest.
    pub rest_signs: Vec<String>,
    /// Arguments separating independent option groups.
    pub group_separators: Vec<String>,
    /// Default assignment signs inherited by flags.
    pub assign_signs: Vec<String>,
    /// Prefixes of arguments that look like flags.
    pub undefined_flag_prefixes: Vec<String>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            merge_flag_prefix: "-".to_string(),
            rest_signs: vec!["--".to_string()],
            group_separators: vec![",,".to_string()],
            assign_signs: vec!["=".to_string()],
            undefined_flag_prefixes: vec!["-".to_string()],
        }
    }
}

impl ParserSettings {
    /// Settings with every optional feature disabled except merging under
    /// `merge_flag_prefix`.
    pub fn bare(merge_flag_prefix: impl Into<String>) -> Self {
        Self {
            merge_flag_prefix: merge_flag_prefix.into(),
            rest_signs: Vec::new(),
            group_separators: Vec::new(),
            assign_signs: Vec::new(),
            undefined_flag_prefixes: Vec::new(),
        }
    }
}
