//! Grouped, dual-stream parsing on an [`OptionSet`].
//!
//! Specified and config arguments are tokenized and rewritten independently,
//! split into groups on the group separators, padded to the same number of
//! groups and reduced pair by pair.

use std::collections::BTreeMap;

use tracing::debug;

use crate::option_set::OptionSet;
use crate::result::{EnvValues, ParseResult};
use crate::token::{ArgToken, split_groups};

type GroupPair = (Vec<ArgToken>, Vec<ArgToken>);

impl OptionSet {
    /// Parses the first group of specified and config arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixargs_core::OptionSet;
    ///
    /// let mut set = OptionSet::new();
    /// set.add_flag_value("single", "--single", "", "").unwrap();
    ///
    /// let result = set.parse(&["--single", "val", "xxx"], &[] as &[&str]);
    /// assert_eq!(result.value("single"), Some("val"));
    /// assert_eq!(result.rests(), ["xxx"]);
    /// ```
    pub fn parse<S, C>(&self, specified: &[S], config: &[C]) -> ParseResult
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        self.parse_with_env(specified, config, &EnvValues::new())
    }

    /// Like [`parse`](Self::parse), with an environment overlay.
    pub fn parse_with_env<S, C>(&self, specified: &[S], config: &[C], env: &EnvValues) -> ParseResult
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        self.group_pairs(specified, config)
            .into_iter()
            .next()
            .map(|(s, c)| self.reduce_pair(&s, &c, env))
            .unwrap_or_default()
    }

    /// Parses every group; always returns at least one result.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixargs_core::OptionSet;
    ///
    /// let mut set = OptionSet::new();
    /// set.add_flag_value("x", "--x", "", "").unwrap();
    ///
    /// let results = set.parse_groups(&["--x", "1", ",,", "--x", "2"], &[] as &[&str]);
    /// assert_eq!(results.len(), 2);
    /// assert_eq!(results[1].value("x"), Some("2"));
    /// ```
    pub fn parse_groups<S, C>(&self, specified: &[S], config: &[C]) -> Vec<ParseResult>
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        self.parse_groups_with_env(specified, config, &EnvValues::new())
    }

    /// Like [`parse_groups`](Self::parse_groups), with an environment overlay
    /// applied to every group.
    pub fn parse_groups_with_env<S, C>(
        &self,
        specified: &[S],
        config: &[C],
        env: &EnvValues,
    ) -> Vec<ParseResult>
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        self.group_pairs(specified, config)
            .iter()
            .map(|(s, c)| self.reduce_pair(s, c, env))
            .collect()
    }

    fn group_pairs<S, C>(&self, specified: &[S], config: &[C]) -> Vec<GroupPair>
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let mut specified_groups = split_groups(self.rewrite(self.tokenize(specified)));
        let mut config_groups = split_groups(self.rewrite(self.tokenize(config)));

        let count = specified_groups.len().max(config_groups.len());
        specified_groups.resize_with(count, Vec::new);
        config_groups.resize_with(count, Vec::new);

        debug!(groups = count, "Split arguments into groups");
        specified_groups.into_iter().zip(config_groups).collect()
    }

    fn reduce_pair(&self, specified: &[ArgToken], config: &[ArgToken], env: &EnvValues) -> ParseResult {
        let specified = self.walk(specified);
        let config = self.walk(config);

        ParseResult {
            commands: Vec::new(),
            values: specified.values,
            env_values: env.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            config_values: config.values,
            default_values: self
                .defaults()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
            rests: specified.rests,
            config_rests: config.rests,
            ambiguous_flags: specified.ambiguous,
            config_ambiguous_flags: config.ambiguous,
            undefined_flags: specified.undefined,
            config_undefined_flags: config.undefined,
        }
    }
}
