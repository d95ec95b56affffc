//! Command trees and subcommand routing.
//!
//! A [`Command`] owns an [`OptionSet`] and child commands. Parsing through a
//! command first resolves the deepest subcommand named by the leading
//! arguments, then hands the remaining arguments to that command's options.

use tracing::debug;

use crate::option_set::OptionSet;
use crate::result::{EnvValues, ParseResult};
use crate::types::ParserSettings;

/// A named node in a command tree.
///
/// # Examples
///
/// ```
/// use nixargs_core::Command;
///
/// let mut git = Command::simple("git", "version control", &[]);
/// git.new_simple_sub_command("remote", "manage remotes", &[])
///     .new_simple_sub_command("set-url", "set remote url", &[])
///     .options_mut()
///     .add_flag("push", "--push", "")
///     .unwrap();
///
/// let none: &[&str] = &[];
/// let result = git.parse(&["git", "remote", "set-url", "--push", "origin", "url"], none);
/// assert_eq!(result.commands(), ["git", "remote", "set-url"]);
/// assert!(result.has_flag_key("push"));
/// assert_eq!(result.rests(), ["origin", "url"]);
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    names: Vec<String>,
    summary: String,
    options: OptionSet,
    sub_commands: Vec<Command>,
}

/// Outcome of resolving a command path from leading arguments.
#[derive(Debug, Clone)]
pub struct LeafMatch<'a> {
    /// Deepest command reached by an unbroken chain of names, if any name
    /// matched at all.
    pub explicit: Option<&'a Command>,
    /// Deepest command reached; the root when nothing matched.
    pub inferred: &'a Command,
    /// Canonical names of the matched commands.
    pub path: Vec<String>,
}

impl Command {
    /// Creates a command with explicit parser settings.
    pub fn new<S: AsRef<str>>(names: &[S], summary: &str, settings: ParserSettings) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
            summary: summary.to_string(),
            options: OptionSet::with_settings(settings),
            sub_commands: Vec::new(),
        }
    }

    /// Creates a command with default settings and optional aliases.
    pub fn simple(name: &str, summary: &str, aliases: &[&str]) -> Self {
        let names: Vec<&str> = std::iter::once(name).chain(aliases.iter().copied()).collect();
        Self::new(&names[..], summary, ParserSettings::default())
    }

    /// Adds an existing command as a child and returns it.
    pub fn add_sub_command(&mut self, command: Command) -> &mut Command {
        self.sub_commands.push(command);
        let last = self.sub_commands.len() - 1;
        &mut self.sub_commands[last]
    }

    /// Creates a child command with explicit settings and returns it.
    pub fn new_sub_command<S: AsRef<str>>(
        &mut self,
        names: &[S],
        summary: &str,
        settings: ParserSettings,
    ) -> &mut Command {
        self.add_sub_command(Command::new(names, summary, settings))
    }

    /// Creates a child command with default settings and returns it.
    pub fn new_simple_sub_command(&mut self, name: &str, summary: &str, aliases: &[&str]) -> &mut Command {
        self.add_sub_command(Command::simple(name, summary, aliases))
    }

    /// Canonical name; empty for a nameless command.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Canonical name followed by aliases.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// One-line summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Options recognized by this command.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Mutable options, for registration.
    pub fn options_mut(&mut self) -> &mut OptionSet {
        &mut self.options
    }

    /// Child commands in declaration order.
    pub fn sub_commands(&self) -> &[Command] {
        &self.sub_commands
    }

    /// Returns `true` if `name` is the canonical name or an alias.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Finds a direct child by name or alias.
    pub fn sub_command(&self, name: &str) -> Option<&Command> {
        self.sub_commands.iter().find(|c| c.has_name(name))
    }

    /// Finds a descendant by a path of names, starting below this command.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        path.iter()
            .try_fold(self, |command, name| command.sub_command(name.as_ref()))
    }

    /// Resolves the deepest command named by the leading arguments.
    ///
    /// The first argument may name this command itself; after that each
    /// argument must name a child of the command reached so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixargs_core::Command;
    ///
    /// let mut git = Command::simple("git", "", &[]);
    /// git.new_simple_sub_command("remote", "", &[]);
    ///
    /// let leaf = git.leaf_command(&["remote", "xxx"]);
    /// assert_eq!(leaf.path, ["remote"]);
    /// assert_eq!(leaf.inferred.name(), "remote");
    /// assert!(leaf.explicit.is_some());
    ///
    /// let leaf = git.leaf_command(&["xxx"]);
    /// assert!(leaf.explicit.is_none());
    /// assert_eq!(leaf.inferred.name(), "git");
    /// ```
    pub fn leaf_command<S: AsRef<str>>(&self, args: &[S]) -> LeafMatch<'_> {
        let mut explicit = None;
        let mut inferred = self;
        let mut path = Vec::new();

        for (i, arg) in args.iter().enumerate() {
            let arg = arg.as_ref();
            if i == 0 && inferred.has_name(arg) {
                explicit = Some(self);
            } else if let Some(sub) = inferred.sub_command(arg) {
                explicit = Some(sub);
                inferred = sub;
            } else {
                break;
            }
            path.push(inferred.name().to_string());
        }

        LeafMatch {
            explicit,
            inferred,
            path,
        }
    }

    /// Resolves the command for the specified arguments and selects the
    /// option arguments of both inputs.
    ///
    /// Config arguments are kept after their own path when they resolve to
    /// the same command, dropped when they explicitly name a different one,
    /// and passed through whole when they name no command at all.
    fn extract_option_args<'s, 'a, 'c, S, C>(
        &'s self,
        specified: &'a [S],
        config: &'c [C],
    ) -> (&'s Command, Vec<String>, &'a [S], &'c [C])
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let specified_leaf = self.leaf_command(specified);
        let config_leaf = self.leaf_command(config);

        let specified_args = &specified[specified_leaf.path.len()..];
        let config_args = if std::ptr::eq(specified_leaf.inferred, config_leaf.inferred) {
            &config[config_leaf.path.len()..]
        } else if config_leaf.explicit.is_some() {
            &config[..0]
        } else {
            config
        };

        debug!(
            path = ?specified_leaf.path,
            config_path = ?config_leaf.path,
            config_args = config_args.len(),
            "Resolved command"
        );
        (
            specified_leaf.inferred,
            specified_leaf.path,
            specified_args,
            config_args,
        )
    }

    /// Parses the first group of arguments for the resolved command.
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
        let (command, path, specified_args, config_args) = self.extract_option_args(specified, config);
        let mut result = command
            .options
            .parse_with_env(specified_args, config_args, env);
        result.commands = path;
        result
    }

    /// Parses every argument group for the resolved command.
    pub fn parse_groups<S, C>(&self, specified: &[S], config: &[C]) -> Vec<ParseResult>
    where
        S: AsRef<str>,
        C: AsRef<str>,
    {
        self.parse_groups_with_env(specified, config, &EnvValues::new())
    }

    /// Like [`parse_groups`](Self::parse_groups), with an environment overlay.
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
        let (command, path, specified_args, config_args) = self.extract_option_args(specified, config);
        let mut results = command
            .options
            .parse_groups_with_env(specified_args, config_args, env);
        for result in &mut results {
            result.commands = path.clone();
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    fn git_command() -> Command {
        let mut git = Command::simple("git", "A version control tool", &[]);
        git.options_mut().add_flag("version", "--version", "").unwrap();

        git.new_simple_sub_command("remote", "manage remotes", &[])
            .new_simple_sub_command("set-url", "set remote url", &[])
            .options_mut()
            .add_flag("push", "--push", "")
            .unwrap();

        let reset = git.new_simple_sub_command("reset", "reset command", &["rs"]);
        reset.options_mut().add_flag("hard", "--hard", "").unwrap();
        reset.options_mut().add_flag("soft", "--soft", "").unwrap();
        git
    }

    #[test]
    fn test_parse_full_path() {
        let git = git_command();
        let args = ["git", "remote", "set-url", "--push", "origin", "url"];
        let result = git.parse(&args, NONE);
        assert_eq!(result.commands(), ["git", "remote", "set-url"]);
        assert!(result.has_flag_key("push"));
        assert_eq!(result.rests(), ["origin", "url"]);
    }

    #[test]
    fn test_parse_broken_path() {
        let git = git_command();
        let args = ["git", "remote", "xxx", "set-url", "origin", "url"];
        let result = git.parse(&args, NONE);
        assert_eq!(result.commands(), ["git", "remote"]);
        assert_eq!(result.rests(), ["xxx", "set-url", "origin", "url"]);
    }

    #[test]
    fn test_alias_records_canonical_name() {
        let git = git_command();
        let result = git.parse(&["git", "rs", "--hard"], NONE);
        assert_eq!(result.commands(), ["git", "reset"]);
        assert!(result.has_flag_key("hard"));
    }

    #[test]
    fn test_root_flags_without_root_name() {
        let git = git_command();
        let result = git.parse(&["--version"], NONE);
        assert!(result.commands().is_empty());
        assert!(result.has_flag_key("version"));
    }

    #[test]
    fn test_config_same_leaf_strips_path() {
        let git = git_command();
        let result = git.parse(&["git", "reset"], &["git", "reset", "--soft"]);
        assert!(result.has_config_key("soft"));
        assert!(result.config_rests().is_empty());
    }

    #[test]
    fn test_config_other_leaf_is_dropped() {
        let git = git_command();
        let result = git.parse(&["git", "reset"], &["remote", "set-url", "--push"]);
        assert!(!result.has_key("push"));
        assert!(result.config_undefined_flags().is_empty());
    }

    #[test]
    fn test_config_without_command_passes_through() {
        let git = git_command();
        let result = git.parse(&["git", "reset"], &["--hard"]);
        assert!(result.has_config_key("hard"));
        assert!(!result.has_flag_key("hard"));
    }

    #[test]
    fn test_parse_groups_sets_path_on_every_result() {
        let git = git_command();
        let results = git.parse_groups(&["reset", "--hard", ",,", "--soft"], NONE);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.commands() == ["reset"]));
        assert!(results[1].has_flag_key("soft"));
    }

    #[test]
    fn test_parse_groups_no_arguments() {
        let git = git_command();
        let results = git.parse_groups(NONE, NONE);
        assert_eq!(results.len(), 1);
        assert!(results[0].commands().is_empty());
    }

    #[test]
    fn test_find_by_path() {
        let git = git_command();
        assert_eq!(git.find(&["remote", "set-url"]).map(Command::name), Some("set-url"));
        assert!(git.find(&["remote", "nope"]).is_none());
        assert_eq!(git.find(NONE).map(Command::name), Some("git"));
    }
}
