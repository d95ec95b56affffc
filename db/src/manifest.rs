//! Declarative command trees.
//!
//! A manifest describes commands, their options and the environment variables
//! bound to each option. It is loaded from YAML or JSON and turned into a
//! [`Command`] with [`CommandManifest::build`].
//!
//! # Example YAML
//!
//! ```yaml
//! names: [git]
//! summary: A version control tool
//! options:
//!   - key: version
//!     flags: [--version]
//! sub_commands:
//!   - names: [remote]
//!     sub_commands:
//!       - names: [set-url]
//!         options:
//!           - key: push
//!             flags: [--push]
//!           - key: name
//!             flags: [-n, --name]
//!             accepts_value: true
//!             env: [GIT_REMOTE_NAME]
//! ```

use std::io::BufWriter;
use std::path::Path;

use nixargs_core::{ArgOption, Command, Flag, ParserSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::env::EnvBindings;
use crate::error::{ConfigError, Result};

/// One option of a [`CommandManifest`].
///
/// `multi_value` implies `accepts_value`.
///
/// # Examples
///
/// ```
/// use nixargs_config::OptionManifest;
///
/// let yaml = "key: include\nflags: [-I, --include]\nmulti_value: true\ndelimiters: ','";
/// let manifest: OptionManifest = serde_yaml::from_str(yaml).unwrap();
/// let option = manifest.to_option();
/// assert!(option.accepts_value && option.multi_value);
/// assert_eq!(option.delimiters, vec![',']);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionManifest {
    /// Key the parsed values are stored under.
    pub key: String,
    /// Flag spellings.
    pub flags: Vec<String>,
    pub summary: String,
    pub description: String,
    pub accepts_value: bool,
    pub multi_value: bool,
    pub override_previous: bool,
    pub unique_values: bool,
    /// Characters splitting one argument into several values.
    pub delimiters: String,
    pub defaults: Vec<String>,
    /// Environment variables consulted for this option, first set one wins.
    pub env: Vec<String>,
}

impl OptionManifest {
    /// Builds the option described by this entry.
    pub fn to_option(&self) -> ArgOption {
        let mut option = ArgOption::new(&self.key, Flag::from_names(&self.flags))
            .with_summary(&self.summary)
            .with_description(&self.description)
            .with_delimiters(&self.delimiters)
            .with_defaults(&self.defaults);

        if self.multi_value {
            option = option.with_values();
        } else if self.accepts_value {
            option = option.with_value();
        }
        if self.override_previous {
            option = option.override_previous();
        }
        if self.unique_values {
            option = option.unique();
        }
        option
    }
}

/// A command, its options and its subcommands.
///
/// Commands without their own `settings` inherit the parent's; the root
/// falls back to [`ParserSettings::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandManifest {
    /// Canonical name followed by aliases.
    pub names: Vec<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ParserSettings>,
    pub options: Vec<OptionManifest>,
    pub sub_commands: Vec<CommandManifest>,
}

impl CommandManifest {
    /// Loads a manifest, as JSON when the file has a `.json` extension and as
    /// YAML otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Json`] / [`ConfigError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let manifest = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        debug!(path = %path.display(), name = manifest.name(), "Loaded manifest");
        Ok(manifest)
    }

    /// Parses a YAML manifest.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses a JSON manifest.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Saves the manifest as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written, or
    /// [`ConfigError::Yaml`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Canonical name; empty for a nameless command.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Builds the command tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registration`] for the first option that its
    /// option set rejects, such as a duplicate key or flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixargs_config::CommandManifest;
    ///
    /// let manifest = CommandManifest::from_yaml_str(
    ///     "names: [tool]\noptions:\n  - key: verbose\n    flags: [-v, --verbose]\n",
    /// )
    /// .unwrap();
    /// let tool = manifest.build().unwrap();
    ///
    /// let result = tool.parse(&["tool", "-v"], &[] as &[&str]);
    /// assert!(result.has_flag_key("verbose"));
    /// ```
    pub fn build(&self) -> Result<Command> {
        self.build_with(&ParserSettings::default())
    }

    fn build_with(&self, inherited: &ParserSettings) -> Result<Command> {
        let settings = self.settings.as_ref().unwrap_or(inherited);
        let mut command = Command::new(&self.names, &self.summary, settings.clone());

        for option in &self.options {
            command.options_mut().append(option.to_option())?;
        }
        for sub in &self.sub_commands {
            command.add_sub_command(sub.build_with(settings)?);
        }

        debug!(
            name = self.name(),
            options = self.options.len(),
            sub_commands = self.sub_commands.len(),
            "Built command"
        );
        Ok(command)
    }

    /// Finds the manifest for a command path as reported by
    /// [`Command::leaf_command`] or [`ParseResult::commands`]: the first
    /// segment may name this command, every other segment names a child.
    ///
    /// [`ParseResult::commands`]: nixargs_core::ParseResult::commands
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandManifest> {
        let mut current = self;
        for (i, segment) in path.iter().enumerate() {
            let segment = segment.as_ref();
            if i == 0 && self.has_name(segment) {
                continue;
            }
            current = current.sub_commands.iter().find(|c| c.has_name(segment))?;
        }
        Some(current)
    }

    /// Environment bindings of the options of the command at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCommand`] if `path` does not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixargs_config::CommandManifest;
    ///
    /// let yaml = r#"
    /// names: [serve]
    /// options:
    ///   - key: port
    ///     flags: [--port]
    ///     accepts_value: true
    ///     env: [SERVE_PORT, PORT]
    /// "#;
    /// let manifest = CommandManifest::from_yaml_str(yaml).unwrap();
    /// let bindings = manifest.env_bindings(&["serve"]).unwrap();
    ///
    /// let env = bindings.resolve(|name| (name == "PORT").then(|| "8080".to_string()));
    /// assert_eq!(env["port"], vec!["8080"]);
    /// ```
    pub fn env_bindings<S: AsRef<str>>(&self, path: &[S]) -> Result<EnvBindings> {
        let command = self.resolve(path).ok_or_else(|| {
            let path: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
            ConfigError::UnknownCommand(path.join(" "))
        })?;

        let mut bindings = EnvBindings::new();
        for option in command.options.iter().filter(|o| !o.env.is_empty()) {
            bindings.bind(&option.key, &option.env, &option.delimiters);
        }
        Ok(bindings)
    }

    fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}
