//! Plain-text help output.

use std::fmt::Write as _;

use crate::command::Command;
use crate::option_set::OptionSet;
use crate::types::ArgOption;

impl ArgOption {
    /// Renders the help entry for this option.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixargs_core::{ArgOption, Flag};
    ///
    /// let opt = ArgOption::new("ports", Flag::from_names(&["-p", "--ports"]))
    ///     .with_values()
    ///     .with_defaults(&["80", "8080"])
    ///     .with_summary("ports to listen on");
    /// assert_eq!(
    ///     opt.help(),
    ///     "-p|--ports <value> ...\nports to listen on\nDefault: 80, 8080\n"
    /// );
    /// ```
    pub fn help(&self) -> String {
        let mut out = self.flag_names().join("|");

        if self.accepts_value {
            out.push_str(" <value>");
            if self.multi_value {
                out.push_str(" ...");
            }
        }
        for text in [&self.summary, &self.description] {
            if !text.is_empty() {
                out.push('\n');
                out.push_str(text);
            }
        }

        let defaults: Vec<&str> = self
            .default_values
            .iter()
            .map(String::as_str)
            .filter(|d| !d.is_empty())
            .collect();
        if !defaults.is_empty() {
            let _ = write!(out, "\nDefault: {}", defaults.join(", "));
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

impl OptionSet {
    /// Renders help entries for every option, separated by blank lines.
    pub fn help(&self) -> String {
        self.options()
            .iter()
            .map(ArgOption::help)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Command {
    /// Renders the help page for this command.
    pub fn help(&self) -> String {
        let mut out = String::new();

        if !self.name().is_empty() {
            let _ = write!(out, "{}: ", self.name());
        }
        out.push_str(self.summary());
        if out.is_empty() {
            out.push_str("Usage:");
        }
        out.push('\n');

        if self.names().len() > 1 {
            let _ = writeln!(out, "Aliases: {}", self.names()[1..].join(", "));
        }

        let options = self.options().help();
        if !options.is_empty() {
            out.push_str("\nOptions:\n\n");
            out.push_str(&options);
        }

        if !self.sub_commands().is_empty() {
            out.push_str("\nSub commands:\n\n");
            for sub in self.sub_commands() {
                out.push_str(sub.name());
                out.push('\n');
                if !sub.summary().is_empty() {
                    out.push_str(sub.summary());
                    out.push('\n');
                }
                out.push('\n');
            }
        }

        out
    }
}
