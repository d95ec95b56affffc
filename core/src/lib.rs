//! Command-line argument parsing engine.
//!
//! This crate turns raw argument lists into option values, positional rests
//! and diagnostics:
//!
//! - [`Flag`] — one spelling of an option (`-v`, `--verbose`) with the
//!   capabilities that control merging and value splitting.
//! - [`ArgOption`] — a logical setting identified by a key, bound to flags.
//! - [`OptionSet`] — a registry of options plus [`ParserSettings`]; owns the
//!   tokenize → rewrite → walk pipeline.
//! - [`Command`] — a tree of subcommands, each with its own option set.
//! - [`ParseResult`] — values resolved with the precedence
//!   specified → environment → config → default.
//!
//! Two inputs are parsed side by side: the specified arguments from the
//! invocation and config arguments from any other source. Both may be split
//! into groups by a separator (`,,` by default) to describe repeated
//! parameter sets in one invocation.
//!
//! # Example
//!
//! ```
//! use nixargs_core::*;
//!
//! let mut set = OptionSet::new();
//! set.add_flag("a", "-a", "").unwrap();
//! set.add_flag("b", "-b", "").unwrap();
//! set.add_flag_value("c", "-c", "", "").unwrap();
//! set.add_flag("one", "--foo-one", "").unwrap();
//! set.add_flag("two", "--foo-two", "").unwrap();
//!
//! let result = set.parse(&["-abcVALUE", "--foo", "file"], &[] as &[&str]);
//! assert!(result.has_flag_key("a") && result.has_flag_key("b"));
//! assert_eq!(result.value("c"), Some("VALUE"));
//! assert_eq!(result.ambiguous_flags(), ["--foo"]);
//! assert!(result.rests().is_empty()); // "file" belongs to the ambiguous flag
//! ```

mod command;
mod error;
mod help;
mod option_set;
mod parse;
mod result;
mod rewrite;
mod token;
mod types;
mod walk;

pub use command::{Command, LeafMatch};
pub use error::{RegistrationError, ValueError};
pub use option_set::{OptionSet, PrefixMatch};
pub use result::{EnvValues, ParseResult};
pub use types::*;
