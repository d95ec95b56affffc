//! Declarative command definitions and external argument sources for
//! [`nixargs_core`].
//!
//! - [`CommandManifest`] describes a command tree in YAML or JSON and builds
//!   a ready-to-parse [`Command`](nixargs_core::Command).
//! - [`load_config_args`] reads config arguments from a file.
//! - [`EnvBindings`] maps option keys to environment variables and resolves
//!   them into the overlay accepted by `parse_with_env`.
//!
//! # Quick start
//!
//! ```no_run
//! use nixargs_config::{CommandManifest, load_config_args};
//!
//! let manifest = CommandManifest::load("git.yaml").unwrap();
//! let git = manifest.build().unwrap();
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! let config = load_config_args("git.args").unwrap();
//! let path = git.leaf_command(&args).path;
//! let env = manifest.env_bindings(&path).unwrap().resolve_from_process();
//!
//! let result = git.parse_with_env(&args, &config, &env);
//! println!("{:?}", result.commands());
//! ```

mod args_file;
mod env;
mod error;
mod manifest;

pub use args_file::{load_config_args, parse_config_args};
pub use env::{EnvBinding, EnvBindings};
pub use error::{ConfigError, Result};
pub use manifest::{CommandManifest, OptionManifest};
