use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use nixargs_config::{CommandManifest, load_config_args};
use nixargs_core::{EnvValues, ParseResult};
use serde::Serialize;
use tracing::{debug, warn};

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "nixargs", version, disable_help_subcommand = true)]
#[command(about = "Parse argument lists against a declarative command manifest")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Parse arguments and print the resolved values.
    Parse(ParseArgs),
    /// Print help for a command in the manifest.
    Help(HelpArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Path to the command manifest (YAML, or JSON with a .json extension).
    #[arg(long)]
    manifest: PathBuf,
    /// File holding config arguments (YAML/JSON list or one per line).
    #[arg(long)]
    config_args: Option<PathBuf>,
    /// Print one result per argument group.
    #[arg(long)]
    groups: bool,
    /// Resolve the manifest's environment bindings from the process environment.
    #[arg(long)]
    env: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Exit with status 2 when ambiguous or undefined flags are found.
    #[arg(long)]
    strict: bool,
    /// Arguments to parse, after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Path to the command manifest.
    #[arg(long)]
    manifest: PathBuf,
    /// Command path, optionally starting with the root command's name.
    path: Vec<String>,
}

/// How a successful run ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Clean,
    Diagnostics,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        CliCommand::Parse(args) => run_parse(args),
        CliCommand::Help(args) => run_help(args).map(|()| Outcome::Clean),
    };

    match result {
        Ok(Outcome::Clean) => {}
        Ok(Outcome::Diagnostics) => std::process::exit(2),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ---------------------------------------------------------------------------
// parse command
// ---------------------------------------------------------------------------

fn run_parse(args: ParseArgs) -> Result<Outcome, String> {
    let manifest = load_manifest(&args.manifest)?;
    let command = manifest.build().map_err(|e| e.to_string())?;

    let config = match &args.config_args {
        Some(path) => load_config_args(path)
            .map_err(|e| format!("Failed to load config arguments '{}': {e}", path.display()))?,
        None => Vec::new(),
    };

    let env = if args.env {
        let path = command.leaf_command(&args.args).path;
        manifest
            .env_bindings(&path)
            .map_err(|e| e.to_string())?
            .resolve_from_process()
    } else {
        EnvValues::new()
    };
    debug!(
        args = args.args.len(),
        config_args = config.len(),
        env_keys = env.len(),
        "Parsing"
    );

    let results = if args.groups {
        command.parse_groups_with_env(&args.args, &config, &env)
    } else {
        vec![command.parse_with_env(&args.args, &config, &env)]
    };

    let output = if args.groups {
        format_output(&results, args.format)?
    } else {
        format_output(&results[0], args.format)?
    };
    println!("{output}");

    let diagnostics = diagnostics(&results);
    if diagnostics.is_empty() {
        return Ok(Outcome::Clean);
    }
    if args.strict {
        for line in &diagnostics {
            eprintln!("error: {line}");
        }
        return Ok(Outcome::Diagnostics);
    }
    for line in &diagnostics {
        warn!("{line}");
    }
    Ok(Outcome::Clean)
}

fn format_output<T: Serialize + ?Sized>(value: &T, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
        }
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// One line per kind of diagnostic per group, specified before config.
fn diagnostics(results: &[ParseResult]) -> Vec<String> {
    let mut lines = Vec::new();
    for result in results {
        let kinds = [
            ("ambiguous flags", result.ambiguous_flags()),
            ("undefined flags", result.undefined_flags()),
            ("ambiguous config flags", result.config_ambiguous_flags()),
            ("undefined config flags", result.config_undefined_flags()),
        ];
        for (label, flags) in kinds {
            if !flags.is_empty() {
                lines.push(format!("{label}: {}", flags.join(", ")));
            }
        }
    }
    lines
}

// ---------------------------------------------------------------------------
// help command
// ---------------------------------------------------------------------------

fn run_help(args: HelpArgs) -> Result<(), String> {
    let command = load_manifest(&args.manifest)?
        .build()
        .map_err(|e| e.to_string())?;

    let leaf = command.leaf_command(&args.path);
    if leaf.path.len() != args.path.len() {
        return Err(format!("unknown command: {}", args.path.join(" ")));
    }
    print!("{}", leaf.inferred.help());
    Ok(())
}

fn load_manifest(path: &Path) -> Result<CommandManifest, String> {
    CommandManifest::load(path)
        .map_err(|e| format!("Failed to load manifest '{}': {e}", path.display()))
}
