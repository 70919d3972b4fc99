//! Reweave CLI
//!
//! Round-trip checking and whitespace formatting for brace-dialect sources

mod commands;
mod files;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use reweave_core::init_tracing_with;
use tracing::error;

#[derive(Parser)]
#[command(name = "reweave")]
#[command(about = "Reweave: lossless parsing and formatting for Java-like sources")]
#[command(version = reweave_core::VERSION)]
#[command(
    long_about = "Reweave parses sources into lossless trees that print back byte for byte,\n\
and reformats whitespace without touching anything else.\n\
\n\
Examples:\n  \
reweave check src/           # Verify every file round-trips\n  \
reweave fmt --check .        # Report files that need formatting\n  \
reweave fmt --diff Foo.java  # Show what formatting would change\n  \
reweave config init          # Write a reweave.toml with the defaults"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (reweave.toml/.reweaverc.json/.reweaverc.yaml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that parsing and printing reproduces each file exactly
    Check {
        /// Files or directories to check
        #[arg(help = "Files or directories to check (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Include patterns (glob syntax)
        #[arg(long, help = "Include files matching pattern (can be used multiple times)")]
        include: Vec<String>,

        /// Exclude patterns (glob syntax)
        #[arg(long, help = "Exclude files matching pattern (can be used multiple times)")]
        exclude: Vec<String>,
    },

    /// Format brace-dialect sources
    #[command(alias = "format")]
    Fmt {
        /// Files or directories to format
        #[arg(help = "Files or directories to format (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Check formatting without modifying files
        #[arg(long, help = "Check if files are formatted correctly without modifying them")]
        check: bool,

        /// Show a diff of proposed changes without applying them
        #[arg(long, help = "Show diff of proposed formatting changes", conflicts_with = "check")]
        diff: bool,

        /// Include patterns (glob syntax)
        #[arg(long, help = "Include files matching pattern (can be used multiple times)")]
        include: Vec<String>,

        /// Exclude patterns (glob syntax)
        #[arg(long, help = "Exclude files matching pattern (can be used multiple times)")]
        exclude: Vec<String>,

        /// Indentation size
        #[arg(long, help = "Number of columns per indentation level")]
        indent_size: Option<usize>,

        /// Indent with tabs
        #[arg(long, help = "Indent with tab characters")]
        use_tabs: bool,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a configuration file holding the default styles
    Init {
        /// Configuration file format
        #[arg(long, default_value = "toml", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Show the configuration in effect
    Show {
        /// Show every style setting, including defaults
        #[arg(long, help = "Show the resolved styles including defaults")]
        resolved: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: search for reweave.toml)")]
        path: Option<PathBuf>,
    },

    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    let log_level = match cli.verbose {
        0 => "reweave=warn",
        1 => "reweave=info",
        2 => "reweave=debug",
        _ => "reweave=trace",
    };
    init_tracing_with(log_level, cli.json);

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        return ExitCode::FAILURE;
    }

    match run_command(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("reweave failed: {:#}", e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the selected command; `Ok(false)` means it completed but found problems
fn run_command(cli: Cli) -> anyhow::Result<bool> {
    let default_paths = |paths: Vec<PathBuf>| {
        if paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            paths
        }
    };

    match cli.command {
        Some(Commands::Check {
            paths,
            include,
            exclude,
        }) => commands::check_command(default_paths(paths), include, exclude, cli.config),

        Some(Commands::Fmt {
            paths,
            check,
            diff,
            include,
            exclude,
            indent_size,
            use_tabs,
        }) => commands::format_command(commands::FormatOptions {
            paths: default_paths(paths),
            check,
            diff,
            include,
            exclude,
            indent_size,
            use_tabs,
            config_path: cli.config,
        }),

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config_init_command(format, force),
            ConfigAction::Show { resolved } => commands::config_show_command(resolved, cli.config),
            ConfigAction::Validate { path } => commands::config_validate_command(path.or(cli.config)),
            ConfigAction::Schema => commands::config_schema_command(),
        },

        None => {
            Cli::command().print_help()?;
            Ok(true)
        }
    }
}
