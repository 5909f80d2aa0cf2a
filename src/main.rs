//! pi-sync CLI
//!
//! Command-line interface for syncing a skillz repository into a pi agent
//! directory.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use commands::list::ListArgs;
use commands::status::StatusArgs;
use commands::sync::{IgnoredArgs, ItemArgs};
use pi_sync::output::Console;
use pi_sync::{Category, Paths, SyncOptions};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "PI_SYNC_LOG";

const EXAMPLES: &str = "\
Examples:
  pi-sync all                       Sync everything
  pi-sync extensions                Sync all extensions
  pi-sync skills pexpect-cli        Sync a specific skill
  pi-sync skills superpowers        Sync every skill in the superpowers collection
  pi-sync agents                    Sync all agent definitions
  pi-sync prompts                   Sync all workflow prompts
  pi-sync themes catppuccin-mocha   Sync a specific theme
  pi-sync config                    Sync AGENTS.md and SYSTEM.md
  pi-sync --copy all                Copy instead of symlink
  pi-sync status                    Show what is currently synced";

#[derive(Parser)]
#[command(name = "pi-sync")]
#[command(
    author,
    version,
    about = "Sync a skillz repository to ~/.pi/agent using symbolic links or copies"
)]
#[command(after_help = EXAMPLES)]
#[command(propagate_version = true)]
struct Cli {
    /// Copy files instead of symlinking
    #[arg(short, long, global = true)]
    copy: bool,

    /// Overwrite existing files
    #[arg(short, long, global = true)]
    force: bool,

    /// Show what would be done without doing it
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the skillz repository (default: current directory)
    #[arg(long, env = "SKILLZ_DIR", global = true, value_name = "DIR")]
    skillz_dir: Option<PathBuf>,

    /// Path to the pi agent directory (default: ~/.pi/agent)
    #[arg(long, env = "PI_AGENT_DIR", global = true, value_name = "DIR")]
    agent_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync extensions (all if no names given)
    Extensions(ItemArgs),

    /// Sync skills (all if no names given; a collection name syncs its members)
    Skills(ItemArgs),

    /// Sync agent definitions (all if no names given)
    Agents(ItemArgs),

    /// Sync workflow prompts (all if no names given)
    Prompts(ItemArgs),

    /// Sync themes (all if no names given)
    Themes(ItemArgs),

    /// Sync config files (AGENTS.md, SYSTEM.md)
    Config(IgnoredArgs),

    /// Sync everything
    All(IgnoredArgs),

    /// List available items
    List(ListArgs),

    /// Show what is currently synced
    Status(StatusArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let console = Console::new(cli.quiet);
    let Some(command) = cli.command else {
        // Help output is best effort; the exit code already signals misuse.
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    };

    let options = SyncOptions {
        use_symlink: !cli.copy,
        force: cli.force,
        dry_run: cli.dry_run,
        quiet: cli.quiet,
    };

    match run(command, cli.skillz_dir, cli.agent_dir, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console.error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: Commands,
    skillz_dir: Option<PathBuf>,
    agent_dir: Option<PathBuf>,
    options: SyncOptions,
) -> Result<()> {
    let paths = Paths::resolve(skillz_dir, agent_dir)?;
    paths.ensure_source_root()?;

    tracing::debug!(
        skillz_dir = %paths.skillz_dir.display(),
        agent_dir = %paths.agent_dir.display(),
        ?options,
        "Resolved paths"
    );

    match command {
        Commands::Extensions(args) => commands::sync::run_sync(Category::Extension, args, paths, options),
        Commands::Skills(args) => commands::sync::run_sync(Category::Skill, args, paths, options),
        Commands::Agents(args) => commands::sync::run_sync(Category::Agent, args, paths, options),
        Commands::Prompts(args) => commands::sync::run_sync(Category::Prompt, args, paths, options),
        Commands::Themes(args) => commands::sync::run_sync(Category::Theme, args, paths, options),
        Commands::Config(args) => commands::sync::run_config(args, paths, options),
        Commands::All(args) => commands::sync::run_all(args, paths, options),
        Commands::List(args) => commands::list::run_list(args, &paths, options),
        Commands::Status(args) => commands::status::run_status(args, &paths, options),
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "pi_sync=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
