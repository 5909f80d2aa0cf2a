use anyhow::Result;
use clap::Args;
use pi_sync::output::Console;
use pi_sync::report::{collect_status, render_status};
use pi_sync::{Paths, SyncOptions};

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Show what is synced into the agent directory, re-scanned from disk.
pub fn run_status(args: StatusArgs, paths: &Paths, options: SyncOptions) -> Result<()> {
    let sections = collect_status(paths);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
    } else {
        render_status(&Console::new(options.quiet), &sections);
    }

    Ok(())
}
