use anyhow::Result;
use clap::Args;
use pi_sync::output::Console;
use pi_sync::report::{collect_available, render_available};
use pi_sync::{Paths, SyncOptions};

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_list(args: ListArgs, paths: &Paths, options: SyncOptions) -> Result<()> {
    let sections = collect_available(paths);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
    } else {
        render_available(&Console::new(options.quiet), &sections);
    }

    Ok(())
}
