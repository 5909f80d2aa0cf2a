use anyhow::Result;
use clap::Args;
use pi_sync::{Category, Linker, Paths, SyncOptions};

/// Item names for a sync command
#[derive(Args, Debug, Default)]
pub struct ItemArgs {
    /// Names to sync (all items when omitted)
    #[arg(value_name = "NAME")]
    pub items: Vec<String>,
}

/// Trailing names accepted and ignored by commands that always act on
/// every item
#[derive(Args, Debug, Default)]
pub struct IgnoredArgs {
    #[arg(hide = true, value_name = "NAME")]
    pub items: Vec<String>,
}

impl IgnoredArgs {
    fn log_ignored(&self, command: &str) {
        if !self.items.is_empty() {
            tracing::debug!(command, items = ?self.items, "Ignoring item names");
        }
    }
}

/// Sync one category. Per-item failures are reported as warnings and never
/// change the exit status.
pub fn run_sync(
    category: Category,
    args: ItemArgs,
    paths: Paths,
    options: SyncOptions,
) -> Result<()> {
    let linker = Linker::new(paths, options);
    let result = linker.sync_category(category, &args.items);
    tracing::debug!(%category, ?result, "Sync finished");
    Ok(())
}

/// Sync the config files. Names are ignored; both files are always considered.
pub fn run_config(args: IgnoredArgs, paths: Paths, options: SyncOptions) -> Result<()> {
    args.log_ignored("config");
    run_sync(Category::Config, ItemArgs::default(), paths, options)
}

/// Sync every category in order.
pub fn run_all(args: IgnoredArgs, paths: Paths, options: SyncOptions) -> Result<()> {
    args.log_ignored("all");
    let linker = Linker::new(paths, options);
    let result = linker.sync_all();
    tracing::debug!(?result, "Sync finished");
    Ok(())
}
