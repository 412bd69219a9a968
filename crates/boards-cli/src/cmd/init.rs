use crate::output::{OutputMode, render};
use anyhow::{Context as _, Result};
use boards_core::store::Store;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing snapshot with the sample boards.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "[defaults]\n\
    board_title = \"Nouveau Tableau\"\n\
    group_title = \"Nouveau Groupe\"\n\
    group_color = \"#579bfc\"\n\
    item_name = \"Nouvel élément\"\n\
    \n\
    [store]\n\
    lock_timeout_ms = 2000\n";

#[derive(Debug, Serialize)]
struct InitReport {
    path: String,
    boards: usize,
    config_written: bool,
}

/// Execute `brd init`. Creates the project skeleton:
///
/// ```text
/// .boards/
///   boards.json   (sample boards)
///   config.toml   (default project config, kept if present)
/// ```
///
/// # Errors
///
/// Returns an error if a snapshot already exists and `--force` is not set,
/// or if any filesystem operation fails.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let store = Store::init(project_root, args.force)?;

    let config_path = store.dir().join("config.toml");
    let config_written = !config_path.exists();
    if config_written {
        std::fs::write(&config_path, CONFIG_TOML)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
    }

    let report = InitReport {
        path: store.dir().display().to_string(),
        boards: store.load()?.len(),
        config_written,
    };

    render(output, &report, |report, w| {
        writeln!(w, "✓ Initialized {} with {} sample boards.", report.path, report.boards)?;
        writeln!(w)?;
        writeln!(w, "Next steps:")?;
        writeln!(w, "  brd boards")?;
        writeln!(w, "  brd show b1")
    })
}
