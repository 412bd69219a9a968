#![forbid(unsafe_code)]

mod cmd;
mod output;

use boards_core::config::resolve_config;
use boards_core::error::ErrorCode;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "brd: project boards with drag-and-drop groups, items and due-date alerts",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format: pretty, text or json. Overrides --json and FORMAT.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// PIN that opens a locked board for this command.
    #[arg(long, global = true)]
    pin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Output mode before any config has been read.
    fn flag_output_mode(&self) -> OutputMode {
        match (self.format, self.json) {
            (Some(mode), _) => mode,
            (None, true) => OutputMode::Json,
            (None, false) => OutputMode::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Create a .boards directory with the starter snapshot",
        after_help = "EXAMPLES:\n    # Initialize the current directory\n    brd init\n\n    # Reset an existing snapshot to the starter boards\n    brd init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Read",
        about = "List boards",
        after_help = "EXAMPLES:\n    brd boards\n\n    # Machine-readable\n    brd boards --json"
    )]
    Boards,

    #[command(
        next_help_heading = "Read",
        about = "Show a board with its groups and items",
        after_help = "EXAMPLES:\n    brd show b1\n\n    # Locked board\n    brd show b1 --pin 1234"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "List overdue items and items due today or tomorrow",
        after_help = "EXAMPLES:\n    brd alerts\n\n    # As of a given day\n    brd alerts --today 2026-10-05"
    )]
    Alerts(cmd::alerts::AlertsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show a board's dated items on a month, week or day grid",
        after_help = "EXAMPLES:\n    brd calendar b1\n\n    # Next week\n    brd calendar b1 --view week --offset 1\n\n    # A specific day\n    brd calendar b1 --view day --date 2026-11-15"
    )]
    Calendar(cmd::calendar::CalendarArgs),

    #[command(next_help_heading = "Edit", about = "Create, rename or delete boards")]
    Board {
        #[command(subcommand)]
        command: cmd::board::BoardCommand,
    },

    #[command(next_help_heading = "Edit", about = "Create, update or delete groups")]
    Group {
        #[command(subcommand)]
        command: cmd::group::GroupCommand,
    },

    #[command(next_help_heading = "Edit", about = "Create, update or delete items")]
    Item {
        #[command(subcommand)]
        command: cmd::item::ItemCommand,
    },

    #[command(
        next_help_heading = "Drag and drop",
        about = "Drop one group onto another",
        after_help = "EXAMPLES:\n    # Move g2 to where g1 is\n    brd reorder b1 g2 g1"
    )]
    Reorder(cmd::gesture::ReorderArgs),

    #[command(
        next_help_heading = "Drag and drop",
        about = "Drop an item onto another item or group",
        after_help = "EXAMPLES:\n    # Reorder inside g1\n    brd move b1 i2 --over i1 --from g1\n\n    # Move into g2 next to i3\n    brd move b1 i1 --over i3 --from g1\n\n    # Drop onto an empty group\n    brd move b1 i1 --over g3 --from g1 --over-group g3"
    )]
    Move(cmd::gesture::MoveArgs),

    #[command(
        next_help_heading = "Drag and drop",
        about = "Replay a raw drag-end event",
        after_help = "EXAMPLES:\n    # Item dropped on an item\n    brd drag b1 --active i1 --kind item --from g1 --over i3\n\n    # Group dropped on a group\n    brd drag b1 --active g2 --kind group --over g1 --over-kind group"
    )]
    Drag(cmd::gesture::DragArgs),

    #[command(
        next_help_heading = "Security",
        about = "Protect a board with a four-digit PIN",
        after_help = "EXAMPLES:\n    brd lock b2 1234\n\n    # Change an existing PIN\n    brd lock b2 5678 --pin 1234"
    )]
    Lock(cmd::pin::LockArgs),

    #[command(
        next_help_heading = "Security",
        about = "Remove a board's PIN",
        after_help = "EXAMPLES:\n    brd unlock b2 --pin 1234"
    )]
    Unlock(cmd::pin::UnlockArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    brd completions bash > ~/.local/share/bash-completion/completions/brd"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BOARDS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "boards_core=debug,brd=debug,info"
        } else {
            "boards_core=info,brd=info,warn"
        })
    });

    let format = env::var("BOARDS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, ctx: &cmd::Context) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init(args) => cmd::init::run_init(&args, ctx.output, &ctx.root),
        Commands::Boards => cmd::list::run_boards(ctx),
        Commands::Show(args) => cmd::show::run_show(&args, ctx),
        Commands::Alerts(args) => cmd::alerts::run_alerts(&args, ctx),
        Commands::Calendar(args) => cmd::calendar::run_calendar(&args, ctx),
        Commands::Board { command } => cmd::board::run_board(&command, ctx),
        Commands::Group { command } => cmd::group::run_group(&command, ctx),
        Commands::Item { command } => cmd::item::run_item(&command, ctx),
        Commands::Reorder(args) => cmd::gesture::run_reorder(&args, ctx),
        Commands::Move(args) => cmd::gesture::run_move(&args, ctx),
        Commands::Drag(args) => cmd::gesture::run_drag(&args, ctx),
        Commands::Lock(args) => cmd::pin::run_lock(&args, ctx),
        Commands::Unlock(args) => cmd::pin::run_unlock(&args, ctx),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(&args, &mut command)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    boards_core::init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let fallback_mode = cli.flag_output_mode();
    let project_root = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            let _ = render_error(fallback_mode, &CliError::new(err.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let config = match resolve_config(&project_root, cli.json) {
        Ok(config) => config,
        Err(err) => {
            let code = ErrorCode::ConfigParseError;
            let error = CliError::with_details(
                format!("{err:#}"),
                code.hint().unwrap_or_default(),
                code.code(),
            );
            let _ = render_error(fallback_mode, &error);
            return ExitCode::FAILURE;
        }
    };

    let ctx = cmd::Context {
        root: project_root,
        output: resolve_output_mode(cli.format, &config.resolved_output),
        project: config.project,
        pin: cli.pin.clone(),
    };

    match run(cli, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = render_error(ctx.output, &CliError::from_anyhow(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["brd", "--json", "boards"]);
        assert!(cli.json);
        assert!(cli.flag_output_mode().is_json());
        assert!(matches!(cli.command, Commands::Boards));
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["brd", "show", "b1", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Show(_)));
    }

    #[test]
    fn format_flag_overrides_json() {
        let cli = Cli::parse_from(["brd", "--json", "--format", "text", "boards"]);
        assert_eq!(cli.flag_output_mode(), OutputMode::Text);
    }

    #[test]
    fn default_output_is_text_before_config() {
        let cli = Cli::parse_from(["brd", "boards"]);
        assert_eq!(cli.flag_output_mode(), OutputMode::Text);
    }

    #[test]
    fn pin_flag_is_global() {
        let cli = Cli::parse_from(["brd", "show", "b2", "--pin", "1234"]);
        assert_eq!(cli.pin.as_deref(), Some("1234"));
    }

    #[test]
    fn board_subcommands_parse() {
        let cli = Cli::parse_from(["brd", "board", "rename", "b1", "Roadmap 2027"]);
        assert!(matches!(
            cli.command,
            Commands::Board {
                command: cmd::board::BoardCommand::Rename { .. }
            }
        ));
    }

    #[test]
    fn item_update_parses_status_and_date() {
        let cli = Cli::parse_from([
            "brd", "item", "update", "b1", "g1", "i1", "--status", "done", "--date", "2026-11-15",
        ]);
        let Commands::Item {
            command: cmd::item::ItemCommand::Update(args),
        } = cli.command
        else {
            panic!("expected item update");
        };
        assert_eq!(args.status, Some(boards_core::model::Status::Done));
        assert_eq!(args.date.as_deref(), Some("2026-11-15"));
    }

    #[test]
    fn item_update_rejects_date_with_clear_date() {
        let result = Cli::try_parse_from([
            "brd",
            "item",
            "update",
            "b1",
            "g1",
            "i1",
            "--date",
            "2026-11-15",
            "--clear-date",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn move_parses_over_and_from() {
        let cli = Cli::parse_from(["brd", "move", "b1", "i1", "--over", "i3", "--from", "g1"]);
        let Commands::Move(args) = cli.command else {
            panic!("expected move");
        };
        assert_eq!(args.over, "i3");
        assert_eq!(args.from, "g1");
        assert!(args.over_group.is_none());
    }

    #[test]
    fn drag_over_kind_requires_over() {
        let result = Cli::try_parse_from([
            "brd",
            "drag",
            "b1",
            "--active",
            "g1",
            "--kind",
            "group",
            "--over-kind",
            "group",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn drag_parses_group_kinds() {
        let cli = Cli::parse_from([
            "brd", "drag", "b1", "--active", "g2", "--kind", "group", "--over", "g1",
            "--over-kind", "group",
        ]);
        let Commands::Drag(args) = cli.command else {
            panic!("expected drag");
        };
        assert_eq!(args.kind, boards_core::drag::DragKind::Group);
        assert_eq!(args.over_kind, Some(boards_core::drag::DragKind::Group));
    }

    #[test]
    fn calendar_defaults_to_month() {
        let cli = Cli::parse_from(["brd", "calendar", "b1"]);
        let Commands::Calendar(args) = cli.command else {
            panic!("expected calendar");
        };
        assert_eq!(args.view, boards_core::calendar::CalendarView::Month);
        assert_eq!(args.offset, 0);
    }

    #[test]
    fn calendar_accepts_negative_offset() {
        let cli = Cli::parse_from(["brd", "calendar", "b1", "--view", "week", "--offset", "-2"]);
        let Commands::Calendar(args) = cli.command else {
            panic!("expected calendar");
        };
        assert_eq!(args.offset, -2);
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }
}
