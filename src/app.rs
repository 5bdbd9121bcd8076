//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - dispatches to the TUI or the one-shot `table` command

use clap::Parser;

use crate::app::state::{Action, ViewState};
use crate::cli::{Command, TableArgs, TuiArgs};
use crate::data::FmpClient;
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod state;

/// Entry point for the `fins` binary.
pub fn run() -> Result<(), AppError> {
    // `fins` and `fins -s MSFT` behave like `fins tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Table(args) => handle_table(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let target = match &args.common.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Off,
    };
    crate::logging::init(&target)?;
    crate::tui::run(&args.common.symbol)
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let target = match &args.common.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Stderr,
    };
    crate::logging::init(&target)?;

    let client = FmpClient::from_env(&args.common.symbol)?;
    let records = client.fetch()?;

    let mut state = ViewState::new();
    state.dispatch(Action::FetchCompleted(Ok(records)));
    state.draft = args.constraints();
    state.dispatch(Action::ApplyFilters);
    if args.sort_by.is_some() {
        state.dispatch(Action::ApplySort);
    }

    print!(
        "{}",
        crate::report::format_summary(
            client.symbol(),
            state.records().len(),
            state.displayed().len(),
            &state.applied().filters,
            state.applied().sort,
        )
    );
    println!();
    print!("{}", crate::report::format_table(&crate::report::table_rows(state.displayed())));

    if args.chart {
        println!();
        let chart = crate::report::chart_series(state.displayed());
        print!("{}", crate::plot::render_ascii_chart(&chart, args.width, args.height));
    }

    if let Some(path) = &args.export {
        crate::io::write_records(path, state.displayed())?;
        println!("Exported {} records to {}", state.displayed().len(), path.display());
    }

    Ok(())
}

/// Rewrite argv so `fins` defaults to `fins tui`.
///
/// Rules:
/// - `fins`                      -> `fins tui`
/// - `fins -s MSFT ...`          -> `fins tui -s MSFT ...`
/// - `fins --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "table");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_tui() {
        assert_eq!(rewrite_args(argv(&["fins"])), argv(&["fins", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["fins", "-s", "MSFT"])),
            argv(&["fins", "tui", "-s", "MSFT"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        for args in [&["fins", "table", "--chart"][..], &["fins", "--help"], &["fins", "tui"]] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }
}
