mod cli;
mod context;
mod handlers;
mod output;

use banktabs_core::AppConfig;
use banktabs_tui::AppOptions;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use std::path::PathBuf;

/// State file used when neither `--file` nor `BANK_TABS_FILE` is given.
const DEFAULT_FILE: &str = "bank-tabs.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(draws_terminal(&cli.command))?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(std::path::Path::new(path)),
        None => AppConfig::load(),
    };
    let file_path = cli.file.unwrap_or_else(|| DEFAULT_FILE.to_string());

    match cli.command {
        None | Some(Commands::Tui) => {
            banktabs_tui::app::launch(AppOptions {
                state_file: PathBuf::from(file_path),
                inventory_file: cli.inventory.map(PathBuf::from),
                config,
            })
            .await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "bank-tabs", &mut std::io::stdout());
        }
        Some(cmd) => {
            let mut ctx = CliContext::load(&file_path, cli.inventory.as_deref(), &config).await?;

            match cmd {
                Commands::Group(group_cmd) => {
                    handlers::group::handle(&mut ctx, group_cmd.action).await?;
                }
                Commands::Item(item_cmd) => {
                    handlers::item::handle(&mut ctx, item_cmd.action).await?;
                }
                Commands::View { group } => {
                    handlers::view::handle(&ctx, group)?;
                }
                Commands::Tui | Commands::Completions { .. } => {}
            }
        }
    }

    Ok(())
}

/// Whether the command takes over the terminal, so stray log lines would
/// corrupt the screen.
fn draws_terminal(command: &Option<Commands>) -> bool {
    matches!(command, None | Some(Commands::Tui))
}

fn init_tracing(draws_terminal: bool) -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("BANK_TABS_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else if draws_terminal {
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_max_level(tracing::Level::WARN)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_for(args: &[&str]) -> Option<Commands> {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_terminal_commands_keep_logs_off_screen() {
        assert!(draws_terminal(&command_for(&["bank-tabs"])));
        assert!(draws_terminal(&command_for(&["bank-tabs", "tui"])));
    }

    #[test]
    fn test_json_commands_log_to_stderr() {
        assert!(!draws_terminal(&command_for(&["bank-tabs", "view"])));
        assert!(!draws_terminal(&command_for(&["bank-tabs", "group", "list"])));
        assert!(!draws_terminal(&command_for(&["bank-tabs", "completions", "bash"])));
    }
}
