use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use zenith_core::{Config, Tab};

mod commands;
mod logging;
mod tui;

#[derive(Parser)]
#[command(name = "zenith", version, about = "Zenith campus wellness companion")]
struct Cli {
    /// Config file (defaults to ~/.config/zenith/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (the default)
    Run {
        /// Tab to open on (e.g. "focus", "my-schedule")
        #[arg(long)]
        tab: Option<Tab>,
    },
    /// Print the initial view of a tab as JSON
    View {
        /// Tab to render (defaults to ui.start_tab)
        #[arg(long)]
        tab: Option<Tab>,
    },
    /// Print the content catalog as JSON
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run { tab: None });
    let interactive = matches!(command, Commands::Run { .. });

    let result = logging::init(cli.log_file.as_deref(), interactive)
        .and_then(|()| Ok(Config::load(cli.config.as_deref())?))
        .and_then(|config| match command {
            Commands::Run { tab } => tui::run(config, tab),
            Commands::View { tab } => commands::view::run(config, tab),
            Commands::Catalog { action } => commands::catalog::run(action, &config),
            Commands::Config { action } => commands::config::run(action, &config),
            Commands::Completions { shell } => {
                commands::completions::run(shell, &mut Cli::command());
                Ok(())
            }
        });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
