//! tracing setup for the binary.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "zenith=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// With `--log-file` everything goes to that file. Otherwise subcommands log
/// to stderr, and the interactive UI installs nothing so the screen stays
/// clean.
pub fn init(log_file: Option<&Path>, interactive: bool) -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
    }
    Ok(())
}
