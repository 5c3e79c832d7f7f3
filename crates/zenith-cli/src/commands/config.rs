use clap::Subcommand;
use zenith_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "timer.max_focus_minutes", "ui.user_name")
        key: String,
    },
    /// Print the default config file location
    Path,
}

pub fn run(action: ConfigAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let text = toml::to_string_pretty(config)?;
            print!("{text}");
        }
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
        }
    }
    Ok(())
}
