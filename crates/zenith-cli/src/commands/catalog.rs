use clap::Subcommand;
use zenith_core::{Catalog, Config};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List campus events
    Events,
    /// List wellness resources
    Resources,
}

pub fn run(action: CatalogAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::configured(&config.content)?;
    let json = match action {
        CatalogAction::Events => serde_json::to_string_pretty(&catalog.events)?,
        CatalogAction::Resources => serde_json::to_string_pretty(&catalog.resources)?,
    };
    println!("{json}");
    Ok(())
}
