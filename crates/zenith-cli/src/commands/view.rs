use zenith_core::{Action, Config, Session, Tab};

pub fn run(config: Config, tab: Option<Tab>) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::from_config(config)?;
    if let Some(tab) = tab {
        session.dispatch(Action::SelectTab { tab })?;
    }
    let json = serde_json::to_string_pretty(&session.view())?;
    println!("{json}");
    Ok(())
}
