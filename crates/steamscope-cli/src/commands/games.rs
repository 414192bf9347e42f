use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use review_harvest_config::{AppConfig, PathManager};
use serde_json::json;

pub fn run_games(output: &Output) -> Result<()> {
    let paths = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to resolve config paths: {}", e))?;
    let config = AppConfig::load(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(vec!["Game", "App ID"]);
            for preset in &config.games {
                table.add_row(vec![preset.name.clone(), preset.app_id.clone()]);
            }
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let games: Vec<_> = config
                .games
                .iter()
                .map(|g| json!({ "name": g.name, "app_id": g.app_id }))
                .collect();
            output.json(&json!({ "games": games }));
        }
    }

    Ok(())
}
