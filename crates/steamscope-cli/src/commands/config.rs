use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use review_harvest_config::{AppConfig, PathManager};

pub fn run_show(output: &Output) -> Result<()> {
    let paths = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to resolve config paths: {}", e))?;
    let config_file = paths.config_file();
    let config = AppConfig::load(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;

    match output.format() {
        OutputFormat::Human => {
            if config_file.exists() {
                output.println(format!("Config file: {}", config_file.display()));
            } else {
                output.println(format!(
                    "Config file: {} (not present, showing defaults)",
                    config_file.display()
                ));
            }
            output.println(format!("Language: {}", config.defaults.language));
            output.println(format!("Page delay: {} ms", config.defaults.page_delay_ms));
            output.println(format!("Min votes up: {}", config.defaults.min_votes_up));
            output.println(format!("Game presets: {}", config.games.len()));
            for preset in &config.games {
                output.println(format!("  {} ({})", preset.name, preset.app_id));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::json!({
                "path": config_file.display().to_string(),
                "exists": config_file.exists(),
                "config": serde_json::to_value(&config)?,
            }));
        }
    }

    Ok(())
}
