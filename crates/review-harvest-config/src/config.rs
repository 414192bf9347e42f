use chrono::{Local, NaiveDate};
use review_harvest_models::SentimentFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown game preset: {0}")]
    UnknownGame(String),
}

/// Application config: game presets plus collection defaults. Lives at
/// `<config dir>/steamscope/config.toml`; a missing file yields the built-in
/// defaults.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_games")]
    pub games: Vec<GamePreset>,
    #[serde(default)]
    pub defaults: CollectDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePreset {
    pub name: String,
    pub app_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectDefaults {
    #[serde(default = "default_language")]
    pub language: String,
    /// Courtesy delay between page requests, in milliseconds.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    #[serde(default)]
    pub min_votes_up: u32,
}

fn default_language() -> String {
    "all".to_string()
}

fn default_page_delay_ms() -> u64 {
    200
}

fn default_games() -> Vec<GamePreset> {
    [
        ("inZOI", "2456740"),
        ("Dinkum", "1062520"),
        ("Subnautica 2", "1962700"),
        ("PUBG: Blindspot", "3143710"),
    ]
    .into_iter()
    .map(|(name, app_id)| GamePreset { name: name.to_string(), app_id: app_id.to_string() })
    .collect()
}

impl Default for CollectDefaults {
    fn default() -> Self {
        Self {
            language: default_language(),
            page_delay_ms: default_page_delay_ms(),
            min_votes_up: 0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { games: default_games(), defaults: CollectDefaults::default() }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn find_game(&self, name: &str) -> Option<&GamePreset> {
        self.games.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }

    pub fn resolve_game(&self, name: &str) -> Result<&GamePreset, ConfigError> {
        self.find_game(name)
            .ok_or_else(|| ConfigError::UnknownGame(name.to_string()))
    }
}

/// Immutable per-run configuration handed to the fetcher and filter chain at
/// run start. No process-wide mutable state backs any of these fields.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub app_id: String,
    pub game_name: Option<String>,
    pub language: String,
    /// Inclusive calendar date range for posted-at filtering.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub sentiment: SentimentFilter,
    /// When true, only reviews with at least one hour of playtime on record.
    pub min_playtime: bool,
    /// When true, only reviews from verified Steam purchases.
    pub purchase_required: bool,
    /// Lower bound on helpful votes. There is deliberately no upper bound:
    /// anything above the displayed maximum is still admitted.
    pub min_votes_up: u32,
    pub page_delay: Duration,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date > self.end_date {
            return Err(ConfigError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// End of range defaults to today when the caller leaves it open.
    pub fn default_end_date() -> NaiveDate {
        Local::now().date_naive()
    }
}
