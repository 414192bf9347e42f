pub mod config;
pub mod paths;

pub use config::{AppConfig, CollectDefaults, ConfigError, GamePreset, RunConfig};
pub use paths::PathManager;
