use anyhow::Result;
use std::path::PathBuf;

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("steamscope");

        Ok(Self {
            config_dir: base_dir.clone(),
            data_dir: base_dir.join("data"),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default destination directory for CSV exports, used when `--out` is
    /// given without a path.
    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }
}
