use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub db_dir: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,

    pub business: Option<BusinessConfig>,
}

/// `[business]` section: how documents and amounts are presented.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct BusinessConfig {
    pub company_name: Option<String>,
    pub currency_symbol: Option<String>,
    pub invoice_due_days: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
