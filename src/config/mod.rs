use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::models::ChartPeriod;
use crate::parser::sectors::SectorTable;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub sectors: SectorConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Input text conventions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParserConfig {
    /// Suffix stripped from the date column ("01.01.2018 г.").
    #[serde(default = "default_unit_marker")]
    pub unit_marker: String,
}

/// Extra or replacement sector names, layered over the built-in table
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SectorConfig {
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

/// Dashboard view settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_headline_sectors")]
    pub headline_sectors: Vec<String>,

    #[serde(default)]
    pub default_period: ChartPeriod,

    #[serde(default = "default_table_limit")]
    pub table_limit: usize,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_unit_marker() -> String {
    " г.".to_string()
}
fn default_headline_sectors() -> Vec<String> {
    vec!["Industry".to_string(), "Individuals".to_string()]
}
fn default_table_limit() -> usize {
    100
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            unit_marker: default_unit_marker(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            headline_sectors: default_headline_sectors(),
            default_period: ChartPeriod::default(),
            table_limit: default_table_limit(),
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::Environment::with_prefix("ECODASH")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("dashboard.headline_sectors")
                    .try_parsing(true),
            )
            .build()?;

        let app_cfg = cfg.try_deserialize().unwrap_or_else(|e| {
            warn!("Ignoring invalid configuration, using defaults: {}", e);
            AppConfig::default()
        });
        Ok(app_cfg)
    }

    /// Sector table for this configuration.
    pub fn sector_table(&self) -> SectorTable {
        SectorTable::with_overrides(&self.sectors.translations)
    }
}
