//! File access for the CLI: reads the source CSV or an exported JSON document
//! and writes exports. The core modules never touch the filesystem.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::aggregate::write_wide_csv;
use crate::config::AppConfig;
use crate::models::AggregatedRow;
use crate::pipeline::Dashboard;

/// Where the record set comes from.
#[derive(Debug, Clone)]
pub enum InputSource {
    Csv(PathBuf),
    Json(PathBuf),
}

pub fn read_text(path: &Path) -> Result<String> {
    debug!("Reading {:?}", path);
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

/// Build a dashboard from the chosen input file.
pub fn load_dashboard(source: &InputSource, config: AppConfig) -> Result<Dashboard> {
    let mut dashboard = Dashboard::new(config);

    match source {
        InputSource::Csv(path) => {
            let text = read_text(path)?;
            let skipped = dashboard.load_csv(&text);
            for s in skipped.iter().take(10) {
                warn!("{:?} line {}: {}", path, s.line, s.reason);
            }
            if skipped.len() > 10 {
                warn!("{:?}: {} more lines skipped", path, skipped.len() - 10);
            }
        }
        InputSource::Json(path) => {
            let text = read_text(path)?;
            dashboard
                .import_document(&text)
                .with_context(|| format!("Failed to import {:?}", path))?;
        }
    }

    info!("{} records loaded", dashboard.records().len());
    Ok(dashboard)
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    info!("Wrote {:?}", path);
    Ok(())
}

pub fn write_wide_csv_file(path: &Path, rows: &[AggregatedRow]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    write_wide_csv(rows, BufWriter::new(file))
        .with_context(|| format!("Failed to write wide table to {:?}", path))?;
    info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}
