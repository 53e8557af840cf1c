use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::api::BatchReport;
use crate::core::params::ExtractionParams;
use crate::error::Result;

/// JSON sidecar describing one extraction run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub input: PathBuf,
    pub params: &'a ExtractionParams,
    #[serde(flatten)]
    pub report: &'a BatchReport,
}

impl<'a> RunReport<'a> {
    pub fn new(input: &Path, params: &'a ExtractionParams, report: &'a BatchReport) -> Self {
        Self {
            generated_at: Utc::now(),
            input: input.to_path_buf(),
            params,
            report,
        }
    }
}

pub fn write_run_report(output: &Path, report: &RunReport<'_>) -> Result<()> {
    let file = File::create(output)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    info!("Run report written to {:?}", output);
    Ok(())
}
