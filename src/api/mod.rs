//! High-level, ergonomic library API: run the stamp pipeline over a sheet into
//! any [`StampSink`], extract straight from files to a directory, or analyse a
//! sheet's grid occupancy. Prefer these entrypoints over the low-level
//! processing modules when integrating stampcut.
use std::path::Path;

use image::RgbaImage;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::geometry::{CellIndex, Rect};
use crate::core::params::ExtractionParams;
use crate::core::processing::classify::{classify, mark_transparent};
use crate::core::processing::pipeline::{Sheet, StampSource, content_bounds, process_stamp};
use crate::core::processing::region::select_cell_in;
use crate::core::stamp::{RegionSource, StampSpec};
use crate::error::{Error, Result};
use crate::io::reader::load_sheet;
use crate::io::writers::sink::{DirectorySink, StampSink};
use crate::types::EmptyRegionPolicy;

/// Outcome of a single stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StampStatus {
    /// Content found and written.
    Extracted,
    /// No content; the untouched (background-stripped) region was written.
    EmptyFullRegion,
    /// No content; a blank placeholder canvas was written.
    EmptyBlank,
    /// No content; nothing was written.
    Skipped,
    /// Processing or writing failed.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct StampRecord {
    pub output: String,
    pub status: StampStatus,
    pub region: Option<Rect>,
    pub content: Option<Rect>,
    /// Display form of the classifier rule that found the content
    pub rule: Option<String>,
    pub error: Option<String>,
}

/// Batch processing report
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub attempted: usize,
    /// Stamps for which an image was written (including empty-region placeholders)
    pub succeeded: usize,
    /// Stamps whose region held no foreground under any rule
    pub empty: usize,
    pub skipped: usize,
    pub failed: usize,
    pub stamps: Vec<StampRecord>,
}

impl BatchReport {
    fn record(&mut self, record: StampRecord) {
        self.attempted += 1;
        match record.status {
            StampStatus::Extracted => self.succeeded += 1,
            StampStatus::EmptyFullRegion | StampStatus::EmptyBlank => {
                self.succeeded += 1;
                self.empty += 1;
            }
            StampStatus::Skipped => {
                self.skipped += 1;
                self.empty += 1;
            }
            StampStatus::Failed => self.failed += 1,
        }
        self.stamps.push(record);
    }
}

fn failed_record(spec: &StampSpec, region: Option<Rect>, e: &Error) -> StampRecord {
    StampRecord {
        output: spec.output.clone(),
        status: StampStatus::Failed,
        region,
        content: None,
        rule: None,
        error: Some(e.to_string()),
    }
}

/// Runs every stamp of `stamps` over `sheet` in order, writing results into `sink`.
///
/// Configuration problems (invalid params, cell stamps without a grid) fail the
/// whole call before any stamp is attempted. After that, a failure on one
/// stamp is logged with its identifier and counted, and the batch continues.
pub fn extract_stamps(
    sheet: &RgbaImage,
    stamps: &[StampSpec],
    params: &ExtractionParams,
    sink: &mut dyn StampSink,
) -> Result<BatchReport> {
    params.validate()?;
    if params.grid.is_none() && stamps.iter().any(|s| matches!(s.region, RegionSource::Cell(_))) {
        return Err(Error::MissingArgument {
            arg: "grid (required for cell-addressed stamps)".to_string(),
        });
    }

    let sheet = Sheet::new(sheet, params);
    let mut report = BatchReport::default();
    let total = stamps.len();

    for (i, spec) in stamps.iter().enumerate() {
        info!("Processing stamp {}/{}: {} ({})", i + 1, total, spec.output, spec.region);

        let output = match process_stamp(&sheet, spec, params) {
            Ok(output) => output,
            Err(e) => {
                warn!("Error processing stamp '{}': {}", spec.output, e);
                report.record(failed_record(spec, None, &e));
                continue;
            }
        };

        let (status, rule) = match output.source {
            StampSource::Content { rule } => (
                StampStatus::Extracted,
                params.rules.get(rule).map(|r| r.to_string()),
            ),
            StampSource::Empty(EmptyRegionPolicy::FullRegion) => (StampStatus::EmptyFullRegion, None),
            StampSource::Empty(EmptyRegionPolicy::Blank) => (StampStatus::EmptyBlank, None),
            StampSource::Empty(EmptyRegionPolicy::Skip) => (StampStatus::Skipped, None),
        };

        if let Some(image) = &output.image {
            if image.pixels().all(|px| px.0[3] == 0) && status == StampStatus::Extracted {
                warn!("stamp '{}' has no visible pixels after composition", spec.output);
            }
            if let Err(e) = sink.write(&spec.output, image) {
                warn!("Error writing stamp '{}': {}", spec.output, e);
                report.record(failed_record(spec, Some(output.region), &e));
                continue;
            }
        }

        report.record(StampRecord {
            output: spec.output.clone(),
            status,
            region: Some(output.region),
            content: output.content,
            rule,
            error: None,
        });
    }

    info!("Stamp extraction complete!");
    info!("Attempted: {}", report.attempted);
    info!("Succeeded: {}", report.succeeded);
    info!("Empty: {}", report.empty);
    info!("Skipped: {}", report.skipped);
    info!("Failed: {}", report.failed);
    Ok(report)
}

/// Loads `input` and writes every stamp into `output_dir` in `params.format`.
/// A sheet that cannot be decoded aborts before any stamp is attempted.
pub fn extract_sheet_to_dir(
    input: &Path,
    output_dir: &Path,
    stamps: &[StampSpec],
    params: &ExtractionParams,
) -> Result<BatchReport> {
    params.validate()?;
    let sheet = load_sheet(input)?;
    let mut sink = DirectorySink::create(output_dir, params.format)?;
    extract_stamps(&sheet, stamps, params, &mut sink)
}

/// Foreground occupancy of one grid cell.
#[derive(Debug, Clone, Serialize)]
pub struct CellOccupancy {
    pub cell: CellIndex,
    pub region: Rect,
    pub foreground: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetAnalysis {
    pub width: u32,
    pub height: u32,
    /// Bounding box of all foreground on the sheet
    pub content: Option<Rect>,
    /// Area the grid was laid over
    pub grid_area: Rect,
    pub cells: Vec<CellOccupancy>,
}

impl SheetAnalysis {
    /// Cells holding at least `min_foreground` foreground pixels.
    pub fn occupied(&self, min_foreground: usize) -> impl Iterator<Item = &CellOccupancy> {
        self.cells
            .iter()
            .filter(move |c| c.foreground > 0 && c.foreground >= min_foreground)
    }
}

/// Counts foreground pixels per grid cell under the first classifier rule,
/// without writing anything. Useful to check a grid before extracting.
pub fn analyze_sheet(sheet: &RgbaImage, params: &ExtractionParams) -> Result<SheetAnalysis> {
    params.validate()?;
    let grid = params.grid.ok_or_else(|| Error::MissingArgument {
        arg: "grid".to_string(),
    })?;
    let rule = params.rules[0];
    let view = Sheet::new(sheet, params);

    let cells = grid
        .cells()
        .map(|cell| {
            let region = select_cell_in(view.dimensions(), view.grid_area, grid, cell, params.margin);
            let crop = image::imageops::crop_imm(sheet, region.x, region.y, region.width, region.height)
                .to_image();
            let mut mask = classify(&crop, &rule);
            mark_transparent(&mut mask, &crop, params.alpha_floor);
            CellOccupancy {
                cell,
                region,
                foreground: mask.foreground_count(),
            }
        })
        .collect();

    Ok(SheetAnalysis {
        width: sheet.width(),
        height: sheet.height(),
        content: content_bounds(sheet, &rule, params.alpha_floor),
        grid_area: view.grid_area,
        cells,
    })
}
