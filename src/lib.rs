#![doc = r#"
stampcut: cut a sheet of stamp icons into individual transparent images.

Given one composite image holding a grid of stamps (or stamps at known pixel
coordinates), stampcut selects each stamp's region, turns the near-white
background transparent, crops to the artwork, and centres it on a fixed-size
transparent canvas. It powers the `stampcut` CLI and can be embedded in your
own Rust applications.

Pipeline
--------
Region selection → background classification → content location →
scale-to-fit → canvas composition. Each stamp is processed independently;
a failure on one stamp is logged and counted, and the run continues.

Quick start: a 3×4 sheet to a directory
---------------------------------------
```rust,no_run
use std::path::Path;
use stampcut::{extract_sheet_to_dir, grid_stamps, ExtractionParams, GridSpec, Margin};

fn main() -> stampcut::Result<()> {
    let grid = GridSpec::new(3, 4);
    let params = ExtractionParams {
        grid: Some(grid),
        margin: Margin::Ratio(0.05),
        ..ExtractionParams::default()
    };
    let names: Vec<String> = ["hello", "sleeping", "celebration", "birthday"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let stamps = grid_stamps(grid, &names, "ao");

    let report = extract_sheet_to_dir(
        Path::new("sheet.png"),
        Path::new("out/stamps"),
        &stamps,
        &params,
    )?;
    println!("{}/{} stamps written", report.succeeded, report.attempted);
    Ok(())
}
```

In-memory processing
--------------------
```rust
use image::{Rgba, RgbaImage};
use stampcut::{
    extract_stamps, CanvasSize, ClassifierRule, ExtractionParams, MemorySink, Rect, StampSpec,
};

fn main() -> stampcut::Result<()> {
    let mut sheet = RgbaImage::from_pixel(200, 100, Rgba([255, 255, 255, 255]));
    for y in 20..60 {
        for x in 30..70 {
            sheet.put_pixel(x, y, Rgba([200, 30, 60, 255]));
        }
    }

    let params = ExtractionParams {
        rules: vec![
            ClassifierRule::MeanSpread { threshold: 230, spread: 20.0 },
            ClassifierRule::ChannelThreshold { threshold: 200 },
        ],
        canvas: CanvasSize::square(64),
        ..ExtractionParams::default()
    };
    let stamps = [StampSpec::rect(Rect::new(0, 0, 100, 100), "red")];

    let mut sink = MemorySink::new();
    let report = extract_stamps(&sheet, &stamps, &params, &mut sink)?;
    assert_eq!(report.succeeded, 1);
    assert_eq!(sink.get("red").map(|img| img.dimensions()), Some((64, 64)));
    Ok(())
}
```

Error handling
--------------
All public functions return `stampcut::Result<T>`. A sheet that cannot be
decoded is `Error::Load`; per-stamp problems never abort a batch and are
reported in [`BatchReport`].

Useful modules
--------------
- [`api`]: high-level entry points and the batch report.
- [`core`]: geometry, parameters and the individual processing stages.
- [`io`]: sheet loading, manifests, raster writers and sinks.
- [`types`]: shared enums (`ClassifierRule`, `EmptyRegionPolicy`, ...).
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::geometry::{CanvasSize, CellIndex, GridSpec, Margin, Rect};
pub use crate::core::params::ExtractionParams;
pub use crate::core::stamp::{RegionSource, StampSpec, grid_stamps, rect_stamps};
pub use error::{Error, Result};
pub use types::{
    ClassifierKind, ClassifierRule, EmptyRegionPolicy, GridArea, OutputFormat, ResampleFilter,
};

// Processing stages
pub use crate::core::processing::canvas::{blank_canvas, compose, compose_within};
pub use crate::core::processing::classify::{Mask, apply_mask, classify};
pub use crate::core::processing::locate::locate;
pub use crate::core::processing::pipeline::{Sheet, StampOutput, StampSource, process_stamp};
pub use crate::core::processing::region::{select_cell, select_rect};

// I/O
pub use io::manifest::{Manifest, load_manifest};
pub use io::reader::load_sheet;
pub use io::writers::sink::{DirectorySink, MemorySink, StampSink};

// High-level API re-exports
pub use api::{
    BatchReport, CellOccupancy, SheetAnalysis, StampRecord, StampStatus, analyze_sheet,
    extract_sheet_to_dir, extract_stamps,
};
