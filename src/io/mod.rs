//! I/O layer: decoding the source sheet, loading JSON manifests, and `writers`
//! for alpha-capable stamp rasters, stamp sinks and the JSON run report.
pub mod manifest;
pub use manifest::{Manifest, load_manifest};

pub mod reader;
pub use reader::load_sheet;

pub mod writers;
