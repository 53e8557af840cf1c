use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::ExtractionParams;
use crate::core::stamp::StampSpec;
use crate::error::Result;

/// JSON description of a run: extraction parameters plus the stamp list.
///
/// ```json
/// {
///   "params": { "grid": { "rows": 3, "cols": 4 }, "padding": 10 },
///   "stamps": [
///     { "region": { "cell": { "row": 0, "col": 0 } }, "output": "ao_hello" },
///     { "region": { "rect": { "x": 1875, "y": 0, "width": 625, "height": 360 } }, "output": "ao_birthday" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub params: ExtractionParams,
    pub stamps: Vec<StampSpec>,
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&text)?;
    info!(
        "Loaded manifest {:?}: {} stamps",
        path,
        manifest.stamps.len()
    );
    Ok(manifest)
}
