//! Stamp descriptions supplied by the caller: where each stamp sits on the
//! sheet and which output identifier it is written under.
use serde::{Deserialize, Serialize};

use crate::core::geometry::{CellIndex, GridSpec, Rect};

/// Where a stamp is cut from.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionSource {
    /// A cell of the configured grid.
    Cell(CellIndex),
    /// Fixed pixel coordinates on the sheet.
    Rect(Rect),
}

impl std::fmt::Display for RegionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionSource::Cell(c) => write!(f, "cell r{}c{}", c.row, c.col),
            RegionSource::Rect(r) => write!(f, "rect {}", r),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StampSpec {
    pub region: RegionSource,
    /// Output identifier, e.g. a file name with or without extension
    pub output: String,
}

impl StampSpec {
    pub fn cell(row: u32, col: u32, output: impl Into<String>) -> Self {
        Self {
            region: RegionSource::Cell(CellIndex::new(row, col)),
            output: output.into(),
        }
    }

    pub fn rect(rect: Rect, output: impl Into<String>) -> Self {
        Self {
            region: RegionSource::Rect(rect),
            output: output.into(),
        }
    }
}

/// One stamp per grid cell in row-major order.
///
/// Cells are named from `names` when provided, used exactly as given (surplus
/// cells fall back to the generated name, surplus names are ignored). Only
/// generated names carry the prefix: `{prefix}_r{row}_c{col}` with one-based
/// row/column numbers. Empty names skip their cell.
pub fn grid_stamps(grid: GridSpec, names: &[String], prefix: &str) -> Vec<StampSpec> {
    grid.cells()
        .enumerate()
        .filter_map(|(i, cell)| {
            let output = match names.get(i) {
                Some(name) if name.trim().is_empty() => return None,
                Some(name) => name.trim().to_string(),
                None => format!("{}r{}_c{}", prefix_with(prefix), cell.row + 1, cell.col + 1),
            };
            Some(StampSpec {
                region: RegionSource::Cell(cell),
                output,
            })
        })
        .collect()
}

fn prefix_with(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!("{}_", prefix)
    }
}

/// One stamp per explicit rectangle, named like [`grid_stamps`] with
/// `{prefix}_n{index}` fallbacks.
pub fn rect_stamps(rects: &[Rect], names: &[String], prefix: &str) -> Vec<StampSpec> {
    rects
        .iter()
        .enumerate()
        .map(|(i, rect)| {
            let output = match names.get(i) {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => format!("{}n{}", prefix_with(prefix), i + 1),
            };
            StampSpec::rect(*rect, output)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_names_map_row_major() {
        let names: Vec<String> = ["hello", "sleeping", "", "birthday"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stamps = grid_stamps(GridSpec::new(2, 3), &names, "ao");
        let outputs: Vec<&str> = stamps.iter().map(|s| s.output.as_str()).collect();
        assert_eq!(
            outputs,
            ["hello", "sleeping", "birthday", "ao_r2_c2", "ao_r2_c3"]
        );
        assert_eq!(stamps[2].region, RegionSource::Cell(CellIndex::new(1, 0)));
    }

    #[test]
    fn rect_stamps_fall_back_to_index_names() {
        let rects = [Rect::new(0, 0, 10, 10), Rect::new(10, 0, 10, 10)];
        let stamps = rect_stamps(&rects, &["love".to_string()], "");
        assert_eq!(stamps[0].output, "love");
        assert_eq!(stamps[1].output, "n2");

        let stamps = rect_stamps(&rects, &["ao_love".to_string()], "stamp");
        assert_eq!(stamps[0].output, "ao_love");
        assert_eq!(stamps[1].output, "stamp_n2");
    }

    #[test]
    fn stamp_spec_json_shape() {
        let json = r#"[
            {"region": {"cell": {"row": 0, "col": 3}}, "output": "ao_birthday.png"},
            {"region": {"rect": {"x": 1875, "y": 360, "width": 625, "height": 360}}, "output": "ao_love"}
        ]"#;
        let stamps: Vec<StampSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(stamps[0], StampSpec::cell(0, 3, "ao_birthday.png"));
        assert_eq!(stamps[1], StampSpec::rect(Rect::new(1875, 360, 625, 360), "ao_love"));
    }
}
