//! Integer geometry shared by the region selector, the content locator and the
//! compositor: `Rect`, grid descriptions, canvas sizes and margins.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Axis-aligned pixel rectangle. `right()`/`bottom()` are exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning `[left, right) x [top, bottom)`.
    pub fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Clamp into `[0, width) x [0, height)` so that `x + w <= width` and `y + h <= height`.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let left = self.x.min(width);
        let top = self.y.min(height);
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        Self::from_edges(left, top, right, bottom)
    }

    /// Translate by `(dx, dy)`; used to map a rectangle found inside a sub-image
    /// back to sheet coordinates.
    pub fn offset(&self, dx: u32, dy: u32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Parses `x,y,width,height`.
impl FromStr for Rect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(Error::invalid("rect", s));
        }
        let mut values = [0u32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| Error::invalid("rect", s))?;
        }
        Ok(Rect::new(values[0], values[1], values[2], values[3]))
    }
}

/// Logical `rows x cols` layout of stamps on a sheet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
}

impl GridSpec {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Row-major iterator over every cell of the grid.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellIndex { row, col }))
    }
}

/// Zero-based grid cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: u32,
    pub col: u32,
}

impl CellIndex {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Fixed output dimensions.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    pub fn fits_within(&self, other: &CanvasSize) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WxH` or a single side length for square canvases.
impl FromStr for CanvasSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| v.trim().parse::<u32>().map_err(|_| Error::invalid("size", s));
        match s.split_once(['x', 'X']) {
            Some((w, h)) => Ok(CanvasSize::new(parse(w)?, parse(h)?)),
            None => Ok(CanvasSize::square(parse(s)?)),
        }
    }
}

/// Adjustment applied to a selected region before classification.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Margin {
    #[default]
    None,
    /// Shrink each side by `ratio x dimension` (`0 <= ratio < 0.5`).
    Ratio(f64),
    /// Shrink each side by a fixed number of pixels.
    Pixels(u32),
    /// Grow each side by a fixed number of pixels, clamped to the sheet.
    Grow(u32),
}
