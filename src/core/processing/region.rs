//! Region selection: maps a grid cell or an explicit rectangle to the pixel
//! rectangle that is cropped out of the sheet.
//!
//! Cell sizes are `floor(width / cols)` x `floor(height / rows)`. The remainder
//! is discarded, so the last column/row can leave up to `cols - 1` / `rows - 1`
//! pixels of the sheet uncovered on the right/bottom edge.
use tracing::debug;

use crate::core::geometry::{CellIndex, GridSpec, Margin, Rect};

/// Largest margin ratio accepted; anything at or above 0.5 would invert the cell.
const MAX_MARGIN_RATIO: f64 = 0.499;

/// Pixel rectangle of `cell` on an image of `image_size`, after `margin`.
///
/// Zero rows/cols are treated as one and out-of-range cells are clamped to the
/// last row/column.
pub fn select_cell(image_size: (u32, u32), grid: GridSpec, cell: CellIndex, margin: Margin) -> Rect {
    let whole = Rect::new(0, 0, image_size.0, image_size.1);
    select_cell_in(image_size, whole, grid, cell, margin)
}

/// Same as [`select_cell`] but with the grid laid over `area` instead of the
/// whole image. `area` must already lie inside the image; growth is still
/// clamped to the image, not to `area`.
pub fn select_cell_in(
    image_size: (u32, u32),
    area: Rect,
    grid: GridSpec,
    cell: CellIndex,
    margin: Margin,
) -> Rect {
    let rows = grid.rows.max(1);
    let cols = grid.cols.max(1);
    let row = cell.row.min(rows - 1);
    let col = cell.col.min(cols - 1);

    let cell_width = area.width / cols;
    let cell_height = area.height / rows;

    let base = Rect::new(
        area.x + col * cell_width,
        area.y + row * cell_height,
        cell_width,
        cell_height,
    );
    let rect = apply_margin(base, margin, image_size);
    debug!(
        "select_cell: grid {}x{} cell ({}, {}) -> {}",
        rows, cols, row, col, rect
    );
    rect
}

/// Explicit caller-supplied rectangle, clamped to the image and adjusted by `margin`.
pub fn select_rect(image_size: (u32, u32), rect: Rect, margin: Margin) -> Rect {
    let clamped = rect.clamp_to(image_size.0, image_size.1);
    apply_margin(clamped, margin, image_size)
}

/// Shrinks or grows `rect`. Growth is clamped to `[0, bounds)`.
pub fn apply_margin(rect: Rect, margin: Margin, bounds: (u32, u32)) -> Rect {
    match margin {
        Margin::None => rect,
        Margin::Ratio(ratio) => {
            let ratio = if ratio.is_finite() {
                ratio.clamp(0.0, MAX_MARGIN_RATIO)
            } else {
                0.0
            };
            let dx = (rect.width as f64 * ratio).floor() as u32;
            let dy = (rect.height as f64 * ratio).floor() as u32;
            shrink(rect, dx, dy)
        }
        Margin::Pixels(px) => shrink(rect, px, px),
        Margin::Grow(px) => Rect::from_edges(
            rect.x.saturating_sub(px),
            rect.y.saturating_sub(px),
            rect.right().saturating_add(px).min(bounds.0),
            rect.bottom().saturating_add(px).min(bounds.1),
        ),
    }
}

fn shrink(rect: Rect, dx: u32, dy: u32) -> Rect {
    // Never let the two sides cross.
    let dx = dx.min(rect.width / 2);
    let dy = dy.min(rect.height / 2);
    Rect::new(
        rect.x + dx,
        rect.y + dy,
        rect.width - 2 * dx,
        rect.height - 2 * dy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_grid_with_ten_percent_margin() {
        let r = select_cell((100, 100), GridSpec::new(2, 2), CellIndex::new(0, 0), Margin::Ratio(0.1));
        assert_eq!(r, Rect::new(5, 5, 40, 40));
    }

    #[test]
    fn zero_ratio_returns_full_cell() {
        let r = select_cell((100, 100), GridSpec::new(2, 2), CellIndex::new(1, 1), Margin::Ratio(0.0));
        assert_eq!(r, Rect::new(50, 50, 50, 50));
    }

    #[test]
    fn remainder_is_not_covered_by_last_cell() {
        // 103 / 4 = 25, so the last column ends at 100 and 3 pixels stay uncovered.
        let r = select_cell((103, 10), GridSpec::new(1, 4), CellIndex::new(0, 3), Margin::None);
        assert_eq!(r, Rect::new(75, 0, 25, 10));
        assert_eq!(r.right(), 100);
    }

    #[test]
    fn out_of_range_cell_and_zero_grid_are_clamped() {
        let r = select_cell((90, 60), GridSpec::new(3, 3), CellIndex::new(7, 9), Margin::None);
        assert_eq!(r, Rect::new(60, 40, 30, 20));

        let whole = select_cell((90, 60), GridSpec::new(0, 0), CellIndex::new(0, 0), Margin::None);
        assert_eq!(whole, Rect::new(0, 0, 90, 60));
    }

    #[test]
    fn pixel_margin_never_inverts() {
        let r = select_rect((100, 100), Rect::new(10, 10, 20, 20), Margin::Pixels(30));
        assert_eq!(r, Rect::new(20, 20, 0, 0));
        assert!(r.is_empty());
    }

    #[test]
    fn explicit_rect_is_clamped_then_grown_within_bounds() {
        let r = select_rect((100, 80), Rect::new(70, 60, 50, 50), Margin::None);
        assert_eq!(r, Rect::new(70, 60, 30, 20));

        let grown = select_rect((100, 80), Rect::new(10, 10, 20, 20), Margin::Grow(15));
        assert_eq!(grown, Rect::new(0, 0, 45, 45));

        let grown_edge = select_rect((100, 80), Rect::new(70, 50, 20, 20), Margin::Grow(15));
        assert_eq!(grown_edge, Rect::new(55, 35, 45, 45));
    }

    #[test]
    fn grid_over_sub_area_is_offset() {
        let area = Rect::new(10, 20, 60, 40);
        let r = select_cell_in((100, 100), area, GridSpec::new(2, 3), CellIndex::new(1, 2), Margin::None);
        assert_eq!(r, Rect::new(50, 40, 20, 20));
    }

    #[test]
    fn growth_over_sub_area_reaches_past_the_area_to_the_image_edge() {
        let area = Rect::new(10, 20, 60, 40);
        let r = select_cell_in((100, 100), area, GridSpec::new(2, 3), CellIndex::new(1, 2), Margin::Grow(15));
        assert_eq!(r, Rect::new(35, 25, 50, 50));

        let edge = select_cell_in((75, 65), area, GridSpec::new(2, 3), CellIndex::new(1, 2), Margin::Grow(15));
        assert_eq!(edge, Rect::new(35, 25, 40, 40));
    }

    #[test]
    fn ratio_outside_range_is_clamped() {
        let r = select_rect((100, 100), Rect::new(0, 0, 100, 100), Margin::Ratio(0.9));
        assert!(!r.is_empty());
        assert!(r.right() <= 100 && r.bottom() <= 100);
        let neg = select_rect((100, 100), Rect::new(0, 0, 100, 100), Margin::Ratio(-1.0));
        assert_eq!(neg, Rect::new(0, 0, 100, 100));
    }
}
