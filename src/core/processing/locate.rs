//! Content location: the tight bounding box of non-background pixels.
use tracing::debug;

use crate::core::geometry::Rect;
use crate::core::processing::classify::Mask;

/// Minimal rectangle enclosing every foreground (`false`) cell of `mask`,
/// grown by `padding` on every side and clamped to the mask.
///
/// Returns `None` when the mask has no foreground at all. The right/bottom edge
/// of the result is `max + 1 + padding`, so slicing `[top..bottom, left..right]`
/// yields exactly the located pixels plus padding.
pub fn locate(mask: &Mask, padding: u32) -> Option<Rect> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for ((y, x), &background) in mask.as_array().indexed_iter() {
        if background {
            continue;
        }
        let (x, y) = (x as u32, y as u32);
        found = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if !found {
        debug!("locate: no foreground in {}x{} mask", mask.width(), mask.height());
        return None;
    }

    let rect = Rect::from_edges(
        min_x.saturating_sub(padding),
        min_y.saturating_sub(padding),
        (max_x + 1).saturating_add(padding).min(mask.width()),
        (max_y + 1).saturating_add(padding).min(mask.height()),
    );
    debug!(
        "locate: content ({}, {})-({}, {}), padded {}",
        min_x, min_y, max_x, max_y, rect
    );
    Some(rect)
}

/// [`locate`], treating masks with fewer than `min_foreground` foreground
/// pixels as empty. `min_foreground <= 1` behaves exactly like `locate`.
pub fn locate_min(mask: &Mask, padding: u32, min_foreground: usize) -> Option<Rect> {
    if min_foreground > 1 {
        let count = mask.foreground_count();
        if count < min_foreground {
            debug!(
                "locate: {} foreground pixels below minimum {}",
                count, min_foreground
            );
            return None;
        }
    }
    locate(mask, padding)
}
