//! Background classification.
//!
//! Every rule is evaluated per pixel with no neighbourhood information. Two
//! consequences are accepted as-is: isolated background-coloured pixels inside
//! the artwork are erased too, and anti-aliased edge pixels close to the
//! threshold leave a visible transparency fringe.
use image::{Rgba, RgbaImage};
use ndarray::Array2;

use crate::types::ClassifierRule;

/// Pixel written over every background pixel: white, fully transparent.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Boolean grid with the dimensions of the image it classifies.
/// `true` marks background. Indexed `[[y, x]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    pub fn new(width: u32, height: u32, background: bool) -> Self {
        Self {
            cells: Array2::from_elem((height as usize, width as usize), background),
        }
    }

    pub fn from_array(cells: Array2<bool>) -> Self {
        Self { cells }
    }

    pub fn width(&self) -> u32 {
        self.cells.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.cells.nrows() as u32
    }

    pub fn is_background(&self, x: u32, y: u32) -> bool {
        self.cells[[y as usize, x as usize]]
    }

    pub fn set(&mut self, x: u32, y: u32, background: bool) {
        self.cells[[y as usize, x as usize]] = background;
    }

    pub fn background_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.len() - self.background_count()
    }

    pub fn as_array(&self) -> &Array2<bool> {
        &self.cells
    }
}

/// True when `pixel` is background under `rule`. Alpha is ignored.
pub fn is_background(pixel: &Rgba<u8>, rule: &ClassifierRule) -> bool {
    let [r, g, b, _] = pixel.0;
    match *rule {
        ClassifierRule::ChannelThreshold { threshold } => {
            r >= threshold && g >= threshold && b >= threshold
        }
        ClassifierRule::MeanSpread { threshold, spread } => {
            let (mean, std) = mean_and_std(r, g, b);
            mean >= threshold as f64 && std < spread
        }
    }
}

/// Mean and population standard deviation of the three colour channels.
fn mean_and_std(r: u8, g: u8, b: u8) -> (f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let mean = (r + g + b) / 3.0;
    let var = ((r - mean).powi(2) + (g - mean).powi(2) + (b - mean).powi(2)) / 3.0;
    (mean, var.sqrt())
}

/// Classifies every pixel of `image`. Always returns a full mask.
pub fn classify(image: &RgbaImage, rule: &ClassifierRule) -> Mask {
    let (width, height) = image.dimensions();
    let cells = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        is_background(image.get_pixel(x as u32, y as u32), rule)
    });
    Mask::from_array(cells)
}

/// Additionally marks pixels whose own alpha is `<= alpha_floor` as background,
/// so sheets that already carry transparency are handled.
pub fn mark_transparent(mask: &mut Mask, image: &RgbaImage, alpha_floor: u8) {
    debug_assert_eq!((mask.width(), mask.height()), image.dimensions());
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] <= alpha_floor {
            mask.set(x, y, true);
        }
    }
}

/// Copy of `image` with every masked pixel rewritten to [`TRANSPARENT_WHITE`].
pub fn apply_mask(image: &RgbaImage, mask: &Mask) -> RgbaImage {
    let mut out = image.clone();
    apply_mask_in_place(&mut out, mask);
    out
}

/// In-place variant of [`apply_mask`].
pub fn apply_mask_in_place(image: &mut RgbaImage, mask: &Mask) {
    debug_assert_eq!((mask.width(), mask.height()), image.dimensions());
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if mask.is_background(x, y) {
            *pixel = TRANSPARENT_WHITE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(4, 2, Rgba([250, 250, 250, 255]));
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        // Pale but saturated pink: bright on average, widely spread channels.
        img.put_pixel(1, 0, Rgba([255, 200, 230, 255]));
        img.put_pixel(2, 0, Rgba([239, 255, 255, 255]));
        img
    }

    #[test]
    fn channel_threshold_requires_every_channel() {
        let img = sample_image();
        let mask = classify(&img, &ClassifierRule::ChannelThreshold { threshold: 240 });
        assert!(!mask.is_background(0, 0));
        assert!(!mask.is_background(1, 0));
        assert!(!mask.is_background(2, 0));
        assert!(mask.is_background(3, 0));
        assert_eq!(mask.background_count(), 5);
    }

    #[test]
    fn mean_spread_keeps_pale_coloured_strokes() {
        let img = sample_image();
        let loose_channel = classify(&img, &ClassifierRule::ChannelThreshold { threshold: 200 });
        assert!(loose_channel.is_background(1, 0));

        let rule = ClassifierRule::MeanSpread {
            threshold: 200,
            spread: 20.0,
        };
        let mask = classify(&img, &rule);
        assert!(!mask.is_background(1, 0));
        assert!(mask.is_background(2, 0));
        assert!(mask.is_background(3, 1));
        assert!(!mask.is_background(0, 0));
    }

    #[test]
    fn threshold_bounds_are_inclusive() {
        let px = Rgba([200, 200, 200, 255]);
        assert!(is_background(&px, &ClassifierRule::ChannelThreshold { threshold: 200 }));
        assert!(!is_background(&px, &ClassifierRule::ChannelThreshold { threshold: 201 }));
        assert!(is_background(&px, &ClassifierRule::ChannelThreshold { threshold: 0 }));
        // Zero spread: the strict `<` means nothing is ever background.
        assert!(!is_background(
            &px,
            &ClassifierRule::MeanSpread {
                threshold: 0,
                spread: 0.0
            }
        ));
    }

    #[test]
    fn apply_mask_preserves_foreground_and_clears_background() {
        let img = sample_image();
        let mask = classify(&img, &ClassifierRule::ChannelThreshold { threshold: 240 });
        let out = apply_mask(&img, &mask);
        for (x, y, px) in out.enumerate_pixels() {
            if mask.is_background(x, y) {
                assert_eq!(*px, TRANSPARENT_WHITE);
            } else {
                assert_eq!(px, img.get_pixel(x, y));
            }
        }
        // Source is untouched.
        assert_eq!(img.get_pixel(3, 0).0[3], 255);
    }

    #[test]
    fn degenerate_all_background_and_all_foreground() {
        let white = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
        let mask = classify(&white, &ClassifierRule::ChannelThreshold { threshold: 255 });
        assert_eq!(mask.foreground_count(), 0);

        let black = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        let mask = classify(&black, &ClassifierRule::ChannelThreshold { threshold: 1 });
        assert_eq!(mask.background_count(), 0);

        let empty = RgbaImage::new(0, 0);
        let mask = classify(&empty, &ClassifierRule::ChannelThreshold { threshold: 240 });
        assert_eq!((mask.width(), mask.height()), (0, 0));
    }

    #[test]
    fn transparent_source_pixels_are_marked() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 8]));
        let mut mask = classify(&img, &ClassifierRule::ChannelThreshold { threshold: 240 });
        assert_eq!(mask.background_count(), 0);
        mark_transparent(&mut mask, &img, 10);
        assert!(mask.is_background(1, 0));
        assert!(!mask.is_background(0, 0));
    }
}
