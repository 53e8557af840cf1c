//! Per-stamp pipeline: region selection, background classification with an
//! ordered retry list of rules, content location and canvas composition.
use image::{RgbaImage, imageops};
use tracing::{debug, info, warn};

use crate::core::geometry::Rect;
use crate::core::params::ExtractionParams;
use crate::core::processing::canvas::{blank_canvas, compose_within};
use crate::core::processing::classify::{Mask, apply_mask, classify, mark_transparent};
use crate::core::processing::locate::{locate, locate_min};
use crate::core::processing::region::{select_cell_in, select_rect};
use crate::core::stamp::{RegionSource, StampSpec};
use crate::error::{Error, Result};
use crate::types::{ClassifierRule, EmptyRegionPolicy, GridArea};

/// Read-only view of the source sheet shared by every stamp of a run.
#[derive(Debug, Clone, Copy)]
pub struct Sheet<'a> {
    pub image: &'a RgbaImage,
    /// Area grid cells are laid over
    pub grid_area: Rect,
}

impl<'a> Sheet<'a> {
    /// Resolves the grid area according to `params.grid_area`. When the sheet
    /// has no foreground under the first rule the whole image is used.
    pub fn new(image: &'a RgbaImage, params: &ExtractionParams) -> Self {
        let (width, height) = image.dimensions();
        let whole = Rect::new(0, 0, width, height);
        let grid_area = match (params.grid_area, params.rules.first()) {
            (GridArea::Content, Some(rule)) => match content_bounds(image, rule, params.alpha_floor) {
                Some(bounds) => {
                    info!("Grid laid over sheet content {}", bounds);
                    bounds
                }
                None => {
                    warn!("No content found on sheet; grid laid over the whole image");
                    whole
                }
            },
            _ => whole,
        };
        Self { image, grid_area }
    }

    pub fn whole(image: &'a RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            grid_area: Rect::new(0, 0, width, height),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Bounding box of all foreground on `image` under `rule`, without padding.
pub fn content_bounds(image: &RgbaImage, rule: &ClassifierRule, alpha_floor: u8) -> Option<Rect> {
    let mut mask = classify(image, rule);
    mark_transparent(&mut mask, image, alpha_floor);
    locate(&mask, 0)
}

/// Pixel rectangle a stamp is cut from.
pub fn resolve_region(sheet: &Sheet<'_>, spec: &StampSpec, params: &ExtractionParams) -> Result<Rect> {
    match spec.region {
        RegionSource::Cell(cell) => {
            let grid = params.grid.ok_or_else(|| Error::MissingArgument {
                arg: "grid (required for cell-addressed stamps)".to_string(),
            })?;
            Ok(select_cell_in(sheet.dimensions(), sheet.grid_area, grid, cell, params.margin))
        }
        RegionSource::Rect(rect) => Ok(select_rect(sheet.dimensions(), rect, params.margin)),
    }
}

/// How the emitted image came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampSource {
    /// Content found by the rule at this index of `params.rules`.
    Content { rule: usize },
    /// No rule found content; the empty-region policy decided the output.
    Empty(EmptyRegionPolicy),
}

#[derive(Debug, Clone)]
pub struct StampOutput {
    /// Final canvas; `None` when the stamp was skipped.
    pub image: Option<RgbaImage>,
    /// Region cut from the sheet, in sheet coordinates.
    pub region: Rect,
    /// Located content (padded), in sheet coordinates.
    pub content: Option<Rect>,
    pub source: StampSource,
}

/// Runs the whole pipeline for one stamp.
pub fn process_stamp(sheet: &Sheet<'_>, spec: &StampSpec, params: &ExtractionParams) -> Result<StampOutput> {
    let region = resolve_region(sheet, spec, params)?;
    debug!("stamp '{}': {} -> region {}", spec.output, spec.region, region);

    let crop = imageops::crop_imm(sheet.image, region.x, region.y, region.width, region.height)
        .to_image();

    let attempts = params.rules.len();
    let mut last_mask: Option<Mask> = None;
    for (index, rule) in params.rules.iter().enumerate() {
        let mut mask = classify(&crop, rule);
        mark_transparent(&mut mask, &crop, params.alpha_floor);

        match locate_min(&mask, params.padding, params.min_foreground) {
            Some(bbox) => {
                if index > 0 {
                    info!(
                        "stamp '{}': attempt {}/{} with {} found content",
                        spec.output,
                        index + 1,
                        attempts,
                        rule
                    );
                }
                let transparent = apply_mask(&crop, &mask);
                let content = imageops::crop_imm(&transparent, bbox.x, bbox.y, bbox.width, bbox.height)
                    .to_image();
                let image = compose_within(&content, params.canvas, params.fit_box(), params.filter)?;
                return Ok(StampOutput {
                    image: Some(image),
                    region,
                    content: Some(bbox.offset(region.x, region.y)),
                    source: StampSource::Content { rule: index },
                });
            }
            None => {
                warn!(
                    "stamp '{}': attempt {}/{} with {} found no foreground",
                    spec.output,
                    index + 1,
                    attempts,
                    rule
                );
                last_mask = Some(mask);
            }
        }
    }

    let policy = params.empty_policy;
    warn!(
        "stamp '{}': region {} is empty, applying {} policy",
        spec.output, region, policy
    );
    let image = match policy {
        EmptyRegionPolicy::FullRegion => {
            let stripped = match &last_mask {
                Some(mask) => apply_mask(&crop, mask),
                None => crop,
            };
            Some(compose_within(&stripped, params.canvas, params.fit_box(), params.filter)?)
        }
        EmptyRegionPolicy::Blank => Some(blank_canvas(params.canvas)),
        EmptyRegionPolicy::Skip => None,
    };

    Ok(StampOutput {
        image,
        region,
        content: None,
        source: StampSource::Empty(policy),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{CanvasSize, GridSpec};
    use crate::core::processing::classify::TRANSPARENT_WHITE;
    use image::Rgba;

    const INK: Rgba<u8> = Rgba([30, 90, 200, 255]);

    /// Two-cell sheet: a square in the left cell, the right cell blank.
    fn sheet_image() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(200, 100, Rgba([250, 250, 250, 255]));
        for y in 30..60 {
            for x in 20..50 {
                img.put_pixel(x, y, INK);
            }
        }
        img
    }

    fn params() -> ExtractionParams {
        ExtractionParams {
            grid: Some(GridSpec::new(1, 2)),
            padding: 2,
            canvas: CanvasSize::square(64),
            ..ExtractionParams::default()
        }
    }

    #[test]
    fn extracts_and_centres_content() {
        let img = sheet_image();
        let p = params();
        let out = process_stamp(&Sheet::new(&img, &p), &StampSpec::cell(0, 0, "a"), &p).unwrap();
        assert_eq!(out.region, Rect::new(0, 0, 100, 100));
        assert_eq!(out.content, Some(Rect::new(18, 28, 34, 34)));
        assert_eq!(out.source, StampSource::Content { rule: 0 });

        let canvas = out.image.unwrap();
        assert_eq!(canvas.dimensions(), (64, 64));
        // 34x34 content centred at 15: padding ring is transparent, ink is intact.
        assert_eq!(*canvas.get_pixel(16, 16), TRANSPARENT_WHITE);
        assert_eq!(*canvas.get_pixel(17, 17), INK);
        assert_eq!(*canvas.get_pixel(46, 46), INK);
        assert_eq!(*canvas.get_pixel(47, 47), TRANSPARENT_WHITE);
    }

    #[test]
    fn empty_cell_follows_policy() {
        let img = sheet_image();
        let mut p = params();
        let spec = StampSpec::cell(0, 1, "b");

        p.empty_policy = EmptyRegionPolicy::Skip;
        let out = process_stamp(&Sheet::new(&img, &p), &spec, &p).unwrap();
        assert!(out.image.is_none());
        assert_eq!(out.source, StampSource::Empty(EmptyRegionPolicy::Skip));

        p.empty_policy = EmptyRegionPolicy::Blank;
        let out = process_stamp(&Sheet::new(&img, &p), &spec, &p).unwrap();
        let blank = out.image.unwrap();
        assert!(blank.pixels().all(|px| *px == TRANSPARENT_WHITE));

        p.empty_policy = EmptyRegionPolicy::FullRegion;
        let out = process_stamp(&Sheet::new(&img, &p), &spec, &p).unwrap();
        let full = out.image.unwrap();
        assert_eq!(full.dimensions(), (64, 64));
        assert!(full.pixels().all(|px| px.0[3] == 0));
    }

    #[test]
    fn falls_back_to_looser_rule() {
        // Faint grey mark that a strict rule treats as background.
        let mut img = RgbaImage::from_pixel(50, 50, Rgba([255, 255, 255, 255]));
        for y in 10..20 {
            for x in 10..20 {
                img.put_pixel(x, y, Rgba([245, 245, 245, 255]));
            }
        }
        let p = ExtractionParams {
            rules: vec![
                ClassifierRule::ChannelThreshold { threshold: 240 },
                ClassifierRule::ChannelThreshold { threshold: 250 },
            ],
            padding: 0,
            canvas: CanvasSize::square(32),
            ..ExtractionParams::default()
        };
        let spec = StampSpec::rect(Rect::new(0, 0, 50, 50), "faint");
        let out = process_stamp(&Sheet::whole(&img), &spec, &p).unwrap();
        assert_eq!(out.source, StampSource::Content { rule: 1 });
        assert_eq!(out.content, Some(Rect::new(10, 10, 10, 10)));
    }

    #[test]
    fn cell_without_grid_is_an_error() {
        let img = sheet_image();
        let p = ExtractionParams::default();
        let err = process_stamp(&Sheet::whole(&img), &StampSpec::cell(0, 0, "x"), &p).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { .. }));
    }

    #[test]
    fn grid_over_content_area() {
        let img = sheet_image();
        let p = ExtractionParams {
            grid_area: GridArea::Content,
            ..params()
        };
        let sheet = Sheet::new(&img, &p);
        assert_eq!(sheet.grid_area, Rect::new(20, 30, 30, 30));
        let region = resolve_region(&sheet, &StampSpec::cell(0, 1, "x"), &p).unwrap();
        assert_eq!(region, Rect::new(35, 30, 15, 30));
    }
}
