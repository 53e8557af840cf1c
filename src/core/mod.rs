//! Core building blocks: geometry, extraction parameters, stamp descriptions and
//! the processing stages (region selection, background classification, content
//! location, resizing and canvas composition). These are internal primitives
//! consumed by the high-level `api` module.
pub mod geometry;
pub mod params;
pub mod processing;
pub mod stamp;
