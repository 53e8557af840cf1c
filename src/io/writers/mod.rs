pub mod raster;
pub mod report;
pub mod sink;
