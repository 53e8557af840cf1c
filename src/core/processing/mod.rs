pub mod canvas;
pub mod classify;
pub mod locate;
pub mod pipeline;
pub mod region;
pub mod resize;
