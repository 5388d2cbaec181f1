mod alignment;
mod brush;
mod geometry;

pub use alignment::*;
pub use brush::*;
pub use geometry::*;
