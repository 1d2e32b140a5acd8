pub mod chart;
pub mod markup;
pub mod page;
pub mod raster;
