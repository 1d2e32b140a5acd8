//! Narrated chart scenes over annual US infant death rates.
//!
//! The flow mirrors a guided data story:
//!
//! - Load and validate a [`Dataset`] from CSV
//! - Create a [`SceneController`] over the [`SceneRegistry`]
//! - Render the current scene, then advance, retreat, replay or adjust the interactive filters;
//!   every step returns a complete [`RenderedScene`] ready for SVG, HTML or PNG output
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod data;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::config::{ChartConfig, Palette};
pub use crate::data::dataset::{Dataset, Row, SeriesId, YEAR_COLUMN};
pub use crate::data::select::{Gap, Point};
pub use crate::foundation::core::{Canvas, Margin, Rgb8, Year, YearRange};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::render::chart::{Chart, Controls};
pub use crate::render::page::{Navigation, PageLinks, RenderedScene};
pub use crate::render::raster::RasterOpts;
pub use crate::scene::controller::SceneController;
pub use crate::scene::filter::FilterState;
pub use crate::scene::registry::{SceneDescriptor, SceneKind, SceneRegistry, SourceLink};
