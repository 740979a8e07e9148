/// Hullview Core Library - geometry update and redraw pipeline
///
/// This library holds the front-end independent parts of the hull viewer:
/// geometry datasets and their validation, the renderers that turn a dataset
/// into surface calls, the pipeline that keeps a surface in sync with its
/// model, and hull line generation.

pub mod config;
pub mod error;
pub mod feed;
pub mod geometry;
pub mod hull;
pub mod model;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod scene;
pub mod surface;
pub mod viewport;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{Error, Result};
pub use feed::TimedFeed;
pub use geometry::{Color, Polyline, ProfileSet, Wireframe};
pub use hull::{CrossSection, HullLines, HullParams, LineEdit, LineKind};
pub use model::{Geometry, GeometryModel};
pub use pipeline::{Pipeline, ProfilePipeline, WireframePipeline};
pub use projection::{Camera, CameraConfig, ProjectionMode};
pub use render::{ProfileRenderer, Renderer, WireframeRenderer};
pub use scene::{GridHelper, LineBatch, LineStyle, Scene, ScreenSegment};
pub use surface::{Surface2d, Surface3d};
pub use viewport::{Viewport, ViewportWatcher};
