/// Renderers that turn a geometry snapshot into surface calls
use log::debug;
use nalgebra::Vector2;

use crate::geometry::{ProfileSet, Wireframe};
use crate::model::Geometry;
use crate::scene::{LineBatch, LineStyle};
use crate::surface::{Surface2d, Surface3d};
use crate::viewport::Viewport;

/// Draws one geometry type onto one surface type. Renderers hold style only,
/// never model state.
pub trait Renderer<S> {
    type Geometry: Geometry;

    /// One full redraw of `geometry`
    fn render(&self, geometry: &Self::Geometry, surface: &mut S);

    /// Recompute the surface's projection or buffer for new dimensions
    fn resize(&self, surface: &mut S, viewport: Viewport);
}

/// Draws a wireframe as a single line batch
#[derive(Debug, Clone, Default)]
pub struct WireframeRenderer {
    pub style: LineStyle,
    pub auto_frame: bool,
}

impl WireframeRenderer {
    pub fn new(style: LineStyle) -> Self {
        Self {
            style,
            auto_frame: false,
        }
    }

    pub fn with_auto_frame(mut self, auto_frame: bool) -> Self {
        self.auto_frame = auto_frame;
        self
    }

    /// Position buffer from the vertices, index buffer straight from the edges
    pub fn build_batch(&self, wireframe: &Wireframe) -> LineBatch {
        let positions = wireframe
            .vertices
            .iter()
            .map(|v| [v.x, v.y, v.z])
            .collect();
        let indices = wireframe
            .edges
            .iter()
            .flat_map(|[a, b]| [*a as u32, *b as u32])
            .collect();
        LineBatch {
            positions,
            indices,
            style: self.style,
        }
    }
}

impl<S: Surface3d> Renderer<S> for WireframeRenderer {
    type Geometry = Wireframe;

    fn render(&self, wireframe: &Wireframe, surface: &mut S) {
        let batch = self.build_batch(wireframe);
        debug!(
            "wireframe pass: {} vertices, {} segments",
            batch.positions.len(),
            batch.segment_count()
        );

        if self.auto_frame {
            if let Some((min, max)) = wireframe.bounds() {
                surface.frame_bounds(&min, &max);
            }
        }

        surface.set_primitives(&[batch]);
        surface.submit_frame();
    }

    fn resize(&self, surface: &mut S, viewport: Viewport) {
        surface.attach_to(viewport);
        surface.set_projection(viewport.aspect());
    }
}

/// Draws each named polyline as a stroked path with a label above its start
#[derive(Debug, Clone)]
pub struct ProfileRenderer {
    pub line_width: f32,
    /// Distance of the label above the first point, in pixels
    pub label_offset: f32,
}

impl Default for ProfileRenderer {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            label_offset: 8.0,
        }
    }
}

impl<S: Surface2d> Renderer<S> for ProfileRenderer {
    type Geometry = ProfileSet;

    fn render(&self, profiles: &ProfileSet, surface: &mut S) {
        surface.clear();

        for polyline in profiles.iter() {
            if !polyline.is_drawable() {
                debug!(
                    "skipping polyline {:?} with {} points",
                    polyline.name,
                    polyline.points.len()
                );
                continue;
            }
            surface.stroke_path(&polyline.points, polyline.color, self.line_width);
            let anchor = polyline.points[0] - Vector2::new(0.0, self.label_offset);
            surface.draw_text(&polyline.name, anchor, polyline.color);
        }
    }

    fn resize(&self, surface: &mut S, viewport: Viewport) {
        surface.resize_buffer(viewport.width, viewport.height);
    }
}
