//! Recording surfaces for unit tests
use nalgebra::{Point2, Point3};

use crate::geometry::Color;
use crate::scene::LineBatch;
use crate::surface::{Surface2d, Surface3d};
use crate::viewport::Viewport;

#[derive(Debug, Default)]
pub struct RecordingSurface3d {
    pub viewport: Option<Viewport>,
    pub aspect: Option<f32>,
    pub primitives: Vec<LineBatch>,
    /// Primitive set at each submitted frame, with the aspect in effect
    pub frames: Vec<Vec<LineBatch>>,
    pub frame_aspects: Vec<Option<f32>>,
    pub framed: Option<(Point3<f32>, Point3<f32>)>,
}

impl Surface3d for RecordingSurface3d {
    fn attach_to(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn set_projection(&mut self, aspect: f32) {
        self.aspect = Some(aspect);
    }

    fn set_primitives(&mut self, batches: &[LineBatch]) {
        self.primitives = batches.to_vec();
    }

    fn submit_frame(&mut self) {
        self.frames.push(self.primitives.clone());
        self.frame_aspects.push(self.aspect);
    }

    fn frame_bounds(&mut self, min: &Point3<f32>, max: &Point3<f32>) {
        self.framed = Some((*min, *max));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call2d {
    Clear,
    Stroke {
        points: Vec<Point2<f32>>,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        position: Point2<f32>,
    },
    Resize(u32, u32),
}

#[derive(Debug, Default)]
pub struct RecordingSurface2d {
    pub calls: Vec<Call2d>,
}

impl RecordingSurface2d {
    pub fn strokes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call2d::Stroke { .. }))
            .count()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call2d::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface2d for RecordingSurface2d {
    fn clear(&mut self) {
        self.calls.push(Call2d::Clear);
    }

    fn stroke_path(&mut self, points: &[Point2<f32>], color: Color, width: f32) {
        self.calls.push(Call2d::Stroke {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point2<f32>, _color: Color) {
        self.calls.push(Call2d::Text {
            text: text.to_string(),
            position,
        });
    }

    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.calls.push(Call2d::Resize(width, height));
    }
}
