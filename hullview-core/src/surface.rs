/// Drawing surfaces implemented by each front end
use nalgebra::{Point2, Point3};

use crate::geometry::Color;
use crate::scene::LineBatch;
use crate::viewport::Viewport;

/// A retained 3D surface: line primitives live in a scene until replaced
pub trait Surface3d {
    /// Size the backing buffer to the container
    fn attach_to(&mut self, viewport: Viewport);

    /// Feed a new aspect ratio into the camera's projection
    fn set_projection(&mut self, aspect: f32);

    /// Replace every line primitive with `batches`; non-geometry elements
    /// such as grid helpers are kept
    fn set_primitives(&mut self, batches: &[LineBatch]);

    fn submit_frame(&mut self);

    /// Fit the camera to a bounding box. Surfaces without a movable camera
    /// ignore this.
    fn frame_bounds(&mut self, _min: &Point3<f32>, _max: &Point3<f32>) {}
}

/// An immediate-mode 2D surface in pixel coordinates
pub trait Surface2d {
    fn clear(&mut self);

    fn stroke_path(&mut self, points: &[Point2<f32>], color: Color, width: f32);

    fn draw_text(&mut self, text: &str, position: Point2<f32>, color: Color);

    fn resize_buffer(&mut self, width: u32, height: u32);
}
