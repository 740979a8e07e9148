/// Terminal implementations of the 3D and 2D drawing surfaces
use hullview_core::{
    Camera, CameraConfig, Color, GridHelper, LineBatch, Scene, Surface2d, Surface3d, Viewport,
};
use nalgebra::{Point2, Point3};

use crate::canvas::CharCanvas;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 0.5;

/// Software wireframe surface: keeps a scene and rasterizes it into a
/// character canvas on every submitted frame
pub struct TerminalSurface3d {
    canvas: CharCanvas,
    scene: Scene,
    camera: Camera,
}

impl TerminalSurface3d {
    pub fn new(camera: &CameraConfig, helpers: Vec<GridHelper>) -> Self {
        Self {
            canvas: CharCanvas::new(0, 0),
            scene: Scene::new(helpers),
            camera: Camera::from_config(camera, Viewport::default()),
        }
    }

    pub fn canvas(&self) -> &CharCanvas {
        &self.canvas
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

impl Surface3d for TerminalSurface3d {
    fn attach_to(&mut self, viewport: Viewport) {
        self.canvas
            .resize(viewport.width as usize, viewport.height as usize);
    }

    fn set_projection(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect * CELL_ASPECT);
    }

    fn set_primitives(&mut self, batches: &[LineBatch]) {
        self.scene.set_lines(batches);
    }

    fn submit_frame(&mut self) {
        self.canvas.clear();
        let viewport = self.canvas.viewport();
        for segment in self.scene.project(&self.camera, viewport) {
            self.canvas.draw_line(segment.from, segment.to, segment.color);
        }
    }

    fn frame_bounds(&mut self, min: &Point3<f32>, max: &Point3<f32>) {
        self.camera.frame_bounds(min, max);
    }
}

/// Immediate-mode profile surface; one pixel is one character cell
pub struct TerminalSurface2d {
    canvas: CharCanvas,
}

impl TerminalSurface2d {
    pub fn new() -> Self {
        Self {
            canvas: CharCanvas::new(0, 0),
        }
    }

    pub fn canvas(&self) -> &CharCanvas {
        &self.canvas
    }
}

impl Default for TerminalSurface2d {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface2d for TerminalSurface2d {
    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn stroke_path(&mut self, points: &[Point2<f32>], color: Color, _width: f32) {
        for pair in points.windows(2) {
            self.canvas
                .draw_line((pair[0].x, pair[0].y), (pair[1].x, pair[1].y), color);
        }
    }

    fn draw_text(&mut self, text: &str, position: Point2<f32>, color: Color) {
        self.canvas
            .put_text(position.x.round() as i32, position.y.round() as i32, text, color);
    }

    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.canvas.resize(width as usize, height as usize);
    }
}
