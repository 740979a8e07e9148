/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Fixed camera parameters; only the aspect ratio follows the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
    /// Move the camera along its view direction to fit the model bounds
    pub auto_frame: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [14.0, -14.0, 9.0],
            target: [0.0, 0.0, 1.5],
            up: [0.0, 0.0, 1.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 200.0,
            mode: ProjectionMode::Perspective,
            auto_frame: false,
        }
    }
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&CameraConfig::default(), Viewport::new(width, height))
    }

    pub fn from_config(config: &CameraConfig, viewport: Viewport) -> Self {
        let [px, py, pz] = config.position;
        let [tx, ty, tz] = config.target;
        let [ux, uy, uz] = config.up;
        Self {
            position: Point3::new(px, py, pz),
            target: Point3::new(tx, ty, tz),
            up: Vector3::new(ux, uy, uz),
            fov: config.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            mode: config.mode,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Aim at the center of the box and back off until it fits the field of view
    pub fn frame_bounds(&mut self, min: &Point3<f32>, max: &Point3<f32>) {
        let center = nalgebra::center(min, max);
        let radius = ((max - min).norm() / 2.0).max(1e-3);
        let direction = (self.position - self.target)
            .try_normalize(1e-6)
            .unwrap_or_else(Vector3::z);
        let distance = radius / (self.fov / 2.0).sin() * 1.1;

        self.target = center;
        self.position = center + direction * distance;
        self.far = self.far.max(distance + radius * 2.0);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to screen space. Returns `None` for points behind
    /// the camera; points outside the screen are left for the surface to clip.
    pub fn project_to_screen(
        &self,
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * point.to_homogeneous();

        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::new(800, 600);
        let vp = camera.view_projection();
        let (x, y, _) = camera
            .project_to_screen(&vp, &camera.target, 800, 600)
            .unwrap();
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_dropped() {
        let camera = Camera::new(800, 600);
        let behind = camera.position + (camera.position - camera.target);
        let vp = camera.view_projection();
        assert!(camera.project_to_screen(&vp, &behind, 800, 600).is_none());
    }

    #[test]
    fn test_frame_bounds_keeps_direction() {
        let mut camera = Camera::new(800, 600);
        let before = (camera.position - camera.target).normalize();
        camera.frame_bounds(&Point3::new(-6.0, -2.0, 0.0), &Point3::new(6.0, 2.0, 3.0));
        let after = (camera.position - camera.target).normalize();
        assert!((before - after).norm() < 1e-5);
        assert!((camera.target - Point3::new(0.0, 0.0, 1.5)).norm() < 1e-5);
        assert!((camera.position - camera.target).norm() > 7.0);
    }
}
