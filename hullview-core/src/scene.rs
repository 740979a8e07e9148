/// Retained scene for software 3D surfaces: helper elements plus line batches
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::geometry::Color;
use crate::projection::Camera;
use crate::viewport::Viewport;

/// Visual style of a line primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x34, 0x98, 0xdb),
            width: 1.0,
        }
    }
}

/// A batch of line segments sharing one style. Each consecutive pair of
/// `indices` is one segment into `positions`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub style: LineStyle,
}

impl LineBatch {
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.indices.chunks_exact(2).filter_map(|pair| {
            let a = self.positions.get(pair[0] as usize)?;
            let b = self.positions.get(pair[1] as usize)?;
            Some((Point3::from(*a), Point3::from(*b)))
        })
    }
}

/// Square reference grid on the z = 0 plane, centered at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    pub color: Color,
}

impl Default for GridHelper {
    fn default() -> Self {
        Self {
            size: 20.0,
            divisions: 10,
            color: Color::rgb(0x55, 0x55, 0x55),
        }
    }
}

impl GridHelper {
    fn segments(&self) -> Vec<(Point3<f32>, Point3<f32>)> {
        let half = self.size / 2.0;
        let divisions = self.divisions.max(1);
        let step = self.size / divisions as f32;
        (0..=divisions)
            .flat_map(|i| {
                let offset = -half + step * i as f32;
                [
                    (Point3::new(offset, -half, 0.0), Point3::new(offset, half, 0.0)),
                    (Point3::new(-half, offset, 0.0), Point3::new(half, offset, 0.0)),
                ]
            })
            .collect()
    }
}

/// A projected segment in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSegment {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    helpers: Vec<GridHelper>,
    lines: Vec<LineBatch>,
}

impl Scene {
    pub fn new(helpers: Vec<GridHelper>) -> Self {
        Self {
            helpers,
            lines: Vec::new(),
        }
    }

    /// Replace every line primitive; helpers are left alone
    pub fn set_lines(&mut self, batches: &[LineBatch]) {
        self.lines = batches.to_vec();
    }

    pub fn lines(&self) -> &[LineBatch] {
        &self.lines
    }

    pub fn helpers(&self) -> &[GridHelper] {
        &self.helpers
    }

    /// Project helpers, then line batches, into screen space. Segments with an
    /// endpoint behind the camera are dropped.
    pub fn project(&self, camera: &Camera, viewport: Viewport) -> Vec<ScreenSegment> {
        let vp = camera.view_projection();
        let project = |a: &Point3<f32>, b: &Point3<f32>, color: Color, width: f32| {
            let (ax, ay, _) = camera.project_to_screen(&vp, a, viewport.width, viewport.height)?;
            let (bx, by, _) = camera.project_to_screen(&vp, b, viewport.width, viewport.height)?;
            Some(ScreenSegment {
                from: (ax, ay),
                to: (bx, by),
                color,
                width,
            })
        };

        let helper_segments = self.helpers.iter().flat_map(|grid| {
            grid.segments()
                .into_iter()
                .filter_map(move |(a, b)| project(&a, &b, grid.color, 1.0))
        });
        let line_segments = self.lines.iter().flat_map(|batch| {
            batch
                .segments()
                .filter_map(move |(a, b)| project(&a, &b, batch.style.color, batch.style.width))
        });

        helper_segments.chain(line_segments).collect()
    }
}
