/// Geometry datasets for the wireframe and profile pipelines
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Geometry;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#3498db`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A 3D shape made only of edges between vertices
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wireframe {
    pub vertices: Vec<Point3<f32>>,
    /// Unordered vertex index pairs
    pub edges: Vec<[usize; 2]>,
}

impl Wireframe {
    pub fn new(vertices: Vec<Point3<f32>>, edges: Vec<[usize; 2]>) -> Self {
        Self { vertices, edges }
    }

    /// Axis-aligned cube centered at the origin: 8 vertices, 12 edges
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        let edges = vec![
            // Back ring
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            // Front ring
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            // Connecting edges
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];
        Self { vertices, edges }
    }

    /// Min and max corners of all vertices, `None` when there are no vertices
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = self.vertices.first()?;
        let mut min = *first;
        let mut max = *first;
        for v in &self.vertices[1..] {
            min = min.inf(v);
            max = max.sup(v);
        }
        Some((min, max))
    }
}

impl Geometry for Wireframe {
    fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (edge, pair) in self.edges.iter().enumerate() {
            if let Some(&index) = pair.iter().find(|&&i| i >= vertex_count) {
                return Err(Error::InvalidGeometry {
                    edge,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

/// An open curve in surface pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub name: String,
    pub color: Color,
    pub points: Vec<Point2<f32>>,
}

impl Polyline {
    pub fn new(name: impl Into<String>, color: Color, points: Vec<Point2<f32>>) -> Self {
        Self {
            name: name.into(),
            color,
            points,
        }
    }

    /// Fewer than two points cannot form a segment
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Named polylines kept in insertion order. Names are unique; deserialized
/// input goes through [`ProfileSet::insert`] too, so a repeated name keeps
/// the last entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ProfileSetData")]
pub struct ProfileSet {
    polylines: Vec<Polyline>,
}

#[derive(Deserialize)]
struct ProfileSetData {
    #[serde(default)]
    polylines: Vec<Polyline>,
}

impl From<ProfileSetData> for ProfileSet {
    fn from(data: ProfileSetData) -> Self {
        data.polylines.into_iter().collect()
    }
}

impl FromIterator<Polyline> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = Polyline>>(iter: I) -> Self {
        let mut set = ProfileSet::new();
        for polyline in iter {
            set.insert(polyline);
        }
        set
    }
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a polyline, or replace the points of one with the same name in place
    pub fn insert(&mut self, polyline: Polyline) {
        match self.polylines.iter_mut().find(|p| p.name == polyline.name) {
            Some(existing) => *existing = polyline,
            None => self.polylines.push(polyline),
        }
    }

    pub fn with(mut self, polyline: Polyline) -> Self {
        self.insert(polyline);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Polyline> {
        self.polylines.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polyline> {
        self.polylines.iter()
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }
}

impl Geometry for ProfileSet {
    // Short polylines are skipped at draw time, never rejected.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
