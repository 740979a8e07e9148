/// Hull parameters, line generation, and conversion into renderable geometry
///
/// Coordinates are in meters with the origin at midship: x forward, y to
/// starboard, z up.
use log::{info, warn};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Color, Polyline, ProfileSet, Wireframe};
use crate::viewport::Viewport;

pub const SIDE_PROFILE: &str = "Side profile";
pub const HALF_BREADTH: &str = "Half breadth";
pub const MIDSHIP_SECTION: &str = "Midship section";

const SIDE_PROFILE_COLOR: Color = Color::rgb(0x34, 0x98, 0xdb);
const HALF_BREADTH_COLOR: Color = Color::rgb(0x2e, 0xcc, 0x71);
const SECTION_COLOR: Color = Color::rgb(0x9b, 0x59, 0xb6);

/// Longest stern/bow ramp of the side profile, in meters
const MAX_END_RAMP: f32 = 5.0;

/// Principal dimensions of a hull
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullParams {
    /// Length between perpendiculars
    pub lpp: f32,
    pub beam: f32,
    pub depth: f32,
    pub draft: f32,
    /// Displacement in tonnes
    pub displacement: f32,
    /// Length overall, optional
    #[serde(default)]
    pub loa: Option<f32>,
}

impl Default for HullParams {
    fn default() -> Self {
        Self {
            lpp: 12.0,
            beam: 4.0,
            depth: 3.0,
            draft: 2.5,
            displacement: 100.0,
            loa: None,
        }
    }
}

impl HullParams {
    /// Check every design rule and report all violations at once
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("lpp", self.lpp),
            ("beam", self.beam),
            ("depth", self.depth),
            ("draft", self.draft),
            ("displacement", self.displacement),
        ];
        let non_finite = required
            .iter()
            .map(|(_, v)| *v)
            .chain(self.loa)
            .any(|v| !v.is_finite());
        if non_finite {
            return Err(Error::InvalidParams(vec![
                "all values must be finite numbers".to_string(),
            ]));
        }

        let mut errors: Vec<String> = required
            .iter()
            .filter(|(_, v)| *v <= 0.0)
            .map(|(name, v)| format!("{} ({}) must be greater than 0", name, v))
            .collect();

        if self.beam >= self.lpp {
            errors.push(format!("beam ({}) must be less than lpp ({})", self.beam, self.lpp));
        }
        if self.depth >= self.lpp {
            errors.push(format!("depth ({}) must be less than lpp ({})", self.depth, self.lpp));
        }
        if self.draft >= self.depth {
            errors.push(format!("draft ({}) must be less than depth ({})", self.draft, self.depth));
        }
        if let Some(loa) = self.loa {
            if loa <= 0.0 {
                errors.push(format!("loa ({}) must be greater than 0", loa));
            }
            if loa < self.lpp {
                errors.push(format!("loa ({}) must be at least lpp ({})", loa, self.lpp));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidParams(errors))
        }
    }
}

/// A transverse section: (y, z) points at station `x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub x: f32,
    pub points: Vec<Point2<f32>>,
}

/// Which line a [`LineEdit`] targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    SideProfile,
    HalfBreadth,
    /// Index into [`HullLines::cross_sections`]
    CrossSection(usize),
}

/// Move one point of one line, as produced by dragging a control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineEdit {
    pub line: LineKind,
    pub point: usize,
    pub coords: Point2<f32>,
}

/// The 2D lines plan of a hull
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullLines {
    /// (x, z) keel-to-waterline profile
    pub side_profile: Vec<Point2<f32>>,
    /// (x, y) half breadth at the waterline
    pub half_breadth: Vec<Point2<f32>>,
    pub cross_sections: Vec<CrossSection>,
    /// Bumped on every edit
    pub version: u64,
}

impl HullLines {
    /// Generate simplified lines from validated parameters, sampling
    /// `stations` points along the length (at least 2)
    pub fn generate(params: &HullParams, stations: usize) -> Result<Self> {
        params.validate()?;

        let n = stations.max(2);
        let half_length = params.lpp / 2.0;
        let step = params.lpp / (n - 1) as f32;
        let ramp = MAX_END_RAMP.min(params.lpp / 4.0);

        let xs: Vec<f32> = (0..n).map(|i| -half_length + step * i as f32).collect();

        let side_profile = xs
            .iter()
            .map(|&x| {
                let z = if x < -half_length + ramp {
                    params.draft / ramp * (x + half_length)
                } else if x > half_length - ramp {
                    params.draft - params.draft / ramp * (x - (half_length - ramp))
                } else {
                    params.draft
                };
                Point2::new(x, z.max(0.0))
            })
            .collect();

        let half_breadth_at = |x: f32| {
            let t = x / half_length;
            (params.beam / 2.0 * (1.0 - t * t)).max(0.0)
        };
        let half_breadth = xs.iter().map(|&x| Point2::new(x, half_breadth_at(x))).collect();

        let cross_sections = [-params.lpp / 4.0, 0.0, params.lpp / 4.0]
            .into_iter()
            .map(|x| {
                let w = half_breadth_at(x);
                CrossSection {
                    x,
                    points: vec![
                        Point2::new(-w, params.depth),
                        Point2::new(-w, params.draft),
                        Point2::new(-0.8 * w, 0.0),
                        Point2::new(0.8 * w, 0.0),
                        Point2::new(w, params.draft),
                        Point2::new(w, params.depth),
                    ],
                }
            })
            .collect();

        Ok(Self {
            side_profile,
            half_breadth,
            cross_sections,
            version: 1,
        })
    }

    /// A copy with one point moved and the version bumped
    pub fn apply(&self, edit: &LineEdit) -> Result<Self> {
        let mut next = self.clone();
        let line = match edit.line {
            LineKind::SideProfile => &mut next.side_profile,
            LineKind::HalfBreadth => &mut next.half_breadth,
            LineKind::CrossSection(i) => {
                let count = next.cross_sections.len();
                &mut next
                    .cross_sections
                    .get_mut(i)
                    .ok_or_else(|| {
                        Error::InvalidEdit(format!(
                            "cross section {} of {} does not exist",
                            i, count
                        ))
                    })?
                    .points
            }
        };

        let len = line.len();
        let point = line.get_mut(edit.point).ok_or_else(|| {
            Error::InvalidEdit(format!(
                "point {} of {:?} out of range ({} points)",
                edit.point, edit.line, len
            ))
        })?;
        *point = edit.coords;
        next.version += 1;
        Ok(next)
    }

    /// Sweep the half breadth along the side profile into a symmetric wireframe
    pub fn to_wireframe(&self) -> Result<Wireframe> {
        self.check_wireframe_input()?;

        let mut half_breadth = self.half_breadth.clone();
        half_breadth.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut vertices = Vec::with_capacity(self.side_profile.len() * 2);
        let mut edges = Vec::with_capacity(self.side_profile.len() * 3);

        for (i, p) in self.side_profile.iter().enumerate() {
            let mut y = interpolate(&half_breadth, p.x);
            if y < 0.0 {
                warn!("negative half breadth at x={:.2}, using its magnitude", p.x);
                y = y.abs();
            }
            vertices.push(Point3::new(p.x, y, p.y));
            vertices.push(Point3::new(p.x, -y, p.y));
            edges.push([2 * i, 2 * i + 1]);
        }

        for i in 0..self.side_profile.len() - 1 {
            edges.push([2 * i, 2 * (i + 1)]);
            edges.push([2 * i + 1, 2 * (i + 1) + 1]);
        }

        info!(
            "wireframe generated from lines v{}: {} vertices, {} edges",
            self.version,
            vertices.len(),
            edges.len()
        );
        Ok(Wireframe::new(vertices, edges))
    }

    fn check_wireframe_input(&self) -> Result<()> {
        if self.side_profile.len() < 2 {
            return Err(Error::InvalidLines(format!(
                "side profile needs at least 2 points, has {}",
                self.side_profile.len()
            )));
        }
        if self.half_breadth.is_empty() {
            return Err(Error::InvalidLines("half breadth is empty".to_string()));
        }
        if self.side_profile.windows(2).any(|w| w[0].x > w[1].x) {
            return Err(Error::InvalidLines(
                "side profile x coordinates must be non-decreasing".to_string(),
            ));
        }

        let (side_min, side_max) = x_range(&self.side_profile);
        let (half_min, half_max) = x_range(&self.half_breadth);
        if half_max < side_min || half_min > side_max {
            warn!("half breadth does not overlap the side profile, values will be extrapolated");
        }
        Ok(())
    }

    /// The cross section closest to x = 0
    pub fn midship_section(&self) -> Option<&CrossSection> {
        self.cross_sections
            .iter()
            .min_by(|a, b| a.x.abs().total_cmp(&b.x.abs()))
    }

    /// Lay the lines plan out as pixel-space polylines: side profile across
    /// the top half, half breadth in the left two thirds of the bottom half and
    /// the midship section in the remaining third
    pub fn to_profiles(&self, viewport: Viewport) -> ProfileSet {
        let width = viewport.width as f32;
        let height = viewport.height as f32;
        let margin = (width.min(height) / 10.0).min(24.0);
        let panel = |left: f32, top: f32, w: f32, h: f32| Panel {
            left: left + margin,
            top: top + margin,
            width: (w - 2.0 * margin).max(1.0),
            height: (h - 2.0 * margin).max(1.0),
        };
        let half = height / 2.0;
        let split = width * 2.0 / 3.0;

        let mut profiles = ProfileSet::new()
            .with(Polyline::new(
                SIDE_PROFILE,
                SIDE_PROFILE_COLOR,
                panel(0.0, 0.0, width, half).fit(&self.side_profile),
            ))
            .with(Polyline::new(
                HALF_BREADTH,
                HALF_BREADTH_COLOR,
                panel(0.0, half, split, half).fit(&self.half_breadth),
            ));
        if let Some(section) = self.midship_section() {
            profiles.insert(Polyline::new(
                MIDSHIP_SECTION,
                SECTION_COLOR,
                panel(split, half, width - split, half).fit(&section.points),
            ));
        }
        profiles
    }
}

/// Linear interpolation over points sorted by x, clamped at both ends
fn interpolate(points: &[Point2<f32>], x: f32) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    if x <= first.x {
        return first.y;
    }
    if x >= last.x {
        return last.y;
    }
    points
        .windows(2)
        .find(|w| x >= w[0].x && x <= w[1].x)
        .map(|w| {
            let span = w[1].x - w[0].x;
            if span <= f32::EPSILON {
                w[0].y
            } else {
                w[0].y + (w[1].y - w[0].y) * (x - w[0].x) / span
            }
        })
        .unwrap_or(last.y)
}

fn x_range(points: &[Point2<f32>]) -> (f32, f32) {
    points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)))
}

/// Pixel rectangle that model coordinates are fitted into
struct Panel {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl Panel {
    /// Uniform scale, centered, with the model's vertical axis pointing up
    fn fit(&self, points: &[Point2<f32>]) -> Vec<Point2<f32>> {
        if points.is_empty() {
            return Vec::new();
        }
        let (min_x, max_x) = x_range(points);
        let (min_v, max_v) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let span_x = (max_x - min_x).max(1e-3);
        let span_v = (max_v - min_v).max(1e-3);
        let scale = (self.width / span_x).min(self.height / span_v);

        let pad_x = (self.width - span_x * scale) / 2.0;
        let pad_v = (self.height - span_v * scale) / 2.0;
        let bottom = self.top + self.height - pad_v;

        points
            .iter()
            .map(|p| {
                Point2::new(
                    self.left + pad_x + (p.x - min_x) * scale,
                    bottom - (p.y - min_v) * scale,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    #[test]
    fn test_default_params_are_valid() {
        assert!(HullParams::default().validate().is_ok());
    }

    #[test]
    fn test_params_collect_every_violation() {
        let params = HullParams {
            lpp: 50.0,
            beam: 60.0,
            depth: 8.0,
            draft: 10.0,
            displacement: -100.0,
            loa: None,
        };
        match params.validate() {
            Err(Error::InvalidParams(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].starts_with("displacement"));
                assert!(errors[1].starts_with("beam"));
                assert!(errors[2].starts_with("draft"));
            }
            other => panic!("expected InvalidParams, got {:?}", other),
        }
    }

    #[test]
    fn test_loa_shorter_than_lpp_rejected() {
        let params = HullParams {
            loa: Some(10.0),
            ..HullParams::default()
        };
        assert!(params.validate().is_err());
        let params = HullParams {
            loa: Some(13.0),
            ..HullParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_non_finite_params_rejected() {
        let params = HullParams {
            beam: f32::NAN,
            ..HullParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(Error::InvalidParams(vec!["all values must be finite numbers".into()]))
        );
    }

    #[test]
    fn test_generated_lines_shape() {
        let params = HullParams::default();
        let lines = HullLines::generate(&params, 25).unwrap();
        assert_eq!(lines.side_profile.len(), 25);
        assert_eq!(lines.half_breadth.len(), 25);
        assert_eq!(lines.cross_sections.len(), 3);
        assert_eq!(lines.version, 1);

        // Ends sit on the baseline, midship at the draft with full beam
        assert!(lines.side_profile[0].y.abs() < 1e-5);
        assert!(lines.side_profile[24].y.abs() < 1e-4);
        assert!((lines.side_profile[12].y - params.draft).abs() < 1e-5);
        assert!((lines.half_breadth[12].y - params.beam / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_generate_rejects_bad_params() {
        let params = HullParams {
            draft: 5.0,
            ..HullParams::default()
        };
        assert!(matches!(
            HullLines::generate(&params, 10),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn test_wireframe_counts_and_validity() {
        let lines = HullLines::generate(&HullParams::default(), 21).unwrap();
        let wireframe = lines.to_wireframe().unwrap();
        assert_eq!(wireframe.vertices.len(), 42);
        assert_eq!(wireframe.edges.len(), 21 + 2 * 20);
        assert!(wireframe.validate().is_ok());

        // Port and starboard mirror each other
        let (a, b) = (wireframe.vertices[20], wireframe.vertices[21]);
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, -b.y);
        assert_eq!(a.z, b.z);
    }

    #[test]
    fn test_wireframe_rejects_descending_profile() {
        let mut lines = HullLines::generate(&HullParams::default(), 5).unwrap();
        lines.side_profile.reverse();
        assert!(matches!(lines.to_wireframe(), Err(Error::InvalidLines(_))));
    }

    #[test]
    fn test_interpolate_clamps_and_blends() {
        let points = [Point2::new(0.0, 1.0), Point2::new(2.0, 3.0)];
        assert_eq!(interpolate(&points, -1.0), 1.0);
        assert_eq!(interpolate(&points, 5.0), 3.0);
        assert!((interpolate(&points, 1.0) - 2.0).abs() < 1e-6);
        assert_eq!(interpolate(&points[..1], 7.0), 1.0);
    }

    #[test]
    fn test_edit_bumps_version() {
        let lines = HullLines::generate(&HullParams::default(), 9).unwrap();
        let edit = LineEdit {
            line: LineKind::HalfBreadth,
            point: 4,
            coords: Point2::new(0.0, 2.5),
        };
        let edited = lines.apply(&edit).unwrap();
        assert_eq!(edited.version, 2);
        assert_eq!(edited.half_breadth[4], Point2::new(0.0, 2.5));
        assert_eq!(lines.version, 1);
    }

    #[test]
    fn test_edit_out_of_range() {
        let lines = HullLines::generate(&HullParams::default(), 9).unwrap();
        let bad_point = LineEdit {
            line: LineKind::SideProfile,
            point: 9,
            coords: Point2::origin(),
        };
        let bad_section = LineEdit {
            line: LineKind::CrossSection(3),
            point: 0,
            coords: Point2::origin(),
        };
        assert!(matches!(lines.apply(&bad_point), Err(Error::InvalidEdit(_))));
        assert!(matches!(lines.apply(&bad_section), Err(Error::InvalidEdit(_))));
    }

    #[test]
    fn test_profiles_fit_inside_viewport() {
        let lines = HullLines::generate(&HullParams::default(), 11).unwrap();
        let viewport = Viewport::new(600, 300);
        let profiles = lines.to_profiles(viewport);
        let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, [SIDE_PROFILE, HALF_BREADTH, MIDSHIP_SECTION]);

        let side = profiles.get(SIDE_PROFILE).unwrap();
        let half = profiles.get(HALF_BREADTH).unwrap();
        let section = profiles.get(MIDSHIP_SECTION).unwrap();
        for p in profiles.iter().flat_map(|line| &line.points) {
            assert!(p.x >= 0.0 && p.x <= 600.0);
            assert!(p.y >= 0.0 && p.y <= 300.0);
        }
        assert!(side.points.iter().all(|p| p.y <= 150.0));
        assert!(half.points.iter().all(|p| p.y >= 150.0 && p.x <= 400.0));
        assert!(section.points.iter().all(|p| p.y >= 150.0 && p.x >= 400.0));
        assert_eq!(section.points.len(), 6);
    }

    #[test]
    fn test_midship_section_edit_reaches_profiles() {
        let lines = HullLines::generate(&HullParams::default(), 11).unwrap();
        let midship = lines.midship_section().unwrap();
        assert_eq!(midship.x, 0.0);

        // Section 1 is midship; move its starboard bilge point
        let edit = LineEdit {
            line: LineKind::CrossSection(1),
            point: 3,
            coords: Point2::new(2.0, -1.0),
        };
        let edited = lines.apply(&edit).unwrap();
        let viewport = Viewport::new(600, 300);
        let before = lines.to_profiles(viewport);
        let after = edited.to_profiles(viewport);
        assert_ne!(before.get(MIDSHIP_SECTION), after.get(MIDSHIP_SECTION));
        assert_eq!(before.get(SIDE_PROFILE), after.get(SIDE_PROFILE));
    }

    #[test]
    fn test_profiles_without_sections() {
        let mut lines = HullLines::generate(&HullParams::default(), 11).unwrap();
        lines.cross_sections.clear();
        assert!(lines.midship_section().is_none());
        assert_eq!(lines.to_profiles(Viewport::new(300, 200)).len(), 2);
    }
}
