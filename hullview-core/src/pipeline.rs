/// Geometry update and redraw pipeline
///
/// A `Pipeline` is the single context object a front end builds at startup.
/// It owns the authoritative model, the renderer and the surface, and is the
/// only place the model is mutated. All entry points run to completion, so a
/// render pass always sees a fully replaced dataset.
use log::{debug, info, warn};

use crate::error::Result;
use crate::geometry::{ProfileSet, Wireframe};
use crate::model::GeometryModel;
use crate::render::{ProfileRenderer, Renderer, WireframeRenderer};
use crate::viewport::Viewport;

pub struct Pipeline<R, S>
where
    R: Renderer<S>,
{
    model: GeometryModel<R::Geometry>,
    renderer: R,
    surface: S,
    viewport: Viewport,
    frames: u64,
}

/// 3D wireframe pipeline over any [`crate::Surface3d`]
pub type WireframePipeline<S> = Pipeline<WireframeRenderer, S>;

/// 2D profile pipeline over any [`crate::Surface2d`]
pub type ProfilePipeline<S> = Pipeline<ProfileRenderer, S>;

impl<R, S> Pipeline<R, S>
where
    R: Renderer<S>,
{
    /// Validate the initial dataset, size the surface, and draw the first frame
    pub fn new(
        initial: R::Geometry,
        renderer: R,
        mut surface: S,
        viewport: Viewport,
    ) -> Result<Self> {
        let model = GeometryModel::new(initial)?;
        renderer.resize(&mut surface, viewport);

        let mut pipeline = Self {
            model,
            renderer,
            surface,
            viewport,
            frames: 0,
        };
        pipeline.render();
        Ok(pipeline)
    }

    /// One render pass over the current snapshot
    pub fn render(&mut self) {
        self.renderer.render(self.model.snapshot(), &mut self.surface);
        self.frames += 1;
        debug!("frame {} rendered (model v{})", self.frames, self.model.version());
    }

    /// Replace the model with `data` and render once. A rejected update leaves
    /// the previous model authoritative and nothing is drawn.
    pub fn on_new_data(&mut self, data: R::Geometry) -> Result<()> {
        if let Err(e) = self.model.replace(data) {
            warn!("update rejected: {}", e);
            return Err(e);
        }
        info!("model updated to v{}", self.model.version());
        self.render();
        Ok(())
    }

    /// Apply new surface dimensions and render once. The model is untouched.
    pub fn on_resize(&mut self, viewport: Viewport) {
        info!(
            "viewport resized {}x{} -> {}x{}",
            self.viewport.width, self.viewport.height, viewport.width, viewport.height
        );
        self.viewport = viewport;
        self.renderer.resize(&mut self.surface, viewport);
        self.render();
    }

    pub fn model(&self) -> &GeometryModel<R::Geometry> {
        &self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl<S: crate::Surface3d> Pipeline<WireframeRenderer, S> {
    pub fn wireframe(&self) -> &Wireframe {
        self.model.snapshot()
    }
}

impl<S: crate::Surface2d> Pipeline<ProfileRenderer, S> {
    pub fn profiles(&self) -> &ProfileSet {
        self.model.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::{Color, Polyline};
    use crate::testing::{Call2d, RecordingSurface2d, RecordingSurface3d};
    use nalgebra::{Point2, Point3};

    fn cube_pipeline() -> WireframePipeline<RecordingSurface3d> {
        Pipeline::new(
            Wireframe::cube(1.0),
            WireframeRenderer::default(),
            RecordingSurface3d::default(),
            Viewport::new(800, 600),
        )
        .unwrap()
    }

    fn six_points(y: f32) -> Vec<Point2<f32>> {
        (0..6).map(|i| Point2::new(i as f32 * 10.0, y)).collect()
    }

    #[test]
    fn test_initial_frame_uses_viewport() {
        let pipeline = cube_pipeline();
        let surface = pipeline.surface();
        assert_eq!(surface.viewport, Some(Viewport::new(800, 600)));
        assert_eq!(surface.frames.len(), 1);
        assert_eq!(pipeline.frames_rendered(), 1);
    }

    #[test]
    fn test_moving_one_vertex_changes_only_incident_segments() {
        let mut pipeline = cube_pipeline();
        let before: Vec<_> = pipeline.surface().frames[0][0].segments().collect();
        assert_eq!(before.len(), 12);

        let mut moved = Wireframe::cube(1.0);
        moved.vertices[1] = Point3::new(1.0, -0.5, -0.5);
        pipeline.on_new_data(moved.clone()).unwrap();

        let after: Vec<_> = pipeline.surface().frames[1][0].segments().collect();
        assert_eq!(after.len(), 12);
        let changed: Vec<usize> = (0..12).filter(|&i| before[i] != after[i]).collect();
        for &i in &changed {
            assert!(moved.edges[i].contains(&1));
        }
        assert_eq!(changed.len(), 3);
        assert_eq!(before.len() - changed.len(), 9);
    }

    #[test]
    fn test_rejected_update_keeps_model_and_skips_render() {
        let mut pipeline = cube_pipeline();
        let mut bad = Wireframe::cube(1.0);
        bad.edges[4] = [4, 42];

        let err = pipeline.on_new_data(bad).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGeometry {
                edge: 4,
                index: 42,
                vertex_count: 8
            }
        );
        assert_eq!(pipeline.wireframe(), &Wireframe::cube(1.0));
        assert_eq!(pipeline.surface().frames.len(), 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut pipeline = cube_pipeline();
        pipeline.render();
        pipeline.render();
        let frames = &pipeline.surface().frames;
        assert_eq!(frames[1], frames[2]);
        assert_eq!(frames[1].len(), 1);
    }

    #[test]
    fn test_resize_updates_projection_before_next_pass() {
        let mut pipeline = cube_pipeline();
        pipeline.on_resize(Viewport::new(1000, 500));

        let surface = pipeline.surface();
        assert_eq!(surface.viewport, Some(Viewport::new(1000, 500)));
        assert_eq!(surface.frame_aspects.last(), Some(&Some(2.0)));
        assert_eq!(pipeline.model().version(), 1);
        assert_eq!(pipeline.viewport(), Viewport::new(1000, 500));
    }

    #[test]
    fn test_two_profiles_in_insertion_order() {
        let profiles = ProfileSet::new()
            .with(Polyline::new("Side profile", Color::rgb(52, 152, 219), six_points(10.0)))
            .with(Polyline::new("Half breadth", Color::rgb(46, 204, 113), six_points(40.0)));
        let pipeline = Pipeline::new(
            profiles,
            ProfileRenderer::default(),
            RecordingSurface2d::default(),
            Viewport::new(640, 480),
        )
        .unwrap();

        let surface = pipeline.surface();
        assert_eq!(surface.calls[0], Call2d::Resize(640, 480));
        assert_eq!(surface.calls[1], Call2d::Clear);
        assert_eq!(surface.strokes(), 2);
        assert_eq!(surface.labels(), ["Side profile", "Half breadth"]);
    }

    #[test]
    fn test_profile_resize_resizes_buffer_then_redraws() {
        let profiles =
            ProfileSet::new().with(Polyline::new("a", Color::rgb(0, 0, 0), six_points(5.0)));
        let mut pipeline = Pipeline::new(
            profiles,
            ProfileRenderer::default(),
            RecordingSurface2d::default(),
            Viewport::new(100, 100),
        )
        .unwrap();
        pipeline.surface_mut().calls.clear();

        pipeline.on_resize(Viewport::new(300, 200));
        let calls = &pipeline.surface().calls;
        assert_eq!(calls[0], Call2d::Resize(300, 200));
        assert_eq!(calls[1], Call2d::Clear);
        assert_eq!(pipeline.surface().strokes(), 1);
    }
}
