/// HTML canvas implementations of the drawing surfaces
use hullview_core::{
    Camera, CameraConfig, Color, GridHelper, LineBatch, Scene, Surface2d, Surface3d, Viewport,
};
use nalgebra::{Point2, Point3};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const LABEL_FONT: &str = "12px sans-serif";

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has an unexpected type"))
}

/// Size of the canvas element's layout box, which the backing buffer follows
pub fn element_viewport(canvas: &HtmlCanvasElement) -> Viewport {
    Viewport::new(
        canvas.client_width().max(0) as u32,
        canvas.client_height().max(0) as u32,
    )
}

#[allow(deprecated)]
fn set_stroke(ctx: &CanvasRenderingContext2d, color: Color, width: f32) {
    ctx.set_stroke_style(&JsValue::from_str(&color.to_css()));
    ctx.set_line_width(width as f64);
}

/// Software wireframe surface: projects the scene onto a 2D canvas on every
/// submitted frame
pub struct CanvasSurface3d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scene: Scene,
    camera: Camera,
}

impl CanvasSurface3d {
    pub fn new(
        canvas: HtmlCanvasElement,
        camera: &CameraConfig,
        helpers: Vec<GridHelper>,
    ) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        let viewport = element_viewport(&canvas);
        Ok(Self {
            canvas,
            ctx,
            scene: Scene::new(helpers),
            camera: Camera::from_config(camera, viewport),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }
}

impl Surface3d for CanvasSurface3d {
    fn attach_to(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn set_projection(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    fn set_primitives(&mut self, batches: &[LineBatch]) {
        self.scene.set_lines(batches);
    }

    fn submit_frame(&mut self) {
        let viewport = self.viewport();
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

        for segment in self.scene.project(&self.camera, viewport) {
            set_stroke(&self.ctx, segment.color, segment.width);
            self.ctx.begin_path();
            self.ctx.move_to(segment.from.0 as f64, segment.from.1 as f64);
            self.ctx.line_to(segment.to.0 as f64, segment.to.1 as f64);
            self.ctx.stroke();
        }
    }

    fn frame_bounds(&mut self, min: &Point3<f32>, max: &Point3<f32>) {
        self.camera.frame_bounds(min, max);
    }
}

/// Profile surface drawing directly with the canvas 2D API
pub struct CanvasSurface2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface2d {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface2d for CanvasSurface2d {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn stroke_path(&mut self, points: &[Point2<f32>], color: Color, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        set_stroke(&self.ctx, color, width);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }

    #[allow(deprecated)]
    fn draw_text(&mut self, text: &str, position: Point2<f32>, color: Color) {
        self.ctx.set_font(LABEL_FONT);
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
        if let Err(e) = self.ctx.fill_text(text, position.x as f64, position.y as f64) {
            log::warn!("fill_text failed for label {:?}: {:?}", text, e);
        }
    }

    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}
