/// Hullview Web - canvas front end for the hull viewer
///
/// Two canvases are driven from one animation-frame loop: a projected 3D
/// wireframe and the 2D lines plan. Each frame checks both canvases for a
/// layout size change and releases due simulated updates.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use hullview_core::{
    feed, HullLines, Pipeline, ProfilePipeline, ProfileSet, TimedFeed, ViewerConfig,
    ViewportWatcher, Wireframe, WireframePipeline,
};
use log::{info, warn};
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use web_sys::HtmlCanvasElement;

pub mod surface;

pub use surface::{element_viewport, CanvasSurface2d, CanvasSurface3d};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element '{}' is not a canvas", id)))
}

/// Convert an animation-frame timestamp to elapsed time. Negative and NaN
/// stamps count as zero; stamps too large for a `Duration` are `None`.
fn frame_elapsed(timestamp_ms: f64) -> Option<Duration> {
    Duration::try_from_secs_f64((timestamp_ms / 1000.0).max(0.0)).ok()
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Everything one viewer owns; lives behind `Rc<RefCell<..>>` on the
/// browser's single event loop
struct ViewerState {
    wireframe: WireframePipeline<CanvasSurface3d>,
    profiles: ProfilePipeline<CanvasSurface2d>,
    watch_3d: ViewportWatcher,
    watch_2d: ViewportWatcher,
    feed: TimedFeed<HullLines>,
}

impl ViewerState {
    fn tick(&mut self, timestamp_ms: f64) {
        let size = element_viewport(self.wireframe.surface().canvas());
        if let Some(viewport) = self.watch_3d.observe(size.width, size.height) {
            self.wireframe.on_resize(viewport);
        }
        let size = element_viewport(self.profiles.surface().canvas());
        if let Some(viewport) = self.watch_2d.observe(size.width, size.height) {
            self.profiles.on_resize(viewport);
        }

        let Some(elapsed) = frame_elapsed(timestamp_ms) else {
            warn!("unusable frame timestamp {}, feed not polled", timestamp_ms);
            return;
        };
        if let Some(lines) = self.feed.poll(elapsed) {
            let result = lines
                .to_wireframe()
                .and_then(|wireframe| self.wireframe.on_new_data(wireframe));
            if let Err(e) = result {
                warn!("simulated update v{} dropped: {}", lines.version, e);
            }
        }
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    state: Rc<RefCell<ViewerState>>,
}

#[wasm_bindgen]
impl WebViewer {
    /// Build both pipelines on the given canvases and draw the first frames.
    /// `config_json` overrides any subset of the viewer settings.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_3d_id: &str,
        canvas_2d_id: &str,
        config_json: Option<String>,
    ) -> Result<WebViewer, JsValue> {
        let config = match config_json {
            Some(json) => ViewerConfig::from_json(&json).map_err(js_err)?,
            None => ViewerConfig::default(),
        };

        let canvas_3d = canvas_by_id(canvas_3d_id)?;
        let canvas_2d = canvas_by_id(canvas_2d_id)?;
        let viewport_3d = element_viewport(&canvas_3d);
        let viewport_2d = element_viewport(&canvas_2d);

        let lines = HullLines::generate(&config.hull, config.stations).map_err(js_err)?;
        let updates = feed::simulated_hull_updates(&lines).map_err(js_err)?;

        let surface_3d = CanvasSurface3d::new(canvas_3d, &config.camera, config.helpers())?;
        let wireframe = Pipeline::new(
            lines.to_wireframe().map_err(js_err)?,
            config.wireframe_renderer(),
            surface_3d,
            viewport_3d,
        )
        .map_err(js_err)?;

        let profiles = Pipeline::new(
            lines.to_profiles(viewport_2d),
            config.profile_renderer(),
            CanvasSurface2d::new(canvas_2d)?,
            viewport_2d,
        )
        .map_err(js_err)?;

        info!(
            "web viewer ready: 3d {}x{}, 2d {}x{}",
            viewport_3d.width, viewport_3d.height, viewport_2d.width, viewport_2d.height
        );

        Ok(WebViewer {
            state: Rc::new(RefCell::new(ViewerState {
                wireframe,
                profiles,
                watch_3d: ViewportWatcher::new(viewport_3d),
                watch_2d: ViewportWatcher::new(viewport_2d),
                feed: TimedFeed::new(config.feed_delay(), updates, Duration::ZERO),
            })),
        })
    }

    /// Run the animation-frame loop until the page goes away
    pub fn start(&self) -> Result<(), JsValue> {
        let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let next = handle.clone();
        let state = self.state.clone();

        *handle.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            state.borrow_mut().tick(timestamp);
            if let Some(callback) = next.borrow().as_ref() {
                if let Err(e) = request_animation_frame(callback) {
                    warn!("animation loop stopped: {:?}", e);
                }
            }
        }));

        let first = handle.borrow();
        let callback = first
            .as_ref()
            .ok_or_else(|| JsValue::from_str("animation callback missing"))?;
        request_animation_frame(callback)?;
        Ok(())
    }

    /// Advance one frame by hand, for hosts that run their own loop
    pub fn frame(&self, timestamp_ms: f64) {
        self.state.borrow_mut().tick(timestamp_ms);
    }

    /// Replace the wireframe with `{"vertices": [[x,y,z],..], "edges": [[a,b],..]}`
    pub fn push_wireframe(&self, json: &str) -> Result<(), JsValue> {
        let wireframe: Wireframe = serde_json::from_str(json).map_err(js_err)?;
        self.state
            .borrow_mut()
            .wireframe
            .on_new_data(wireframe)
            .map_err(js_err)
    }

    /// Replace the profile polylines, given in canvas pixel coordinates
    pub fn push_profiles(&self, json: &str) -> Result<(), JsValue> {
        let profiles: ProfileSet = serde_json::from_str(json).map_err(js_err)?;
        self.state
            .borrow_mut()
            .profiles
            .on_new_data(profiles)
            .map_err(js_err)
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    Ok(())
}
