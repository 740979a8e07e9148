/// Viewer configuration shared by the terminal and web front ends
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hull::HullParams;
use crate::projection::CameraConfig;
use crate::render::{ProfileRenderer, WireframeRenderer};
use crate::scene::{GridHelper, LineStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub wireframe_style: LineStyle,
    /// Reference grid drawn under the wireframe, `null` to hide it
    pub grid: Option<GridHelper>,
    pub profile_line_width: f32,
    /// Label distance above a polyline's first point, in pixels
    pub label_offset: f32,
    pub frame_rate: u32,
    /// Delay between simulated updates
    pub feed_delay_ms: u64,
    /// Samples along the hull length
    pub stations: usize,
    pub hull: HullParams,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            wireframe_style: LineStyle::default(),
            grid: Some(GridHelper::default()),
            profile_line_width: 2.0,
            label_offset: 8.0,
            frame_rate: 30,
            feed_delay_ms: 2000,
            stations: 21,
            hull: HullParams::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frame_rate.max(1)))
    }

    pub fn feed_delay(&self) -> Duration {
        Duration::from_millis(self.feed_delay_ms)
    }

    pub fn wireframe_renderer(&self) -> WireframeRenderer {
        WireframeRenderer::new(self.wireframe_style).with_auto_frame(self.camera.auto_frame)
    }

    pub fn profile_renderer(&self) -> ProfileRenderer {
        ProfileRenderer {
            line_width: self.profile_line_width,
            label_offset: self.label_offset,
        }
    }

    pub fn helpers(&self) -> Vec<GridHelper> {
        self.grid.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{"frame_rate": 60, "grid": null}"#).unwrap();
        assert_eq!(config.frame_rate, 60);
        assert!(config.grid.is_none());
        assert_eq!(config.stations, 21);
        assert_eq!(config.hull, HullParams::default());
    }

    #[test]
    fn test_nested_overrides() {
        let json = r#"{
            "camera": {"fov_degrees": 60, "mode": "orthographic", "auto_frame": true},
            "wireframe_style": {"color": {"r": 255, "g": 0, "b": 0}, "width": 2.0},
            "hull": {"lpp": 100, "beam": 20, "depth": 18, "draft": 8, "displacement": 5000}
        }"#;
        let config = ViewerConfig::from_json(json).unwrap();
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert!(config.wireframe_renderer().auto_frame);
        assert_eq!(config.hull.loa, None);
        assert!(config.hull.validate().is_ok());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            ViewerConfig::from_json("{frame_rate"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_frame_interval_never_divides_by_zero() {
        let config = ViewerConfig {
            frame_rate: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_secs(1));
    }
}
