/// Viewport dimensions and change detection
use log::warn;

/// Pixel (or character cell) size of a drawable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Zero-sized dimensions are clamped to 1 so the aspect ratio stays finite
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Remembers the last observed surface size and reports changes
#[derive(Debug, Clone)]
pub struct ViewportWatcher {
    last: Viewport,
}

impl ViewportWatcher {
    pub fn new(initial: Viewport) -> Self {
        Self { last: initial }
    }

    /// Returns the new viewport when the dimensions differ from the last call
    pub fn observe(&mut self, width: u32, height: u32) -> Option<Viewport> {
        let next = Viewport::new(width, height);
        if next == self.last {
            return None;
        }
        if width == 0 || height == 0 {
            warn!(
                "surface reported {}x{}, clamping to {}x{}",
                width, height, next.width, next.height
            );
        }
        self.last = next;
        Some(next)
    }

    pub fn current(&self) -> Viewport {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_reports_only_changes() {
        let mut watcher = ViewportWatcher::new(Viewport::new(80, 24));
        assert_eq!(watcher.observe(80, 24), None);
        assert_eq!(watcher.observe(120, 40), Some(Viewport::new(120, 40)));
        assert_eq!(watcher.observe(120, 40), None);
        assert_eq!(watcher.current(), Viewport::new(120, 40));
    }

    #[test]
    fn test_zero_size_clamped() {
        let vp = Viewport::new(0, 10);
        assert_eq!(vp.width, 1);
        assert!((vp.aspect() - 0.1).abs() < 1e-6);
    }
}
