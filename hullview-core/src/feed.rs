/// Simulated data feed: replacement datasets released on a fixed delay
use std::collections::VecDeque;
use std::time::Duration;

use nalgebra::Point2;

use crate::error::Result;
use crate::hull::{HullLines, LineEdit, LineKind};

/// Queue of datasets released one per `delay`. Time is passed in as the
/// elapsed duration since the feed's clock started, so the same feed works
/// with `Instant` in a terminal and animation-frame timestamps in a browser.
#[derive(Debug, Clone)]
pub struct TimedFeed<T> {
    delay: Duration,
    pending: VecDeque<T>,
    next_due: Duration,
}

impl<T> TimedFeed<T> {
    /// The first item becomes due `delay` after `start`
    pub fn new(delay: Duration, items: impl IntoIterator<Item = T>, start: Duration) -> Self {
        Self {
            delay,
            pending: items.into_iter().collect(),
            next_due: start + delay,
        }
    }

    /// Release the next item if it is due. At most one item per call, so a
    /// late poll never skips an update.
    pub fn poll(&mut self, elapsed: Duration) -> Option<T> {
        if elapsed < self.next_due {
            return None;
        }
        let item = self.pending.pop_front()?;
        self.next_due = elapsed + self.delay;
        Some(item)
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}

/// A short scripted sequence of hull edits: deepen the midship profile, then
/// widen the forward shoulder. Each step builds on the previous one.
pub fn simulated_hull_updates(lines: &HullLines) -> Result<Vec<HullLines>> {
    let mid = lines.side_profile.len() / 2;
    let forward = (lines.half_breadth.len() * 3) / 4;

    let mut edits = Vec::new();
    if let Some(p) = lines.side_profile.get(mid) {
        edits.push(LineEdit {
            line: LineKind::SideProfile,
            point: mid,
            coords: Point2::new(p.x, p.y * 1.2),
        });
    }
    if let Some(p) = lines.half_breadth.get(forward) {
        edits.push(LineEdit {
            line: LineKind::HalfBreadth,
            point: forward,
            coords: Point2::new(p.x, p.y * 1.3),
        });
    }

    let mut current = lines.clone();
    let mut updates = Vec::with_capacity(edits.len());
    for edit in &edits {
        current = current.apply(edit)?;
        updates.push(current.clone());
    }
    Ok(updates)
}
