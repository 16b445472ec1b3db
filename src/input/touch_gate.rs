//! Touch filtering at the event source
//!
//! Touches that start over UI chrome, or while a modal prompt is open,
//! belong to the UI. They are dropped here so the gesture adapter only ever
//! sees drags on the canvas.

use std::collections::HashMap;

/// Axis-aligned region in viewport-normalized units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

impl From<[f32; 4]> for Region {
    fn from(r: [f32; 4]) -> Self {
        Self {
            x: r[0],
            y: r[1],
            width: r[2],
            height: r[3],
        }
    }
}

/// Decides which touches reach the engine
#[derive(Debug, Clone, Default)]
pub struct TouchGate {
    chrome: Vec<Region>,
    overlay_open: bool,
}

impl TouchGate {
    pub fn new(chrome: impl IntoIterator<Item = Region>) -> Self {
        Self {
            chrome: chrome.into_iter().collect(),
            overlay_open: false,
        }
    }

    /// A modal prompt covers the canvas
    pub fn set_overlay_open(&mut self, open: bool) {
        self.overlay_open = open;
    }

    /// Whether a touch starting at this normalized position may drive the gesture
    pub fn allows(&self, x: f32, y: f32) -> bool {
        !self.overlay_open && !self.chrome.iter().any(|r| r.contains(x, y))
    }
}

/// Touch phase as seen by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
}

/// Follows active touches and turns moves into pixel deltas
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: HashMap<u64, (f32, f32)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one touch event in pixels.
    ///
    /// Returns the drag delta for accepted moves. A touch the gate rejects
    /// at its start is ignored until it ends.
    pub fn handle(
        &mut self,
        gate: &TouchGate,
        id: u64,
        phase: TouchPhase,
        position: (f32, f32),
        viewport: (f32, f32),
    ) -> Option<(f32, f32)> {
        match phase {
            TouchPhase::Started => {
                let (nx, ny) = (position.0 / viewport.0.max(1.0), position.1 / viewport.1.max(1.0));
                if gate.allows(nx, ny) {
                    self.active.insert(id, position);
                } else {
                    log::debug!("Touch {} started over UI chrome; ignored", id);
                }
                None
            }
            TouchPhase::Moved => {
                let last = self.active.get_mut(&id)?;
                let delta = (position.0 - last.0, position.1 - last.1);
                *last = position;
                Some(delta)
            }
            TouchPhase::Ended => {
                self.active.remove(&id);
                None
            }
        }
    }

    /// Forget every touch (loop paused or touch disabled)
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (f32, f32) = (1000.0, 500.0);

    #[test]
    fn test_chrome_region_blocks_touch() {
        let gate = TouchGate::new([Region::from([0.0, 0.0, 1.0, 0.1])]);
        assert!(!gate.allows(0.5, 0.05));
        assert!(gate.allows(0.5, 0.5));
    }

    #[test]
    fn test_overlay_blocks_everything() {
        let mut gate = TouchGate::default();
        gate.set_overlay_open(true);
        assert!(!gate.allows(0.5, 0.5));
        gate.set_overlay_open(false);
        assert!(gate.allows(0.5, 0.5));
    }

    #[test]
    fn test_tracker_reports_move_deltas() {
        let gate = TouchGate::default();
        let mut tracker = TouchTracker::new();
        assert_eq!(tracker.handle(&gate, 1, TouchPhase::Started, (100.0, 100.0), VIEWPORT), None);
        assert_eq!(
            tracker.handle(&gate, 1, TouchPhase::Moved, (110.0, 95.0), VIEWPORT),
            Some((10.0, -5.0))
        );
        assert_eq!(
            tracker.handle(&gate, 1, TouchPhase::Moved, (112.0, 95.0), VIEWPORT),
            Some((2.0, 0.0))
        );
        tracker.handle(&gate, 1, TouchPhase::Ended, (112.0, 95.0), VIEWPORT);
        assert_eq!(tracker.handle(&gate, 1, TouchPhase::Moved, (200.0, 95.0), VIEWPORT), None);
    }

    #[test]
    fn test_touch_started_on_chrome_never_drags() {
        let gate = TouchGate::new([Region::from([0.0, 0.9, 1.0, 0.1])]);
        let mut tracker = TouchTracker::new();
        // 480 / 500 = 0.96, inside the bottom strip
        tracker.handle(&gate, 7, TouchPhase::Started, (500.0, 480.0), VIEWPORT);
        assert_eq!(tracker.handle(&gate, 7, TouchPhase::Moved, (500.0, 200.0), VIEWPORT), None);
    }
}
