//! Whether the view is animating
//!
//! The loop polls only while the view is active. Pausing with Tab or hiding
//! the window lets the event loop sleep until something wakes it.

use winit::event_loop::ControlFlow;

/// Pause and visibility state of the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    /// Paused with Tab
    user_paused: bool,
    /// Window hidden or minimized
    occluded: bool,
}

impl Activity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.user_paused && !self.occluded
    }

    pub fn is_paused(&self) -> bool {
        self.user_paused
    }

    pub fn is_occluded(&self) -> bool {
        self.occluded
    }

    /// Flip the user pause. Returns true when this resumed the view.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.user_paused)
    }

    /// Returns true when this resumed the view
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let was_active = self.is_active();
        self.user_paused = paused;
        !was_active && self.is_active()
    }

    /// Returns true when this resumed the view
    pub fn set_occluded(&mut self, occluded: bool) -> bool {
        let was_active = self.is_active();
        self.occluded = occluded;
        !was_active && self.is_active()
    }

    /// Whether a finished frame should ask for the next one
    pub fn wants_next_frame(&self) -> bool {
        self.is_active()
    }

    pub fn control_flow(&self) -> ControlFlow {
        if self.is_active() {
            ControlFlow::Poll
        } else {
            ControlFlow::Wait
        }
    }
}
