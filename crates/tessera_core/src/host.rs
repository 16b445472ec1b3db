//! Seams between the engine and whatever embeds it
//!
//! The engine never talks to a window system, a sensor API or storage
//! directly. The host implements these traits and hands them in.

use crate::engine::Frame;

/// Sensor subscription control
pub trait SensorHost {
    /// Subscribe to (`true`) or unsubscribe from (`false`) orientation events.
    /// Called only when the desired state changes.
    fn set_orientation_listener(&mut self, subscribed: bool);

    /// Show the platform's permission prompt. The answer comes back as
    /// [`EngineCommand::ResolvePermission`](crate::EngineCommand::ResolvePermission).
    fn request_orientation_permission(&mut self) {}
}

/// Host without sensors
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSensorHost;

impl SensorHost for NullSensorHost {
    fn set_orientation_listener(&mut self, _subscribed: bool) {}
}

/// Where the answer to the orientation permission prompt is remembered
pub trait ConsentStore {
    /// The remembered answer, if the user was ever asked
    fn load(&self) -> Option<bool>;
    fn store(&mut self, granted: bool);
}

/// Consent kept for the lifetime of the process
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryConsentStore {
    granted: Option<bool>,
}

impl MemoryConsentStore {
    pub fn new(granted: Option<bool>) -> Self {
        Self { granted }
    }
}

impl ConsentStore for MemoryConsentStore {
    fn load(&self) -> Option<bool> {
        self.granted
    }

    fn store(&mut self, granted: bool) {
        self.granted = Some(granted);
    }
}

/// Draws finished frames
pub trait Presenter {
    type Error;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}
