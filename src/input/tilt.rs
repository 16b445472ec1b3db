//! Simulated tilt sensor for hosts without an orientation sensor
//!
//! Arrow keys tilt a virtual device. The engine's sensor host handle
//! subscribes and unsubscribes it exactly like a real sensor listener, and
//! the device only emits readings while subscribed.

use std::cell::Cell;
use std::rc::Rc;

use tessera_core::{OrientationReading, SensorHost};

#[derive(Debug, Default)]
struct Link {
    subscribed: Cell<bool>,
    prompt_requested: Cell<bool>,
}

/// The virtual device
#[derive(Debug)]
pub struct SimulatedTilt {
    reading: OrientationReading,
    step_degrees: f32,
    link: Rc<Link>,
}

/// Handed to the engine as its [`SensorHost`]
#[derive(Debug, Clone)]
pub struct TiltSensorHost {
    link: Rc<Link>,
}

impl SensorHost for TiltSensorHost {
    fn set_orientation_listener(&mut self, subscribed: bool) {
        self.link.subscribed.set(subscribed);
        log::info!(
            "Simulated tilt sensor {}",
            if subscribed { "subscribed" } else { "unsubscribed" }
        );
    }

    fn request_orientation_permission(&mut self) {
        self.link.prompt_requested.set(true);
        log::info!("Orientation permission requested: press Y to allow, N to deny");
    }
}

impl SimulatedTilt {
    pub fn new(step_degrees: f32) -> Self {
        Self {
            reading: OrientationReading::default(),
            step_degrees,
            link: Rc::new(Link::default()),
        }
    }

    /// A sensor host bound to this device
    pub fn host(&self) -> TiltSensorHost {
        TiltSensorHost {
            link: Rc::clone(&self.link),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.link.subscribed.get()
    }

    /// True once after the engine asked for a permission prompt
    pub fn take_prompt_request(&self) -> bool {
        self.link.prompt_requested.replace(false)
    }

    /// Tilt by whole steps on each channel
    pub fn tilt(&mut self, beta: f32, gamma: f32, alpha: f32) {
        let r = &mut self.reading;
        r.beta = (r.beta + beta * self.step_degrees).clamp(-180.0, 180.0);
        r.gamma = (r.gamma + gamma * self.step_degrees).clamp(-90.0, 90.0);
        r.alpha = (r.alpha + alpha * self.step_degrees).rem_euclid(360.0);
    }

    pub fn reading(&self) -> OrientationReading {
        self.reading
    }

    /// The current reading, only while someone is listening
    pub fn sample(&self) -> Option<OrientationReading> {
        self.is_subscribed().then_some(self.reading)
    }
}
