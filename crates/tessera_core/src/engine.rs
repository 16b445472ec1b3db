//! The animation loop
//!
//! [`Engine`] owns every piece of per-frame state. Host callbacks feed the
//! producer methods (`on_pointer_moved`, `on_wheel`, ...), which only
//! accumulate. [`Engine::tick`] drains that input once, advances all
//! adapters, and returns a [`Frame`] ready for a presenter.

use tessera_input::{
    AxisId, DeviceOrientationAdapter, FusionConfig, GestureConfig, InputFusionEngine, InputSample,
    OrientationConfig, OrientationReading, OrientationState, RotationAxisSet, TouchGestureAdapter,
    WheelConfig,
};
use tessera_math::mat4::Mat4;
use tessera_math::tesseract::VERTEX_COUNT;
use tessera_math::{Tesseract4D, TesseractData};

use crate::command::{CommandOutcome, EngineCommand};
use crate::composer::{Platform, RotationComposer};
use crate::error::EngineError;
use crate::host::{ConsentStore, MemoryConsentStore, NullSensorHost, SensorHost};
use crate::projection::{ProjectedVertex, ProjectionConfig, ProjectionParam, ProjectionParams, ProjectionPipeline};
use crate::raster::EdgeRasterizer;
use crate::snapshot::EngineSnapshot;

/// Everything needed to build an [`Engine`]
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub platform: Platform,
    /// Longest frame time advanced in one tick, in seconds
    pub max_frame_time: Option<f32>,
    pub fusion: FusionConfig,
    pub wheel: WheelConfig,
    pub orientation: OrientationConfig,
    pub gesture: GestureConfig,
    pub projection: ProjectionConfig,
}

/// Default cap on a single tick's dt
pub const DEFAULT_MAX_FRAME_TIME: f32 = 0.25;

/// Per-tick input from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Whether the view is currently visible/running; owned by the host
    pub active: bool,
    /// Seconds since the previous tick
    pub dt: f32,
}

impl TickContext {
    pub fn active(dt: f32) -> Self {
        Self { active: true, dt }
    }

    pub fn inactive() -> Self {
        Self { active: false, dt: 0.0 }
    }
}

/// One finished frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Engine time at this frame, in seconds
    pub time: f32,
    pub rotation: Mat4,
    pub params: ProjectionParams,
    pub vertices: [ProjectedVertex; VERTEX_COUNT],
    pub rasterizer: EdgeRasterizer,
}

/// The interactive tesseract engine
pub struct Engine {
    tesseract: Tesseract4D,
    axes: RotationAxisSet,
    sample: InputSample,
    fusion: InputFusionEngine,
    orientation: DeviceOrientationAdapter,
    gesture: TouchGestureAdapter,
    composer: RotationComposer,
    projection: ProjectionPipeline,
    time: f32,
    max_frame_time: f32,
    active: bool,
    listener_registered: bool,
    consent: Box<dyn ConsentStore>,
    sensors: Box<dyn SensorHost>,
}

impl Engine {
    /// Create an engine for a validated dataset
    pub fn new(config: EngineConfig, tesseract: Tesseract4D, resolution: [u32; 2]) -> Self {
        log::info!("Creating tesseract engine ({:?} platform)", config.platform);
        Self {
            tesseract,
            axes: RotationAxisSet::new(),
            sample: InputSample::new(),
            fusion: InputFusionEngine::new(config.fusion, config.wheel),
            orientation: DeviceOrientationAdapter::new(config.orientation),
            gesture: TouchGestureAdapter::new(config.gesture),
            composer: RotationComposer::new(config.platform),
            projection: ProjectionPipeline::new(config.projection, resolution),
            time: 0.0,
            max_frame_time: config.max_frame_time.unwrap_or(DEFAULT_MAX_FRAME_TIME),
            active: true,
            listener_registered: false,
            consent: Box::new(MemoryConsentStore::default()),
            sensors: Box::new(NullSensorHost),
        }
    }

    /// Create an engine from unvalidated dataset data
    pub fn from_data(config: EngineConfig, data: &TesseractData, resolution: [u32; 2]) -> Result<Self, EngineError> {
        let tesseract = Tesseract4D::from_data(data)?;
        Ok(Self::new(config, tesseract, resolution))
    }

    /// Builder: remember permission answers somewhere else
    pub fn with_consent_store<C: ConsentStore + 'static>(mut self, store: C) -> Self {
        self.consent = Box::new(store);
        self
    }

    /// Builder: route sensor subscriptions to the host
    pub fn with_sensor_host<S: SensorHost + 'static>(mut self, host: S) -> Self {
        self.sensors = Box::new(host);
        self
    }

    // --- producers ---

    /// Pointer position in viewport-normalized units (0..1, top-left origin)
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) {
        if self.active {
            self.sample.pointer_moved(x, y);
        }
    }

    pub fn on_pointer_left(&mut self) {
        self.sample.pointer_left();
    }

    /// Wheel delta in lines
    pub fn on_wheel(&mut self, lines: f32) {
        if self.active {
            self.sample.wheel(lines);
        }
    }

    /// Touch drag delta in pixels; normalized by the current resolution
    pub fn on_touch_drag(&mut self, dx: f32, dy: f32) {
        if !self.active || !self.gesture.is_enabled() {
            return;
        }
        let [w, h] = self.projection.params().resolution;
        self.sample.touch_drag(dx / w as f32, dy / h as f32);
    }

    /// Raw orientation sample; dropped unless the listener is subscribed
    pub fn on_orientation(&mut self, reading: OrientationReading) {
        if self.orientation.is_listening() {
            self.sample.orientation(reading);
        } else {
            log::trace!("Dropping orientation sample: no listener");
        }
    }

    /// Output size changed
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.projection.set_resolution(width, height);
    }

    // --- commands ---

    /// Apply one command
    pub fn apply(&mut self, command: EngineCommand) -> CommandOutcome {
        log::debug!("Applying {:?}", command);
        match command {
            EngineCommand::ToggleAxis(axis) => {
                let enabled = self.axes.toggle(axis);
                log::info!("Axis {} {}", axis, if enabled { "enabled" } else { "disabled" });
                CommandOutcome::AxisToggled { axis, enabled }
            }
            EngineCommand::ResetAll => {
                self.axes.reset();
                self.orientation.reset();
                self.gesture.reset();
                self.projection.reset();
                log::info!("All rotations reset");
                CommandOutcome::Reset
            }
            EngineCommand::SetParameter(param, value) => {
                let value = self.projection.set_target(param, value);
                CommandOutcome::ParameterTarget { param, value }
            }
            EngineCommand::SetOrientationEnabled(true) => {
                let remembered = self.consent.load();
                let state = self.orientation.enable(remembered);
                if state == OrientationState::PermissionPending {
                    self.sensors.request_orientation_permission();
                }
                if !self.active {
                    self.orientation.pause();
                }
                self.sync_listener();
                CommandOutcome::Orientation(self.orientation.state())
            }
            EngineCommand::SetOrientationEnabled(false) => {
                self.orientation.disable(&mut self.axes);
                self.sync_listener();
                CommandOutcome::Orientation(self.orientation.state())
            }
            EngineCommand::SetTouchEnabled(enabled) => {
                self.gesture.set_enabled(enabled);
                if !enabled {
                    self.sample.discard_touch();
                }
                log::info!("Touch gestures {}", if enabled { "enabled" } else { "disabled" });
                CommandOutcome::TouchEnabled(enabled)
            }
            EngineCommand::ResolvePermission(granted) => {
                if self.orientation.state() == OrientationState::PermissionPending {
                    self.consent.store(granted);
                }
                self.orientation.resolve_permission(granted);
                if !self.active {
                    self.orientation.pause();
                }
                self.sync_listener();
                CommandOutcome::Orientation(self.orientation.state())
            }
        }
    }

    /// Parse and apply a string command; unknown names are logged and ignored
    pub fn apply_str(&mut self, command: &str) -> CommandOutcome {
        match command.parse::<EngineCommand>() {
            Ok(command) => self.apply(command),
            Err(e) => {
                log::warn!("Ignoring command '{}': {}", command, e);
                CommandOutcome::Ignored
            }
        }
    }

    // --- loop ---

    /// Advance one frame. Returns `None` while inactive.
    pub fn tick(&mut self, ctx: &TickContext) -> Option<Frame> {
        // 1. Activity edges
        if !ctx.active {
            if self.active {
                self.active = false;
                self.orientation.pause();
                self.sync_listener();
                self.sample.clear();
                self.gesture.reset();
                log::info!("Animation loop paused");
            }
            return None;
        }
        if !self.active {
            self.active = true;
            self.orientation.resume();
            self.sync_listener();
            log::info!("Animation loop resumed");
        }

        // 2. Time, with over-budget frames truncated rather than queued
        let dt = if ctx.dt.is_finite() {
            ctx.dt.clamp(0.0, self.max_frame_time)
        } else {
            0.0
        };
        self.time += dt;

        // 3. Drain input exactly once
        let input = self.sample.drain();

        // 4. Adapters
        self.fusion.update(&mut self.axes, &input);
        self.orientation.update(dt, input.orientation, &mut self.axes);
        self.gesture.update(input.touch_drag, &mut self.axes);

        // 5. Projection parameters ease toward their targets
        self.projection.interpolate();

        // 6. Compose, project, rasterize
        let rotation = self.composer.compose(&self.axes);
        let vertices = self.projection.project(rotation, self.tesseract.vertices());
        let pixels = vertices.map(|v| v.pixel);
        let rasterizer = EdgeRasterizer::new(&pixels, self.tesseract.cycle());

        Some(Frame {
            time: self.time,
            rotation,
            params: *self.projection.params(),
            vertices,
            rasterizer,
        })
    }

    /// Tell the host when the orientation subscription should change
    fn sync_listener(&mut self) {
        let wanted = self.orientation.is_listening();
        if wanted == self.listener_registered {
            return;
        }
        self.listener_registered = wanted;
        self.sensors.set_orientation_listener(wanted);
        if !wanted {
            self.sample.discard_orientation();
        }
        log::debug!(
            "Orientation listener {}",
            if wanted { "subscribed" } else { "unsubscribed" }
        );
    }

    // --- accessors ---

    pub fn axes(&self) -> &RotationAxisSet {
        &self.axes
    }

    pub fn angle(&self, axis: AxisId) -> f32 {
        self.axes.angle(axis)
    }

    pub fn orientation_state(&self) -> OrientationState {
        self.orientation.state()
    }

    /// True while the host should deliver orientation samples
    pub fn is_orientation_listening(&self) -> bool {
        self.listener_registered
    }

    pub fn is_touch_enabled(&self) -> bool {
        self.gesture.is_enabled()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn params(&self) -> &ProjectionParams {
        self.projection.params()
    }

    pub fn param_targets(&self) -> &ProjectionParams {
        self.projection.target()
    }

    /// Current target of one projection parameter
    pub fn param_target(&self, param: ProjectionParam) -> f32 {
        self.projection.target_value(param)
    }

    pub fn platform(&self) -> Platform {
        self.composer.platform()
    }

    pub fn tesseract(&self) -> &Tesseract4D {
        &self.tesseract
    }

    /// Engine time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            time: self.time,
            platform: self.composer.platform(),
            active: self.active,
            axes: self.axes.iter().copied().collect(),
            params: *self.projection.params(),
            orientation: self.orientation.state(),
            touch_enabled: self.gesture.is_enabled(),
        }
    }
}
