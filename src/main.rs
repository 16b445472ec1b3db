//! Tessera - interactive 4D hypercube viewer
//!
//! Rotates a tesseract through its 4D planes from pointer, wheel, touch and
//! (simulated) device tilt, and draws its perspective projection.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, TouchPhase as WinitTouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use tessera::activity::Activity;
use tessera::config::AppConfig;
use tessera::consent::FileConsentStore;
use tessera::headless::{self, LineFieldPresenter};
use tessera::input::{
    InputAction, InputMapper, ParameterSteps, Region, SimulatedTilt, TouchGate, TouchPhase, TouchTracker,
};
use tessera::systems::{RenderError, RenderSystem, WindowSystem};
use tessera_core::{Engine, EngineCommand, OrientationState, Presenter, Tesseract4D, TickContext};

/// Pixels treated as one wheel line for touchpad scrolling
const PIXELS_PER_LINE: f32 = 40.0;

/// Seconds between window title refreshes
const TITLE_INTERVAL: f32 = 0.25;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive 4D hypercube viewer")]
struct Args {
    /// Run this many ticks with scripted input and no window, then exit
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,

    /// Where a headless run writes its last frame (PGM)
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Headless output width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Headless output height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Directory holding default.toml and user.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Commands applied at startup, e.g. `toggle:rx` or `set:fov=90`
    #[arg(long = "command", short = 'c', value_name = "COMMAND")]
    commands: Vec<String>,
}

/// Build the engine with the host seams and start-up toggles applied
fn build_engine(
    config: &AppConfig,
    tesseract: Tesseract4D,
    resolution: [u32; 2],
    tilt: &SimulatedTilt,
    commands: &[String],
) -> Engine {
    let mut engine = Engine::new(config.engine_config(), tesseract, resolution)
        .with_consent_store(FileConsentStore::new(&config.input.consent_path))
        .with_sensor_host(tilt.host());

    if !config.engine.touch_enabled {
        engine.apply(EngineCommand::SetTouchEnabled(false));
    }
    if config.engine.orientation_on_start {
        engine.apply(EngineCommand::SetOrientationEnabled(true));
    }
    for command in commands {
        let outcome = engine.apply_str(command);
        log::info!("{} -> {:?}", command, outcome);
    }
    engine
}

/// Main application state
struct App {
    config: AppConfig,
    engine: Engine,
    tilt: SimulatedTilt,
    mapper: InputMapper,
    gate: TouchGate,
    touches: TouchTracker,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    last_frame: Instant,
    since_title: f32,
    activity: Activity,
}

impl App {
    fn new(config: AppConfig, engine: Engine, tilt: SimulatedTilt) -> Self {
        let mapper = InputMapper::new(ParameterSteps {
            fov: config.input.fov_step,
            perspective: config.input.perspective_step,
            camera_z: config.input.camera_z_step,
        });
        let gate = TouchGate::new(config.input.chrome_regions.iter().copied().map(Region::from));
        let mut app = Self {
            config,
            engine,
            tilt,
            mapper,
            gate,
            touches: TouchTracker::new(),
            window: None,
            renderer: None,
            last_frame: Instant::now(),
            since_title: TITLE_INTERVAL,
            activity: Activity::new(),
        };
        app.sync_overlay();
        app
    }

    /// Apply a pause or visibility change to the event loop
    fn activity_changed(&mut self, event_loop: &ActiveEventLoop, resumed: bool) {
        event_loop.set_control_flow(self.activity.control_flow());
        if resumed {
            self.last_frame = Instant::now();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    /// Block canvas touches while a permission prompt is open
    fn sync_overlay(&mut self) {
        if self.tilt.take_prompt_request() {
            self.gate.set_overlay_open(true);
        }
        if self.engine.orientation_state() != OrientationState::PermissionPending {
            self.gate.set_overlay_open(false);
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        match action {
            InputAction::Command(command) => {
                let outcome = self.engine.apply(command);
                log::debug!("{:?}", outcome);
            }
            InputAction::ToggleOrientation => {
                let on = self.engine.orientation_state() != OrientationState::Uninitialized;
                self.engine.apply(EngineCommand::SetOrientationEnabled(!on));
            }
            InputAction::ToggleTouch => {
                let enabled = !self.engine.is_touch_enabled();
                self.engine.apply(EngineCommand::SetTouchEnabled(enabled));
                if !enabled {
                    self.touches.clear();
                }
            }
            InputAction::AdjustParameter(param, delta) => {
                let value = self.engine.param_target(param) + delta;
                let outcome = self.engine.apply(EngineCommand::SetParameter(param, value));
                log::debug!("{:?}", outcome);
            }
            InputAction::Tilt { beta, gamma, alpha } => {
                self.tilt.tilt(beta, gamma, alpha);
            }
            InputAction::ToggleActive => {
                let resumed = self.activity.toggle_pause();
                self.activity_changed(event_loop, resumed);
            }
            InputAction::LogSnapshot => match self.engine.snapshot().to_ron() {
                Ok(text) => log::info!("Engine snapshot:\n{}", text),
                Err(e) => log::warn!("Failed to serialize snapshot: {}", e),
            },
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => event_loop.exit(),
        }
        self.sync_overlay();
    }

    fn viewport(&self) -> (f32, f32) {
        let [w, h] = self
            .window
            .as_ref()
            .map(WindowSystem::resolution)
            .unwrap_or([self.config.window.width, self.config.window.height]);
        (w as f32, h as f32)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // 1. Frame time
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        // 2. Sensor sample for this frame
        if let Some(reading) = self.tilt.sample() {
            self.engine.on_orientation(reading);
        }

        // 3. Advance the engine
        let ctx = if self.activity.is_active() {
            TickContext::active(dt)
        } else {
            self.touches.clear();
            TickContext::inactive()
        };
        let frame = self.engine.tick(&ctx);

        // 4. Present
        if let (Some(frame), Some(renderer)) = (frame, &mut self.renderer) {
            match renderer.present(&frame) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    let (w, h) = renderer.size();
                    renderer.resize(w, h);
                }
                Err(RenderError::OutOfMemory) => {
                    log::error!("Out of GPU memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        // 5. Title
        self.since_title += dt;
        if self.config.debug.title_snapshot && self.since_title >= TITLE_INTERVAL {
            self.since_title = 0.0;
            if let Some(window) = &self.window {
                window.update_title(Some(&self.engine.snapshot().summary()));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let [w, h] = window.resolution();
        self.engine.set_resolution(w, h);

        match RenderSystem::new(window.window().clone(), &self.config.rendering, self.config.window.vsync) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        log::info!(
            "Window ready ({}x{}). Keys: 1-7 axes, R reset, O orientation, T touch, Tab pause",
            w,
            h
        );
        self.window = Some(window);
        self.last_frame = Instant::now();
        event_loop.set_control_flow(self.activity.control_flow());
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.engine.set_resolution(size.width, size.height);
            }

            WindowEvent::Occluded(occluded) => {
                let resumed = self.activity.set_occluded(occluded);
                self.activity_changed(event_loop, resumed);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (w, h) = self.viewport();
                self.engine
                    .on_pointer_moved(position.x as f32 / w.max(1.0), position.y as f32 / h.max(1.0));
            }

            WindowEvent::CursorLeft { .. } => self.engine.on_pointer_left(),

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.engine.on_wheel(lines);
            }

            WindowEvent::Touch(touch) => {
                if !self.engine.is_touch_enabled() {
                    return;
                }
                let phase = match touch.phase {
                    WinitTouchPhase::Started => TouchPhase::Started,
                    WinitTouchPhase::Moved => TouchPhase::Moved,
                    WinitTouchPhase::Ended | WinitTouchPhase::Cancelled => TouchPhase::Ended,
                };
                let position = (touch.location.x as f32, touch.location.y as f32);
                let viewport = self.viewport();
                if let Some((dx, dy)) = self.touches.handle(&self.gate, touch.id, phase, position, viewport) {
                    self.engine.on_touch_drag(dx, dy);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = self.mapper.map_keyboard(key, event.state) {
                        self.handle_action(event_loop, action);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if self.activity.wants_next_frame() {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }

            _ => {}
        }
    }
}

fn run_headless(args: &Args, config: &AppConfig, tesseract: Tesseract4D, ticks: u32) -> Result<(), String> {
    let tilt = SimulatedTilt::new(config.input.tilt_step_degrees);
    let mut engine = build_engine(config, tesseract, [args.width, args.height], &tilt, &args.commands);
    let mut presenter = LineFieldPresenter::new(config.rendering.line);

    let report = headless::run(&mut engine, &mut presenter, ticks, 1.0 / 60.0).map_err(|e| e.to_string())?;
    log::info!("{}", report.snapshot.summary());

    if let Some(path) = &args.output {
        presenter.write_pgm(path).map_err(|e| e.to_string())?;
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = AppConfig::load_from(&args.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()))
        .init();
    log::info!("Starting Tessera");

    let tesseract = match config.load_tesseract() {
        Ok(tesseract) => tesseract,
        Err(e) => {
            log::error!("Failed to load dataset: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(ticks) = args.headless {
        if let Err(e) = run_headless(&args, &config, tesseract, ticks) {
            log::error!("Headless run failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let tilt = SimulatedTilt::new(config.input.tilt_step_degrees);
    let resolution = [config.window.width, config.window.height];
    let engine = build_engine(&config, tesseract, resolution, &tilt, &args.commands);

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, engine, tilt);
    event_loop.run_app(&mut app).expect("Event loop error");
}
