//! End-to-end engine scenarios through the desktop host pieces

use std::fs;
use std::path::{Path, PathBuf};

use tessera::config::AppConfig;
use tessera::consent::FileConsentStore;
use tessera::headless::{self, LineFieldPresenter};
use tessera::input::SimulatedTilt;
use tessera_core::{
    load_dataset, AxisId, CommandOutcome, Engine, EngineCommand, OrientationState, ProjectionParam, Tesseract4D,
    TickContext,
};

const DT: f32 = 1.0 / 60.0;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tessera_scenario_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn engine_with_tilt(config: &AppConfig, consent: &Path, tilt: &SimulatedTilt) -> Engine {
    Engine::new(config.engine_config(), Tesseract4D::default(), [640, 480])
        .with_consent_store(FileConsentStore::new(consent))
        .with_sensor_host(tilt.host())
}

/// One host frame: deliver a sensor sample if subscribed, then tick
fn frame(engine: &mut Engine, tilt: &SimulatedTilt, dt: f32) {
    if let Some(reading) = tilt.sample() {
        engine.on_orientation(reading);
    }
    engine.tick(&TickContext::active(dt));
}

#[test]
fn test_permission_answer_is_remembered() {
    let dir = temp_dir("consent");
    let consent = dir.join("consent.ron");
    let mut config = AppConfig::default();
    config.orientation.requires_permission = true;

    let tilt = SimulatedTilt::new(5.0);
    let mut engine = engine_with_tilt(&config, &consent, &tilt);
    assert_eq!(
        engine.apply(EngineCommand::SetOrientationEnabled(true)),
        CommandOutcome::Orientation(OrientationState::PermissionPending)
    );
    assert!(tilt.take_prompt_request());
    assert!(!tilt.is_subscribed());

    assert_eq!(
        engine.apply(EngineCommand::ResolvePermission(true)),
        CommandOutcome::Orientation(OrientationState::Calibrating)
    );
    assert!(tilt.is_subscribed());

    // A later session skips the prompt
    let tilt = SimulatedTilt::new(5.0);
    let mut engine = engine_with_tilt(&config, &consent, &tilt);
    assert_eq!(
        engine.apply(EngineCommand::SetOrientationEnabled(true)),
        CommandOutcome::Orientation(OrientationState::Calibrating)
    );
    assert!(!tilt.take_prompt_request());
    assert!(tilt.is_subscribed());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_denied_permission_keeps_pointer_working() {
    let dir = temp_dir("denied");
    let mut config = AppConfig::default();
    config.orientation.requires_permission = true;

    let tilt = SimulatedTilt::new(5.0);
    let mut engine = engine_with_tilt(&config, &dir.join("consent.ron"), &tilt);
    engine.apply(EngineCommand::SetOrientationEnabled(true));
    engine.apply(EngineCommand::ResolvePermission(false));
    assert_eq!(engine.orientation_state(), OrientationState::PermissionDenied);
    assert!(!tilt.is_subscribed());

    engine.on_pointer_moved(0.9, 0.5);
    for _ in 0..10 {
        frame(&mut engine, &tilt, DT);
    }
    assert!(engine.angle(AxisId::Ry) > 0.0);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_tilt_drives_camera_after_settling() {
    let dir = temp_dir("tilt");
    let config = AppConfig::default();
    let tilt_step: f32 = 5.0;
    let mut tilt = SimulatedTilt::new(tilt_step);
    let mut engine = engine_with_tilt(&config, &dir.join("consent.ron"), &tilt);

    engine.apply(EngineCommand::SetOrientationEnabled(true));
    // Baseline, then settle
    for _ in 0..20 {
        frame(&mut engine, &tilt, 0.1);
    }
    assert_eq!(engine.orientation_state(), OrientationState::Active);
    assert_eq!(engine.angle(AxisId::CameraRy), 0.0);

    // Two steps of gamma: 10 degrees, past the deadzone
    tilt.tilt(0.0, 2.0, 0.0);
    for _ in 0..200 {
        frame(&mut engine, &tilt, DT);
    }
    let expected = (2.0 * tilt_step).to_radians() * config.orientation.sensitivity[1];
    assert!((engine.angle(AxisId::CameraRy) - expected).abs() < 1e-3);
    assert_eq!(engine.angle(AxisId::CameraRx), 0.0);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_pause_unsubscribes_and_resume_recalibrates() {
    let dir = temp_dir("pause");
    let config = AppConfig::default();
    let tilt = SimulatedTilt::new(5.0);
    let mut engine = engine_with_tilt(&config, &dir.join("consent.ron"), &tilt);

    engine.apply(EngineCommand::SetOrientationEnabled(true));
    for _ in 0..20 {
        frame(&mut engine, &tilt, 0.1);
    }
    assert_eq!(engine.orientation_state(), OrientationState::Active);

    assert!(engine.tick(&TickContext::inactive()).is_none());
    assert_eq!(engine.orientation_state(), OrientationState::Paused);
    assert!(!tilt.is_subscribed());
    assert_eq!(tilt.sample(), None);

    assert!(engine.tick(&TickContext::active(DT)).is_some());
    assert_eq!(engine.orientation_state(), OrientationState::Calibrating);
    assert!(tilt.is_subscribed());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_string_commands() {
    let mut engine = Engine::new(AppConfig::default().engine_config(), Tesseract4D::default(), [640, 480]);

    assert_eq!(
        engine.apply_str("toggle:rx"),
        CommandOutcome::AxisToggled {
            axis: AxisId::Rx,
            enabled: false
        }
    );
    assert_eq!(engine.apply_str("spin:everything"), CommandOutcome::Ignored);
    assert_eq!(
        engine.apply_str("set:fov=500"),
        CommandOutcome::ParameterTarget {
            param: ProjectionParam::Fov,
            value: 170.0
        }
    );
    assert_eq!(engine.apply_str("touch:off"), CommandOutcome::TouchEnabled(false));
    assert!(!engine.is_touch_enabled());
}

#[test]
fn test_shipped_dataset_matches_builtin() {
    let loaded = load_dataset("assets/tesseract.ron").unwrap();
    let builtin = Tesseract4D::new(2.0);
    assert_eq!(loaded.vertices(), builtin.vertices());
    assert_eq!(loaded.cycle(), builtin.cycle());
}

#[test]
fn test_headless_run_from_shipped_dataset() {
    let dir = temp_dir("headless");
    let config = AppConfig::default();
    let tesseract = load_dataset("assets/tesseract.ron").unwrap();
    let mut engine = Engine::new(config.engine_config(), tesseract, [200, 150]);
    let mut presenter = LineFieldPresenter::new(config.rendering.line);

    let report = headless::run(&mut engine, &mut presenter, 120, DT).unwrap();
    assert_eq!(report.frames, 120);
    assert!(report.lit_pixels > 0);
    assert!((report.snapshot.time - 120.0 * DT).abs() < 1e-3);

    let path = dir.join("frame.pgm");
    presenter.write_pgm(&path).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P5\n200 150\n255\n"));
    assert_eq!(bytes.len(), "P5\n200 150\n255\n".len() + 200 * 150);

    fs::remove_dir_all(&dir).ok();
}
