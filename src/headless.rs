//! Headless runs
//!
//! Drives the engine with scripted input for a fixed number of ticks and
//! shades frames on the CPU. The last frame can be written as a PGM image.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tessera_core::{Engine, EngineSnapshot, Frame, LineField, LineStyle, Presenter, TickContext};

/// Error from a headless run
#[derive(Debug)]
pub enum HeadlessError {
    Io(io::Error),
    /// The run finished without producing a frame
    NoFrame,
}

impl fmt::Display for HeadlessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadlessError::Io(e) => write!(f, "IO error: {}", e),
            HeadlessError::NoFrame => write!(f, "No frame was produced"),
        }
    }
}

impl std::error::Error for HeadlessError {}

impl From<io::Error> for HeadlessError {
    fn from(e: io::Error) -> Self {
        HeadlessError::Io(e)
    }
}

/// CPU presenter that keeps the most recent frame's line field
#[derive(Debug)]
pub struct LineFieldPresenter {
    style: LineStyle,
    last: Option<LineField>,
    frames: u32,
}

impl LineFieldPresenter {
    pub fn new(style: LineStyle) -> Self {
        Self {
            style,
            last: None,
            frames: 0,
        }
    }

    pub fn last(&self) -> Option<&LineField> {
        self.last.as_ref()
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Write the last frame as a binary PGM
    pub fn write_pgm<P: AsRef<Path>>(&self, path: P) -> Result<(), HeadlessError> {
        let field = self.last.as_ref().ok_or(HeadlessError::NoFrame)?;
        fs::write(path, field.to_pgm())?;
        Ok(())
    }
}

impl Presenter for LineFieldPresenter {
    type Error = HeadlessError;

    fn present(&mut self, frame: &Frame) -> Result<(), HeadlessError> {
        let [w, h] = frame.params.resolution;
        self.last = Some(LineField::rasterize(&frame.rasterizer, w, h, &self.style));
        self.frames += 1;
        Ok(())
    }
}

/// Scripted host input for tick `i`: a slow pointer circle, periodic wheel
/// notches and a short touch drag
pub fn scripted_input(engine: &mut Engine, i: u32) {
    let t = i as f32 * 0.05;
    engine.on_pointer_moved(0.5 + 0.3 * t.cos(), 0.5 + 0.3 * t.sin());
    if i % 30 == 0 {
        engine.on_wheel(1.0);
    }
    if (60..90).contains(&i) {
        engine.on_touch_drag(4.0, 2.0);
    }
}

/// Outcome of [`run`]
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub frames: u32,
    pub lit_pixels: usize,
    pub snapshot: EngineSnapshot,
}

/// Run `ticks` active ticks of `dt` seconds, presenting every frame
pub fn run(
    engine: &mut Engine,
    presenter: &mut LineFieldPresenter,
    ticks: u32,
    dt: f32,
) -> Result<HeadlessReport, HeadlessError> {
    for i in 0..ticks {
        scripted_input(engine, i);
        if let Some(frame) = engine.tick(&TickContext::active(dt)) {
            presenter.present(&frame)?;
        }
    }

    let lit_pixels = presenter.last().map(LineField::lit_pixels).unwrap_or(0);
    log::info!(
        "Headless run finished: {} frames, {} lit pixels in the last one",
        presenter.frames(),
        lit_pixels
    );

    Ok(HeadlessReport {
        frames: presenter.frames(),
        lit_pixels,
        snapshot: engine.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{AxisId, EngineConfig, Tesseract4D};

    fn engine() -> Engine {
        Engine::new(EngineConfig::default(), Tesseract4D::default(), [160, 120])
    }

    #[test]
    fn test_run_presents_every_tick() {
        let mut engine = engine();
        let mut presenter = LineFieldPresenter::new(LineStyle::default());
        let report = run(&mut engine, &mut presenter, 100, 1.0 / 60.0).unwrap();

        assert_eq!(report.frames, 100);
        assert!(report.lit_pixels > 0);
        assert!(report.snapshot.axes.iter().any(|a| a.id == AxisId::Rwx && a.angle > 0.0));
        let field = presenter.last().unwrap();
        assert_eq!((field.width(), field.height()), (160, 120));
    }

    #[test]
    fn test_write_without_frame_fails() {
        let presenter = LineFieldPresenter::new(LineStyle::default());
        let err = presenter.write_pgm(std::env::temp_dir().join("never.pgm")).unwrap_err();
        assert!(matches!(err, HeadlessError::NoFrame));
    }

    #[test]
    fn test_write_pgm() {
        let mut engine = engine();
        let mut presenter = LineFieldPresenter::new(LineStyle::default());
        run(&mut engine, &mut presenter, 3, 1.0 / 60.0).unwrap();

        let path = std::env::temp_dir().join(format!("tessera_headless_{}.pgm", std::process::id()));
        presenter.write_pgm(&path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P5\n160 120\n255\n"));
        fs::remove_file(&path).ok();
    }
}
