//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TESSERA_SECTION__KEY`)
//!
//! Tuning sections for the input channels and projection reuse the structs
//! from the crates that consume them.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tessera_core::{
    load_dataset, EngineConfig, EngineError, FusionConfig, GestureConfig, LineStyle, OrientationConfig, Platform,
    ProjectionConfig, Tesseract4D, WheelConfig,
};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub engine: EngineSection,
    /// Pointer fusion tuning
    #[serde(default)]
    pub fusion: FusionConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub orientation: OrientationConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Desktop host input settings
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TESSERA_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TESSERA_ENGINE__PLATFORM=mobile -> engine.platform = "mobile"
        figment = figment.merge(Env::prefixed("TESSERA_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Engine construction parameters from the tuning sections
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            platform: self.engine.platform,
            max_frame_time: Some(self.engine.max_frame_time),
            fusion: self.fusion,
            wheel: self.wheel,
            orientation: self.orientation,
            gesture: self.gesture,
            projection: self.projection,
        }
    }

    /// The configured dataset file, or the built-in tesseract at
    /// `engine.tesseract_size`. Both are validated the same way.
    pub fn load_tesseract(&self) -> Result<Tesseract4D, EngineError> {
        match &self.engine.dataset_path {
            Some(path) => load_dataset(path),
            None => Ok(Tesseract4D::with_size(self.engine.tesseract_size)?),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tessera".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Engine construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Rotation composition: "desktop" or "mobile"
    pub platform: Platform,
    /// RON dataset to load instead of the built-in tesseract
    pub dataset_path: Option<PathBuf>,
    /// Side length of the built-in tesseract
    pub tesseract_size: f32,
    /// Longest frame time advanced in one tick, in seconds
    pub max_frame_time: f32,
    /// Switch the orientation source on at startup
    pub orientation_on_start: bool,
    pub touch_enabled: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            platform: Platform::Desktop,
            dataset_path: None,
            tesseract_size: 2.0,
            max_frame_time: tessera_core::DEFAULT_MAX_FRAME_TIME,
            orientation_on_start: false,
            touch_enabled: true,
        }
    }
}

/// Desktop host input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Degrees of simulated tilt per arrow-key press
    pub tilt_step_degrees: f32,
    /// Field-of-view change per key press, in degrees
    pub fov_step: f32,
    pub perspective_step: f32,
    pub camera_z_step: f32,
    /// Screen regions, `[x, y, width, height]` in 0..1 units, where touches
    /// belong to UI chrome and never reach the gesture adapter
    pub chrome_regions: Vec<[f32; 4]>,
    /// Where the orientation permission answer is remembered
    pub consent_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            tilt_step_degrees: 5.0,
            fov_step: 5.0,
            perspective_step: 0.25,
            camera_z_step: 0.5,
            chrome_regions: Vec::new(),
            consent_path: PathBuf::from("config/consent.ron"),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Wireframe color [r, g, b, a]
    pub line_color: [f32; 4],
    pub line: LineStyle,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.02, 0.02, 0.08, 1.0],
            line_color: [0.85, 0.95, 1.0, 1.0],
            line: LineStyle::default(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show the engine snapshot in the window title
    pub title_snapshot: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            title_snapshot: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
