//! Core of the Tessera engine
//!
//! This crate turns axis state into pictures:
//!
//! - [`RotationComposer`] - Platform-specific composite rotation
//! - [`ProjectionPipeline`] - 4D → 3D → 2D projection with eased parameters
//! - [`EdgeRasterizer`] / [`LineField`] - Distance-field line shading
//! - [`Engine`] - The animation loop tying input, rotation and projection together
//! - [`EngineCommand`] - Operator commands, typed or parsed from strings
//! - [`EngineSnapshot`] - Serializable view of engine state

mod command;
mod composer;
mod dataset;
mod engine;
mod error;
mod host;
pub mod projection;
pub mod raster;
mod snapshot;

pub use command::{CommandOutcome, CommandParseError, EngineCommand};
pub use composer::{Platform, RotationComposer};
pub use dataset::{load_dataset, parse_dataset, save_dataset};
pub use engine::{Engine, EngineConfig, Frame, TickContext, DEFAULT_MAX_FRAME_TIME};
pub use error::EngineError;
pub use host::{ConsentStore, MemoryConsentStore, NullSensorHost, Presenter, SensorHost};
pub use projection::{ProjectedVertex, ProjectionConfig, ProjectionParam, ProjectionParams, ProjectionPipeline};
pub use raster::{EdgeRasterizer, LineField, LineStyle};
pub use snapshot::EngineSnapshot;

// Re-export the input and math types hosts need alongside the engine
pub use tessera_input::{
    AxisId, FusionConfig, GestureConfig, OrientationConfig, OrientationReading, OrientationState,
    WheelConfig,
};
pub use tessera_math::{DatasetError, Tesseract4D, TesseractData, Vec2, Vec4};
