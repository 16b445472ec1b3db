//! Tessera - interactive 4D hypercube viewer
//!
//! The application layer around [`tessera_core::Engine`]: configuration,
//! host input routing, consent persistence, the window/GPU systems, and a
//! headless runner.

pub mod activity;
pub mod config;
pub mod consent;
pub mod headless;
pub mod input;
pub mod systems;
