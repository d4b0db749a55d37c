//! Core types shared across the engine: configuration, constants, and errors.

pub mod config;
pub mod constants;
mod error;

pub use config::{EngineConfig, PacingConfig};
pub use error::{EngineError, EngineResult};
