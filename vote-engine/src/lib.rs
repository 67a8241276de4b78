//! Vote Engine Library
//!
//! This library wires the voting and karma-consistency engine together:
//! configuration management, error handling, and dependency injection.

pub mod config;
pub mod errors;

pub use config::{Dependencies, Settings};
pub use errors::EngineError;
