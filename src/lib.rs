// Domain layer - Core simulation logic
pub mod domain;
pub mod display;
pub mod error;

// Application layer - Use cases and coordination
pub mod application;
pub mod config;

// Infrastructure layer - window rendering, input, logging
pub mod rendering;
pub mod input;
pub mod telemetry;

// Re-exports for convenience
pub use domain::{Cell, BrainCell, Grid, Rule, ConwayRule, World, Pattern, presets, Algorithm, RefreshPolicy};
pub use display::{Display, GlyphBuffer};
pub use application::{GameState, Command, Flow};
pub use config::{Config, CellKind};
pub use error::{Error, Result};
