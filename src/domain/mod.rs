mod algorithm;
mod cell;
mod grid;
mod world;
pub mod patterns;
pub mod rules;

pub use algorithm::{Algorithm, RefreshPolicy};
pub use cell::{BrainCell, Cell};
pub use grid::{Grid, NEIGHBORHOOD_SIZE, wrap};
pub use patterns::{Pattern, presets};
pub use rules::{BriansBrainRule, ConwayRule, DayAndNightRule, HighLifeRule, Rule, SeedsRule};
pub use world::{SEED_DEATH_THRESHOLD, World};
