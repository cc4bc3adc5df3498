//! Scheduling choices for a generation pass.
//!
//! Neither choice changes the computed generation. They only decide how the
//! per-cell work is spread over threads and how often the display is flushed.

use serde::{Deserialize, Serialize};

/// How cells of the next generation are computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Cell by cell, drawing as each cell is computed
    #[default]
    Serial,
    /// Rows computed in parallel with rayon, then drawn in order
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name for the status line
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }
}

/// How often a pass flushes the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshPolicy {
    PerCell,
    /// One refresh after each completed row
    #[default]
    PerRow,
    /// One refresh once the whole generation is drawn
    PerPass,
}

impl RefreshPolicy {
    /// Refreshes one pass issues on a `rows x cols` world
    pub const fn refreshes_per_pass(&self, rows: usize, cols: usize) -> usize {
        match self {
            RefreshPolicy::PerCell => rows * cols,
            RefreshPolicy::PerRow => rows,
            RefreshPolicy::PerPass => 1,
        }
    }
}
