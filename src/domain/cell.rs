/// Cell is the two-valued state used by the Life-like rules.
/// Each cell can be either Dead or Alive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }
}

/// Three-state cell for Brian's Brain.
/// A firing cell always spends one generation refractory before it is ready again.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BrainCell {
    #[default]
    Ready,
    Firing,
    Refractory,
}

impl BrainCell {
    pub const fn is_firing(self) -> bool {
        matches!(self, BrainCell::Firing)
    }
}
