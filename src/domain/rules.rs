use std::any::{Any, type_name};

use super::{BrainCell, Cell};
use crate::display::Display;
use crate::error::{Error, Result};

/// Trait for cellular automaton rules over a cell state type `C`.
///
/// A rule is stateless: every method is a pure function of its inputs except
/// `draw`, which issues exactly one draw command and nothing else. The world
/// never interprets `C` itself, it only moves values around and asks the rule.
pub trait Rule<C>: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Glyph used to render `cell`
    fn glyph(&self, cell: C) -> char;

    /// Issue one draw command for `cell` at (row, col)
    fn draw(&self, display: &mut dyn Display, row: usize, col: usize, cell: C) {
        display.draw_glyph(row, col, self.glyph(cell));
    }

    /// Canonical dead value, needed before any real cell exists
    fn dead(&self) -> C;

    /// Dead representation of `cell`, regardless of its current value
    fn kill(&self, _cell: C) -> C {
        self.dead()
    }

    /// Live representation of `cell`, regardless of its current value
    fn born(&self, cell: C) -> C;

    fn is_alive(&self, cell: C) -> bool;

    /// Successor of `cell` given its neighbors.
    /// Neighbor order carries no meaning.
    fn next(&self, cell: C, neighborhood: &[C]) -> C;
}

/// Count live cells in a neighborhood according to `rule`
pub fn live_neighbors<C: Copy, R: Rule<C> + ?Sized>(rule: &R, neighborhood: &[C]) -> usize {
    neighborhood.iter().filter(|&&cell| rule.is_alive(cell)).count()
}

/// Glyph for the two-valued Life-like rules
const fn binary_glyph(cell: Cell) -> char {
    match cell {
        Cell::Alive => '*',
        Cell::Dead => ' ',
    }
}

/// Conway's Game of Life (B3/S23)
/// The classic cellular automaton rules
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRule;

impl Rule<Cell> for ConwayRule {
    fn name(&self) -> &'static str {
        "conway"
    }

    fn description(&self) -> &'static str {
        "B3/S23 - Classic"
    }

    fn glyph(&self, cell: Cell) -> char {
        binary_glyph(cell)
    }

    fn dead(&self) -> Cell {
        Cell::Dead
    }

    fn born(&self, _cell: Cell) -> Cell {
        Cell::Alive
    }

    fn is_alive(&self, cell: Cell) -> bool {
        cell.is_alive()
    }

    fn next(&self, cell: Cell, neighborhood: &[Cell]) -> Cell {
        let count = live_neighbors(self, neighborhood);
        match (self.is_alive(cell), count) {
            (true, 2 | 3) => cell,
            (true, _) => self.kill(cell),
            (false, 3) => self.born(cell),
            (false, _) => cell,
        }
    }
}

/// HighLife (B36/S23)
/// Like Conway's Life but cells with 6 neighbors are born
#[derive(Clone, Copy, Debug, Default)]
pub struct HighLifeRule;

impl Rule<Cell> for HighLifeRule {
    fn name(&self) -> &'static str {
        "highlife"
    }

    fn description(&self) -> &'static str {
        "B36/S23 - Replicators"
    }

    fn glyph(&self, cell: Cell) -> char {
        binary_glyph(cell)
    }

    fn dead(&self) -> Cell {
        Cell::Dead
    }

    fn born(&self, _cell: Cell) -> Cell {
        Cell::Alive
    }

    fn is_alive(&self, cell: Cell) -> bool {
        cell.is_alive()
    }

    fn next(&self, cell: Cell, neighborhood: &[Cell]) -> Cell {
        match (cell, live_neighbors(self, neighborhood)) {
            (Cell::Alive, 2 | 3) => Cell::Alive,
            (Cell::Dead, 3 | 6) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

/// Seeds (B2/S)
/// Every live cell dies each generation
#[derive(Clone, Copy, Debug, Default)]
pub struct SeedsRule;

impl Rule<Cell> for SeedsRule {
    fn name(&self) -> &'static str {
        "seeds"
    }

    fn description(&self) -> &'static str {
        "B2/S - Exploding"
    }

    fn glyph(&self, cell: Cell) -> char {
        binary_glyph(cell)
    }

    fn dead(&self) -> Cell {
        Cell::Dead
    }

    fn born(&self, _cell: Cell) -> Cell {
        Cell::Alive
    }

    fn is_alive(&self, cell: Cell) -> bool {
        cell.is_alive()
    }

    fn next(&self, cell: Cell, neighborhood: &[Cell]) -> Cell {
        match (cell, live_neighbors(self, neighborhood)) {
            (Cell::Dead, 2) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

/// Day & Night (B3678/S34678)
/// Symmetric rule - inverse of a pattern follows same rules
#[derive(Clone, Copy, Debug, Default)]
pub struct DayAndNightRule;

impl Rule<Cell> for DayAndNightRule {
    fn name(&self) -> &'static str {
        "day-and-night"
    }

    fn description(&self) -> &'static str {
        "B3678/S34678"
    }

    fn glyph(&self, cell: Cell) -> char {
        binary_glyph(cell)
    }

    fn dead(&self) -> Cell {
        Cell::Dead
    }

    fn born(&self, _cell: Cell) -> Cell {
        Cell::Alive
    }

    fn is_alive(&self, cell: Cell) -> bool {
        cell.is_alive()
    }

    fn next(&self, cell: Cell, neighborhood: &[Cell]) -> Cell {
        match (cell, live_neighbors(self, neighborhood)) {
            (Cell::Alive, 3 | 4 | 6 | 7 | 8) => Cell::Alive,
            (Cell::Dead, 3 | 6 | 7 | 8) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

/// Brian's Brain (B2/S/3)
/// Ready cells fire with exactly two firing neighbors, firing cells always
/// become refractory, refractory cells recover.
#[derive(Clone, Copy, Debug, Default)]
pub struct BriansBrainRule;

impl Rule<BrainCell> for BriansBrainRule {
    fn name(&self) -> &'static str {
        "brians-brain"
    }

    fn description(&self) -> &'static str {
        "B2/S/3 - Three states"
    }

    fn glyph(&self, cell: BrainCell) -> char {
        match cell {
            BrainCell::Firing => '*',
            BrainCell::Refractory => '.',
            BrainCell::Ready => ' ',
        }
    }

    fn dead(&self) -> BrainCell {
        BrainCell::Ready
    }

    fn born(&self, _cell: BrainCell) -> BrainCell {
        BrainCell::Firing
    }

    fn is_alive(&self, cell: BrainCell) -> bool {
        cell.is_firing()
    }

    fn next(&self, cell: BrainCell, neighborhood: &[BrainCell]) -> BrainCell {
        match cell {
            BrainCell::Firing => BrainCell::Refractory,
            BrainCell::Refractory => BrainCell::Ready,
            BrainCell::Ready if live_neighbors(self, neighborhood) == 2 => BrainCell::Firing,
            BrainCell::Ready => BrainCell::Ready,
        }
    }
}

/// Names accepted by [`by_name`]
pub const RULE_NAMES: &[&str] = &["conway", "highlife", "seeds", "day-and-night", "brians-brain"];

/// Look up a rule by name for cell type `C`.
///
/// Fails with [`Error::UnsupportedCellType`] when the rule exists but is
/// defined over a different cell type.
pub fn by_name<C: 'static>(name: &str) -> Result<Box<dyn Rule<C>>> {
    let rule: Box<dyn Any> = match name {
        "conway" => Box::new(Box::new(ConwayRule) as Box<dyn Rule<Cell>>),
        "highlife" => Box::new(Box::new(HighLifeRule) as Box<dyn Rule<Cell>>),
        "seeds" => Box::new(Box::new(SeedsRule) as Box<dyn Rule<Cell>>),
        "day-and-night" => Box::new(Box::new(DayAndNightRule) as Box<dyn Rule<Cell>>),
        "brians-brain" => Box::new(Box::new(BriansBrainRule) as Box<dyn Rule<BrainCell>>),
        _ => return Err(Error::UnknownRule(name.to_string())),
    };

    rule.downcast::<Box<dyn Rule<C>>>()
        .map(|rule| *rule)
        .map_err(|_| Error::UnsupportedCellType {
            rule: name.to_string(),
            cell: type_name::<C>(),
        })
}
