//! The world: two generation buffers on a torus and the pass that advances them.
//!
//! The world knows nothing about what a cell means. It gathers neighborhoods,
//! asks the bound [`Rule`] for each successor, writes into the "next" buffer and
//! flips buffer roles once the pass is complete. A pass that fails part-way
//! leaves the current generation untouched and does not flip.

use rand::RngCore;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{Algorithm, Grid, RefreshPolicy, Rule};
use crate::display::Display;
use crate::error::Result;

/// Random draws below this value kill the cell, draws at or above it give
/// birth, so roughly two cells in three start alive.
pub const SEED_DEATH_THRESHOLD: u32 = u32::MAX / 3;

pub struct World<'r, C> {
    buffers: [Grid<C>; 2],
    /// Index into `buffers` of the current generation
    current: usize,
    generation: u64,
    rule: &'r dyn Rule<C>,
    algorithm: Algorithm,
    refresh: RefreshPolicy,
}

impl<'r, C: Copy + Send + Sync> World<'r, C> {
    /// Create a world with both buffers filled with the rule's dead value
    pub fn new(rows: usize, cols: usize, rule: &'r dyn Rule<C>) -> Result<Self> {
        let grid = Grid::new(rows, cols, rule.dead())?;
        Ok(Self {
            buffers: [grid.clone(), grid],
            current: 0,
            generation: 0,
            rule,
            algorithm: Algorithm::default(),
            refresh: RefreshPolicy::default(),
        })
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn rule(&self) -> &'r dyn Rule<C> {
        self.rule
    }

    /// Get world dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.current().dimensions()
    }

    pub fn rows(&self) -> usize {
        self.dimensions().0
    }

    pub fn cols(&self) -> usize {
        self.dimensions().1
    }

    /// Generations advanced since the last seeding
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The authoritative generation
    pub fn current(&self) -> &Grid<C> {
        &self.buffers[self.current]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<C> {
        self.current().get(row, col)
    }

    /// One row of the current generation
    pub fn row(&self, row: usize) -> Option<&[C]> {
        self.current().row(row)
    }

    /// Number of live cells in the current generation
    pub fn population(&self) -> usize {
        self.current()
            .cells()
            .iter()
            .filter(|&&cell| self.rule.is_alive(cell))
            .count()
    }

    /// Borrow (current, next) at once
    fn split_buffers(&mut self) -> (&Grid<C>, &mut Grid<C>) {
        let [first, second] = &mut self.buffers;
        if self.current == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        }
    }

    /// Seed the current generation from the thread-local random source
    pub fn fill_random(&mut self, display: &mut dyn Display) {
        self.fill_random_with(&mut rand::rng(), display);
    }

    /// Seed the current generation from `rng`, one draw per cell in row-major order.
    /// The next buffer is left as it is.
    pub fn fill_random_with<R: RngCore + ?Sized>(&mut self, rng: &mut R, display: &mut dyn Display) {
        let rule = self.rule;
        let (rows, cols) = self.dimensions();
        let current = self.current;

        for (i, slot) in self.buffers[current].cells_mut().iter_mut().enumerate() {
            *slot = if rng.next_u32() < SEED_DEATH_THRESHOLD {
                rule.kill(*slot)
            } else {
                rule.born(*slot)
            };
            rule.draw(display, i / cols, i % cols, *slot);
        }
        display.refresh();

        self.generation = 0;
        info!(rows, cols, population = self.population(), rule = rule.name(), "seeded random generation");
    }

    /// Advance one generation.
    ///
    /// Every successor is computed from the current buffer only and written to
    /// the next buffer. Roles are swapped after the last cell is written.
    pub fn next_generation(&mut self, display: &mut dyn Display) -> Result<()> {
        let rule = self.rule;
        let refresh = self.refresh;
        let algorithm = self.algorithm;
        let (curr, next) = self.split_buffers();

        match algorithm {
            Algorithm::Serial => advance_serial(rule, refresh, curr, next, display)?,
            Algorithm::Parallel => {
                compute_parallel(rule, curr, next)?;
                draw_grid(rule, refresh, next, display);
            }
        }

        self.current ^= 1;
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.population(),
            algorithm = algorithm.name(),
            "advanced generation"
        );
        Ok(())
    }

    /// Kill every cell of the current generation and redraw
    pub fn clear(&mut self, display: &mut dyn Display) {
        let dead = self.rule.dead();
        let current = self.current;
        self.buffers[current].fill(dead);
        self.generation = 0;
        self.redraw(display);
    }

    /// Bring the cell at (row, col) to life; coordinates wrap onto the torus
    pub fn revive(&mut self, row: isize, col: isize) {
        let current = self.current;
        let grid = &mut self.buffers[current];
        let (r, c) = (grid.wrap_row(row), grid.wrap_col(col));
        if let Some(cell) = grid.get(r, c) {
            grid.set(r, c, self.rule.born(cell));
        }
    }

    /// Draw the whole current generation and refresh once
    pub fn redraw(&self, display: &mut dyn Display) {
        draw_grid(self.rule, RefreshPolicy::PerPass, self.current(), display);
    }
}

/// Successor of the cell at (row, col) computed from `curr`
#[inline]
fn successor<C: Copy>(rule: &dyn Rule<C>, curr: &Grid<C>, row: usize, col: usize) -> Result<C> {
    let window = curr.neighborhood(row, col)?;
    let cell = curr.get_wrapped(row as isize, col as isize);
    Ok(rule.next(cell, &window))
}

/// Issue the refreshes owed after drawing the cell in column `col`
#[inline]
fn after_cell(refresh: RefreshPolicy, col: usize, cols: usize, display: &mut dyn Display) {
    match refresh {
        RefreshPolicy::PerCell => display.refresh(),
        RefreshPolicy::PerRow if col + 1 == cols => display.refresh(),
        _ => {}
    }
}

fn advance_serial<C: Copy>(
    rule: &dyn Rule<C>,
    refresh: RefreshPolicy,
    curr: &Grid<C>,
    next: &mut Grid<C>,
    display: &mut dyn Display,
) -> Result<()> {
    let (_, cols) = next.dimensions();

    for (r, row) in next.cells_mut().chunks_mut(cols).enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            *slot = successor(rule, curr, r, c)?;
            rule.draw(display, r, c, *slot);
            after_cell(refresh, c, cols, display);
        }
    }
    if refresh == RefreshPolicy::PerPass {
        display.refresh();
    }
    Ok(())
}

/// Compute every row of `next` in parallel; `curr` is only read
fn compute_parallel<C: Copy + Send + Sync>(
    rule: &dyn Rule<C>,
    curr: &Grid<C>,
    next: &mut Grid<C>,
) -> Result<()> {
    let (_, cols) = next.dimensions();

    next.cells_mut()
        .par_chunks_mut(cols)
        .enumerate()
        .try_for_each(|(r, row)| {
            for (c, slot) in row.iter_mut().enumerate() {
                *slot = successor(rule, curr, r, c)?;
            }
            Ok(())
        })
}

fn draw_grid<C: Copy>(rule: &dyn Rule<C>, refresh: RefreshPolicy, grid: &Grid<C>, display: &mut dyn Display) {
    let (_, cols) = grid.dimensions();

    for (r, c, cell) in grid.iter_cells() {
        rule.draw(display, r, c, cell);
        after_cell(refresh, c, cols, display);
    }
    if refresh == RefreshPolicy::PerPass {
        display.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::GlyphBuffer;
    use crate::domain::{BrainCell, BriansBrainRule, Cell, ConwayRule};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world_with<'r>(rows: usize, cols: usize, rule: &'r dyn Rule<Cell>, alive: &[(isize, isize)]) -> World<'r, Cell> {
        let mut world = World::new(rows, cols, rule).unwrap();
        for &(r, c) in alive {
            world.revive(r, c);
        }
        world
    }

    fn live_cells(world: &World<'_, Cell>) -> Vec<(usize, usize)> {
        world
            .current()
            .iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    /// Straightforward B3/S23 step over a snapshot, used as the reference
    fn reference_step(grid: &Grid<Cell>) -> Vec<Cell> {
        let (rows, cols) = grid.dimensions();
        let (rows, cols) = (rows as isize, cols as isize);
        let mut out = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let mut count = 0;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if (dr, dc) != (0, 0) && grid.get_wrapped(r + dr, c + dc).is_alive() {
                            count += 1;
                        }
                    }
                }
                let alive = grid.get_wrapped(r, c).is_alive();
                out.push(if count == 3 || (alive && count == 2) { Cell::Alive } else { Cell::Dead });
            }
        }
        out
    }

    #[test]
    fn test_new_world_is_dead() {
        let rule = ConwayRule;
        let world = World::<Cell>::new(4, 5, &rule).unwrap();

        assert_eq!(world.dimensions(), (4, 5));
        assert_eq!(world.population(), 0);
        assert_eq!(world.buffers[0], world.buffers[1]);
        assert!(world.buffers[1].cells().iter().all(|&c| c == Cell::Dead));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let rule = ConwayRule;
        assert!(World::<Cell>::new(0, 5, &rule).is_err());
        assert!(World::<Cell>::new(5, 0, &rule).is_err());
        assert!(World::<Cell>::new(usize::MAX, usize::MAX, &rule).is_err());
    }

    #[test]
    fn test_fill_random_distribution() {
        let rule = ConwayRule;
        let mut world = World::<Cell>::new(200, 200, &rule).unwrap();
        let mut display = GlyphBuffer::new(200, 200);
        let mut rng = StdRng::seed_from_u64(42);

        world.fill_random_with(&mut rng, &mut display);

        let fraction = world.population() as f64 / 40_000.0;
        assert!((0.64..0.69).contains(&fraction), "live fraction was {}", fraction);

        // Next buffer untouched, display shows exactly the seeded cells
        assert!(world.buffers[1].cells().iter().all(|&c| c == Cell::Dead));
        assert_eq!(display.refresh_count(), 1);
        assert_eq!(display.iter_visible().count(), world.population());
        assert_eq!(world.generation(), 0);
    }

    #[test]
    fn test_block_still_life() {
        let rule = ConwayRule;
        for algorithm in Algorithm::all() {
            let mut world = world_with(6, 6, &rule, &[(2, 2), (2, 3), (3, 2), (3, 3)]).with_algorithm(algorithm);
            let mut display = GlyphBuffer::new(6, 6);
            let before = live_cells(&world);

            for _ in 0..3 {
                world.next_generation(&mut display).unwrap();
                assert_eq!(live_cells(&world), before, "{:?}", algorithm);
            }
        }
    }

    #[test]
    fn test_block_across_corner_is_still() {
        // Block split over all four corners of the torus
        let rule = ConwayRule;
        let mut world = world_with(5, 5, &rule, &[(-1, -1), (-1, 0), (0, -1), (0, 0)]);
        let mut display = GlyphBuffer::new(5, 5);

        world.next_generation(&mut display).unwrap();
        assert_eq!(live_cells(&world), vec![(0, 0), (0, 4), (4, 0), (4, 4)]);
    }

    #[test]
    fn test_blinker_oscillates() {
        let rule = ConwayRule;
        let mut world = world_with(10, 10, &rule, &[(5, 4), (5, 5), (5, 6)]);
        let mut display = GlyphBuffer::new(10, 10);

        world.next_generation(&mut display).unwrap();
        assert_eq!(live_cells(&world), vec![(4, 5), (5, 5), (6, 5)]);
        assert_eq!(display.row_text(4), "     *    ");

        world.next_generation(&mut display).unwrap();
        assert_eq!(live_cells(&world), vec![(5, 4), (5, 5), (5, 6)]);
        assert_eq!(world.generation(), 2);
    }

    #[test]
    fn test_glider_circles_the_torus() {
        let rule = ConwayRule;
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut world = world_with(8, 8, &rule, &glider);
        let mut display = GlyphBuffer::new(8, 8);
        let start = live_cells(&world);

        for _ in 0..4 {
            world.next_generation(&mut display).unwrap();
        }
        let shifted: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(live_cells(&world), shifted);

        for _ in 4..32 {
            world.next_generation(&mut display).unwrap();
        }
        assert_eq!(live_cells(&world), start);
    }

    #[test]
    fn test_pass_reads_only_prior_generation() {
        let rule = ConwayRule;
        let mut world = World::<Cell>::new(17, 23, &rule).unwrap();
        let mut display = GlyphBuffer::new(17, 23);
        world.fill_random_with(&mut StdRng::seed_from_u64(7), &mut display);

        for _ in 0..5 {
            let expected = reference_step(world.current());
            world.next_generation(&mut display).unwrap();
            assert_eq!(world.current().cells(), expected.as_slice());
        }
    }

    #[test]
    fn test_swap_exchanges_buffers_without_copying() {
        let rule = ConwayRule;
        let mut world = world_with(6, 6, &rule, &[(1, 1), (1, 2), (1, 3)]);
        let mut display = GlyphBuffer::new(6, 6);

        let old_current = world.current().cells().as_ptr();
        let old_next = world.buffers[1].cells().as_ptr();

        world.next_generation(&mut display).unwrap();
        assert_eq!(world.current().cells().as_ptr(), old_next);
        assert_eq!(world.buffers[0].cells().as_ptr(), old_current);

        world.next_generation(&mut display).unwrap();
        assert_eq!(world.current().cells().as_ptr(), old_current);
    }

    #[test]
    fn test_refresh_policies() {
        let rule = ConwayRule;
        for policy in [RefreshPolicy::PerCell, RefreshPolicy::PerRow, RefreshPolicy::PerPass] {
            for algorithm in Algorithm::all() {
                let mut world = World::<Cell>::new(3, 4, &rule)
                    .unwrap()
                    .with_algorithm(algorithm)
                    .with_refresh(policy);
                let mut display = GlyphBuffer::new(3, 4);

                world.next_generation(&mut display).unwrap();
                assert_eq!(display.refresh_count() as usize, policy.refreshes_per_pass(3, 4));
            }
        }
    }

    #[test]
    fn test_clear_and_redraw() {
        let rule = ConwayRule;
        let mut world = world_with(4, 4, &rule, &[(0, 0), (3, 3)]);
        let mut display = GlyphBuffer::new(4, 4);

        world.redraw(&mut display);
        assert_eq!(display.iter_visible().count(), 2);

        world.clear(&mut display);
        assert_eq!(world.population(), 0);
        assert_eq!(display.iter_visible().count(), 0);
    }

    #[test]
    fn test_row_access() {
        let rule = ConwayRule;
        let world = world_with(3, 3, &rule, &[(1, 0)]);

        assert_eq!(world.row(1), Some(&[Cell::Alive, Cell::Dead, Cell::Dead][..]));
        assert_eq!(world.row(3), None);
        assert_eq!(world.get(1, 0), Some(Cell::Alive));
    }

    #[test]
    fn test_generic_cell_type() {
        let rule = BriansBrainRule;
        let mut world = World::<BrainCell>::new(6, 6, &rule).unwrap();
        let mut display = GlyphBuffer::new(6, 6);
        world.revive(2, 2);
        world.revive(2, 3);

        world.next_generation(&mut display).unwrap();

        assert_eq!(world.get(2, 2), Some(BrainCell::Refractory));
        assert_eq!(world.get(1, 2), Some(BrainCell::Firing));
        assert_eq!(world.get(3, 3), Some(BrainCell::Firing));
        assert_eq!(world.population(), 4);
        assert_eq!(display.visible(2, 2), Some('.'));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_parallel_matches_serial(seed in any::<u64>(), rows in 1usize..20, cols in 1usize..20) {
            let rule = ConwayRule;
            let mut display = GlyphBuffer::new(rows, cols);
            let mut serial = World::<Cell>::new(rows, cols, &rule).unwrap();
            let mut parallel = World::<Cell>::new(rows, cols, &rule).unwrap().with_algorithm(Algorithm::Parallel);
            serial.fill_random_with(&mut StdRng::seed_from_u64(seed), &mut display);
            parallel.fill_random_with(&mut StdRng::seed_from_u64(seed), &mut display);

            for _ in 0..3 {
                serial.next_generation(&mut display).unwrap();
                parallel.next_generation(&mut display).unwrap();
                prop_assert_eq!(serial.current(), parallel.current());
            }
        }
    }
}
