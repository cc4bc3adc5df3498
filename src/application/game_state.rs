use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::display::GlyphBuffer;
use crate::domain::{Pattern, World};
use crate::error::Result;

/// What the driver asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advance one generation
    Advance,
    /// Throw the world away and seed it again
    Reseed,
    Clear,
    Quit,
}

/// Whether the main loop keeps going after a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// GameState orchestrates the simulation.
/// This is the application layer between the main loop and the world.
pub struct GameState<'r, C> {
    pub world: World<'r, C>,
    /// Character-cell surface the world draws into
    pub screen: GlyphBuffer,
    pattern: Option<Pattern>,
    /// Seeded source for reproducible runs, thread-local randomness otherwise
    rng: Option<StdRng>,
    pub last_evolution_time_ms: f32,
}

impl<'r, C: Copy + Send + Sync> GameState<'r, C> {
    pub fn new(world: World<'r, C>, pattern: Option<Pattern>, seed: Option<u64>) -> Self {
        let (rows, cols) = world.dimensions();
        Self {
            world,
            screen: GlyphBuffer::new(rows, cols),
            pattern,
            rng: seed.map(StdRng::seed_from_u64),
            last_evolution_time_ms: 0.0,
        }
    }

    /// Fill the world with the configured pattern, or randomly
    pub fn seed(&mut self) {
        match &self.pattern {
            Some(pattern) => {
                self.world.clear(&mut self.screen);
                pattern.place_centered(&mut self.world);
                self.world.redraw(&mut self.screen);
                info!(pattern = pattern.name, description = pattern.description, "seeded pattern");
            }
            None => match self.rng.as_mut() {
                Some(rng) => self.world.fill_random_with(rng, &mut self.screen),
                None => self.world.fill_random(&mut self.screen),
            },
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "applying command");
        match command {
            Command::Advance => {
                let start = std::time::Instant::now();
                self.world.next_generation(&mut self.screen)?;
                self.last_evolution_time_ms = start.elapsed().as_secs_f32() * 1000.0;
            }
            Command::Reseed => self.seed(),
            Command::Clear => self.world.clear(&mut self.screen),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// One-line summary for the bottom of the screen
    pub fn status_line(&self) -> String {
        format!(
            "{} ({}) | gen {} | pop {} | {} {:.1}ms | any key: step  R: reseed  C: clear  Q: quit",
            self.world.rule().name(),
            self.world.rule().description(),
            self.world.generation(),
            self.world.population(),
            self.world.algorithm().name(),
            self.last_evolution_time_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, ConwayRule, presets};

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let rule = ConwayRule;
        let mut a = GameState::new(World::<Cell>::new(12, 12, &rule).unwrap(), None, Some(5));
        let mut b = GameState::new(World::<Cell>::new(12, 12, &rule).unwrap(), None, Some(5));
        a.seed();
        b.seed();

        assert_eq!(a.world.current(), b.world.current());
        assert_eq!(a.screen, b.screen);
    }

    #[test]
    fn test_pattern_seeding_draws_pattern() {
        let rule = ConwayRule;
        let world = World::<Cell>::new(9, 9, &rule).unwrap();
        let mut state = GameState::new(world, Some(presets::blinker()), None);
        state.seed();

        assert_eq!(state.world.population(), 3);
        assert_eq!(state.screen.row_text(4), "   ***   ");
    }

    #[test]
    fn test_commands() {
        let rule = ConwayRule;
        let world = World::<Cell>::new(9, 9, &rule).unwrap();
        let mut state = GameState::new(world, Some(presets::blinker()), None);
        state.seed();

        assert_eq!(state.apply(Command::Advance).unwrap(), Flow::Continue);
        assert_eq!(state.world.generation(), 1);
        assert_eq!(state.screen.row_text(3), "    *    ");

        state.apply(Command::Reseed).unwrap();
        assert_eq!(state.world.generation(), 0);
        assert_eq!(state.world.population(), 3);

        state.apply(Command::Clear).unwrap();
        assert_eq!(state.world.population(), 0);

        assert_eq!(state.apply(Command::Quit).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_status_line_mentions_rule_and_generation() {
        let rule = ConwayRule;
        let state = GameState::new(World::<Cell>::new(3, 3, &rule).unwrap(), None, None);
        let status = state.status_line();
        assert!(status.starts_with("conway (B3/S23 - Classic) | gen 0 | pop 0"));
    }
}
