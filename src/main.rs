use anyhow::Context;
use macroquad::prelude::*;
use tracing::info;

use torus_life::{
    BrainCell, Cell, CellKind, Config, Flow, GameState, World,
    domain::{patterns, rules},
    input, rendering, telemetry,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Torus Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(err) = telemetry::init_telemetry() {
        eprintln!("failed to initialize logging: {err:#}");
    }

    // Everything `run` owns is dropped by the time it returns
    let status = telemetry::report_outcome(&run().await);
    if status != 0 {
        // Leave a blank window behind, then report failure to the shell
        clear_background(BLACK);
        next_frame().await;
        std::process::exit(status);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    info!(?config, "starting");

    // The cell type is fixed here, once, for the whole run
    match config.cell {
        CellKind::Binary => simulate::<Cell>(&config).await,
        CellKind::Tristate => simulate::<BrainCell>(&config).await,
    }
}

async fn simulate<C: Copy + Send + Sync + 'static>(config: &Config) -> anyhow::Result<()> {
    let rule = rules::by_name::<C>(&config.rule)
        .with_context(|| format!("selecting rule '{}'", config.rule))?;

    let (available_rows, available_cols) = rendering::grid_capacity(config.font_size);
    let (rows, cols) = config.dimensions(available_rows, available_cols);
    let world = World::new(rows, cols, rule.as_ref())
        .context("creating world")?
        .with_algorithm(config.algorithm)
        .with_refresh(config.refresh);

    let pattern = config
        .pattern
        .as_deref()
        .map(patterns::by_name)
        .transpose()
        .context("selecting pattern")?;

    let mut state = GameState::new(world, pattern, config.seed);
    state.seed();
    info!(rows, cols, rule = rule.name(), "world ready");

    loop {
        if let Some(command) = input::poll() {
            if state.apply(command).context("advancing generation")? == Flow::Quit {
                break;
            }
        }

        clear_background(BLACK);
        rendering::draw_screen(&state.screen, config.font_size, &state.status_line());
        next_frame().await;
    }

    info!(generation = state.world.generation(), "simulation stopped");
    Ok(())
}
