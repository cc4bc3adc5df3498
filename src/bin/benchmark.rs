//! Performance benchmark comparing serial and parallel generation passes

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use torus_life::{Algorithm, Cell, ConwayRule, GlyphBuffer, RefreshPolicy, World};

fn benchmark(size: usize, iterations: u32, algorithm: Algorithm) -> torus_life::Result<f64> {
    let rule = ConwayRule;
    let mut display = GlyphBuffer::new(size, size);
    let mut world = World::<Cell>::new(size, size, &rule)?
        .with_algorithm(algorithm)
        .with_refresh(RefreshPolicy::PerPass);
    world.fill_random_with(&mut StdRng::seed_from_u64(size as u64), &mut display);

    let start = Instant::now();
    for _ in 0..iterations {
        world.next_generation(&mut display)?;
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() -> torus_life::Result<()> {
    println!("=== Torus Life Performance Benchmark ===\n");

    let sizes = [64, 128, 256, 512, 1024, 2048];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10} {:>14}", "Size", "Serial", "Parallel", "Speedup", "Cells/sec");
    println!("{:-<62}", "");

    for size in sizes {
        let serial_ms = benchmark(size, iterations, Algorithm::Serial)?;
        let parallel_ms = benchmark(size, iterations, Algorithm::Parallel)?;
        let cells = (size * size) as f64;

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>9.1}x {:>13.1}M",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            cells / (parallel_ms / 1000.0) / 1_000_000.0,
        );
    }
    Ok(())
}
