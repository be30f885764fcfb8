use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::time::Instant;
use wator_core::{SimConfig, VictimSweep, World};

fn run(config: &SimConfig, steps: usize) -> (std::time::Duration, usize, usize) {
    let rng = ChaCha12Rng::seed_from_u64(config.seed);
    let mut world = World::with_rng(config.clone(), rng).expect("benchmark config is valid");
    let start = Instant::now();
    for _ in 0..steps {
        world.step();
    }
    (start.elapsed(), world.predator_count(), world.victim_count())
}

fn main() {
    let ocean_size = 1000;
    let predators = 50_000;
    let victims = 200_000;
    let barriers = 10_000;
    println!(
        "Benchmarking {}x{} ocean with {} predators, {} victims, {} barriers",
        ocean_size, ocean_size, predators, victims, barriers
    );

    let base = SimConfig {
        ocean_size,
        predators,
        victims,
        barriers,
        reproduction_frequency: 8,
        predator_hunger_threshold: 12,
        seed: 42,
        ..SimConfig::default()
    };

    let steps = 20;
    for sweep in [VictimSweep::EveryCell, VictimSweep::RowBreak] {
        let config = SimConfig {
            victim_sweep: sweep,
            ..base.clone()
        };
        let (elapsed, predators_left, victims_left) = run(&config, steps);
        println!("[{}] time for {} steps: {:?}", sweep, steps, elapsed);
        println!(
            "[{}] avg time per step: {:?}",
            sweep,
            elapsed / steps as u32
        );
        println!(
            "[{}] final populations: {} predators, {} victims",
            sweep, predators_left, victims_left
        );
    }
}
