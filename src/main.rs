#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sparse_life::sparselife::patterns::{PATTERNS, Pattern, R_PENTOMINO};
use sparse_life::{CodecError, SimulationClock, SparseLife, SparseLifeConfig};

const DEFAULT_GENERATIONS: u64 = 1200;
const DEFAULT_REPORT_EVERY: u64 = 100;
const DEFAULT_DENSITY: f64 = 0.35;
const DEFAULT_RNG_SEED: u64 = 0x5EED_1234_ABCD_EF01;

const USAGE: &str = "usage: sparse-life [--pattern NAME] [--random SIDE] [--density D] \
                     [--seed N] [--generations N] [--report-every N]";

enum Seed {
    Pattern(&'static Pattern),
    Random { side: i64, density: f64, rng_seed: u64 },
}

struct MainArgs {
    seed: Seed,
    generations: u64,
    report_every: u64,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut pattern = &R_PENTOMINO;
    let mut random_side = None;
    let mut density = DEFAULT_DENSITY;
    let mut rng_seed = DEFAULT_RNG_SEED;
    let mut generations = DEFAULT_GENERATIONS;
    let mut report_every = DEFAULT_REPORT_EVERY;

    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value\n{USAGE}"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pattern" => {
                i += 1;
                let name = next_arg(i, "--pattern");
                pattern = Pattern::by_name(name).unwrap_or_else(|| {
                    let known: Vec<&str> = PATTERNS.iter().map(|p| p.name).collect();
                    panic!("unknown pattern: {name} (expected one of {})", known.join(", "))
                });
            }
            "--random" => {
                i += 1;
                let side: i64 = next_arg(i, "--random")
                    .parse()
                    .expect("--random requires a positive integer");
                random_side = Some(side.max(1));
            }
            "--density" => {
                i += 1;
                density = next_arg(i, "--density")
                    .parse()
                    .expect("--density requires a number between 0 and 1");
                assert!((0.0..=1.0).contains(&density), "--density must be within [0, 1]");
            }
            "--seed" => {
                i += 1;
                rng_seed = next_arg(i, "--seed")
                    .parse()
                    .expect("--seed requires a non-negative integer");
            }
            "--generations" => {
                i += 1;
                generations = next_arg(i, "--generations")
                    .parse()
                    .expect("--generations requires a non-negative integer");
            }
            "--report-every" => {
                i += 1;
                let n: u64 = next_arg(i, "--report-every")
                    .parse()
                    .expect("--report-every requires a positive integer");
                report_every = n.max(1);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => panic!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }

    let seed = match random_side {
        Some(side) => Seed::Random {
            side,
            density,
            rng_seed,
        },
        None => Seed::Pattern(pattern),
    };
    MainArgs {
        seed,
        generations,
        report_every,
    }
}

fn random_soup(side: i64, density: f64, rng_seed: u64) -> Vec<(i64, i64)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(rng_seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let mut cells = Vec::new();
    for y in 0..side {
        for x in 0..side {
            if rng.next_u64() <= threshold {
                cells.push((x, y));
            }
        }
    }
    cells
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<(), CodecError> {
    init_tracing();
    let args = parse_args();

    let config = match &args.seed {
        Seed::Pattern(pattern) => {
            info!(pattern = pattern.name, "seeding pattern");
            SparseLifeConfig::default().pattern(pattern)
        }
        &Seed::Random {
            side,
            density,
            rng_seed,
        } => {
            info!(side, density, rng_seed, "seeding random soup");
            SparseLifeConfig::default().seed(random_soup(side, density, rng_seed))
        }
    };

    let mut sim = SparseLife::with_config(config)?;
    let mut clock = SimulationClock::new();
    info!(population = sim.population(), generations = args.generations, "starting run");

    let start = Instant::now();
    let mut still_at = None;
    for _ in 0..args.generations {
        let before = sim.snapshot();
        clock.tick(&mut sim);
        if still_at.is_none() && *before == *sim.live_set() {
            still_at = Some(sim.generation() - 1);
            info!(generation = sim.generation() - 1, population = sim.population(), "pattern is still");
        }
        if sim.generation() % args.report_every == 0 {
            let stats = sim.last_stats();
            info!(
                generation = sim.generation(),
                population = sim.population(),
                births = stats.births,
                candidates = stats.candidates,
                bounds = ?sim.bounds(),
                "checkpoint"
            );
        }
    }
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let avg_ms = if clock.frames() > 0 {
        elapsed_ms / clock.frames() as f64
    } else {
        0.0
    };

    println!("\n--- Summary ({} generations) ---", sim.generation());
    println!("Population: {}", sim.population());
    match sim.bounds() {
        Some((min_x, min_y, max_x, max_y)) => {
            println!("Bounds: ({min_x}, {min_y}) .. ({max_x}, {max_y})")
        }
        None => println!("Bounds: empty"),
    }
    if let Some(generation) = still_at {
        println!("Still since generation {generation}");
    }
    println!("Time: {elapsed_ms:.3} ms total, {avg_ms:.6} ms/generation");
    Ok(())
}
