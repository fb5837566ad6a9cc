use arenapath::config::{Config, DEFAULT_CONFIG_PATH};
use arenapath::pathfinding::{format_path, path_length};
use arenapath::{Scenario, World};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 600;

const USAGE: &str = "\
Usage: arenapath [--config <file>] [--ticks <n>] [--scenario <file.json>]...

  --config <file>     configuration file (default: config.toml, optional)
  --ticks <n>         number of 60 Hz ticks to simulate (default: 600)
  --scenario <file>   run a recorded path request instead of the simulation";

struct Args {
    config_path: PathBuf,
    ticks: u64,
    scenarios: Vec<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        ticks: DEFAULT_TICKS,
        scenarios: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config needs a file")?;
                args.config_path = PathBuf::from(value);
            }
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a number")?;
                args.ticks = value
                    .parse()
                    .map_err(|e| format!("invalid tick count '{}': {}", value, e))?;
            }
            "--scenario" => {
                let value = iter.next().ok_or("--scenario needs a file")?;
                args.scenarios.push(PathBuf::from(value));
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument '{}'\n\n{}", other, USAGE)),
        }
    }

    Ok(args)
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Run each scenario file, printing the grid and path. Returns the number of failures.
fn run_scenarios(paths: &[PathBuf], config: &Config) -> usize {
    let params = config.pathfinding.search_params();
    let mut failed = 0;

    for path in paths {
        let scenario = match Scenario::load(path) {
            Ok(s) => s,
            Err(e) => {
                error!("{}", e);
                failed += 1;
                continue;
            }
        };

        let outcome = scenario.run(&params);
        println!("=== {} ===", scenario.test_name);
        println!("Path: {}", format_path(&outcome.path));
        println!("{} waypoints, length {:.1}", outcome.path.len(), path_length(&outcome.path));
        print!("{}", outcome.grid.render_ascii(&outcome.path));

        if outcome.passed() {
            println!("✓ {}\n", scenario.test_name);
        } else {
            failed += 1;
            println!("✗ {}", scenario.test_name);
            for failure in &outcome.failures {
                println!("  - {}", failure);
            }
            println!();
        }
    }

    failed
}

fn run_simulation(config: Config, ticks: u64) {
    let mut world = World::new(config);
    world.run(ticks);

    let stats = &world.stats;
    info!(
        "Simulated {} ticks: {} shots, {} seekers destroyed, {} damage taken, {} resets",
        stats.ticks, stats.shots_fired, stats.seekers_destroyed, stats.damage_taken, stats.resets
    );

    let grid = world.grid();
    let path = world
        .seekers
        .first()
        .map(|s| world.find_path(s.pos, world.player.pos))
        .unwrap_or_default();

    println!(
        "Arena {}x{}, grid {}x{} ({} walls), player health {}, {} seekers left",
        world.width,
        world.height,
        grid.cols,
        grid.rows,
        grid.wall_count(),
        world.player.health,
        world.seekers.len()
    );
    println!("Lead seeker path: {}", format_path(&path));
    print!("{}", grid.render_ascii(&path));
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let (config, load_error) = match Config::load(Path::new(&args.config_path)) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config.logging.filter);
    if let Some(e) = load_error {
        warn!("{}; using default configuration", e);
    }

    if !args.scenarios.is_empty() {
        let failed = run_scenarios(&args.scenarios, &config);
        println!("Scenario results: {} passed, {} failed", args.scenarios.len() - failed, failed);
        return if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    }

    run_simulation(config, args.ticks);
    ExitCode::SUCCESS
}
