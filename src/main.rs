//! Traction simulator entry point — CLI wiring and config-driven network construction.

use std::path::Path;
use std::process;

use log::info;

use traction_sim::config::ScenarioConfig;
use traction_sim::driver::DriveCycle;
use traction_sim::io::export::export_csv;
use traction_sim::sim::kpi::KpiReport;
use traction_sim::sim::network::Network;
use traction_sim::sim::power::PowerProfile;
use traction_sim::sim::substation::{Substation, SubstationCapacity};
use traction_sim::sim::track::TrackPosition;
use traction_sim::sim::train::Train;
use traction_sim::sim::types::{SimConfig, TickResult};

/// Seed stride between per-train drive-cycle RNGs to avoid correlated
/// dwell sequences.
const DRIVER_SEED_STRIDE: u64 = 57;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    ticks_override: Option<usize>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("traction-sim — railway traction power network simulator");
    eprintln!();
    eprintln!("Usage: traction-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, rush_hour, branch_line)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --ticks <n>              Override number of simulation ticks");
    eprintln!("  --telemetry-out <path>   Export tick results to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        ticks_override: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--ticks" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --ticks requires a positive integer argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.ticks_override = Some(n);
                } else {
                    eprintln!("error: --ticks value \"{}\" is not a valid integer", args[i]);
                    process::exit(1);
                }
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Builds the network and per-train drive cycles from a validated scenario.
fn build_scenario(cfg: &ScenarioConfig) -> (SimConfig, Network, Vec<DriveCycle>) {
    let sim_config = SimConfig::new(cfg.simulation.ticks, cfg.simulation.seed);

    let mut network = Network::new();
    for entry in &cfg.substations {
        let capacity = SubstationCapacity {
            max_power_mw: entry.max_power_mw,
            nominal_voltage_kv: entry.nominal_voltage_kv,
            min_voltage_kv: entry.min_voltage_kv,
            max_current_a: entry.max_current_a,
        };
        let substation = Substation::new(&entry.id, capacity, TrackPosition::new(entry.position_km));
        if let Err(e) = network.add_substation(substation) {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }

    let mut cycles = Vec::with_capacity(cfg.trains.len());
    for (i, entry) in cfg.trains.iter().enumerate() {
        let profile = PowerProfile::from_cruising(entry.cruising_power_mw);
        let train = Train::new(&entry.id, profile, TrackPosition::new(entry.position_km));
        if let Err(e) = network.add_train(train) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        cycles.push(DriveCycle::new(
            &entry.id,
            cfg.driver.speed_km_per_tick,
            cfg.driver.dwell_ticks_min,
            cfg.driver.dwell_ticks_max,
            sim_config
                .seed
                .wrapping_add(i as u64 * DRIVER_SEED_STRIDE),
        ));
    }

    (sim_config, network, cycles)
}

/// Runs the tick loop: advance trains, allocate, snapshot, print.
fn run_simulation(
    sim_config: &SimConfig,
    network: &mut Network,
    cycles: &mut [DriveCycle],
) -> Vec<TickResult> {
    let mut results = Vec::with_capacity(sim_config.ticks);
    let track_length_km = network.track_length_km();

    for t in 0..sim_config.ticks {
        // The first tick observes the configured initial state; trains
        // move between ticks, never during one.
        if t > 0 {
            for cycle in cycles.iter_mut() {
                if let Some(train) = network.train_mut(cycle.train_id()) {
                    cycle.advance(train, track_length_km);
                }
            }
        }

        let result = network.allocate_power();
        println!("{result}");
        println!("{}", network.status());
        results.push(result);
    }

    results
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to initialize logger: {e}");
            process::exit(1);
        });

    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(ticks) = cli.ticks_override {
        scenario.simulation.ticks = ticks;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let (sim_config, mut network, mut cycles) = build_scenario(&scenario);
    info!(
        "running {} ticks over {} substations and {} trains",
        sim_config.ticks,
        network.substations().len(),
        network.trains().len()
    );

    let results = run_simulation(&sim_config, &mut network, &mut cycles);

    let kpi = KpiReport::from_results(&results);
    println!("{kpi}");

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!("telemetry written to {path}");
    }
}
