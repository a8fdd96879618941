use std::fs::File;
use std::io::{self, BufWriter};

use retsim::config::SimulationParameters;
use retsim::report;
use retsim::simulation::Simulation;
use retsim::types::Age;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut params = SimulationParameters::canonical();
    let mut seed: u64 = 42;
    let mut scenarios_override: Option<usize> = None;
    let mut ndjson_path_opt: Option<String> = None;
    let mut csv_path_opt: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--balance" => {
                i += 1;
                params.current_balance = args[i].parse().expect("--balance requires an amount");
            }
            "--withdrawal" => {
                i += 1;
                params.annual_withdrawal =
                    args[i].parse().expect("--withdrawal requires an amount");
            }
            "--deposit" => {
                i += 1;
                params.annual_deposit = args[i].parse().expect("--deposit requires an amount");
            }
            "--age" => {
                i += 1;
                params.current_age = Age(args[i].parse().expect("--age requires an age"));
            }
            "--retirement-age" => {
                i += 1;
                params.retirement_age =
                    Age(args[i].parse().expect("--retirement-age requires an age"));
            }
            "--crash-percentage" => {
                i += 1;
                params.market_crash_percentage =
                    args[i].parse().expect("--crash-percentage requires a percentage");
            }
            "--crash-age" => {
                i += 1;
                params.market_crash_age =
                    Age(args[i].parse().expect("--crash-age requires an age"));
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("--seed requires a u64");
            }
            "--scenarios" => {
                i += 1;
                scenarios_override =
                    Some(args[i].parse().expect("--scenarios requires a positive integer"));
            }
            "--output" => {
                i += 1;
                ndjson_path_opt = Some(args[i].clone());
            }
            "--csv" => {
                i += 1;
                csv_path_opt = Some(args[i].clone());
            }
            "--quiet" => quiet = true,
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!(
                    "Usage: retsim [--balance N] [--withdrawal N] [--deposit N] [--age N] \
                     [--retirement-age N] [--crash-percentage N] [--crash-age N] [--seed N] \
                     [--scenarios N] [--output FILE] [--csv FILE] [--quiet]"
                );
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let mut sim = Simulation::new(params.clone(), seed);
    if let Some(n) = scenarios_override {
        sim = sim.with_scenarios(n);
    }

    let result = match sim.run() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }

    if let Some(path) = &ndjson_path_opt {
        let file = File::create(path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
        let mut writer = BufWriter::new(file);
        report::write_ndjson(&mut writer, &result.rows).expect("failed to write NDJSON");
        if !quiet {
            println!("{} rows -> {path}", result.rows.len());
        }
    }

    if let Some(path) = &csv_path_opt {
        let file = File::create(path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
        let mut writer = BufWriter::new(file);
        report::write_csv(&mut writer, &result.rows).expect("failed to write CSV");
        if !quiet {
            println!("{} rows -> {path}", result.rows.len());
        }
    }

    if !quiet {
        let stdout = io::stdout();
        report::write_table(
            &mut stdout.lock(),
            &result.rows,
            params.retirement_age,
            params.annual_withdrawal,
        )
        .expect("failed to write table");
    }
}
