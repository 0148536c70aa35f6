//! IRR Engine CLI
//!
//! Loads a cash flow schedule and reports its internal rate of return.
//! Supports JSON output for API integration via --json flag.
//! Solver parameters can be overridden via environment variables:
//!   IRR_INITIAL_GUESS, IRR_TOLERANCE, IRR_MAX_ITERATIONS
//!
//! Cash flows come either from a CSV file (Period,Amount columns) passed as
//! an argument, or inline as PERIOD:AMOUNT arguments:
//!   irr_engine cashflows.csv
//!   irr_engine 0:-1000 1:500 2:500 3:500 --json

use irr_engine::{
    cashflow::load_series,
    CashFlowSeries, IrrError, IrrSolver, SolverConfig,
};
use serde::Serialize;
use std::env;
use std::process;

#[derive(Serialize)]
struct IrrResponse {
    converged: bool,
    irr_pct: Option<f64>,
    partial_irr_pct: Option<f64>,
    failure: Option<String>,
    entry_count: usize,
    total_undiscounted: f64,
}

fn parse_inline_entry(arg: &str) -> Option<(u32, f64)> {
    let (period, amount) = arg.split_once(':')?;
    Some((period.parse().ok()?, amount.parse().ok()?))
}

fn build_series(args: &[String]) -> Result<CashFlowSeries, String> {
    let inline: Vec<_> = args.iter().filter_map(|a| parse_inline_entry(a)).collect();
    if !inline.is_empty() {
        let mut series = CashFlowSeries::new();
        for (period, amount) in inline {
            series.add_entry(period, amount);
        }
        return Ok(series);
    }

    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("cashflows.csv");

    load_series(path).map_err(|e| format!("failed to load {}: {}", path, e))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json_output = args.iter().any(|arg| arg == "--json");

    let series = match build_series(&args) {
        Ok(series) => series,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        }
    };

    // Solver parameters from environment or defaults
    let mut config = SolverConfig::default();
    if let Some(guess) = env::var("IRR_INITIAL_GUESS").ok().and_then(|s| s.parse().ok()) {
        config = config.with_initial_guess(guess);
    }
    if let Some(tolerance) = env::var("IRR_TOLERANCE").ok().and_then(|s| s.parse().ok()) {
        config = config.with_tolerance(tolerance);
    }
    if let Some(max_iterations) = env::var("IRR_MAX_ITERATIONS").ok().and_then(|s| s.parse().ok()) {
        config = config.with_max_iterations(max_iterations);
    }

    if !json_output {
        println!("Cash flows ({} entries):", series.len());
        for entry in &series {
            println!("  period: {}, amount: {:.2}", entry.period, entry.amount);
        }
        if !series.has_sign_change() {
            println!("  (no sign change: a real IRR may not exist)");
        }
        println!();
    }

    let result = IrrSolver::new(config).solve(&series);

    if json_output {
        let response = match &result {
            Ok(rate) => IrrResponse {
                converged: true,
                irr_pct: Some(rate * 100.0),
                partial_irr_pct: None,
                failure: None,
                entry_count: series.len(),
                total_undiscounted: series.total(),
            },
            Err(err) => IrrResponse {
                converged: false,
                irr_pct: None,
                partial_irr_pct: err.partial_rate().map(|r| r * 100.0),
                failure: Some(err.to_string()),
                entry_count: series.len(),
                total_undiscounted: series.total(),
            },
        };
        println!("{}", serde_json::to_string(&response).unwrap());
    } else {
        match &result {
            Ok(rate) => println!("IRR: {:.4}%", rate * 100.0),
            Err(err) => {
                eprintln!("IRR calculation failed: {}", err);
                if let IrrError::MaxIterationsExceeded { last_rate, .. } = err {
                    eprintln!("  last estimate (unconverged): {:.4}%", last_rate * 100.0);
                }
            }
        }
    }

    if result.is_err() {
        process::exit(1);
    }
}
