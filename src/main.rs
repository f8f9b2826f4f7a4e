use std::env;
use std::process::ExitCode;

use env_logger::Env;

use cola::scenario::{self, BUILTIN_SCENARIOS, Scenario};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("Cola scenario runner started");

    let directory = env::args().nth(1).unwrap_or_else(|| "scenarios".to_string());
    let mut scenarios: Vec<Scenario> = BUILTIN_SCENARIOS.clone();
    let loaded = scenario::load_scenarios(&directory);
    log::info!("Loaded {} scenarios from {}", loaded.len(), directory);
    scenarios.extend(loaded);

    let mut failures = 0;
    for entry in &scenarios {
        let report = scenario::run(entry);
        for line in &report.lines {
            println!("{}", line);
        }
        println!();
        if let Some(e) = &report.failure {
            log::error!("Scenario {} failed: {}", report.name, e);
            failures += 1;
        }
    }

    log::info!(
        "{} of {} scenarios passed",
        scenarios.len() - failures,
        scenarios.len()
    );
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
