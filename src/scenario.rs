pub mod runner;
pub mod schema;

pub use runner::{RunReport, run};
pub use schema::{BUILTIN_SCENARIOS, Scenario, Step, load_scenarios, parse_scenario};
