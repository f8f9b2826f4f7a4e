use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{AppError, ErrorType};
use crate::queue::QueueMode;

/// Queue error a step is allowed to run into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedError {
    QueueFull,
    QueueEmpty,
}

impl ExpectedError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            ExpectedError::QueueFull => ErrorType::QueueFull,
            ExpectedError::QueueEmpty => ErrorType::QueueEmpty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnqueueStep {
    pub values: Vec<i64>,
    pub expect_error: Option<ExpectedError>,
}

/// Expectation for `dequeue` and `front`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValueExpectation {
    pub expect: Option<i64>,
    pub expect_error: Option<ExpectedError>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DumpExpectation {
    /// Expected logical sequence, e.g. `[1, 2, 3]`
    pub expect: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Check {
    pub size: Option<usize>,
    pub capacity: Option<usize>,
    pub empty: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Enqueue(EnqueueStep),
    Dequeue(ValueExpectation),
    Front(ValueExpectation),
    Dump(DumpExpectation),
    Check(Check),
}

/// Scripted session against a single queue. Scenario yaml files use this schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub mode: QueueMode,
    pub capacity: usize,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

pub fn parse_scenario(content: &str) -> Result<Scenario, AppError> {
    serde_yaml::from_str::<Scenario>(content)
        .map_err(|e| AppError::new(ErrorType::ScenarioSyntax, e.to_string()))
}

pub fn read_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, AppError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::new(ErrorType::ScenarioIo, format!("{:?}: {}", path, e)))?;
    parse_scenario(&content).map_err(|e| e.within(&format!("{:?}", path)))
}

/// scenario loader
///
/// Walks `directory` in file name order. Files that cannot be read or parsed
/// are reported and skipped.
pub fn load_scenarios<P: AsRef<Path>>(directory: P) -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping scenario entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() {
            let path = entry.path();
            if let Some(ext) = path.extension() {
                if ext == "yaml" || ext == "yml" {
                    match read_scenario(path) {
                        Ok(scenario) => scenarios.push(scenario),
                        Err(e) => log::error!("Failed to load scenario: {}", e),
                    }
                }
            }
        }
    }

    return scenarios;
}

fn enqueue(values: &[i64]) -> Step {
    Step::Enqueue(EnqueueStep {
        values: values.to_vec(),
        expect_error: None,
    })
}

fn dequeue(expect: i64) -> Step {
    Step::Dequeue(ValueExpectation {
        expect: Some(expect),
        expect_error: None,
    })
}

fn dump(expect: &str) -> Step {
    Step::Dump(DumpExpectation {
        expect: Some(expect.to_string()),
    })
}

lazy_static! {
    /// Demo sessions for each mode, available without any scenario files.
    pub static ref BUILTIN_SCENARIOS: Vec<Scenario> = vec![
        Scenario {
            name: "fixed-front".to_string(),
            mode: QueueMode::FixedFront,
            capacity: 5,
            steps: vec![
                enqueue(&[10, 20, 30]),
                dump("[10, 20, 30]"),
                dequeue(10),
                dump("[20, 30]"),
                enqueue(&[40, 50, 60]),
                dump("[20, 30, 40, 50, 60]"),
            ],
        },
        Scenario {
            name: "fixed-movable".to_string(),
            mode: QueueMode::FixedMovable,
            capacity: 5,
            steps: vec![
                enqueue(&[1, 2, 3]),
                dump("[1, 2, 3]"),
                dequeue(1),
                dequeue(2),
                dump("[3]"),
                enqueue(&[4, 5, 6]),
                dump("[3, 4, 5, 6]"),
                enqueue(&[7]),
                dump("[3, 4, 5, 6, 7]"),
            ],
        },
        Scenario {
            name: "dynamic".to_string(),
            mode: QueueMode::Dynamic,
            capacity: 2,
            steps: {
                let mut steps = Vec::new();
                for value in 100..=106 {
                    steps.push(enqueue(&[value]));
                    steps.push(Step::Dump(DumpExpectation::default()));
                }
                steps.push(Step::Check(Check {
                    size: Some(7),
                    capacity: Some(8),
                    empty: Some(false),
                }));
                steps.push(Step::Front(ValueExpectation {
                    expect: Some(100),
                    expect_error: None,
                }));
                steps.push(dequeue(100));
                steps.push(dequeue(101));
                steps.push(dump("[102, 103, 104, 105, 106]"));
                steps.push(enqueue(&[999, 1000]));
                steps.push(dump("[102, 103, 104, 105, 106, 999, 1000]"));
                steps.push(Step::Check(Check {
                    size: Some(7),
                    capacity: Some(8),
                    empty: None,
                }));
                steps
            },
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let content = r#"
name: saturation
mode: fixed_front
capacity: 2
steps:
  - enqueue: { values: [1, 2] }
  - enqueue: { values: [3], expect_error: queue_full }
  - front: { expect: 1 }
  - dequeue: {}
  - dump: { expect: "[2]" }
  - check: { size: 1, empty: false }
"#;
        let scenario = parse_scenario(content).unwrap();
        assert_eq!(scenario.name, "saturation");
        assert_eq!(scenario.mode, QueueMode::FixedFront);
        assert_eq!(scenario.capacity, 2);
        assert_eq!(scenario.steps.len(), 6);
        assert_eq!(scenario.steps[0], enqueue(&[1, 2]));
        assert_eq!(
            scenario.steps[1],
            Step::Enqueue(EnqueueStep {
                values: vec![3],
                expect_error: Some(ExpectedError::QueueFull),
            })
        );
        assert_eq!(
            scenario.steps[3],
            Step::Dequeue(ValueExpectation::default())
        );
        assert_eq!(scenario.steps[4], dump("[2]"));
        assert_eq!(
            scenario.steps[5],
            Step::Check(Check {
                size: Some(1),
                capacity: None,
                empty: Some(false),
            })
        );
    }

    #[test]
    fn test_parse_numeric_mode() {
        let content = "name: n\nmode: 2\ncapacity: 1\nsteps: []\n";
        let scenario = parse_scenario(content).unwrap();
        assert_eq!(scenario.mode, QueueMode::FixedMovable);
    }

    #[test]
    fn test_parse_errors() {
        let unknown_mode = "name: n\nmode: ring\ncapacity: 1\nsteps: []\n";
        let Err(e) = parse_scenario(unknown_mode) else {
            panic!("unknown mode must be rejected");
        };
        assert_eq!(e.error_type, ErrorType::ScenarioSyntax);

        let unknown_step = "name: n\nmode: dynamic\ncapacity: 1\nsteps:\n  - peek: {}\n";
        assert!(parse_scenario(unknown_step).is_err());

        let missing_capacity = "name: n\nmode: dynamic\nsteps: []\n";
        assert!(parse_scenario(missing_capacity).is_err());
    }

    #[test]
    fn test_scenario_loading() {
        let scenarios = load_scenarios("test-scenarios");
        let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        // broken.yaml and notes.txt are skipped
        assert_eq!(names, vec!["circular-reuse", "empty-dequeue"]);
        assert_eq!(scenarios[0].mode, QueueMode::Dynamic);
        assert_eq!(scenarios[1].mode, QueueMode::FixedMovable);
    }

    #[test]
    fn test_read_missing_file() {
        let Err(e) = read_scenario("test-scenarios/does-not-exist.yaml") else {
            panic!("reading a missing file must fail");
        };
        assert_eq!(e.error_type, ErrorType::ScenarioIo);
    }

    #[test]
    fn test_builtin_scenarios() {
        assert_eq!(BUILTIN_SCENARIOS.len(), 3);
        let modes: Vec<QueueMode> = BUILTIN_SCENARIOS.iter().map(|s| s.mode).collect();
        assert_eq!(
            modes,
            vec![
                QueueMode::FixedFront,
                QueueMode::FixedMovable,
                QueueMode::Dynamic
            ]
        );
    }
}
