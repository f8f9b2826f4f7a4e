use crate::error::AppError;
use crate::queue::MultiModeQueue;

use super::schema::{Check, DumpExpectation, EnqueueStep, Scenario, Step, ValueExpectation};

/// Outcome of replaying one scenario
#[derive(Debug)]
pub struct RunReport {
    pub name: String,
    /// Transcript of the executed steps, one entry per printed line.
    pub lines: Vec<String>,
    /// First unexpected error or unmet expectation; replay stops there.
    pub failure: Option<AppError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Replays `scenario` against a fresh queue.
pub fn run(scenario: &Scenario) -> RunReport {
    let mut report = RunReport {
        name: scenario.name.clone(),
        lines: vec![format!(
            "=== {} ({}, capacity {}) ===",
            scenario.name, scenario.mode, scenario.capacity
        )],
        failure: None,
    };
    let mut queue: MultiModeQueue<i64> = MultiModeQueue::new(scenario.mode, scenario.capacity);

    for (index, step) in scenario.steps.iter().enumerate() {
        let result = match step {
            Step::Enqueue(args) => enqueue(&mut queue, args, &mut report.lines),
            Step::Dequeue(expectation) => {
                let result = queue.dequeue();
                expect_value("dequeue", result, expectation, &mut report.lines)
            }
            Step::Front(expectation) => {
                let result = queue.front().copied();
                expect_value("front", result, expectation, &mut report.lines)
            }
            Step::Dump(expectation) => dump(&queue, expectation, &mut report.lines),
            Step::Check(check) => verify(&queue, check, &mut report.lines),
        };
        if let Err(e) = result {
            log::debug!("scenario {} stopped at step {}", scenario.name, index + 1);
            report.failure = Some(e.within(&format!("{} step {}", scenario.name, index + 1)));
            break;
        }
    }

    return report;
}

fn enqueue(
    queue: &mut MultiModeQueue<i64>,
    args: &EnqueueStep,
    lines: &mut Vec<String>,
) -> Result<(), AppError> {
    for value in &args.values {
        match queue.enqueue(*value) {
            Ok(()) => lines.push(format!("enqueue {}", value)),
            Err(e) => {
                let Some(expected) = args.expect_error else {
                    return Err(e);
                };
                if e.error_type != expected.error_type() {
                    return Err(e);
                }
                lines.push(format!("enqueue {} -> {:?}", value, e.error_type));
                return Ok(());
            }
        }
    }
    if let Some(expected) = args.expect_error {
        return Err(AppError::mismatch(format!(
            "enqueue {:?} succeeded, expected {:?}",
            args.values,
            expected.error_type()
        )));
    }
    Ok(())
}

fn expect_value(
    operation: &str,
    result: Result<i64, AppError>,
    expectation: &ValueExpectation,
    lines: &mut Vec<String>,
) -> Result<(), AppError> {
    match (result, expectation.expect_error) {
        (Ok(value), None) => {
            if let Some(expected) = expectation.expect {
                if value != expected {
                    return Err(AppError::mismatch(format!(
                        "{} returned {}, expected {}",
                        operation, value, expected
                    )));
                }
            }
            lines.push(format!("{} -> {}", operation, value));
            Ok(())
        }
        (Ok(value), Some(expected)) => Err(AppError::mismatch(format!(
            "{} returned {}, expected {:?}",
            operation,
            value,
            expected.error_type()
        ))),
        (Err(e), Some(expected)) if e.error_type == expected.error_type() => {
            lines.push(format!("{} -> {:?}", operation, e.error_type));
            Ok(())
        }
        (Err(e), _) => Err(e),
    }
}

fn dump(
    queue: &MultiModeQueue<i64>,
    expectation: &DumpExpectation,
    lines: &mut Vec<String>,
) -> Result<(), AppError> {
    if let Some(expected) = &expectation.expect {
        let actual = queue.render_sequence();
        if actual != *expected {
            return Err(AppError::mismatch(format!(
                "queue holds {}, expected {}",
                actual, expected
            )));
        }
    }
    lines.push(queue.to_string());
    Ok(())
}

fn verify(
    queue: &MultiModeQueue<i64>,
    check: &Check,
    lines: &mut Vec<String>,
) -> Result<(), AppError> {
    if let Some(size) = check.size {
        if queue.size() != size {
            return Err(AppError::mismatch(format!(
                "size is {}, expected {}",
                queue.size(),
                size
            )));
        }
    }
    if let Some(capacity) = check.capacity {
        if queue.capacity() != capacity {
            return Err(AppError::mismatch(format!(
                "capacity is {}, expected {}",
                queue.capacity(),
                capacity
            )));
        }
    }
    if let Some(empty) = check.empty {
        if queue.is_empty() != empty {
            return Err(AppError::mismatch(format!(
                "is_empty is {}, expected {}",
                queue.is_empty(),
                empty
            )));
        }
    }
    lines.push(format!(
        "size={} capacity={} empty={}",
        queue.size(),
        queue.capacity(),
        queue.is_empty()
    ));
    Ok(())
}
