use std::{fmt, result};

use serde::Serialize;

use crate::{
    dispatcher::Dispatcher,
    errors::CalcError,
    features::Feature,
    operation::{DIVISION_SENTINEL, Operation},
};

const TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SelfCheckReport {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub failures: Vec<String>,
}

impl SelfCheckReport {
    pub fn merge(&mut self, other: &SelfCheckReport) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.failures.extend(other.failures.iter().cloned());
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn pass(&mut self) {
        self.passed += 1;
    }

    fn fail(&mut self, message: String) {
        self.failed += 1;
        self.failures.push(message);
    }
}

#[derive(Debug)]
pub struct SelfCheckError {
    pub report: SelfCheckReport,
}

impl fmt::Display for SelfCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} self check(s) failed", self.report.failed)
    }
}

impl std::error::Error for SelfCheckError {}

struct ArithmeticCase {
    op: Operation,
    a: f64,
    b: f64,
    expected: f64,
}

const ARITHMETIC_CASES: [ArithmeticCase; 4] = [
    ArithmeticCase {
        op: Operation::Add,
        a: 2.0,
        b: 3.0,
        expected: 5.0,
    },
    ArithmeticCase {
        op: Operation::Subtract,
        a: 7.0,
        b: 4.0,
        expected: 3.0,
    },
    ArithmeticCase {
        op: Operation::Multiply,
        a: 3.0,
        b: 4.0,
        expected: 12.0,
    },
    ArithmeticCase {
        op: Operation::Divide,
        a: 10.0,
        b: 0.0,
        expected: DIVISION_SENTINEL,
    },
];

/// Checks delivered operations against known answers. Cases for operations the
/// dispatcher does not offer are skipped.
pub fn check_arithmetic(dispatcher: &Dispatcher) -> SelfCheckReport {
    let mut report = SelfCheckReport::default();
    for case in &ARITHMETIC_CASES {
        if !dispatcher.supports(case.op.name()) {
            report.skipped += 1;
            continue;
        }
        match dispatcher.dispatch(case.op.name(), case.a, case.b) {
            Ok(value) if matches_expected(value, case.expected) => report.pass(),
            Ok(value) => report.fail(format!(
                "{}({}, {}) returned {value}, expected {}",
                case.op, case.a, case.b, case.expected
            )),
            Err(err) => report.fail(format!("{}({}, {}) failed: {err}", case.op, case.a, case.b)),
        }
    }
    report
}

/// History must be readable exactly when the history feature is on.
pub fn check_history_gate(dispatcher: &Dispatcher) -> SelfCheckReport {
    let mut report = SelfCheckReport::default();
    let expect_enabled = dispatcher.features().is_enabled(Feature::History);
    match (expect_enabled, dispatcher.history()) {
        (true, Ok(_)) | (false, Err(CalcError::CapabilityDisabled(_))) => report.pass(),
        (true, Err(err)) => report.fail(format!("history enabled but unreadable: {err}")),
        (false, Ok(_)) => report.fail("history accessible while feature is off".to_string()),
        (false, Err(err)) => report.fail(format!("history failed with unexpected error: {err}")),
    }
    report
}

pub fn run_self_check(dispatcher: &Dispatcher) -> SelfCheckReport {
    let mut report = SelfCheckReport::default();
    report.merge(&check_arithmetic(dispatcher));
    report.merge(&check_history_gate(dispatcher));
    report
}

pub fn run_strict_self_check(
    dispatcher: &Dispatcher,
) -> result::Result<SelfCheckReport, SelfCheckError> {
    let report = run_self_check(dispatcher);
    if report.has_failures() {
        Err(SelfCheckError { report })
    } else {
        Ok(report)
    }
}

fn matches_expected(value: f64, expected: f64) -> bool {
    if expected.is_infinite() {
        value == expected
    } else {
        (value - expected).abs() < TOLERANCE
    }
}
