//! Built-in binary operations and the safe-division policy.
//!
//! Every operation is a plain `fn(f64, f64) -> f64`, so the dispatcher can hold
//! built-ins and caller-registered operations in the same table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

pub type OperationFn = fn(f64, f64) -> f64;

/// Value returned by `divide` when the divisor is zero.
pub const DIVISION_SENTINEL: f64 = f64::INFINITY;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn function(self) -> OperationFn {
        match self {
            Operation::Add => add,
            Operation::Subtract => subtract,
            Operation::Multiply => multiply,
            Operation::Divide => safe_divide,
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        (self.function())(a, b)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::parse(s).ok_or_else(|| CalcError::unsupported(s))
    }
}

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Division that never fails: a zero divisor (either sign) yields
/// [`DIVISION_SENTINEL`], including `0 / 0`.
pub fn safe_divide(a: f64, b: f64) -> f64 {
    if b == 0.0 { DIVISION_SENTINEL } else { a / b }
}
