use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::operation::Operation;

#[derive(Clone, Debug, PartialEq)]
pub struct DispatchCall {
    pub op: Operation,
    pub a: f64,
    pub b: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct WorkloadShape {
    /// Largest absolute operand value.
    pub magnitude: f64,
    /// Share of divide calls that receive a zero divisor.
    pub zero_divisor_ratio: f64,
}

impl Default for WorkloadShape {
    fn default() -> Self {
        Self {
            magnitude: 1_000.0,
            zero_divisor_ratio: 0.1,
        }
    }
}

/// Deterministic mix of calls over the given operations.
pub fn generate_calls(
    ops: &[Operation],
    count: usize,
    shape: WorkloadShape,
    seed: u64,
) -> Vec<DispatchCall> {
    assert!(!ops.is_empty(), "ops must not be empty");
    assert!(
        shape.magnitude.is_finite() && shape.magnitude > 0.0,
        "magnitude must be positive and finite"
    );
    assert!(
        (0.0..=1.0).contains(&shape.zero_divisor_ratio),
        "zero_divisor_ratio must be within 0..=1"
    );
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let op = ops[rng.gen_range(0..ops.len())];
            let a = rng.gen_range(-shape.magnitude..=shape.magnitude);
            let b = if op == Operation::Divide && rng.gen_bool(shape.zero_divisor_ratio) {
                0.0
            } else {
                nonzero_operand(&mut rng, shape.magnitude)
            };
            DispatchCall { op, a, b }
        })
        .collect()
}

fn nonzero_operand(rng: &mut StdRng, magnitude: f64) -> f64 {
    loop {
        let value = rng.gen_range(-magnitude..=magnitude);
        if value != 0.0 {
            return value;
        }
    }
}
