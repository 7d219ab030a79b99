use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BacklogItem {
    pub id: &'static str,
    pub summary: &'static str,
    pub iteration: &'static str,
}

impl fmt::Display for BacklogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.summary)
    }
}

const PRODUCT_BACKLOG: [BacklogItem; 5] = [
    BacklogItem {
        id: "I1",
        summary: "Add basic addition",
        iteration: "Iteration 1",
    },
    BacklogItem {
        id: "I2",
        summary: "Add subtraction",
        iteration: "Iteration 2",
    },
    BacklogItem {
        id: "I3",
        summary: "Add multiplication & division",
        iteration: "Iteration 3",
    },
    BacklogItem {
        id: "I4",
        summary: "Add safe division by zero handling",
        iteration: "Iteration 3",
    },
    BacklogItem {
        id: "I5",
        summary: "Add history of operations (nice-to-have)",
        iteration: "Future",
    },
];

/// Planned work in priority order.
pub fn product_backlog() -> &'static [BacklogItem] {
    &PRODUCT_BACKLOG
}
