//! Feature toggles gating which operations a dispatcher exposes.

use std::{fmt, fs, path::Path};

use serde::Serialize;
use serde_json::Value;

use crate::{errors::CalcError, operation::Operation};

const FEATURE_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Add,
    Subtract,
    Multiply,
    Divide,
    History,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Add,
        Feature::Subtract,
        Feature::Multiply,
        Feature::Divide,
        Feature::History,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Add => "add",
            Feature::Subtract => "subtract",
            Feature::Multiply => "multiply",
            Feature::Divide => "divide",
            Feature::History => "history",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feature| feature.name() == name)
    }

    pub fn operation(self) -> Option<Operation> {
        match self {
            Feature::Add => Some(Operation::Add),
            Feature::Subtract => Some(Operation::Subtract),
            Feature::Multiply => Some(Operation::Multiply),
            Feature::Divide => Some(Operation::Divide),
            Feature::History => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl From<Operation> for Feature {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Add => Feature::Add,
            Operation::Subtract => Feature::Subtract,
            Operation::Multiply => Feature::Multiply,
            Operation::Divide => Feature::Divide,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The enablement table. Entries are kept in declaration order of [`Feature`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureSet {
    enabled: [bool; FEATURE_COUNT],
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::agile()
    }
}

impl FeatureSet {
    pub fn none() -> Self {
        Self {
            enabled: [false; FEATURE_COUNT],
        }
    }

    /// Every operation delivered, history still planned.
    pub fn agile() -> Self {
        Self::none()
            .with(Feature::Add, true)
            .with(Feature::Subtract, true)
            .with(Feature::Multiply, true)
            .with(Feature::Divide, true)
    }

    /// The signed-off scope: addition and subtraction only.
    pub fn waterfall() -> Self {
        Self::none()
            .with(Feature::Add, true)
            .with(Feature::Subtract, true)
    }

    pub fn with(mut self, feature: Feature, on: bool) -> Self {
        self.enabled[feature.index()] = on;
        self
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled[feature.index()]
    }

    pub fn enabled_operations(&self) -> impl Iterator<Item = Operation> + '_ {
        Operation::ALL
            .into_iter()
            .filter(move |op| self.is_enabled(Feature::from(*op)))
    }

    pub fn entries(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        Feature::ALL
            .into_iter()
            .map(move |feature| (feature, self.is_enabled(feature)))
    }

    /// Applies a JSON object of `"name": bool` pairs on top of the current table.
    pub fn apply_overrides_json(self, input: &str) -> Result<Self, CalcError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| CalcError::invalid_input(format!("invalid feature json: {e}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| CalcError::invalid_input("feature json must be an object"))?;
        let mut set = self;
        for (name, flag) in object {
            let feature = Feature::parse(name)
                .ok_or_else(|| CalcError::invalid_input(format!("unknown feature {name}")))?;
            let on = flag.as_bool().ok_or_else(|| {
                CalcError::invalid_input(format!("feature {name} must be true or false"))
            })?;
            set = set.with(feature, on);
        }
        Ok(set)
    }

    pub fn load_overrides<P: AsRef<Path>>(self, path: P) -> Result<Self, CalcError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::config(format!("unable to read {}: {e}", path.display()))
        })?;
        self.apply_overrides_json(&contents)
    }

    pub fn to_json(&self) -> Value {
        let map = self
            .entries()
            .map(|(feature, on)| (feature.name().to_string(), Value::Bool(on)))
            .collect();
        Value::Object(map)
    }
}
