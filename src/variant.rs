use std::{env, fmt, str::FromStr};

use crate::{errors::CalcError, features::FeatureSet};

pub const VARIANT_ENV: &str = "FEATURECALC_VARIANT";

/// How the calculator was delivered, which decides its default scope and how
/// it treats a request for an operation it does not offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Methodology {
    #[default]
    Agile,
    Waterfall,
}

impl Methodology {
    pub fn from_env() -> Self {
        match env::var(VARIANT_ENV).as_deref() {
            Ok("waterfall") => Methodology::Waterfall,
            _ => Methodology::Agile,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Methodology::Agile => "agile",
            Methodology::Waterfall => "waterfall",
        }
    }

    pub fn default_features(self) -> FeatureSet {
        match self {
            Methodology::Agile => FeatureSet::agile(),
            Methodology::Waterfall => FeatureSet::waterfall(),
        }
    }

    /// Waterfall scope is signed off; toggles cannot change it.
    pub fn allows_overrides(self) -> bool {
        matches!(self, Methodology::Agile)
    }

    pub fn unsupported_message(self, err: &CalcError) -> String {
        match self {
            Methodology::Agile => format!("Not available yet: {err}"),
            Methodology::Waterfall => {
                "Error: Operation not allowed by scope. Use 'add' or 'subtract' only.".to_string()
            }
        }
    }

    pub fn unsupported_exit_code(self) -> i32 {
        match self {
            Methodology::Agile => 1,
            Methodology::Waterfall => 2,
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Methodology {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agile" => Ok(Methodology::Agile),
            "waterfall" => Ok(Methodology::Waterfall),
            other => Err(CalcError::config(format!("unknown variant {other}"))),
        }
    }
}
