use crate::{
    errors::CalcError,
    features::{Feature, FeatureSet},
    variant::Methodology,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub variant: Option<Methodology>,
    pub features_file: Option<String>,
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    pub json: bool,
    pub help: bool,
    pub command: Option<String>,
    pub command_args: Vec<String>,
}

impl CommandLineConfig {
    /// Parses `args` including the program name at index 0. Flags are read up
    /// to the first positional argument; everything after it belongs to the
    /// command, so negative operands are never mistaken for flags.
    pub fn from_args(args: &[&str]) -> Result<Self, CalcError> {
        let mut config = Self::default();
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if config.command.is_some() {
                if *arg == "--json" {
                    config.json = true;
                } else {
                    config.command_args.push(arg.to_string());
                }
                continue;
            }
            match *arg {
                "--variant" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| CalcError::config("--variant requires a value"))?;
                    config.variant = Some(value.parse()?);
                }
                "--features" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| CalcError::config("--features requires a path"))?;
                    config.features_file = Some(value.to_string());
                }
                "--enable" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| CalcError::config("--enable requires a feature"))?;
                    config.enable.push(value.to_string());
                }
                "--disable" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| CalcError::config("--disable requires a feature"))?;
                    config.disable.push(value.to_string());
                }
                "--json" => config.json = true,
                "--help" | "-h" => config.help = true,
                other if other.starts_with('-') => {
                    return Err(CalcError::config(format!("unknown flag {other}")));
                }
                _ => config.command = Some(arg.to_string()),
            }
        }
        Ok(config)
    }

    pub fn has_overrides(&self) -> bool {
        self.features_file.is_some() || !self.enable.is_empty() || !self.disable.is_empty()
    }

    pub fn methodology(&self) -> Methodology {
        self.variant.unwrap_or_else(Methodology::from_env)
    }

    /// Resolves the enablement table: variant defaults, then the overrides
    /// file, then `--enable`, then `--disable`.
    pub fn resolve_features(&self) -> Result<FeatureSet, CalcError> {
        let methodology = self.methodology();
        let mut features = methodology.default_features();
        if !self.has_overrides() {
            return Ok(features);
        }
        if !methodology.allows_overrides() {
            return Err(CalcError::config(format!(
                "{methodology} scope is fixed; feature toggles cannot be changed"
            )));
        }
        if let Some(path) = &self.features_file {
            features = features.load_overrides(path)?;
        }
        for name in &self.enable {
            features = features.with(parse_feature(name)?, true);
        }
        for name in &self.disable {
            features = features.with(parse_feature(name)?, false);
        }
        Ok(features)
    }

    pub fn help() -> &'static str {
        "Usage: featurecalc [--variant agile|waterfall] [--features PATH] [--enable NAME] \
[--disable NAME] [--json] <command>\n\
\n\
Commands:\n  \
run <op> <a> <b>      run one operation (also: <op> <a> <b>)\n  \
batch <op> <a> <b>... run operations in order, then show history\n  \
list-backlog          show the product backlog (alias: backlog)\n  \
list-features         show feature toggles (alias: features)\n  \
self-test             run the built-in checks\n"
    }
}

fn parse_feature(name: &str) -> Result<Feature, CalcError> {
    Feature::parse(name).ok_or_else(|| CalcError::config(format!("unknown feature {name}")))
}
