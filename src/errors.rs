use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Feature '{0}' not available yet (toggle off or not built).")]
    UnsupportedOperation(String),
    #[error("{0} feature not enabled yet.")]
    CapabilityDisabled(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("config error: {0}")]
    Config(String),
}

impl CalcError {
    pub fn unsupported<T: Into<String>>(op: T) -> Self {
        CalcError::UnsupportedOperation(op.into())
    }

    pub fn capability_disabled<T: Into<String>>(capability: T) -> Self {
        CalcError::CapabilityDisabled(capability.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        CalcError::InvalidInput(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        CalcError::Config(msg.into())
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, CalcError::UnsupportedOperation(_))
    }
}
