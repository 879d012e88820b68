use thiserror::Error;

use super::exit_code::ExitCode;

/// Everything that can stop `powerstatus` short of a power source code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PowerSourceError {
    /// The power-management facility is not present on this host.
    #[error("Failed to retrieve power sources information.")]
    InfoUnavailable,
    /// A power supply was listed but its type could not be read.
    #[error("Failed to get providing power source type.")]
    TypeUnavailable,
    #[error("Failed to retrieve power sources information.")]
    FailedToRetrieve,
    /// The snapshot does not designate a providing power source.
    #[error("Failed to get providing power source type.")]
    FailedToGetType,
    #[error("Unrecognized power source type: {0}")]
    UnrecognizedType(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    /// Anything else. The detail is only logged.
    #[error("Unexpected error occurred.")]
    Unexpected(String),
}

impl PowerSourceError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PowerSourceError::InfoUnavailable | PowerSourceError::FailedToRetrieve => {
                ExitCode::FAILED_RETRIEVE
            }
            PowerSourceError::TypeUnavailable | PowerSourceError::FailedToGetType => {
                ExitCode::FAILED_TYPE
            }
            PowerSourceError::UnrecognizedType(_) => ExitCode::UNRECOGNIZED,
            PowerSourceError::UnknownOption(_) => ExitCode::UNKNOWN_OPTION,
            PowerSourceError::Unexpected(_) => ExitCode::UNEXPECTED,
        }
    }
}

impl From<std::io::Error> for PowerSourceError {
    fn from(e: std::io::Error) -> Self {
        PowerSourceError::Unexpected(e.to_string())
    }
}
