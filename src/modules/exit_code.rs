use std::fmt;

use super::error::PowerSourceError;
use super::power_source::{AC_POWER, BATTERY_POWER, UPS_POWER};

/// Process exit status. Scripts branch on these, so the values never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    pub const BATTERY: ExitCode = ExitCode(0);
    pub const AC: ExitCode = ExitCode(1);
    pub const UPS: ExitCode = ExitCode(2);
    pub const UNKNOWN_OPTION: ExitCode = ExitCode(64);
    pub const USAGE: ExitCode = ExitCode(65);
    pub const FAILED_RETRIEVE: ExitCode = ExitCode(70);
    pub const FAILED_TYPE: ExitCode = ExitCode(71);
    pub const UNRECOGNIZED: ExitCode = ExitCode(80);
    pub const UNEXPECTED: ExitCode = ExitCode(99);

    /// Every code with its one-line description, in usage order.
    pub const SUMMARY: [(ExitCode, &'static str); 9] = [
        (ExitCode::BATTERY, "Device is running on battery."),
        (ExitCode::AC, "Device is plugged into AC."),
        (ExitCode::UPS, "Device is plugged into UPS."),
        (ExitCode::UNKNOWN_OPTION, "Unknown option provided."),
        (ExitCode::USAGE, "Usage message shown."),
        (ExitCode::FAILED_RETRIEVE, "Failed to retrieve power sources."),
        (ExitCode::FAILED_TYPE, "Failed to get power source type."),
        (ExitCode::UNRECOGNIZED, "Unknown power source type."),
        (ExitCode::UNEXPECTED, "Unexpected error."),
    ];

    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The providing power source, once recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSourceTypeCode {
    Battery,
    Ac,
    Ups,
}

impl PowerSourceTypeCode {
    /// Exact, case-sensitive match against the OS labels.
    pub fn from_label(label: &str) -> Result<Self, PowerSourceError> {
        match label {
            BATTERY_POWER => Ok(PowerSourceTypeCode::Battery),
            AC_POWER => Ok(PowerSourceTypeCode::Ac),
            UPS_POWER => Ok(PowerSourceTypeCode::Ups),
            other => Err(PowerSourceError::UnrecognizedType(other.to_string())),
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            PowerSourceTypeCode::Battery => ExitCode::BATTERY,
            PowerSourceTypeCode::Ac => ExitCode::AC,
            PowerSourceTypeCode::Ups => ExitCode::UPS,
        }
    }

    /// The single stdout line printed in verbose mode.
    pub fn verbose_message(self) -> &'static str {
        match self {
            PowerSourceTypeCode::Battery => "Device is running on battery.",
            PowerSourceTypeCode::Ac => "Device is plugged into AC.",
            PowerSourceTypeCode::Ups => "Device is plugged into UPS.",
        }
    }
}
