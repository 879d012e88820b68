use std::io::Write;

use log::debug;

use super::error::PowerSourceError;
use super::sysfs::SysfsPowerSource;
use super::upower::UPowerSource;

pub const BATTERY_POWER: &str = "Battery Power";
pub const AC_POWER: &str = "AC Power";
pub const UPS_POWER: &str = "UPS Power";

/// Something that can name the power source currently providing power.
pub trait PowerSource {
    fn providing_power_source_type(&self) -> Result<String, PowerSourceError>;
}

/// Asks `primary`, and `fallback` only when the primary facility is absent.
#[derive(Debug)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Fallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: PowerSource, F: PowerSource> PowerSource for Fallback<P, F> {
    fn providing_power_source_type(&self) -> Result<String, PowerSourceError> {
        match self.primary.providing_power_source_type() {
            Err(PowerSourceError::InfoUnavailable) => {
                debug!("primary power source facility unavailable, trying fallback");
                self.fallback.providing_power_source_type()
            }
            other => other,
        }
    }
}

/// UPower first, the kernel's sysfs class when UPower is not on the bus.
pub type SystemPowerSource = Fallback<UPowerSource, SysfsPowerSource>;

pub fn system_power_source() -> SystemPowerSource {
    Fallback::new(UPowerSource, SysfsPowerSource::default())
}

/// Asks `source` for the providing power source label and, in debug mode,
/// traces it to `stderr`.
pub fn current_power_source_type<S, W>(
    source: &S,
    debug: bool,
    stderr: &mut W,
) -> Result<String, PowerSourceError>
where
    S: PowerSource + ?Sized,
    W: Write,
{
    let power_source_type = source.providing_power_source_type()?;

    if debug {
        writeln!(stderr, "Current power source type: {}", power_source_type)?;
    }

    Ok(power_source_type)
}


#[cfg(test)]
mod tests {
    use super::fake::FakePowerSource;
    use super::*;

    #[test]
    fn returns_label_silently() {
        let mut err: Vec<u8> = Vec::new();
        let label = current_power_source_type(&FakePowerSource::label(AC_POWER), false, &mut err);
        assert_eq!(label, Ok("AC Power".to_string()));
        assert!(err.is_empty());
    }

    #[test]
    fn debug_traces_label() {
        let mut err: Vec<u8> = Vec::new();
        let label =
            current_power_source_type(&FakePowerSource::label("Off Line"), true, &mut err);
        assert_eq!(label, Ok("Off Line".to_string()));
        assert_eq!(String::from_utf8(err).unwrap(), "Current power source type: Off Line\n");
    }

    #[test]
    fn failure_skips_trace() {
        let mut err: Vec<u8> = Vec::new();
        let source = FakePowerSource::failing(PowerSourceError::FailedToGetType);
        assert_eq!(
            current_power_source_type(&source, true, &mut err),
            Err(PowerSourceError::FailedToGetType)
        );
        assert!(err.is_empty());
    }

    #[test]
    fn fallback_only_on_unavailable() {
        let chain = Fallback::new(
            FakePowerSource::failing(PowerSourceError::InfoUnavailable),
            FakePowerSource::label(BATTERY_POWER),
        );
        assert_eq!(chain.providing_power_source_type(), Ok("Battery Power".to_string()));

        let chain = Fallback::new(
            FakePowerSource::failing(PowerSourceError::FailedToRetrieve),
            FakePowerSource::label(BATTERY_POWER),
        );
        assert_eq!(
            chain.providing_power_source_type(),
            Err(PowerSourceError::FailedToRetrieve)
        );

        let chain = Fallback::new(
            FakePowerSource::label(UPS_POWER),
            FakePowerSource::failing(PowerSourceError::InfoUnavailable),
        );
        assert_eq!(chain.providing_power_source_type(), Ok("UPS Power".to_string()));
    }

    #[test]
    fn fallback_failure_is_final() {
        let chain = Fallback::new(
            FakePowerSource::failing(PowerSourceError::InfoUnavailable),
            FakePowerSource::failing(PowerSourceError::InfoUnavailable),
        );
        assert_eq!(
            chain.providing_power_source_type(),
            Err(PowerSourceError::InfoUnavailable)
        );
    }
}
