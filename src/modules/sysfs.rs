use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use super::error::PowerSourceError;
use super::power_source::{PowerSource, AC_POWER, BATTERY_POWER, UPS_POWER};

const POWER_SUPPLY_CLASS: &str = "/sys/class/power_supply";

/// One entry of the kernel's `power_supply` class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSupply {
    pub name: String,
    pub kind: String,
    pub online: Option<bool>,
    pub status: Option<String>,
    pub scope: Option<String>,
}

fn read_attr(path: &Path, attr: &str) -> Option<String> {
    fs::read_to_string(path.join(attr))
        .ok()
        .map(|s| s.trim().to_string())
}

impl PowerSupply {
    /// `None` when the supply has no readable `type`.
    pub fn read(path: &Path) -> Option<Self> {
        let kind = read_attr(path, "type")?;
        let name = path.file_name()?.to_string_lossy().into_owned();

        Some(Self {
            name,
            kind,
            online: read_attr(path, "online").map(|s| s == "1"),
            status: read_attr(path, "status"),
            scope: read_attr(path, "scope"),
        })
    }

    /// Peripheral batteries (mice, headsets) report `scope=Device`.
    fn powers_system(&self) -> bool {
        self.scope.as_deref() != Some("Device")
    }

    fn is_external(&self) -> bool {
        self.kind == "Mains" || self.kind == "Wireless" || self.kind.starts_with("USB")
    }

    fn status_is(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }
}

/// Picks the providing source out of a snapshot.
pub fn providing_power_source(supplies: &[PowerSupply]) -> Result<&'static str, PowerSourceError> {
    let system: Vec<&PowerSupply> = supplies.iter().filter(|s| s.powers_system()).collect();

    if system.is_empty() {
        // Desktops without a battery often list nothing at all.
        return Ok(AC_POWER);
    }
    if system.iter().any(|s| s.is_external() && s.online == Some(true)) {
        return Ok(AC_POWER);
    }
    if system.iter().any(|s| s.kind == "UPS" && s.status_is("Discharging")) {
        return Ok(UPS_POWER);
    }

    let batteries = system.iter().filter(|s| s.kind == "Battery");
    let mut on_mains = false;
    for battery in batteries {
        match battery.status.as_deref() {
            Some("Discharging") => return Ok(BATTERY_POWER),
            Some("Charging") | Some("Full") | Some("Not charging") => on_mains = true,
            _ => {}
        }
    }
    if on_mains {
        return Ok(AC_POWER);
    }

    Err(PowerSourceError::FailedToGetType)
}

/// Reads `/sys/class/power_supply`.
#[derive(Debug, Clone)]
pub struct SysfsPowerSource {
    root: PathBuf,
}

impl Default for SysfsPowerSource {
    fn default() -> Self {
        Self::with_root(POWER_SUPPLY_CLASS)
    }
}

impl SysfsPowerSource {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn snapshot(&self) -> Result<Vec<PowerSupply>, PowerSourceError> {
        if !self.root.is_dir() {
            debug!("{} does not exist", self.root.display());
            return Err(PowerSourceError::InfoUnavailable);
        }

        let root = self.root.to_str().ok_or(PowerSourceError::FailedToRetrieve)?;
        let pattern = format!("{}/*", glob::Pattern::escape(root));
        let paths = glob::glob(&pattern).map_err(|e| {
            debug!("bad power supply pattern {}: {}", pattern, e);
            PowerSourceError::FailedToRetrieve
        })?;

        let mut listed = 0;
        let mut supplies = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| {
                debug!("failed to list power supplies: {}", e);
                PowerSourceError::FailedToRetrieve
            })?;
            listed += 1;
            match PowerSupply::read(&path) {
                Some(supply) => {
                    debug!(
                        "{}: type={} online={:?} status={:?}",
                        supply.name, supply.kind, supply.online, supply.status
                    );
                    supplies.push(supply);
                }
                None => debug!("skipping {}: no readable type", path.display()),
            }
        }

        if listed > 0 && supplies.is_empty() {
            return Err(PowerSourceError::TypeUnavailable);
        }
        Ok(supplies)
    }
}

impl PowerSource for SysfsPowerSource {
    fn providing_power_source_type(&self) -> Result<String, PowerSourceError> {
        let supplies = self.snapshot()?;
        providing_power_source(&supplies).map(str::to_string)
    }
}
