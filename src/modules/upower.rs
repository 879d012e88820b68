use std::io;

use log::debug;
use tokio::runtime::Builder;
use zbus::{dbus_proxy, fdo, Connection};

use super::error::PowerSourceError;
use super::power_source::{PowerSource, AC_POWER, BATTERY_POWER, UPS_POWER};

/// UPower `Device.Type` for an uninterruptible power supply.
const DEVICE_KIND_UPS: u32 = 3;
/// UPower `Device.State` while discharging.
const STATE_DISCHARGING: u32 = 2;

#[dbus_proxy(
    interface = "org.freedesktop.UPower",
    default_service = "org.freedesktop.UPower",
    default_path = "/org/freedesktop/UPower"
)]
trait UPower {
    fn enumerate_devices(&self) -> zbus::Result<Vec<zvariant::OwnedObjectPath>>;

    /// True while the system runs from a battery or a UPS.
    #[dbus_proxy(property)]
    fn on_battery(&self) -> zbus::Result<bool>;
}

#[dbus_proxy(
    interface = "org.freedesktop.UPower.Device",
    default_service = "org.freedesktop.UPower"
)]
trait Device {
    #[dbus_proxy(property, name = "Type")]
    fn kind(&self) -> zbus::Result<u32>;

    #[dbus_proxy(property)]
    fn state(&self) -> zbus::Result<u32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UPowerDevice {
    pub kind: u32,
    pub state: u32,
}

/// Picks the providing source from UPower's view of the system.
pub fn providing_power_source(on_battery: bool, devices: &[UPowerDevice]) -> &'static str {
    if !on_battery {
        return AC_POWER;
    }
    let ups_discharging = devices
        .iter()
        .any(|d| d.kind == DEVICE_KIND_UPS && d.state == STATE_DISCHARGING);
    if ups_discharging {
        UPS_POWER
    } else {
        BATTERY_POWER
    }
}

fn service_missing(e: &zbus::Error) -> bool {
    match e {
        zbus::Error::FDO(e) => matches!(
            &**e,
            fdo::Error::ServiceUnknown(_) | fdo::Error::NameHasNoOwner(_)
        ),
        zbus::Error::MethodError(name, ..) => {
            name.as_str() == "org.freedesktop.DBus.Error.ServiceUnknown"
        }
        _ => false,
    }
}

/// No system bus at all, as in containers and minimal installs.
fn bus_missing(e: &zbus::Error) -> bool {
    match e {
        zbus::Error::InputOutput(e) => matches!(
            e.kind(),
            io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused
        ),
        _ => false,
    }
}

fn connect_error(e: zbus::Error) -> PowerSourceError {
    if bus_missing(&e) {
        debug!("system bus unavailable: {}", e);
        PowerSourceError::InfoUnavailable
    } else {
        debug!("failed to connect to the system bus: {}", e);
        PowerSourceError::FailedToRetrieve
    }
}

fn retrieve_error(e: zbus::Error) -> PowerSourceError {
    debug!("UPower query failed: {}", e);
    if service_missing(&e) {
        PowerSourceError::InfoUnavailable
    } else {
        PowerSourceError::FailedToRetrieve
    }
}

/// Asks the UPower daemon over the system bus.
#[derive(Debug, Default, Clone, Copy)]
pub struct UPowerSource;

impl UPowerSource {
    async fn devices(
        connection: &Connection,
        upower: &UPowerProxy<'_>,
    ) -> Result<Vec<UPowerDevice>, PowerSourceError> {
        let paths = upower.enumerate_devices().await.map_err(|e| {
            debug!("failed to enumerate UPower devices: {}", e);
            PowerSourceError::FailedToGetType
        })?;

        let mut devices = Vec::with_capacity(paths.len());
        for path in paths {
            let shown = path.as_str().to_string();
            let device = match DeviceProxy::builder(connection).path(path) {
                Ok(builder) => builder.build().await,
                Err(e) => Err(e),
            };
            let device = match device {
                Ok(device) => device,
                Err(e) => {
                    debug!("skipping UPower device {}: {}", shown, e);
                    continue;
                }
            };
            match (device.kind().await, device.state().await) {
                (Ok(kind), Ok(state)) => devices.push(UPowerDevice { kind, state }),
                (Err(e), _) | (_, Err(e)) => debug!("skipping UPower device {}: {}", shown, e),
            }
        }
        Ok(devices)
    }

    async fn query(&self) -> Result<String, PowerSourceError> {
        let connection = Connection::system().await.map_err(connect_error)?;
        let upower = UPowerProxy::new(&connection).await.map_err(retrieve_error)?;

        let on_battery = upower.on_battery().await.map_err(retrieve_error)?;
        debug!("UPower OnBattery={}", on_battery);
        if !on_battery {
            return Ok(providing_power_source(false, &[]).to_string());
        }

        let devices = Self::devices(&connection, &upower).await?;
        debug!("UPower devices {:?}", devices);
        Ok(providing_power_source(true, &devices).to_string())
    }
}

impl PowerSource for UPowerSource {
    fn providing_power_source_type(&self) -> Result<String, PowerSourceError> {
        let rt = Builder::new_current_thread().enable_all().build()?;
        rt.block_on(self.query())
    }
}
