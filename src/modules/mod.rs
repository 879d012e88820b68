pub mod args;
pub mod controller;
pub mod error;
pub mod exit_code;
pub mod power_source;
pub mod sysfs;
pub mod upower;
