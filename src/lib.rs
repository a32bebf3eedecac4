//! Platform-agnostic driver for the DS75 digital thermometer and thermostat,
//! built on the `embedded-hal` 1.0 I²C traits.
//!
//! ```no_run
//! # fn demo<I: embedded_hal_1::i2c::I2c>(mut i2c: I) -> Result<(), ds75::Error<I::Error>> {
//! use ds75::DS75;
//!
//! // A2..A0 tied low
//! let mut sensor = DS75::new(&mut i2c, 0);
//! sensor.init()?;
//! sensor.set_resolution(12)?;
//! sensor.set_over_temperature_threshold(30.0)?;
//! sensor.set_hysteresis_threshold(28.0)?;
//!
//! let celsius = sensor.read_temperature()?;
//! let fahrenheit = ds75::codec::celsius_to_fahrenheit(celsius);
//! # let _ = fahrenheit;
//! # Ok(()) }
//! ```
#![cfg_attr(not(test), no_std)]

pub mod codec;
pub mod ds75;
pub mod register;
pub mod transport;

pub use crate::ds75::{Error, DS75};
pub use crate::register::{Config, FaultTolerance, Polarity, Resolution, ThermostatMode};
