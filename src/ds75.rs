//! DS75 digital thermometer and thermostat.
//!
//! - Range: -55C to +125C, readout -128C to +127.9375C
//! - Resolution: 9 to 12 bits, 0.5C to 0.0625C
//! - Address(7bit): 0x48 to 0x4F, selected by A2..A0
//!
//! The bus handle is taken by value. Pass `&mut i2c`, or a shared-bus proxy
//! such as `embedded_hal_bus::i2c::RefCellDevice`, to keep the bus usable by
//! other drivers. Setters read-modify-write CONFIG with nothing cached; two
//! handles on the same device must not interleave them.

use embedded_hal_1::i2c::I2c;

use crate::codec;
use crate::register::{device_address, set_field, Config, Field, Register};
use crate::transport::Transport;

/// DS75 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C bus error
    I2c(E),
    /// Resolution out of 9..=12 bits, nothing was sent
    InvalidResolution(u8),
    /// Fault tolerance out of 0..=3, nothing was sent
    InvalidFaultTolerance(u8),
}

pub struct DS75<I2C> {
    transport: Transport<I2C>,
}

impl<I2C> DS75<I2C>
where
    I2C: I2c,
{
    /// Create device driver instance. `sub_address` is the A2..A0 strapping,
    /// bits above are ignored.
    pub fn new(i2c: I2C, sub_address: u8) -> Self {
        DS75 {
            transport: Transport::new(i2c, device_address(sub_address)),
        }
    }

    /// 7-bit bus address.
    pub fn address(&self) -> u8 {
        self.transport.address()
    }

    pub fn release(self) -> I2C {
        self.transport.release()
    }

    /// Check the device answers. The bus itself is set up by the HAL.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let _config = self.read_config_raw()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("ds75 {=u8:#x} config: {=u8:08b}", self.address(), _config);
        Ok(())
    }

    /// Temperature in C, best effort.
    ///
    /// A failed read is not reported, the value is then meaningless. In
    /// interrupt mode this read also clears a latched OS output.
    pub fn temperature(&mut self) -> f32 {
        codec::decode(self.transport.read_u16_lossy(Register::Temperature))
    }

    /// Temperature in C.
    pub fn read_temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        self.read_raw_temperature().map(codec::decode)
    }

    /// Raw TEMP register word.
    pub fn read_raw_temperature(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_register_u16(Register::Temperature)
    }

    /// Set T_OS, the temperature at which OS goes active.
    pub fn set_over_temperature_threshold(&mut self, celsius: f32) -> Result<(), Error<I2C::Error>> {
        self.write_threshold(Register::OverTemperature, celsius)
    }

    /// Set T_HYST, the temperature at which OS is released in comparator mode.
    pub fn set_hysteresis_threshold(&mut self, celsius: f32) -> Result<(), Error<I2C::Error>> {
        self.write_threshold(Register::Hysteresis, celsius)
    }

    pub fn over_temperature_threshold(&mut self) -> Result<f32, Error<I2C::Error>> {
        self.read_threshold(Register::OverTemperature)
    }

    pub fn hysteresis_threshold(&mut self) -> Result<f32, Error<I2C::Error>> {
        self.read_threshold(Register::Hysteresis)
    }

    /// Set conversion resolution, 9 to 12 bits.
    ///
    /// The next fresh reading is ready after
    /// [`Resolution::conversion_time_ms`](crate::Resolution::conversion_time_ms).
    pub fn set_resolution(&mut self, bits: u8) -> Result<(), Error<I2C::Error>> {
        if !(9..=12).contains(&bits) {
            return Err(Error::InvalidResolution(bits));
        }
        self.modify_config(Field::Resolution, bits - 9)
    }

    /// Set the fault queue, raw 0 to 3 for 1, 2, 4 or 6 consecutive faults.
    pub fn set_fault_tolerance(&mut self, value: u8) -> Result<(), Error<I2C::Error>> {
        if value > Field::FaultTolerance.max_value() {
            return Err(Error::InvalidFaultTolerance(value));
        }
        self.modify_config(Field::FaultTolerance, value)
    }

    pub fn set_output_polarity(&mut self, active_high: bool) -> Result<(), Error<I2C::Error>> {
        self.modify_config(Field::Polarity, active_high as u8)
    }

    /// `true` for interrupt mode, `false` for comparator mode.
    pub fn set_interrupt_mode(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.modify_config(Field::ThermostatMode, enabled as u8)
    }

    pub fn set_shutdown(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.modify_config(Field::Shutdown, enabled as u8)
    }

    pub fn config(&mut self) -> Result<Config, Error<I2C::Error>> {
        self.read_config_raw().map(Config::from_bits)
    }

    /// Write all sub-fields at once. Bits outside them are kept.
    pub fn configure(&mut self, config: &Config) -> Result<(), Error<I2C::Error>> {
        let prior = self.read_config_raw()?;
        self.write_config_raw(config.apply(prior))
    }

    /// Read an 8-bit register.
    pub fn read_register(&mut self, reg: Register) -> Result<u8, Error<I2C::Error>> {
        self.transport.read_u8(reg).map_err(Error::I2c)
    }

    /// Write an 8-bit register.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<I2C::Error>> {
        self.transport.write_u8(reg, value).map_err(Error::I2c)
    }

    /// Read a 16-bit register, MSB first.
    pub fn read_register_u16(&mut self, reg: Register) -> Result<u16, Error<I2C::Error>> {
        self.transport.read_u16(reg).map_err(Error::I2c)
    }

    /// Write a 16-bit register, MSB first.
    pub fn write_register_u16(&mut self, reg: Register, value: u16) -> Result<(), Error<I2C::Error>> {
        self.transport.write_u16(reg, value).map_err(Error::I2c)
    }

    fn modify_config(&mut self, field: Field, value: u8) -> Result<(), Error<I2C::Error>> {
        let prior = self.read_config_raw()?;
        let reg = set_field(prior, field, value);
        #[cfg(feature = "defmt")]
        defmt::debug!("ds75 {} {=u8:08b} -> {=u8:08b}", field, prior, reg);
        self.write_config_raw(reg)
    }

    #[inline]
    fn read_config_raw(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_register(Register::Config)
    }

    #[inline]
    fn write_config_raw(&mut self, reg: u8) -> Result<(), Error<I2C::Error>> {
        self.write_register(Register::Config, reg)
    }

    fn write_threshold(&mut self, reg: Register, celsius: f32) -> Result<(), Error<I2C::Error>> {
        self.write_register_u16(reg, codec::encode(celsius))
    }

    fn read_threshold(&mut self, reg: Register) -> Result<f32, Error<I2C::Error>> {
        self.read_register_u16(reg).map(codec::decode)
    }
}
