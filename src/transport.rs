//! Register access over I2C.
//!
//! Reads set the register pointer and read back in one repeated-start
//! transaction. Writes send pointer and payload in one transaction.

use embedded_hal_1::i2c::I2c;

use crate::register::Register;

/// Addressed register access to one device on the bus.
pub struct Transport<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Transport<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Transport { i2c, address }
    }

    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn read_u8(&mut self, reg: Register) -> Result<u8, I2C::Error> {
        let mut buf = [0u8];
        self.read_into(reg, &mut buf)?;
        Ok(buf[0])
    }

    pub fn write_u8(&mut self, reg: Register, value: u8) -> Result<(), I2C::Error> {
        self.write_from(&[reg.addr(), value])
    }

    pub fn read_u16(&mut self, reg: Register) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.read_into(reg, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    pub fn write_u16(&mut self, reg: Register, value: u16) -> Result<(), I2C::Error> {
        let [msb, lsb] = value.to_be_bytes();
        self.write_from(&[reg.addr(), msb, lsb])
    }

    /// Best-effort 16-bit read. On bus failure whatever landed in the
    /// buffer is returned, starting from zero.
    pub fn read_u16_lossy(&mut self, reg: Register) -> u16 {
        let mut buf = [0u8; 2];
        let _ = self.read_into(reg, &mut buf);
        u16::from_be_bytes(buf)
    }

    fn read_into(&mut self, reg: Register, buf: &mut [u8]) -> Result<(), I2C::Error> {
        let ret = self.i2c.write_read(self.address, &[reg.addr()], buf);
        #[cfg(feature = "defmt")]
        match &ret {
            Ok(()) => defmt::trace!("ds75 {=u8:#x} read {} => {:x}", self.address, reg, &buf[..]),
            Err(_) => defmt::warn!("ds75 {=u8:#x} read {} failed", self.address, reg),
        }
        ret
    }

    /// `data` is the register pointer followed by the payload.
    fn write_from(&mut self, data: &[u8]) -> Result<(), I2C::Error> {
        let ret = self.i2c.write(self.address, data);
        #[cfg(feature = "defmt")]
        match &ret {
            Ok(()) => defmt::trace!("ds75 {=u8:#x} write {=u8} <= {:x}", self.address, data[0], &data[1..]),
            Err(_) => defmt::warn!("ds75 {=u8:#x} write {=u8} failed", self.address, data[0]),
        }
        ret
    }
}
