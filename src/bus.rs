// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Bus and delay collaborators the driver talks through.

use embedded_hal::delay::DelayNs;
use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use std::time::Duration;

/// Blocking two-wire bus addressed per transfer.
pub trait I2cBus {
    type Error: core::fmt::Debug;

    /// Writes all of `bytes` to the device at `address`.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads up to `buf.len()` bytes from `address`, returning how many were read.
    ///
    /// A short read is not an error at this level.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Linux i2c-dev node. The slave address is set before every transfer so one
/// handle can reach several devices.
impl I2cBus for LinuxI2CDevice {
    type Error = LinuxI2CError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.set_slave_address(u16::from(address))?;
        I2CDevice::write(self, bytes)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.set_slave_address(u16::from(address))?;
        I2CDevice::read(self, buf)?;
        Ok(buf.len())
    }
}

/// Adapter for any embedded-hal 1.0 I2C bus.
#[derive(Debug)]
pub struct HalBus<I2C>(pub I2C);

impl<I2C> I2cBus for HalBus<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Error = I2C::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, bytes)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.0.read(address, buf)?;
        Ok(buf.len())
    }
}

/// Delay backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)))
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)))
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn hal_bus_forwards_transfers() {
        let expectations = [
            Transaction::write(0x58, vec![0x36, 0x82]),
            Transaction::read(0x58, vec![0xBE, 0xEF, 0x92]),
        ];
        let mut bus = HalBus(I2cMock::new(&expectations));

        bus.write(0x58, &[0x36, 0x82]).unwrap();
        let mut buf = [0u8; 3];
        assert_eq!(bus.read(0x58, &mut buf).unwrap(), 3);
        assert_eq!(buf, [0xBE, 0xEF, 0x92]);

        bus.0.done();
    }
}
