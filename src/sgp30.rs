// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::bus::{I2cBus, StdDelay};
use crate::commands::{self, Command};
use crate::error::Error;
use crate::frame::{decode_words, encode_command, WORD_LEN};
use embedded_hal::delay::DelayNs;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use log::{trace, warn};
use std::path::Path;
use std::time::Duration;

/// Default I2C address of the SGP30.
pub const DEFAULT_ADDRESS: u8 = 0x58;

/// Equivalent CO2 in ppm and total VOC in ppb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub eco2: u16,
    pub tvoc: u16,
}

/// Raw H2 and ethanol signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSignals {
    pub h2: u16,
    pub ethanol: u16,
}

/// IAQ calibration baseline.
///
/// The chip sends and expects the two words as (TVOC, eCO2), the reverse of
/// the field order here. `from_wire` and `to_wire` are the only places that
/// know this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub eco2: u16,
    pub tvoc: u16,
}

impl Baseline {
    fn from_wire(words: [u16; 2]) -> Self {
        let [tvoc, eco2] = words;
        Baseline { eco2, tvoc }
    }

    fn to_wire(self) -> [u16; 2] {
        [self.tvoc, self.eco2]
    }
}

/// Product type and version from the feature set word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet {
    pub product_type: u8,
    pub product_version: u8,
}

impl From<u16> for FeatureSet {
    fn from(word: u16) -> Self {
        FeatureSet {
            product_type: (word >> 12) as u8,
            product_version: (word & 0xFF) as u8,
        }
    }
}

/// Settling time between sending a command and reading its response.
///
/// Defaults are the vendor-recommended values; real parts may need more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub init_air_quality: Duration,
    pub measure_iaq: Duration,
    pub measure_raw: Duration,
    pub measure_test: Duration,
    pub get_baseline: Duration,
    pub get_feature_set: Duration,
    pub get_serial_id: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            init_air_quality: Duration::from_millis(10),
            measure_iaq: Duration::from_millis(15),
            measure_raw: Duration::from_millis(20),
            measure_test: Duration::from_millis(200),
            get_baseline: Duration::from_millis(15),
            get_feature_set: Duration::from_millis(10),
            get_serial_id: Duration::from_millis(1),
        }
    }
}

/// SGP30 Struct, wraps a bus and a delay
/// and has implemented related SGP30 operations.
///
/// The driver keeps no state besides the address, so any number of
/// instances can coexist on different buses or addresses. Access to a
/// shared bus must be serialized by the caller.
#[derive(Debug)]
pub struct Sgp30<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    timings: Timings,
}

impl Sgp30<LinuxI2CDevice, StdDelay> {
    /// Opens the i2c-dev node at `path` and talks to the
    /// device on standard address 0x58.
    ///
    /// If fails, return an LinuxI2CError from i2cdev
    ///
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LinuxI2CError> {
        let device = LinuxI2CDevice::new(path, u16::from(DEFAULT_ADDRESS))?;
        Ok(Sgp30::new(device, StdDelay))
    }
}

impl<I2C, D> Sgp30<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    /// Creates a driver on the default address with default timings.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Sgp30 {
            i2c,
            delay,
            address: DEFAULT_ADDRESS,
            timings: Timings::default(),
        }
    }

    /// Talks to the device at `address` instead of 0x58.
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Replaces the default settling delays.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// I2C address commands are sent to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Settling delays currently in use.
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write_command(&mut self, command: &Command, args: &[u16]) -> Result<(), Error<I2C::Error>> {
        let buffer = encode_command(command, args);
        trace!("sgp30@{:#04x} write {:02x?}", self.address, buffer);
        self.i2c.write(self.address, &buffer).map_err(Error::Bus)
    }

    fn settle(&mut self, duration: Duration) {
        if !duration.is_zero() {
            let us = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
            self.delay.delay_us(us);
        }
    }

    fn read_words(&mut self, words: usize, settle: Duration) -> Result<Vec<u16>, Error<I2C::Error>> {
        self.settle(settle);

        let mut buffer = vec![0u8; words * WORD_LEN];
        let read = self.i2c.read(self.address, &mut buffer).map_err(Error::Bus)?;
        if read > buffer.len() {
            return Err(Error::FramingLength {
                expected: buffer.len(),
                actual: read,
            });
        }
        trace!("sgp30@{:#04x} read {:02x?}", self.address, &buffer[..read]);
        decode_words(&buffer[..read], words)
    }

    fn command<const N: usize>(
        &mut self,
        command: &Command,
        settle: Duration,
    ) -> Result<[u16; N], Error<I2C::Error>> {
        debug_assert_eq!(command.reads, N);
        self.write_command(command, &[])?;
        let words = self.read_words(N, settle)?;
        let mut out = [0u16; N];
        out.copy_from_slice(&words);
        Ok(out)
    }

    /// Starts the on-chip IAQ algorithm.
    ///
    /// Must be called after power-up or a soft reset, before
    /// [`measure_iaq`](Self::measure_iaq). The first 15 seconds of
    /// readings afterwards are fixed at 400 ppm / 0 ppb.
    pub fn init_air_quality(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_command(&commands::INIT_AIR_QUALITY, &[])?;
        self.settle(self.timings.init_air_quality);
        Ok(())
    }

    /// Get eCO2 (ppm) and TVOC (ppb).
    /// Checks the checksum for each word, if everything ok returns the reading.
    /// In case of any problem, returns the error.
    pub fn measure_iaq(&mut self) -> Result<Reading, Error<I2C::Error>> {
        let [eco2, tvoc] = self.command(&commands::MEASURE_IAQ, self.timings.measure_iaq)?;
        Ok(Reading { eco2, tvoc })
    }

    /// Get the raw H2 and ethanol signals, used for part verification and testing.
    /// No compensation or baseline is applied to them.
    pub fn measure_raw(&mut self) -> Result<RawSignals, Error<I2C::Error>> {
        let [h2, ethanol] = self.command(&commands::MEASURE_RAW, self.timings.measure_raw)?;
        Ok(RawSignals { h2, ethanol })
    }

    /// Runs the on-chip self-test. A failing test is `Ok(false)`, not an error.
    pub fn measure_test(&mut self) -> Result<bool, Error<I2C::Error>> {
        let [result] = self.command(&commands::MEASURE_TEST, self.timings.measure_test)?;
        Ok(result == commands::SELF_TEST_PASS)
    }

    /// Reads the current IAQ baseline, to be stored and restored with
    /// [`set_baseline`](Self::set_baseline) after a power cycle.
    pub fn get_baseline(&mut self) -> Result<Baseline, Error<I2C::Error>> {
        let words = self.command(&commands::GET_IAQ_BASELINE, self.timings.get_baseline)?;
        Ok(Baseline::from_wire(words))
    }

    /// Restores a baseline previously read with [`get_baseline`](Self::get_baseline).
    ///
    /// A baseline of all zeros is rejected before anything is sent.
    pub fn set_baseline(&mut self, baseline: Baseline) -> Result<(), Error<I2C::Error>> {
        if baseline.eco2 == 0 && baseline.tvoc == 0 {
            return Err(Error::InvalidArgument("baseline must not be zero for both eCO2 and TVOC"));
        }
        self.write_command(&commands::SET_IAQ_BASELINE, &baseline.to_wire())
    }

    /// Sets absolute humidity in g/m³ for on-chip compensation.
    ///
    /// The value is sent as unsigned 8.8 fixed point. Anything too small to
    /// represent is sent as 1/256 g/m³, since 0 disables compensation.
    ///
    /// Only the low 16 bits of the fixed point value are kept, so 256 g/m³
    /// and above wrap around (256.0 is sent as 1, 257.0 as 1.0 g/m³).
    /// Infinity saturates to 0xFFFF. The valid range is below 256 g/m³.
    pub fn set_absolute_humidity(&mut self, grams_per_m3: f64) -> Result<(), Error<I2C::Error>> {
        let value = humidity_to_fixed_point(grams_per_m3)?;
        self.write_command(&commands::SET_ABSOLUTE_HUMIDITY, &[value])
    }

    /// Reads the product type and feature set version of the chip.
    pub fn get_feature_set(&mut self) -> Result<FeatureSet, Error<I2C::Error>> {
        let [word] = self.command(&commands::GET_FEATURE_SET, self.timings.get_feature_set)?;
        Ok(FeatureSet::from(word))
    }

    /// Returns the 48-bit serial number, most significant word first on the wire.
    pub fn get_serial_id(&mut self) -> Result<u64, Error<I2C::Error>> {
        let [high, mid, low] = self.command(&commands::GET_SERIAL_ID, self.timings.get_serial_id)?;
        Ok(u64::from(high) << 32 | u64::from(mid) << 16 | u64::from(low))
    }

    /// Soft reset the sensor device.
    ///
    /// The reset is a general call command, sent here to the device address
    /// instead. Not every part acknowledges that, so bus errors are logged and
    /// ignored. This is the only operation that swallows errors.
    pub fn soft_reset(&mut self) {
        if let Err(e) = self.write_command(&commands::SOFT_RESET, &[]) {
            warn!("sgp30@{:#04x} soft reset not acknowledged: {}", self.address, e);
        }
    }
}

fn humidity_to_fixed_point<E>(grams_per_m3: f64) -> Result<u16, Error<E>> {
    // also rejects NaN
    if !(grams_per_m3 > 0.0) {
        return Err(Error::InvalidArgument("absolute humidity must be positive"));
    }
    let value = ((grams_per_m3 * 256.0).round() as u64 & 0xFFFF) as u16;
    Ok(value.max(1))
}
