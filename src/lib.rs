// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! SGP30 driver implementing the SGP30 I2C air quality sensor command set
//!
//! Operations taken from the [datasheet](https://sensirion.com/media/documents/984E0DD5/61644B8B/Sensirion_Gas_Sensors_Datasheet_SGP30.pdf)
//!
//! Every 16-bit word on the bus travels as `[msb, lsb, crc]`. Responses are
//! verified before they are interpreted; a short read or a bad checksum fails
//! the whole command. The driver does not retry anything and does not track
//! whether [`Sgp30::init_air_quality`](sgp30::Sgp30::init_air_quality) has
//! been called, that ordering is up to the caller.
//!
//! The bus can be a Linux i2c-dev node (through `i2cdev`), any
//! `embedded-hal` 1.0 I2C implementation wrapped in [`bus::HalBus`], or
//! anything implementing [`bus::I2cBus`].
//!
//! ## Basic Example
//!
//! Obtaining measurements, eCO2 and TVOC
//!
//!
//!```no_run
//!use sgp30_i2c::sgp30::Sgp30;
//!use std::thread;
//!use std::time::Duration;
//!
//!fn main() {
//!    // Open the I2C device
//!    let mut sgp = Sgp30::open("/dev/i2c-1").unwrap();
//!    sgp.init_air_quality().unwrap();
//!
//!    loop {
//!        // the IAQ algorithm expects one measurement per second
//!        thread::sleep(Duration::from_secs(1));
//!        match sgp.measure_iaq() {
//!            Ok(reading) => {
//!                println!("eCO2: {} ppm TVOC: {} ppb", reading.eco2, reading.tvoc);
//!            }
//!            Err(e) => {
//!                println!("Error obtaining measurements. More details: {}", e);
//!            }
//!        }
//!    }
//!}
//!```
//!

pub mod bus;
pub mod commands;
pub mod crc;
mod error;
pub mod frame;
/// Driver implementing SGP30 device related operations
pub mod sgp30;

pub use error::Error;
