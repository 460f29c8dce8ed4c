// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

///
///SGP30 error enum, generic over the error of the
///underlying bus. Bus wraps the transport error unchanged,
///FramingLength and Checksum reject a bad response,
///InvalidArgument is raised before anything touches the bus.
///
#[derive(Debug, Error)]
pub enum Error<E> {
    /// The bus write or read itself failed
    #[error("i2c bus error: {0:?}")]
    Bus(E),
    /// The device returned a different number of bytes than requested
    #[error("expected {expected} bytes from device, got {actual}")]
    FramingLength { expected: usize, actual: usize },
    /// The checksum of a response word does not correspond to the calculated one
    #[error("checksum mismatch in word {word}: calculated {expected:#04x}, received {actual:#04x}")]
    Checksum { word: usize, expected: u8, actual: u8 },
    /// Caller supplied a value outside of the command's contract
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
