// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Sensirion CRC-8 used to protect every 16-bit word on the bus.
//!
//! Polynomial 0x31 (x^8 + x^5 + x^4 + 1), initial value 0xFF, MSB first,
//! no final XOR. More info regarding the
//! [algorithm](https://en.wikipedia.org/wiki/Computation_of_cyclic_redundancy_checks)

const POLYNOMIAL: u8 = 0x31;
const INIT: u8 = 0xFF;

/// Computes the checksum over `message`.
///
/// An empty message yields the initial value 0xFF.
pub fn crc8(message: &[u8]) -> u8 {
    let mut rem = INIT;
    for byte in message {
        rem ^= byte;
        for _ in 0..8 {
            if (rem & 0x80) != 0 {
                rem = (rem << 1) ^ POLYNOMIAL;
            } else {
                rem <<= 1;
            }
        }
    }
    rem
}
