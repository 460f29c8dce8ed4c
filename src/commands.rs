// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! SGP30 command set.
//!
//! Opcodes taken from the
//! [SGP30 datasheet](https://sensirion.com/media/documents/984E0DD5/61644B8B/Sensirion_Gas_Sensors_Datasheet_SGP30.pdf),
//! table 10.

/// A fixed chip command: opcode plus the number of argument and response words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Command code, sent MSB first.
    pub opcode: u16,
    /// Number of argument words that must follow the opcode.
    pub args: usize,
    /// Number of words the device answers with.
    pub reads: usize,
}

impl Command {
    const fn new(opcode: u16, args: usize, reads: usize) -> Self {
        Command {
            opcode,
            args,
            reads,
        }
    }

    /// Opcode as sent on the wire, MSB first.
    pub fn bytes(&self) -> [u8; 2] {
        self.opcode.to_be_bytes()
    }
}

/// Starts the IAQ algorithm.
pub const INIT_AIR_QUALITY: Command = Command::new(0x2003, 0, 0);
/// eCO2 and TVOC.
pub const MEASURE_IAQ: Command = Command::new(0x2008, 0, 2);
/// Baseline, TVOC word first.
pub const GET_IAQ_BASELINE: Command = Command::new(0x2015, 0, 2);
/// Baseline, TVOC word first.
pub const SET_IAQ_BASELINE: Command = Command::new(0x201E, 2, 0);
/// Absolute humidity as 8.8 fixed point g/m³.
pub const SET_ABSOLUTE_HUMIDITY: Command = Command::new(0x2061, 1, 0);
/// On-chip self-test, answers [`SELF_TEST_PASS`] when ok.
pub const MEASURE_TEST: Command = Command::new(0x2032, 0, 1);
/// Product type and version.
pub const GET_FEATURE_SET: Command = Command::new(0x202F, 0, 1);
/// Raw H2 and ethanol signals.
pub const MEASURE_RAW: Command = Command::new(0x2050, 0, 2);
/// 48-bit serial number as three words.
pub const GET_SERIAL_ID: Command = Command::new(0x3682, 0, 3);
/// Soft reset, normally a general call.
pub const SOFT_RESET: Command = Command::new(0x0006, 0, 0);

/// Word returned by a passing on-chip self-test.
pub const SELF_TEST_PASS: u16 = 0xD400;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{encode_command, WORD_LEN};

    const ALL: [Command; 10] = [
        INIT_AIR_QUALITY,
        MEASURE_IAQ,
        GET_IAQ_BASELINE,
        SET_IAQ_BASELINE,
        SET_ABSOLUTE_HUMIDITY,
        MEASURE_TEST,
        GET_FEATURE_SET,
        MEASURE_RAW,
        GET_SERIAL_ID,
        SOFT_RESET,
    ];

    #[test]
    fn only_setters_take_arguments() {
        let with_args: Vec<(u16, usize)> = ALL
            .iter()
            .filter(|c| c.args > 0)
            .map(|c| (c.opcode, c.args))
            .collect();
        assert_eq!(with_args, vec![(0x201E, 2), (0x2061, 1)]);
        assert!(ALL.iter().all(|c| c.args == 0 || c.reads == 0));
    }

    #[test]
    fn frame_length_follows_argument_count() {
        for command in ALL {
            let args = vec![0x1234u16; command.args];
            let frame = encode_command(&command, &args);
            assert_eq!(frame.len(), 2 + command.args * WORD_LEN);
            assert_eq!(frame[..2], command.bytes());
        }
    }

    #[test]
    fn opcodes_are_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.opcode, b.opcode);
            }
        }
    }
}
