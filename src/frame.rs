// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Wire framing: a command is two opcode bytes followed by one
//! `[msb, lsb, crc]` group per argument word, and a response is a
//! sequence of such groups.

use crate::commands::Command;
use crate::crc::crc8;
use crate::error::Error;
use log::debug;

/// Bytes per word on the wire: two data bytes and the checksum.
pub const WORD_LEN: usize = 3;

/// Encodes a single word as `[msb, lsb, crc]`.
pub fn encode_word(word: u16) -> [u8; WORD_LEN] {
    let [msb, lsb] = word.to_be_bytes();
    [msb, lsb, crc8(&[msb, lsb])]
}

/// Builds the full write buffer for `command` with its argument words.
pub fn encode_command(command: &Command, args: &[u16]) -> Vec<u8> {
    debug_assert_eq!(command.args, args.len());
    let mut buffer = Vec::with_capacity(2 + args.len() * WORD_LEN);
    buffer.extend_from_slice(&command.bytes());
    for word in args {
        buffer.extend_from_slice(&encode_word(*word));
    }
    buffer
}

/// Verifies and decodes a response of `words` words.
///
/// Fails on a length mismatch or on the first group whose checksum does
/// not match; no words are returned in either case.
pub fn decode_words<E>(response: &[u8], words: usize) -> Result<Vec<u16>, Error<E>> {
    let expected = words * WORD_LEN;
    if response.len() != expected {
        debug!("expected {} bytes, got {}", expected, response.len());
        return Err(Error::FramingLength {
            expected,
            actual: response.len(),
        });
    }

    response
        .chunks_exact(WORD_LEN)
        .enumerate()
        .map(|(i, group)| {
            let calculated = crc8(&group[..2]);
            if calculated != group[2] {
                debug!(
                    "crc mismatch in word {}: {:02x?}, calculated {:#04x}",
                    i, group, calculated
                );
                return Err(Error::Checksum {
                    word: i,
                    expected: calculated,
                    actual: group[2],
                });
            }
            Ok(u16::from_be_bytes([group[0], group[1]]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands;

    type TestError = Error<()>;

    #[test]
    fn command_without_arguments_is_opcode_only() {
        assert_eq!(encode_command(&commands::MEASURE_IAQ, &[]), vec![0x20, 0x08]);
    }

    #[test]
    fn arguments_carry_checksum() {
        assert_eq!(
            encode_command(&commands::SET_ABSOLUTE_HUMIDITY, &[0xBEEF]),
            vec![0x20, 0x61, 0xBE, 0xEF, 0x92]
        );
    }

    #[test]
    fn every_word_survives_framing() {
        for word in 0..=u16::MAX {
            let decoded = decode_words::<()>(&encode_word(word), 1).unwrap();
            assert_eq!(decoded, vec![word]);
        }
    }

    #[test]
    fn single_bit_flip_is_rejected() {
        let group = encode_word(0x1A2B);
        for bit in 0..24 {
            let mut corrupted = group;
            corrupted[bit / 8] ^= 1 << (bit % 8);
            assert!(
                matches!(
                    decode_words::<()>(&corrupted, 1),
                    Err(TestError::Checksum { word: 0, .. })
                ),
                "bit {bit}"
            );
        }
    }

    #[test]
    fn short_response_is_framing_error() {
        let mut response = encode_word(400).to_vec();
        response.extend_from_slice(&encode_word(0)[..2]);
        assert!(matches!(
            decode_words::<()>(&response, 2),
            Err(TestError::FramingLength {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn corrupt_later_word_fails_whole_read() {
        let mut response = encode_word(400).to_vec();
        let mut bad = encode_word(12);
        bad[2] ^= 0xFF;
        response.extend_from_slice(&bad);
        assert!(matches!(
            decode_words::<()>(&response, 2),
            Err(TestError::Checksum { word: 1, .. })
        ));
    }

    #[test]
    fn zero_words_is_empty() {
        assert_eq!(decode_words::<()>(&[], 0).unwrap(), Vec::<u16>::new());
    }
}
