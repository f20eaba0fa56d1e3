//! Control character computation.

use crate::consts::{CHECKSUM_ALPHABET, CHECKSUM_MODULUS};
use crate::lexical::Segments;

/// The 9-digit numeral formed by `DDMMYY` followed by `ZZZ`.
pub(crate) fn numeral(segments: &Segments) -> u32 {
    segments
        .date
        .iter()
        .chain(segments.sequence.iter())
        .fold(0, |acc, &digit| acc * 10 + u32::from(digit))
}

/// Returns the control character for a numeral.
pub fn control_char(numeral: u32) -> char {
    let index = (numeral % CHECKSUM_MODULUS) as usize;
    // The alphabet is ASCII and has exactly CHECKSUM_MODULUS symbols
    char::from(CHECKSUM_ALPHABET.as_bytes()[index])
}

/// A control character that disagrees with the recomputed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mismatch {
    pub given: char,
    pub expected: char,
}

/// Recomputes the control character and compares it with the (uppercased) supplied one.
pub(crate) fn verify(segments: &Segments) -> Result<char, Mismatch> {
    let expected = control_char(numeral(segments));
    if segments.canonical_control() == expected {
        Ok(expected)
    } else {
        Err(Mismatch {
            given: segments.control,
            expected,
        })
    }
}
