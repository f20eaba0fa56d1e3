//! Shape check of a raw code, before any of its fields are interpreted.

use crate::consts::{
    CHECKSUM_ALPHABET, CONTROL_POSITION, DATE_POSITIONS, PIC_LENGTH, SEPARATOR_POSITION,
    SEQUENCE_POSITIONS,
};
use crate::prelude::*;

/// Why an input does not have the `DDMMYYCZZZQ` shape.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Malformation {
    #[display(fmt = "Expected {} characters, found {found}.", PIC_LENGTH)]
    WrongLength { found: usize },
    #[display(fmt = "Expected a digit at position {position}, found '{found}'.")]
    ExpectedDigit { position: usize, found: char },
    #[display(
        fmt = "Expected a control character from '{}' at position {}, found '{found}'.",
        CHECKSUM_ALPHABET,
        CONTROL_POSITION
    )]
    InvalidControlCharacter { found: char },
}

impl std::error::Error for Malformation {}

/// Positional fields of a well-shaped code. Digits are stored as values 0-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segments {
    pub date: [u8; 6],
    pub separator: char,
    pub sequence: [u8; 3],
    /// The control character as supplied
    pub control: char,
}

impl Segments {
    /// Control character normalized to the uppercase alphabet form.
    pub const fn canonical_control(&self) -> char {
        self.control.to_ascii_uppercase()
    }
}

/// Splits `input` into its segments, rejecting anything that is not shaped like a code.
///
/// The separator is not checked here; any single character passes.
pub(crate) fn scan(input: &str) -> Result<Segments, Malformation> {
    // One extra character is enough to tell an overlong input apart
    let chars: Vec<char> = input.chars().take(PIC_LENGTH + 1).collect();
    if chars.len() != PIC_LENGTH {
        return Err(Malformation::WrongLength {
            found: input.chars().count(),
        });
    }

    let mut date = [0; 6];
    for (slot, position) in date.iter_mut().zip(DATE_POSITIONS) {
        *slot = digit_at(&chars, position)?;
    }
    let mut sequence = [0; 3];
    for (slot, position) in sequence.iter_mut().zip(SEQUENCE_POSITIONS) {
        *slot = digit_at(&chars, position)?;
    }

    let control = chars[CONTROL_POSITION];
    if !CHECKSUM_ALPHABET.contains(control.to_ascii_uppercase()) {
        return Err(Malformation::InvalidControlCharacter { found: control });
    }

    Ok(Segments {
        date,
        separator: chars[SEPARATOR_POSITION],
        sequence,
        control,
    })
}

fn digit_at(chars: &[char], position: usize) -> Result<u8, Malformation> {
    let found = chars[position];
    found
        .to_digit(10)
        .and_then(|d| u8::try_from(d).ok())
        .ok_or(Malformation::ExpectedDigit { position, found })
}
