//! Validation and decoding of Finnish personal identity codes (PICs).
//!
//! A code has the shape `DDMMYYCZZZQ`: birth date, century separator,
//! individual sequence number and control character.
//!
//! ```
//! use finnpic::{Gender, parse};
//!
//! let pic = parse("070377-281V").unwrap();
//! assert_eq!(pic.birth_date().to_string(), "1977-03-07");
//! assert_eq!(pic.gender(), Gender::Male);
//! assert!(!finnpic::is_valid("070377-281X"));
//! ```

mod century;
mod checksum;
mod consts;
mod lexical;
mod prelude;
mod types;

pub use century::{CenturyError, CenturyTable};
pub use checksum::control_char;
pub use consts::*;
pub use lexical::Malformation;
pub use types::{BirthDate, Day, Gender, Month, SequenceNumber, Year, is_leap_year};

use crate::century::Unresolved;
use crate::prelude::*;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// A validated personal identity code.
///
/// Only produced by a successful parse, so every accessor is infallible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{value}")]
pub struct Pic {
    value: String,
    birth_date: BirthDate,
    separator: char,
    sequence: SequenceNumber,
    gender: Gender,
    checksum: char,
}

/// Reason a calendar date could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
}

impl std::error::Error for DateError {}

/// A sequence number above `MAX_SEQUENCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "Invalid sequence number: {} (must be 0-{})", "_0", MAX_SEQUENCE)]
pub struct InvalidSequence(pub u16);

impl std::error::Error for InvalidSequence {}

/// Error returned when a string is not a valid personal identity code.
///
/// Variants are listed in the order the checks run; only the first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PicError {
    /// Wrong length, or a character of the wrong class.
    #[error("Invalid PIC: '{input}'. {reason}")]
    MalformedInput { input: String, reason: Malformation },

    #[error("Invalid PIC: '{input}'. The century separator ('{separator}') is not recognized.")]
    UnknownCenturySeparator { input: String, separator: char },

    /// Digits are well formed but name a day that does not exist.
    #[error(
        "Invalid PIC: '{input}'. The birth date {day:02}.{month:02}.{year} does not exist: {reason}."
    )]
    InvalidDate {
        input: String,
        day: u8,
        month: u8,
        year: u16,
        reason: DateError,
    },

    #[error(
        "Invalid PIC: '{input}'. The control character ('{given}') is wrong: it should be '{expected}'."
    )]
    ChecksumMismatch {
        input: String,
        given: char,
        expected: char,
    },
}

impl PicError {
    /// The rejected input, verbatim.
    pub fn input(&self) -> &str {
        match self {
            Self::MalformedInput { input, .. }
            | Self::UnknownCenturySeparator { input, .. }
            | Self::InvalidDate { input, .. }
            | Self::ChecksumMismatch { input, .. } => input,
        }
    }

    /// Name of the check that rejected the input.
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => "lexical",
            Self::UnknownCenturySeparator { .. } | Self::InvalidDate { .. } => "date",
            Self::ChecksumMismatch { .. } => "checksum",
        }
    }
}

/// Parses codes against a particular century table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PicParser {
    centuries: CenturyTable,
}

static DEFAULT_PARSER: LazyLock<PicParser> = LazyLock::new(PicParser::default);

impl PicParser {
    pub const fn new(centuries: CenturyTable) -> Self {
        Self { centuries }
    }

    /// Returns the century table used to resolve separators
    pub const fn centuries(&self) -> &CenturyTable {
        &self.centuries
    }

    /// Validates `input` and decodes its fields.
    ///
    /// # Errors
    /// Returns the `PicError` of the first failing check: shape, century and
    /// date, then control character.
    pub fn parse(&self, input: &str) -> Result<Pic, PicError> {
        let result = self.decode(input);
        match &result {
            Ok(_) => trace!("accepted personal identity code"),
            Err(err) => debug!(stage = err.stage(), "rejected personal identity code"),
        }
        result
    }

    /// Returns `true` if `input` parses.
    pub fn is_valid(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }

    fn decode(&self, input: &str) -> Result<Pic, PicError> {
        let segments = lexical::scan(input).map_err(|reason| PicError::MalformedInput {
            input: input.to_owned(),
            reason,
        })?;

        let birth_date = self
            .centuries
            .resolve(&segments)
            .map_err(|unresolved| match unresolved {
                Unresolved::UnknownSeparator(separator) => PicError::UnknownCenturySeparator {
                    input: input.to_owned(),
                    separator,
                },
                Unresolved::InvalidDate {
                    day,
                    month,
                    year,
                    reason,
                } => PicError::InvalidDate {
                    input: input.to_owned(),
                    day,
                    month,
                    year,
                    reason,
                },
            })?;

        let checksum = checksum::verify(&segments).map_err(|mismatch| {
            PicError::ChecksumMismatch {
                input: input.to_owned(),
                given: mismatch.given,
                expected: mismatch.expected,
            }
        })?;

        let sequence = SequenceNumber::from_digits(segments.sequence);
        Ok(Pic {
            value: input.to_owned(),
            birth_date,
            separator: segments.separator,
            sequence,
            gender: sequence.gender(),
            checksum,
        })
    }
}

/// Parses `input` with the default century table (`+`, `-`, `A`).
///
/// # Errors
/// See [`PicParser::parse`].
pub fn parse(input: &str) -> Result<Pic, PicError> {
    DEFAULT_PARSER.parse(input)
}

/// Returns `true` if `input` is a valid code under the default century table.
pub fn is_valid(input: &str) -> bool {
    DEFAULT_PARSER.is_valid(input)
}

impl Pic {
    /// The code exactly as it was given.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub const fn birth_day(&self) -> u8 {
        self.birth_date.day()
    }

    pub const fn birth_month(&self) -> u8 {
        self.birth_date.month()
    }

    pub const fn birth_year(&self) -> u16 {
        self.birth_date.year()
    }

    pub const fn gender(&self) -> Gender {
        self.gender
    }

    pub const fn sequence_number(&self) -> SequenceNumber {
        self.sequence
    }

    /// Control character, uppercase even if it was given in lowercase
    pub const fn checksum_char(&self) -> char {
        self.checksum
    }

    pub const fn century_separator(&self) -> char {
        self.separator
    }
}

impl FromStr for Pic {
    type Err = PicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<&str> for Pic {
    type Error = PicError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse(value)
    }
}

impl TryFrom<String> for Pic {
    type Error = PicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse(&value)
    }
}

impl AsRef<str> for Pic {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl serde::Serialize for Pic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> serde::Deserialize<'de> for Pic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
