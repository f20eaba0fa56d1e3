use crate::{DateError, InvalidSequence};
use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_SEQUENCE, MAX_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::num::NonZeroU16;
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        let non_zero = NonZeroU16::new(value).ok_or(DateError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(DateError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(DateError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to exist in the year and month it was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and exists in the given year and month
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, DateError> {
        let invalid = DateError::InvalidDay {
            month: month.get(),
            day: value,
            year: year.get(),
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > days_in_month(year.get(), month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A real Gregorian calendar date.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct BirthDate {
    year: Year,
    month: Month,
    day: Day,
}

impl BirthDate {
    /// Creates a date from plain components, checking month length and leap years.
    ///
    /// # Errors
    /// Returns the `DateError` of the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    fn parse_u16(s: &str) -> Result<u16, DateError> {
        s.parse::<u16>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, DateError> {
        s.parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for BirthDate {
    type Err = DateError;

    /// Parses ISO 8601 `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(s.to_owned()));
        };
        Self::new(
            Self::parse_u16(year)?,
            Self::parse_u8(month)?,
            Self::parse_u8(day)?,
        )
    }
}

impl Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BirthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The `ZZZ` individual number, `000..=999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize)]
#[display(fmt = "{:03}", _0)]
#[serde(into = "u16")]
pub struct SequenceNumber(u16);

impl SequenceNumber {
    /// Creates a new sequence number, validating that it's <= `MAX_SEQUENCE`
    ///
    /// # Errors
    /// Returns `InvalidSequence` if the value is above `MAX_SEQUENCE`.
    pub const fn new(value: u16) -> Result<Self, InvalidSequence> {
        if value > MAX_SEQUENCE {
            return Err(InvalidSequence(value));
        }
        Ok(Self(value))
    }

    /// Builds the number from three decimal digit values.
    pub(crate) const fn from_digits(digits: [u8; 3]) -> Self {
        Self(digits[0] as u16 * 100 + digits[1] as u16 * 10 + digits[2] as u16)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    pub const fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }

    pub const fn gender(self) -> Gender {
        Gender::from_sequence(self)
    }
}

impl TryFrom<u16> for SequenceNumber {
    type Error = InvalidSequence;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Gender as encoded by the parity of the sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[display(fmt = "male")]
    Male,
    #[display(fmt = "female")]
    Female,
}

impl Gender {
    /// Odd numbers are male, even numbers (including 000) female.
    pub const fn from_sequence(sequence: SequenceNumber) -> Self {
        if sequence.is_odd() {
            Self::Male
        } else {
            Self::Female
        }
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub(crate) const fn days_in_month(year: u16, month: Month) -> u8 {
    let month = month.get();
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
