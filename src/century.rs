use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BirthDate, DateError, MAX_YEAR, lexical::Segments};

/// Separators every code has used since the format was introduced.
const CLASSIC_CENTURIES: [(char, u16); 3] = [('+', 1800), ('-', 1900), ('A', 2000)];

/// Alternate separators issued since the 2023 reform.
const REFORM_CENTURIES: [(char, u16); 10] = [
    ('Y', 1900),
    ('X', 1900),
    ('W', 1900),
    ('V', 1900),
    ('U', 1900),
    ('B', 2000),
    ('C', 2000),
    ('D', 2000),
    ('E', 2000),
    ('F', 2000),
];

const CENTURY: u16 = 100;

/// Maps a century separator to the first year of its century.
///
/// `Default` holds `+`, `-` and `A`. Deserializes from a map such as
/// `{"+": 1800, "-": 1900, "A": 2000}`; every entry is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<char, u16>", into = "BTreeMap<char, u16>")]
pub struct CenturyTable {
    entries: BTreeMap<char, u16>,
}

/// Error type for century table configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CenturyError {
    /// The base year does not start a century.
    #[error("Century base {base} for separator '{separator}' is not a multiple of 100")]
    UnalignedBase { separator: char, base: u16 },

    /// Years of the century would run past `MAX_YEAR`.
    #[error("Century base {base} for separator '{separator}' runs past year {max}", max = MAX_YEAR)]
    BaseOutOfRange { separator: char, base: u16 },

    /// The character would be ambiguous in a code.
    #[error("'{separator}' cannot be used as a century separator")]
    ReservedSeparator { separator: char },
}

/// Why a well-shaped code has no birth date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Unresolved {
    UnknownSeparator(char),
    InvalidDate {
        day: u8,
        month: u8,
        year: u16,
        reason: DateError,
    },
}

impl Default for CenturyTable {
    fn default() -> Self {
        Self {
            entries: CLASSIC_CENTURIES.into_iter().collect(),
        }
    }
}

impl CenturyTable {
    /// A table with no separators at all.
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The default separators plus the alternates introduced in 2023.
    pub fn extended() -> Self {
        Self {
            entries: CLASSIC_CENTURIES
                .into_iter()
                .chain(REFORM_CENTURIES)
                .collect(),
        }
    }

    /// Adds or replaces a separator.
    ///
    /// # Errors
    /// Returns `CenturyError` if `base` is not a century start that fits below
    /// `MAX_YEAR`, or if `separator` is a digit, whitespace or control character.
    pub fn with_separator(mut self, separator: char, base: u16) -> Result<Self, CenturyError> {
        if separator.is_ascii_digit() || separator.is_whitespace() || separator.is_control() {
            return Err(CenturyError::ReservedSeparator { separator });
        }
        if base % CENTURY != 0 {
            return Err(CenturyError::UnalignedBase { separator, base });
        }
        if base.checked_add(CENTURY - 1).is_none_or(|last| last > MAX_YEAR) {
            return Err(CenturyError::BaseOutOfRange { separator, base });
        }
        self.entries.insert(separator, base);
        Ok(self)
    }

    /// First year of the century `separator` stands for, if it is known.
    pub fn century_base(&self, separator: char) -> Option<u16> {
        self.entries.get(&separator).copied()
    }

    /// All `(separator, base)` pairs in character order.
    pub fn separators(&self) -> impl Iterator<Item = (char, u16)> + '_ {
        self.entries.iter().map(|(&separator, &base)| (separator, base))
    }

    /// Reconstructs the birth date from `DDMMYY` and the separator.
    ///
    /// The separator is looked up before the date is checked.
    pub(crate) fn resolve(&self, segments: &Segments) -> Result<BirthDate, Unresolved> {
        let base = self
            .century_base(segments.separator)
            .ok_or(Unresolved::UnknownSeparator(segments.separator))?;

        let [d1, d2, m1, m2, y1, y2] = segments.date;
        let day = d1 * 10 + d2;
        let month = m1 * 10 + m2;
        let year = base + u16::from(y1 * 10 + y2);

        BirthDate::new(year, month, day).map_err(|reason| Unresolved::InvalidDate {
            day,
            month,
            year,
            reason,
        })
    }
}

impl TryFrom<BTreeMap<char, u16>> for CenturyTable {
    type Error = CenturyError;

    fn try_from(entries: BTreeMap<char, u16>) -> Result<Self, Self::Error> {
        entries
            .into_iter()
            .try_fold(Self::empty(), |table, (separator, base)| {
                table.with_separator(separator, base)
            })
    }
}

impl From<CenturyTable> for BTreeMap<char, u16> {
    fn from(table: CenturyTable) -> Self {
        table.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::scan;

    #[test]
    fn test_default_table() {
        let table = CenturyTable::default();
        assert_eq!(table.century_base('+'), Some(1800));
        assert_eq!(table.century_base('-'), Some(1900));
        assert_eq!(table.century_base('A'), Some(2000));
        assert_eq!(table.century_base('Y'), None);
        assert_eq!(table.century_base('a'), None);
        assert_eq!(table.separators().count(), 3);
    }

    #[test]
    fn test_extended_table() {
        let table = CenturyTable::extended();
        for separator in ['-', 'Y', 'X', 'W', 'V', 'U'] {
            assert_eq!(table.century_base(separator), Some(1900), "{separator}");
        }
        for separator in ['A', 'B', 'C', 'D', 'E', 'F'] {
            assert_eq!(table.century_base(separator), Some(2000), "{separator}");
        }
        assert_eq!(table.century_base('+'), Some(1800));
    }

    #[test]
    fn test_with_separator() {
        let table = CenturyTable::empty().with_separator('*', 2100).unwrap();
        assert_eq!(table.century_base('*'), Some(2100));

        let replaced = CenturyTable::default().with_separator('+', 1700).unwrap();
        assert_eq!(replaced.century_base('+'), Some(1700));
    }

    #[test]
    fn test_with_separator_rejects_bad_entries() {
        assert_eq!(
            CenturyTable::empty().with_separator('*', 1950),
            Err(CenturyError::UnalignedBase {
                separator: '*',
                base: 1950
            })
        );
        assert!(CenturyTable::empty().with_separator('*', 9900).is_ok());
        assert!(matches!(
            CenturyTable::empty().with_separator('*', 10000),
            Err(CenturyError::BaseOutOfRange { .. })
        ));
        assert_eq!(
            CenturyTable::empty().with_separator('7', 1900),
            Err(CenturyError::ReservedSeparator { separator: '7' })
        );
        assert!(CenturyTable::empty().with_separator(' ', 1900).is_err());
    }

    #[test]
    fn test_resolve() {
        let table = CenturyTable::default();
        let date = table.resolve(&scan("311299+999E").unwrap()).unwrap();
        assert_eq!(date, BirthDate::new(1899, 12, 31).unwrap());

        let date = table.resolve(&scan("070377-281V").unwrap()).unwrap();
        assert_eq!(date, BirthDate::new(1977, 3, 7).unwrap());

        let date = table.resolve(&scan("010100A000E").unwrap()).unwrap();
        assert_eq!(date, BirthDate::new(2000, 1, 1).unwrap());
    }

    #[test]
    fn test_resolve_unknown_separator() {
        let table = CenturyTable::default();
        assert_eq!(
            table.resolve(&scan("010101#0009").unwrap()),
            Err(Unresolved::UnknownSeparator('#'))
        );
        // Unknown separator wins over a bad date
        assert_eq!(
            table.resolve(&scan("999999#0009").unwrap()),
            Err(Unresolved::UnknownSeparator('#'))
        );
    }

    #[test]
    fn test_resolve_leap_day_depends_on_century() {
        let table = CenturyTable::default();
        assert!(table.resolve(&scan("290200A1239").unwrap()).is_ok());
        assert_eq!(
            table.resolve(&scan("290200-1239").unwrap()),
            Err(Unresolved::InvalidDate {
                day: 29,
                month: 2,
                year: 1900,
                reason: DateError::InvalidDay {
                    month: 2,
                    day: 29,
                    year: 1900
                }
            })
        );
    }

    #[test]
    fn test_resolve_invalid_dates() {
        let table = CenturyTable::default();
        assert!(matches!(
            table.resolve(&scan("300200-1234").unwrap()),
            Err(Unresolved::InvalidDate {
                day: 30,
                month: 2,
                ..
            })
        ));
        assert!(matches!(
            table.resolve(&scan("011377-2811").unwrap()),
            Err(Unresolved::InvalidDate {
                reason: DateError::InvalidMonth(13),
                ..
            })
        ));
        assert!(matches!(
            table.resolve(&scan("010077-281K").unwrap()),
            Err(Unresolved::InvalidDate {
                day: 1,
                month: 0,
                year: 1977,
                reason: DateError::InvalidMonth(0),
            })
        ));
        assert!(matches!(
            table.resolve(&scan("000177-2811").unwrap()),
            Err(Unresolved::InvalidDate { day: 0, .. })
        ));
        assert!(matches!(
            table.resolve(&scan("310477-2811").unwrap()),
            Err(Unresolved::InvalidDate { day: 31, month: 4, .. })
        ));
    }

    #[test]
    fn test_table_deserialize() {
        let table: CenturyTable =
            serde_json::from_str(r#"{"+": 1800, "-": 1900, "A": 2000}"#).unwrap();
        assert_eq!(table, CenturyTable::default());

        let result: Result<CenturyTable, _> = serde_json::from_str(r#"{"*": 1850}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_table_serialize() {
        let json = serde_json::to_string(&CenturyTable::default()).unwrap();
        assert_eq!(json, r#"{"+":1800,"-":1900,"A":2000}"#);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CenturyError::BaseOutOfRange {
                separator: '*',
                base: 9950
            }
            .to_string(),
            "Century base 9950 for separator '*' runs past year 9999"
        );
    }
}
