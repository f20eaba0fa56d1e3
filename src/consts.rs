/// Number of characters in a personal identity code
pub const PIC_LENGTH: usize = 11;

/// Positions of the `DDMMYY` birth date digits
pub const DATE_POSITIONS: std::ops::Range<usize> = 0..6;
/// Position of the century separator
pub const SEPARATOR_POSITION: usize = 6;
/// Positions of the `ZZZ` individual sequence digits
pub const SEQUENCE_POSITIONS: std::ops::Range<usize> = 7..10;
/// Position of the control character
pub const CONTROL_POSITION: usize = 10;

/// Control characters, indexed by `numeral % CHECKSUM_MODULUS`.
/// G, I, O, Q and Z are left out.
pub const CHECKSUM_ALPHABET: &str = "0123456789ABCDEFHJKLMNPRSTUVWXY";
/// Modulus of the control character computation
pub const CHECKSUM_MODULUS: u32 = 31;

/// Largest individual sequence number
pub const MAX_SEQUENCE: u16 = 999;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator between birth date components in ISO 8601 output
pub const DATE_SEPARATOR: char = '-';
