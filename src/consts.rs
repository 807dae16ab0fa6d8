/// Total length of a key in characters
pub const KEY_LEN: usize = 43;

/// Number of leading seed digits (offsets 0..=5)
pub const SEED_DIGITS: usize = 6;

/// Offset of the first day-count digit, stored in the clear
pub const FIRST_DAY_DIGIT_OFFSET: usize = 6;

/// Number of decimal digits in an encoded day count
pub const DAY_DIGITS: usize = 7;

/// Largest encodable day count (7 decimal digits)
pub const MAX_DAY_COUNT: u32 = 9_999_999;

/// Number of dash-delimited segments following the leading digits
pub const SEGMENT_COUNT: usize = 6;

/// Key offsets that must hold a literal dash
pub const DASH_OFFSETS: [usize; SEGMENT_COUNT] = [7, 13, 19, 25, 32, 39];

/// Key offset where each segment begins
pub const SEGMENT_STARTS: [usize; SEGMENT_COUNT] = [8, 14, 20, 26, 33, 40];

/// Length of each segment in digits
pub const SEGMENT_LENGTHS: [usize; SEGMENT_COUNT] = [5, 5, 5, 6, 6, 3];

/// Segment separator
pub const DASH: char = '-';

/// Smallest value a seed digit may take (placement index is never 0)
pub const SEED_DIGIT_MIN: u8 = 1;

/// Largest value each seed digit may take, in order. Every bound is below
/// the corresponding segment length, so a seed digit is always a valid
/// placement index inside its segment.
pub const SEED_DIGIT_MAX: [u8; SEGMENT_COUNT] = [4, 4, 4, 5, 5, 2];

/// Largest filler digit (filler is drawn from 0..=8, never 9)
pub const FILLER_DIGIT_MAX: u8 = 8;

/// Day count of 1970-01-01 relative to the epoch 0001-01-01
pub const UNIX_EPOCH_DAY_COUNT: u32 = 719_162;

/// Maximum valid year (inclusive): the year containing day `MAX_DAY_COUNT`
pub const MAX_YEAR: u16 = 27_380;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

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

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
