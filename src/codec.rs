use rand::Rng;

use crate::consts::{
    DASH, DASH_OFFSETS, FILLER_DIGIT_MAX, FIRST_DAY_DIGIT_OFFSET, KEY_LEN, SEED_DIGIT_MAX,
    SEED_DIGIT_MIN, SEED_DIGITS, SEGMENT_LENGTHS, SEGMENT_STARTS,
};
use crate::types::DayCount;

/// Error type describing why a string fails the key's structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Key is not exactly `KEY_LEN` bytes.
    #[error("Invalid key length: {0} (expected {KEY_LEN})")]
    WrongLength(usize),

    /// One of the six fixed separator offsets does not hold a dash.
    #[error("Expected '-' at offset {0}")]
    MissingSeparator(usize),

    /// A non-separator offset holds something other than an ASCII digit.
    #[error("Expected a digit at offset {0}")]
    NotADigit(usize),
}

/// Checks the structural invariant: exactly 43 bytes, dashes at the six
/// fixed offsets, ASCII digits everywhere else.
pub(crate) fn validate_structure(key: &str) -> Result<(), KeyError> {
    let bytes = key.as_bytes();
    if bytes.len() != KEY_LEN {
        return Err(KeyError::WrongLength(bytes.len()));
    }
    for (offset, &byte) in bytes.iter().enumerate() {
        if DASH_OFFSETS.contains(&offset) {
            if byte != DASH as u8 {
                return Err(KeyError::MissingSeparator(offset));
            }
        } else if !byte.is_ascii_digit() {
            return Err(KeyError::NotADigit(offset));
        }
    }
    Ok(())
}

/// Builds a key hiding `count`, drawing seed and filler digits from `rng`.
///
/// Each seed digit doubles as the placement index of one day digit inside
/// the segment of the same rank; the seed-digit bounds keep every index
/// strictly inside its segment. Filler digits are drawn in segment order,
/// skipping the placement index.
pub(crate) fn build_key<R: Rng>(count: DayCount, rng: &mut R) -> String {
    let day_digits = format!("{:07}", count.get());
    let day = day_digits.as_bytes();

    let mut seeds = [0u8; SEED_DIGITS];
    for (seed, &max) in seeds.iter_mut().zip(SEED_DIGIT_MAX.iter()) {
        *seed = rng.gen_range(SEED_DIGIT_MIN..=max);
    }

    let mut key = String::with_capacity(KEY_LEN);
    for &seed in &seeds {
        key.push(digit_char(seed));
    }
    key.push(day[0] as char);

    for ((&seed, &length), &day_digit) in
        seeds.iter().zip(SEGMENT_LENGTHS.iter()).zip(&day[1..])
    {
        key.push(DASH);
        let index = seed as usize;
        debug_assert!(index < length);
        for position in 0..length {
            if position == index {
                key.push(day_digit as char);
            } else {
                key.push(digit_char(rng.gen_range(0..=FILLER_DIGIT_MAX)));
            }
        }
    }

    debug_assert_eq!(key.len(), KEY_LEN);
    key
}

/// Recovers the hidden day count from a structurally valid key.
///
/// Returns `None` when a seed digit addresses a separator or a position
/// past the end of the string; keys produced by `build_key` always extract.
pub(crate) fn extract_day_count(key: &str) -> Option<DayCount> {
    let bytes = key.as_bytes();
    let mut value = u32::from(digit_value(*bytes.get(FIRST_DAY_DIGIT_OFFSET)?)?);
    for (segment, &start) in SEGMENT_STARTS.iter().enumerate() {
        let seed = digit_value(*bytes.get(segment)?)?;
        let digit = digit_value(*bytes.get(start + seed as usize)?)?;
        value = value * 10 + u32::from(digit);
    }
    DayCount::new(value).ok()
}

const fn digit_char(value: u8) -> char {
    debug_assert!(value <= 9);
    (b'0' + value) as char
}

const fn digit_value(byte: u8) -> Option<u8> {
    if byte.is_ascii_digit() {
        Some(byte - b'0')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // Hand-built key: seed digits 1,2,3,4,5,2 place the day digits of
    // 0012345 among '9' filler (which `build_key` never emits, so the
    // hidden digits are unambiguous when reading the vector).
    const GOLDEN_KEY: &str = "1234520-90999-99199-99929-999939-999994-995";

    #[test]
    fn test_golden_vector_extracts() {
        assert!(validate_structure(GOLDEN_KEY).is_ok());
        let count = extract_day_count(GOLDEN_KEY).unwrap();
        assert_eq!(count.get(), 12_345);
    }

    #[test]
    fn test_validate_structure_accepts_well_formed() {
        assert!(validate_structure(GOLDEN_KEY).is_ok());
    }

    #[test]
    fn test_validate_structure_wrong_length() {
        assert_eq!(validate_structure(""), Err(KeyError::WrongLength(0)));
        assert_eq!(
            validate_structure("not-a-key"),
            Err(KeyError::WrongLength(9))
        );
        let too_long = format!("{GOLDEN_KEY}0");
        assert_eq!(validate_structure(&too_long), Err(KeyError::WrongLength(44)));
    }

    #[test]
    fn test_validate_structure_separator_mismatch() {
        // Replace the dash at offset 13 with a digit.
        let mut bad = GOLDEN_KEY.to_owned().into_bytes();
        bad[13] = b'0';
        let bad = String::from_utf8(bad).unwrap();
        assert_eq!(validate_structure(&bad), Err(KeyError::MissingSeparator(13)));
    }

    #[test]
    fn test_validate_structure_non_digit() {
        let mut bad = GOLDEN_KEY.to_owned().into_bytes();
        bad[9] = b'x';
        let bad = String::from_utf8(bad).unwrap();
        assert_eq!(validate_structure(&bad), Err(KeyError::NotADigit(9)));

        // A dash in a digit slot is also a structure error.
        let mut bad = GOLDEN_KEY.to_owned().into_bytes();
        bad[0] = b'-';
        let bad = String::from_utf8(bad).unwrap();
        assert_eq!(validate_structure(&bad), Err(KeyError::NotADigit(0)));
    }

    #[test]
    fn test_extract_seed_addressing_separator() {
        // Seed digit 5 for the first segment points at offset 13, a dash.
        let key = "5234520-90999-99199-99929-999939-999994-995";
        assert!(validate_structure(key).is_ok());
        assert_eq!(extract_day_count(key), None);
    }

    #[test]
    fn test_extract_seed_addressing_past_end() {
        // Seed digit 9 for the last segment points at offset 49, past the
        // end of the key.
        let key = "1234590-90999-99199-99929-999939-999994-995";
        assert!(validate_structure(key).is_ok());
        assert_eq!(extract_day_count(key), None);
    }

    #[test]
    fn test_build_key_structure_and_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for raw in [0u32, 1, 12_345, 719_162, 9_999_999] {
            let count = DayCount::new(raw).unwrap();
            let key = build_key(count, &mut rng);
            assert!(validate_structure(&key).is_ok(), "{key}");
            assert_eq!(extract_day_count(&key), Some(count), "{key}");
        }
    }

    #[test]
    fn test_build_key_seed_digits_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..64 {
            let key = build_key(DayCount::new(42).unwrap(), &mut rng);
            let bytes = key.as_bytes();
            for (segment, (&max, &length)) in
                SEED_DIGIT_MAX.iter().zip(SEGMENT_LENGTHS.iter()).enumerate()
            {
                let seed = bytes[segment] - b'0';
                assert!((SEED_DIGIT_MIN..=max).contains(&seed), "{key}");
                assert!((seed as usize) < length, "{key}");
            }
        }
    }

    #[test]
    fn test_build_key_filler_never_nine() {
        // Filler is drawn from 0..=8; any '9' in a key must be a day digit.
        // Day count 0 has no '9' digits, so these keys contain none at all.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..64 {
            let key = build_key(DayCount::new(0).unwrap(), &mut rng);
            assert!(!key.contains('9'), "{key}");
        }
    }
}
