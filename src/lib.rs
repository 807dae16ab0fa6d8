//! # Dated Keys
//!
//! Reversible, human-entry license keys that hide an expiry date (day
//! precision) among random filler digits.
//!
//! A key is 43 characters: six seed digits, one day-count digit in the
//! clear, and six dash-separated segments. Each seed digit doubles as the
//! position of one hidden day-count digit inside the segment of the same
//! rank, so the date cannot be read off without knowing the layout. This is
//! lightweight obfuscation, not cryptography: anyone who knows the layout
//! can forge or alter a key.
//!
//! ## Quick Start
//!
//! ```rust
//! use dated_keys::{decode_expiry, encode_key, is_active_key, ExpiryDate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let expiry = ExpiryDate::new(2027, 6, 30)?;
//!
//! // A fixed seed gives a deterministic key; seed 0 uses OS entropy.
//! let key = encode_key(expiry, 42)?;
//! assert_eq!(key.as_str().len(), 43);
//!
//! assert_eq!(decode_expiry(key.as_str()), Some(expiry));
//! assert!(is_active_key(key.as_str(), ExpiryDate::new(2027, 6, 29)?));
//! assert!(!is_active_key(key.as_str(), expiry)); // expiry day itself is inactive
//! # Ok(())
//! # }
//! ```
//!
//! Decoding never fails with an error: malformed input simply yields `None`
//! (or `false` from the activity checks), so license call sites can treat
//! any bad key as inactive.

mod codec;
mod consts;
mod prelude;
mod types;

pub use codec::KeyError;
pub use consts::*;
pub use types::{DateError, DayCount, ExpiryDate};

use crate::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::str::FromStr;

/// Error type for the encode path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The date lies more than `MAX_DAY_COUNT` days past the epoch and does
    /// not fit in the key's seven day-count digits.
    #[error("Date {0} is beyond the key capacity of {MAX_DAY_COUNT} days from the epoch")]
    OutOfRange(ExpiryDate),
}

/// A 43-character key with an expiry date hidden inside.
///
/// Values are immutable once produced. Parsing via [`FromStr`] checks the
/// structural invariant only (length, separators, digits); recovering the
/// date is a separate, fallible step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{_0}")]
pub struct DatedKey(String);

impl DatedKey {
    /// Encodes `expiry` into a fresh key.
    ///
    /// `seed == 0` draws a non-deterministic seed from OS entropy; any
    /// other value produces the same key on every call. A new randomness
    /// source is created per call, so concurrent encodes need no locking.
    ///
    /// # Errors
    /// Returns `EncodeError::OutOfRange` if the date's day count needs more
    /// than seven decimal digits.
    pub fn encode(expiry: ExpiryDate, seed: u64) -> Result<Self, EncodeError> {
        let count = expiry.day_count().ok_or(EncodeError::OutOfRange(expiry))?;
        let mut rng = match seed {
            0 => ChaCha8Rng::from_entropy(),
            fixed => ChaCha8Rng::seed_from_u64(fixed),
        };
        Ok(Self(codec::build_key(count, &mut rng)))
    }

    /// Returns the key as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recovers the expiry date hidden in this key.
    ///
    /// Keys produced by [`DatedKey::encode`] always decode. A key parsed
    /// from an arbitrary string can still fail here — its seed digits may
    /// address a separator or a position past the end of the key — so the
    /// result is `None` rather than a guaranteed date.
    pub fn expiry_date(&self) -> Option<ExpiryDate> {
        codec::extract_day_count(&self.0).map(ExpiryDate::from_day_count)
    }

    /// True iff this key decodes and its expiry date is strictly after
    /// `now`. A key expiring today is already inactive.
    pub fn is_active(&self, now: ExpiryDate) -> bool {
        self.expiry_date().is_some_and(|expiry| expiry > now)
    }
}

impl FromStr for DatedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::validate_structure(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for DatedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for DatedKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for DatedKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Encodes `expiry` into a fresh key; see [`DatedKey::encode`].
///
/// # Errors
/// Returns `EncodeError::OutOfRange` if the date's day count needs more
/// than seven decimal digits.
pub fn encode_key(expiry: ExpiryDate, seed: u64) -> Result<DatedKey, EncodeError> {
    DatedKey::encode(expiry, seed)
}

/// Attempts to recover the expiry date hidden in `key`.
///
/// Accepts any string; anything that fails the structural invariant, or
/// whose seed digits address an unreadable position, yields `None`.
pub fn decode_expiry(key: &str) -> Option<ExpiryDate> {
    codec::validate_structure(key).ok()?;
    codec::extract_day_count(key).map(ExpiryDate::from_day_count)
}

/// True iff `key` decodes and its expiry date is strictly after `now`.
/// Malformed keys are simply inactive.
pub fn is_active_key(key: &str, now: ExpiryDate) -> bool {
    decode_expiry(key).is_some_and(|expiry| expiry > now)
}

/// [`is_active_key`] against today's UTC date from the system clock.
pub fn is_active_key_now(key: &str) -> bool {
    is_active_key(key, ExpiryDate::today_utc())
}
