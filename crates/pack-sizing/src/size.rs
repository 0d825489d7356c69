use std::{fmt, num::NonZeroU64};

use crate::Error;

/// The number of items shipped together in one pack. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PackSize(NonZeroU64);

impl PackSize {
    /// Returns `None` for zero.
    pub const fn new(items: u64) -> Option<Self> {
        match NonZeroU64::new(items) {
            Some(items) => Some(Self(items)),
            None => None,
        }
    }

    /// Number of items in one pack.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for PackSize {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        // only zero is rejected, so the cast below never truncates
        Self::new(value).ok_or(Error::InvalidPackSize(value as i64))
    }
}

impl TryFrom<i64> for PackSize {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(Error::InvalidPackSize(value))
    }
}

impl From<PackSize> for u64 {
    fn from(value: PackSize) -> Self {
        value.get()
    }
}

impl fmt::Display for PackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
