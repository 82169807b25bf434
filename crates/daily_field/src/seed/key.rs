//! Seed keys: a calendar day plus an optional purpose tag.
//!
//! The day is always taken in UTC and formatted from its numeric components as
//! `YYYY-MM-DD`, so the key rolls over at UTC midnight everywhere.
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seed::hash::string_hash;
use crate::seed::stream::SeededStream;

/// String key identifying a day bucket, optionally salted with purposes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedKey(String);

impl SeedKey {
    /// Key for today's date in UTC.
    pub fn today() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    /// Key for a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    /// Parse a `YYYY-MM-DD` date into a key.
    pub fn parse(date: &str) -> Result<Self> {
        let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            Error::InvalidArgument(format!("expected a YYYY-MM-DD date, got '{date}': {e}"))
        })?;
        Ok(Self::for_date(parsed))
    }

    /// Wrap an arbitrary string as a key.
    pub fn raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derive a salted key `"{self}-{purpose}"`.
    pub fn with_purpose(&self, purpose: impl fmt::Display) -> Self {
        Self(format!("{}-{}", self.0, purpose))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn seed_hash(&self) -> u32 {
        string_hash(&self.0)
    }

    /// Fresh stream seeded from this key.
    pub fn stream(&self) -> SeededStream {
        SeededStream::new(&self.0)
    }
}

impl fmt::Display for SeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SeedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for SeedKey {
    fn from(date: NaiveDate) -> Self {
        Self::for_date(date)
    }
}
