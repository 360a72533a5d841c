//! Core types for the generator.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for a transaction record.
///
/// Identifiers are globally unique across the whole history and strictly
/// increasing in generation order, starting at 0.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn next(self) -> Self {
        RecordId(self.0 + 1)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp (de)serialization in the on-disk `YYYY-MM-DD HH:MM:SS` form.
///
/// The format is second-granular, so a write/read cycle is lossless.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A single synthetic transaction.
///
/// Field order matches the on-disk CSV column order: `date,id,count`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Moment the transaction supposedly happened.
    #[serde(rename = "date", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    /// Globally unique, monotonically increasing identifier.
    pub id: RecordId,

    /// Transaction volume, always in `[1, max_count]`.
    pub count: u32,
}

impl TransactionRecord {
    /// Calendar date this record belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// The next identifier and next date to use when producing new records.
///
/// Always derived from [`History`], never persisted on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationCursor {
    pub next_id: RecordId,
    pub next_date: NaiveDate,
}

/// The union of all persisted day files, keyed by date.
///
/// The map keeps days sorted; each day holds its records in on-disk row
/// order.
#[derive(Clone, Debug, Default)]
pub struct History {
    days: BTreeMap<NaiveDate, Vec<TransactionRecord>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a full day of records, replacing any previous entry for the
    /// same date.
    pub fn insert_day(&mut self, date: NaiveDate, records: Vec<TransactionRecord>) {
        self.days.insert(date, records);
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of persisted days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total number of records across all days.
    pub fn record_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    /// Highest identifier present anywhere in the history.
    pub fn max_id(&self) -> Option<RecordId> {
        self.days
            .values()
            .flat_map(|records| records.iter())
            .map(|r| r.id)
            .max()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&[TransactionRecord]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    /// Iterate days in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[TransactionRecord])> + '_ {
        self.days.iter().map(|(date, records)| (*date, records.as_slice()))
    }

    /// Iterate days in date order with mutable access to the records.
    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (NaiveDate, &mut Vec<TransactionRecord>)> + '_ {
        self.days.iter_mut().map(|(date, records)| (*date, records))
    }

    /// Derive the generation cursor: highest id + 1 and latest date + 1 day.
    ///
    /// Returns `None` when the history is empty; the caller falls back to
    /// its configured start date and id 0.
    pub fn cursor(&self) -> Option<GenerationCursor> {
        let next_id = self.max_id().map(RecordId::next)?;
        let next_date = self.last_date()?.succ_opt()?;
        Some(GenerationCursor { next_id, next_date })
    }
}
