//! State recovery from the on-disk history.
//!
//! Recovery always parses every day file in full. The historic mutator
//! needs the whole table each run anyway, so a tail-read shortcut for the
//! maximum id would save nothing.

use crate::error::{GeneratorError, Result};
use crate::history::dayfile;
use crate::types::{GenerationCursor, History, TransactionRecord};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Everything recovery learns from the data directory.
#[derive(Clone, Debug)]
pub struct RecoveredState {
    /// All persisted records, grouped by date.
    pub history: History,

    /// Derived continuation point; `None` on the very first run.
    pub cursor: Option<GenerationCursor>,
}

/// Load every day file under `dir` and derive the generation cursor.
///
/// Corrupt files fail the whole recovery; they are never skipped.
pub fn recover(dir: &Path, prefix: &str) -> Result<RecoveredState> {
    let mut history = History::new();

    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(date) = dayfile::day_file_date(&path, prefix)? else {
                continue;
            };

            let records = dayfile::read_day_file(&path)?;
            validate_day(&path, date, &records)?;
            history.insert_day(date, records);
        }
    }

    if history.is_empty() {
        warn!(dir = %dir.display(), "no historic day files found, treating this as the first run");
    } else {
        debug!(
            days = history.day_count(),
            records = history.record_count(),
            "recovered history"
        );
    }

    let cursor = history.cursor();
    Ok(RecoveredState { history, cursor })
}

/// Every record in a day file must carry a timestamp on the file's date.
fn validate_day(path: &Path, date: NaiveDate, records: &[TransactionRecord]) -> Result<()> {
    for record in records {
        if record.date() != date {
            return Err(GeneratorError::CorruptHistory {
                file: path.to_path_buf(),
                reason: format!(
                    "record {} has timestamp {} outside day {date}",
                    record.id, record.timestamp
                ),
            });
        }
    }
    Ok(())
}
