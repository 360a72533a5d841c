//! Per-day CSV files.
//!
//! A day file holds every record for exactly one calendar date, named
//! `<prefix><YYYY-MM-DD>.csv` with a `date,id,count` header row. Writes
//! always replace the whole file.

use crate::error::{GeneratorError, Result};
use crate::types::TransactionRecord;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// File name for the day file holding `date`.
pub fn day_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}{}.csv", date.format(DATE_FORMAT))
}

/// Full path of the day file for `date` under `dir`.
pub fn day_file_path(dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    dir.join(day_file_name(prefix, date))
}

/// Extract the date encoded in a day file name.
///
/// Returns `Ok(None)` for files that do not belong to the dataset (wrong
/// prefix or extension). A file that matches the naming scheme but carries
/// an unparseable date is corrupt, not foreign.
pub fn day_file_date(path: &Path, prefix: &str) -> Result<Option<NaiveDate>> {
    let (Some(stem), Some(ext)) = (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) else {
        return Ok(None);
    };

    if ext != "csv" {
        return Ok(None);
    }
    let Some(date_part) = stem.strip_prefix(prefix) else {
        return Ok(None);
    };

    match NaiveDate::parse_from_str(date_part, DATE_FORMAT) {
        Ok(date) => Ok(Some(date)),
        Err(e) => Err(GeneratorError::CorruptHistory {
            file: path.to_path_buf(),
            reason: format!("invalid date in file name: {e}"),
        }),
    }
}

/// Read all records from a day file.
///
/// Any parse failure (bad CSV, bad `id` or `date` column) is reported as
/// [`GeneratorError::CorruptHistory`] naming the offending file.
pub fn read_day_file(path: &Path) -> Result<Vec<TransactionRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| GeneratorError::CorruptHistory {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: TransactionRecord = row.map_err(|e| GeneratorError::CorruptHistory {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Write a full day of records, replacing the file if it exists.
pub fn write_day_file(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;
    use std::fs;
    use tempfile::TempDir;

    fn sample_records(date: NaiveDate) -> Vec<TransactionRecord> {
        vec![
            TransactionRecord {
                timestamp: date.and_hms_opt(9, 15, 30).unwrap(),
                id: RecordId(0),
                count: 42,
            },
            TransactionRecord {
                timestamp: date.and_hms_opt(17, 3, 1).unwrap(),
                id: RecordId(1),
                count: 7,
            },
        ]
    }

    #[test]
    fn test_file_name_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let path = day_file_path(Path::new("/tmp/data"), "data_", date);

        assert!(path.ends_with("data_2024-01-31.csv"));
        assert_eq!(day_file_date(&path, "data_").unwrap(), Some(date));
    }

    #[test]
    fn test_foreign_files_are_skipped() {
        assert_eq!(
            day_file_date(Path::new("notes.txt"), "data_").unwrap(),
            None
        );
        assert_eq!(
            day_file_date(Path::new("other_2024-01-01.csv"), "data_").unwrap(),
            None
        );
    }

    #[test]
    fn test_bad_date_in_name_is_corrupt() {
        let result = day_file_date(Path::new("data_yesterday.csv"), "data_");
        assert!(matches!(
            result,
            Err(GeneratorError::CorruptHistory { .. })
        ));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let path = day_file_path(dir.path(), "data_", date);

        let records = sample_records(date);
        write_day_file(&path, &records).unwrap();

        let read_back = read_day_file(&path).unwrap();
        assert_eq!(read_back, records);

        let raw = fs::read_to_string(&path).unwrap();
        let mut lines = raw.lines();
        assert_eq!(lines.next(), Some("date,id,count"));
        assert_eq!(lines.next(), Some("2024-01-01 09:15:30,0,42"));
    }

    #[test]
    fn test_malformed_row_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data_2024-01-01.csv");
        fs::write(&path, "date,id,count\n2024-01-01 09:00:00,not-a-number,5\n").unwrap();

        let result = read_day_file(&path);
        assert!(matches!(
            result,
            Err(GeneratorError::CorruptHistory { .. })
        ));
    }
}
