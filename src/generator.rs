//! The generator tying recovery, mutation, and day synthesis together.

use crate::error::{GeneratorError, Result};
use crate::history::{self, dayfile};
use crate::mutation::{self, MutationReport};
use crate::types::{GenerationCursor, RecordId, TransactionRecord};
use crate::weights::{ChangeCurve, GaussianMixture};
use chrono::NaiveDate;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Generator configuration.
///
/// All knobs live here; the core functions take no global state, so tests
/// can run isolated generators against temporary directories.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Directory holding the day files.
    pub data_dir: PathBuf,

    /// Day file name prefix.
    pub file_prefix: String,

    /// Default number of records per generated day.
    pub records_per_day: usize,

    /// Inclusive upper bound for the `count` column.
    pub max_count: u32,

    /// Peak hours of the time-of-day distribution.
    pub hour_peaks: Vec<f64>,

    /// Shared standard deviation of the hour peaks.
    pub hour_sigma: f64,

    /// Historic-change weighting curve.
    pub change_curve: ChangeCurve,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            file_prefix: "data_".to_string(),
            records_per_day: 100,
            max_count: 100,
            hour_peaks: vec![9.0, 17.0],
            hour_sigma: 2.0,
            change_curve: ChangeCurve::default(),
        }
    }
}

/// What one run produced.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Path of the newly written day file.
    pub day_file: PathBuf,

    /// Date the new records were generated for.
    pub date: NaiveDate,

    /// Number of records in the new day file.
    pub records_written: usize,

    /// Present when a historic mutation pass ran.
    pub mutation: Option<MutationReport>,
}

/// Stateful sequence generator over an on-disk history directory.
///
/// The directory is treated as exclusively owned by one generator process
/// at a time; concurrent runs are undefined behavior and must be prevented
/// by the caller.
pub struct Generator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Generator {
    /// Create a generator with an entropy-seeded random source.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a generator with a fixed seed, for deterministic runs.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GeneratorConfig, rng: StdRng) -> Result<Self> {
        if config.max_count == 0 {
            return Err(GeneratorError::InvalidConfig(
                "max_count must be at least 1".into(),
            ));
        }
        if config.hour_peaks.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "hour_peaks must not be empty".into(),
            ));
        }
        if !(config.hour_sigma > 0.0) {
            return Err(GeneratorError::InvalidConfig(
                "hour_sigma must be positive".into(),
            ));
        }
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run with the configured defaults: `records_per_day` from the config,
    /// historic changes on.
    pub fn run(&mut self, start_date: NaiveDate) -> Result<RunOutcome> {
        let records_per_day = self.config.records_per_day;
        self.generate(start_date, records_per_day, true)
    }

    /// Produce the next simulated day.
    ///
    /// Recovers the cursor from the existing day files (`start_date` is
    /// only used when the directory holds none), optionally runs the
    /// historic mutation pass, then writes exactly one new day file and
    /// returns its path.
    pub fn generate(
        &mut self,
        start_date: NaiveDate,
        records_per_day: usize,
        simulate_historic_changes: bool,
    ) -> Result<RunOutcome> {
        fs::create_dir_all(&self.config.data_dir)?;

        let mut state = history::recover(&self.config.data_dir, &self.config.file_prefix)?;

        let mutation = if simulate_historic_changes && !state.history.is_empty() {
            Some(mutation::mutate_history(
                &mut state.history,
                &self.config.data_dir,
                &self.config.file_prefix,
                self.config.max_count,
                self.config.change_curve,
                &mut self.rng,
            ))
        } else {
            None
        };

        let cursor = state.cursor.unwrap_or(GenerationCursor {
            next_id: RecordId(0),
            next_date: start_date,
        });
        debug!(next_id = %cursor.next_id, date = %cursor.next_date, "generating new day");

        let records = self.synthesize_day(cursor, records_per_day);
        let path = dayfile::day_file_path(
            &self.config.data_dir,
            &self.config.file_prefix,
            cursor.next_date,
        );
        dayfile::write_day_file(&path, &records)?;

        info!(
            date = %cursor.next_date,
            records = records.len(),
            file = %path.display(),
            "generated day file"
        );

        Ok(RunOutcome {
            day_file: path,
            date: cursor.next_date,
            records_written: records.len(),
            mutation,
        })
    }

    /// Write the full history as one consolidated CSV, ordered by date and
    /// row order, and return its path.
    pub fn write_consolidated(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let state = history::recover(&self.config.data_dir, &self.config.file_prefix)?;

        let path = path.as_ref().to_path_buf();
        let mut writer = csv::Writer::from_path(&path)?;
        for (_, records) in state.history.iter() {
            for record in records {
                writer.serialize(record)?;
            }
        }
        writer.flush()?;

        info!(records = state.history.record_count(), file = %path.display(), "wrote consolidated file");
        Ok(path)
    }

    /// Synthesize the records for one day, ids assigned in generation
    /// order starting at the cursor.
    fn synthesize_day(
        &mut self,
        cursor: GenerationCursor,
        records_per_day: usize,
    ) -> Vec<TransactionRecord> {
        let mixture = GaussianMixture::new(self.config.hour_peaks.clone(), self.config.hour_sigma);
        let hours = WeightedIndex::new(mixture.hour_weights())
            .expect("mixture weights are positive for a valid config");

        (0..records_per_day)
            .map(|i| {
                let hour = hours.sample(&mut self.rng) as u32;
                let minute = self.rng.gen_range(0..60);
                let second = self.rng.gen_range(0..60);
                TransactionRecord {
                    timestamp: cursor
                        .next_date
                        .and_hms_opt(hour, minute, second)
                        .expect("sampled time of day is valid"),
                    id: RecordId(cursor.next_id.0 + i as u64),
                    count: self.rng.gen_range(1..=self.config.max_count),
                }
            })
            .collect()
    }
}
