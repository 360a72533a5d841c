//! # daygen
//!
//! Synthetic daily transaction datasets for exercising an ETL pipeline.
//!
//! Each run continues the simulated history found on disk: it recovers the
//! generation cursor from the existing per-day CSV files, optionally
//! rewrites a recency-biased sample of historic records to emulate
//! late-arriving corrections, and writes one new day of records with
//! monotonically increasing identifiers.
//!
//! ## Core Concepts
//!
//! - **Day files**: one CSV per calendar date (`date,id,count`)
//! - **Generation cursor**: next id and next date, derived from the files
//! - **Historic mutation**: per-record Bernoulli trials weighted by recency
//! - **Weighting strategies**: Gaussian mixture for time of day, sigmoid or
//!   logarithmic curve for historic-change likelihood
//!
//! The data directory must be owned by a single generator process per run;
//! the crate performs no locking. Keep that exclusivity in the deployment.
//!
//! ## Example
//!
//! ```ignore
//! use daygen::{Generator, GeneratorConfig};
//! use chrono::NaiveDate;
//!
//! let mut generator = Generator::new(GeneratorConfig {
//!     data_dir: "./data".into(),
//!     ..Default::default()
//! })?;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let outcome = generator.generate(start, 100, true)?;
//! println!("new day file: {}", outcome.day_file.display());
//! ```

pub mod error;
pub mod generator;
pub mod history;
pub mod mutation;
pub mod types;
pub mod weights;

// Re-exports
pub use error::{GeneratorError, Result};
pub use generator::{Generator, GeneratorConfig, RunOutcome};
pub use history::{recover, RecoveredState};
pub use mutation::{MutationReport, WriteFailure};
pub use types::{GenerationCursor, History, RecordId, TransactionRecord};
pub use weights::{ChangeCurve, GaussianMixture};
