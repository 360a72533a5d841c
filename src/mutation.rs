//! Historic mutator.
//!
//! Models late-arriving corrections: every persisted record gets its own
//! Bernoulli trial whose success probability grows with the record's day
//! index, so recently closed days are rewritten more often than
//! long-settled ones. Rewrites are best-effort; a failed day is reported
//! and left behind, never rolled back or retried.

use crate::history::dayfile;
use crate::types::History;
use crate::weights::ChangeCurve;
use chrono::NaiveDate;
use rand::Rng;
use std::path::Path;
use tracing::{debug, warn};

/// One failed per-day rewrite.
#[derive(Clone, Debug)]
pub struct WriteFailure {
    pub date: NaiveDate,
    pub reason: String,
}

/// Summary of one historic mutation pass.
#[derive(Clone, Debug, Default)]
pub struct MutationReport {
    /// Records that took part in a Bernoulli trial.
    pub candidates: usize,

    /// Records whose count was redrawn.
    pub mutated: usize,

    /// Dates whose day files were rewritten on disk.
    pub rewritten_dates: Vec<NaiveDate>,

    /// Dates whose rewrite failed.
    pub failures: Vec<WriteFailure>,
}

impl MutationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run one mutation pass over the recovered history.
///
/// Mutates counts in place, then rewrites every affected day file in full,
/// preserving row order. Histories with fewer than two days have nothing
/// historic to correct and produce an empty report.
pub fn mutate_history(
    history: &mut History,
    dir: &Path,
    prefix: &str,
    max_count: u32,
    curve: ChangeCurve,
    rng: &mut impl Rng,
) -> MutationReport {
    let mut report = MutationReport::default();

    if history.day_count() < 2 {
        return report;
    }

    let (Some(first), Some(last)) = (history.first_date(), history.last_date()) else {
        return report;
    };
    let span = (last - first).num_days() as f64;

    let mut changed_dates = Vec::new();
    for (date, records) in history.iter_mut() {
        let day_index = (date - first).num_days() as f64;
        let weight = curve.weight(day_index, span);

        let mut day_changed = false;
        for record in records.iter_mut() {
            report.candidates += 1;
            if rng.gen::<f64>() < weight {
                record.count = rng.gen_range(1..=max_count);
                report.mutated += 1;
                day_changed = true;
            }
        }
        if day_changed {
            changed_dates.push(date);
        }
    }

    for date in changed_dates {
        let path = dayfile::day_file_path(dir, prefix, date);
        let Some(records) = history.day(date) else {
            continue;
        };
        match dayfile::write_day_file(&path, records) {
            Ok(()) => {
                debug!(%date, records = records.len(), "rewrote mutated day file");
                report.rewritten_dates.push(date);
            }
            Err(e) => {
                warn!(%date, error = %e, "failed to rewrite mutated day file");
                report.failures.push(WriteFailure {
                    date,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        candidates = report.candidates,
        mutated = report.mutated,
        rewritten = report.rewritten_dates.len(),
        failed = report.failures.len(),
        "historic mutation pass complete"
    );

    report
}
