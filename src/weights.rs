//! Weighting strategies.
//!
//! All sampling in the generator goes through pure `x -> weight` functions
//! collected here: a Gaussian mixture shapes the time-of-day distribution,
//! and a change curve maps a historic day's index to its per-record
//! mutation probability.

/// Days subtracted from the history span to place the sigmoid midpoint,
/// once the history is long enough.
pub const SIGMOID_MIDPOINT_BACKOFF_DAYS: f64 = 30.0;

/// Minimum history span before the midpoint backoff applies; shorter
/// histories put the midpoint at half the span.
pub const SIGMOID_MIDPOINT_MIN_SPAN_DAYS: f64 = 60.0;

/// Sum of Gaussian kernels over configurable peaks with a shared sigma.
///
/// Used as an unnormalized discrete distribution over hours of the day;
/// the weight is strictly positive everywhere, so every hour remains
/// possible.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianMixture {
    pub peaks: Vec<f64>,
    pub sigma: f64,
}

impl GaussianMixture {
    pub fn new(peaks: Vec<f64>, sigma: f64) -> Self {
        Self { peaks, sigma }
    }

    /// Mixture weight at point `x`.
    pub fn weight(&self, x: f64) -> f64 {
        self.peaks
            .iter()
            .map(|peak| (-((x - peak).powi(2)) / (2.0 * self.sigma * self.sigma)).exp())
            .sum()
    }

    /// Weights for the 24 discrete hours of a day.
    pub fn hour_weights(&self) -> [f64; 24] {
        let mut weights = [0.0; 24];
        for (hour, w) in weights.iter_mut().enumerate() {
            *w = self.weight(hour as f64);
        }
        weights
    }
}

/// Curve mapping a historic day's index to its mutation probability.
///
/// The day index counts whole days since the earliest recorded date, so a
/// larger index means a more recent day. Both curves are monotonically
/// increasing in the index and bounded by 1: recently closed days receive
/// corrections more often than long-settled ones, and the probability never
/// grows past certainty no matter how long the history gets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChangeCurve {
    /// Logistic curve with the midpoint derived from the history span.
    Sigmoid { steepness: f64 },

    /// `ln(1 + index) / ln(1 + span)`, normalized by the full span.
    Logarithmic,
}

impl ChangeCurve {
    /// Mutation probability for the day at `day_index`, given the total
    /// history span in days.
    pub fn weight(&self, day_index: f64, span_days: f64) -> f64 {
        match *self {
            ChangeCurve::Sigmoid { steepness } => {
                let midpoint = if span_days < SIGMOID_MIDPOINT_MIN_SPAN_DAYS {
                    span_days / 2.0
                } else {
                    span_days - SIGMOID_MIDPOINT_BACKOFF_DAYS
                };
                1.0 / (1.0 + (-steepness * (day_index - midpoint)).exp())
            }
            ChangeCurve::Logarithmic => {
                (1.0 + day_index).ln() / (1.0 + span_days.max(1.0)).ln()
            }
        }
    }
}

impl Default for ChangeCurve {
    fn default() -> Self {
        ChangeCurve::Sigmoid { steepness: 0.2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_peaks_dominate() {
        let mixture = GaussianMixture::new(vec![9.0, 17.0], 2.0);
        let weights = mixture.hour_weights();

        // The peak hours outweigh the small hours.
        assert!(weights[9] > weights[3]);
        assert!(weights[17] > weights[3]);
        assert!(weights[9] > weights[13]);

        // Every hour stays reachable.
        assert!(weights.iter().all(|w| *w > 0.0));
    }

    #[test]
    fn test_sigmoid_monotonically_increasing() {
        let curve = ChangeCurve::default();
        let span = 90.0;

        let mut prev = 0.0;
        for day in 0..=90 {
            let w = curve.weight(day as f64, span);
            assert!(w > 0.0 && w < 1.0, "weight {w} out of bounds at day {day}");
            assert!(w >= prev, "sigmoid not monotonic at day {day}");
            prev = w;
        }
    }

    #[test]
    fn test_sigmoid_midpoint_policy() {
        let curve = ChangeCurve::Sigmoid { steepness: 0.2 };

        // Short history: midpoint at half the span.
        let w = curve.weight(20.0, 40.0);
        assert!((w - 0.5).abs() < 1e-9);

        // Long history: midpoint backed off from the end of the span.
        let w = curve.weight(90.0 - 30.0, 90.0);
        assert!((w - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_logarithmic_bounded_and_increasing() {
        let curve = ChangeCurve::Logarithmic;
        let span = 120.0;

        let mut prev = -1.0;
        for day in 0..=120 {
            let w = curve.weight(day as f64, span);
            assert!((0.0..=1.0).contains(&w), "weight {w} out of bounds at day {day}");
            assert!(w > prev, "log curve not increasing at day {day}");
            prev = w;
        }

        // Newest day reaches the bound exactly, oldest stays at zero.
        assert!((curve.weight(span, span) - 1.0).abs() < 1e-9);
        assert_eq!(curve.weight(0.0, span), 0.0);
    }
}
