//! Weight normalization with exact-sum rounding correction.
//!
//! Raw importance weights are scaled to shares of their total and rounded to
//! a fixed number of decimal places. Naive per-share rounding rarely sums to
//! exactly 1.0, and the negotiation environment rejects weights that don't,
//! so a correction step pushes the rounding residual back into the shares.
//!
//! Two corrections are available:
//! - [`Correction::FirstEntry`] adds the whole residual to the first share.
//!   An overshoot larger than that share is taken from the following shares
//!   in order. Order-dependent, but byte-compatible with profiles produced
//!   by earlier tooling.
//! - [`Correction::LargestRemainder`] floors every share and hands out the
//!   missing units to the shares with the largest remainders.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, StancemapError, telemetry};

/// Default number of decimal places for normalized weights.
pub const DEFAULT_PRECISION: u32 = 3;

/// Highest supported precision; keeps scaled shares exact in `u64` and `f64`.
pub const MAX_PRECISION: u32 = 9;

/// How the rounding residual is redistributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Correction {
    /// Add the residual to the first share (in statement order).
    #[default]
    FirstEntry,
    /// Distribute missing units by largest remainder.
    LargestRemainder,
}

impl Correction {
    fn as_str(self) -> &'static str {
        match self {
            Self::FirstEntry => "first-entry",
            Self::LargestRemainder => "largest-remainder",
        }
    }
}

/// Converts raw weights into a distribution summing to exactly 1.0.
#[derive(Debug, Clone, Copy)]
pub struct WeightNormalizer {
    precision: u32,
    correction: Correction,
}

impl Default for WeightNormalizer {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            correction: Correction::default(),
        }
    }
}

impl WeightNormalizer {
    /// Create a normalizer rounding to `precision` decimal places.
    ///
    /// `precision` is clamped to `1..=MAX_PRECISION`.
    pub fn new(precision: u32, correction: Correction) -> Self {
        Self {
            precision: precision.clamp(1, MAX_PRECISION),
            correction,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn correction(&self) -> Correction {
        self.correction
    }

    /// Normalize `weights` into shares summing to exactly 1.0 at the
    /// configured precision. Shares are returned in input order.
    ///
    /// # Errors
    ///
    /// - [`StancemapError::DegenerateWeights`] if `weights` is empty, holds a
    ///   negative or non-finite value, or sums to zero.
    /// - [`StancemapError::InvariantViolation`] if the corrected shares do not
    ///   sum to 1.0 at one extra decimal place.
    pub fn normalize(&self, weights: &[f64]) -> Result<Vec<f64>> {
        if weights.is_empty() {
            return Err(StancemapError::DegenerateWeights("no weights".to_owned()));
        }
        if let Some(i) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
            return Err(StancemapError::DegenerateWeights(format!(
                "weight #{i} is {}",
                weights[i]
            )));
        }
        let total: f64 = weights.iter().sum();
        if total == 0.0 {
            return Err(StancemapError::DegenerateWeights(
                "all weights are zero".to_owned(),
            ));
        }
        if !total.is_finite() {
            return Err(StancemapError::DegenerateWeights(
                "weight total overflows".to_owned(),
            ));
        }

        let shares = match self.correction {
            Correction::FirstEntry => self.first_entry(weights, total),
            Correction::LargestRemainder => self.largest_remainder(weights, total),
        };

        let sum: f64 = shares.iter().sum();
        if round_to(sum, self.precision + 1) != 1.0 {
            return Err(StancemapError::InvariantViolation(format!(
                "normalized weights sum to {sum} after {} correction",
                self.correction.as_str()
            )));
        }
        Ok(shares)
    }

    fn first_entry(&self, weights: &[f64], total: f64) -> Vec<f64> {
        let p = self.precision;
        let factor = 10f64.powi(p as i32);
        let mut shares: Vec<f64> = weights.iter().map(|w| round_to(w / total, p)).collect();
        let residual = round_to(1.0 - shares.iter().sum::<f64>(), p);
        if residual == 0.0 {
            return shares;
        }

        if residual > 0.0 {
            shares[0] = round_to(shares[0] + residual, p);
        } else {
            // Shares can't go below zero: an overshoot the first share can't
            // absorb spills into the shares after it.
            let mut owed = (-residual * factor).round() as i64;
            for share in shares.iter_mut() {
                if owed == 0 {
                    break;
                }
                let take = ((*share * factor).round() as i64).min(owed);
                *share = round_to(*share - take as f64 / factor, p);
                owed -= take;
            }
        }
        record_correction(self.correction);
        debug!(residual, "corrected weight rounding residual");
        shares
    }

    fn largest_remainder(&self, weights: &[f64], total: f64) -> Vec<f64> {
        let scale = 10f64.powi(self.precision as i32);
        let exact: Vec<f64> = weights.iter().map(|w| w / total * scale).collect();
        let mut units: Vec<u64> = exact.iter().map(|x| x.floor() as u64).collect();

        let assigned: u64 = units.iter().sum();
        let deficit = (scale as u64).saturating_sub(assigned) as usize;
        if deficit > 0 {
            let mut order: Vec<usize> = (0..exact.len()).collect();
            order.sort_by(|&a, &b| {
                let ra = exact[a] - exact[a].floor();
                let rb = exact[b] - exact[b].floor();
                rb.total_cmp(&ra).then(a.cmp(&b))
            });
            for &i in order.iter().cycle().take(deficit) {
                units[i] += 1;
            }
            record_correction(self.correction);
            debug!(deficit, "distributed weight rounding units");
        }

        units
            .into_iter()
            .map(|u| round_to(u as f64 / scale, self.precision))
            .collect()
    }
}

fn record_correction(correction: Correction) {
    metrics::counter!(telemetry::WEIGHT_CORRECTIONS_TOTAL,
        "correction" => correction.as_str(),
    )
    .increment(1);
}

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    // Normalize negative zero so it serializes as `0.0`.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(shares: &[f64]) -> f64 {
        round_to(shares.iter().sum(), DEFAULT_PRECISION)
    }

    #[test]
    fn exact_split_needs_no_correction() {
        let shares = WeightNormalizer::default()
            .normalize(&[2.0, 1.0, 1.0])
            .unwrap();
        assert_eq!(shares, vec![0.5, 0.25, 0.25]);
    }

    #[test]
    fn thirds_correct_first_entry() {
        let shares = WeightNormalizer::default()
            .normalize(&[1.0, 1.0, 1.0])
            .unwrap();
        assert_eq!(shares, vec![0.334, 0.333, 0.333]);
        assert_eq!(sum(&shares), 1.0);
    }

    #[test]
    fn sixths_take_residual_from_first_entry() {
        // 1/6 rounds up to 0.167; six of them overshoot by 0.002.
        let shares = WeightNormalizer::default().normalize(&[1.0; 6]).unwrap();
        assert_eq!(shares[0], 0.165);
        assert!(shares[1..].iter().all(|&s| s == 0.167));
        assert_eq!(sum(&shares), 1.0);
    }

    #[test]
    fn zero_first_share_is_skipped_for_negative_residual() {
        let shares = WeightNormalizer::default()
            .normalize(&[0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0])
            .unwrap();
        assert_eq!(shares[0], 0.0);
        assert_eq!(shares[1], 0.165);
        assert!(shares.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn largest_remainder_is_order_independent() {
        let normalizer = WeightNormalizer::new(3, Correction::LargestRemainder);
        let shares = normalizer.normalize(&[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(shares, vec![0.334, 0.333, 0.333]);

        let shares = normalizer.normalize(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(shares, vec![0.25, 0.25, 0.5]);

        // Largest fractional part wins, regardless of position.
        let shares = normalizer.normalize(&[1.0, 2.0, 4.0]).unwrap();
        // exact thousandths: 142.857, 285.714, 571.428
        assert_eq!(shares, vec![0.143, 0.286, 0.571]);
        assert_eq!(sum(&shares), 1.0);
    }

    #[test]
    fn all_zero_weights_are_degenerate() {
        let err = WeightNormalizer::default()
            .normalize(&[0.0, 0.0])
            .unwrap_err();
        assert!(matches!(err, StancemapError::DegenerateWeights(_)));
    }

    #[test]
    fn empty_weights_are_degenerate() {
        let err = WeightNormalizer::default().normalize(&[]).unwrap_err();
        assert!(matches!(err, StancemapError::DegenerateWeights(_)));
    }

    #[test]
    fn negative_and_nan_weights_are_degenerate() {
        let normalizer = WeightNormalizer::default();
        assert!(matches!(
            normalizer.normalize(&[1.0, -1.0]),
            Err(StancemapError::DegenerateWeights(_))
        ));
        assert!(matches!(
            normalizer.normalize(&[f64::NAN]),
            Err(StancemapError::DegenerateWeights(_))
        ));
    }

    #[test]
    fn large_overshoot_spills_into_later_shares() {
        // 1/60 rounds up to 0.017; sixty of them overshoot by 0.02.
        let shares = WeightNormalizer::default().normalize(&[1.0; 60]).unwrap();
        assert_eq!(shares[0], 0.0);
        assert_eq!(shares[1], 0.014);
        assert!(shares[2..].iter().all(|&s| s == 0.017));
        assert_eq!(sum(&shares), 1.0);
    }

    #[test]
    fn precision_is_clamped() {
        assert_eq!(WeightNormalizer::new(0, Correction::FirstEntry).precision(), 1);
        assert_eq!(
            WeightNormalizer::new(42, Correction::FirstEntry).precision(),
            MAX_PRECISION
        );
    }

    #[test]
    fn round_to_normalizes_negative_zero() {
        let zero = round_to(-0.0001, 3);
        assert!(zero.is_sign_positive());
    }
}
