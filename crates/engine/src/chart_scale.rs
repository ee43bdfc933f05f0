//! Display-scale heuristic for balance and cash-flow charts.
//!
//! Chooses between a linear, square-root or logarithmic axis based on the
//! statistical shape of the series. The thresholds are configuration
//! constants; the comparisons are deliberately strict (`<` / `>`) so the
//! behavior at the boundary is well defined.

use serde::{Deserialize, Serialize};

/// Variation threshold below which small relative swings on large
/// values are amplified with a sqrt axis. On a zero-anchored axis it is
/// compared against spread/max, on a floating axis against stddev/mean.
pub const CV_THRESHOLD: f64 = 0.1;

/// Max/min ratio above which a wide spread is compressed with a sqrt axis.
pub const RANGE_RATIO_THRESHOLD: f64 = 10.0;

/// Ratio of the minimum value to the (max - min) spread above which a
/// series clustered far from zero gets a log axis.
pub const LOG_RATIO_THRESHOLD: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartScale {
    #[default]
    Linear,
    Sqrt,
    Log,
}

/// Select a scale for a chart whose y-axis starts from zero.
///
/// Only positive values participate: an all-zero or empty series stays
/// linear. On a zero-anchored axis the variation is measured against the
/// full 0..max range: values clustered far above their own spread get a
/// log axis for aggressive compression, a spread that is small next to
/// max gets sqrt. A high max/min ratio means small values would be
/// invisible next to large ones, so sqrt compresses the top end.
pub fn select_scale(values: &[f64]) -> ChartScale {
    select_scale_with(values, true)
}

/// Variant for charts whose axis does not start from zero. The floating
/// axis already absorbs the distance from zero, so only the coefficient
/// of variation (stddev/mean) decides between sqrt and the range-ratio
/// fallback.
pub fn select_scale_with(values: &[f64], starts_from_zero: bool) -> ChartScale {
    let positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if positive.is_empty() {
        return ChartScale::Linear;
    }

    let mean = positive.iter().sum::<f64>() / positive.len() as f64;
    if mean == 0.0 {
        return ChartScale::Linear;
    }

    let min = positive.iter().copied().fold(f64::INFINITY, f64::min);
    let max = positive.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if starts_from_zero {
        let spread = max - min;
        if max > 0.0 && spread > 0.0 {
            if min / spread > LOG_RATIO_THRESHOLD {
                return ChartScale::Log;
            }
            if spread / max < CV_THRESHOLD {
                return ChartScale::Sqrt;
            }
        }
    } else {
        let variance = positive
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / positive.len() as f64;
        let cv = variance.sqrt() / mean.abs();
        if cv < CV_THRESHOLD {
            return ChartScale::Sqrt;
        }
    }

    if min > 0.0 && max / min > RANGE_RATIO_THRESHOLD {
        return ChartScale::Sqrt;
    }

    ChartScale::Linear
}
