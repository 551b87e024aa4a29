//! Summary statistics for sample buffers

use serde::{Deserialize, Serialize};

use super::rescale::AmplitudeBounds;

/// Level summary of a sample buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of samples
    pub len: usize,
    /// Largest positive sample
    pub max: f64,
    /// Most negative sample
    pub min: f64,
    /// Smallest absolute value
    pub min_abs: f64,
    /// Largest absolute value
    pub peak: f64,
    /// Root mean square
    pub rms: f64,
}

impl SampleStats {
    /// Compute statistics over `samples`
    ///
    /// An empty buffer reports zero everywhere.
    pub fn of(samples: &[f64]) -> Self {
        let Some(bounds) = AmplitudeBounds::of(samples) else {
            return SampleStats {
                len: 0,
                max: 0.0,
                min: 0.0,
                min_abs: 0.0,
                peak: 0.0,
                rms: 0.0,
            };
        };

        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let sum_sq: f64 = samples.iter().map(|s| s * s).sum();

        SampleStats {
            len: samples.len(),
            max,
            min,
            min_abs: bounds.min,
            peak: bounds.max,
            rms: (sum_sq / samples.len() as f64).sqrt(),
        }
    }
}
