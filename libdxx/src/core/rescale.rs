//! Amplitude rescaling between element types.
//!
//! Moving samples between a fixed-point and a floating encoding (or between
//! the two float widths) is not a cast. Magnitudes are normalized against the
//! smallest and largest absolute value of the whole buffer, stretched to a
//! nominal amplitude, and the original sign is put back:
//!
//! ```text
//! out = sign(v) * (|v| - min|v|) / (max|v| - min|v|) * amplitude
//! ```
//!
//! Round trips through a short or float encoding are therefore shape
//! preserving only, never bit exact.

/// Peak written into short files (2^15 - 1)
pub const SHORT_AMPLITUDE: f64 = 32767.0;

/// Peak of canonical buffers decoded from short or float files
pub const FLOAT_AMPLITUDE: f64 = 10000.0;

/// Smallest and largest absolute value of a buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeBounds {
    pub min: f64,
    pub max: f64,
}

impl AmplitudeBounds {
    /// bounds over |v|, None for an empty buffer
    pub fn of(data: &[f64]) -> Option<Self> {
        let mut iter = data.iter().map(|v| v.abs());
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(AmplitudeBounds { min, max })
    }

    /// max - min
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Rescale `data` so its magnitudes span `[0, amplitude]`, keeping signs.
///
/// When every magnitude is equal the range collapses: zeros stay zero and
/// everything else lands on `±amplitude`.
pub fn rescale_amplitude(data: &[f64], amplitude: f64) -> Vec<f64> {
    let Some(bounds) = AmplitudeBounds::of(data) else {
        return Vec::new();
    };
    let range = bounds.range();

    data.iter()
        .map(|&v| {
            let magnitude = if range > 0.0 {
                (v.abs() - bounds.min) / range * amplitude
            } else if v == 0.0 {
                0.0
            } else {
                amplitude
            };
            if v < 0.0 {
                -magnitude
            } else {
                magnitude
            }
        })
        .collect()
}

/// Short file contents to canonical samples
pub fn i16s_to_f64s(data: &[i16]) -> Vec<f64> {
    let widened: Vec<f64> = data.iter().map(|&v| f64::from(v)).collect();
    rescale_amplitude(&widened, FLOAT_AMPLITUDE)
}

/// Float file contents to canonical samples
pub fn f32s_to_f64s(data: &[f32]) -> Vec<f64> {
    let widened: Vec<f64> = data.iter().map(|&v| f64::from(v)).collect();
    rescale_amplitude(&widened, FLOAT_AMPLITUDE)
}

/// Canonical samples to short file contents (truncates toward zero)
pub fn f64s_to_i16s(data: &[f64]) -> Vec<i16> {
    rescale_amplitude(data, SHORT_AMPLITUDE)
        .into_iter()
        .map(|v| v as i16)
        .collect()
}

/// Canonical samples to float file contents
pub fn f64s_to_f32s(data: &[f64]) -> Vec<f32> {
    rescale_amplitude(data, FLOAT_AMPLITUDE)
        .into_iter()
        .map(|v| v as f32)
        .collect()
}
