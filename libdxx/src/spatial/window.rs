//! Fourier-series crossfade windows.
//!
//! Both halves come from the same 4-term cosine sum. `fade_in` rises from
//! about 0 to about 1 over the window, `fade_out` falls the other way, so the
//! tail of one segment weighted by `fade_out` and the head of the next
//! weighted by `fade_in` blend without a seam.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Cosine-sum coefficients `[a0, a1, a2, a3]`
pub fn coefficients() -> [f64; 4] {
    let sqrt2 = 2f64.sqrt();
    let root = ((5.0 - 2.0 * sqrt2) / 2.0).sqrt();
    [
        (1.0 + sqrt2) / 4.0,
        0.25 + 0.25 * root,
        (1.0 - sqrt2) / 4.0,
        0.25 - 0.25 * root,
    ]
}

/// Matching fade-in / fade-out coefficient sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeWindow {
    pub fade_in: Vec<f64>,
    pub fade_out: Vec<f64>,
}

impl FadeWindow {
    /// Window length
    pub fn len(&self) -> usize {
        self.fade_in.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fade_in.is_empty()
    }
}

/// Build a crossfade window of `length` samples
///
/// A zero length gives two empty sequences.
pub fn fade_window(length: usize) -> FadeWindow {
    let [a0, a1, a2, a3] = coefficients();
    let l = length as f64;

    let mut fade_in = Vec::with_capacity(length);
    let mut fade_out = Vec::with_capacity(length);
    for i in 0..length {
        let f = i as f64;
        let c1 = (PI / l * f).cos();
        let c2 = (2.0 * PI / l * f).cos();
        let c3 = (3.0 * PI / l * f).cos();
        fade_in.push(a0 - a1 * c1 + a2 * c2 - a3 * c3);
        fade_out.push(a0 + a1 * c1 + a2 * c2 + a3 * c3);
    }

    FadeWindow { fade_in, fade_out }
}
