use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

/// How linear convolution is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvolutionMethod {
    /// Direct nested summation, O(len(x) * len(y))
    #[default]
    Direct,
    /// Zero-padded multiply in the frequency domain
    Fft,
}

/// Full linear convolution by direct summation
///
/// `result[n] = sum_p x[p] * y[n - p]`, `len(x) + len(y) - 1` samples long.
/// Either input empty gives an empty result.
pub fn convolve(x: &[f64], y: &[f64]) -> Vec<f64> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }

    let mut result = vec![0.0; x.len() + y.len() - 1];
    for (p, &xp) in x.iter().enumerate() {
        for (out, &yq) in result[p..p + y.len()].iter_mut().zip(y) {
            *out += xp * yq;
        }
    }
    result
}

/// Full linear convolution through a one-shot FFT
pub fn convolve_fft(x: &[f64], y: &[f64]) -> Vec<f64> {
    FftConvolver::new().convolve(x, y)
}

/// FFT convolution that keeps its planner between calls
///
/// Successive slices of one render have the same length, so plans are reused.
pub struct FftConvolver {
    planner: FftPlanner<f64>,
}

impl FftConvolver {
    pub fn new() -> Self {
        FftConvolver {
            planner: FftPlanner::new(),
        }
    }

    /// Same contract as [`convolve`]
    pub fn convolve(&mut self, x: &[f64], y: &[f64]) -> Vec<f64> {
        if x.is_empty() || y.is_empty() {
            return Vec::new();
        }

        let n = x.len() + y.len() - 1;
        let mut xs = zero_pad(x, n);
        let mut ys = zero_pad(y, n);

        let forward = self.planner.plan_fft_forward(n);
        forward.process(&mut xs);
        forward.process(&mut ys);

        for (a, b) in xs.iter_mut().zip(&ys) {
            *a *= *b;
        }

        let inverse = self.planner.plan_fft_inverse(n);
        inverse.process(&mut xs);

        // rustfft leaves the inverse unnormalized
        let scale = 1.0 / n as f64;
        xs.into_iter().map(|c| c.re * scale).collect()
    }
}

impl Default for FftConvolver {
    fn default() -> Self {
        Self::new()
    }
}

fn zero_pad(data: &[f64], len: usize) -> Vec<Complex<f64>> {
    let mut padded: Vec<Complex<f64>> = data.iter().map(|&v| Complex::new(v, 0.0)).collect();
    padded.resize(len, Complex::new(0.0, 0.0));
    padded
}

/// Convolution engine bound to one method
pub enum Convolver {
    Direct,
    Fft(FftConvolver),
}

impl Convolver {
    pub fn new(method: ConvolutionMethod) -> Self {
        match method {
            ConvolutionMethod::Direct => Convolver::Direct,
            ConvolutionMethod::Fft => Convolver::Fft(FftConvolver::new()),
        }
    }

    pub fn convolve(&mut self, x: &[f64], y: &[f64]) -> Vec<f64> {
        match self {
            Convolver::Direct => convolve(x, y),
            Convolver::Fft(fft) => fft.convolve(x, y),
        }
    }
}
