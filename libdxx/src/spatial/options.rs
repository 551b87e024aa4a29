use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::DxxResult;

use super::convolution::ConvolutionMethod;

/// Sampling rate of the measured transfer functions
pub const DEFAULT_SAMPLING_RATE: u32 = 48_000;

/// How consecutive angle steps are joined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Convolution tails of neighbouring steps simply add up
    #[default]
    OverlapAdd,
    /// Half-step sweep with windowed crossfades between steps
    FadeinFadeout,
}

/// Options for a move render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Sampling rate in Hz
    pub sampling_rate: u32,
    /// Step joining strategy
    pub mode: RenderMode,
    /// Convolution realization
    pub convolution: ConvolutionMethod,
    /// Keep loaded transfer functions for the rest of the run
    pub cache_transfer_functions: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sampling_rate: DEFAULT_SAMPLING_RATE,
            mode: RenderMode::OverlapAdd,
            convolution: ConvolutionMethod::Direct,
            cache_transfer_functions: false,
        }
    }
}

impl RenderOptions {
    /// Overlap-add rendering at the default rate
    pub fn overlap_add() -> Self {
        Self::default()
    }

    /// Windowed crossfade rendering at the default rate
    pub fn fadein_fadeout() -> Self {
        Self {
            mode: RenderMode::FadeinFadeout,
            ..Default::default()
        }
    }

    /// Set the sampling rate in Hz
    pub fn with_sampling_rate(mut self, sampling_rate: u32) -> Self {
        self.sampling_rate = sampling_rate;
        self
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_convolution(mut self, convolution: ConvolutionMethod) -> Self {
        self.convolution = convolution;
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache_transfer_functions = cache;
        self
    }

    /// Parse options from json, missing fields take their defaults
    pub fn from_json(text: &str) -> DxxResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load options from a json file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> DxxResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
