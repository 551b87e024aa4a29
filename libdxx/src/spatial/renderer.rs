//! Move synthesis.
//!
//! A move is rendered as a sequence of discrete angle steps. Every step takes
//! a slice of the source sound, convolves it with the transfer function of the
//! step's angle and adds the result into one pre-sized output buffer. The two
//! modes differ in how neighbouring steps are joined:
//!
//! - overlap-add: step `k` starts at `dwelling * k` and its convolution tail
//!   runs into the next step.
//! - fadein-fadeout: the sweep visits half steps, the ringing margin of each
//!   convolution is cut away and step boundaries are crossfaded with a
//!   [`FadeWindow`](super::window::FadeWindow).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DxxError, DxxResult, SampleBuffer};
use crate::writer::write_file;

use super::convolution::Convolver;
use super::movement::{Direction, Ear, MoveDescriptor};
use super::options::{RenderMode, RenderOptions};
use super::store::TransferFunctionStore;
use super::window::fade_window;

/// One rendered `(direction, ear)` output
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMove {
    pub direction: Direction,
    pub ear: Ear,
    pub samples: SampleBuffer,
    /// absolute angle of every step, in visiting order
    pub used_angles: Vec<u32>,
}

/// One written output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedOutput {
    pub direction: Direction,
    pub ear: Ear,
    pub path: PathBuf,
    pub len: usize,
    pub used_angles: Vec<u32>,
}

/// Everything a full render wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub options: RenderOptions,
    pub outputs: Vec<RenderedOutput>,
}

/// Output file name for one render
pub fn output_path(out_dir: &Path, mv: &MoveDescriptor, ear: Ear) -> PathBuf {
    out_dir.join(format!(
        "move_judge_w{:03}_mt{:03}_{}_{}_{}.DDB",
        mv.move_width,
        mv.move_velocity,
        mv.direction.label(),
        mv.end_angle,
        ear.label()
    ))
}

/// Renders moves against one transfer-function store
pub struct MoveRenderer<S> {
    store: S,
    options: RenderOptions,
}

impl<S: TransferFunctionStore> MoveRenderer<S> {
    pub fn new(store: S, options: RenderOptions) -> Self {
        MoveRenderer { store, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Render one ear of one move
    pub fn render(&self, sound: &[f64], mv: &MoveDescriptor, ear: Ear) -> DxxResult<RenderedMove> {
        if self.options.sampling_rate == 0 {
            return Err(DxxError::InvalidArgument(
                "sampling rate must be positive".to_string(),
            ));
        }

        let (samples, used_angles) = match self.options.mode {
            RenderMode::OverlapAdd => self.overlap_add(sound, mv, ear)?,
            RenderMode::FadeinFadeout => self.fadein_fadeout(sound, mv, ear)?,
        };

        Ok(RenderedMove {
            direction: mv.direction,
            ear,
            samples,
            used_angles,
        })
    }

    /// Render both directions for both ears and write each result to
    /// `out_dir` as soon as it is complete
    ///
    /// A failing render writes nothing for itself, but outputs written before
    /// it stay on disk.
    pub fn render_to_dir(
        &self,
        sound: &[f64],
        mv: &MoveDescriptor,
        out_dir: &Path,
    ) -> DxxResult<RenderReport> {
        let mut outputs = Vec::with_capacity(4);

        for direction in Direction::BOTH {
            let mv = mv.with_direction(direction);
            for ear in Ear::BOTH {
                let rendered = self.render(sound, &mv, ear)?;
                let path = output_path(out_dir, &mv, ear);
                write_file(&path, &rendered.samples)?;

                tracing::info!(
                    path = %path.display(),
                    len = rendered.samples.len(),
                    "wrote move"
                );
                tracing::info!(used_angles = ?rendered.used_angles, "used angles");

                outputs.push(RenderedOutput {
                    direction,
                    ear,
                    path,
                    len: rendered.samples.len(),
                    used_angles: rendered.used_angles,
                });
            }
        }

        Ok(RenderReport {
            options: self.options.clone(),
            outputs,
        })
    }

    fn overlap_add(
        &self,
        sound: &[f64],
        mv: &MoveDescriptor,
        ear: Ear,
    ) -> DxxResult<(SampleBuffer, Vec<u32>)> {
        let width = mv.move_width as usize;
        let move_samples = mv.move_samples(self.options.sampling_rate);
        let dwelling = move_samples / width;
        if dwelling == 0 {
            return Err(DxxError::InvalidArgument(format!(
                "move of {move_samples} samples is too short for {width} steps"
            )));
        }

        // every slice reaches one sample into the next step
        let covered = dwelling * width + 1;
        if sound.len() < covered {
            return Err(DxxError::SoundTooShort {
                required: covered,
                available: sound.len(),
            });
        }

        let mut convolver = Convolver::new(self.options.convolution);
        let mut out: Option<SampleBuffer> = None;
        let mut tf_len = None;
        let mut used_angles = Vec::with_capacity(width);

        for step in 0..width {
            let angle = mv.step_angle(step, 1);
            let tf = self.load_transfer_function(angle, ear, tf_len)?;
            tf_len = Some(tf.len());

            let out =
                out.get_or_insert_with(|| vec![0.0; move_samples.max(covered) + tf.len() - 1]);

            let offset = dwelling * step;
            let slice = &sound[offset..=offset + dwelling];
            let convolved = convolver.convolve(slice, &tf);
            for (acc, v) in out[offset..offset + convolved.len()]
                .iter_mut()
                .zip(&convolved)
            {
                *acc += v;
            }

            tracing::debug!(step, angle, offset, ear = %ear, "accumulated step");
            used_angles.push(angle);
        }

        Ok((out.unwrap_or_default(), used_angles))
    }

    fn fadein_fadeout(
        &self,
        sound: &[f64],
        mv: &MoveDescriptor,
        ear: Ear,
    ) -> DxxResult<(SampleBuffer, Vec<u32>)> {
        let steps = mv.move_width as usize * 2 + 1;
        let move_samples = mv.move_samples(self.options.sampling_rate);
        let dwelling = move_samples / steps;
        if dwelling == 0 {
            return Err(DxxError::InvalidArgument(format!(
                "move of {move_samples} samples is too short for {steps} half steps"
            )));
        }

        let duration = dwelling * 63 / 64;
        let overlap = dwelling / 64;
        let hop = duration + overlap;
        let segment = hop + overlap;
        let window = fade_window(overlap);

        let mut convolver = Convolver::new(self.options.convolution);
        let mut out: Option<SampleBuffer> = None;
        let mut tf_len = None;
        let mut used_angles = Vec::with_capacity(steps);

        for step in 0..steps {
            let angle = mv.step_angle(step, 2);
            let tf = self.load_transfer_function(angle, ear, tf_len)?;
            tf_len = Some(tf.len());
            let margin = tf.len() * 2;
            let slice_len = segment + tf.len() * 3 + 1;

            if out.is_none() {
                let required = hop * (steps - 1) + slice_len;
                if sound.len() < required {
                    return Err(DxxError::SoundTooShort {
                        required,
                        available: sound.len(),
                    });
                }
            }
            let out = out.get_or_insert_with(|| vec![0.0; hop * steps + overlap]);

            let start = hop * step;
            let convolved = convolver.convolve(&sound[start..start + slice_len], &tf);
            // cut the transfer-function ringing off both ends
            let body = &convolved[margin..convolved.len() - margin];

            for (i, &v) in body.iter().enumerate() {
                let gain = if i < overlap {
                    window.fade_in[i]
                } else if i >= hop {
                    window.fade_out[i - hop]
                } else {
                    1.0
                };
                out[start + i] += v * gain;
            }

            tracing::debug!(step, angle, offset = start, ear = %ear, "crossfaded step");
            used_angles.push(angle);
        }

        // the first step's fade-in has nothing to blend with
        let mut out = out.unwrap_or_default();
        out.drain(..overlap.min(out.len()));
        Ok((out, used_angles))
    }

    fn load_transfer_function(
        &self,
        angle: u32,
        ear: Ear,
        expected: Option<usize>,
    ) -> DxxResult<SampleBuffer> {
        let tf = self.store.load(angle, ear)?;
        if tf.is_empty() {
            return Err(DxxError::InvalidArgument(format!(
                "transfer function for angle {angle} ({ear}) is empty"
            )));
        }
        if let Some(expected) = expected {
            if tf.len() != expected {
                return Err(DxxError::TransferFunctionMismatch {
                    angle,
                    expected,
                    found: tf.len(),
                });
            }
        }
        Ok(tf)
    }
}
