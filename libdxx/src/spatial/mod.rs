//! Move synthesis over measured transfer functions

pub mod convolution;
pub mod movement;
pub mod options;
pub mod renderer;
pub mod store;
pub mod window;

use std::path::Path;

use crate::core::{DxxError, DxxResult, SampleFormat};
use crate::reader::read_file;
use crate::writer::write_file;

pub use convolution::{convolve, convolve_fft, ConvolutionMethod, Convolver, FftConvolver};
pub use movement::{Direction, Ear, MoveDescriptor, FULL_CIRCLE};
pub use options::{RenderMode, RenderOptions, DEFAULT_SAMPLING_RATE};
pub use renderer::{output_path, MoveRenderer, RenderReport, RenderedMove, RenderedOutput};
pub use store::{CachedStore, MemoryStore, SubjectDirectory, TransferFunctionStore};
pub use window::{coefficients, fade_window, FadeWindow};

/// Write a fade-in / fade-out filter pair of `length` samples
///
/// Both extensions are checked before anything is written.
pub fn generate_fade_filters<P: AsRef<Path>, Q: AsRef<Path>>(
    length: i64,
    fade_in_path: P,
    fade_out_path: Q,
) -> DxxResult<FadeWindow> {
    SampleFormat::from_path(fade_in_path.as_ref())?;
    SampleFormat::from_path(fade_out_path.as_ref())?;
    if length < 0 {
        return Err(DxxError::InvalidArgument(format!(
            "filter length must not be negative, got {length}"
        )));
    }

    let window = fade_window(length as usize);
    write_file(fade_in_path, &window.fade_in)?;
    write_file(fade_out_path, &window.fade_out)?;
    Ok(window)
}

/// Render the four `(direction, ear)` outputs of a move into `out_dir`
///
/// Transfer functions are read from `{subject}/SLTF/`. Outputs are written one
/// by one, so an error part way through leaves the earlier files in place.
pub fn render_move<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    subject: P,
    sound_path: Q,
    move_width: i64,
    move_velocity: i64,
    end_angle: i64,
    out_dir: R,
    options: &RenderOptions,
) -> DxxResult<RenderReport> {
    let mv = MoveDescriptor::new(move_width, move_velocity, end_angle, Direction::Clockwise)?;
    let sound = read_file(sound_path)?;
    let store = SubjectDirectory::new(subject.as_ref());

    tracing::info!(
        subject = %subject.as_ref().display(),
        sound_len = sound.len(),
        mode = ?options.mode,
        "rendering move"
    );

    if options.cache_transfer_functions {
        MoveRenderer::new(CachedStore::new(store), options.clone())
            .render_to_dir(&sound, &mv, out_dir.as_ref())
    } else {
        MoveRenderer::new(store, options.clone()).render_to_dir(&sound, &mv, out_dir.as_ref())
    }
}
