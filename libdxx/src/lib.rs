//! libdxx - codec for DXX sample files and move synthesis
//!
//! DXX files hold one mono signal as short, float or double elements, either
//! one value per text line or as raw little-endian records. Everything is
//! decoded into `f64` samples, rescaling amplitudes when the element type
//! changes.
//!
//! The [`spatial`] module renders a sound as if its source rotated around the
//! listener, by convolving slices of it with per-angle transfer functions.

pub mod core;
pub mod spatial;

mod reader;
mod writer;

pub use crate::core::{
    rescale_amplitude, AmplitudeBounds, DxxError, DxxResult, ElementType, SampleBuffer, SampleFormat,
    SampleStats, FLOAT_AMPLITUDE, SHORT_AMPLITUDE,
};
pub use reader::{decode, decode_bytes, decode_n, read_file, Reader};
pub use spatial::{
    convolve, convolve_fft, fade_window, generate_fade_filters, render_move, ConvolutionMethod,
    Direction, Ear, FadeWindow, MoveDescriptor, MoveRenderer, RenderMode, RenderOptions,
    RenderReport,
};
pub use writer::{encode, format_scientific, write, write_file, Writer};
