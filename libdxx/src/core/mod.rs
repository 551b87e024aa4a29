pub mod analysis;
pub mod error;
pub mod rescale;
pub mod types;

pub use analysis::SampleStats;
pub use error::{DxxError, DxxResult};
pub use rescale::{
    f32s_to_f64s, f64s_to_f32s, f64s_to_i16s, i16s_to_f64s, rescale_amplitude, AmplitudeBounds,
    FLOAT_AMPLITUDE, SHORT_AMPLITUDE,
};
pub use types::*;
