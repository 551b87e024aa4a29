use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::{f64s_to_f32s, f64s_to_i16s, DxxResult, ElementType, SampleFormat};

/// writer for dxx sample streams
pub struct Writer {
    format: SampleFormat,
    buffer: Vec<u8>,
}

impl Writer {
    /// new writer for one format
    pub fn new(format: SampleFormat) -> Self {
        Writer {
            format,
            buffer: Vec::new(),
        }
    }

    /// encode canonical samples into a complete file image
    pub fn write(mut self, samples: &[f64]) -> Vec<u8> {
        match self.format.element() {
            ElementType::Short => {
                for v in f64s_to_i16s(samples) {
                    self.push_short(v);
                }
            }
            ElementType::Float => {
                for v in f64s_to_f32s(samples) {
                    self.push_float(v);
                }
            }
            ElementType::Double => {
                for &v in samples {
                    self.push_double(v);
                }
            }
        }
        self.buffer
    }

    fn push_short(&mut self, v: i16) {
        if self.format.is_text() {
            self.buffer.extend_from_slice(v.to_string().as_bytes());
            self.buffer.push(b'\n');
        } else {
            self.buffer.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn push_float(&mut self, v: f32) {
        if self.format.is_text() {
            self.push_line(&format_scientific(f64::from(v), FLOAT_TEXT_PRECISION));
        } else {
            self.buffer.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn push_double(&mut self, v: f64) {
        if self.format.is_text() {
            self.push_line(&format_scientific(v, DOUBLE_TEXT_PRECISION));
        } else {
            self.buffer.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn push_line(&mut self, text: &str) {
        self.buffer.extend_from_slice(text.as_bytes());
        self.buffer.push(b'\n');
    }
}

/// fractional digits for DFA lines (C `%e` default)
const FLOAT_TEXT_PRECISION: usize = 6;

/// fractional digits for DDA lines, enough for an exact f64 round trip
const DOUBLE_TEXT_PRECISION: usize = 16;

/// C-style `%e`: `-1.234560e+02`, exponent signed and at least two digits
pub fn format_scientific(v: f64, precision: usize) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let formatted = format!("{:.*e}", precision, v);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// encode canonical samples as `format`
pub fn encode(samples: &[f64], format: SampleFormat) -> Vec<u8> {
    Writer::new(format).write(samples)
}

/// encode into any writer
pub fn write<W: Write>(mut writer: W, samples: &[f64], format: SampleFormat) -> DxxResult<()> {
    writer.write_all(&encode(samples, format))?;
    Ok(())
}

/// write a dxx file, picking the format from its extension
///
/// Nothing is created when the extension is unknown. The whole file image is
/// built before the file is touched.
pub fn write_file<P: AsRef<Path>>(path: P, samples: &[f64]) -> DxxResult<()> {
    let path = path.as_ref();
    let format = SampleFormat::from_path(path)?;
    let data = encode(samples, format);
    fs::write(path, &data)?;
    tracing::debug!(path = %path.display(), %format, len = samples.len(), "wrote samples");
    Ok(())
}
