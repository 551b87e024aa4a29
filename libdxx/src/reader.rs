use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::core::{
    f32s_to_f64s, i16s_to_f64s, DxxError, DxxResult, ElementType, SampleBuffer, SampleFormat,
};

/// reader for dxx sample streams
pub struct Reader {
    format: SampleFormat,
}

impl Reader {
    /// new reader for one format
    pub fn new(format: SampleFormat) -> Self {
        Reader { format }
    }

    /// format this reader decodes
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// read a whole stream into canonical samples
    pub fn read<R: Read>(&self, reader: R) -> DxxResult<SampleBuffer> {
        self.read_limited(reader, None)
    }

    /// read at most `len` elements, stopping early at end of stream
    ///
    /// Binary streams are left positioned right after the last record read.
    pub fn read_len<R: Read>(&self, reader: R, len: usize) -> DxxResult<SampleBuffer> {
        self.read_limited(reader, Some(len))
    }

    fn read_limited<R: Read>(
        &self,
        mut reader: R,
        limit: Option<usize>,
    ) -> DxxResult<SampleBuffer> {
        if self.format.is_text() {
            return self.read_text(BufReader::new(reader), limit);
        }

        let mut data = Vec::new();
        match limit {
            Some(len) => {
                let bytes = len.saturating_mul(self.format.element().byte_len()) as u64;
                reader.take(bytes).read_to_end(&mut data)?;
            }
            None => {
                reader.read_to_end(&mut data)?;
            }
        }
        Ok(self.read_binary(&data))
    }

    fn read_text<R: BufRead>(&self, reader: R, limit: Option<usize>) -> DxxResult<SampleBuffer> {
        match self.format.element() {
            ElementType::Short => Ok(i16s_to_f64s(&parse_lines::<i16, _>(reader, limit)?)),
            ElementType::Float => Ok(f32s_to_f64s(&parse_lines::<f32, _>(reader, limit)?)),
            ElementType::Double => parse_lines::<f64, _>(reader, limit),
        }
    }

    fn read_binary(&self, data: &[u8]) -> SampleBuffer {
        let width = self.format.element().byte_len();
        let records = data.chunks_exact(width);
        let trailing = records.remainder().len();
        if trailing > 0 {
            tracing::debug!(
                format = %self.format,
                trailing,
                "ignoring partial record at end of stream"
            );
        }

        match self.format.element() {
            ElementType::Short => {
                let values: Vec<i16> = records
                    .map(|b| i16::from_le_bytes([b[0], b[1]]))
                    .collect();
                i16s_to_f64s(&values)
            }
            ElementType::Float => {
                let values: Vec<f32> = records
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .collect();
                f32s_to_f64s(&values)
            }
            ElementType::Double => records
                .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
                .collect(),
        }
    }
}

/// one value per line, any unparsable line fails the whole read
fn parse_lines<T: FromStr, R: BufRead>(
    mut reader: R,
    limit: Option<usize>,
) -> DxxResult<Vec<T>> {
    let mut values = Vec::new();
    let mut raw = Vec::new();
    let mut line = 0;

    while limit.map_or(true, |len| values.len() < len) {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        line += 1;

        let bytes = raw.strip_suffix(b"\n").unwrap_or(&raw[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let malformed = || DxxError::MalformedSample {
            line,
            value: String::from_utf8_lossy(bytes).into_owned(),
        };
        let text = std::str::from_utf8(bytes).map_err(|_| malformed())?;
        values.push(text.parse::<T>().map_err(|_| malformed())?);
    }
    Ok(values)
}

/// decode a stream as `format`
pub fn decode<R: Read>(reader: R, format: SampleFormat) -> DxxResult<SampleBuffer> {
    Reader::new(format).read(reader)
}

/// decode at most `len` elements of a stream as `format`
pub fn decode_n<R: Read>(reader: R, format: SampleFormat, len: usize) -> DxxResult<SampleBuffer> {
    Reader::new(format).read_len(reader, len)
}

/// decode an in-memory file image as `format`
pub fn decode_bytes(data: &[u8], format: SampleFormat) -> DxxResult<SampleBuffer> {
    Reader::new(format).read(data)
}

/// read a dxx file, picking the format from its extension
///
/// The extension is checked before the file is opened.
pub fn read_file<P: AsRef<Path>>(path: P) -> DxxResult<SampleBuffer> {
    let path = path.as_ref();
    let format = SampleFormat::from_path(path)?;
    let file = File::open(path)?;
    let samples = Reader::new(format).read(file)?;
    tracing::debug!(path = %path.display(), %format, len = samples.len(), "read samples");
    Ok(samples)
}
