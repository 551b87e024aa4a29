//! common types for dxx sample files

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{DxxError, DxxResult};

// constants

/// bit length of a short element
pub const BIT_LEN_SHORT: usize = 16;
/// bit length of a float element
pub const BIT_LEN_FLOAT: usize = 32;
/// bit length of a double element
pub const BIT_LEN_DOUBLE: usize = 64;

/// every extension a dxx file may carry, in declaration order
pub const EXTENSIONS: [&str; 6] = ["DSA", "DFA", "DDA", "DSB", "DFB", "DDB"];

/// canonical in-memory sample buffer
pub type SampleBuffer = Vec<f64>;

// types

/// element type stored in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// signed 16-bit integer
    Short,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
}

impl ElementType {
    /// bits per element
    pub fn bit_len(self) -> usize {
        match self {
            ElementType::Short => BIT_LEN_SHORT,
            ElementType::Float => BIT_LEN_FLOAT,
            ElementType::Double => BIT_LEN_DOUBLE,
        }
    }

    /// bytes per element
    pub fn byte_len(self) -> usize {
        self.bit_len() / 8
    }
}

/// sample file encoding
///
/// | Ext | Variant      | Element | Layout                  |
/// |-----|--------------|---------|-------------------------|
/// | DSA | ShortText    | i16     | one decimal per line    |
/// | DFA | FloatText    | f32     | one `%e` float per line |
/// | DDA | DoubleText   | f64     | one `%e` float per line |
/// | DSB | ShortBinary  | i16     | 2-byte little endian    |
/// | DFB | FloatBinary  | f32     | 4-byte little endian    |
/// | DDB | DoubleBinary | f64     | 8-byte little endian    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleFormat {
    ShortText,
    FloatText,
    DoubleText,
    ShortBinary,
    FloatBinary,
    DoubleBinary,
}

impl SampleFormat {
    /// all formats, in extension order
    pub const ALL: [SampleFormat; 6] = [
        SampleFormat::ShortText,
        SampleFormat::FloatText,
        SampleFormat::DoubleText,
        SampleFormat::ShortBinary,
        SampleFormat::FloatBinary,
        SampleFormat::DoubleBinary,
    ];

    /// match an extension (without the dot), case-sensitive
    pub fn from_extension(ext: &str) -> DxxResult<Self> {
        match ext {
            "DSA" => Ok(SampleFormat::ShortText),
            "DFA" => Ok(SampleFormat::FloatText),
            "DDA" => Ok(SampleFormat::DoubleText),
            "DSB" => Ok(SampleFormat::ShortBinary),
            "DFB" => Ok(SampleFormat::FloatBinary),
            "DDB" => Ok(SampleFormat::DoubleBinary),
            _ => Err(DxxError::UnknownFormat(ext.to_string())),
        }
    }

    /// format of a file, from its extension
    pub fn from_path(path: &Path) -> DxxResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| DxxError::UnknownFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            SampleFormat::ShortText => "DSA",
            SampleFormat::FloatText => "DFA",
            SampleFormat::DoubleText => "DDA",
            SampleFormat::ShortBinary => "DSB",
            SampleFormat::FloatBinary => "DFB",
            SampleFormat::DoubleBinary => "DDB",
        }
    }

    /// element stored by this format
    pub fn element(self) -> ElementType {
        match self {
            SampleFormat::ShortText | SampleFormat::ShortBinary => ElementType::Short,
            SampleFormat::FloatText | SampleFormat::FloatBinary => ElementType::Float,
            SampleFormat::DoubleText | SampleFormat::DoubleBinary => ElementType::Double,
        }
    }

    /// is this a line-delimited text format?
    pub fn is_text(self) -> bool {
        matches!(
            self,
            SampleFormat::ShortText | SampleFormat::FloatText | SampleFormat::DoubleText
        )
    }

    /// bits per element
    pub fn bit_len(self) -> usize {
        self.element().bit_len()
    }

    /// bytes per record, None for text formats
    pub fn byte_len(self) -> Option<usize> {
        if self.is_text() {
            None
        } else {
            Some(self.element().byte_len())
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SampleFormat {
    type Err = DxxError;

    fn from_str(s: &str) -> DxxResult<Self> {
        Self::from_extension(s)
    }
}
