//! redxx - DXX sample file converter and move renderer
//!
//! File-level helpers on top of `libdxx`, shared by the `dxx` command line
//! tool.

use std::path::Path;

use anyhow::{Context, Result};

/// Re-export libdxx types
pub use libdxx::{RenderMode, RenderOptions, RenderReport, SampleFormat, SampleStats};

/// Information about a DXX file
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileInfo {
    pub format: SampleFormat,
    pub file_size: u64,
    pub stats: SampleStats,
}

/// Summary of a conversion
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConvertSummary {
    pub from: SampleFormat,
    pub to: SampleFormat,
    pub samples: usize,
    pub bytes_written: usize,
}

/// Get information about a DXX file
pub fn file_info(path: &Path) -> Result<FileInfo> {
    let format = SampleFormat::from_path(path)
        .with_context(|| format!("Cannot tell sample format of {}", path.display()))?;
    let file_size = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    let samples = libdxx::read_file(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(FileInfo {
        format,
        file_size,
        stats: SampleStats::of(&samples),
    })
}

/// Re-encode `input` into the format named by the extension of `output`
///
/// Both extensions are validated before the input is read.
pub fn convert_file(input: &Path, output: &Path) -> Result<ConvertSummary> {
    let from = SampleFormat::from_path(input)
        .with_context(|| format!("Cannot tell sample format of {}", input.display()))?;
    let to = SampleFormat::from_path(output)
        .with_context(|| format!("Cannot tell sample format of {}", output.display()))?;

    let samples = libdxx::read_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let data = libdxx::encode(&samples, to);
    std::fs::write(output, &data)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::debug!(%from, %to, samples = samples.len(), "converted");

    Ok(ConvertSummary {
        from,
        to,
        samples: samples.len(),
        bytes_written: data.len(),
    })
}

/// Load render options from an optional json file
pub fn load_options(config: Option<&Path>) -> Result<RenderOptions> {
    match config {
        Some(path) => RenderOptions::from_json_file(path)
            .with_context(|| format!("Failed to load render options from {}", path.display())),
        None => Ok(RenderOptions::default()),
    }
}

/// Log filter for the command line tool
///
/// `RUST_LOG` wins when it is set, otherwise `info`, or `debug` when verbose.
#[cfg(feature = "cli")]
pub fn log_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}
