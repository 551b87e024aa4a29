use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use libdxx::{ConvolutionMethod, RenderMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dxx")]
#[command(version = "0.1.0")]
#[command(about = "DXX sample file converter and move renderer", long_about = None)]
struct Cli {
    /// Log every render step
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Add up the convolution tails of neighbouring steps
    OverlapAdd,
    /// Crossfade neighbouring half steps
    FadeinFadeout,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::OverlapAdd => RenderMode::OverlapAdd,
            ModeArg::FadeinFadeout => RenderMode::FadeinFadeout,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fade-in / fade-out filter pair
    FadeFilters {
        /// Filter length in samples
        #[arg(allow_negative_numbers = true)]
        length: i64,
        /// Output file for the fade-in filter (.DXX)
        fade_in: PathBuf,
        /// Output file for the fade-out filter (.DXX)
        fade_out: PathBuf,
    },
    /// Render a moving source from per-angle transfer functions
    #[command(allow_negative_numbers = true)]
    Render {
        /// Subject directory containing SLTF/
        subject: PathBuf,
        /// Source sound (.DXX)
        sound: PathBuf,
        /// Move width in angle steps
        move_width: i64,
        /// Move velocity in steps per second
        move_velocity: i64,
        /// End angle in centidegrees (0-3599)
        end_angle: i64,
        /// Output directory
        out_dir: PathBuf,
        /// Rendering mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Sampling rate in Hz
        #[arg(long)]
        sampling_rate: Option<u32>,
        /// Convolve in the frequency domain
        #[arg(long)]
        fft: bool,
        /// Load each transfer function only once
        #[arg(long)]
        cache: bool,
        /// Render options as json
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the render report as json
        #[arg(long)]
        json: bool,
    },
    /// Convert between DXX formats
    Convert {
        /// Input file
        input: PathBuf,
        /// Output file, format taken from its extension
        output: PathBuf,
    },
    /// Show information about a DXX file
    Info {
        /// Input file
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(redxx::log_filter(cli.verbose))
        .init();

    match cli.command {
        Commands::FadeFilters {
            length,
            fade_in,
            fade_out,
        } => {
            libdxx::generate_fade_filters(length, &fade_in, &fade_out)
                .context("Failed to generate fade filters")?;
            tracing::info!(
                length,
                fade_in = %fade_in.display(),
                fade_out = %fade_out.display(),
                "wrote fade filters"
            );
        }
        Commands::Render {
            subject,
            sound,
            move_width,
            move_velocity,
            end_angle,
            out_dir,
            mode,
            sampling_rate,
            fft,
            cache,
            config,
            json,
        } => {
            let mut options = redxx::load_options(config.as_deref())?;
            if let Some(mode) = mode {
                options = options.with_mode(mode.into());
            }
            if let Some(rate) = sampling_rate {
                options = options.with_sampling_rate(rate);
            }
            if fft {
                options = options.with_convolution(ConvolutionMethod::Fft);
            }
            if cache {
                options = options.with_cache(true);
            }

            let report = libdxx::render_move(
                &subject,
                &sound,
                move_width,
                move_velocity,
                end_angle,
                &out_dir,
                &options,
            )
            .context("Render failed")?;

            if json {
                let text =
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
                println!("{}", text);
            } else {
                for output in &report.outputs {
                    println!("{}: length={}", output.path.display(), output.len);
                }
            }
        }
        Commands::Convert { input, output } => {
            let summary = redxx::convert_file(&input, &output)?;
            println!(
                "{} -> {}: {} samples ({} -> {}, {} bytes)",
                input.display(),
                output.display(),
                summary.samples,
                summary.from,
                summary.to,
                summary.bytes_written
            );
        }
        Commands::Info { input, json } => {
            let info = redxx::file_info(&input)?;
            if json {
                let text =
                    serde_json::to_string_pretty(&info).context("Failed to serialize info")?;
                println!("{}", text);
            } else {
                println!("DXX Sample File");
                println!("───────────────────────────────");
                println!("  Format:      {}", info.format);
                println!("  File size:   {} bytes", info.file_size);
                println!("  Samples:     {}", info.stats.len);
                println!("  Peak:        {:.6}", info.stats.peak);
                println!("  Min |v|:     {:.6}", info.stats.min_abs);
                println!("  Range:       {:.6} .. {:.6}", info.stats.min, info.stats.max);
                println!("  RMS:         {:.6}", info.stats.rms);
            }
        }
    }

    Ok(())
}
