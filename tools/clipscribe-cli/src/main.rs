//! ClipScribe CLI — Command-line interface for transcription and captioning.
//!
//! Usage:
//!   clipscribe transcribe <MEDIA>          Transcribe a recording and write caption artifacts
//!   clipscribe convert <CAPTIONS>          Convert a WebVTT track to SRT or ASS
//!   clipscribe chapters <TRANSCRIPT> <VTT> Generate a chapter list from a transcript

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "clipscribe",
    about = "Chunked transcription and subtitle generation for long recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe a recording and write transcript and caption artifacts
    Transcribe {
        /// Path to the source media file
        media: PathBuf,

        /// Output directory for the artifacts
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Per-request window length (seconds); bounded by the service's
        /// request duration ceiling
        #[arg(long, default_value = "120")]
        window_secs: f64,

        /// Maximum simultaneous transcription requests
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Media duration in seconds (skips probing when given)
        #[arg(long)]
        duration_secs: Option<f64>,
    },

    /// Convert a WebVTT caption track to another subtitle format
    Convert {
        /// Path to the WebVTT file
        captions: PathBuf,

        /// Target format
        #[arg(long, default_value = "srt")]
        format: String,

        /// Output file path (defaults to the input with a new extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a chapter list from a transcript and its caption track
    Chapters {
        /// Path to the plain transcript file
        transcript: PathBuf,

        /// Path to the WebVTT file
        captions: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    clipscribe_common::logging::init_logging(&clipscribe_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Transcribe {
            media,
            out_dir,
            window_secs,
            concurrency,
            duration_secs,
        } => commands::transcribe::run(media, out_dir, window_secs, concurrency, duration_secs).await,
        Commands::Convert {
            captions,
            format,
            output,
        } => commands::convert::run(captions, format, output),
        Commands::Chapters {
            transcript,
            captions,
        } => commands::chapters::run(transcript, captions).await,
    }
}
