//! ClipScribe Transcribe Engine
//!
//! The chunked transcription pipeline:
//! - **Chunk planning:** split a recording into bounded time windows that fit
//!   under the transcription service's per-request duration ceiling
//! - **Orchestration:** dispatch windows with bounded concurrency, tolerate
//!   per-chunk failures, and join before releasing any result
//! - **Assembly:** merge per-chunk transcripts and cue tracks into one
//!   time-consistent global transcript and caption track
//!
//! Collaborator implementations (ffmpeg audio extraction, the Whisper HTTP
//! transcriber, the chapter-summary client) live in [`media`], [`remote`],
//! and [`chapters`]; the pipeline itself only sees the [`AudioExtractor`]
//! and [`Transcriber`] traits.

pub mod assemble;
pub mod chapters;
pub mod chunk;
pub mod media;
pub mod orchestrator;
pub mod remote;

pub use assemble::{assemble, Assembly};
pub use chunk::{plan_chunks, Chunk};
pub use orchestrator::{
    run_transcription, AudioExtractor, ChunkResult, ChunkTranscription, RunOptions, Transcriber,
};
