//! ClipScribe Caption Core
//!
//! Caption formats and timestamp arithmetic:
//! - **Timecode:** parse and format cue timestamps in WebVTT/SRT/ASS notations
//! - **Cue tracks:** parse, serialize, and time-shift WebVTT documents
//! - **Transcoding:** render a cue track as a styled ASS script or numbered SRT captions
//!
//! This crate is pure computation — no I/O, no network dependencies.
//! All inputs are data; all outputs are data.

pub mod ass;
pub mod srt;
pub mod timecode;
pub mod vtt;

pub use ass::{to_styled_script, SubtitleStyle};
pub use srt::to_numbered_captions;
pub use vtt::{shift_document, Cue, CueBlock, CueTrack};
