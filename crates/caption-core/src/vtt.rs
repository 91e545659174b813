//! WebVTT cue track parsing, serialization, and time shifting.
//!
//! Parsing is deliberately tolerant: a timing line whose timestamps do not
//! parse is kept as a [`CueBlock::Raw`] block and emitted verbatim on write,
//! so a partially malformed track survives a parse/shift/write cycle without
//! losing content. Non-cue lines (headers, identifiers, notes) are ignored.

use serde::{Deserialize, Serialize};

use crate::timecode::{format_vtt_timestamp, parse_timestamp};

/// WebVTT document header line.
pub const WEBVTT_HEADER: &str = "WEBVTT";

const ARROW: &str = "-->";

/// A single timed caption entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Start time in seconds.
    pub start_secs: f64,
    /// End time in seconds.
    pub end_secs: f64,
    /// Caption text. Multi-line payloads are joined with `\n`.
    pub text: String,
}

impl Cue {
    pub fn new(start_secs: f64, end_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs,
            end_secs,
            text: text.into(),
        }
    }
}

/// One block of a cue track: either a parsed cue or a timing line that
/// failed to parse and is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CueBlock {
    Cue(Cue),
    Raw(String),
}

/// An ordered sequence of cue blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueTrack {
    pub blocks: Vec<CueBlock>,
}

impl CueTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track from parsed cues only.
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        Self {
            blocks: cues.into_iter().map(CueBlock::Cue).collect(),
        }
    }

    /// Parse a WebVTT document.
    ///
    /// Never fails: malformed timing lines degrade to [`CueBlock::Raw`], and
    /// lines outside any cue block are dropped.
    pub fn parse(doc: &str) -> Self {
        let mut blocks = Vec::new();
        let mut lines = doc.lines().peekable();

        while let Some(line) = lines.next() {
            if !line.contains(ARROW) {
                // Header, cue identifier, note, or stray text — not a cue.
                continue;
            }

            match parse_timing_line(line) {
                Some((start_secs, end_secs)) => {
                    let mut text_lines = Vec::new();
                    while let Some(next) = lines.peek() {
                        if next.trim().is_empty() {
                            break;
                        }
                        text_lines.push(lines.next().unwrap().to_string());
                    }
                    blocks.push(CueBlock::Cue(Cue {
                        start_secs,
                        end_secs,
                        text: text_lines.join("\n"),
                    }));
                }
                None => {
                    blocks.push(CueBlock::Raw(line.to_string()));
                    // The orphaned payload has no timing to attach to.
                    while let Some(next) = lines.peek() {
                        if next.trim().is_empty() {
                            break;
                        }
                        lines.next();
                    }
                }
            }
        }

        Self { blocks }
    }

    /// Serialize back into a WebVTT document.
    pub fn write(&self) -> String {
        let mut out = format!("{WEBVTT_HEADER}\n\n");
        for block in &self.blocks {
            match block {
                CueBlock::Cue(cue) => {
                    out.push_str(&format!(
                        "{} {ARROW} {}\n",
                        format_vtt_timestamp(cue.start_secs),
                        format_vtt_timestamp(cue.end_secs),
                    ));
                    out.push_str(&cue.text);
                    out.push_str("\n\n");
                }
                CueBlock::Raw(line) => {
                    out.push_str(line);
                    out.push_str("\n\n");
                }
            }
        }
        out
    }

    /// Return a copy with every cue shifted by `offset` seconds.
    ///
    /// Raw blocks pass through unchanged.
    pub fn shifted(&self, offset: f64) -> Self {
        let blocks = self
            .blocks
            .iter()
            .map(|block| match block {
                CueBlock::Cue(cue) => CueBlock::Cue(Cue {
                    start_secs: cue.start_secs + offset,
                    end_secs: cue.end_secs + offset,
                    text: cue.text.clone(),
                }),
                CueBlock::Raw(line) => CueBlock::Raw(line.clone()),
            })
            .collect();
        Self { blocks }
    }

    /// Append all blocks of `other` to this track.
    pub fn append(&mut self, other: CueTrack) {
        self.blocks.extend(other.blocks);
    }

    /// Iterate over parsed cues, skipping raw blocks.
    pub fn cues(&self) -> impl Iterator<Item = &Cue> {
        self.blocks.iter().filter_map(|block| match block {
            CueBlock::Cue(cue) => Some(cue),
            CueBlock::Raw(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

/// Re-parse a WebVTT document, shift every cue by `offset`, and re-serialize.
pub fn shift_document(doc: &str, offset: f64) -> String {
    CueTrack::parse(doc).shifted(offset).write()
}

/// Parse a `start --> end` timing line. Cue settings after the end
/// timestamp are dropped.
fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let (start_raw, end_raw) = line.split_once(ARROW)?;
    let end_raw = end_raw.trim();
    let end_token = end_raw.split_whitespace().next()?;

    let start_secs = parse_timestamp(start_raw).ok()?;
    let end_secs = parse_timestamp(end_token).ok()?;
    if end_secs < start_secs {
        return None;
    }
    Some((start_secs, end_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:05.000\nHello, world!\n\n00:01:06.500 --> 00:01:10.000\nSecond cue\nwith two lines\n";

    #[test]
    fn test_parse_basic_track() {
        let track = CueTrack::parse(SAMPLE);
        let cues: Vec<_> = track.cues().collect();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].start_secs, 1.0);
        assert_eq!(cues[0].end_secs, 5.0);
        assert_eq!(cues[0].text, "Hello, world!");
        assert_eq!(cues[1].start_secs, 66.5);
        assert_eq!(cues[1].text, "Second cue\nwith two lines");
    }

    #[test]
    fn test_parse_two_field_timestamps() {
        let doc = "WEBVTT\n\n00:01.000 --> 00:05.000\nNo hours here\n";
        let track = CueTrack::parse(doc);
        let cues: Vec<_> = track.cues().collect();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_secs, 1.0);
        assert_eq!(cues[0].end_secs, 5.0);
    }

    #[test]
    fn test_parse_ignores_identifiers_and_notes() {
        let doc = "WEBVTT\n\nNOTE something\n\nintro-cue\n00:00:01.000 --> 00:00:02.000\nHi\n";
        let track = CueTrack::parse(doc);
        assert_eq!(track.len(), 1);
        assert_eq!(track.cues().next().unwrap().text, "Hi");
    }

    #[test]
    fn test_parse_drops_cue_settings() {
        let doc = "WEBVTT\n\n00:00:01.000 --> 00:00:05.000 align:center line:50%\nText\n";
        let track = CueTrack::parse(doc);
        let cue = track.cues().next().unwrap();
        assert_eq!(cue.end_secs, 5.0);
    }

    #[test]
    fn test_malformed_timing_line_is_preserved_verbatim() {
        let doc = "WEBVTT\n\n00:00:xx.000 --> 00:00:05.000\nlost text\n\n00:00:06.000 --> 00:00:07.000\nkept\n";
        let track = CueTrack::parse(doc);
        assert_eq!(track.len(), 2);
        assert_eq!(
            track.blocks[0],
            CueBlock::Raw("00:00:xx.000 --> 00:00:05.000".to_string())
        );

        // The raw line survives write and shift untouched.
        let written = track.shifted(10.0).write();
        assert!(written.contains("00:00:xx.000 --> 00:00:05.000"));
        assert!(written.contains("00:00:16.000 --> 00:00:17.000"));
    }

    #[test]
    fn test_write_round_trip() {
        let track = CueTrack::parse(SAMPLE);
        let written = track.write();
        assert!(written.starts_with("WEBVTT\n"));
        let reparsed = CueTrack::parse(&written);
        assert_eq!(reparsed, track);
    }

    #[test]
    fn test_shift_document_inverse() {
        let shifted = shift_document(SAMPLE, 120.0);
        assert!(shifted.contains("00:02:01.000 --> 00:02:05.000"));
        let back = shift_document(&shifted, -120.0);
        assert_eq!(back, CueTrack::parse(SAMPLE).write());
    }

    #[test]
    fn test_empty_document() {
        let track = CueTrack::parse("");
        assert!(track.is_empty());
        assert_eq!(track.write(), "WEBVTT\n\n");
    }

    proptest! {
        #[test]
        fn prop_shift_inverse_law(offset_ms in 0i64..3_600_000) {
            let offset = offset_ms as f64 / 1000.0;
            let doc = CueTrack::parse(SAMPLE).write();
            let there_and_back = shift_document(&shift_document(&doc, offset), -offset);
            prop_assert_eq!(there_and_back, doc);
        }
    }
}
