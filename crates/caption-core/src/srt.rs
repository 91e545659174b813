//! Numbered caption (SRT) generation from a cue track.

use crate::timecode::format_srt_timestamp;
use crate::vtt::CueTrack;

/// Render a cue track as numbered SRT captions.
///
/// Each block is a 1-based sequence number, a comma-decimal timestamp pair,
/// and the cue text, separated from the next block by a blank line. Raw
/// blocks carry no timing and are skipped.
pub fn to_numbered_captions(track: &CueTrack) -> String {
    let mut output = String::new();

    for (i, cue) in track.cues().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(cue.start_secs),
            format_srt_timestamp(cue.end_secs),
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vtt::{Cue, CueBlock};

    #[test]
    fn test_single_cue_block() {
        let track = CueTrack::from_cues(vec![Cue::new(5.0, 7.25, "Hi")]);
        assert_eq!(
            to_numbered_captions(&track),
            "1\n00:00:05,000 --> 00:00:07,250\nHi\n\n"
        );
    }

    #[test]
    fn test_sequence_numbers_are_one_based() {
        let track = CueTrack::from_cues(vec![
            Cue::new(0.0, 2.5, "Hello world"),
            Cue::new(3.0, 5.0, "This is a test"),
        ]);
        let srt = to_numbered_captions(&track);
        assert!(srt.contains("1\n00:00:00,000 --> 00:00:02,500\nHello world"));
        assert!(srt.contains("2\n00:00:03,000 --> 00:00:05,000\nThis is a test"));
    }

    #[test]
    fn test_raw_blocks_are_skipped() {
        let mut track = CueTrack::from_cues(vec![Cue::new(0.0, 1.0, "a")]);
        track.blocks.push(CueBlock::Raw("garbage --> line".to_string()));
        track.blocks.push(CueBlock::Cue(Cue::new(2.0, 3.0, "b")));

        let srt = to_numbered_captions(&track);
        assert!(!srt.contains("garbage"));
        assert!(srt.contains("2\n00:00:02,000 --> 00:00:03,000\nb"));
    }
}
