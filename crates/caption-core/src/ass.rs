//! Styled subtitle script (ASS) generation from a cue track.
//!
//! The style catalogue is a fixed set of three presentation styles assigned
//! to cues in round-robin order by cue position. Emphasis vocabulary words
//! are wrapped in bold-toggle override tags.

use std::sync::OnceLock;

use regex::Regex;

use crate::timecode::format_ass_timestamp;
use crate::vtt::CueTrack;

/// A named presentation style for dialogue lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleStyle {
    Default,
    Emphasis,
    Accent,
}

impl SubtitleStyle {
    pub const ALL: [SubtitleStyle; 3] = [
        SubtitleStyle::Default,
        SubtitleStyle::Emphasis,
        SubtitleStyle::Accent,
    ];

    /// Style for the cue at `position` in the track (round-robin).
    pub fn for_position(position: usize) -> Self {
        Self::ALL[position % Self::ALL.len()]
    }

    /// Style name as referenced by dialogue lines.
    pub fn name(&self) -> &'static str {
        match self {
            SubtitleStyle::Default => "Default",
            SubtitleStyle::Emphasis => "Emphasis",
            SubtitleStyle::Accent => "Accent",
        }
    }

    /// The `Style:` definition line for the `[V4+ Styles]` section.
    fn style_line(&self) -> &'static str {
        match self {
            SubtitleStyle::Default => {
                "Style: Default,Arial,48,&H00FFFFFF,&H00FFFFFF,&H00000000,&H99000000,0,0,0,0,100,100,0,0,1,2,1,2,60,60,40,1"
            }
            SubtitleStyle::Emphasis => {
                "Style: Emphasis,Arial,48,&H0000FFFF,&H00FFFFFF,&H00000000,&H99000000,0,0,0,0,100,100,0,0,1,2,1,2,60,60,40,1"
            }
            SubtitleStyle::Accent => {
                "Style: Accent,Arial,48,&H00F7A6CB,&H00FFFFFF,&H00000000,&H99000000,0,0,0,0,100,100,0,0,1,2,1,2,60,60,40,1"
            }
        }
    }
}

/// Words that get bold emphasis in dialogue text (whole word,
/// case-insensitive).
const EMPHASIS_WORDS: [&str; 5] = ["important", "key", "main", "critical", "essential"];

/// Cues at or below this length skip emphasis markup.
const EMPHASIS_MIN_CHARS: usize = 20;

fn emphasis_regex() -> &'static Regex {
    static EMPHASIS_REGEX: OnceLock<Regex> = OnceLock::new();
    EMPHASIS_REGEX.get_or_init(|| {
        let pattern = format!(r"(?i)\b({})\b", EMPHASIS_WORDS.join("|"));
        Regex::new(&pattern).expect("emphasis pattern is valid")
    })
}

/// Render a cue track as a complete ASS document.
///
/// Raw blocks carry no timing and are skipped.
pub fn to_styled_script(track: &CueTrack) -> String {
    let mut out = String::new();

    out.push_str("[Script Info]\n");
    out.push_str("Title: ClipScribe Captions\n");
    out.push_str("ScriptType: v4.00+\n");
    out.push_str("PlayResX: 1280\n");
    out.push_str("PlayResY: 720\n");
    out.push('\n');

    out.push_str("[V4+ Styles]\n");
    out.push_str("Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n");
    for style in SubtitleStyle::ALL {
        out.push_str(style.style_line());
        out.push('\n');
    }
    out.push('\n');

    out.push_str("[Events]\n");
    out.push_str("Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n");

    for (position, cue) in track.cues().enumerate() {
        let style = SubtitleStyle::for_position(position);
        let text = render_dialogue_text(&cue.text);
        out.push_str(&format!(
            "Dialogue: 0,{},{},{},,0,0,0,,{}\n",
            format_ass_timestamp(cue.start_secs),
            format_ass_timestamp(cue.end_secs),
            style.name(),
            text,
        ));
    }

    out
}

/// Escape line breaks and apply emphasis markup to a cue payload.
fn render_dialogue_text(text: &str) -> String {
    let escaped = text.replace('\n', "\\N");
    if text.chars().count() <= EMPHASIS_MIN_CHARS {
        return escaped;
    }
    emphasis_regex()
        .replace_all(&escaped, r"{\b1}${1}{\b0}")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vtt::Cue;

    fn track(cues: Vec<Cue>) -> CueTrack {
        CueTrack::from_cues(cues)
    }

    #[test]
    fn test_header_and_styles_present() {
        let script = to_styled_script(&track(vec![]));
        assert!(script.starts_with("[Script Info]"));
        assert!(script.contains("[V4+ Styles]"));
        assert!(script.contains("Style: Default,"));
        assert!(script.contains("Style: Emphasis,"));
        assert!(script.contains("Style: Accent,"));
        assert!(script.contains("[Events]"));
    }

    #[test]
    fn test_styles_rotate_by_position() {
        let cues = (0..4)
            .map(|i| Cue::new(i as f64, i as f64 + 1.0, format!("cue {i}")))
            .collect();
        let script = to_styled_script(&track(cues));
        let styles: Vec<_> = script
            .lines()
            .filter(|l| l.starts_with("Dialogue:"))
            .map(|l| l.split(',').nth(3).unwrap().to_string())
            .collect();
        assert_eq!(styles, ["Default", "Emphasis", "Accent", "Default"]);
    }

    #[test]
    fn test_timestamps_use_ass_notation() {
        let script = to_styled_script(&track(vec![Cue::new(5.0, 7.25, "Hi")]));
        assert!(script.contains("Dialogue: 0,0:00:05.00,0:00:07.25,Default,,0,0,0,,Hi"));
    }

    #[test]
    fn test_newlines_become_line_break_markup() {
        let script = to_styled_script(&track(vec![Cue::new(0.0, 1.0, "one\ntwo")]));
        assert!(script.contains("one\\Ntwo"));
    }

    #[test]
    fn test_emphasis_applied_to_long_cues() {
        let script = to_styled_script(&track(vec![Cue::new(
            0.0,
            2.0,
            "This is the most Important point of the talk",
        )]));
        assert!(script.contains(r"{\b1}Important{\b0}"));
    }

    #[test]
    fn test_emphasis_skipped_below_length_threshold() {
        let script = to_styled_script(&track(vec![Cue::new(0.0, 2.0, "key point here")]));
        assert!(script.contains(",key point here"));
        assert!(!script.contains(r"{\b1}"));
    }

    #[test]
    fn test_emphasis_requires_whole_word() {
        let script = to_styled_script(&track(vec![Cue::new(
            0.0,
            2.0,
            "the keyboard and the mainframe were unimportant",
        )]));
        assert!(!script.contains(r"{\b1}"));
    }
}
