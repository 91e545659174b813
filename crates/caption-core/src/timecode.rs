//! Cue timestamp parsing and formatting.
//!
//! Two textual notations are accepted on input:
//! - `H:MM:SS.mmm` — three colon-separated fields, hours of any magnitude
//! - `MM:SS.mmm` — two fields, hours implicitly zero
//!
//! Transcription services emit both interchangeably, so both are supported
//! permanently rather than treating one as legacy.

use clipscribe_common::{ClipscribeError, ClipscribeResult};

/// Parse a cue timestamp into total seconds.
///
/// Returns `MalformedTimestamp` if the field count is neither 2 nor 3, or
/// any field is not numeric.
pub fn parse_timestamp(text: &str) -> ClipscribeResult<f64> {
    let raw = text.trim();
    let parts: Vec<&str> = raw.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (
            h.parse::<u64>()
                .map_err(|_| ClipscribeError::malformed_timestamp(raw))?,
            m.parse::<u64>()
                .map_err(|_| ClipscribeError::malformed_timestamp(raw))?,
            s.parse::<f64>()
                .map_err(|_| ClipscribeError::malformed_timestamp(raw))?,
        ),
        [m, s] => (
            0,
            m.parse::<u64>()
                .map_err(|_| ClipscribeError::malformed_timestamp(raw))?,
            s.parse::<f64>()
                .map_err(|_| ClipscribeError::malformed_timestamp(raw))?,
        ),
        _ => return Err(ClipscribeError::malformed_timestamp(raw)),
    };

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ClipscribeError::malformed_timestamp(raw));
    }

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

/// Format seconds as `HH:MM:SS` followed by `frac_digits` fractional digits.
///
/// Rounds (not truncates) at the precision boundary, carrying into seconds,
/// minutes, and hours when rounding crosses a boundary: `1.996` at 2 digits
/// renders as `00:00:02.00`.
pub fn format_timestamp(secs: f64, frac_digits: u32) -> String {
    let scale = 10u64.pow(frac_digits);
    // Work in integral fractional units so the carry is exact.
    let units = (secs.max(0.0) * scale as f64).round() as u64;

    let total_secs = units / scale;
    let frac = units % scale;
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;

    if frac_digits == 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!(
            "{hours:02}:{minutes:02}:{seconds:02}.{frac:0width$}",
            width = frac_digits as usize
        )
    }
}

/// Format seconds as a WebVTT timestamp: `HH:MM:SS.mmm`.
pub fn format_vtt_timestamp(secs: f64) -> String {
    format_timestamp(secs, 3)
}

/// Format seconds as an SRT timestamp: `HH:MM:SS,mmm` (comma separator).
pub fn format_srt_timestamp(secs: f64) -> String {
    format_timestamp(secs, 3).replacen('.', ",", 1)
}

/// Format seconds as an ASS timestamp: `H:MM:SS.ff` (unpadded hour,
/// centisecond precision).
pub fn format_ass_timestamp(secs: f64) -> String {
    let units = (secs.max(0.0) * 100.0).round() as u64;
    let total_secs = units / 100;
    let centis = units % 100;
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{hours}:{minutes:02}:{seconds:02}.{centis:02}")
}
