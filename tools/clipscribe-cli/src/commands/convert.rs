//! Convert a WebVTT caption track to SRT or ASS.

use std::path::PathBuf;

use clipscribe_caption_core::{to_numbered_captions, to_styled_script, CueTrack};

pub fn run(captions: PathBuf, format: String, output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&captions)
        .map_err(|_| anyhow::anyhow!("Captions file not found: {}", captions.display()))?;
    let track = CueTrack::parse(&content);
    println!(
        "Loaded {} cue(s) from {}",
        track.cues().count(),
        captions.display()
    );

    let (rendered, extension) = match format.as_str() {
        "srt" => (to_numbered_captions(&track), "srt"),
        "ass" => (to_styled_script(&track), "ass"),
        other => anyhow::bail!("Unsupported format: {other} (expected srt or ass)"),
    };

    let output = output.unwrap_or_else(|| captions.with_extension(extension));
    std::fs::write(&output, rendered)?;
    println!("Wrote: {}", output.display());

    Ok(())
}
