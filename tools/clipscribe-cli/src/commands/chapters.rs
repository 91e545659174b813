//! Generate a chapter list from an assembled transcript.

use std::path::PathBuf;

use clipscribe_common::AppConfig;
use clipscribe_transcribe_engine::chapters::{parse_chapter_lines, ChapterClient};

pub async fn run(transcript: PathBuf, captions: PathBuf) -> anyhow::Result<()> {
    let transcript_text = std::fs::read_to_string(&transcript)
        .map_err(|_| anyhow::anyhow!("Transcript file not found: {}", transcript.display()))?;
    let vtt = std::fs::read_to_string(&captions)
        .map_err(|_| anyhow::anyhow!("Captions file not found: {}", captions.display()))?;

    let config = AppConfig::load();
    let client = ChapterClient::from_config(&config.service)?;

    println!("Generating chapters...");
    let raw = client.generate(&transcript_text, &vtt).await?;
    let chapters = parse_chapter_lines(&raw);

    if chapters.is_empty() {
        println!("No chapters returned. Raw response:\n{raw}");
        return Ok(());
    }

    for chapter in &chapters {
        let minutes = (chapter.offset_secs / 60.0) as u64;
        let seconds = (chapter.offset_secs % 60.0) as u64;
        println!("{minutes:02}:{seconds:02} - {}", chapter.title);
    }

    Ok(())
}
