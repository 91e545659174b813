//! Transcribe a recording and write the caption artifacts.

use std::path::PathBuf;
use std::sync::Arc;

use clipscribe_caption_core::{to_numbered_captions, to_styled_script};
use clipscribe_common::AppConfig;
use clipscribe_transcribe_engine::media::{probe_duration, FfmpegAudioExtractor};
use clipscribe_transcribe_engine::remote::WhisperClient;
use clipscribe_transcribe_engine::{assemble, plan_chunks, run_transcription, RunOptions};

pub async fn run(
    media: PathBuf,
    out_dir: PathBuf,
    window_secs: f64,
    concurrency: usize,
    duration_secs: Option<f64>,
) -> anyhow::Result<()> {
    let config = AppConfig::load();

    let total_secs = match duration_secs {
        Some(secs) => secs,
        None => probe_duration(&media).await?,
    };
    println!("Transcribing: {} ({total_secs:.1}s)", media.display());

    let chunks = plan_chunks(total_secs, window_secs)?;
    println!(
        "  Planned {} chunk(s) of up to {window_secs}s, {concurrency} in flight",
        chunks.len()
    );

    let extractor = Arc::new(FfmpegAudioExtractor::new(
        &media,
        config.transcribe.sample_rate,
    ));
    let transcriber = Arc::new(WhisperClient::from_config(&config.service)?);

    let (progress_tx, mut progress_rx) = tokio::sync::watch::channel(0u8);
    let reporter = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            println!("  Progress: {}%", *progress_rx.borrow());
        }
    });

    let options = RunOptions {
        concurrency,
        progress: Some(progress_tx),
    };
    let results = run_transcription(chunks, extractor, transcriber, &options).await?;
    // The reporter loop ends once every sender is gone; ours lives in
    // `options`.
    drop(options);
    reporter.await.ok();

    let assembly = assemble(&results);
    if assembly.dropped_chunks > 0 {
        println!(
            "  Warning: {} chunk(s) failed and were dropped",
            assembly.dropped_chunks
        );
    }

    std::fs::create_dir_all(&out_dir)?;
    let stem = media
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "captions".to_string());

    let transcript_path = out_dir.join(format!("{stem}.txt"));
    let vtt_path = out_dir.join(format!("{stem}.vtt"));
    let srt_path = out_dir.join(format!("{stem}.srt"));
    let ass_path = out_dir.join(format!("{stem}.ass"));

    std::fs::write(&transcript_path, &assembly.transcript)?;
    std::fs::write(&vtt_path, assembly.cue_track.write())?;
    std::fs::write(&srt_path, to_numbered_captions(&assembly.cue_track))?;
    std::fs::write(&ass_path, to_styled_script(&assembly.cue_track))?;

    println!("  Wrote: {}", transcript_path.display());
    println!("  Wrote: {}", vtt_path.display());
    println!("  Wrote: {}", srt_path.display());
    println!("  Wrote: {}", ass_path.display());
    println!("\nTranscription complete.");

    Ok(())
}
