//! Media probing and audio extraction via ffmpeg.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;

use clipscribe_common::{ClipscribeError, ClipscribeResult};

use crate::chunk::Chunk;
use crate::orchestrator::AudioExtractor;

/// Query the media duration in seconds with ffprobe.
pub async fn probe_duration(path: &Path) -> ClipscribeResult<f64> {
    if !path.exists() {
        return Err(ClipscribeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let output = tokio::process::Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipscribeError::audio(format!(
            "ffprobe failed for {}: {stderr}",
            path.display()
        )));
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ClipscribeError::audio(format!("ffprobe returned non-numeric duration: {raw}")))
}

/// Extracts chunk audio from a media file as PCM mono.
#[derive(Debug, Clone)]
pub struct FfmpegAudioExtractor {
    source: PathBuf,
    sample_rate: u32,
}

impl FfmpegAudioExtractor {
    pub fn new(source: impl Into<PathBuf>, sample_rate: u32) -> Self {
        Self {
            source: source.into(),
            sample_rate,
        }
    }
}

#[async_trait]
impl AudioExtractor for FfmpegAudioExtractor {
    async fn extract(&self, chunk: &Chunk) -> ClipscribeResult<Vec<u8>> {
        // Decode and resample rather than stream-copy: stream copy can only
        // cut at codec block boundaries, and the windows must be exact.
        let output = tokio::process::Command::new("ffmpeg")
            .arg("-ss")
            .arg(chunk.start_secs.to_string())
            .arg("-t")
            .arg(chunk.length_secs.to_string())
            .arg("-i")
            .arg(&self.source)
            .arg("-vn")
            .arg("-ac")
            .arg("1")
            .arg("-ar")
            .arg(self.sample_rate.to_string())
            .arg("-f")
            .arg("s16le")
            .arg("-nostdin")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-")
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipscribeError::audio(format!(
                "ffmpeg failed extracting chunk {}: {stderr}",
                chunk.index
            )));
        }

        tracing::debug!(
            index = chunk.index,
            bytes = output.stdout.len(),
            "extracted chunk audio"
        );
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_missing_file_is_not_found() {
        let err = probe_duration(Path::new("/nonexistent/clip.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipscribeError::FileNotFound { .. }));
    }
}
