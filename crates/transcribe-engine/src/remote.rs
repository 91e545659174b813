//! Whisper HTTP transcriber client.
//!
//! The service takes base64-encoded audio in a JSON body and answers with an
//! envelope carrying the transcript text, a WebVTT document, and timed
//! segments. When the service omits the VTT document, a cue track is
//! synthesized from the segments instead.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use clipscribe_caption_core::{Cue, CueTrack};
use clipscribe_common::{ClipscribeError, ClipscribeResult, ServiceConfig};

use crate::orchestrator::{ChunkTranscription, Transcriber};

#[derive(Debug, Serialize)]
struct WhisperRequest<'a> {
    audio: &'a str,
}

#[derive(Debug, Deserialize)]
struct WhisperEnvelope {
    success: bool,
    #[serde(default)]
    errors: Vec<WhisperServiceError>,
    result: Option<WhisperResult>,
}

#[derive(Debug, Deserialize)]
struct WhisperServiceError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WhisperResult {
    text: String,
    #[serde(default)]
    vtt: Option<String>,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
}

/// HTTP client for the remote Whisper transcription service.
pub struct WhisperClient {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl WhisperClient {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token: token.into(),
        }
    }

    /// Build a client from service config, reading the bearer token from
    /// the configured environment variable.
    pub fn from_config(config: &ServiceConfig) -> ClipscribeResult<Self> {
        let token = std::env::var(&config.whisper_token_env).map_err(|_| {
            ClipscribeError::Config {
                message: format!(
                    "transcription token not set (expected in ${})",
                    config.whisper_token_env
                ),
            }
        })?;
        Ok(Self::new(config.whisper_url.clone(), token))
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, audio: Vec<u8>) -> ClipscribeResult<ChunkTranscription> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&audio);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&WhisperRequest { audio: &encoded })
            .send()
            .await
            .map_err(|e| ClipscribeError::service(format!("transcription request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClipscribeError::service(format!(
                "transcription service returned {status}: {body}"
            )));
        }

        let envelope: WhisperEnvelope = response
            .json()
            .await
            .map_err(|e| ClipscribeError::service(format!("malformed transcription response: {e}")))?;

        parse_envelope(envelope)
    }
}

fn parse_envelope(envelope: WhisperEnvelope) -> ClipscribeResult<ChunkTranscription> {
    if !envelope.success {
        let message = envelope
            .errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "unknown service error".to_string());
        return Err(ClipscribeError::service(message));
    }

    let result = envelope
        .result
        .ok_or_else(|| ClipscribeError::service("response envelope is missing a result"))?;

    let cue_doc = match result.vtt {
        Some(vtt) => vtt,
        None => segments_to_track(&result.segments).write(),
    };

    Ok(ChunkTranscription {
        text: result.text,
        cue_doc,
    })
}

fn segments_to_track(segments: &[WhisperSegment]) -> CueTrack {
    CueTrack::from_cues(
        segments
            .iter()
            .map(|s| Cue::new(s.start, s.end, s.text.trim()))
            .collect(),
    )
}
