//! Chapter-summary generation from an assembled transcript.
//!
//! A chat-completion service turns the transcript and cue track into a
//! YouTube-style chapter list in the fixed `MM:SS - Title` line format.
//! This module only consumes the service; chapter quality is the model's
//! problem.

use serde::{Deserialize, Serialize};

use clipscribe_caption_core::timecode::parse_timestamp;
use clipscribe_common::{ClipscribeError, ClipscribeResult, ServiceConfig};

/// One chapter marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Offset from the start of the media (seconds).
    pub offset_secs: f64,
    /// Chapter title.
    pub title: String,
}

const SYSTEM_PROMPT: &str = "You are a professional video editor and content strategist. \
Your task is to generate YouTube-style chapters from video transcripts with timestamps.";

fn user_prompt(transcript: &str, vtt: &str) -> String {
    format!(
        "Analyze the following transcript and generate a list of YouTube-style \
chapters summarizing the main sections of the video. Return only the chapter \
list, one chapter per line, in the format `MM:SS - Title`, with short, \
engaging titles (max 6-8 words). Use the timestamps from the VTT captions \
for accurate chapter timing.\n\nPlain transcript:\n{transcript}\n\n\
Captions in VTT format:\n{vtt}"
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// HTTP client for the chapter-summary service.
pub struct ChapterClient {
    client: reqwest::Client,
    url: String,
    token: String,
    model: String,
}

impl ChapterClient {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token: token.into(),
            model: model.into(),
        }
    }

    /// Build a client from service config, reading the bearer token from
    /// the configured environment variable.
    pub fn from_config(config: &ServiceConfig) -> ClipscribeResult<Self> {
        let token = std::env::var(&config.chapters_token_env).map_err(|_| {
            ClipscribeError::Config {
                message: format!(
                    "chapter service token not set (expected in ${})",
                    config.chapters_token_env
                ),
            }
        })?;
        Ok(Self::new(
            config.chapters_url.clone(),
            token,
            config.chapters_model.clone(),
        ))
    }

    /// Generate the raw chapter list text for a transcript.
    pub async fn generate(&self, transcript: &str, vtt: &str) -> ClipscribeResult<String> {
        let prompt = user_prompt(transcript, vtt);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 500,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClipscribeError::service(format!("chapter request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClipscribeError::service(format!(
                "chapter service returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClipscribeError::service(format!("malformed chapter response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClipscribeError::service("chapter response has no choices"))
    }
}

/// Parse `MM:SS - Title` lines out of the service's reply.
///
/// Lines that do not match the format (prose, blank lines) are skipped.
pub fn parse_chapter_lines(text: &str) -> Vec<Chapter> {
    text.lines()
        .filter_map(|line| {
            let (stamp, title) = line.trim().split_once(" - ")?;
            let offset_secs = parse_timestamp(stamp).ok()?;
            let title = title.trim();
            if title.is_empty() {
                return None;
            }
            Some(Chapter {
                offset_secs,
                title: title.to_string(),
            })
        })
        .collect()
}
