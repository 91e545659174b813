//! Bounded-concurrency transcription orchestration.
//!
//! Dispatches each planned chunk to the audio extractor and transcriber with
//! at most `concurrency` requests in flight, joins on every task, and hands
//! back results tagged with their originating chunk in plan order —
//! independent of network completion order. Per-chunk failures are absorbed;
//! only a run where every chunk fails surfaces as an error.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

use clipscribe_common::{ClipscribeError, ClipscribeResult};

use crate::chunk::Chunk;

/// Extracts one chunk's audio from the source media.
///
/// Implementations produce PCM mono at the transcriber's expected sample
/// rate (16 kHz).
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    async fn extract(&self, chunk: &Chunk) -> ClipscribeResult<Vec<u8>>;
}

/// Transcribes one chunk's audio.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Vec<u8>) -> ClipscribeResult<ChunkTranscription>;
}

/// What the transcriber returns for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkTranscription {
    /// Plain transcript text for the chunk.
    pub text: String,
    /// Chunk-local WebVTT document. May be empty for silent input.
    pub cue_doc: String,
}

/// Outcome of one chunk. `transcription` is `None` when the chunk failed.
#[derive(Debug, Clone)]
pub struct ChunkResult {
    pub chunk: Chunk,
    pub transcription: Option<ChunkTranscription>,
}

impl ChunkResult {
    pub fn failed(&self) -> bool {
        self.transcription.is_none()
    }
}

/// Options for a transcription run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Maximum simultaneous chunk requests. Clamped to a minimum of 1
    /// (fully sequential).
    pub concurrency: usize,

    /// Optional progress channel receiving a percentage in `[0, 100]`.
    /// The published value never regresses and reaches 100 on completion.
    pub progress: Option<watch::Sender<u8>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            progress: None,
        }
    }
}

/// Transcribe every chunk and return results in plan order.
///
/// Suspends until all dispatched requests settle; no partial result is
/// released before the join barrier. Fails only when every chunk failed.
pub async fn run_transcription(
    chunks: Vec<Chunk>,
    extractor: Arc<dyn AudioExtractor>,
    transcriber: Arc<dyn Transcriber>,
    options: &RunOptions,
) -> ClipscribeResult<Vec<ChunkResult>> {
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let total = chunks.len();
    let limit = options.concurrency.max(1);
    tracing::info!(total, limit, "starting transcription run");

    let semaphore = Arc::new(Semaphore::new(limit));
    let settled = Arc::new(AtomicUsize::new(0));
    let mut tasks: JoinSet<(usize, ChunkResult)> = JoinSet::new();

    for (slot, chunk) in chunks.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let extractor = Arc::clone(&extractor);
        let transcriber = Arc::clone(&transcriber);
        let settled = Arc::clone(&settled);
        let progress = options.progress.clone();

        tasks.spawn(async move {
            // Holding the Result keeps the permit alive; the semaphore is
            // never closed.
            let _permit = semaphore.acquire().await;

            let transcription =
                transcribe_chunk(&chunk, extractor.as_ref(), transcriber.as_ref()).await;

            let done = settled.fetch_add(1, Ordering::AcqRel) + 1;
            if let Some(progress) = &progress {
                let pct = ((done * 100) / total) as u8;
                // A slower sibling may report after a faster, later one;
                // keep the published value monotone.
                progress.send_modify(|current| *current = (*current).max(pct));
            }

            (slot, ChunkResult {
                chunk,
                transcription,
            })
        });
    }

    // Join barrier: every slot is filled before any result is released.
    let mut slots: Vec<Option<ChunkResult>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (slot, result) = joined
            .map_err(|e| ClipscribeError::transcription(format!("chunk task panicked: {e}")))?;
        slots[slot] = Some(result);
    }

    let results: Vec<ChunkResult> = slots.into_iter().flatten().collect();
    let failed = results.iter().filter(|r| r.failed()).count();
    if failed == results.len() {
        return Err(ClipscribeError::AllChunksFailed { failed });
    }
    if failed > 0 {
        tracing::warn!(failed, total, "transcription run completed with dropped chunks");
    } else {
        tracing::info!(total, "transcription run completed");
    }

    Ok(results)
}

/// Run one chunk through extraction and transcription, absorbing failures.
async fn transcribe_chunk(
    chunk: &Chunk,
    extractor: &dyn AudioExtractor,
    transcriber: &dyn Transcriber,
) -> Option<ChunkTranscription> {
    let audio = match extractor.extract(chunk).await {
        Ok(audio) => audio,
        Err(e) => {
            tracing::warn!(index = chunk.index, error = %e, "audio extraction failed");
            return None;
        }
    };

    match transcriber.transcribe(audio).await {
        Ok(transcription) => Some(transcription),
        Err(e) => {
            tracing::warn!(index = chunk.index, error = %e, "transcription failed");
            None
        }
    }
}
