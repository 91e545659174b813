//! Transcript and cue track assembly from per-chunk results.

use std::collections::HashSet;

use clipscribe_caption_core::CueTrack;

use crate::orchestrator::ChunkResult;

/// The merged output of a transcription run.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Global transcript: distinct chunk texts, space-joined.
    pub transcript: String,
    /// Global cue track on the media timeline, in chunk-index order.
    pub cue_track: CueTrack,
    /// Number of failed chunks dropped from the output.
    pub dropped_chunks: usize,
}

/// Merge chunk results into one transcript and one global cue track.
///
/// Failed chunks are dropped. Results are ordered by chunk index, not
/// arrival order. Chunk texts are deduplicated by exact trimmed string:
/// windowed transcription occasionally re-emits an already-seen sentence at
/// a chunk boundary, and the whole-chunk-text match is the policy that
/// suppresses it. Each chunk's local cue track is shifted by the chunk's
/// start offset onto the global timeline.
pub fn assemble(results: &[ChunkResult]) -> Assembly {
    let mut ordered: Vec<&ChunkResult> = results.iter().collect();
    ordered.sort_by_key(|r| r.chunk.index);

    let mut seen_texts: HashSet<String> = HashSet::new();
    let mut transcript_parts: Vec<&str> = Vec::new();
    let mut cue_track = CueTrack::new();
    let mut dropped_chunks = 0;

    for result in ordered {
        let Some(transcription) = &result.transcription else {
            dropped_chunks += 1;
            continue;
        };

        let trimmed = transcription.text.trim();
        if !trimmed.is_empty() && seen_texts.insert(trimmed.to_string()) {
            transcript_parts.push(trimmed);
        }

        let local = CueTrack::parse(&transcription.cue_doc);
        cue_track.append(local.shifted(result.chunk.start_secs));
    }

    if dropped_chunks > 0 {
        tracing::warn!(dropped_chunks, "assembled a partial transcript");
    }

    Assembly {
        transcript: transcript_parts.join(" "),
        cue_track,
        dropped_chunks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::orchestrator::ChunkTranscription;

    fn chunk(index: usize, start_secs: f64, length_secs: f64) -> Chunk {
        Chunk {
            index,
            start_secs,
            length_secs,
        }
    }

    fn ok_result(chunk: Chunk, text: &str, cue_doc: &str) -> ChunkResult {
        ChunkResult {
            chunk,
            transcription: Some(ChunkTranscription {
                text: text.to_string(),
                cue_doc: cue_doc.to_string(),
            }),
        }
    }

    fn failed_result(chunk: Chunk) -> ChunkResult {
        ChunkResult {
            chunk,
            transcription: None,
        }
    }

    const HELLO_VTT: &str = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHello\n";

    #[test]
    fn test_duplicate_chunk_text_appears_once() {
        let results = vec![
            ok_result(chunk(0, 0.0, 120.0), " Hello ", ""),
            ok_result(chunk(1, 120.0, 120.0), "Hello", ""),
        ];
        let assembly = assemble(&results);
        assert_eq!(assembly.transcript, "Hello");
    }

    #[test]
    fn test_order_follows_chunk_index_not_arrival() {
        let in_order = vec![
            ok_result(chunk(0, 0.0, 120.0), "first", HELLO_VTT),
            ok_result(chunk(1, 120.0, 120.0), "second", HELLO_VTT),
        ];
        let reversed: Vec<ChunkResult> = in_order.iter().rev().cloned().collect();

        let a = assemble(&in_order);
        let b = assemble(&reversed);
        assert_eq!(a.transcript, "first second");
        assert_eq!(b.transcript, a.transcript);
        assert_eq!(b.cue_track, a.cue_track);
    }

    #[test]
    fn test_cues_are_shifted_onto_global_timeline() {
        let results = vec![
            ok_result(chunk(0, 0.0, 120.0), "a", HELLO_VTT),
            ok_result(chunk(1, 120.0, 120.0), "b", HELLO_VTT),
        ];
        let assembly = assemble(&results);
        let cues: Vec<_> = assembly.cue_track.cues().collect();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].start_secs, 0.0);
        assert_eq!(cues[0].end_secs, 1.0);
        assert_eq!(cues[1].start_secs, 120.0);
        assert_eq!(cues[1].end_secs, 121.0);
    }

    #[test]
    fn test_failed_chunks_are_dropped_and_counted() {
        let results = vec![
            ok_result(chunk(0, 0.0, 120.0), "kept", HELLO_VTT),
            failed_result(chunk(1, 120.0, 120.0)),
        ];
        let assembly = assemble(&results);
        assert_eq!(assembly.transcript, "kept");
        assert_eq!(assembly.dropped_chunks, 1);
        assert_eq!(assembly.cue_track.cues().count(), 1);
    }

    #[test]
    fn test_empty_chunk_text_is_not_appended() {
        let results = vec![
            ok_result(chunk(0, 0.0, 120.0), "   ", ""),
            ok_result(chunk(1, 120.0, 120.0), "words", ""),
        ];
        let assembly = assemble(&results);
        assert_eq!(assembly.transcript, "words");
    }
}
