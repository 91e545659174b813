//! Chunk planning: cover the media timeline with bounded windows.

use clipscribe_common::{ClipscribeError, ClipscribeResult};
use serde::{Deserialize, Serialize};

/// A bounded time window of the source media submitted as one
/// transcription request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the plan, starting at 0.
    pub index: usize,
    /// Offset of the window from the start of the media (seconds).
    pub start_secs: f64,
    /// Window length (seconds).
    pub length_secs: f64,
}

impl Chunk {
    /// End of the window on the media timeline (seconds).
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.length_secs
    }
}

/// Float slop tolerated when deciding whether a trailing sliver of the
/// timeline still needs its own chunk.
const COVERAGE_EPSILON: f64 = 1e-9;

/// Plan non-overlapping windows covering `[0, total_secs]`.
///
/// Windows are at most `window_secs` long; the final window is shortened to
/// end exactly at `total_secs` (no gap, no overlap). Fails with
/// `InvalidInput` if either argument is non-positive.
pub fn plan_chunks(total_secs: f64, window_secs: f64) -> ClipscribeResult<Vec<Chunk>> {
    if !total_secs.is_finite() || total_secs <= 0.0 {
        return Err(ClipscribeError::invalid_input(format!(
            "media duration must be positive, got {total_secs}"
        )));
    }
    if !window_secs.is_finite() || window_secs <= 0.0 {
        return Err(ClipscribeError::invalid_input(format!(
            "window length must be positive, got {window_secs}"
        )));
    }

    let mut chunks = Vec::new();
    let mut index = 0;
    let mut start_secs = 0.0;
    while start_secs < total_secs - COVERAGE_EPSILON {
        let length_secs = window_secs.min(total_secs - start_secs);
        chunks.push(Chunk {
            index,
            start_secs,
            length_secs,
        });
        index += 1;
        start_secs = index as f64 * window_secs;
    }

    tracing::debug!(
        total_secs,
        window_secs,
        count = chunks.len(),
        "planned transcription chunks"
    );

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_multiple() {
        let chunks = plan_chunks(240.0, 120.0).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].start_secs, 0.0);
        assert_eq!(chunks[0].length_secs, 120.0);
        assert_eq!(chunks[1].start_secs, 120.0);
        assert_eq!(chunks[1].end_secs(), 240.0);
    }

    #[test]
    fn test_trailing_partial_window() {
        let chunks = plan_chunks(250.0, 120.0).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(
            chunks,
            vec![
                Chunk {
                    index: 0,
                    start_secs: 0.0,
                    length_secs: 120.0
                },
                Chunk {
                    index: 1,
                    start_secs: 120.0,
                    length_secs: 120.0
                },
                Chunk {
                    index: 2,
                    start_secs: 240.0,
                    length_secs: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_single_short_recording() {
        let chunks = plan_chunks(30.0, 120.0).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].length_secs, 30.0);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(plan_chunks(0.0, 120.0).is_err());
        assert!(plan_chunks(-1.0, 120.0).is_err());
        assert!(plan_chunks(100.0, 0.0).is_err());
        assert!(plan_chunks(100.0, -5.0).is_err());
        assert!(plan_chunks(f64::NAN, 120.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_full_non_overlapping_coverage(
            total_ms in 1u64..10_000_000,
            window_ms in 1u64..1_000_000,
        ) {
            let total = total_ms as f64 / 1000.0;
            let window = window_ms as f64 / 1000.0;
            let chunks = plan_chunks(total, window).unwrap();

            prop_assert!(!chunks.is_empty());
            prop_assert_eq!(chunks[0].start_secs, 0.0);
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.index, i);
                prop_assert!(chunk.length_secs > 0.0);
                prop_assert!(chunk.length_secs <= window + 1e-9);
            }
            for pair in chunks.windows(2) {
                prop_assert!((pair[0].end_secs() - pair[1].start_secs).abs() < 1e-9);
            }
            let last = chunks.last().unwrap();
            prop_assert!((last.end_secs() - total).abs() < 1e-6);
            let sum: f64 = chunks.iter().map(|c| c.length_secs).sum();
            prop_assert!((sum - total).abs() < 1e-6);
        }
    }
}
