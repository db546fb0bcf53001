#[derive(Debug)]
pub enum SegmenterError {
    InvalidConfiguration(String),
}

impl std::fmt::Display for SegmenterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmenterError::InvalidConfiguration(msg) => {
                write!(f, "Invalid segmenter configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for SegmenterError {}

/// Splits text into bounded, overlapping spans. Windows prefer to end at a
/// sentence boundary, then a word boundary, when one falls in the trailing
/// 20% of the window; otherwise they cut hard at `max_size` characters.
///
/// Pure and stateless: the same input always yields the same spans.
#[derive(Debug, Clone)]
pub struct Segmenter {
    max_size: usize,
    overlap: usize,
}

impl Segmenter {
    /// `overlap` must be strictly smaller than `max_size`; anything else
    /// would stall the cursor, so it is rejected here rather than mid-run.
    pub fn new(max_size: usize, overlap: usize) -> Result<Self, SegmenterError> {
        if max_size == 0 {
            return Err(SegmenterError::InvalidConfiguration(
                "max_size must be greater than zero".to_string(),
            ));
        }

        if overlap >= max_size {
            return Err(SegmenterError::InvalidConfiguration(format!(
                "overlap ({}) must be smaller than max_size ({})",
                overlap, max_size
            )));
        }

        Ok(Self { max_size, overlap })
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();

        if chars.len() <= self.max_size {
            return vec![text.to_string()];
        }

        let mut spans = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let window_end = start + self.max_size;

            if window_end >= chars.len() {
                spans.push(chars[start..].iter().collect());
                break;
            }

            let window = &chars[start..window_end];
            let cutoff = window.len() * 4 / 5;

            let mut end = window_end;
            if let Some(period) = window.iter().rposition(|&c| c == '.') {
                if period > cutoff {
                    end = start + period + 1;
                } else if let Some(space) = last_space_after(window, cutoff) {
                    end = start + space;
                }
            } else if let Some(space) = last_space_after(window, cutoff) {
                end = start + space;
            }

            spans.push(chars[start..end].iter().collect());

            // Step back by the overlap, but always advance at least one
            // character. A boundary cut can land closer to `start` than the
            // overlap reaches, so the subtraction must not wrap.
            start = end.saturating_sub(self.overlap).max(start + 1);
        }

        spans
    }
}

fn last_space_after(window: &[char], cutoff: usize) -> Option<usize> {
    window
        .iter()
        .rposition(|&c| c == ' ')
        .filter(|&pos| pos > cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_overlap_not_smaller_than_max_size() {
        assert!(Segmenter::new(100, 100).is_err());
        assert!(Segmenter::new(100, 150).is_err());
        assert!(Segmenter::new(0, 0).is_err());
        assert!(Segmenter::new(100, 99).is_ok());
    }

    #[test]
    fn test_short_text_returns_single_span() {
        let segmenter = Segmenter::new(100, 20).unwrap();
        let text = "Short text that fits in one span.";

        let spans = segmenter.segment(text);

        assert_eq!(spans, vec![text.to_string()]);
    }

    #[test]
    fn test_text_exactly_at_max_size_returns_single_span() {
        let segmenter = Segmenter::new(10, 2).unwrap();
        let text = "abcdefghij";

        assert_eq!(segmenter.segment(text), vec![text.to_string()]);
    }

    #[test]
    fn test_long_text_with_periods() {
        let segmenter = Segmenter::new(1000, 200).unwrap();
        let sentence = "This is a sentence about the retrieval pipelines. ";
        let text = sentence.repeat(50);
        assert_eq!(text.len(), 2500);

        let spans = segmenter.segment(&text);

        assert!(spans.len() >= 3 && spans.len() <= 4, "got {}", spans.len());

        // The final span runs to the end of the input.
        let last = spans.last().unwrap();
        assert!(text.ends_with(last.as_str()));

        // Consecutive spans share at least `overlap` characters.
        for pair in spans.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let tail: String = prev[prev.len() - 200..].iter().collect();
            let head: String = pair[1].chars().take(200).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_spans_cover_input_without_gaps() {
        let segmenter = Segmenter::new(1000, 200).unwrap();
        let sentence = "This is a sentence about the retrieval pipeline. ";
        let text = sentence.repeat(50);

        let spans = segmenter.segment(&text);
        assert!(spans.len() > 1);

        // Each span starts exactly `overlap` characters before the previous
        // span's end, so dropping that prefix from every span after the
        // first must reconstruct the input with no gaps.
        let mut reconstructed: String = spans[0].clone();
        for span in &spans[1..] {
            reconstructed.extend(span.chars().skip(segmenter.overlap()));
        }
        assert_eq!(reconstructed, text);
    }

    #[test]
    fn test_prefers_sentence_boundary_in_trailing_window() {
        let segmenter = Segmenter::new(100, 10).unwrap();
        // One period lands at index 89, inside the trailing 20% of the first
        // window (cutoff 80).
        let text = format!("{}. {}", "a".repeat(88), "b".repeat(120));

        let spans = segmenter.segment(&text);

        assert!(spans[0].ends_with('.'));
        assert_eq!(spans[0].chars().count(), 89);
    }

    #[test]
    fn test_falls_back_to_space_boundary() {
        let segmenter = Segmenter::new(100, 10).unwrap();
        // No periods; a single space at index 90.
        let text = format!("{} {}", "a".repeat(90), "b".repeat(120));

        let spans = segmenter.segment(&text);

        assert_eq!(spans[0].chars().count(), 90);
        assert!(!spans[0].contains(' '));
    }

    #[test]
    fn test_hard_cut_without_boundaries() {
        let segmenter = Segmenter::new(50, 10).unwrap();
        let text = "x".repeat(130);

        let spans = segmenter.segment(&text);

        assert_eq!(spans[0].chars().count(), 50);
        for span in &spans {
            assert!(span.chars().count() <= 50);
        }
        let reassembled: usize = spans.iter().map(|s| s.chars().count()).sum();
        // Overlapping repeats mean the sum exceeds the input length.
        assert!(reassembled >= 130);
    }

    #[test]
    fn test_segment_is_deterministic() {
        let segmenter = Segmenter::new(200, 40).unwrap();
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);

        assert_eq!(segmenter.segment(&text), segmenter.segment(&text));
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        let segmenter = Segmenter::new(50, 10).unwrap();
        let text = "héllo wörld. ".repeat(30);

        let spans = segmenter.segment(&text);

        assert!(spans.len() > 1);
        for span in &spans {
            assert!(span.chars().count() <= 50);
        }
    }

    #[test]
    fn test_overlap_larger_than_boundary_cut_does_not_panic() {
        // A sentence boundary at index 81 cuts the first span to 82
        // characters, shorter than the 90-character overlap. Stepping back
        // by the full overlap would underflow; the cursor must clamp and
        // keep advancing instead.
        let segmenter = Segmenter::new(100, 90).unwrap();
        let text = format!("{}. {}", "a".repeat(81), "b".repeat(200));

        let spans = segmenter.segment(&text);

        assert_eq!(spans[0], format!("{}.", "a".repeat(81)));
        assert!(spans.len() > 1);
        for span in &spans {
            assert!(!span.is_empty());
            assert!(span.chars().count() <= 100);
        }
        // The final span still reaches the end of the input.
        assert!(text.ends_with(spans.last().unwrap().as_str()));
    }
}
