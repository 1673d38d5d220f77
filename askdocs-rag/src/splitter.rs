//! Text splitting into fixed-size overlapping pieces.

use crate::document::Document;
use crate::error::{RagError, Result};

/// Break-point preference, most desirable first: paragraph, sentence, word.
const SEPARATORS: [&str; 3] = ["\n\n", ". ", " "];

/// Splits text into pieces of at most `chunk_size` characters, with
/// adjacent pieces sharing a `chunk_overlap`-character tail.
///
/// Each window prefers to end at a paragraph, sentence, or word boundary
/// found in its second half, falling back to a hard cut. Splitting is
/// deterministic: the same input always yields the same pieces.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    /// Create a splitter.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if `chunk_size` is zero or the overlap
    /// does not leave room for the window to advance.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::Config("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size / 2 {
            return Err(RagError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than half of chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Split raw text into overlapping pieces.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        loop {
            let hard_end = floor_boundary(text, start + self.chunk_size);
            if hard_end >= text.len() {
                pieces.push(text[start..].to_string());
                break;
            }

            let end = self.break_point(text, start, hard_end);
            pieces.push(text[start..end].to_string());

            let mut next = end.saturating_sub(self.chunk_overlap).max(start + 1);
            while next < text.len() && !text.is_char_boundary(next) {
                next += 1;
            }
            start = next;
        }
        pieces
    }

    /// Split documents; each piece inherits the parent's metadata
    /// unchanged.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Document> {
        documents
            .iter()
            .flat_map(|document| {
                self.split_text(&document.text).into_iter().map(|text| Document {
                    text,
                    metadata: document.metadata.clone(),
                })
            })
            .collect()
    }

    /// Pick the window's end: the last separator occurrence in its second
    /// half, or the hard cut when none is found.
    fn break_point(&self, text: &str, start: usize, hard_end: usize) -> usize {
        let search_from = floor_boundary(text, start + self.chunk_size / 2);
        let window = &text[search_from..hard_end];
        for separator in SEPARATORS {
            if let Some(pos) = window.rfind(separator) {
                return search_from + pos + separator.len();
            }
        }
        hard_end
    }
}

/// Largest char boundary at or below `index`.
fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_piece() {
        let splitter = TextSplitter::new(500, 50).unwrap();
        assert_eq!(splitter.split_text("short"), vec!["short".to_string()]);
    }

    #[test]
    fn empty_text_yields_no_pieces() {
        let splitter = TextSplitter::new(500, 50).unwrap();
        assert!(splitter.split_text("").is_empty());
    }

    #[test]
    fn pieces_respect_the_size_bound_and_overlap() {
        let text = "word ".repeat(240); // 1200 characters
        let splitter = TextSplitter::new(500, 50).unwrap();
        let pieces = splitter.split_text(&text);

        assert!(pieces.len() > 1);
        for piece in &pieces {
            assert!(piece.len() <= 500, "piece of {} chars exceeds the bound", piece.len());
        }
        for pair in pieces.windows(2) {
            let tail = &pair[0][pair[0].len() - 50..];
            assert!(pair[1].starts_with(tail), "adjacent pieces share less than the overlap");
        }
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "Sentence one. Sentence two. Sentence three. ".repeat(30);
        let splitter = TextSplitter::new(500, 50).unwrap();
        assert_eq!(splitter.split_text(&text), splitter.split_text(&text));
    }

    #[test]
    fn prefers_sentence_boundaries() {
        let text = "A sentence that ends here. ".repeat(40);
        let splitter = TextSplitter::new(500, 50).unwrap();
        let pieces = splitter.split_text(&text);
        assert!(pieces[0].ends_with(". "), "piece did not break at a sentence: {:?}", pieces[0]);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "héllo wörld ".repeat(100);
        let splitter = TextSplitter::new(100, 20).unwrap();
        // Would panic on a non-boundary slice.
        let pieces = splitter.split_text(&text);
        assert!(pieces.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn rejects_overlap_too_large_for_the_window() {
        assert!(TextSplitter::new(100, 60).is_err());
        assert!(TextSplitter::new(0, 0).is_err());
    }

    #[test]
    fn split_documents_inherit_metadata() {
        let doc = Document::new("word ".repeat(240)).with_metadata("source", "https://example.com");
        let splitter = TextSplitter::new(500, 50).unwrap();
        let pieces = splitter.split_documents(std::slice::from_ref(&doc));
        assert!(pieces.len() > 1);
        for piece in &pieces {
            assert_eq!(piece.metadata, doc.metadata);
        }
    }
}
