//! Property tests for the text splitter.

use askdocs_rag::TextSplitter;
use proptest::prelude::*;

/// Splitter parameters where the overlap leaves room to advance.
fn arb_params() -> impl Strategy<Value = (usize, usize)> {
    (100usize..600).prop_flat_map(|size| (Just(size), 0usize..size / 2))
}

/// **Property: splitting covers the input exactly.**
/// *For any* printable ASCII text and valid parameters, every piece is at
/// most `chunk_size` characters, pieces are the input text at positions
/// advancing by `len - overlap`, and the final piece ends the text.
mod prop_splitter_covers_input {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn pieces_cover_the_text_with_the_declared_overlap(
            text in "[ -~]{0,2000}",
            (chunk_size, chunk_overlap) in arb_params(),
        ) {
            let splitter = TextSplitter::new(chunk_size, chunk_overlap).unwrap();
            let pieces = splitter.split_text(&text);

            if text.is_empty() {
                prop_assert!(pieces.is_empty());
                return Ok(());
            }

            let mut start = 0usize;
            for (i, piece) in pieces.iter().enumerate() {
                prop_assert!(piece.len() <= chunk_size);
                prop_assert_eq!(
                    &text[start..start + piece.len()],
                    piece.as_str(),
                    "piece {} not found at its expected position",
                    i
                );
                if i + 1 < pieces.len() {
                    start += piece.len() - chunk_overlap;
                }
            }
            prop_assert_eq!(start + pieces.last().unwrap().len(), text.len());
        }

        #[test]
        fn splitting_is_deterministic(
            text in "[ -~]{0,2000}",
            (chunk_size, chunk_overlap) in arb_params(),
        ) {
            let splitter = TextSplitter::new(chunk_size, chunk_overlap).unwrap();
            prop_assert_eq!(splitter.split_text(&text), splitter.split_text(&text));
        }
    }
}
