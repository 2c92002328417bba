//! Test Data Factory
//!
//! Deterministic encoder stubs and question corpora for journey tests. The
//! bag-of-words encoder produces genuinely similar vectors for texts with
//! overlapping vocabulary, so semantic-stage behavior can be exercised
//! without model inference.

use quizforge_core::{Embedding, EncoderError, TextEncoder};

/// Vocabulary-projection encoder: each known word is one dimension
pub struct BagOfWordsEncoder {
    vocabulary: Vec<String>,
}

impl BagOfWordsEncoder {
    /// Build an encoder over the union of words in `corpus`
    pub fn from_corpus(corpus: &[&str]) -> Self {
        let mut vocabulary: Vec<String> = corpus
            .iter()
            .flat_map(|text| text.split_whitespace())
            .map(|word| normalize_word(word))
            .filter(|word| !word.is_empty())
            .collect();
        vocabulary.sort();
        vocabulary.dedup();
        Self { vocabulary }
    }
}

fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

impl TextEncoder for BagOfWordsEncoder {
    fn model_name(&self) -> &str {
        "bag-of-words-fixture"
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    fn encode(&self, text: &str) -> Result<Embedding, EncoderError> {
        if text.trim().is_empty() {
            return Err(EncoderError::InvalidInput("empty text".to_string()));
        }

        let mut vector = vec![0.0_f32; self.vocabulary.len()];
        for word in text.split_whitespace() {
            let normalized = normalize_word(word);
            if let Ok(slot) = self.vocabulary.binary_search(&normalized) {
                vector[slot] += 1.0;
            }
        }

        let mut embedding = Embedding::new(vector);
        embedding.normalize();
        Ok(embedding)
    }
}

/// A small question corpus spanning a few topics
pub fn sample_corpus() -> Vec<(&'static str, &'static str)> {
    vec![
        ("q-arrays-1", "Write an algorithm to find the maximum element in an array of size 100."),
        ("q-arrays-2", "Design a program that computes the sum within an array containing 50 elements."),
        ("q-lists-1", "How would you determine the minimum element from a linked list having 500 entries?"),
        ("q-trees-1", "Write an algorithm to find the frequency of a number in a binary tree of size 1000."),
        ("q-graphs-1", "Design a program that computes the sum within a graph containing 10 elements."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_texts_score_high() {
        let corpus = ["find the maximum element", "find the largest element"];
        let encoder = BagOfWordsEncoder::from_corpus(&corpus);

        let a = encoder.encode(corpus[0]).unwrap();
        let b = encoder.encode(corpus[1]).unwrap();
        let unrelated = encoder.encode("zzz qqq").unwrap();

        assert!(a.cosine_similarity(&b) > 0.7);
        assert!(a.cosine_similarity(&unrelated) < 0.1);
    }
}
