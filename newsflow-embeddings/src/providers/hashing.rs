//! Deterministic signed-hashing embedding provider.
//!
//! Implements the feature-hashing trick: each token hashes to a bucket and
//! a sign, and tokens accumulate directly into a fixed-width vector that is
//! then L2-normalized. The sign bit keeps colliding tokens from
//! systematically inflating similarity. Title tokens count double — the
//! headline is the stronger clustering signal for wire articles. No model,
//! no network: always available, and deterministic for tests.

use newsflow_core::deadline::Deadline;
use newsflow_core::errors::NewsflowResult;
use newsflow_core::traits::IEmbeddingProvider;

/// Extra weight applied to headline tokens relative to body tokens.
const TITLE_WEIGHT: f32 = 2.0;

/// Signed feature-hashing embedding provider.
pub struct HashingProvider {
    dimensions: usize,
}

impl HashingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Mix a token's bytes into 64 bits. Bit 0 is the sign; the rest pick
    /// the bucket.
    fn token_slot(token: &str) -> u64 {
        let mut state: u64 = 0x9e3779b97f4a7c15;
        for &byte in token.as_bytes() {
            state = (state ^ byte as u64).wrapping_mul(0xbf58476d1ce4e5b9);
            state ^= state >> 27;
        }
        state
    }

    /// Lowercased words with surrounding punctuation stripped; single
    /// characters carry no signal and are dropped.
    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| word.chars().count() > 1)
    }

    fn scatter(&self, text: &str, weight: f32, out: &mut [f32]) {
        for token in Self::tokens(text) {
            let mixed = Self::token_slot(&token);
            let bucket = (mixed >> 1) as usize % self.dimensions;
            if mixed & 1 == 0 {
                out[bucket] += weight;
            } else {
                out[bucket] -= weight;
            }
        }
    }
}

impl IEmbeddingProvider for HashingProvider {
    fn embed(&self, title: &str, content: &str, _deadline: &Deadline) -> NewsflowResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];
        self.scatter(title, TITLE_WEIGHT, &mut vector);
        self.scatter(content, 1.0, &mut vector);

        let norm = vector
            .iter()
            .map(|v| (*v as f64).powi(2))
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            let inv = (1.0 / norm) as f32;
            for v in vector.iter_mut() {
                *v *= inv;
            }
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true // No external dependencies.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_article_embeds_to_the_zero_vector() {
        let p = HashingProvider::new(128);
        let v = p.embed("", "", &Deadline::none()).unwrap();
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn vector_width_matches_the_configured_dimensions() {
        let p = HashingProvider::new(768);
        let v = p
            .embed("markets", "stocks rallied on wednesday", &Deadline::none())
            .unwrap();
        assert_eq!(v.len(), 768);
    }

    #[test]
    fn nonblank_output_is_unit_length() {
        let p = HashingProvider::new(256);
        let v = p
            .embed("earthquake", "a strong earthquake struck the coast", &Deadline::none())
            .unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn embedding_is_deterministic() {
        let p = HashingProvider::new(256);
        let a = p.embed("same title", "same body", &Deadline::none()).unwrap();
        let b = p.embed("same title", "same body", &Deadline::none()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn body_text_contributes_to_the_vector() {
        let p = HashingProvider::new(256);
        let title_only = p.embed("ceasefire talks", "", &Deadline::none()).unwrap();
        let with_body = p
            .embed("ceasefire talks", "negotiators met again under mediation", &Deadline::none())
            .unwrap();
        assert_ne!(title_only, with_body);
    }

    #[test]
    fn related_articles_score_higher_than_unrelated() {
        let p = HashingProvider::new(256);
        let a = p
            .embed("central bank", "central bank raises interest rates", &Deadline::none())
            .unwrap();
        let b = p
            .embed("central bank", "central bank holds interest rates", &Deadline::none())
            .unwrap();
        let c = p
            .embed("football", "the cup final went to penalties", &Deadline::none())
            .unwrap();

        let cos_ab: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        let cos_ac: f32 = a.iter().zip(&c).map(|(x, y)| x * y).sum();
        assert!(
            cos_ab > cos_ac,
            "articles on the same story should land closer together"
        );
    }

    #[test]
    fn provider_is_always_available() {
        assert!(HashingProvider::new(64).is_available());
    }
}
