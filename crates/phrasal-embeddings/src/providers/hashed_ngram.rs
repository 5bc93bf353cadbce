//! Character n-gram feature hashing provider.
//!
//! Hashes 1-, 2- and 3-character grams of each whitespace-separated word
//! into fixed-dimension buckets. Works on Han and Hangul text without a
//! tokenizer. Lexical only: it does not relate a source phrase to its
//! translation, so production runs use the `api` provider.

use phrasal_core::errors::PhrasalResult;
use phrasal_core::traits::IEmbeddingProvider;

const MAX_GRAM: usize = 3;

/// Deterministic n-gram hashing embedding provider.
pub struct HashedNgramProvider {
    dimensions: usize,
}

impl HashedNgramProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a over the gram's UTF-8 bytes.
    fn hash_gram(gram: &[char]) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        let mut buf = [0u8; 4];
        for c in gram {
            for b in c.encode_utf8(&mut buf).as_bytes() {
                h ^= *b as u64;
                h = h.wrapping_mul(0x100000001b3);
            }
        }
        h
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];

        for word in text.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for n in 1..=MAX_GRAM.min(chars.len()) {
                for gram in chars.windows(n) {
                    let bucket = (Self::hash_gram(gram) % self.dimensions as u64) as usize;
                    // Longer grams carry more identity.
                    vec[bucket] += n as f32;
                }
            }
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashedNgramProvider {
    fn embed_batch(&self, texts: &[String]) -> PhrasalResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-ngram"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_one(p: &HashedNgramProvider, text: &str) -> Vec<f32> {
        p.embed_batch(&[text.to_string()]).unwrap().remove(0)
    }

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn empty_text_returns_zero_vector() {
        let p = HashedNgramProvider::new(128);
        let v = embed_one(&p, "");
        assert_eq!(v.len(), 128);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn output_is_normalized() {
        let p = HashedNgramProvider::new(256);
        let v = embed_one(&p, "배우고 때로 익히면");
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn deterministic() {
        let p = HashedNgramProvider::new(256);
        assert_eq!(embed_one(&p, "天命之謂性"), embed_one(&p, "天命之謂性"));
    }

    #[test]
    fn batch_preserves_order_and_count() {
        let p = HashedNgramProvider::new(64);
        let texts = vec!["子曰".to_string(), "學而時習之".to_string(), String::new()];
        let batch = p.embed_batch(&texts).unwrap();
        assert_eq!(batch.len(), 3);
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(batch[i], embed_one(&p, text));
        }
    }

    #[test]
    fn shared_grams_raise_similarity() {
        let p = HashedNgramProvider::new(512);
        let a = embed_one(&p, "성이라 한다");
        let b = embed_one(&p, "성이라 하였다");
        let c = embed_one(&p, "공자가 말하길");
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }

    #[test]
    fn zero_dimensions_clamped_to_one() {
        let p = HashedNgramProvider::new(0);
        assert_eq!(p.dimensions(), 1);
        assert_eq!(embed_one(&p, "x").len(), 1);
    }
}
