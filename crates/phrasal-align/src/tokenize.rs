//! Whitespace tokenization of target text.

use phrasal_core::traits::IUnitProducer;

/// Splits target text on whitespace. Line breaks count as whitespace, and a
/// full-width colon always ends its token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl IUnitProducer for WhitespaceTokenizer {
    fn split(&self, text: &str) -> Vec<String> {
        text.replace('：', "： ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
