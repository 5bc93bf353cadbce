use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_SEPARATOR;

/// A half-open range `[start, end)` over the target tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// Number of tokens covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Join the covered tokens with single spaces.
    pub fn text<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let end = self.end.min(tokens.len());
        let start = self.start.min(end);
        tokens[start..end]
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(TOKEN_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_with_single_space() {
        let tokens = ["하늘이", "명한", "것을"];
        assert_eq!(Span::new(0, 2).text(&tokens), "하늘이 명한");
        assert_eq!(Span::new(2, 3).text(&tokens), "것을");
    }

    #[test]
    fn empty_span_has_empty_text() {
        let tokens = ["a", "b"];
        let span = Span::new(1, 1);
        assert!(span.is_empty());
        assert_eq!(span.text(&tokens), "");
    }
}
