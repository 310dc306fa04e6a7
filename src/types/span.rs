use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open range `[start, end)` of token indices in a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Index of the final token covered by the span
    pub fn last(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest span covering both spans
    pub fn combine(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(3, 6);
        assert_eq!(span.length(), 3);
        assert_eq!(span.last(), Some(5));
        assert!(span.contains_index(3));
        assert!(!span.contains_index(6));
        assert!(span.contains(&Span::new(4, 6)));
        assert!(!span.contains(&Span::new(2, 4)));
    }

    #[test]
    fn test_span_overlap_and_combine() {
        let a = Span::new(1, 4);
        let b = Span::new(3, 8);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&Span::new(4, 5)));
        assert_eq!(a.combine(&b), Span::new(1, 8));
        assert_eq!(Span::new(2, 2).last(), None);
    }
}
