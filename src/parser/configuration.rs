use std::fmt;

use crate::data::TaggedToken;
use crate::digraph::{SentenceGraph, Token};
use crate::parser::constants::DOES_NOT_EXIST;
use crate::types::{DependencyType, PosTag};

/// What sits at a structural position of the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation<'a> {
    /// The position does not exist
    Null,
    Root,
    Word(&'a Token),
}

impl Annotation<'_> {
    pub fn tag(&self) -> PosTag {
        match self {
            Annotation::Null => PosTag::X,
            Annotation::Root => PosTag::RootTag,
            Annotation::Word(token) => token.tag,
        }
    }
}

/// Shift-reduce parser state over one sentence.
///
/// The stack starts as `[0]` (ROOT); the buffer holds `1..=n` and is consumed
/// by advancing `bp` rather than by removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    graph: SentenceGraph,
    stack: Vec<usize>,
    buffer: Vec<usize>,
    bp: usize,
}

impl Configuration {
    pub fn new(words: &[TaggedToken]) -> Self {
        Self::from_graph(SentenceGraph::from_tagged(words))
    }

    /// Start from the tokens of a gold tree; the gold arcs are not carried over
    pub fn from_gold(gold: &SentenceGraph) -> Self {
        Self::from_graph(gold.without_arcs())
    }

    fn from_graph(graph: SentenceGraph) -> Self {
        let buffer = (1..=graph.n()).collect();
        Self {
            graph,
            stack: vec![0],
            buffer,
            bp: 0,
        }
    }

    pub fn graph(&self) -> &SentenceGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SentenceGraph {
        &mut self.graph
    }

    pub fn into_graph(self) -> SentenceGraph {
        self.graph
    }

    pub fn stack(&self) -> &[usize] {
        &self.stack
    }

    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer.len() - self.bp
    }

    /// The `i`-th entry from the top of the stack (0 = top)
    pub fn stack_value(&self, i: usize) -> Option<usize> {
        let size = self.stack_size();
        if i >= size {
            return DOES_NOT_EXIST;
        }
        Some(self.stack[size - 1 - i])
    }

    /// The `i`-th unread buffer entry
    pub fn buffer_value(&self, i: usize) -> Option<usize> {
        if i >= self.buffer_size() {
            return DOES_NOT_EXIST;
        }
        Some(self.buffer[self.bp + i])
    }

    /// Move the next buffer entry onto the stack; false once the buffer is empty
    pub fn shift(&mut self) -> bool {
        match self.buffer_value(0) {
            Some(i) => {
                self.bp += 1;
                self.stack.push(i);
                true
            }
            None => false,
        }
    }

    pub fn remove_top_stack(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    /// Remove the entry just below the top, keeping the top in place
    pub fn remove_second_top_stack(&mut self) -> bool {
        let size = self.stack_size();
        if size < 2 {
            return false;
        }
        self.stack.remove(size - 2);
        true
    }

    fn in_sentence(&self, k: Option<usize>) -> Option<usize> {
        k.filter(|&k| k <= self.graph.n())
    }

    /// The `cnt`-th left child of `k`, counting outward from the far left
    pub fn lc(&self, k: Option<usize>, cnt: usize) -> Option<usize> {
        let k = self.in_sentence(k)?;
        (1..k)
            .filter(|&i| self.graph.head(i) == Some(k))
            .nth(cnt.checked_sub(1)?)
    }

    /// The `cnt`-th right child of `k`, counting inward from the far right
    pub fn rc(&self, k: Option<usize>, cnt: usize) -> Option<usize> {
        let k = self.in_sentence(k)?;
        ((k + 1)..=self.graph.n())
            .rev()
            .filter(|&i| self.graph.head(i) == Some(k))
            .nth(cnt.checked_sub(1)?)
    }

    /// Relation of the token at `i`; `NoDepType` for ROOT and missing positions
    pub fn label(&self, i: Option<usize>) -> DependencyType {
        match i {
            None | Some(0) => DependencyType::NoDepType,
            Some(i) => self.graph.label(i),
        }
    }

    pub fn annotation(&self, i: Option<usize>) -> Annotation<'_> {
        match i {
            None => Annotation::Null,
            Some(0) => Annotation::Root,
            Some(i) => self
                .graph
                .token(i)
                .map_or(Annotation::Null, Annotation::Word),
        }
    }

    /// True if `i` has a gold child that is not yet attached to it here
    pub fn has_other_children(&self, i: usize, gold: &SentenceGraph) -> bool {
        (1..=gold.n()).any(|j| gold.head(j) == Some(i) && self.graph.head(j) != Some(i))
    }

    pub fn is_terminal(&self) -> bool {
        self.stack_size() == 1 && self.buffer_size() == 0
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stack: {:?} Buffer({}): {:?}",
            self.stack,
            self.bp,
            &self.buffer[self.bp..]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn test_stack_append_remove() {
        let gold = testutil::graph(testutil::MED);
        let mut c = Configuration::from_gold(&gold);
        assert_eq!(c.graph().arc_count(), 0);

        c.stack.push(200);
        assert_eq!(c.stack(), &[0, 200]);
        assert!(c.remove_top_stack());
        assert_eq!(c.stack(), &[0]);

        c.stack.push(200);
        assert!(c.remove_second_top_stack());
        assert_eq!(c.stack(), &[200]);
        assert!(!c.remove_second_top_stack());
    }

    #[test]
    fn test_stack_value_out_of_range() {
        let mut c = Configuration::new(&[]);
        c.stack = vec![0, 1, 2, 5, 6];

        assert_eq!(c.stack_value(0), Some(6));
        assert_eq!(c.stack_value(1), Some(5));
        assert_eq!(c.stack_value(4), Some(0));
        assert_eq!(c.stack_value(5), DOES_NOT_EXIST);
        assert_eq!(c.stack_value(usize::MAX), DOES_NOT_EXIST);
    }

    #[test]
    fn test_shift_until_exhausted() {
        let gold = testutil::graph(testutil::SIMPLE);
        let mut c = Configuration::from_gold(&gold);
        assert_eq!(c.buffer_value(0), Some(1));
        assert_eq!(c.buffer_value(10), DOES_NOT_EXIST);

        for expected in 1..=10 {
            let (stack, buffer) = (c.stack_size(), c.buffer_size());
            assert!(c.shift());
            assert_eq!(c.stack_size(), stack + 1);
            assert_eq!(c.buffer_size(), buffer - 1);
            assert_eq!(c.stack_value(0), Some(expected));
        }
        assert!(!c.shift());
        assert_eq!(c.stack_size(), 11);
        assert_eq!(c.buffer_value(0), DOES_NOT_EXIST);
        assert!(!c.is_terminal());
    }

    #[test]
    fn test_child_queries() {
        let mut c = Configuration::new(&testutil::tagged(5));
        // 1 2 <- 3 -> 4 5, with 3 also taking 1 on the left and 5 on the right
        c.graph.add_arc(3, 2, DependencyType::Det);
        c.graph.add_arc(3, 1, DependencyType::AMod);
        c.graph.add_arc(3, 4, DependencyType::Case);
        c.graph.add_arc(3, 5, DependencyType::NMod);

        assert_eq!(c.lc(Some(3), 1), Some(1));
        assert_eq!(c.lc(Some(3), 2), Some(2));
        assert_eq!(c.lc(Some(3), 3), DOES_NOT_EXIST);
        assert_eq!(c.rc(Some(3), 1), Some(5));
        assert_eq!(c.rc(Some(3), 2), Some(4));
        assert_eq!(c.lc(None, 1), DOES_NOT_EXIST);
        assert_eq!(c.lc(Some(6), 1), DOES_NOT_EXIST);
        assert_eq!(c.rc(Some(3), 0), DOES_NOT_EXIST);

        assert_eq!(c.label(Some(4)), DependencyType::Case);
        assert_eq!(c.label(Some(0)), DependencyType::NoDepType);
        assert_eq!(c.label(None), DependencyType::NoDepType);
        assert_eq!(c.annotation(None), Annotation::Null);
        assert_eq!(c.annotation(Some(0)).tag(), PosTag::RootTag);
        assert_eq!(c.annotation(Some(1)).tag(), PosTag::Noun);
    }

    #[test]
    fn test_has_other_children() {
        let gold = testutil::graph(testutil::SIMPLE);
        let mut c = Configuration::from_gold(&gold);
        assert!(c.has_other_children(5, &gold));
        for child in gold.children(5) {
            let label = gold.label(child);
            c.graph.add_arc(5, child, label);
        }
        assert!(!c.has_other_children(5, &gold));
        assert!(!c.has_other_children(2, &gold));
    }

    #[test]
    fn test_display() {
        let mut c = Configuration::new(&testutil::tagged(3));
        c.shift();
        assert_eq!(c.to_string(), "Stack: [0, 1] Buffer(1): [2, 3]");
    }
}
