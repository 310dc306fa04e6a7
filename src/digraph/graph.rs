use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::TaggedToken;
use crate::types::{DependencyType, PosTag};

/// Word form of the implicit ROOT token at index 0
pub const ROOT_WORD: &str = "-ROOT-";

/// A token of the sentence together with its (possibly missing) attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
    pub tag: PosTag,
    /// Position in the sentence; 0 is ROOT
    pub id: usize,
    pub label: DependencyType,
    /// `None` until the token is attached
    pub head: Option<usize>,
}

impl Token {
    pub fn new(id: usize, value: impl Into<String>, tag: PosTag) -> Self {
        Self {
            value: value.into(),
            tag,
            id,
            label: DependencyType::NoDepType,
            head: None,
        }
    }

    pub fn root() -> Self {
        Self {
            value: ROOT_WORD.to_string(),
            tag: PosTag::RootTag,
            id: 0,
            label: DependencyType::Root,
            head: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == 0
    }
}

/// Tokens of one sentence plus the dependency arcs built over them.
///
/// Tokens live in a flat vector indexed by position, with ROOT at 0.
/// Arcs are recorded only through [`SentenceGraph::add_arc`] (or moved with
/// [`SentenceGraph::reattach`]), which keep the per-head adjacency lists in
/// step with the `head` fields: children with a smaller index than their head
/// go to `lefts`, the rest to `rights`, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceGraph {
    tokens: Vec<Token>,
    lefts: Vec<Vec<usize>>,
    rights: Vec<Vec<usize>>,
    arcs: usize,
}

impl SentenceGraph {
    /// Build an unattached graph from tagged words; ROOT is prepended
    pub fn from_tagged(words: &[TaggedToken]) -> Self {
        let mut tokens = Vec::with_capacity(words.len() + 1);
        tokens.push(Token::root());
        for (i, word) in words.iter().enumerate() {
            tokens.push(Token::new(i + 1, word.word.clone(), word.tag));
        }
        let count = tokens.len();
        Self {
            tokens,
            lefts: vec![Vec::new(); count],
            rights: vec![Vec::new(); count],
            arcs: 0,
        }
    }

    /// Copy of the sentence with every arc removed
    pub fn without_arcs(&self) -> Self {
        let mut tokens = self.tokens.clone();
        for token in tokens.iter_mut().skip(1) {
            token.head = None;
            token.label = DependencyType::NoDepType;
        }
        let count = tokens.len();
        Self {
            tokens,
            lefts: vec![Vec::new(); count],
            rights: vec![Vec::new(); count],
            arcs: 0,
        }
    }

    /// Number of tokens including ROOT
    #[inline]
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    /// Number of real words (ROOT excluded)
    #[inline]
    pub fn n(&self) -> usize {
        self.tokens.len() - 1
    }

    /// Number of arcs added so far
    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arcs
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    pub fn head(&self, i: usize) -> Option<usize> {
        self.tokens.get(i).and_then(|t| t.head)
    }

    pub fn label(&self, i: usize) -> DependencyType {
        self.tokens
            .get(i)
            .map(|t| t.label)
            .unwrap_or(DependencyType::NoDepType)
    }

    pub fn lefts(&self, i: usize) -> &[usize] {
        self.lefts.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rights(&self, i: usize) -> &[usize] {
        self.rights.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Attach `child` to `head` with `label`
    pub fn add_arc(&mut self, head: usize, child: usize, label: DependencyType) {
        debug_assert!(head < self.word_count() && child < self.word_count());
        if head >= self.word_count() || child >= self.word_count() {
            log::warn!("Ignoring arc {} -> {} outside sentence of {} tokens", head, child, self.word_count());
            return;
        }
        self.tokens[child].head = Some(head);
        self.push_child(head, child);
        self.add_rel(child, label);
        self.arcs += 1;
    }

    /// Set the relation of `child` without touching its head
    pub fn add_rel(&mut self, child: usize, label: DependencyType) {
        if let Some(token) = self.tokens.get_mut(child) {
            token.label = label;
        }
    }

    /// Move `child` under a new head (or detach it), keeping adjacency consistent
    pub fn reattach(&mut self, child: usize, head: Option<usize>, label: DependencyType) {
        if child == 0 || child >= self.word_count() {
            return;
        }
        if let Some(new_head) = head {
            if new_head >= self.word_count() {
                return;
            }
        }

        let old = self.tokens[child].head;
        if let Some(old_head) = old {
            self.remove_child(old_head, child);
        }
        match (old, head) {
            (None, Some(_)) => self.arcs += 1,
            (Some(_), None) => self.arcs -= 1,
            _ => {}
        }

        self.tokens[child].head = head;
        self.tokens[child].label = label;
        if let Some(new_head) = head {
            self.push_child(new_head, child);
        }
    }

    fn push_child(&mut self, head: usize, child: usize) {
        if child < head {
            self.lefts[head].push(child);
        } else {
            self.rights[head].push(child);
        }
    }

    fn remove_child(&mut self, head: usize, child: usize) {
        let list = if child < head { &mut self.lefts[head] } else { &mut self.rights[head] };
        list.retain(|&c| c != child);
    }

    /// Indices whose head is `h`, in sentence order
    pub fn children(&self, h: usize) -> Vec<usize> {
        self.tokens
            .iter()
            .filter(|t| t.head == Some(h))
            .map(|t| t.id)
            .collect()
    }

    /// The word attached to ROOT, or 0 while the parse is incomplete
    pub fn root(&self) -> usize {
        (1..=self.n())
            .find(|&i| self.head(i) == Some(0))
            .unwrap_or(0)
    }

    pub fn has_single_root(&self) -> bool {
        self.tokens.iter().filter(|t| t.head == Some(0)).count() == 1
    }

    /// False if a head lies outside the sentence or any head chain loops
    pub fn is_legal(&self) -> bool {
        let count = self.word_count();
        if self
            .tokens
            .iter()
            .any(|t| t.head.map_or(false, |h| h >= count))
        {
            return false;
        }

        // marks[k] holds the walk that last visited k
        let mut marks: Vec<Option<usize>> = vec![None; count];
        for i in 1..count {
            let mut k = i;
            while k > 0 {
                match marks[k] {
                    Some(walk) if walk == i => return false,
                    Some(_) => break,
                    None => {}
                }
                marks[k] = Some(i);
                match self.tokens[k].head {
                    Some(h) => k = h,
                    None => break,
                }
            }
        }
        true
    }

    /// Projectivity check: an in-order walk from ROOT must visit tokens in
    /// sentence order
    pub fn is_projective(&self) -> bool {
        let mut counter: isize = -1;
        self.projective_visit(0, &mut counter)
    }

    fn projective_visit(&self, w: usize, counter: &mut isize) -> bool {
        for i in 1..w {
            if self.tokens[i].head == Some(w) && !self.projective_visit(i, counter) {
                return false;
            }
        }

        *counter += 1;
        if w as isize != *counter {
            return false;
        }

        for i in (w + 1)..self.word_count() {
            if self.tokens[i].head == Some(w) && !self.projective_visit(i, counter) {
                return false;
            }
        }
        true
    }

    /// Heads of the real words (index 1 onwards)
    pub fn heads(&self) -> Vec<Option<usize>> {
        self.tokens.iter().skip(1).map(|t| t.head).collect()
    }

    /// Labels of the real words (index 1 onwards)
    pub fn labels(&self) -> Vec<DependencyType> {
        self.tokens.iter().skip(1).map(|t| t.label).collect()
    }

    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().skip(1).map(|t| t.value.as_str()).collect()
    }

    pub fn tags(&self) -> Vec<PosTag> {
        self.tokens.iter().skip(1).map(|t| t.tag).collect()
    }

    /// `(head, dependent, label)` for every attached word, in dependent order
    pub fn edges(&self) -> Vec<(usize, usize, DependencyType)> {
        self.tokens
            .iter()
            .skip(1)
            .filter_map(|t| t.head.map(|h| (h, t.id, t.label)))
            .collect()
    }
}

impl fmt::Display for SentenceGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate().skip(1) {
            if i > 1 {
                f.write_str(" ")?;
            }
            match token.head {
                Some(h) => write!(f, "{}/{}<-{}-{}", token.value, token.tag, token.label, h)?,
                None => write!(f, "{}/{}", token.value, token.tag)?,
            }
        }
        Ok(())
    }
}
