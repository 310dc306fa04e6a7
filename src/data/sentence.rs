use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::digraph::SentenceGraph;
use crate::types::{DependencyType, PosTag};

/// Errors raised when gold data does not describe a usable tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("token {token} has head {head}, outside a sentence of {words} words")]
    HeadOutOfRange { token: usize, head: usize, words: usize },

    #[error("token {token} is its own head")]
    SelfLoop { token: usize },
}

/// A word and its POS tag as produced by an upstream tagger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub tag: PosTag,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: PosTag) -> Self {
        Self { word: word.into(), tag }
    }
}

/// One treebank row: word, tag, 1-based head (0 = ROOT) and relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldToken {
    pub word: String,
    pub tag: PosTag,
    pub head: usize,
    pub label: DependencyType,
}

/// A gold-annotated sentence, ROOT excluded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldSentence {
    pub tokens: Vec<GoldToken>,
}

impl GoldSentence {
    pub fn new(tokens: Vec<GoldToken>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.word.as_str())
    }

    pub fn heads(&self) -> Vec<usize> {
        self.tokens.iter().map(|t| t.head).collect()
    }

    pub fn labels(&self) -> Vec<DependencyType> {
        self.tokens.iter().map(|t| t.label).collect()
    }

    /// The tagger view of the sentence, with the gold tree stripped
    pub fn tagged(&self) -> Vec<TaggedToken> {
        self.tokens
            .iter()
            .map(|t| TaggedToken::new(t.word.clone(), t.tag))
            .collect()
    }

    /// Build the gold dependency graph, recording every arc through `add_arc`
    pub fn to_graph(&self) -> Result<SentenceGraph, DataError> {
        let mut graph = SentenceGraph::from_tagged(&self.tagged());
        let words = graph.word_count();
        for (i, token) in self.tokens.iter().enumerate() {
            let child = i + 1;
            if token.head >= words {
                return Err(DataError::HeadOutOfRange { token: child, head: token.head, words });
            }
            if token.head == child {
                return Err(DataError::SelfLoop { token: child });
            }
            graph.add_arc(token.head, child, token.label);
        }
        Ok(graph)
    }
}

impl FromIterator<GoldToken> for GoldSentence {
    fn from_iter<I: IntoIterator<Item = GoldToken>>(iter: I) -> Self {
        Self { tokens: iter.into_iter().collect() }
    }
}
