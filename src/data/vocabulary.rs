use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::GoldSentence;
use crate::digraph::ROOT_WORD;

/// Word form used for positions that do not exist
pub const NULL_WORD: &str = "";
/// Word form standing in for any word outside the vocabulary
pub const UNKNOWN_WORD: &str = "-UNKNOWN-";

/// Word-to-id lookup used by feature extraction
pub trait Lexicon: Send + Sync {
    /// Id of a known word
    fn id(&self, word: &str) -> Option<usize>;

    /// Id reserved for words the lexicon does not know
    fn unknown_id(&self) -> usize;

    /// Word for an id, if assigned
    fn word(&self, id: usize) -> Option<&str>;

    /// Number of assigned ids
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id of the word, falling back to the unknown id
    fn id_or_unknown(&self, word: &str) -> usize {
        self.id(word).unwrap_or_else(|| self.unknown_id())
    }
}

/// Dense vocabulary mapping words to consecutive ids.
///
/// A fresh vocabulary reserves `""` (null) = 0, `-UNKNOWN-` = 1 and
/// `-ROOT-` = 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    id_to_term: Vec<String>,
    #[serde(skip)]
    term_to_id: HashMap<String, usize>,
    frequencies: Vec<usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        let mut vocab = Self {
            id_to_term: Vec::new(),
            term_to_id: HashMap::new(),
            frequencies: Vec::new(),
        };
        vocab.get_or_create_id(NULL_WORD);
        vocab.get_or_create_id(UNKNOWN_WORD);
        vocab.get_or_create_id(ROOT_WORD);
        vocab
    }

    /// Vocabulary of every word form in the gold sentences
    pub fn from_gold(sentences: &[GoldSentence]) -> Self {
        let mut vocab = Self::new();
        for sentence in sentences {
            for word in sentence.words() {
                vocab.add(word);
            }
        }
        vocab
    }

    /// Get or create ID for a term
    pub fn get_or_create_id(&mut self, term: &str) -> usize {
        if let Some(&id) = self.term_to_id.get(term) {
            id
        } else {
            let id = self.id_to_term.len();
            self.id_to_term.push(term.to_string());
            self.term_to_id.insert(term.to_string(), id);
            self.frequencies.push(0);
            id
        }
    }

    /// Record one occurrence of a word
    pub fn add(&mut self, term: &str) -> usize {
        let id = self.get_or_create_id(term);
        self.frequencies[id] += 1;
        id
    }

    pub fn get_id(&self, term: &str) -> Option<usize> {
        self.term_to_id.get(term).copied()
    }

    pub fn get_term(&self, id: usize) -> Option<&str> {
        self.id_to_term.get(id).map(|s| s.as_str())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.term_to_id.contains_key(term)
    }

    pub fn frequency(&self, term: &str) -> usize {
        self.get_id(term)
            .and_then(|id| self.frequencies.get(id).copied())
            .unwrap_or(0)
    }

    /// Add every word of `other` that is missing here, summing frequencies
    pub fn merge(&mut self, other: &Vocabulary) {
        for (id, term) in other.id_to_term.iter().enumerate() {
            let own = self.get_or_create_id(term);
            self.frequencies[own] += other.frequencies.get(id).copied().unwrap_or(0);
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write vocabulary to {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary {}", path.display()))?;
        let mut vocab: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid vocabulary JSON in {}", path.display()))?;
        vocab.rebuild_index();
        if vocab.frequencies.len() != vocab.id_to_term.len() {
            vocab.frequencies.resize(vocab.id_to_term.len(), 0);
        }
        Ok(vocab)
    }

    fn rebuild_index(&mut self) {
        self.term_to_id = self
            .id_to_term
            .iter()
            .enumerate()
            .map(|(id, term)| (term.clone(), id))
            .collect();
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon for Vocabulary {
    fn id(&self, word: &str) -> Option<usize> {
        self.get_id(word)
    }

    fn unknown_id(&self) -> usize {
        self.get_id(UNKNOWN_WORD).unwrap_or(1)
    }

    fn word(&self, id: usize) -> Option<&str> {
        self.get_term(id)
    }

    fn len(&self) -> usize {
        self.id_to_term.len()
    }
}
