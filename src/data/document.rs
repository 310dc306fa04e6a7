use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::data::{GoldSentence, GoldToken, TaggedToken};
use crate::digraph::SentenceGraph;
use crate::types::{DependencyType, PosTag};

pub const FIELD_WORD: &str = "word";
pub const FIELD_TAG: &str = "tag";
pub const FIELD_POS: &str = "pos";
pub const FIELD_DEPENDENCIES: &str = "dependencies";

/// Represents a complete document with metadata and sentences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub metadata: Vec<String>,
    pub sentences: Vec<Sentence>,
}

/// Represents a single sentence with its fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(rename = "numTokens")]
    pub num_tokens: u32,
    pub fields: Vec<Field>,
}

/// Represents a field in a sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Field {
    #[serde(rename = "ai.lum.odinson.TokensField")]
    TokensField {
        name: String,
        tokens: Vec<String>,
    },
    #[serde(rename = "ai.lum.odinson.GraphField")]
    GraphField {
        name: String,
        edges: Vec<(u32, u32, String)>, // (from, to, relation)
        roots: Vec<u32>,
    },
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::TokensField { name, .. } => name,
            Field::GraphField { name, .. } => name,
        }
    }
}

/// Represents a dependency graph field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphField {
    pub name: String,
    pub edges: Vec<(u32, u32, String)>, // (from, to, relation)
    pub roots: Vec<u32>,
}

impl GraphField {
    /// Get incoming edges for a token
    pub fn incoming_edges(&self, token_idx: u32) -> Vec<(u32, String)> {
        self.edges
            .iter()
            .filter(|(_, to, _)| *to == token_idx)
            .map(|(from, _, rel)| (*from, rel.to_string()))
            .collect()
    }

    /// Get outgoing edges for a token
    pub fn outgoing_edges(&self, token_idx: u32) -> Vec<(u32, String)> {
        self.edges
            .iter()
            .filter(|(from, _, _)| *from == token_idx)
            .map(|(_, to, rel)| (*to, rel.to_string()))
            .collect()
    }
}

impl Document {
    pub fn new(id: impl Into<String>, sentences: Vec<Sentence>) -> Self {
        Self { id: id.into(), metadata: Vec::new(), sentences }
    }

    /// Get a specific field by name from a sentence
    pub fn get_field(&self, sentence_idx: usize, field_name: &str) -> Option<&Field> {
        self.sentences.get(sentence_idx)?.field(field_name)
    }

    /// Get tokens from a specific field
    pub fn get_tokens(&self, sentence_idx: usize, field_name: &str) -> Option<&[String]> {
        self.sentences.get(sentence_idx)?.tokens(field_name)
    }

    /// Get dependencies from a sentence
    pub fn get_dependencies(&self, sentence_idx: usize) -> Option<GraphField> {
        self.sentences.get(sentence_idx)?.dependencies()
    }

    /// Get sentence length
    pub fn sentence_length(&self, sentence_idx: usize) -> Option<u32> {
        self.sentences.get(sentence_idx).map(|s| s.num_tokens)
    }

    /// Gold sentences of the whole document
    pub fn to_gold(&self) -> Result<Vec<GoldSentence>> {
        self.sentences
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.to_gold()
                    .map_err(|e| anyhow!("Document '{}' sentence {}: {}", self.id, i, e))
            })
            .collect()
    }
}

impl Sentence {
    pub fn field(&self, field_name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == field_name)
    }

    pub fn tokens(&self, field_name: &str) -> Option<&[String]> {
        match self.field(field_name)? {
            Field::TokensField { tokens, .. } => Some(tokens),
            _ => None,
        }
    }

    pub fn dependencies(&self) -> Option<GraphField> {
        match self.field(FIELD_DEPENDENCIES)? {
            Field::GraphField { name, edges, roots } => Some(GraphField {
                name: name.clone(),
                edges: edges.clone(),
                roots: roots.clone(),
            }),
            _ => None,
        }
    }

    /// Export a parsed sentence: word and tag token fields plus the
    /// dependency graph, with 0-based token positions
    pub fn from_graph(graph: &SentenceGraph) -> Self {
        let words = graph.words().into_iter().map(str::to_string).collect();
        let tags = graph.tags().into_iter().map(String::from).collect();

        let mut edges = Vec::new();
        let mut roots = Vec::new();
        for (head, dependent, label) in graph.edges() {
            if head == 0 {
                roots.push((dependent - 1) as u32);
            } else {
                edges.push(((head - 1) as u32, (dependent - 1) as u32, label.to_string()));
            }
        }

        Self {
            num_tokens: graph.n() as u32,
            fields: vec![
                Field::TokensField { name: FIELD_WORD.to_string(), tokens: words },
                Field::TokensField { name: FIELD_TAG.to_string(), tokens: tags },
                Field::GraphField { name: FIELD_DEPENDENCIES.to_string(), edges, roots },
            ],
        }
    }

    /// Read the tagger view: words from `word`, tags from `tag` (or `pos`).
    /// Unknown tags fall back to `X`.
    pub fn tagged(&self) -> Result<Vec<TaggedToken>> {
        let words = self
            .tokens(FIELD_WORD)
            .ok_or_else(|| anyhow!("missing '{}' field", FIELD_WORD))?;
        let tags = self
            .tokens(FIELD_TAG)
            .or_else(|| self.tokens(FIELD_POS))
            .ok_or_else(|| anyhow!("missing '{}' or '{}' field", FIELD_TAG, FIELD_POS))?;
        if tags.len() != words.len() {
            return Err(anyhow!("{} words but {} tags", words.len(), tags.len()));
        }

        Ok(words
            .iter()
            .zip(tags)
            .map(|(word, tag)| {
                let tag = tag.parse::<PosTag>().unwrap_or_else(|e| {
                    log::warn!("{}; using X", e);
                    PosTag::X
                });
                TaggedToken::new(word.clone(), tag)
            })
            .collect())
    }

    /// Read the gold tree: the tagged tokens plus heads and relations from
    /// the `dependencies` graph
    pub fn to_gold(&self) -> Result<GoldSentence> {
        let tagged = self.tagged()?;
        let deps = self
            .dependencies()
            .ok_or_else(|| anyhow!("missing '{}' field", FIELD_DEPENDENCIES))?;

        let mut tokens = Vec::with_capacity(tagged.len());
        for (i, TaggedToken { word, tag }) in tagged.into_iter().enumerate() {
            let position = i as u32;
            let incoming = deps.incoming_edges(position);
            let (head, label) = if deps.roots.contains(&position) {
                (0, DependencyType::Root)
            } else if let Some((from, rel)) = incoming.first() {
                if incoming.len() > 1 {
                    log::warn!("Token {} has {} heads; keeping the first", i, incoming.len());
                }
                let label = rel.parse::<DependencyType>().unwrap_or_else(|e| {
                    log::warn!("{}; using dep", e);
                    DependencyType::Dep
                });
                (*from as usize + 1, label)
            } else {
                return Err(anyhow!("token {} ('{}') has no head", i, word));
            };

            tokens.push(GoldToken { word, tag, head, label });
        }
        Ok(GoldSentence::new(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> GoldSentence {
        GoldSentence::new(vec![
            GoldToken { word: "the".into(), tag: PosTag::Det, head: 2, label: DependencyType::Det },
            GoldToken { word: "cat".into(), tag: PosTag::Noun, head: 3, label: DependencyType::NSubj },
            GoldToken { word: "sat".into(), tag: PosTag::Verb, head: 0, label: DependencyType::Root },
        ])
    }

    #[test]
    fn test_graph_export_uses_zero_based_positions() {
        let graph = gold().to_graph().unwrap();
        let sentence = Sentence::from_graph(&graph);

        assert_eq!(sentence.num_tokens, 3);
        assert_eq!(
            sentence.tokens(FIELD_WORD).unwrap(),
            &["the".to_string(), "cat".to_string(), "sat".to_string()]
        );
        let deps = sentence.dependencies().unwrap();
        assert_eq!(deps.roots, vec![2]);
        assert_eq!(deps.incoming_edges(0), vec![(1, "det".to_string())]);
        assert_eq!(deps.outgoing_edges(2), vec![(1, "nsubj".to_string())]);
    }

    #[test]
    fn test_export_then_read_gold() {
        let graph = gold().to_graph().unwrap();
        let doc = Document::new("doc1", vec![Sentence::from_graph(&graph)]);
        let back = doc.to_gold().unwrap();
        assert_eq!(back, vec![gold()]);
    }

    #[test]
    fn test_to_gold_reports_missing_heads() {
        let sentence = Sentence {
            num_tokens: 2,
            fields: vec![
                Field::TokensField { name: "word".into(), tokens: vec!["a".into(), "b".into()] },
                Field::TokensField { name: "pos".into(), tokens: vec!["DT".into(), "NN".into()] },
                Field::GraphField { name: "dependencies".into(), edges: vec![], roots: vec![1] },
            ],
        };
        let err = sentence.to_gold().unwrap_err();
        assert!(err.to_string().contains("no head"));
    }

    #[test]
    fn test_document_json_format() {
        let json = r#"{
            "id": "d1",
            "metadata": [],
            "sentences": [{
                "numTokens": 2,
                "fields": [
                    {"$type": "ai.lum.odinson.TokensField", "name": "word", "tokens": ["Dogs", "bark"]},
                    {"$type": "ai.lum.odinson.TokensField", "name": "tag", "tokens": ["NNS", "VBP"]},
                    {"$type": "ai.lum.odinson.GraphField", "name": "dependencies", "edges": [[1, 0, "nsubj"]], "roots": [1]}
                ]
            }]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.sentence_length(0), Some(2));
        let gold = doc.to_gold().unwrap();
        assert_eq!(gold[0].heads(), vec![2, 0]);
        assert_eq!(gold[0].tokens[0].tag, PosTag::Noun);
        assert_eq!(gold[0].labels(), vec![DependencyType::NSubj, DependencyType::Root]);
    }

    #[test]
    fn test_tagged_needs_no_dependencies() {
        let sentence = Sentence {
            num_tokens: 2,
            fields: vec![
                Field::TokensField { name: "word".into(), tokens: vec!["Dogs".into(), "bark".into()] },
                Field::TokensField { name: "tag".into(), tokens: vec!["NNS".into(), "??".into()] },
            ],
        };
        assert_eq!(
            sentence.tagged().unwrap(),
            vec![TaggedToken::new("Dogs", PosTag::Noun), TaggedToken::new("bark", PosTag::X)]
        );
        assert!(sentence.to_gold().is_err());
    }
}
