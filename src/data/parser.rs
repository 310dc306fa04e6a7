use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;

use crate::data::document::{Document, Field};
use crate::data::GoldSentence;

/// Token fields every gold sentence must carry
const REQUIRED_FIELDS: &[&str] = &["word", "dependencies"];

/// Parser for JSON and gzipped JSON documents
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    strict: bool,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Reject documents whose token fields disagree with `numTokens`
    /// instead of only warning about them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate document structure before conversion.
    /// Checks for valid edge indices and consistent token counts
    pub fn validate_document(&self, doc: &Document) -> Result<()> {
        for (sentence_idx, sentence) in doc.sentences.iter().enumerate() {
            let token_count = sentence.num_tokens as usize;

            for &required in REQUIRED_FIELDS {
                if sentence.field(required).is_none() {
                    return Err(anyhow!(
                        "Document '{}' sentence {}: missing required field '{}'",
                        doc.id, sentence_idx, required
                    ));
                }
            }

            for field in &sentence.fields {
                match field {
                    Field::TokensField { name, tokens } => {
                        if tokens.len() != token_count {
                            if self.strict {
                                return Err(anyhow!(
                                    "Document '{}' sentence {}: field '{}' has {} tokens but numTokens is {}",
                                    doc.id, sentence_idx, name, tokens.len(), token_count
                                ));
                            }
                            log::warn!(
                                "Document '{}' sentence {}: field '{}' has {} tokens but numTokens is {}",
                                doc.id, sentence_idx, name, tokens.len(), token_count
                            );
                        }
                    }
                    Field::GraphField { edges, roots, .. } => {
                        for (from, to, rel) in edges {
                            if *from as usize >= token_count || *to as usize >= token_count {
                                return Err(anyhow!(
                                    "Document '{}' sentence {}: edge {}->{}:{} out of range (token count: {})",
                                    doc.id, sentence_idx, from, to, rel, token_count
                                ));
                            }
                            if from == to {
                                return Err(anyhow!(
                                    "Document '{}' sentence {}: edge {}->{}:{} is a self loop",
                                    doc.id, sentence_idx, from, to, rel
                                ));
                            }
                        }
                        if let Some(root) = roots.iter().find(|r| **r as usize >= token_count) {
                            return Err(anyhow!(
                                "Document '{}' sentence {}: root {} out of range (token count: {})",
                                doc.id, sentence_idx, root, token_count
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Parse a JSON file (regular or gzipped)
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> Result<Vec<Document>> {
        let path = file_path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        // Check if file is gzipped by looking at magic bytes
        let mut reader = BufReader::new(file);
        let mut magic = [0u8; 2];
        let gzipped = match reader.read_exact(&mut magic) {
            Ok(()) => magic == [0x1f, 0x8b],
            Err(_) => false,
        };

        let file = File::open(path)?;
        let documents = if gzipped {
            self.parse_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            self.parse_reader(BufReader::new(file))
        };
        documents.with_context(|| format!("Failed to parse documents in {}", path.display()))
    }

    /// Parse from a reader (handles single document, array of documents and JSONL)
    pub fn parse_reader<R: Read>(&self, mut reader: BufReader<R>) -> Result<Vec<Document>> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        if let Ok(docs) = self.parse_json(&content) {
            return Ok(docs);
        }

        // Try line-by-line JSON (JSONL format)
        let mut documents = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if !line.trim().is_empty() {
                let doc: Document = serde_json::from_str(line)
                    .with_context(|| format!("Invalid document on line {}", line_no + 1))?;
                documents.push(doc);
            }
        }
        Ok(documents)
    }

    /// Parse a JSON string
    pub fn parse_json(&self, json_str: &str) -> Result<Vec<Document>> {
        if let Ok(doc) = serde_json::from_str::<Document>(json_str) {
            return Ok(vec![doc]);
        }
        if let Ok(docs) = serde_json::from_str::<Vec<Document>>(json_str) {
            return Ok(docs);
        }
        Err(anyhow!("Failed to parse JSON as single document or array of documents"))
    }

    /// Parse a gzipped JSON string
    pub fn parse_gzipped_json(&self, gzipped_data: &[u8]) -> Result<Vec<Document>> {
        let mut decoder = GzDecoder::new(gzipped_data);
        let mut json_str = String::new();
        decoder.read_to_string(&mut json_str)?;
        self.parse_json(&json_str)
    }

    /// Load, validate and convert every sentence of a file into gold trees
    pub fn load_gold<P: AsRef<Path>>(&self, file_path: P) -> Result<Vec<GoldSentence>> {
        let mut sentences = Vec::new();
        for doc in self.parse_file(file_path)? {
            self.validate_document(&doc)?;
            sentences.extend(doc.to_gold()?);
        }
        log::info!("Loaded {} gold sentences", sentences.len());
        Ok(sentences)
    }
}
