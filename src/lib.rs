pub mod data;
pub mod digraph;
pub mod parser;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod testutil;

pub use data::{Document, DocumentParser, GoldSentence, TaggedToken, Vocabulary};
pub use digraph::SentenceGraph;
pub use parser::{Parser, ParserConfig, ParserContext, ParseError, Performance, Trainer};
pub use pipeline::{Pipeline, PipelineError, Tagger};
pub use types::{DependencyType, PosTag, Span};
