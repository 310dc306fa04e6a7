pub mod document;
pub mod parser;
pub mod sentence;
pub mod vocabulary;

pub use document::{Document, Field, GraphField, Sentence};
pub use parser::DocumentParser;
pub use sentence::{DataError, GoldSentence, GoldToken, TaggedToken};
pub use vocabulary::{Lexicon, Vocabulary, NULL_WORD, UNKNOWN_WORD};
