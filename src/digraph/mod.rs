pub mod graph;
pub mod tree;

pub use graph::{SentenceGraph, Token, ROOT_WORD};
pub use tree::DependencyTree;
