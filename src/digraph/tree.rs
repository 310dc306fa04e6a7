//! Rooted tree view over a [`SentenceGraph`], for consumers that want to
//! walk or serialize the parse rather than index into it.

use serde::Serialize;

use crate::digraph::SentenceGraph;
use crate::types::{DependencyType, PosTag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyTree {
    pub id: usize,
    pub word: String,
    pub tag: PosTag,
    /// Relation to the parent node
    pub label: DependencyType,
    pub children: Vec<DependencyTree>,
}

impl DependencyTree {
    /// Build the tree rooted at ROOT. Unattached words hang off ROOT; words
    /// on a cycle are unreachable and left out.
    pub fn from_graph(graph: &SentenceGraph) -> Self {
        let mut child_lists: Vec<Vec<usize>> = vec![Vec::new(); graph.word_count()];
        for token in graph.tokens().iter().skip(1) {
            let head = token.head.unwrap_or(0);
            if head < child_lists.len() {
                child_lists[head].push(token.id);
            }
        }
        Self::build(graph, 0, &child_lists)
    }

    fn build(graph: &SentenceGraph, id: usize, child_lists: &[Vec<usize>]) -> Self {
        let token = &graph.tokens()[id];
        Self {
            id,
            word: token.value.clone(),
            tag: token.tag,
            label: token.label,
            children: child_lists[id]
                .iter()
                .map(|&child| Self::build(graph, child, child_lists))
                .collect(),
        }
    }

    /// Visit every node, children before their parent
    pub fn walk<F: FnMut(&DependencyTree)>(&self, f: &mut F) {
        for child in &self.children {
            child.walk(f);
        }
        f(self);
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TaggedToken;

    #[test]
    fn test_tree_from_graph() {
        let words = vec![
            TaggedToken::new("the", PosTag::Det),
            TaggedToken::new("cat", PosTag::Noun),
            TaggedToken::new("sat", PosTag::Verb),
        ];
        let mut graph = SentenceGraph::from_tagged(&words);
        graph.add_arc(2, 1, DependencyType::Det);
        graph.add_arc(3, 2, DependencyType::NSubj);
        graph.add_arc(0, 3, DependencyType::Root);

        let tree = DependencyTree::from_graph(&graph);
        assert_eq!(tree.id, 0);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].word, "sat");
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 4);

        let mut order = Vec::new();
        tree.walk(&mut |node| order.push(node.id));
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_unattached_words_hang_off_root() {
        let words = vec![TaggedToken::new("a", PosTag::Det), TaggedToken::new("b", PosTag::Noun)];
        let graph = SentenceGraph::from_tagged(&words);
        let tree = DependencyTree::from_graph(&graph);
        let ids: Vec<usize> = tree.children.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
