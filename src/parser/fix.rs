//! Repairs applied to predicted trees.
//!
//! Runs of proper nouns ("Prime Minister Iyad Allawi") should hang off their
//! last word as compounds. When the parser has attached them some other way
//! and no compound relation is present in the run, the run is reattached
//! under a single compound root.

use std::collections::BTreeSet;

use crate::digraph::SentenceGraph;
use crate::types::{DependencyType, Span};

/// Maximal runs of consecutive proper-noun tokens, ROOT excluded
pub fn proper_noun_spans(graph: &SentenceGraph) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = None;
    for i in 1..graph.word_count() {
        let proper = graph.token(i).map_or(false, |t| t.tag.is_proper_noun());
        match (proper, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push(Span::new(s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(Span::new(s, graph.word_count()));
    }
    spans
}

/// Apply every repair; returns the number of tokens reattached
pub fn fix(graph: &mut SentenceGraph) -> usize {
    let mut moved = 0;
    for span in proper_noun_spans(graph) {
        if span.length() < 2 {
            continue;
        }
        moved += fix_compound_span(graph, span);
    }
    if moved > 0 && !graph.is_legal() {
        log::warn!("Compound repair left a cycle in: {}", graph);
    }
    moved
}

fn fix_compound_span(graph: &mut SentenceGraph, span: Span) -> usize {
    let Some(last) = span.last() else {
        return 0;
    };

    let mut compound_roots = BTreeSet::new();
    let mut problematic = BTreeSet::new();
    for i in span.indices() {
        if graph.label(i).is_compound() {
            if let Some(head) = graph.head(i) {
                compound_roots.insert(head);
            }
        } else if i != last {
            problematic.insert(i);
        }
    }

    if !compound_roots.is_empty() {
        log::debug!("Span {:?} already has compound roots {:?}", span, compound_roots);
        return 0;
    }

    // Walk back from the end: Dep and Root tokens are skipped over, the
    // first token with any other relation becomes the root of the compound
    let mut compound_root = last;
    let mut root_root = None;
    let mut roots_seen = 0;
    for i in span.indices().rev() {
        compound_root = i;
        match graph.label(i) {
            DependencyType::Dep => {
                problematic.insert(i);
            }
            DependencyType::Root => {
                root_root = Some(i);
                roots_seen += 1;
                problematic.insert(i);
            }
            _ => break,
        }
    }

    if roots_seen > 1 || root_root.map_or(false, |r| r != compound_root) {
        log::warn!(
            "Problem when fixing span {:?}: more than one possible compound root found",
            span
        );
        return 0;
    }

    let mut moved = 0;
    for a in problematic {
        if a == compound_root {
            continue;
        }
        let (old_head, old_label) = (graph.head(a), graph.label(a));
        graph.reattach(a, Some(compound_root), DependencyType::Compound);
        for child in graph.children(a) {
            graph.reattach(child, old_head, old_label);
        }
        moved += 1;
    }
    moved
}
