use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digraph::SentenceGraph;
use crate::parser::errors::EvaluationError;

/// Accuracy of a set of predicted trees against gold
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// Training epoch the numbers belong to
    pub iter: usize,
    /// Unlabelled attachment score
    pub uas: f64,
    /// Labelled attachment score
    pub las: f64,
    /// Unlabelled exact match
    pub uem: f64,
    /// Correct roots ratio
    pub root: f64,
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EPO: {}", self.iter)?;
        writeln!(f, "UAS: {:.5}", self.uas)?;
        writeln!(f, "LAS: {:.5}", self.las)?;
        writeln!(f, "UEM: {:.5}", self.uem)?;
        write!(f, "ROO: {:.5}", self.root)
    }
}

/// Compare predicted trees with gold trees, pairwise.
///
/// A pair whose sentence lengths differ still adds its gold arcs to the
/// denominator but scores nothing.
pub fn evaluate(predicted: &[SentenceGraph], gold: &[SentenceGraph]) -> Result<Performance, EvaluationError> {
    if predicted.len() != gold.len() {
        return Err(EvaluationError::LengthMismatch {
            predicted: predicted.len(),
            gold: gold.len(),
        });
    }
    if gold.is_empty() {
        return Ok(Performance::default());
    }

    let mut correct_heads = 0usize;
    let mut correct_labels = 0usize;
    let mut correct_trees = 0usize;
    let mut correct_root = 0usize;
    let mut sum_arcs = 0usize;

    for (i, (p, g)) in predicted.iter().zip(gold).enumerate() {
        if p.word_count() != g.word_count() {
            log::warn!(
                "Sentence {}: predicted {} words, gold {} words",
                i,
                p.n(),
                g.n()
            );
            sum_arcs += g.n();
            continue;
        }

        let mut heads_right = 0;
        for j in 1..g.word_count() {
            if p.head(j) == g.head(j) {
                correct_heads += 1;
                heads_right += 1;
            }
            if p.label(j) == g.label(j) {
                correct_labels += 1;
            }
            sum_arcs += 1;
        }
        if heads_right == g.n() {
            correct_trees += 1;
        }
        if p.root() == g.root() {
            correct_root += 1;
        }
    }

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
    let sentences = gold.len();
    let performance = Performance {
        iter: 0,
        uas: ratio(correct_heads, sum_arcs),
        las: ratio(correct_labels, sum_arcs),
        uem: ratio(correct_trees, sentences),
        root: ratio(correct_root, sentences),
    };
    log::debug!("Evaluated {} sentences, {} arcs", sentences, sum_arcs);
    Ok(performance)
}
