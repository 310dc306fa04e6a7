//! Collaborator contract of the transition scoring model

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::parser::transition::Transition;

/// One oracle step: the features of the state and the margin target over
/// the transition table (+1 oracle, 0 other legal, -1 illegal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub transition: Transition,
    pub transition_id: usize,
    pub features: Vec<usize>,
    pub labels: Vec<i8>,
}

/// Read-only scoring, shareable across decoding threads
pub trait Scorer: Send + Sync {
    /// One score per transition id
    fn score(&self, features: &[usize]) -> Result<Vec<f64>>;
}

/// A scorer that can also learn from examples
pub trait Classifier: Scorer {
    fn train(&mut self, examples: &[TrainingExample]) -> Result<()>;
}

impl<T: Scorer + ?Sized> Scorer for &T {
    fn score(&self, features: &[usize]) -> Result<Vec<f64>> {
        (**self).score(features)
    }
}

impl<T: Scorer + ?Sized> Scorer for Box<T> {
    fn score(&self, features: &[usize]) -> Result<Vec<f64>> {
        (**self).score(features)
    }
}

impl<T: Scorer + ?Sized> Scorer for Arc<T> {
    fn score(&self, features: &[usize]) -> Result<Vec<f64>> {
        (**self).score(features)
    }
}

/// Baseline model that memorises which transition the oracle took for each
/// exact feature vector. Unseen vectors score zero everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupClassifier {
    transitions: usize,
    table: HashMap<Vec<usize>, Vec<f64>>,
}

impl LookupClassifier {
    pub fn new(transitions: usize) -> Self {
        Self { transitions, table: HashMap::new() }
    }

    /// Number of distinct feature vectors seen
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Scorer for LookupClassifier {
    fn score(&self, features: &[usize]) -> Result<Vec<f64>> {
        Ok(self
            .table
            .get(features)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.transitions]))
    }
}

impl Classifier for LookupClassifier {
    /// All-or-nothing: an out-of-table id rejects the whole batch
    fn train(&mut self, examples: &[TrainingExample]) -> Result<()> {
        if let Some(bad) = examples.iter().find(|e| e.transition_id >= self.transitions) {
            return Err(anyhow!(
                "transition id {} outside a table of {}",
                bad.transition_id,
                self.transitions
            ));
        }
        for example in examples {
            let counts = self
                .table
                .entry(example.features.clone())
                .or_insert_with(|| vec![0.0; self.transitions]);
            counts[example.transition_id] += 1.0;
        }
        Ok(())
    }
}
