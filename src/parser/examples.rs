use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::data::GoldSentence;
use crate::digraph::SentenceGraph;
use crate::parser::classifier::TrainingExample;
use crate::parser::configuration::Configuration;
use crate::parser::driver::ParserContext;
use crate::parser::errors::ParseError;
use crate::parser::features::FeatureExtractor;
use crate::parser::oracle::check_gold;
use crate::parser::transition::TransitionTable;

/// How a batch of gold sentences fared during example generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExampleStats {
    pub sentences: usize,
    pub good: usize,
    pub non_projective: usize,
    pub tarpit: usize,
    /// Sentences whose gold heads did not form a graph, or whose oracle
    /// transitions fall outside the table
    pub invalid: usize,
    pub examples: usize,
}

impl ExampleStats {
    pub fn record(&mut self, result: &Result<Vec<TrainingExample>, ParseError>) {
        self.sentences += 1;
        match result {
            Ok(examples) => {
                self.good += 1;
                self.examples += examples.len();
            }
            Err(ParseError::NonProjective { .. }) => self.non_projective += 1,
            Err(ParseError::Tarpit { .. }) => self.tarpit += 1,
            Err(_) => self.invalid += 1,
        }
    }
}

impl fmt::Display for ExampleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sentences turned into examples: {}/{} | Examples: {} | Non-projective: {} | Tarpit: {} | Invalid: {}",
            self.good, self.sentences, self.examples, self.non_projective, self.tarpit, self.invalid
        )
    }
}

/// Replays the oracle over gold trees to produce training examples
#[derive(Debug, Clone)]
pub struct ExampleGenerator {
    extractor: FeatureExtractor,
    transitions: Arc<TransitionTable>,
    step_cap: usize,
}

impl ExampleGenerator {
    pub fn new(context: &ParserContext) -> Self {
        Self {
            extractor: context.feature_extractor(),
            transitions: context.transitions.clone(),
            step_cap: context.config.oracle_step_cap,
        }
    }

    /// Examples for one gold tree, one per oracle step
    pub fn make_one(&self, gold: &SentenceGraph) -> Result<Vec<TrainingExample>, ParseError> {
        check_gold(gold)?;

        let mut c = Configuration::from_gold(gold);
        let mut examples = Vec::with_capacity(2 * gold.n());
        while !c.is_terminal() {
            if examples.len() >= self.step_cap {
                return Err(ParseError::Tarpit { steps: examples.len(), state: c.to_string() });
            }

            let oracle = c.oracle(gold);
            let transition_id = self
                .transitions
                .id_of(&oracle)
                .ok_or(ParseError::UnknownTransition(oracle))?;
            let features = self.extractor.extract(&c).to_vec();
            let labels = self
                .transitions
                .iter()
                .map(|t| {
                    if *t == oracle {
                        1
                    } else if c.can_apply(t) {
                        0
                    } else {
                        -1
                    }
                })
                .collect();

            examples.push(TrainingExample { transition: oracle, transition_id, features, labels });
            if !c.apply_gold(&oracle) {
                return Err(ParseError::Tarpit { steps: examples.len(), state: c.to_string() });
            }
        }
        Ok(examples)
    }

    /// Hand the examples of each sentence to `sink`, in order. Sentences that
    /// yield nothing are counted in the returned stats and passed on as an
    /// empty slice; the first error from `sink` stops the walk.
    pub fn visit<F, E>(&self, sentences: &[GoldSentence], mut sink: F) -> Result<ExampleStats, E>
    where
        F: FnMut(&[TrainingExample]) -> Result<(), E>,
    {
        let mut stats = ExampleStats::default();

        for (i, sentence) in sentences.iter().enumerate() {
            let result = match sentence.to_graph() {
                Ok(gold) => self.make_one(&gold),
                Err(e) => {
                    log::warn!("Skipping sentence {}: {}", i, e);
                    stats.sentences += 1;
                    stats.invalid += 1;
                    sink(&[])?;
                    continue;
                }
            };
            stats.record(&result);
            match result {
                Ok(examples) => sink(&examples)?,
                Err(e) => {
                    log::debug!("Skipping sentence {}: {}", i, e);
                    sink(&[])?;
                }
            }
        }

        log::info!("{}", stats);
        Ok(stats)
    }

    /// Examples for every usable sentence; failures are counted and skipped
    pub fn make_examples(&self, sentences: &[GoldSentence]) -> (Vec<TrainingExample>, ExampleStats) {
        let mut examples = Vec::new();
        let visited = self.visit(sentences, |exs| {
            examples.extend_from_slice(exs);
            Ok::<(), Infallible>(())
        });
        let stats = match visited {
            Ok(stats) => stats,
            Err(never) => match never {},
        };
        (examples, stats)
    }
}

pub fn shuffle_examples<R: Rng + ?Sized>(examples: &mut [TrainingExample], rng: &mut R) {
    examples.shuffle(rng);
}
