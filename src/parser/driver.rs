use std::sync::Arc;

use rayon::prelude::*;

use crate::data::{Lexicon, TaggedToken};
use crate::digraph::SentenceGraph;
use crate::parser::classifier::Scorer;
use crate::parser::config::ParserConfig;
use crate::parser::configuration::Configuration;
use crate::parser::errors::ParseError;
use crate::parser::features::FeatureExtractor;
use crate::parser::fix;
use crate::parser::transition::{Transition, TransitionTable};

/// Everything the parser needs besides the model, built once and shared
#[derive(Clone)]
pub struct ParserContext {
    pub lexicon: Arc<dyn Lexicon>,
    pub transitions: Arc<TransitionTable>,
    pub config: ParserConfig,
}

impl ParserContext {
    /// Context over the universal transition table
    pub fn new(lexicon: Arc<dyn Lexicon>, config: ParserConfig) -> Self {
        Self {
            lexicon,
            transitions: Arc::new(TransitionTable::universal()),
            config,
        }
    }

    pub fn with_transitions(mut self, transitions: TransitionTable) -> Self {
        self.transitions = Arc::new(transitions);
        self
    }

    pub fn feature_extractor(&self) -> FeatureExtractor {
        FeatureExtractor::new(self.lexicon.clone(), &self.config)
    }
}

impl std::fmt::Debug for ParserContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserContext")
            .field("lexicon_size", &self.lexicon.len())
            .field("transitions", &self.transitions.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Greedy arc-standard decoder driven by a transition scorer
pub struct Parser<S: Scorer> {
    context: ParserContext,
    extractor: FeatureExtractor,
    scorer: S,
}

impl<S: Scorer> Parser<S> {
    pub fn new(context: ParserContext, scorer: S) -> Self {
        let extractor = context.feature_extractor();
        Self { context, extractor, scorer }
    }

    pub fn context(&self) -> &ParserContext {
        &self.context
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Parse one tagged sentence.
    ///
    /// Each step applies the best-scoring legal transition. A sentence that
    /// does not terminate within `decode_step_cap` steps is a tarpit and no
    /// partial tree is returned.
    pub fn predict(&self, words: &[TaggedToken]) -> Result<SentenceGraph, ParseError> {
        let cap = self.context.config.decode_step_cap;
        let mut c = Configuration::new(words);
        let mut steps = 0;

        while !c.is_terminal() {
            if steps >= cap {
                log::debug!("Tarpit after {} steps: {}", steps, c);
                return Err(ParseError::Tarpit { steps, state: c.to_string() });
            }

            let features = self.extractor.extract(&c);
            let scores = self.scorer.score(&features)?;
            if scores.len() != self.context.transitions.len() {
                return Err(ParseError::ScoreCount {
                    expected: self.context.transitions.len(),
                    actual: scores.len(),
                });
            }

            let Some(t) = self.best_legal(&c, &scores) else {
                return Err(ParseError::Tarpit { steps, state: c.to_string() });
            };
            log::trace!("{} => {}", c, t);
            c.apply(&t);
            steps += 1;
        }

        let mut graph = c.into_graph();
        if self.context.config.apply_fixes {
            fix::fix(&mut graph);
        }
        Ok(graph)
    }

    /// Highest-scoring transition that is legal here; ties go to the lower id
    fn best_legal(&self, c: &Configuration, scores: &[f64]) -> Option<Transition> {
        let table = self.context.transitions.as_slice();
        let mut ranked: Vec<usize> = (0..table.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let best = table[*ranked.first()?];
        if c.can_apply(&best) {
            return Some(best);
        }
        let fallback = ranked.iter().map(|&i| table[i]).find(|t| c.can_apply(t));
        if let Some(t) = fallback {
            log::debug!("Best transition {} is illegal, falling back to {}", best, t);
        }
        fallback
    }

    /// Parse a batch in parallel, one result per input sentence
    pub fn parse_many(&self, sentences: &[Vec<TaggedToken>]) -> Vec<Result<SentenceGraph, ParseError>> {
        sentences.par_iter().map(|words| self.predict(words)).collect()
    }
}
