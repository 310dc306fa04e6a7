use std::fs;

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::GoldSentence;
use crate::digraph::SentenceGraph;
use crate::parser::classifier::Classifier;
use crate::parser::config::TrainerConfig;
use crate::parser::driver::{Parser, ParserContext};
use crate::parser::evaluation::{evaluate, Performance};
use crate::parser::examples::{shuffle_examples, ExampleGenerator};

/// Epoch loop around a trainable classifier, with periodic cross validation
pub struct Trainer<C: Classifier> {
    context: ParserContext,
    config: TrainerConfig,
    classifier: C,
    training_set: Vec<GoldSentence>,
    cross_val_set: Vec<GoldSentence>,
    history: Vec<Performance>,
}

impl<C: Classifier> Trainer<C> {
    pub fn new(context: ParserContext, classifier: C, config: TrainerConfig) -> Self {
        Self {
            context,
            config,
            classifier,
            training_set: Vec::new(),
            cross_val_set: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_training_set(mut self, sentences: Vec<GoldSentence>) -> Self {
        self.training_set = sentences;
        self
    }

    pub fn with_cross_validation_set(mut self, sentences: Vec<GoldSentence>) -> Self {
        self.cross_val_set = sentences;
        self
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn into_classifier(self) -> C {
        self.classifier
    }

    /// Every cross-validation result so far, in epoch order
    pub fn history(&self) -> &[Performance] {
        &self.history
    }

    fn pretrain_check(&self) -> Result<()> {
        if self.training_set.is_empty() {
            return Err(anyhow!("Cannot train with no training data set"));
        }
        if self.config.epochs == 0 {
            return Err(anyhow!("Cannot train for zero epochs"));
        }
        Ok(())
    }

    /// Train for the configured number of epochs.
    ///
    /// With a cross-validation set, evaluates every `eval_per_iter` epochs and
    /// after the last one, returning the best performance by UAS.
    pub fn train(&mut self) -> Result<Option<Performance>> {
        self.pretrain_check()?;

        let generator = ExampleGenerator::new(&self.context);
        let (mut examples, stats) = generator.make_examples(&self.training_set);
        if examples.is_empty() {
            return Err(anyhow!("No training examples could be generated ({})", stats));
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let epochs = self.config.epochs;
        let mut best: Option<Performance> = None;

        for e in 0..epochs {
            self.classifier
                .train(&examples)
                .with_context(|| format!("Training failed in epoch {}", e))?;

            let due = (self.config.eval_per_iter > 0 && e % self.config.eval_per_iter == 0)
                || e == epochs - 1;
            if due && !self.cross_val_set.is_empty() {
                let mut perf = self.cross_validate()?;
                perf.iter = e;
                log::info!("Cross validation\n{}", perf);
                self.history.push(perf);

                if best.map_or(true, |b| perf.uas > b.uas) {
                    best = Some(perf);
                    self.save_best(&perf)?;
                }
            }

            shuffle_examples(&mut examples, &mut rng);
        }
        Ok(best)
    }

    fn save_best(&self, perf: &Performance) -> Result<()> {
        let Some(path) = &self.config.save_best else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(perf)?;
        fs::write(path, json)
            .with_context(|| format!("Unable to write best performance to {}", path.display()))?;
        log::info!("Saved best performance (UAS {:.5}) to {}", perf.uas, path.display());
        Ok(())
    }

    /// Parse the cross-validation set with the current model and score it.
    /// Sentences that fail to parse count as unattached trees.
    pub fn cross_validate(&self) -> Result<Performance> {
        let parser = Parser::new(self.context.clone(), &self.classifier);

        let mut golds = Vec::with_capacity(self.cross_val_set.len());
        let mut inputs = Vec::with_capacity(self.cross_val_set.len());
        for (i, sentence) in self.cross_val_set.iter().enumerate() {
            match sentence.to_graph() {
                Ok(gold) => {
                    golds.push(gold);
                    inputs.push(sentence.tagged());
                }
                Err(e) => log::warn!("Skipping cross validation sentence {}: {}", i, e),
            }
        }

        let predicted: Vec<SentenceGraph> = parser
            .parse_many(&inputs)
            .into_iter()
            .zip(&inputs)
            .map(|(result, words)| {
                result.unwrap_or_else(|e| {
                    log::warn!("Failed to parse cross validation sentence: {}", e);
                    SentenceGraph::from_tagged(words)
                })
            })
            .collect();

        Ok(evaluate(&predicted, &golds)?)
    }
}
