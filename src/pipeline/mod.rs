//! Streaming tagger -> parser pipeline.
//!
//! Every stage runs on its own thread and talks to the next one through a
//! bounded queue. Each stage also owns an error queue; the first error
//! received from any stage stops the whole pipeline. Closing the input is the
//! only way a healthy pipeline ends.

use std::thread;

use crossbeam_channel::{bounded, never, select, Receiver, Sender};
use thiserror::Error;

use crate::data::TaggedToken;
use crate::digraph::SentenceGraph;
use crate::parser::{Parser, Scorer};

const TAGGER_STAGE: &str = "tagger";
const PARSER_STAGE: &str = "parser";

/// Turns raw sentence text into tagged tokens
pub trait Tagger: Send + Sync {
    fn tag(&self, sentence: &str) -> anyhow::Result<Vec<TaggedToken>>;
}

impl<F> Tagger for F
where
    F: Fn(&str) -> anyhow::Result<Vec<TaggedToken>> + Send + Sync,
{
    fn tag(&self, sentence: &str) -> anyhow::Result<Vec<TaggedToken>> {
        self(sentence)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} stage failed: {source}")]
    StageFailed {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::StageFailed { stage, .. } => stage,
        }
    }
}

pub struct Pipeline<'a, T: Tagger, S: Scorer> {
    tagger: &'a T,
    parser: &'a Parser<S>,
    capacity: usize,
}

impl<'a, T: Tagger, S: Scorer> Pipeline<'a, T, S> {
    /// Queue bounds come from the parser's `channel_capacity`
    pub fn new(tagger: &'a T, parser: &'a Parser<S>) -> Self {
        let capacity = parser.context().config.channel_capacity.max(1);
        Self { tagger, parser, capacity }
    }

    /// Stream `input` through tagging and parsing, returning the trees in
    /// input order, or the first error raised by any stage
    pub fn run<I>(&self, input: I) -> Result<Vec<SentenceGraph>, PipelineError>
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: Send,
    {
        let input = input.into_iter();
        thread::scope(|s| {
            let (raw_tx, raw_rx) = bounded::<String>(self.capacity);
            let (tagged_tx, tagged_rx) = bounded::<Vec<TaggedToken>>(self.capacity);
            let (out_tx, out_rx) = bounded::<SentenceGraph>(self.capacity);
            let (tag_err_tx, tag_err_rx) = bounded::<PipelineError>(1);
            let (parse_err_tx, parse_err_rx) = bounded::<PipelineError>(1);

            s.spawn(move || {
                for sentence in input {
                    if raw_tx.send(sentence).is_err() {
                        break;
                    }
                }
            });

            let tagger = self.tagger;
            s.spawn(move || tag_stage(tagger, raw_rx, tagged_tx, tag_err_tx));

            let parser = self.parser;
            s.spawn(move || parse_stage(parser, tagged_rx, out_tx, parse_err_tx));

            collect(out_rx, tag_err_rx, parse_err_rx)
        })
    }
}

fn tag_stage<T: Tagger>(
    tagger: &T,
    input: Receiver<String>,
    output: Sender<Vec<TaggedToken>>,
    errors: Sender<PipelineError>,
) {
    for sentence in input {
        match tagger.tag(&sentence) {
            Ok(tokens) => {
                if output.send(tokens).is_err() {
                    return;
                }
            }
            Err(source) => {
                let _ = errors.send(PipelineError::StageFailed { stage: TAGGER_STAGE, source });
                return;
            }
        }
    }
}

fn parse_stage<S: Scorer>(
    parser: &Parser<S>,
    input: Receiver<Vec<TaggedToken>>,
    output: Sender<SentenceGraph>,
    errors: Sender<PipelineError>,
) {
    for words in input {
        log::debug!("Parsing sentence of {} words", words.len());
        match parser.predict(&words) {
            Ok(graph) => {
                if output.send(graph).is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = errors.send(PipelineError::StageFailed {
                    stage: PARSER_STAGE,
                    source: e.into(),
                });
                return;
            }
        }
    }
}

enum Event {
    Graph(SentenceGraph),
    OutputClosed,
    Failed(PipelineError),
    TaggerDone,
    ParserDone,
}

/// Drain the output until it closes or a stage reports an error.
/// Dropping the receivers on return unblocks any stage still sending.
fn collect(
    output: Receiver<SentenceGraph>,
    mut tag_errors: Receiver<PipelineError>,
    mut parse_errors: Receiver<PipelineError>,
) -> Result<Vec<SentenceGraph>, PipelineError> {
    let mut graphs = Vec::new();
    loop {
        let event = select! {
            recv(output) -> msg => msg.map_or(Event::OutputClosed, Event::Graph),
            recv(tag_errors) -> msg => msg.map_or(Event::TaggerDone, Event::Failed),
            recv(parse_errors) -> msg => msg.map_or(Event::ParserDone, Event::Failed),
        };
        match event {
            Event::Graph(graph) => graphs.push(graph),
            Event::OutputClosed => break,
            Event::Failed(e) => return Err(e),
            // a finished stage's error queue stays disconnected; stop selecting on it
            Event::TaggerDone => tag_errors = never(),
            Event::ParserDone => parse_errors = never(),
        }
    }

    // The output can close right after a stage reported its error
    for errors in [&tag_errors, &parse_errors] {
        if let Ok(e) = errors.try_recv() {
            return Err(e);
        }
    }
    Ok(graphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Vocabulary;
    use crate::parser::{ParserConfig, ParserContext, Transition};
    use crate::types::PosTag;
    use anyhow::anyhow;
    use std::sync::Arc;

    /// Always prefers Shift; the fallback completes the tree
    struct ShiftFirst(usize, usize);

    impl Scorer for ShiftFirst {
        fn score(&self, _features: &[usize]) -> anyhow::Result<Vec<f64>> {
            let mut scores = vec![0.0; self.1];
            scores[self.0] = 1.0;
            Ok(scores)
        }
    }

    fn parser(config: ParserConfig) -> Parser<ShiftFirst> {
        let ctx = ParserContext::new(Arc::new(Vocabulary::new()), config);
        let n = ctx.transitions.len();
        let shift = ctx.transitions.id_of(&Transition::SHIFT).unwrap_or(0);
        Parser::new(ctx, ShiftFirst(shift, n))
    }

    fn whitespace_tagger(sentence: &str) -> anyhow::Result<Vec<TaggedToken>> {
        Ok(sentence
            .split_whitespace()
            .map(|w| TaggedToken::new(w, PosTag::Noun))
            .collect())
    }

    #[test]
    fn test_results_in_input_order() {
        let parser = parser(ParserConfig { channel_capacity: 2, ..ParserConfig::default() });
        let tagger = whitespace_tagger;
        let input: Vec<String> = (1..=20).map(|n| vec!["w"; n].join(" ")).collect();

        let graphs = Pipeline::new(&tagger, &parser).run(input).unwrap();
        assert_eq!(graphs.len(), 20);
        for (i, graph) in graphs.iter().enumerate() {
            assert_eq!(graph.n(), i + 1);
            assert!(graph.has_single_root());
        }
    }

    #[test]
    fn test_empty_input() {
        let parser = parser(ParserConfig::default());
        let tagger = whitespace_tagger;
        let graphs = Pipeline::new(&tagger, &parser).run(Vec::<String>::new()).unwrap();
        assert!(graphs.is_empty());
    }

    #[test]
    fn test_tagger_error_halts() {
        let parser = parser(ParserConfig { channel_capacity: 1, ..ParserConfig::default() });
        let tagger = |sentence: &str| {
            if sentence.contains('!') {
                Err(anyhow!("cannot tag {:?}", sentence))
            } else {
                whitespace_tagger(sentence)
            }
        };
        let input = (0..100).map(|i| if i == 3 { "oops !".to_string() } else { "a b".to_string() });

        let err = Pipeline::new(&tagger, &parser).run(input).unwrap_err();
        assert_eq!(err.stage(), "tagger");
        assert!(err.to_string().contains("cannot tag"));
    }

    #[test]
    fn test_parser_tarpit_halts() {
        let parser = parser(ParserConfig { decode_step_cap: 4, ..ParserConfig::default() });
        let tagger = whitespace_tagger;
        let input = vec!["a".to_string(), "a b c d e".to_string(), "a".to_string()];

        let err = Pipeline::new(&tagger, &parser).run(input).unwrap_err();
        assert_eq!(err.stage(), "parser");
        assert!(err.to_string().contains("tarpit"));
    }
}
