//! Arc-standard transition parser
//!
//! This module is organized into the following submodules:
//! - `constants`: Feature layout and default caps
//! - `config`: Parser and trainer configuration (ParserConfig, TrainerConfig)
//! - `transition`: Moves, labelled transitions and the transition table
//! - `configuration`: Stack/buffer parse state over a sentence graph
//! - `arc_standard`: Legality and application of transitions
//! - `oracle`: Static oracle and gold-tree checks
//! - `features`: The 48-slot feature extractor
//! - `classifier`: Scoring interface and training examples
//! - `examples`: Oracle replay into training examples
//! - `driver`: Greedy decoding (Parser, ParserContext)
//! - `fix`: Proper-noun compound repair
//! - `evaluation`: UAS/LAS/UEM/root accuracy
//! - `trainer`: Epoch loop with cross validation

pub mod arc_standard;
pub mod classifier;
pub mod config;
pub mod configuration;
pub mod constants;
pub mod driver;
pub mod errors;
pub mod evaluation;
pub mod examples;
pub mod features;
pub mod fix;
pub mod oracle;
pub mod trainer;
pub mod transition;

// Re-export main types for convenience
pub use classifier::{Classifier, LookupClassifier, Scorer, TrainingExample};
pub use config::{ParserConfig, TrainerConfig};
pub use configuration::{Annotation, Configuration};
pub use constants::*;
pub use driver::{Parser, ParserContext};
pub use errors::{EvaluationError, ParseError};
pub use evaluation::{evaluate, Performance};
pub use examples::{shuffle_examples, ExampleGenerator, ExampleStats};
pub use features::{FeatureExtractor, FeatureVector};
pub use oracle::{check_gold, derive};
pub use trainer::Trainer;
pub use transition::{Move, Transition, TransitionTable, ALL_MOVES};
