use std::sync::Arc;

use crate::data::Lexicon;
use crate::parser::config::ParserConfig;
use crate::parser::configuration::{Annotation, Configuration};
use crate::parser::constants::{
    DEP_OFFSET, FEATURE_COUNT, FEATURE_NAMES, LABEL_FEATS_START, LABEL_FEATURES, POS_OFFSET,
    TAG_FEATS_START, WORD_FEATS_START, WORD_FEATURES,
};
use crate::types::{DependencyType, PosTag};

/// Absolute embedding indices, one per slot
pub type FeatureVector = [usize; FEATURE_COUNT];

/// Maps a configuration onto the fixed 48-slot feature layout.
///
/// Slots 0..18 hold word ids, 18..36 tag ordinals and 36..48 relation
/// ordinals, each shifted into its own segment of one shared index space
/// (tags first, then labels, then words).
#[derive(Clone)]
pub struct FeatureExtractor {
    lexicon: Arc<dyn Lexicon>,
    null_word: String,
    root_word: String,
    unknown_id: usize,
}

impl FeatureExtractor {
    pub fn new(lexicon: Arc<dyn Lexicon>, config: &ParserConfig) -> Self {
        let unknown_id = lexicon
            .id(&config.unknown_word)
            .unwrap_or_else(|| lexicon.unknown_id());
        Self {
            lexicon,
            null_word: config.null_word.clone(),
            root_word: config.root_word.clone(),
            unknown_id,
        }
    }

    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    /// Size of the index space a consuming embedding table must cover
    pub fn input_space(&self) -> usize {
        WORD_FEATS_START + self.lexicon.len()
    }

    fn word_id(&self, annotation: Annotation<'_>) -> usize {
        let word = match annotation {
            Annotation::Null => self.null_word.as_str(),
            Annotation::Root => self.root_word.as_str(),
            Annotation::Word(token) => token.value.as_str(),
        };
        self.lexicon.id(word).unwrap_or(self.unknown_id)
    }

    pub fn extract(&self, c: &Configuration) -> FeatureVector {
        let mut positions: Vec<Option<usize>> = Vec::with_capacity(WORD_FEATURES);
        let mut children: Vec<Option<usize>> = Vec::with_capacity(LABEL_FEATURES);

        for j in (0..=2).rev() {
            positions.push(c.stack_value(j));
        }
        for j in 0..=2 {
            positions.push(c.buffer_value(j));
        }
        for j in 0..=1 {
            let k = c.stack_value(j);
            children.push(c.lc(k, 1));
            children.push(c.rc(k, 1));
            children.push(c.lc(k, 2));
            children.push(c.rc(k, 2));
            children.push(c.lc(c.lc(k, 1), 1));
            children.push(c.rc(c.rc(k, 1), 1));
        }
        positions.extend_from_slice(&children);

        let mut features = [0usize; FEATURE_COUNT];
        for (i, &position) in positions.iter().enumerate() {
            let annotation = c.annotation(position);
            features[i] = self.word_id(annotation) + WORD_FEATS_START;
            features[POS_OFFSET + i] = annotation.tag().ordinal() + TAG_FEATS_START;
        }
        for (i, &child) in children.iter().enumerate() {
            features[DEP_OFFSET + i] = c.label(child).ordinal() + LABEL_FEATS_START;
        }
        features
    }

    /// Human-readable rendering of a feature vector, one `slot=value` per slot
    pub fn describe(&self, features: &[usize]) -> String {
        features
            .iter()
            .zip(FEATURE_NAMES.iter())
            .enumerate()
            .map(|(i, (&value, name))| {
                let decoded = if i < POS_OFFSET {
                    value
                        .checked_sub(WORD_FEATS_START)
                        .and_then(|id| self.lexicon.word(id))
                        .map(|w| format!("{:?}", w))
                } else if i < DEP_OFFSET {
                    value
                        .checked_sub(TAG_FEATS_START)
                        .and_then(PosTag::from_ordinal)
                        .map(|t| t.to_string())
                } else {
                    value
                        .checked_sub(LABEL_FEATS_START)
                        .and_then(DependencyType::from_ordinal)
                        .map(|l| l.to_string())
                };
                format!("{}={}", name, decoded.unwrap_or_else(|| format!("?{}", value)))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("lexicon_size", &self.lexicon.len())
            .field("unknown_id", &self.unknown_id)
            .finish()
    }
}
