//! Feature layout and decode limits shared across the parser

use crate::types::{DependencyType, PosTag};

/// Returned by stack, buffer and child queries that fall outside the configuration
pub const DOES_NOT_EXIST: Option<usize> = None;

pub const WORD_FEATURES: usize = 18;
pub const TAG_FEATURES: usize = 18;
pub const LABEL_FEATURES: usize = 12;

/// Length of every feature vector
pub const FEATURE_COUNT: usize = WORD_FEATURES + TAG_FEATURES + LABEL_FEATURES;

/// First tag slot in the feature vector
pub const POS_OFFSET: usize = WORD_FEATURES;
/// First label slot in the feature vector
pub const DEP_OFFSET: usize = WORD_FEATURES + TAG_FEATURES;

// Embedding index space: tags, then labels, then words
pub const TAG_FEATS_START: usize = 0;
pub const LABEL_FEATS_START: usize = PosTag::COUNT;
pub const WORD_FEATS_START: usize = PosTag::COUNT + DependencyType::COUNT;

pub const DEFAULT_DECODE_STEP_CAP: usize = 1000;
pub const DEFAULT_ORACLE_STEP_CAP: usize = 1000;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Slot names in vector order, used when describing a feature vector
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "s2w", "s1w", "s0w", "b0w", "b1w", "b2w",
    "s0l1w", "s0r1w", "s0l2w", "s0r2w", "s0llw", "s0rrw",
    "s1l1w", "s1r1w", "s1l2w", "s1r2w", "s1llw", "s1rrw",
    "s2t", "s1t", "s0t", "b0t", "b1t", "b2t",
    "s0l1t", "s0r1t", "s0l2t", "s0r2t", "s0llt", "s0rrt",
    "s1l1t", "s1r1t", "s1l2t", "s1r2t", "s1llt", "s1rrt",
    "s0l1d", "s0r1d", "s0l2d", "s0r2d", "s0lld", "s0rrd",
    "s1l1d", "s1r1d", "s1l2d", "s1r2d", "s1lld", "s1rrd",
];
