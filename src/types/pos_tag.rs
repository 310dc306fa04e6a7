//! Universal part-of-speech tag set.
//!
//! The ordinal of each tag is part of the feature contract: tag features are
//! written into the feature vector as raw ordinals, so the order below must
//! never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown POS tag: {0}")]
pub struct UnknownPosTag(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PosTag {
    /// Null tag, used for positions that do not exist
    #[default]
    X,
    UnknownTag,
    RootTag,
    Adj,
    Adp,
    Adv,
    Aux,
    Conj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
}

impl PosTag {
    pub const COUNT: usize = 19;

    pub const ALL: [PosTag; PosTag::COUNT] = [
        PosTag::X,
        PosTag::UnknownTag,
        PosTag::RootTag,
        PosTag::Adj,
        PosTag::Adp,
        PosTag::Adv,
        PosTag::Aux,
        PosTag::Conj,
        PosTag::Det,
        PosTag::Intj,
        PosTag::Noun,
        PosTag::Num,
        PosTag::Part,
        PosTag::Pron,
        PosTag::Propn,
        PosTag::Punct,
        PosTag::Sconj,
        PosTag::Sym,
        PosTag::Verb,
    ];

    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::X => "X",
            PosTag::UnknownTag => "UNKNOWN_TAG",
            PosTag::RootTag => "ROOT_TAG",
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Conj => "CONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
        }
    }

    pub fn is_proper_noun(self) -> bool {
        self == PosTag::Propn
    }

    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }

    pub fn is_verb(self) -> bool {
        self == PosTag::Verb
    }

    pub fn is_number(self) -> bool {
        self == PosTag::Num
    }

    pub fn is_symbol(self) -> bool {
        matches!(self, PosTag::Sym | PosTag::Punct)
    }

    /// Map a Penn Treebank tag onto the universal set
    fn from_penn(tag: &str) -> Option<Self> {
        let tag = match tag {
            "NN" | "NNS" => PosTag::Noun,
            "NNP" | "NNPS" => PosTag::Propn,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => PosTag::Verb,
            "MD" => PosTag::Aux,
            "JJ" | "JJR" | "JJS" | "AFX" => PosTag::Adj,
            "RB" | "RBR" | "RBS" | "WRB" => PosTag::Adv,
            "IN" => PosTag::Adp,
            "TO" | "RP" | "POS" => PosTag::Part,
            "DT" | "PDT" | "WDT" => PosTag::Det,
            "PRP" | "PRP$" | "WP" | "WP$" | "EX" => PosTag::Pron,
            "CC" => PosTag::Conj,
            "CD" => PosTag::Num,
            "UH" => PosTag::Intj,
            "$" | "#" => PosTag::Sym,
            "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "HYPH" | "NFP" => PosTag::Punct,
            "FW" | "LS" | "ADD" | "GW" | "XX" => PosTag::X,
            _ => return None,
        };
        Some(tag)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosTag {
    type Err = UnknownPosTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "CCONJ" {
            return Ok(PosTag::Conj);
        }
        if let Some(tag) = Self::ALL.iter().find(|t| t.as_str() == upper) {
            return Ok(*tag);
        }
        Self::from_penn(&upper).ok_or_else(|| UnknownPosTag(s.to_string()))
    }
}

impl TryFrom<String> for PosTag {
    type Error = UnknownPosTag;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PosTag> for String {
    fn from(tag: PosTag) -> Self {
        tag.as_str().to_string()
    }
}
