//! Universal dependency relation set.
//!
//! Ordinals feed both the transition table and the label features, so the
//! variant order is fixed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown dependency relation: {0}")]
pub struct UnknownDependencyType(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DependencyType {
    /// No relation; the label carried by Shift and by unattached tokens
    #[default]
    NoDepType,
    Dep,
    Root,

    NSubj,
    NSubjPass,
    DObj,
    IObj,

    CSubj,
    CSubjPass,
    CComp,
    XComp,

    NumMod,
    Appos,
    NMod,

    ACl,
    AClRelCl,
    Det,
    DetPreDet,

    AMod,
    Neg,
    Case,

    NModNPMod,
    NModTMod,
    NModPoss,

    AdvCl,
    AdvMod,

    Compound,
    CompoundPart,
    Name,
    Mwe,
    Foreign,
    GoesWith,

    List,
    Dislocated,
    Parataxis,
    Remnant,
    Reparandum,

    Vocative,
    Discourse,
    Expl,

    Aux,
    AuxPass,
    Cop,

    Mark,
    Punct,

    Conj,
    Coordination,
    CcPreConj,
}

impl DependencyType {
    pub const COUNT: usize = 48;

    pub const ALL: [DependencyType; DependencyType::COUNT] = [
        DependencyType::NoDepType,
        DependencyType::Dep,
        DependencyType::Root,
        DependencyType::NSubj,
        DependencyType::NSubjPass,
        DependencyType::DObj,
        DependencyType::IObj,
        DependencyType::CSubj,
        DependencyType::CSubjPass,
        DependencyType::CComp,
        DependencyType::XComp,
        DependencyType::NumMod,
        DependencyType::Appos,
        DependencyType::NMod,
        DependencyType::ACl,
        DependencyType::AClRelCl,
        DependencyType::Det,
        DependencyType::DetPreDet,
        DependencyType::AMod,
        DependencyType::Neg,
        DependencyType::Case,
        DependencyType::NModNPMod,
        DependencyType::NModTMod,
        DependencyType::NModPoss,
        DependencyType::AdvCl,
        DependencyType::AdvMod,
        DependencyType::Compound,
        DependencyType::CompoundPart,
        DependencyType::Name,
        DependencyType::Mwe,
        DependencyType::Foreign,
        DependencyType::GoesWith,
        DependencyType::List,
        DependencyType::Dislocated,
        DependencyType::Parataxis,
        DependencyType::Remnant,
        DependencyType::Reparandum,
        DependencyType::Vocative,
        DependencyType::Discourse,
        DependencyType::Expl,
        DependencyType::Aux,
        DependencyType::AuxPass,
        DependencyType::Cop,
        DependencyType::Mark,
        DependencyType::Punct,
        DependencyType::Conj,
        DependencyType::Coordination,
        DependencyType::CcPreConj,
    ];

    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn as_str(self) -> &'static str {
        use DependencyType::*;
        match self {
            NoDepType => "_",
            Dep => "dep",
            Root => "root",
            NSubj => "nsubj",
            NSubjPass => "nsubjpass",
            DObj => "dobj",
            IObj => "iobj",
            CSubj => "csubj",
            CSubjPass => "csubjpass",
            CComp => "ccomp",
            XComp => "xcomp",
            NumMod => "nummod",
            Appos => "appos",
            NMod => "nmod",
            ACl => "acl",
            AClRelCl => "acl:relcl",
            Det => "det",
            DetPreDet => "det:predet",
            AMod => "amod",
            Neg => "neg",
            Case => "case",
            NModNPMod => "nmod:npmod",
            NModTMod => "nmod:tmod",
            NModPoss => "nmod:poss",
            AdvCl => "advcl",
            AdvMod => "advmod",
            Compound => "compound",
            CompoundPart => "compound:prt",
            Name => "name",
            Mwe => "mwe",
            Foreign => "foreign",
            GoesWith => "goeswith",
            List => "list",
            Dislocated => "dislocated",
            Parataxis => "parataxis",
            Remnant => "remnant",
            Reparandum => "reparandum",
            Vocative => "vocative",
            Discourse => "discourse",
            Expl => "expl",
            Aux => "aux",
            AuxPass => "auxpass",
            Cop => "cop",
            Mark => "mark",
            Punct => "punct",
            Conj => "conj",
            Coordination => "cc",
            CcPreConj => "cc:preconj",
        }
    }

    /// Labels usable on Left/Right arcs, in ordinal order
    pub fn real_labels() -> impl Iterator<Item = DependencyType> {
        Self::ALL.into_iter().filter(|l| *l != DependencyType::NoDepType)
    }

    pub fn is_compound(self) -> bool {
        matches!(self, DependencyType::Compound | DependencyType::CompoundPart)
    }

    pub fn is_modifier(self) -> bool {
        self == DependencyType::AMod
    }

    pub fn is_determiner(self) -> bool {
        matches!(self, DependencyType::Det | DependencyType::DetPreDet)
    }

    pub fn is_multiword(self) -> bool {
        matches!(
            self,
            DependencyType::Mwe
                | DependencyType::Compound
                | DependencyType::CompoundPart
                | DependencyType::Parataxis
        )
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyType {
    type Err = UnknownDependencyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        // UD v2 spellings of relations that exist here under their v1 names
        let alias = match lower.as_str() {
            "" | "nodeptype" => Some(DependencyType::NoDepType),
            "obj" => Some(DependencyType::DObj),
            "nsubj:pass" => Some(DependencyType::NSubjPass),
            "csubj:pass" => Some(DependencyType::CSubjPass),
            "aux:pass" => Some(DependencyType::AuxPass),
            "obl" => Some(DependencyType::NMod),
            "flat" | "flat:name" => Some(DependencyType::Name),
            "fixed" => Some(DependencyType::Mwe),
            "cc:pre" => Some(DependencyType::CcPreConj),
            _ => None,
        };
        if let Some(label) = alias {
            return Ok(label);
        }
        Self::ALL
            .iter()
            .find(|l| l.as_str() == lower)
            .copied()
            .ok_or_else(|| UnknownDependencyType(s.to_string()))
    }
}

impl TryFrom<String> for DependencyType {
    type Error = UnknownDependencyType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DependencyType> for String {
    fn from(label: DependencyType) -> Self {
        label.as_str().to_string()
    }
}
