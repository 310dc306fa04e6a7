use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::DependencyType;

/// Parser action: push the next buffer word, or attach one of the top two
/// stack entries to the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Shift,
    Left,
    Right,
}

/// Moves in transition-table order
pub const ALL_MOVES: [Move; 3] = [Move::Left, Move::Right, Move::Shift];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Shift => "Shift",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub action: Move,
    /// `NoDepType` for Shift, a real relation otherwise
    pub label: DependencyType,
}

impl Transition {
    pub const SHIFT: Transition = Transition {
        action: Move::Shift,
        label: DependencyType::NoDepType,
    };

    pub fn left(label: DependencyType) -> Self {
        Self { action: Move::Left, label }
    }

    pub fn right(label: DependencyType) -> Self {
        Self { action: Move::Right, label }
    }

    /// Shift carries no relation; arcs always carry one
    pub fn is_well_formed(&self) -> bool {
        match self.action {
            Move::Shift => self.label == DependencyType::NoDepType,
            Move::Left | Move::Right => self.label != DependencyType::NoDepType,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.action, self.label)
    }
}

/// Numbered transition alphabet; ids index the scorer's output.
///
/// Built move-major (`Left`, `Right`, `Shift`) over the label list, keeping
/// only well-formed pairs. Shift is always present, as the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
    ids: HashMap<Transition, usize>,
}

impl TransitionTable {
    pub fn new(labels: &[DependencyType]) -> Self {
        let mut transitions = Vec::new();
        for action in ALL_MOVES {
            if action == Move::Shift {
                transitions.push(Transition::SHIFT);
                continue;
            }
            for &label in labels {
                let t = Transition { action, label };
                if t.is_well_formed() && !transitions.contains(&t) {
                    transitions.push(t);
                }
            }
        }
        let ids = transitions.iter().enumerate().map(|(i, t)| (*t, i)).collect();
        Self { transitions, ids }
    }

    /// Every relation in ordinal order: `2 * (COUNT - 1) + 1` transitions
    pub fn universal() -> Self {
        Self::new(&DependencyType::ALL)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<Transition> {
        self.transitions.get(id).copied()
    }

    pub fn id_of(&self, transition: &Transition) -> Option<usize> {
        self.ids.get(transition).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    pub fn as_slice(&self) -> &[Transition] {
        &self.transitions
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::universal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_table_layout() {
        let table = TransitionTable::universal();
        let labels = DependencyType::COUNT - 1;
        assert_eq!(table.len(), 2 * labels + 1);
        assert_eq!(table.get(0), Some(Transition::left(DependencyType::Dep)));
        assert_eq!(table.get(labels), Some(Transition::right(DependencyType::Dep)));
        assert_eq!(table.get(2 * labels), Some(Transition::SHIFT));
        assert_eq!(table.get(2 * labels + 1), None);
    }

    #[test]
    fn test_lookup_round_trip() {
        let table = TransitionTable::universal();
        for (i, t) in table.iter().enumerate() {
            assert_eq!(table.id_of(t), Some(i));
        }
        let bogus = Transition { action: Move::Shift, label: DependencyType::NSubj };
        assert_eq!(table.id_of(&bogus), None);
    }

    #[test]
    fn test_restricted_labels() {
        let table = TransitionTable::new(&[
            DependencyType::Root,
            DependencyType::NSubj,
        ]);
        let listed: Vec<String> = table.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            listed,
            vec![
                "(Left, root)",
                "(Left, nsubj)",
                "(Right, root)",
                "(Right, nsubj)",
                "(Shift, _)",
            ]
        );
    }
}
