//! Static oracle: the canonical transition for a state given the gold tree

use crate::digraph::SentenceGraph;
use crate::parser::configuration::Configuration;
use crate::parser::errors::ParseError;
use crate::parser::transition::Transition;

impl Configuration {
    /// The gold transition for the current state.
    ///
    /// Left wins over Right, and Right over Shift. Right only fires once the
    /// top word has collected all of its gold children.
    pub fn oracle(&self, gold: &SentenceGraph) -> Transition {
        let (Some(w1), Some(w2)) = (self.stack_value(1), self.stack_value(0)) else {
            return Transition::SHIFT;
        };

        if w1 > 0 && gold.head(w1) == Some(w2) {
            Transition::left(gold.label(w1))
        } else if gold.head(w2) == Some(w1) && !self.has_other_children(w2, gold) {
            Transition::right(gold.label(w2))
        } else {
            Transition::SHIFT
        }
    }
}

/// Reject gold trees the oracle cannot reproduce
pub fn check_gold(gold: &SentenceGraph) -> Result<(), ParseError> {
    if !gold.is_legal() || !gold.is_projective() {
        return Err(ParseError::NonProjective { words: gold.n() });
    }
    Ok(())
}

/// Replay the oracle from an empty state, returning the transition sequence
/// and the rebuilt tree
pub fn derive(gold: &SentenceGraph, step_cap: usize) -> Result<(Vec<Transition>, SentenceGraph), ParseError> {
    check_gold(gold)?;

    let mut c = Configuration::from_gold(gold);
    let mut transitions = Vec::with_capacity(2 * gold.n());
    while !c.is_terminal() {
        if transitions.len() >= step_cap {
            return Err(ParseError::Tarpit { steps: transitions.len(), state: c.to_string() });
        }
        let t = c.oracle(gold);
        if !c.apply_gold(&t) {
            return Err(ParseError::Tarpit { steps: transitions.len(), state: c.to_string() });
        }
        transitions.push(t);
    }
    Ok((transitions, c.into_graph()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::transition::Move;
    use crate::data::{GoldSentence, GoldToken};
    use crate::testutil;
    use crate::types::{DependencyType, PosTag};

    #[test]
    fn test_oracle_reproduces_gold_heads() {
        let gold = testutil::graph(testutil::MED);
        let (transitions, parsed) = derive(&gold, 1000).unwrap();

        let heads: Vec<usize> = parsed.heads().into_iter().map(|h| h.unwrap()).collect();
        assert_eq!(
            heads,
            vec![2, 5, 4, 5, 0, 7, 5, 9, 5, 11, 9, 14, 14, 11, 18, 18, 18, 14, 5]
        );
        assert_eq!(parsed.labels(), gold.labels());
        assert_eq!(transitions.len(), 2 * gold.n());
    }

    #[test]
    fn test_oracle_on_all_fixtures() {
        for fixture in [testutil::SIMPLE, testutil::NNPS, testutil::LONG] {
            let gold = testutil::graph(fixture);
            let (_, parsed) = derive(&gold, 1000).unwrap();
            assert_eq!(parsed.heads(), gold.heads());
            assert_eq!(parsed.labels(), gold.labels());
        }
    }

    #[test]
    fn test_oracle_priority() {
        // 1 <- 2 and 2 -> 3: with [0, 1, 2] on the stack, Left must come first
        let gold = testutil::graph_from_heads(&[2, 0, 2]);
        let mut c = Configuration::from_gold(&gold);
        assert_eq!(c.oracle(&gold), Transition::SHIFT);
        c.shift();
        c.shift();
        let t = c.oracle(&gold);
        assert_eq!(t.action, Move::Left);
        c.apply(&t);
        // 2 still waits for its right child 3
        assert_eq!(c.oracle(&gold), Transition::SHIFT);
        c.shift();
        assert_eq!(c.oracle(&gold).action, Move::Right);
    }

    #[test]
    fn test_non_projective_rejected() {
        let gold = testutil::graph_from_heads(&[3, 4, 0, 3]);
        assert!(!gold.is_projective());
        assert!(derive(&gold, 1000).unwrap_err().is_non_projective());
    }

    #[test]
    fn test_step_cap_yields_tarpit() {
        let gold = testutil::graph(testutil::SIMPLE);
        let err = derive(&gold, 5).unwrap_err();
        match err {
            ParseError::Tarpit { steps, .. } => assert_eq!(steps, 5),
            other => panic!("expected tarpit, got {}", other),
        }
    }

    #[test]
    fn test_final_transition_is_right_root() {
        let gold = testutil::graph(testutil::SIMPLE);
        let (transitions, _) = derive(&gold, 1000).unwrap();
        assert_eq!(transitions.last(), Some(&Transition::right(DependencyType::Root)));
    }

    #[test]
    fn test_root_word_may_carry_any_relation() {
        let gold = GoldSentence::new(vec![
            GoldToken { word: "a".into(), tag: PosTag::Det, head: 2, label: DependencyType::Det },
            GoldToken { word: "b".into(), tag: PosTag::Noun, head: 0, label: DependencyType::Dep },
        ])
        .to_graph()
        .unwrap();
        assert!(gold.is_legal() && gold.is_projective());

        let (transitions, parsed) = derive(&gold, 1000).unwrap();
        assert_eq!(transitions.last(), Some(&Transition::right(DependencyType::Dep)));
        assert_eq!(parsed.heads(), gold.heads());
        assert_eq!(parsed.labels(), vec![DependencyType::Det, DependencyType::Dep]);
    }
}
