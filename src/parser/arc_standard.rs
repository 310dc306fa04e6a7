//! Arc-standard legality and transition semantics

use crate::parser::configuration::Configuration;
use crate::parser::transition::{Move, Transition};
use crate::types::DependencyType;

impl Configuration {
    /// Whether `t` may be applied while decoding.
    ///
    /// Arcs need two real operands on the stack; the final `Right` onto ROOT
    /// is allowed once the buffer is empty and must carry the `Root` label.
    pub fn can_apply(&self, t: &Transition) -> bool {
        self.permits(t, true)
    }

    /// Whether `t` may be applied while replaying a gold tree. Gold trees may
    /// attach their root word to ROOT under any relation, so the `Root`
    /// label is not enforced here.
    pub fn can_apply_gold(&self, t: &Transition) -> bool {
        self.permits(t, false)
    }

    fn permits(&self, t: &Transition, root_label: bool) -> bool {
        if !t.is_well_formed() {
            return false;
        }

        let stack_size = self.stack_size();
        let buffer_size = self.buffer_size();
        let bad_root_arc = |head: usize| root_label && head == 0 && t.label != DependencyType::Root;

        match t.action {
            Move::Shift => buffer_size > 0,
            Move::Left => {
                let (Some(head), Some(dependent)) = (self.stack_value(0), self.stack_value(1)) else {
                    return false;
                };
                if dependent == 0 || bad_root_arc(head) {
                    return false;
                }
                stack_size > 2
            }
            Move::Right => {
                let Some(head) = self.stack_value(1) else {
                    return false;
                };
                if bad_root_arc(head) {
                    return false;
                }
                stack_size > 2 || (stack_size == 2 && buffer_size == 0)
            }
        }
    }

    /// Apply `t`; returns false and leaves the state untouched when it is illegal
    pub fn apply(&mut self, t: &Transition) -> bool {
        if !self.can_apply(t) {
            log::debug!("Refusing illegal transition {} at {}", t, self);
            return false;
        }
        self.perform(t)
    }

    /// Apply an oracle transition, checked with [`Configuration::can_apply_gold`]
    pub fn apply_gold(&mut self, t: &Transition) -> bool {
        if !self.can_apply_gold(t) {
            log::debug!("Refusing illegal oracle transition {} at {}", t, self);
            return false;
        }
        self.perform(t)
    }

    fn perform(&mut self, t: &Transition) -> bool {
        log::trace!("Applying {}", t);
        match t.action {
            Move::Shift => self.shift(),
            Move::Left | Move::Right => {
                let (Some(w1), Some(w2)) = (self.stack_value(1), self.stack_value(0)) else {
                    return false;
                };
                if t.action == Move::Left {
                    self.graph_mut().add_arc(w2, w1, t.label);
                    self.remove_second_top_stack()
                } else {
                    self.graph_mut().add_arc(w1, w2, t.label);
                    self.remove_top_stack()
                }
            }
        }
    }
}
