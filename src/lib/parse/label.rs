use std::collections::HashMap;
use std::collections::HashSet;

use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpClass {
    Backward,
    /// Target not defined yet. Becomes a bad jump if it never is.
    Forward,
}

/// Label definitions and jump targets, in source order.
#[derive(Debug, Default)]
pub struct LabelResolver {
    // first-seen order of defined labels, plus a set for lookups
    order: Vec<String>,
    defined: HashSet<String>,
    // multiset of unresolved forward targets
    pending: HashMap<String, usize>,
    pending_total: usize,

    pub labels: usize,
    pub jumps: usize,
    pub forward_jumps_attempted: usize,
    pub backward_jumps: usize,
    pub returns: usize,
}
impl LabelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redefinitions are counted again and are not an error.
    pub fn define_label(&mut self, name: &str) {
        self.labels += 1;
        if self.defined.insert(name.to_owned()) {
            self.order.push(name.to_owned());
        }

        if let Some(n) = self.pending.remove(name) {
            self.pending_total -= n;
            event!(Level::TRACE, "label {} resolves {} forward jump(s)", name, n);
        }
    }

    pub fn record_jump(&mut self, target: &str) -> JumpClass {
        self.jumps += 1;
        if self.defined.contains(target) {
            self.backward_jumps += 1;
            JumpClass::Backward
        } else {
            *self.pending.entry(target.to_owned()).or_insert(0) += 1;
            self.pending_total += 1;
            self.forward_jumps_attempted += 1;
            JumpClass::Forward
        }
    }

    pub fn record_return(&mut self) {
        self.jumps += 1;
        self.returns += 1;
    }

    pub fn defined_labels(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Jumps whose target has not been defined (so far).
    pub fn bad_jumps(&self) -> usize {
        self.pending_total
    }

    pub fn unresolved_targets(&self) -> impl Iterator<Item = (&str, usize)> {
        self.pending.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
