//! Thompson's construction: evaluates a postfix regex into an epsilon-NFA
//! using a stack of NFA fragments.
//!
//! States are arena-allocated integer handles for the whole construction;
//! string labels are only synthesized later, at normalization. A fragment
//! never needs to physically remove or
//! renumber a state when two states are merged (concatenation's single-final
//! case): the merged-away state is simply left unreferenced in the arena and
//! is dropped by the normalizer's reachability pass.

use crate::error::CompileError;
use crate::nfa::{Nfa, NfaState};
use crate::symbol::{CLOSE, CONCAT, ONE_OR_MORE, OPEN, UNION, ZERO_OR_MORE, ZERO_OR_ONE};
use std::rc::Rc;

#[derive(Debug, Default, Clone)]
struct BuilderState {
    epsilon: Vec<usize>,
    /// One entry per alphabet symbol, aligned to the builder's `alphabet`.
    transitions: Vec<Vec<usize>>,
}

impl BuilderState {
    fn new(alphabet_len: usize) -> Self {
        BuilderState {
            epsilon: Vec::new(),
            transitions: vec![Vec::new(); alphabet_len],
        }
    }
}

/// A partially-built NFA fragment: one entry point, one or more exit points.
#[derive(Debug, Clone)]
struct Fragment {
    start: usize,
    finals: Vec<usize>,
}

struct Builder {
    states: Vec<BuilderState>,
    alphabet: Vec<Rc<str>>,
}

impl Builder {
    fn new(alphabet: Vec<Rc<str>>) -> Self {
        Builder {
            states: Vec::new(),
            alphabet,
        }
    }

    fn new_state(&mut self) -> usize {
        let idx = self.states.len();
        self.states.push(BuilderState::new(self.alphabet.len()));
        idx
    }

    fn symbol_index(&self, c: char) -> usize {
        self.alphabet
            .iter()
            .position(|s| s.as_ref() == c.to_string())
            .expect("symbol was counted into the alphabet before construction started")
    }

    fn atom(&mut self, c: char) -> Fragment {
        let s = self.new_state();
        let f = self.new_state();
        let sym = self.symbol_index(c);
        self.states[s].transitions[sym].push(f);
        Fragment {
            start: s,
            finals: vec![f],
        }
    }

    /// Merges `old` into `survivor`: every outgoing edge of `old` is moved
    /// onto `survivor`, and every transition anywhere in the arena that
    /// targeted `old` is rewritten to target `survivor` instead. `old`
    /// becomes an orphaned, unreachable state.
    fn merge_state(&mut self, old: usize, survivor: usize) {
        if old == survivor {
            return;
        }
        let taken = std::mem::replace(&mut self.states[old], BuilderState::new(self.alphabet.len()));
        self.states[survivor].epsilon.extend(taken.epsilon);
        for (sym, targets) in taken.transitions.into_iter().enumerate() {
            self.states[survivor].transitions[sym].extend(targets);
        }
        for state in self.states.iter_mut() {
            for e in state.epsilon.iter_mut() {
                if *e == old {
                    *e = survivor;
                }
            }
            for targets in state.transitions.iter_mut() {
                for t in targets.iter_mut() {
                    if *t == old {
                        *t = survivor;
                    }
                }
            }
        }
    }

    fn concat(&mut self, n1: Fragment, n2: Fragment) -> Fragment {
        if n1.finals.len() == 1 {
            let survivor = n1.finals[0];
            self.merge_state(n2.start, survivor);
            Fragment {
                start: n1.start,
                finals: n2.finals,
            }
        } else {
            for &f in &n1.finals {
                self.states[f].epsilon.push(n2.start);
            }
            Fragment {
                start: n1.start,
                finals: n2.finals,
            }
        }
    }

    fn union(&mut self, n1: Fragment, n2: Fragment) -> Fragment {
        let start = self.new_state();
        self.states[start].epsilon.push(n1.start);
        self.states[start].epsilon.push(n2.start);
        let mut finals = n1.finals;
        finals.extend(n2.finals);
        Fragment { start, finals }
    }

    /// Collapses a fragment to a single final state if it has more than one,
    /// returning that state. Used by all three Kleene operators.
    fn consolidate(&mut self, frag: &mut Fragment) -> usize {
        if frag.finals.len() == 1 {
            return frag.finals[0];
        }
        let merged = self.new_state();
        for &f in &frag.finals {
            self.states[f].epsilon.push(merged);
        }
        frag.finals = vec![merged];
        merged
    }

    fn star(&mut self, mut frag: Fragment) -> Fragment {
        let f = self.consolidate(&mut frag);
        self.states[frag.start].epsilon.push(f);
        self.states[f].epsilon.push(frag.start);
        frag
    }

    fn plus(&mut self, mut frag: Fragment) -> Fragment {
        let f = self.consolidate(&mut frag);
        self.states[f].epsilon.push(frag.start);
        frag
    }

    fn optional(&mut self, mut frag: Fragment) -> Fragment {
        let f = self.consolidate(&mut frag);
        self.states[frag.start].epsilon.push(f);
        frag
    }
}

/// Evaluates `postfix` (already in postfix form, e.g. produced by
/// [`crate::regex::shunting_yard::to_postfix`]) into an [`Nfa`].
///
/// `alphabet` must contain exactly the literal operand characters that
/// appear in `postfix`, in first-seen left-to-right order.
pub fn build(postfix: &str, alphabet: Vec<Rc<str>>) -> Result<Nfa, CompileError> {
    let mut builder = Builder::new(alphabet.clone());
    let mut stack: Vec<Fragment> = Vec::new();

    for (pos, c) in postfix.chars().enumerate() {
        match c {
            CONCAT | UNION => {
                let n2 = stack.pop().ok_or(CompileError::MissingOperand { op: c, pos })?;
                let n1 = stack.pop().ok_or(CompileError::MissingOperand { op: c, pos })?;
                let frag = if c == CONCAT {
                    builder.concat(n1, n2)
                } else {
                    builder.union(n1, n2)
                };
                stack.push(frag);
            }
            ZERO_OR_MORE | ONE_OR_MORE | ZERO_OR_ONE => {
                let n = stack.pop().ok_or(CompileError::MissingOperand { op: c, pos })?;
                let frag = match c {
                    ZERO_OR_MORE => builder.star(n),
                    ONE_OR_MORE => builder.plus(n),
                    _ => builder.optional(n),
                };
                stack.push(frag);
            }
            OPEN | CLOSE => return Err(CompileError::UnexpectedCharacter(c, pos)),
            literal => stack.push(builder.atom(literal)),
        }
    }

    let frag = match stack.len() {
        0 => return Err(CompileError::EmptyRegex),
        1 => stack.pop().unwrap(),
        n => return Err(CompileError::DanglingFragments(n)),
    };

    let finals: std::collections::HashSet<usize> = frag.finals.into_iter().collect();
    let states = builder
        .states
        .into_iter()
        .enumerate()
        .map(|(idx, s)| NfaState {
            name: Rc::from(format!("s{idx}")),
            initial: idx == frag.start,
            accepting: finals.contains(&idx),
            epsilon_transitions: s.epsilon,
            transitions: s.transitions,
        })
        .collect();

    Ok(Nfa {
        alphabet: alphabet.into(),
        states,
        initial_state: frag.start,
    })
}
