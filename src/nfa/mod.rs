//!# nfa
//!
//! Epsilon-NFA data structure, produced by [`crate::regex::regex_to_nfa`] and
//! consumed by [`Nfa::normalize`] and [`Nfa::to_dfa`].
//!
//! States are stored in a flat `Vec` and referenced by index; a state also
//! carries a display name (`Rc<str>`), which is an arbitrary fresh token
//! during construction and a canonical `Q1, Q2, ...` label once
//! [`Nfa::normalize`] has run.

pub mod builder;
pub mod parse;

use crate::dfa::{Dfa, DfaState};
use crate::symbol;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A single NFA state: its name, initial/accepting flags, and its outgoing
/// epsilon and labeled transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    pub(crate) name: Rc<str>,
    pub(crate) initial: bool,
    pub(crate) accepting: bool,
    pub(crate) epsilon_transitions: Vec<usize>,
    /// One entry per symbol in the owning [`Nfa`]'s alphabet, in the same
    /// order; each entry may name zero or more target states.
    pub(crate) transitions: Vec<Vec<usize>>,
}

impl NfaState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn epsilon_transitions(&self) -> &[usize] {
        &self.epsilon_transitions
    }

    pub fn transitions(&self) -> &[Vec<usize>] {
        &self.transitions
    }
}

/// An epsilon-NFA: `(Q, q0, F, δ, Σ)` with `δ: Q × (Σ ∪ {ε}) → 𝒫(Q)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) alphabet: Rc<[Rc<str>]>,
    pub(crate) states: Vec<NfaState>,
    pub(crate) initial_state: usize,
}

impl Nfa {
    pub fn alphabet(&self) -> &[Rc<str>] {
        &self.alphabet
    }

    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn initial_state(&self) -> &NfaState {
        &self.states[self.initial_state]
    }

    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    /// Epsilon-closure of a single state: the least set containing `start`
    /// and closed under following epsilon transitions.
    pub fn closure(&self, start: usize) -> HashSet<usize> {
        let mut set = HashSet::new();
        let mut stack = vec![start];
        set.insert(start);
        while let Some(s) = stack.pop() {
            for &eps in &self.states[s].epsilon_transitions {
                if set.insert(eps) {
                    stack.push(eps);
                }
            }
        }
        set
    }

    /// Epsilon-closure of a set of states: the union of each member's
    /// closure.
    pub fn closure_set(&self, states: &HashSet<usize>) -> HashSet<usize> {
        let mut out = HashSet::new();
        for &s in states {
            out.extend(self.closure(s));
        }
        out
    }

    /// Renames every state reachable from `q0` to a sequential canonical
    /// label (`Q1`, `Q2`, ...) in depth-first discovery order, and drops
    /// every state not reachable from `q0`.
    ///
    /// ```
    /// use autofsa::regex::regex_to_nfa;
    ///
    /// let mut nfa = regex_to_nfa("ab").unwrap();
    /// nfa.normalize();
    /// assert_eq!(nfa.initial_state().name(), "Q1");
    /// ```
    pub fn normalize(&mut self) {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![self.initial_state];
        seen.insert(self.initial_state);
        // Discovery order, not finish order: a state is appended the first
        // time it is popped, and its neighbors are pushed in the declared
        // order (epsilon transitions then labeled transitions) so ties are
        // resolved deterministically.
        while let Some(s) = stack.pop() {
            order.push(s);
            let mut neighbors = Vec::new();
            neighbors.extend(self.states[s].epsilon_transitions.iter().copied());
            for targets in &self.states[s].transitions {
                neighbors.extend(targets.iter().copied());
            }
            for n in neighbors.into_iter().rev() {
                if seen.insert(n) {
                    stack.push(n);
                }
            }
        }

        let remap: HashMap<usize, usize> = order.iter().enumerate().map(|(new, &old)| (old, new)).collect();

        let mut new_states = Vec::with_capacity(order.len());
        for (new_idx, &old_idx) in order.iter().enumerate() {
            let old = &self.states[old_idx];
            let epsilon_transitions = old
                .epsilon_transitions
                .iter()
                .filter_map(|t| remap.get(t).copied())
                .collect();
            let transitions = old
                .transitions
                .iter()
                .map(|targets| targets.iter().filter_map(|t| remap.get(t).copied()).collect())
                .collect();
            new_states.push(NfaState {
                name: Rc::from(format!("{}{}", symbol::STATE_PREFIX, new_idx + 1)),
                initial: new_idx == 0,
                accepting: old.accepting,
                epsilon_transitions,
                transitions,
            });
        }

        self.states = new_states;
        self.initial_state = 0;
    }

    /// Determinizes this NFA via the subset construction, introducing an
    /// explicit trap state for any transition left undefined.
    ///
    /// ```
    /// use autofsa::regex::regex_to_nfa;
    ///
    /// let dfa = regex_to_nfa("a*").unwrap().to_dfa();
    /// assert!(dfa.initial_state().is_accepting());
    /// ```
    pub fn to_dfa(&self) -> Dfa {
        let initial_set = self.closure(self.initial_state);
        let mut subset_index: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut subsets: Vec<HashSet<usize>> = Vec::new();
        let mut worklist: Vec<usize> = Vec::new();

        let key = canonical_key(&initial_set);
        subset_index.insert(key, 0);
        subsets.push(initial_set);
        worklist.push(0);

        let mut transitions: Vec<Vec<Option<usize>>> = vec![vec![None; self.alphabet.len()]];
        let mut trap_index: Option<usize> = None;

        while let Some(subset_idx) = worklist.pop() {
            for sym_idx in 0..self.alphabet.len() {
                let mut moved = HashSet::new();
                for &s in &subsets[subset_idx] {
                    for &t in &self.states[s].transitions[sym_idx] {
                        moved.insert(t);
                    }
                }

                if moved.is_empty() {
                    let trap_idx = *trap_index.get_or_insert_with(|| {
                        let idx = subsets.len();
                        subsets.push(HashSet::new());
                        transitions.push(vec![None; self.alphabet.len()]);
                        idx
                    });
                    transitions[subset_idx][sym_idx] = Some(trap_idx);
                    continue;
                }

                let closed = self.closure_set(&moved);
                let key = canonical_key(&closed);
                let target_idx = match subset_index.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        let idx = subsets.len();
                        subset_index.insert(key, idx);
                        subsets.push(closed);
                        transitions.push(vec![None; self.alphabet.len()]);
                        worklist.push(idx);
                        idx
                    }
                };
                transitions[subset_idx][sym_idx] = Some(target_idx);
            }
        }

        let mut dfa_states = Vec::with_capacity(subsets.len());
        for (idx, subset) in subsets.iter().enumerate() {
            let is_trap = Some(idx) == trap_index;
            let name: Rc<str> = if is_trap {
                Rc::from(symbol::TRAP)
            } else {
                Rc::from(format!("{}{}", symbol::STATE_PREFIX, dfa_label_rank(idx, trap_index)))
            };
            let accepting = !is_trap && subset.iter().any(|&s| self.states[s].accepting);
            let resolved: Vec<usize> = transitions[idx]
                .iter()
                .map(|t| t.unwrap_or_else(|| trap_index.expect("every undefined transition routes through the trap")))
                .collect();
            dfa_states.push(DfaState {
                name,
                initial: idx == 0,
                accepting,
                transitions: resolved,
            });
        }

        Dfa {
            alphabet: Rc::clone(&self.alphabet),
            states: dfa_states,
            initial_state: 0,
        }
    }
}

/// Canonicalizes a subset of NFA state indices into a stable, hashable key
/// by sorting its members, so two subsets with the same membership always
/// hash and compare equal regardless of discovery order.
fn canonical_key(set: &HashSet<usize>) -> Vec<usize> {
    let mut v: Vec<usize> = set.iter().copied().collect();
    v.sort_unstable();
    v
}

/// Discovery-order rank used to assign `Q1, Q2, ...` labels to DFA subset
/// states, skipping over the one slot reserved for the trap.
fn dfa_label_rank(idx: usize, trap_idx: Option<usize>) -> usize {
    match trap_idx {
        Some(t) if idx > t => idx,
        _ => idx + 1,
    }
}
