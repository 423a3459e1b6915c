//!# autofsa
//!
//! `autofsa` compiles a classical regular expression into successively
//! refined finite-automaton representations of the language it denotes:
//!
//! 1. infix regex → postfix form (explicit-concatenation insertion +
//!    shunting-yard conversion);
//! 2. postfix form → epsilon-NFA, via Thompson's construction;
//! 3. epsilon-NFA → DFA (with an explicit trap state), via the subset
//!    construction;
//! 4. DFA → minimal DFA, via table-filling equivalence-class minimization.
//!
//! Any intermediate automaton can be rendered as a Graphviz `dot` graph by
//! [`draw::draw_nfa`]/[`draw::draw_dfa`] for inspection.
//!
//! ## Usage
//!
//! ```rust
//! use autofsa::regex::regex_to_nfa;
//!
//! let mut nfa = regex_to_nfa("(a|b)*c").unwrap();
//! nfa.normalize();
//! let mut dfa = nfa.to_dfa();
//! dfa.minimize();
//!
//! assert_eq!(dfa.states().iter().filter(|s| s.is_accepting()).count(), 1);
//! ```
//!
//! ## Scope
//!
//! There is no matching engine here: the pipeline builds recognition
//! structures, it does not run them against an input string. There are no
//! character classes, escape sequences, anchors, backreferences, lazy
//! quantifiers, counted repetition or Unicode-property matches, and no
//! persistence of automata beyond the rendered `dot` snapshots.
//!
//! ## Automaton table format
//!
//! [`parser`] additionally understands a small text-based transition-table
//! format, used to hand-author DFA/NFA fixtures for tests. It plays no part
//! in the regex-compilation pipeline itself.
//!
//! Example of a DFA:
//!
//! ```text
//!        a  b  c
//! → * s₀ s₁ s₀ s₂
//!     s₁ s₂ s₁ s₁
//!   * s₂ s₂ s₂ s₂
//! ```
//!
//! Example of an ε-NFA:
//!
//! ```text
//!      ε    a       b
//! → s₀ {}   {s₁}    {s₀ s₂}
//!   s₁ {s₂} {s₄}    {s₃}
//!   s₂ {}   {s₁ s₄} {s₃}
//!   s₃ {s₅} {s₄ s₅} {}
//!   s₄ {s₃} {}      {s₅}
//! * s₅ {}   {s₅}    {s₅}
//! ```

pub mod dfa;
pub mod draw;
pub mod error;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod symbol;
