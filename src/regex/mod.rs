//!# regex
//!
//! Ties the preprocessor, the shunting-yard converter and the NFA builder
//! together into the two public entry points: [`regex_to_postfix`] and
//! [`regex_to_nfa`].
//!
//! ## Syntax
//!
//! ```text
//! regex   := term ('|' term)*
//! term    := factor+                      // implicit concatenation
//! factor  := atom ('*' | '+' | '?')?
//! atom    := '(' regex ')' | ALPHA
//! ALPHA   := any character except '|' '*' '+' '?' '.' '(' ')' '$'
//! ```
//!
//! `.` and `$` are reserved (explicit concatenation and the epsilon marker
//! respectively) and rejected as literal operands with
//! [`CompileError::ReservedCharacter`]. There is no escape mechanism.

pub mod preprocess;
pub mod shunting_yard;

use crate::error::CompileError;
use crate::nfa::{self, Nfa};
use crate::symbol;
use std::rc::Rc;

/// Converts an infix regex into postfix form: inserts explicit
/// concatenation, then runs the shunting-yard conversion.
///
/// ```
/// use autofsa::regex::regex_to_postfix;
///
/// assert_eq!(regex_to_postfix("(a|b)*c").unwrap(), "ab|*c.");
/// ```
pub fn regex_to_postfix(input: &str) -> Result<String, CompileError> {
    let with_concat = preprocess::insert_concat(input)?;
    shunting_yard::to_postfix(&with_concat)
}

/// Compiles a regex all the way to an epsilon-NFA: postfix conversion
/// followed by Thompson's construction.
///
/// ```
/// use autofsa::regex::regex_to_nfa;
///
/// let nfa = regex_to_nfa("a*").unwrap();
/// assert!(nfa.initial_state().is_accepting());
/// ```
pub fn regex_to_nfa(input: &str) -> Result<Nfa, CompileError> {
    let postfix = regex_to_postfix(input)?;
    let alphabet = literal_alphabet(&postfix);
    nfa::builder::build(&postfix, alphabet)
}

/// Collects the distinct literal operand characters of a postfix string, in
/// first-seen left-to-right order, for use as the NFA's alphabet.
fn literal_alphabet(postfix: &str) -> Vec<Rc<str>> {
    let mut seen = std::collections::HashSet::new();
    let mut alphabet = Vec::new();
    for c in postfix.chars() {
        if symbol::is_operator(c) {
            continue;
        }
        if seen.insert(c) {
            alphabet.push(Rc::from(c.to_string()));
        }
    }
    alphabet
}
