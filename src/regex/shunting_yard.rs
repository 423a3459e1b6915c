//! Shunting-yard infix-to-postfix conversion.

use crate::error::CompileError;
use crate::symbol::{self, CLOSE, OPEN};

/// Converts a preprocessed infix regex (concatenation already explicit) into
/// postfix form.
///
/// Fails with [`CompileError::UnmatchedClose`] when a `)` has no matching
/// `(`, and with [`CompileError::UnmatchedOpen`] when the final flush still
/// contains an unclosed `(`.
pub fn to_postfix(input: &str) -> Result<String, CompileError> {
    let mut output = String::with_capacity(input.len());
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (pos, c) in input.chars().enumerate() {
        if c == OPEN {
            stack.push((c, pos));
        } else if c == CLOSE {
            loop {
                match stack.pop() {
                    None => return Err(CompileError::UnmatchedClose(pos)),
                    Some((OPEN, _)) => break,
                    Some((op, _)) => output.push(op),
                }
            }
        } else if symbol::is_operator(c) {
            while let Some(&(top, _)) = stack.last() {
                if top != OPEN && symbol::precedence(top) >= symbol::precedence(c) {
                    output.push(top);
                    stack.pop();
                } else {
                    break;
                }
            }
            stack.push((c, pos));
        } else {
            output.push(c);
        }
    }

    while let Some((op, pos)) = stack.pop() {
        if op == OPEN {
            return Err(CompileError::UnmatchedOpen(pos));
        }
        output.push(op);
    }

    Ok(output)
}
