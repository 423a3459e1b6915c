//! Structured errors for every fallible stage of the compilation pipeline.

use thiserror::Error;

/// Failure produced by the preprocessor, the shunting-yard converter or the
/// NFA builder. Each variant carries enough context (offending character or
/// position) for a caller to display a useful message; nothing here is ever
/// swallowed or retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `)` was encountered with no matching `(` on the operator stack.
    #[error("unmatched ')' at position {0}")]
    UnmatchedClose(usize),

    /// A `(` was never closed.
    #[error("unmatched '(' at position {0}")]
    UnmatchedOpen(usize),

    /// The NFA builder's fragment stack was empty when an operator needed
    /// to pop one or more operands (e.g. a leading binary operator).
    #[error("operator '{op}' at position {pos} has no operand")]
    MissingOperand { op: char, pos: usize },

    /// More than one fragment remained on the stack after the whole postfix
    /// expression was consumed.
    #[error("malformed regex: {0} fragment(s) remained after construction, expected 1")]
    DanglingFragments(usize),

    /// The regex was empty.
    #[error("empty regex")]
    EmptyRegex,

    /// A character with no defined meaning appeared where an operand or
    /// operator was expected.
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedCharacter(char, usize),

    /// The caller supplied `.` or `$` as a literal operand; both are
    /// reserved for concatenation and epsilon respectively.
    #[error("'{0}' is a reserved character and cannot be used as a literal operand (position {1})")]
    ReservedCharacter(char, usize),
}

/// Failure while rendering an automaton snapshot to disk.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write graph file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
