//! # Pattern parser
//! This module parses regular-expression patterns into [Nfa]s using Thompson's construction.
//!
//! ## Pattern syntax
//! There are nine reserved characters: `(`, `)`, `|`, `*`, `+`, `?`, `^`, `$` and `\`. All
//! other characters match themselves, and concatenation is implicit. Parentheses group a
//! sub-expression and make it a capturing group; `|` (lowest precedence, only valid inside
//! parentheses) separates alternatives; `*`, `+` and `?` (binding tightest) repeat the
//! immediately preceding atom zero-or-more, one-or-more and zero-or-one times. `^` and `$`
//! are zero-width assertions on the start and end of the input. A reserved character becomes
//! a literal when preceded by a backslash; escaping anything else is an error, as is a
//! pattern ending in a lone backslash.
//!
//! ## Example
//! ```
//! use refa::parser::{self, MalformedRegexError};
//!
//! let nfa = parser::regex("(a|b)+c?").unwrap();
//! assert_eq!(nfa.find("aba"), Some((0, 3)));
//! assert_eq!(nfa.groups().len(), 1);
//!
//! assert_eq!(parser::regex("(ab"), Err(MalformedRegexError::UnclosedGroup));
//! assert_eq!(parser::regex(r"a\db"), Err(MalformedRegexError::InvalidEscape('d')));
//! ```

mod regex;
pub(crate) mod token;

use crate::nfa::Nfa;
use thiserror::Error;

/// The single kind of error surfaced when compiling a pattern: the pattern is not well formed.
/// The variants carry what exactly was wrong for the error message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedRegexError {
    #[error("unclosed '(': reached the end of the pattern inside a group")]
    UnclosedGroup,
    #[error("expected an expression")]
    MissingExpression,
    #[error("unexpected '{0}'")]
    UnexpectedToken(char),
    #[error("'{0}' cannot be escaped")]
    InvalidEscape(char),
    #[error("dangling '\\' at the end of the pattern")]
    TrailingBackslash,
}

/// Parses a regular-expression pattern into an [Nfa] annotated with its capturing groups.
/// The automaton is cleaned up with [Nfa::without_dead_ends] before it is returned.
pub fn regex(pattern: &str) -> Result<Nfa, MalformedRegexError> {
    regex::Parser::new(pattern).parse()
}
