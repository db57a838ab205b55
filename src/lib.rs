//!# refa
//!
//! `refa` is a small regular-expression engine built on finite automata: a pattern is compiled
//! into a nondeterministic finite automaton (NFA) with Thompson's construction, optionally
//! converted into a deterministic finite automaton (DFA) with the subset construction, and
//! either automaton is run over input text to produce a match with capturing-group spans.
//!
//! ## Usage
//!
//! ```rust
//! use refa::regex::Regex;
//!
//! fn main() {
//!     let regex = Regex::compile("(a|b)*a").unwrap();
//!     assert_eq!(regex.find("a"), Some((0, 1)));
//!     assert_eq!(regex.find("ca"), Some((1, 2)));
//!     assert_eq!(regex.find("b"), None);
//!
//!     // Quantified groups capture once per iteration
//!     let regex = Regex::compile("(aa)*aab").unwrap();
//!     let found = regex.captures("aaaab").unwrap();
//!     assert_eq!(found.substr(), "aaaab");
//!     assert_eq!(found.all_captures(), vec![vec!["aaaab"], vec!["aa"]]);
//! }
//! ```
//!
//! ## Pattern syntax
//!
//! Concatenation is implicit; `|` separates alternatives inside parentheses; `*`, `+` and `?`
//! quantify the preceding atom; `(`/`)` group and capture; `^`/`$` assert the input
//! boundaries; `\` escapes any of these. See [parser] for the full syntax and the error
//! cases.
//!
//! ## Matching semantics
//!
//! Matching scans for the earliest start offset at which the pattern accepts a prefix of the
//! remaining text, and returns the longest accepted prefix at that offset. There is no
//! backtracking and no preference order between alternatives: the traversal tracks every
//! possibility at once, so `(a|ab)` matched against "ab" matches the whole text. Spans are
//! byte offsets.
//!
//! ## Operations
//!
//! This library currently supports:
//!
//! * [Compiling a pattern](regex::Regex::compile) and [finding](regex::Regex::find) or
//!   [capturing](regex::Regex::captures) its first match
//! * [Parsing a pattern into an NFA](parser::regex) with Thompson's construction
//! * [Converting an NFA to a DFA](nfa::Nfa::to_dfa) with the subset construction, carrying
//!   capturing groups along in lifted form
//! * [Rewriting an NFA without ε-moves](nfa::Nfa::without_epsilon_transitions) and
//!   [dropping dead ends](nfa::Nfa::without_dead_ends)
//! * [Removing unreachable DFA states](dfa::Dfa::remove_unreachable_states)
//! * Step-by-step evaluation with an [NFA evaluator](nfa::Nfa::evaluator) or a
//!   [DFA evaluator](dfa::Dfa::evaluator), including group-span reconstruction from the
//!   recorded traversal history

pub mod dfa;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod symbol;
mod util;
