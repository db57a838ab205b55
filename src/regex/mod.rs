//! # Compiled regular expressions
//! The user-facing surface of the crate: [Regex::compile] turns a pattern into a ready-to-run
//! automaton, [Regex::find] locates a match and [Regex::captures] additionally reconstructs
//! what every capturing group matched, as a [Match].
//!
//! Compilation always builds an NFA with Thompson's construction first. If the pattern has no
//! capturing groups the NFA is converted to a DFA with the subset construction, which is the
//! faster automaton to run; with groups present the NFA is kept, since its traversal history
//! supports exact span reconstruction across quantified groups. Either automaton can also be
//! used directly through [crate::parser::regex], [crate::nfa::Nfa] and [crate::dfa::Dfa].
//!
//! Matching looks for the earliest start offset with a match and returns the longest match at
//! that offset. A quantified group captures once per iteration, so [Match::all_captures]
//! returns every captured substring while [Match::latest_captures] keeps the last one, like
//! most regex implementations report groups.
//!
//! ## Example
//! ```
//! use refa::regex::Regex;
//!
//! let regex = Regex::compile("(a|b)*a").unwrap();
//! assert_eq!(regex.find("ca"), Some((1, 2)));
//! assert_eq!(regex.find("b"), None);
//!
//! let regex = Regex::compile("(ab((cd)*)ef)+").unwrap();
//! let found = regex.captures("abcdefabefabcdcdef").unwrap();
//! assert_eq!(found.substr(), "abcdefabefabcdcdef");
//! assert_eq!(
//!     found.all_captures(),
//!     vec![
//!         vec!["abcdefabefabcdcdef"],
//!         vec!["abcdef", "abef", "abcdcdef"],
//!         vec!["cd", "", "cdcd"],
//!         vec!["cd", "cd", "cd"],
//!     ],
//! );
//! assert_eq!(
//!     found.latest_captures(),
//!     vec!["abcdefabefabcdcdef", "abcdcdef", "cdcd", "cd"],
//! );
//! ```

use crate::dfa::Dfa;
use crate::nfa::Nfa;
pub use crate::parser::MalformedRegexError;

/// A compiled regular expression, ready to be matched against text. Compiled automata are
/// immutable; matching never changes them, so a [Regex] can be shared freely.
#[derive(Debug, Clone)]
pub struct Regex {
    automaton: Automaton,
}

#[derive(Debug, Clone)]
enum Automaton {
    Nfa(Nfa),
    Dfa(Dfa),
}

impl Regex {
    /// Compiles a pattern. See the [module documentation](self) for the automaton backend
    /// that is chosen.
    pub fn compile(pattern: &str) -> Result<Self, MalformedRegexError> {
        let nfa = crate::parser::regex(pattern)?;
        let automaton = if nfa.groups().is_empty() {
            Automaton::Dfa(nfa.to_dfa())
        } else {
            Automaton::Nfa(nfa)
        };
        Ok(Self { automaton })
    }

    /// Finds the first match in `text` and returns its span as byte offsets, or `None` if the
    /// pattern matches nowhere in `text`.
    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        match &self.automaton {
            Automaton::Nfa(nfa) => nfa.find(text),
            Automaton::Dfa(dfa) => dfa.find(text),
        }
    }

    /// Finds the first match in `text` together with everything its capturing groups matched,
    /// or `None` if the pattern matches nowhere in `text`.
    pub fn captures<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        match &self.automaton {
            Automaton::Nfa(nfa) => nfa.find_match(text),
            Automaton::Dfa(dfa) => dfa.find_match(text),
        }
    }
}

/// Compiles `pattern` and finds its first match in `text` in one call.
///
/// ```
/// assert_eq!(refa::regex::find("a?b", "aaab"), Ok(Some((2, 4))));
/// assert_eq!(refa::regex::find("a?b", "aaaa"), Ok(None));
/// ```
pub fn find(pattern: &str, text: &str) -> Result<Option<(usize, usize)>, MalformedRegexError> {
    Ok(Regex::compile(pattern)?.find(text))
}

/// One match of a [Regex] in a text: the whole-match span plus, for every capturing group,
/// the list of spans it captured, in order of occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t str,
    span: (usize, usize),
    groups: Vec<Vec<(usize, usize)>>,
}

impl<'t> Match<'t> {
    pub(crate) fn new(text: &'t str, span: (usize, usize), groups: Vec<Vec<(usize, usize)>>) -> Self {
        Self { text, span, groups }
    }

    /// The span of the whole match, as byte offsets into the text.
    pub fn span(&self) -> (usize, usize) {
        self.span
    }

    /// The matched part of the text.
    pub fn substr(&self) -> &'t str {
        &self.text[self.span.0..self.span.1]
    }

    /// The captured spans of every group, in capture-index order starting at group 1. A group
    /// that captured nothing has an empty list.
    pub fn group_spans(&self) -> &[Vec<(usize, usize)>] {
        &self.groups
    }

    /// The last captured substring of every group. Index 0 is the whole match; a group that
    /// captured nothing yields the empty string.
    pub fn latest_captures(&self) -> Vec<&'t str> {
        let mut captures = vec![self.substr()];
        captures.extend(self.groups.iter().map(|spans| {
            spans
                .last()
                .map_or("", |&(begin, end)| &self.text[begin..end])
        }));
        captures
    }

    /// Every captured substring of every group, in order of occurrence. Index 0 holds the
    /// whole match as its only entry.
    pub fn all_captures(&self) -> Vec<Vec<&'t str>> {
        let mut captures = vec![vec![self.substr()]];
        captures.extend(self.groups.iter().map(|spans| {
            spans
                .iter()
                .map(|&(begin, end)| &self.text[begin..end])
                .collect()
        }));
        captures
    }
}
