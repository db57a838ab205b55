//! # Deterministic Finite Automaton
//! The DFA module includes the [Dfa] struct representing a
//! [deterministic finite automaton](https://en.wikipedia.org/wiki/Deterministic_finite_automaton)
//! over [Symbol]s: at most one destination per `(state, symbol)` pair and a single start
//! state. The only way to create one in this crate is the subset construction,
//! [crate::nfa::Nfa::to_dfa].
//!
//! A lookup of [Symbol::Start] or [Symbol::End] on a state without such an edge stays in the
//! same state (zero-width assertions hold without moving); a lookup of a [Symbol::Char]
//! without an edge has no destination, which halts a traversal.
//!
//! Capturing groups survive the subset construction in lifted form: for every group of the
//! source NFA, the DFA keeps the set of its states that contain the group's start state
//! (opening states) and the set containing the group's accept state (closing states).
//!
//! ## Example
//! ```
//! use refa::parser;
//!
//! let dfa = parser::regex("(a+b*)*a(a|b)").unwrap().to_dfa();
//! assert_eq!(dfa.find("aabab"), Some((0, 5)));
//! assert_eq!(dfa.find("baab"), Some((1, 4)));
//! assert_eq!(dfa.find("c"), None);
//! ```

use crate::regex::Match;
use crate::symbol::Symbol;
use crate::util;
pub use eval::DfaEvaluator;
use std::collections::{HashMap, HashSet};

pub mod eval;

/// A deterministic finite automaton over [Symbol]s, with capturing groups lifted from the NFA
/// it was constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) states: HashSet<usize>,
    pub(crate) transitions: HashMap<usize, HashMap<Symbol, usize>>,
    pub(crate) accepts: HashSet<usize>,
    pub(crate) start: usize,
    pub(crate) groups: Vec<(HashSet<usize>, HashSet<usize>)>,
}

impl Dfa {
    /// Gets the states of this DFA.
    pub fn states(&self) -> &HashSet<usize> {
        &self.states
    }

    /// Gets the start state of this DFA.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Checks if the given state is accepting.
    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepts.contains(&state)
    }

    /// Gets the lifted capturing groups as `(opening states, closing states)` pairs, in
    /// capture-index order.
    pub fn groups(&self) -> &[(HashSet<usize>, HashSet<usize>)] {
        &self.groups
    }

    /// The destination of `state` on `symbol`, if any. [Symbol::Start] and [Symbol::End] fall
    /// back to `state` itself when there is no such edge.
    pub fn transition(&self, state: usize, symbol: Symbol) -> Option<usize> {
        if !self.states.contains(&state) {
            return None;
        }
        match self.transitions.get(&state).and_then(|edges| edges.get(&symbol)) {
            Some(&dest) => Some(dest),
            None => matches!(symbol, Symbol::Start | Symbol::End).then_some(state),
        }
    }

    /// All states reachable from the start state.
    pub fn reachable_states(&self) -> HashSet<usize> {
        let mut reachable = HashSet::from([self.start]);
        let mut frontier = vec![self.start];
        while let Some(state) = frontier.pop() {
            let targets = self
                .transitions
                .get(&state)
                .into_iter()
                .flat_map(|edges| edges.values());
            for &target in targets {
                if reachable.insert(target) {
                    frontier.push(target);
                }
            }
        }
        reachable
    }

    /// All states that cannot be reached from the start state.
    pub fn unreachable_states(&self) -> HashSet<usize> {
        let reachable = self.reachable_states();
        self.states.difference(&reachable).copied().collect()
    }

    /// Removes all states that cannot be reached from the start state, restricting accepts
    /// and lifted groups to the survivors.
    pub fn remove_unreachable_states(&mut self) {
        let reachable = self.reachable_states();
        if reachable.len() == self.states.len() {
            return;
        }
        self.states = reachable;
        self.transitions.retain(|state, _| self.states.contains(state));
        self.accepts.retain(|state| self.states.contains(state));
        for (opens, closes) in &mut self.groups {
            opens.retain(|state| self.states.contains(state));
            closes.retain(|state| self.states.contains(state));
        }
    }

    /// Gets an evaluator, which drives a single traversal of some input over this automaton.
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Finds the first match of this automaton in `text`: the smallest start offset at which
    /// some prefix of the remaining text is accepted, together with the end of the longest
    /// such prefix. The start-of-input marker is only asserted at offset 0.
    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        util::match_starts(text).find_map(|start| {
            let mut evaluator = self.evaluator();
            evaluator.run(&text[start..], start == 0);
            evaluator
                .matched_length()
                .map(|length| (start, start + length))
        })
    }

    /// Like [Dfa::find], but also collects the spans captured by every lifted group along the
    /// recorded path.
    pub fn find_match<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        util::match_starts(text).find_map(|start| {
            let mut evaluator = self.evaluator();
            evaluator.run(&text[start..], start == 0);
            let length = evaluator.matched_length()?;
            let groups = evaluator
                .group_spans()
                .into_iter()
                .map(|spans| {
                    spans
                        .into_iter()
                        .map(|(begin, end)| (start + begin, start + end))
                        .collect()
                })
                .collect();
            Some(Match::new(text, (start, start + length), groups))
        })
    }
}
