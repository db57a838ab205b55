//! # Nondeterministic Finite Automaton, with or without ε-moves
//! The NFA module includes the [Nfa] struct representing a
//! [nondeterministic finite automaton](https://en.wikipedia.org/wiki/Nondeterministic_finite_automaton)
//! over [Symbol]s, possibly with ε-moves. NFAs are usually created by compiling a pattern with
//! [crate::parser::regex], but they can also be assembled by hand with [Nfa::new] and
//! [Nfa::add_transition].
//!
//! States are plain integers. Transitions are kept as a map from source state to a map from
//! symbol to the set of destination states, so cycles (Kleene loops, ε back-edges) are implicit
//! in the table and need no special representation. An automaton may have several start states
//! and several accepting states. Capturing groups are carried as an ordered list of
//! `(group start state, group accept state)` pairs; their order defines capture indices `1..=k`.
//!
//! Two transition lookups have defaults: querying [Symbol::Start] or [Symbol::End] on a state
//! with no such edge yields the state itself (zero-width assertions hold without moving), and
//! querying a [Symbol::Char] with no such edge yields nothing.
//!
//! ## Example
//! ```
//! use refa::parser;
//!
//! // Compiling a pattern yields an NFA with Thompson's construction
//! let nfa = parser::regex("(a|b)*a").unwrap();
//! assert_eq!(nfa.find("a"), Some((0, 1)));
//! assert_eq!(nfa.find("b"), None);
//! assert_eq!(nfa.find("aa"), Some((0, 2)));
//! assert_eq!(nfa.find("ca"), Some((1, 2)));
//!
//! // The ε-free rewrite accepts the same language
//! let no_eps = nfa.without_epsilon_transitions();
//! assert_eq!(no_eps.find("ca"), Some((1, 2)));
//!
//! // ... and so does the DFA produced by the subset construction
//! let dfa = nfa.to_dfa();
//! assert_eq!(dfa.find("ca"), Some((1, 2)));
//! ```
//!
//! ## Searching
//! [Nfa::find] tries a fresh traversal at every character boundary of the text, returning the
//! first start offset at which some prefix is accepted, together with the longest accepted
//! prefix length at that offset. [Nfa::find_match] does the same but also reconstructs the
//! spans captured by every group along the accepted path, see [NfaEvaluator::group_spans].
//! Traversals are driven by an [NfaEvaluator] which can also be used directly through
//! [Nfa::evaluator].

use crate::dfa::Dfa;
use crate::regex::Match;
use crate::symbol::Symbol;
use crate::util;
pub use eval::NfaEvaluator;
use std::collections::{HashMap, HashSet, VecDeque};

pub mod eval;
pub(crate) mod thompson;

type TransitionMap = HashMap<usize, HashMap<Symbol, HashSet<usize>>>;

/// A nondeterministic finite automaton over [Symbol]s, possibly with ε-moves, together with
/// the capturing groups recorded while it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) states: HashSet<usize>,
    pub(crate) transitions: TransitionMap,
    pub(crate) accepts: HashSet<usize>,
    pub(crate) starts: HashSet<usize>,
    pub(crate) groups: Vec<(usize, usize)>,
}

impl Nfa {
    /// Creates an NFA without capturing groups from its raw parts. All states mentioned by
    /// `transitions`, `accepts` and `starts` must be members of `states`.
    pub fn new(
        states: HashSet<usize>,
        transitions: HashMap<usize, HashMap<Symbol, HashSet<usize>>>,
        accepts: HashSet<usize>,
        starts: HashSet<usize>,
    ) -> Self {
        Self {
            states,
            transitions,
            accepts,
            starts,
            groups: Vec::new(),
        }
    }

    /// Adds a transition edge. The endpoints are added to the state set if not yet present.
    pub fn add_transition(&mut self, from: usize, symbol: Symbol, to: usize) {
        self.states.insert(from);
        self.states.insert(to);
        self.transitions
            .entry(from)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(to);
    }

    /// Gets the states of this NFA.
    pub fn states(&self) -> &HashSet<usize> {
        &self.states
    }

    /// Gets the start states of this NFA.
    pub fn starts(&self) -> &HashSet<usize> {
        &self.starts
    }

    /// Gets the accepting states of this NFA.
    pub fn accepts(&self) -> &HashSet<usize> {
        &self.accepts
    }

    /// Checks if the given state is accepting.
    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepts.contains(&state)
    }

    /// Gets the capturing groups as `(group start state, group accept state)` pairs, in
    /// capture-index order.
    pub fn groups(&self) -> &[(usize, usize)] {
        &self.groups
    }

    /// All states reachable from `states` on `symbol` in one step. [Symbol::Start] and
    /// [Symbol::End] fall back to the state itself when a state has no such edge.
    pub fn transition_states(&self, states: &HashSet<usize>, symbol: Symbol) -> HashSet<usize> {
        let mut dests = HashSet::new();
        for &state in states {
            match self.transitions.get(&state).and_then(|edges| edges.get(&symbol)) {
                Some(targets) => dests.extend(targets.iter().copied()),
                None => {
                    if matches!(symbol, Symbol::Start | Symbol::End) {
                        dests.insert(state);
                    }
                }
            }
        }
        dests
    }

    /// The least superset of `sources` closed under following ε-edges.
    ///
    /// ```
    /// use refa::parser;
    ///
    /// let nfa = parser::regex("a*").unwrap();
    /// let closure = nfa.epsilon_closure(nfa.starts());
    /// // Idempotent, and includes the sources themselves
    /// assert_eq!(nfa.epsilon_closure(&closure), closure);
    /// assert!(closure.is_superset(nfa.starts()));
    /// ```
    pub fn epsilon_closure(&self, sources: &HashSet<usize>) -> HashSet<usize> {
        let mut closure = sources.clone();
        let mut frontier: Vec<usize> = closure.iter().copied().collect();
        while let Some(state) = frontier.pop() {
            let targets = self
                .transitions
                .get(&state)
                .and_then(|edges| edges.get(&Symbol::Epsilon));
            for &target in targets.into_iter().flatten() {
                if closure.insert(target) {
                    frontier.push(target);
                }
            }
        }
        closure
    }

    /// The symbols with an explicit edge out of some state in `states`.
    fn symbols_from(&self, states: &HashSet<usize>) -> HashSet<Symbol> {
        states
            .iter()
            .filter_map(|state| self.transitions.get(state))
            .flat_map(|edges| edges.keys().copied())
            .collect()
    }

    /// All states reachable from `seeds` over any number of edges of any symbol.
    fn reachable_from(&self, seeds: &HashSet<usize>) -> HashSet<usize> {
        let mut reachable = seeds.clone();
        let mut frontier: Vec<usize> = reachable.iter().copied().collect();
        while let Some(state) = frontier.pop() {
            let targets = self
                .transitions
                .get(&state)
                .into_iter()
                .flat_map(|edges| edges.values())
                .flatten();
            for &target in targets {
                if reachable.insert(target) {
                    frontier.push(target);
                }
            }
        }
        reachable
    }

    /// The same automaton with every edge reversed and starts and accepts swapped. Capturing
    /// groups are not carried over.
    pub(crate) fn reversed(&self) -> Nfa {
        let mut transitions: TransitionMap = HashMap::new();
        for (&source, edges) in &self.transitions {
            for (&symbol, dests) in edges {
                for &dest in dests {
                    transitions
                        .entry(dest)
                        .or_default()
                        .entry(symbol)
                        .or_default()
                        .insert(source);
                }
            }
        }
        Nfa {
            states: self.states.clone(),
            transitions,
            accepts: self.starts.clone(),
            starts: self.accepts.clone(),
            groups: Vec::new(),
        }
    }

    /// A copy of this NFA without dead ends: start states from which no accepting state can be
    /// reached are dropped, then every state unreachable from the surviving starts is dropped,
    /// and all remaining references are restricted to the surviving states.
    pub fn without_dead_ends(&self) -> Nfa {
        let productive = self.reversed().reachable_from(&self.accepts);
        let starts: HashSet<usize> = self.starts.intersection(&productive).copied().collect();
        let live = self.reachable_from(&starts);

        let transitions = self
            .transitions
            .iter()
            .filter(|(state, _)| live.contains(*state))
            .map(|(&state, edges)| {
                let edges = edges
                    .iter()
                    .map(|(&symbol, dests)| {
                        let dests: HashSet<usize> =
                            dests.intersection(&live).copied().collect();
                        (symbol, dests)
                    })
                    .filter(|(_, dests)| !dests.is_empty())
                    .collect();
                (state, edges)
            })
            .collect();

        Nfa {
            states: live.clone(),
            transitions,
            accepts: self.accepts.intersection(&live).copied().collect(),
            starts,
            groups: self.groups.clone(),
        }
    }

    /// An equivalent NFA without ε-moves. The ε-closure of every transition's target set is
    /// inlined into the transition, the ε-closure of the start states becomes the new start
    /// set, and non-accepting states left without any outgoing transitions are removed.
    ///
    /// ```
    /// use refa::parser;
    ///
    /// let nfa = parser::regex("a?b").unwrap().without_epsilon_transitions();
    /// assert_eq!(nfa.find("aaab"), Some((2, 4)));
    /// assert_eq!(nfa.find("aaaa"), None);
    /// ```
    pub fn without_epsilon_transitions(&self) -> Nfa {
        let starts = self.epsilon_closure(&self.starts);

        let mut transitions: TransitionMap = HashMap::new();
        for &state in &self.states {
            let mut edges = HashMap::new();
            let old_edges = self.transitions.get(&state);
            for (&symbol, dests) in old_edges.into_iter().flatten() {
                if symbol == Symbol::Epsilon {
                    continue;
                }
                edges.insert(symbol, self.epsilon_closure(dests));
            }
            transitions.insert(state, edges);
        }

        // states that neither accept nor lead anywhere can be dropped
        let states: HashSet<usize> = transitions
            .iter()
            .filter(|(state, edges)| self.accepts.contains(*state) || !edges.is_empty())
            .map(|(&state, _)| state)
            .collect();

        let transitions = transitions
            .into_iter()
            .filter(|(state, _)| states.contains(state))
            .map(|(state, edges)| {
                let edges = edges
                    .into_iter()
                    .map(|(symbol, dests)| {
                        (symbol, dests.intersection(&states).copied().collect())
                    })
                    .collect();
                (state, edges)
            })
            .collect();

        Nfa {
            states: states.clone(),
            transitions,
            accepts: self.accepts.intersection(&states).copied().collect(),
            starts: starts.intersection(&states).copied().collect(),
            groups: self.groups.clone(),
        }
    }

    /// Converts this NFA to a DFA using the subset construction. Every state of the resulting
    /// DFA corresponds to the ε-closure of a set of NFA states, so the construction may grow
    /// exponentially in the number of NFA states; only reachable subsets are materialized.
    /// The DFA start state is always numbered 0.
    ///
    /// Capturing groups are lifted along: an NFA group `(s, a)` becomes the pair of DFA state
    /// sets whose underlying subsets contain `s` respectively `a`.
    pub fn to_dfa(&self) -> Dfa {
        let nfa = self.without_dead_ends();

        let mut mapping: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut transitions: HashMap<usize, HashMap<Symbol, usize>> = HashMap::new();
        let mut queue: VecDeque<(usize, HashSet<usize>)> = VecDeque::new();
        let mut next_id = 0usize;

        let seed = nfa.epsilon_closure(&nfa.starts);
        mapping.insert(set_to_key(&seed), next_id);
        transitions.insert(next_id, HashMap::new());
        queue.push_back((next_id, seed));
        next_id += 1;

        while let Some((id, subset)) = queue.pop_front() {
            for symbol in nfa.symbols_from(&subset) {
                if symbol == Symbol::Epsilon {
                    continue;
                }
                let target = nfa.epsilon_closure(&nfa.transition_states(&subset, symbol));
                let key = set_to_key(&target);
                let target_id = match mapping.get(&key) {
                    Some(&known) => known,
                    None => {
                        let fresh = next_id;
                        next_id += 1;
                        mapping.insert(key, fresh);
                        transitions.insert(fresh, HashMap::new());
                        queue.push_back((fresh, target));
                        fresh
                    }
                };
                transitions.entry(id).or_default().insert(symbol, target_id);
            }
        }

        let accepts = mapping
            .iter()
            .filter(|(subset, _)| subset.iter().any(|state| nfa.accepts.contains(state)))
            .map(|(_, &id)| id)
            .collect();

        let groups = nfa
            .groups
            .iter()
            .map(|&(group_start, group_accept)| {
                let opens: HashSet<usize> = mapping
                    .iter()
                    .filter(|(subset, _)| subset.contains(&group_start))
                    .map(|(_, &id)| id)
                    .collect();
                let closes: HashSet<usize> = mapping
                    .iter()
                    .filter(|(subset, _)| subset.contains(&group_accept))
                    .map(|(_, &id)| id)
                    .collect();
                (opens, closes)
            })
            .collect();

        let mut dfa = Dfa {
            states: mapping.values().copied().collect(),
            transitions,
            accepts,
            start: 0,
            groups,
        };
        dfa.remove_unreachable_states();
        dfa
    }

    /// Gets an evaluator, which drives a single traversal of some input over this automaton.
    pub fn evaluator(&self) -> NfaEvaluator<'_> {
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

    /// Like [Nfa::find], but also reconstructs the spans captured by every group along the
    /// accepted path.
    pub fn find_match<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        util::match_starts(text).find_map(|start| {
            let mut evaluator = self.evaluator();
            evaluator.run(&text[start..], start == 0);
            let length = evaluator.matched_length()?;
            let groups = evaluator
                .group_spans(&text[start..])
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

/// Converts a state set to a sorted `Vec` usable as a canonical map key.
fn set_to_key(set: &HashSet<usize>) -> Vec<usize> {
    let mut key: Vec<usize> = set.iter().copied().collect();
    key.sort_unstable();
    key
}
