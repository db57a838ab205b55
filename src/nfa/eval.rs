use crate::nfa::Nfa;
use crate::symbol::{stream, Symbol};
use crate::util;
use std::collections::{BTreeMap, HashSet};

/// A single traversal of some input over an [Nfa]. The evaluator records its whole history as
/// `(state set, consumed bytes)` entries; the history is what makes longest-prefix answers and
/// capturing-group reconstruction possible after the fact.
#[derive(Clone, Debug)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    history: Vec<(HashSet<usize>, usize)>,
}

impl<'a> NfaEvaluator<'a> {
    /// Steps over one symbol. The frontier becomes the ε-closure of all states reachable on
    /// `symbol`; if no state is reachable the step fails and the history is left untouched.
    pub fn step(&mut self, symbol: Symbol) -> bool {
        let (frontier, consumed) = match self.history.last() {
            Some(entry) => entry,
            None => return false,
        };
        let dests = self.nfa.transition_states(frontier, symbol);
        if dests.is_empty() {
            return false;
        }
        let consumed = consumed + symbol.width();
        self.history.push((self.nfa.epsilon_closure(&dests), consumed));
        true
    }

    /// Consumes the symbol stream of `text` until it is exhausted or a step fails.
    pub fn run(&mut self, text: &str, is_start: bool) {
        for symbol in stream(text, is_start) {
            if !self.step(symbol) {
                break;
            }
        }
    }

    /// The length in bytes of the longest accepted prefix, if any prefix was accepted.
    pub fn matched_length(&self) -> Option<usize> {
        self.history
            .iter()
            .rev()
            .find(|(states, _)| states.iter().any(|&state| self.nfa.is_accepting(state)))
            .map(|&(_, consumed)| consumed)
    }

    /// Reconstructs the spans captured by each group over the accepted part of `text` (the
    /// slice this evaluator ran over). Spans are byte offsets relative to that slice, one list
    /// per group in capture-index order; groups that never closed a span get an empty list.
    pub fn group_spans(&self, text: &str) -> Vec<Vec<(usize, usize)>> {
        let accept_index = match self.accepting_index() {
            Some(index) => index,
            None => return vec![Vec::new(); self.nfa.groups.len()],
        };
        let trail = self.trail(text, accept_index);
        self.nfa
            .groups
            .iter()
            .map(|&(open, close)| {
                util::collect_spans(trail.iter().map(|(&position, states)| {
                    (position, states.contains(&open), states.contains(&close))
                }))
            })
            .collect()
    }

    /// The latest history index whose state set meets the accepting states.
    fn accepting_index(&self) -> Option<usize> {
        self.history
            .iter()
            .rposition(|(states, _)| states.iter().any(|&state| self.nfa.is_accepting(state)))
    }

    /// Replays the accepted traversal backwards to find, for every consumed position, the
    /// states that lie on some accepting path. Walking the reversed automaton from the
    /// accepting frontier intersects each step with the forward history, so states the forward
    /// traversal reached but that never lead to the accept are filtered out. Zero-width
    /// history entries (`Start`/`End` steps) are skipped: they repeat the previous position.
    fn trail(&self, text: &str, accept_index: usize) -> BTreeMap<usize, HashSet<usize>> {
        let reversed = self.nfa.reversed();
        let (last_states, last_position) = &self.history[accept_index];

        let matched: HashSet<usize> = last_states
            .intersection(&self.nfa.accepts)
            .copied()
            .collect();
        let mut current: HashSet<usize> = reversed
            .epsilon_closure(&matched)
            .intersection(last_states)
            .copied()
            .collect();

        let mut trail: BTreeMap<usize, HashSet<usize>> = BTreeMap::new();
        trail.entry(*last_position).or_default().extend(current.iter().copied());

        for index in (0..accept_index).rev() {
            let (states, position) = &self.history[index];
            if *position == self.history[index + 1].1 {
                continue;
            }
            let symbol = match text[*position..].chars().next() {
                Some(c) => Symbol::Char(c),
                None => break,
            };
            let stepped: HashSet<usize> = reversed
                .transition_states(&current, symbol)
                .intersection(states)
                .copied()
                .collect();
            current = reversed
                .epsilon_closure(&stepped)
                .intersection(states)
                .copied()
                .collect();
            trail.entry(*position).or_default().extend(current.iter().copied());
        }

        trail
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            history: vec![(nfa.epsilon_closure(&nfa.starts), 0)],
        }
    }
}
