//! Thompson's construction: combinators that compose NFA fragments. Every combinator takes
//! and returns fragments with exactly one start and one accept state; feeding one a fragment
//! that violates this is a bug in the caller and panics.

use crate::nfa::Nfa;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

impl Nfa {
    pub(crate) fn sole_start(&self) -> usize {
        let mut iter = self.starts.iter();
        match (iter.next(), iter.next()) {
            (Some(&start), None) => start,
            _ => panic!("fragment must have exactly one start state"),
        }
    }

    pub(crate) fn sole_accept(&self) -> usize {
        let mut iter = self.accepts.iter();
        match (iter.next(), iter.next()) {
            (Some(&accept), None) => accept,
            _ => panic!("fragment must have exactly one accept state"),
        }
    }
}

/// A fragment accepting exactly the one-symbol word `symbol`.
pub(crate) fn symbol(symbol: Symbol) -> Nfa {
    let mut nfa = Nfa {
        states: HashSet::from([0, 1]),
        transitions: HashMap::new(),
        accepts: HashSet::from([1]),
        starts: HashSet::from([0]),
        groups: Vec::new(),
    };
    nfa.add_transition(0, symbol, 1);
    nfa
}

/// A fragment accepting only the empty word.
pub(crate) fn empty() -> Nfa {
    symbol(Symbol::Epsilon)
}

/// Relabels `secondary` past the states of `primary` and merges its states, transitions and
/// groups into `primary`. Returns the relabeled start and accept state of `secondary`.
fn absorb(primary: &mut Nfa, secondary: Nfa) -> (usize, usize) {
    let offset = primary.states.iter().max().map_or(0, |&max| max + 1);
    let start = secondary.sole_start() + offset;
    let accept = secondary.sole_accept() + offset;

    primary
        .states
        .extend(secondary.states.iter().map(|state| state + offset));
    for (state, edges) in secondary.transitions {
        let edges = edges
            .into_iter()
            .map(|(symbol, dests)| {
                (symbol, dests.into_iter().map(|dest| dest + offset).collect())
            })
            .collect();
        primary.transitions.insert(state + offset, edges);
    }
    primary.groups.extend(
        secondary
            .groups
            .into_iter()
            .map(|(open, close)| (open + offset, close + offset)),
    );

    (start, accept)
}

/// Sequencing: the accept of `primary` is ε-linked to the start of `secondary`, which then
/// provides the accept state of the result.
pub(crate) fn concatenate(mut primary: Nfa, secondary: Nfa) -> Nfa {
    let primary_accept = primary.sole_accept();
    let (start, accept) = absorb(&mut primary, secondary);
    primary.add_transition(primary_accept, Symbol::Epsilon, start);
    primary.accepts = HashSet::from([accept]);
    primary
}

/// Embeds `secondary` into `primary` between the existing states `start` and `end` with a
/// pair of ε-links.
pub(crate) fn join(primary: &mut Nfa, secondary: Nfa, start: usize, end: usize) {
    let (secondary_start, secondary_accept) = absorb(primary, secondary);
    primary.add_transition(start, Symbol::Epsilon, secondary_start);
    primary.add_transition(secondary_accept, Symbol::Epsilon, end);
}

/// Alternation: every fragment in `alternatives` is embedded between a fresh start and a
/// fresh accept state.
pub(crate) fn union(alternatives: Vec<Nfa>) -> Nfa {
    let mut primary = Nfa {
        states: HashSet::from([0, 1]),
        transitions: HashMap::new(),
        accepts: HashSet::from([1]),
        starts: HashSet::from([0]),
        groups: Vec::new(),
    };
    for alternative in alternatives {
        join(&mut primary, alternative, 0, 1);
    }
    primary
}

/// One or more repetitions: an ε-loop from the accept back to the start.
pub(crate) fn kleene_plus(mut expression: Nfa) -> Nfa {
    let start = expression.sole_start();
    let accept = expression.sole_accept();
    expression.add_transition(accept, Symbol::Epsilon, start);
    expression
}

/// Zero or more repetitions.
pub(crate) fn kleene_star(expression: Nfa) -> Nfa {
    optional(kleene_plus(expression))
}

/// Zero or one occurrence: the fragment is embedded alongside a direct ε-edge.
pub(crate) fn optional(expression: Nfa) -> Nfa {
    let mut primary = empty();
    join(&mut primary, expression, 0, 1);
    primary
}

/// Records the fragment's endpoints as a capturing group. The pair goes to the front of the
/// group list: composition appends child groups to the parent, so prepending here makes an
/// outer group end up with a lower capture index than every group nested inside it.
pub(crate) fn grouped(mut expression: Nfa) -> Nfa {
    let pair = (expression.sole_start(), expression.sole_accept());
    expression.groups.insert(0, pair);
    expression
}
