use crate::dfa::Dfa;
use crate::symbol::{stream, Symbol};
use crate::util;

/// A single traversal of some input over a [Dfa], recording its `(state, consumed bytes)`
/// history. Because the automaton is deterministic the history is the accepting path itself,
/// so capturing groups can be read off it directly.
#[derive(Clone, Debug)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    history: Vec<(usize, usize)>,
}

impl<'a> DfaEvaluator<'a> {
    /// Steps over one symbol, or fails without touching the history if the current state has
    /// no destination for it.
    pub fn step(&mut self, symbol: Symbol) -> bool {
        let &(state, consumed) = match self.history.last() {
            Some(entry) => entry,
            None => return false,
        };
        match self.dfa.transition(state, symbol) {
            Some(dest) => {
                self.history.push((dest, consumed + symbol.width()));
                true
            }
            None => false,
        }
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
            .find(|&&(state, _)| self.dfa.is_accepting(state))
            .map(|&(_, consumed)| consumed)
    }

    /// Collects the spans captured by each lifted group along the recorded path, one list per
    /// group in capture-index order. Spans are byte offsets relative to the traversed slice.
    /// Zero-width steps (`Start`/`End`) duplicate the previous position; of each run of
    /// equal-position entries only the last one is scanned, otherwise a group could open or
    /// close twice at the same position.
    pub fn group_spans(&self) -> Vec<Vec<(usize, usize)>> {
        let accept_index = match self
            .history
            .iter()
            .rposition(|&(state, _)| self.dfa.is_accepting(state))
        {
            Some(index) => index,
            None => return vec![Vec::new(); self.dfa.groups.len()],
        };

        let path: Vec<(usize, usize)> = (0..=accept_index)
            .filter(|&index| {
                index == accept_index || self.history[index + 1].1 != self.history[index].1
            })
            .map(|index| self.history[index])
            .collect();

        self.dfa
            .groups
            .iter()
            .map(|(opens, closes)| {
                util::collect_spans(path.iter().map(|&(state, position)| {
                    (position, opens.contains(&state), closes.contains(&state))
                }))
            })
            .collect()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            history: vec![(dfa.start, 0)],
        }
    }
}
