use std::iter;

/// All byte offsets a match may start at: every char boundary plus the end of the text
/// (the empty suffix can still produce an empty match).
pub(crate) fn match_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.char_indices()
        .map(|(at, _)| at)
        .chain(iter::once(text.len()))
}

/// Folds a sequence of `(position, opens, closes)` events into closed spans.
///
/// While no span is open, an opening event starts one and a closing event at the same
/// position immediately completes it (producing an empty span). While a span is open,
/// a closing event completes it first and an opening event at the same position may
/// then start the next span. Unclosed spans are discarded.
pub(crate) fn collect_spans(events: impl Iterator<Item = (usize, bool, bool)>) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut open = None;
    for (position, opens, closes) in events {
        if let Some(begin) = open {
            if closes {
                spans.push((begin, position));
                open = opens.then_some(position);
            }
        } else if opens {
            if closes {
                spans.push((position, position));
            } else {
                open = Some(position);
            }
        }
    }
    spans
}
