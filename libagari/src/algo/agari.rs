//! Best decomposition of a complete hand over all pair choices.
//!
//! Every candidate pair is evaluated on its own and the results are compared
//! afterwards, so nothing is ever credited to a candidate that later loses.
use super::meld::{Div, ScanError, scan_melds};
use super::score::{Outcome, combine};
use super::yaku::classify;
use crate::hand::{Hand, Tiles};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Position of the first pair tile in the hand.
    pub pair_idx: usize,
    pub div: Div,
    pub outcome: Outcome,
}

/// Positions `i` with `hand[i] == hand[i + 1]`, only the first one for each
/// tile value since later ones leave the same remainder.
pub fn pair_candidates(hand: &Hand) -> impl Iterator<Item = usize> + '_ {
    let tiles = hand.tiles();
    (0..tiles.len().saturating_sub(1))
        .filter(move |&i| tiles[i] == tiles[i + 1] && (i == 0 || tiles[i - 1] != tiles[i]))
}

/// Evaluates a single pair choice.
pub fn evaluate_pair(hand: &Hand, pair_idx: usize) -> Result<Evaluation, ScanError> {
    let variant = hand.variant();
    let tiles = hand.tiles();

    let mut rest = Tiles::new();
    rest.extend_from_slice(&tiles[..pair_idx]);
    rest.extend_from_slice(&tiles[pair_idx + 2..]);

    let melds = scan_melds(variant, &rest)?;
    let div = Div {
        pair: tiles[pair_idx],
        melds,
    };
    let outcome = combine(variant, classify(variant, &div));
    Ok(Evaluation {
        pair_idx,
        div,
        outcome,
    })
}

/// Every candidate pair with its result, in ascending position.
pub fn candidates(
    hand: &Hand,
) -> impl Iterator<Item = (usize, Result<Evaluation, ScanError>)> + '_ {
    pair_candidates(hand).map(|i| (i, evaluate_pair(hand, i)))
}

/// The highest-scoring decomposition, the earliest one on ties.
///
/// Returns `None` if no candidate decomposes or the best score is 0.
pub fn evaluate(hand: &Hand) -> Option<Evaluation> {
    let mut best: Option<Evaluation> = None;
    for (i, res) in candidates(hand) {
        let eval = match res {
            Ok(eval) => eval,
            Err(err @ ScanError::Length { .. }) => {
                log::warn!("{hand}: pair at {i}: {err}");
                continue;
            }
            Err(err) => {
                log::trace!("{hand}: pair at {i}: {err}");
                continue;
            }
        };
        if best
            .as_ref()
            .is_none_or(|b| eval.outcome.value() > b.outcome.value())
        {
            best = Some(eval);
        }
    }
    if let Some(b) = &best {
        log::debug!(
            "{hand}: {} scores {} ({})",
            b.div.to_log_string(hand.variant()),
            b.outcome.value(),
            b.outcome.yaku(),
        );
    }
    best.filter(|b| b.outcome.value() > 0)
}
