//! Entry threshold.
//!
//! The threshold is an absolute vote count derived from a percentage of the
//! valid votes cast: `floor(total_votes * pct / 100)`. Entities below it are
//! removed before quotient generation and can never win a seat in that run.

use alloc::vec::Vec;

use parl_core::{Party, Percent};

/// `floor(total_votes * pct / 100)`, integer math only.
#[inline]
pub fn minimum_vote_threshold(total_votes: u64, pct: Percent) -> u64 {
    pct.of(total_votes)
}

/// Entities with `votes >= min_votes`, in input order.
pub fn eligible(parties: &[Party], min_votes: u64) -> Vec<&Party> {
    parties.iter().filter(|p| p.votes() >= min_votes).collect()
}

/// Input positions of the eligible entities, ascending.
pub(crate) fn eligible_positions(
    parties: &[Party],
    min_votes: u64,
) -> impl Iterator<Item = usize> + '_ {
    parties
        .iter()
        .enumerate()
        .filter(move |(_, p)| p.votes() >= min_votes)
        .map(|(i, _)| i)
}
