//! D'Hondt ranking token: `votes / divisor` for one entity.
//!
//! Ordering (greatest = next seat):
//! 1. higher quotient value;
//! 2. on equal values, the entity with **fewer** total votes;
//! 3. on equal values and votes, the entity earlier in the caller's list.
//!
//! Values are compared exactly (cross-multiplied in u128), never truncated.

use core::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quotient {
    position: usize,
    votes: u64,
    divisor: u32,
}

impl Quotient {
    /// Divisor-1 quotient for the entity at `position` in the input list.
    #[inline]
    pub fn first(position: usize, votes: u64) -> Self {
        Quotient { position, votes, divisor: 1 }
    }

    /// Successor token after this one won a seat.
    #[inline]
    pub fn next(self) -> Self {
        Quotient { divisor: self.divisor.saturating_add(1), ..self }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn votes(&self) -> u64 {
        self.votes
    }

    #[inline]
    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Real-valued quotient, for display and audit only.
    #[inline]
    pub fn value(&self) -> f64 {
        self.votes as f64 / self.divisor as f64
    }

    /// Compare `votes_a / div_a` against `votes_b / div_b` without division.
    fn cmp_value(&self, other: &Self) -> Ordering {
        let lhs = (self.votes as u128) * (other.divisor as u128);
        let rhs = (other.votes as u128) * (self.divisor as u128);
        lhs.cmp(&rhs)
    }
}

impl Ord for Quotient {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_value(other)
            .then_with(|| other.votes.cmp(&self.votes))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Quotient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
