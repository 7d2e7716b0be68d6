//! D'Hondt (highest averages) seat allocation.
//!
//! Contract:
//! - Apply the entry threshold (absolute `min_votes`) before ranking.
//! - Seed a max-heap with every eligible entity's divisor-1 quotient.
//! - Award `total_seats` seats one by one: pop the best quotient, give its
//!   entity a seat, push the entity's next quotient (divisor + 1).
//! - Ties follow the `Quotient` order (fewer votes first, then input order).
//!
//! Determinism:
//! - No RNG, no clock. Identical inputs (same order) give identical outputs.
//! - The result covers every input entity, including ineligible ones at 0.

use alloc::collections::{BTreeMap, BinaryHeap};
use alloc::vec::Vec;
use core::fmt;

use parl_core::{Party, PartyId};

use crate::eligibility::eligible_positions;
use crate::quotient::Quotient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// Two input entities share a name; the result mapping is keyed by name.
    DuplicateParty(PartyId),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::DuplicateParty(id) => write!(f, "duplicate party in allocation input: {id}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocError {}

/// One awarded seat, in award order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatAward {
    /// 1-based seat number.
    pub round: u32,
    pub party: PartyId,
    /// Divisor of the winning quotient (equals the party's seat count after this award).
    pub divisor: u32,
    pub quotient: f64,
}

/// Seats per entity, plus the award trail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Allocation {
    seats: BTreeMap<PartyId, u32>,
    awards: Vec<SeatAward>,
}

impl Allocation {
    /// Seats won by `id`; `None` if `id` was not part of the run.
    #[inline]
    pub fn get(&self, id: &PartyId) -> Option<u32> {
        self.seats.get(id).copied()
    }

    /// Seats won by the entity named `name` (0 when absent or not a valid name).
    pub fn seats_of(&self, name: &str) -> u32 {
        name.parse::<PartyId>()
            .ok()
            .and_then(|id| self.get(&id))
            .unwrap_or(0)
    }

    pub fn seats(&self) -> &BTreeMap<PartyId, u32> {
        &self.seats
    }

    pub fn awards(&self) -> &[SeatAward] {
        &self.awards
    }

    /// Total seats handed out.
    pub fn total(&self) -> u32 {
        self.seats.values().sum()
    }

    /// Divisors used for `id`'s winning quotients, in award order.
    pub fn divisors_for(&self, id: &PartyId) -> Vec<u32> {
        self.awards
            .iter()
            .filter(|a| &a.party == id)
            .map(|a| a.divisor)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartyId, u32)> {
        self.seats.iter().map(|(k, v)| (k, *v))
    }
}

/// Allocate `total_seats` seats among `parties` with D'Hondt.
///
/// *Notes*:
/// - Entities with `votes < min_votes` stay at 0 seats whatever `total_seats` is.
/// - With no eligible entity every seat round finds an empty heap and stops;
///   the mapping is still returned with every entity at 0.
/// - Fails before doing any work if two entities share a name.
pub fn allocate_dhondt(
    parties: &[Party],
    total_seats: u32,
    min_votes: u64,
) -> Result<Allocation, AllocError> {
    // 1) Total result map (every input entity at 0).
    let mut seats: BTreeMap<PartyId, u32> = BTreeMap::new();
    for p in parties {
        if seats.insert(p.id().clone(), 0).is_some() {
            return Err(AllocError::DuplicateParty(p.id().clone()));
        }
    }

    // 2) + 3) Eligible entities seed the heap with divisor 1.
    let mut heap: BinaryHeap<Quotient> = eligible_positions(parties, min_votes)
        .map(|i| Quotient::first(i, parties[i].votes()))
        .collect();

    // 4) Sequential awards.
    let mut awards: Vec<SeatAward> = Vec::with_capacity(total_seats.min(1024) as usize);
    for round in 1..=total_seats {
        let Some(best) = heap.pop() else {
            break; // nobody eligible
        };
        let winner = parties[best.position()].id();
        if let Some(s) = seats.get_mut(winner) {
            *s += 1;
        }
        awards.push(SeatAward {
            round,
            party: winner.clone(),
            divisor: best.divisor(),
            quotient: best.value(),
        });
        heap.push(best.next());
    }

    Ok(Allocation { seats, awards })
}

/// Overwrite each entity's `seats` with its mapped value.
///
/// Entities missing from the mapping are left untouched. Applying the same
/// allocation twice yields the same seats.
pub fn apply_allocation(parties: &mut [Party], allocation: &Allocation) {
    for p in parties.iter_mut() {
        if let Some(n) = allocation.get(p.id()) {
            p.set_seats(n);
        }
    }
}
