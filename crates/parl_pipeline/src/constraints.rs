//! CONSTRAINTS stage (advisory).
//!
//! Converts the percentage limits in `ElectionParams` to absolute vote counts
//! and checks the two largest entities against the max-share and max-gap
//! limits. Nothing here changes votes or seats; the allocator never sees it.

use parl_core::{ElectionParams, Party, PartyId};
use tracing::warn;

/// One of the two largest entities by votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopEntity {
    pub id: PartyId,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintAdvisory {
    /// Entry threshold in votes.
    pub min_votes: u64,
    /// Max-share limit in votes.
    pub max_votes: u64,
    /// Max allowed gap between the two largest entities, in votes.
    pub max_gap_votes: u64,
    /// Largest and second largest; `None` with fewer than two entities.
    pub top_two: Option<(TopEntity, TopEntity)>,
    pub max_share_exceeded: bool,
    pub top_two_gap_exceeded: bool,
}

impl ConstraintAdvisory {
    /// Votes between the two largest entities (0 when fewer than two).
    pub fn top_two_gap(&self) -> u64 {
        match &self.top_two {
            Some((a, b)) => a.votes.abs_diff(b.votes),
            None => 0,
        }
    }

    pub fn any_flag(&self) -> bool {
        self.max_share_exceeded || self.top_two_gap_exceeded
    }
}

/// Check `entities` against the limits in `params`.
///
/// Ties on votes keep input order, so the "largest" of two equal entities is
/// the earlier one.
pub fn check_constraints(entities: &[Party], params: &ElectionParams) -> ConstraintAdvisory {
    let min_votes = params.min_votes();
    let max_votes = params.max_votes();
    let max_gap_votes = params.max_gap_votes();

    let mut by_votes: Vec<&Party> = entities.iter().collect();
    by_votes.sort_by(|a, b| b.votes().cmp(&a.votes())); // stable

    let top_two = match by_votes.as_slice() {
        [first, second, ..] => Some((
            TopEntity { id: first.id().clone(), votes: first.votes() },
            TopEntity { id: second.id().clone(), votes: second.votes() },
        )),
        _ => None,
    };

    let mut advisory = ConstraintAdvisory {
        min_votes,
        max_votes,
        max_gap_votes,
        top_two,
        max_share_exceeded: false,
        top_two_gap_exceeded: false,
    };

    if let Some((first, second)) = &advisory.top_two {
        advisory.max_share_exceeded = first.votes > max_votes || second.votes > max_votes;
        advisory.top_two_gap_exceeded = first.votes.abs_diff(second.votes) > max_gap_votes;

        if advisory.max_share_exceeded {
            warn!(first = %first.id, second = %second.id, max_votes, "top entity above max vote share");
        }
        if advisory.top_two_gap_exceeded {
            warn!(
                first = %first.id,
                second = %second.id,
                gap = advisory.top_two_gap(),
                max_gap_votes,
                "top-two gap above limit"
            );
        }
    }

    advisory
}
