//! crates/parl_core/src/entities.rs
//! Parties and coalitions.
//!
//! A coalition *is* a party: it exposes the same vote/seat surface and only
//! differs by carrying the ordered list of merged member names. Coalitions are
//! formed before allocation and never change afterwards except for `seats`.

use alloc::vec::Vec;
use core::fmt;

use crate::errors::CoreError;
use crate::ids::PartyId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartyKind {
    Simple,
    /// Member names in merge order (flattened when a member is itself a coalition).
    Coalition { members: Vec<PartyId> },
}

/// Only built through [`Party::simple`], [`Party::with_id`] and
/// [`Party::coalition`]; there is no serde path around those checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    id: PartyId,
    votes: u64,
    seats: u32,
    kind: PartyKind,
}

impl Party {
    /// A party running on its own, with zero seats.
    pub fn simple(name: &str, votes: u64) -> Result<Self, CoreError> {
        Ok(Party {
            id: name.parse()?,
            votes,
            seats: 0,
            kind: PartyKind::Simple,
        })
    }

    /// Same as [`Party::simple`] for an already validated id.
    pub fn with_id(id: PartyId, votes: u64) -> Self {
        Party { id, votes, seats: 0, kind: PartyKind::Simple }
    }

    /// Merge `members` into a coalition named `name`.
    ///
    /// Votes are the exact sum of the members' votes; the member list is the
    /// concatenation of each member's own `members()`, in the order given.
    /// The inputs are left untouched: callers must not also pass the merged
    /// members to the same allocation run.
    pub fn coalition(name: &str, members: &[&Party]) -> Result<Self, CoreError> {
        let id: PartyId = name.parse()?;
        if members.is_empty() {
            return Err(CoreError::InvalidInput("coalition needs at least one member"));
        }

        let mut votes: u64 = 0;
        let mut names: Vec<PartyId> = Vec::new();
        for m in members {
            votes = votes.checked_add(m.votes).ok_or(CoreError::Overflow)?;
            for n in m.members() {
                if names.contains(n) {
                    return Err(CoreError::InvalidInput("party listed twice in coalition"));
                }
                names.push(n.clone());
            }
        }
        if names.contains(&id) {
            return Err(CoreError::InvalidInput("coalition name collides with a member"));
        }

        Ok(Party {
            id,
            votes,
            seats: 0,
            kind: PartyKind::Coalition { members: names },
        })
    }

    #[inline]
    pub fn id(&self) -> &PartyId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    #[inline]
    pub fn votes(&self) -> u64 {
        self.votes
    }

    #[inline]
    pub fn seats(&self) -> u32 {
        self.seats
    }

    #[inline]
    pub fn kind(&self) -> &PartyKind {
        &self.kind
    }

    #[inline]
    pub fn is_coalition(&self) -> bool {
        matches!(self.kind, PartyKind::Coalition { .. })
    }

    /// Constituent names. A simple party lists only itself.
    pub fn members(&self) -> &[PartyId] {
        match &self.kind {
            PartyKind::Simple => core::slice::from_ref(&self.id),
            PartyKind::Coalition { members } => members,
        }
    }

    pub fn add_seat(&mut self) {
        self.seats = self.seats.saturating_add(1);
    }

    pub fn set_seats(&mut self, seats: u32) {
        self.seats = seats;
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PartyKind::Simple => f.write_str(self.name()),
            PartyKind::Coalition { members } => {
                write!(f, "{} (coalition: ", self.name())?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("+")?;
                    }
                    f.write_str(m.as_str())?;
                }
                f.write_str(")")
            }
        }
    }
}
