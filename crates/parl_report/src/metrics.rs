//! Representation metrics.
//!
//! `efficiency = seat share / vote share`, both against the configured totals
//! in `ElectionParams` (not the seats actually awarded). Above 1.0 means the
//! entity holds more of the chamber than of the vote.

use std::fmt;

use parl_core::{ElectionParams, Party};

/// Seat share over vote share; 0.0 when the entity (or the election) has no votes.
pub fn efficiency(party: &Party, params: &ElectionParams) -> f64 {
    if party.votes() == 0 || params.total_votes == 0 || params.total_seats == 0 {
        return 0.0;
    }
    let seat_pct = party.seats() as f64 * 100.0 / params.total_seats as f64;
    let vote_pct = party.votes() as f64 * 100.0 / params.total_votes as f64;
    seat_pct / vote_pct
}

/// Votes behind each won seat; `None` for seatless entities.
pub fn votes_per_seat(party: &Party) -> Option<f64> {
    match party.seats() {
        0 => None,
        s => Some(party.votes() as f64 / s as f64),
    }
}

/// Mean efficiency over the seated entities of `parties`; 0.0 if none is seated.
pub fn mean_efficiency<'a, I>(parties: I, params: &ElectionParams) -> f64
where
    I: IntoIterator<Item = &'a Party>,
{
    let (sum, n) = parties
        .into_iter()
        .filter(|p| p.seats() > 0 && p.votes() > 0)
        .fold((0.0, 0u32), |(sum, n), p| (sum + efficiency(p, params), n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

pub(crate) fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Seat change of an entity between the two scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[cfg_attr(feature = "render_json", serde(rename_all = "snake_case"))]
pub enum Advantage {
    Gain(u32),
    Loss(u32),
    Unchanged,
}

impl Advantage {
    pub fn from_difference(diff: i64) -> Self {
        match diff {
            d if d > 0 => Advantage::Gain(u32::try_from(d).unwrap_or(u32::MAX)),
            d if d < 0 => Advantage::Loss(u32::try_from(d.unsigned_abs()).unwrap_or(u32::MAX)),
            _ => Advantage::Unchanged,
        }
    }
}

impl fmt::Display for Advantage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advantage::Gain(n) => write!(f, "↑ +{n} advantage"),
            Advantage::Loss(n) => write!(f, "↓ -{n} disadvantage"),
            Advantage::Unchanged => f.write_str("= no change"),
        }
    }
}
