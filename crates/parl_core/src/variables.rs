//! Election parameters and the `Percent` domain.
//!
//! Notes:
//! - Percents are stored as integer basis points (1.75 % == 175 bp) so that
//!   threshold math stays in integers downstream.
//! - Defaults reproduce the sample election (230 seats, 6 000 000 valid votes,
//!   1.75 % entry threshold, 36.25 % max share, 1.75 % max top-two gap).

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const BP_PER_PERCENT: u32 = 100;
const MAX_BP: u32 = 100 * BP_PER_PERCENT;

/// A percentage in `0..=100`, held in basis points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Percent(u32);

impl Percent {
    pub const ZERO: Percent = Percent(0);

    pub fn from_bps(bps: u32) -> Result<Self, CoreError> {
        if bps > MAX_BP {
            return Err(CoreError::InvalidPercent);
        }
        Ok(Percent(bps))
    }

    #[inline]
    pub fn bps(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / BP_PER_PERCENT as f64
    }

    /// `floor(total * self / 100)` in exact integer arithmetic.
    pub fn of(self, total: u64) -> u64 {
        let num = (total as u128) * (self.0 as u128);
        (num / (MAX_BP as u128)) as u64
    }
}

/// Tolerance for binary representation error when reading a decimal percent.
const BP_EPSILON: f64 = 1e-6;

/// Exact basis points only; `1.755` is rejected like its string form.
impl TryFrom<f64> for Percent {
    type Error = CoreError;
    fn try_from(pct: f64) -> Result<Self, Self::Error> {
        if !(0.0..=100.0).contains(&pct) {
            // also catches NaN
            return Err(CoreError::InvalidPercent);
        }
        let scaled = pct * BP_PER_PERCENT as f64;
        let bps = (scaled + 0.5) as u32;
        let drift = scaled - bps as f64;
        if drift > BP_EPSILON || drift < -BP_EPSILON {
            return Err(CoreError::InvalidPercent);
        }
        Percent::from_bps(bps)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> f64 {
        p.as_f64()
    }
}

/// Accepts `"1.75"`, `"1.75%"`, `"36"`; at most two decimals.
impl FromStr for Percent {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('%').unwrap_or(s).trim_end();
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() || frac_part.len() > 2 {
            return Err(CoreError::InvalidPercent);
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidPercent);
        }
        let whole: u32 = int_part.parse().map_err(|_| CoreError::InvalidPercent)?;
        let mut frac: u32 = 0;
        for (i, b) in frac_part.bytes().enumerate() {
            let digit = (b - b'0') as u32;
            frac += if i == 0 { digit * 10 } else { digit };
        }
        let bps = whole
            .checked_mul(BP_PER_PERCENT)
            .and_then(|w| w.checked_add(frac))
            .ok_or(CoreError::InvalidPercent)?;
        Percent::from_bps(bps)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / BP_PER_PERCENT, self.0 % BP_PER_PERCENT)
    }
}

/// Explicit configuration for one election run.
///
/// Not deserializable on its own: scenario files go through `parl_io::loader`,
/// which runs [`validate_domains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElectionParams {
    pub total_seats: u32,
    /// Valid votes cast; denominator for thresholds and vote shares.
    pub total_votes: u64,
    pub min_threshold: Percent,
    pub max_vote_share: Percent,
    pub max_top_two_gap: Percent,
}

impl ElectionParams {
    pub const DEFAULT_TOTAL_SEATS: u32 = 230;
    pub const DEFAULT_TOTAL_VOTES: u64 = 6_000_000;

    /// Absolute minimum votes for eligibility.
    #[inline]
    pub fn min_votes(&self) -> u64 {
        self.min_threshold.of(self.total_votes)
    }

    #[inline]
    pub fn max_votes(&self) -> u64 {
        self.max_vote_share.of(self.total_votes)
    }

    #[inline]
    pub fn max_gap_votes(&self) -> u64 {
        self.max_top_two_gap.of(self.total_votes)
    }
}

impl Default for ElectionParams {
    fn default() -> Self {
        ElectionParams {
            total_seats: Self::DEFAULT_TOTAL_SEATS,
            total_votes: Self::DEFAULT_TOTAL_VOTES,
            min_threshold: Percent(175),
            max_vote_share: Percent(3625),
            max_top_two_gap: Percent(175),
        }
    }
}

/// Domain checks for a parameter set. Percents are range-checked on construction.
pub fn validate_domains(p: &ElectionParams) -> Result<(), CoreError> {
    if p.total_seats == 0 {
        return Err(CoreError::InvalidInput("total_seats must be > 0"));
    }
    if p.total_votes == 0 {
        return Err(CoreError::InvalidInput("total_votes must be > 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn threshold_of_sample_total() {
        let pct: Percent = "1.75".parse().unwrap();
        assert_eq!(pct.of(6_000_000), 105_000);
        assert_eq!(ElectionParams::default().min_votes(), 105_000);
        assert_eq!(ElectionParams::default().max_votes(), 2_175_000);
        assert_eq!(ElectionParams::default().max_gap_votes(), 105_000);
    }

    #[test]
    fn threshold_truncates_toward_zero() {
        let pct: Percent = "1.75".parse().unwrap();
        // 999 * 1.75 / 100 = 17.4825
        assert_eq!(pct.of(999), 17);
        assert_eq!(Percent::ZERO.of(999), 0);
        assert_eq!(Percent::from_bps(10_000).unwrap().of(999), 999);
    }

    #[test]
    fn parse_forms() {
        assert_eq!("1.75".parse::<Percent>().unwrap().bps(), 175);
        assert_eq!("1.75%".parse::<Percent>().unwrap().bps(), 175);
        assert_eq!(" 36.25 ".parse::<Percent>().unwrap().bps(), 3625);
        assert_eq!("5".parse::<Percent>().unwrap().bps(), 500);
        assert_eq!("0.5".parse::<Percent>().unwrap().bps(), 50);
        assert_eq!("100".parse::<Percent>().unwrap().bps(), 10_000);
    }

    #[test]
    fn parse_rejects_out_of_domain() {
        for bad in ["", "-1", "100.01", "1.755", "abc", ".5", "1e2", "4294967296"] {
            assert_eq!(bad.parse::<Percent>(), Err(CoreError::InvalidPercent), "{bad}");
        }
    }

    #[test]
    fn from_f64_takes_exact_basis_points() {
        assert_eq!(Percent::try_from(1.75).unwrap().bps(), 175);
        assert_eq!(Percent::try_from(36.25).unwrap().bps(), 3625);
        assert_eq!(Percent::try_from(0.29).unwrap().bps(), 29);
        assert_eq!(Percent::try_from(0.07).unwrap().bps(), 7);
        assert_eq!(Percent::try_from(100.0).unwrap().bps(), 10_000);
        assert_eq!(Percent::try_from(1.755), Err(CoreError::InvalidPercent));
        assert_eq!(Percent::try_from(0.001), Err(CoreError::InvalidPercent));
        assert!(Percent::try_from(-0.01).is_err());
        assert!(Percent::try_from(f64::NAN).is_err());
        assert!(Percent::try_from(100.5).is_err());
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Percent::try_from(1.75).unwrap().to_string(), "1.75%");
        assert_eq!(Percent::try_from(5.0).unwrap().to_string(), "5.00%");
    }

    #[test]
    fn domains() {
        assert!(validate_domains(&ElectionParams::default()).is_ok());
        let p = ElectionParams { total_seats: 0, ..ElectionParams::default() };
        assert!(validate_domains(&p).is_err());
        let p = ElectionParams { total_votes: 0, ..ElectionParams::default() };
        assert!(validate_domains(&p).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn percent_deserializes_from_json_number() {
        let p: Percent = serde_json::from_str("1.75").unwrap();
        assert_eq!(p.bps(), 175);
        assert!(serde_json::from_str::<Percent>("101").is_err());
        assert!(serde_json::from_str::<Percent>("1.755").is_err());
    }
}
