//! parl_core — Core types for the parliament seat simulator.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! workspace (`parl_algo`, `parl_io`, `parl_pipeline`, `parl_report`, `parl_cli`).
//!
//! - Entity tokens: `PartyId`
//! - Entities: `Party` (simple party or coalition of parties)
//! - Parameters: `Percent` (basis points), `ElectionParams`
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for entity construction and parameter parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        /// Caller misuse: empty coalition, repeated member, out-of-domain value.
        InvalidInput(&'static str),
        /// Party name does not match the token charset.
        InvalidToken,
        /// Percent outside `0..=100` or not a number.
        InvalidPercent,
        /// Vote sum does not fit in `u64`.
        Overflow,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidInput(why) => write!(f, "invalid input: {why}"),
                CoreError::InvalidToken => write!(f, "invalid party name"),
                CoreError::InvalidPercent => write!(f, "invalid percent"),
                CoreError::Overflow => write!(f, "vote total overflow"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod entities;
pub mod ids;
pub mod variables;

pub use entities::{Party, PartyKind};
pub use errors::CoreError;
pub use ids::PartyId;
pub use variables::{ElectionParams, Percent};
