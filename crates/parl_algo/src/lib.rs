// crates/parl_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use parl_core::{Party, PartyId};

// ----------------------------- Eligibility & ranking ----------------------------------

pub mod eligibility;
pub mod quotient;

pub use eligibility::{eligible, minimum_vote_threshold};
pub use quotient::Quotient;

// ----------------------------- Allocation (public surface) ---------------------------

pub mod allocation {
    pub mod dhondt;

    pub use dhondt::{allocate_dhondt, apply_allocation, AllocError, Allocation, SeatAward};

    /// Pipeline-friendly alias.
    pub use dhondt::allocate_dhondt as allocate;
}

pub use allocation::{allocate, apply_allocation, AllocError, Allocation, SeatAward};
