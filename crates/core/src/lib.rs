//! Domain building blocks shared by the Daybook crates.
//!
//! Nothing in here touches the network or the store: date handling, input
//! validation, the default category set, per-day search, and the page
//! routing rules of the auth gate.

pub mod auth_gate;
pub mod dates;
pub mod error;
pub mod notes;
pub mod search;
pub mod types;
