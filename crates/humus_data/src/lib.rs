//! Plain data records shared by the soil engine and the entities that drive it.
//!
//! Nothing in this crate advances the simulation. It holds the per-cell state,
//! the daily forcing supplied by collaborators and the reports handed back.

pub mod data;

pub use data::*;
