//! The eight soil sub-processes, in execution order.
//!
//! Each module mutates one [`humus_data::SoilCell`] in place and clamps at
//! the point of every subtraction. None of them knows about the others: the
//! values they exchange (water surplus, start-of-day microbial health) are
//! passed explicitly by [`crate::engine`].

pub mod water;
pub mod nutrients;
pub mod contaminants;
pub mod weeds;
pub mod plants;
pub mod evapotranspiration;
pub mod microlife;
pub mod leaching;
