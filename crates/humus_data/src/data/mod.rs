//! Core data structures for the soil simulation.

pub mod forcing;
pub mod pools;
pub mod report;
pub mod soil;

pub use forcing::*;
pub use pools::*;
pub use report::*;
pub use soil::*;
