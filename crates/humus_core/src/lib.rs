//! # Humus Core
//!
//! The daily state-update engine for cultivated soil cells.
//!
//! Every cell carries water, four nutrient pools, four contaminant pools and a
//! microbial health index. One simulated day runs eight sub-processes in a
//! fixed order:
//!
//! 1. Water balance (rain + irrigation, capacity clamp, surplus)
//! 2. Nutrient cycling (bedrock weathering + fertilizer)
//! 3. Contaminant accumulation
//! 4. Weed dynamics
//! 5. Plant interactions (uptake, stress feedback)
//! 6. Evapotranspiration (bare-soil evaporation + basal percolation)
//! 7. Microbial health update
//! 8. Leaching
//!
//! Microbial health modulates modules 2, 5, 6 and 8. Those modules always read
//! the value from the start of the day, so an update in module 7 only takes
//! effect on the following day.
//!
//! ## Example
//!
//! ```
//! use humus_core::config::AppConfig;
//! use humus_core::grid::SoilGrid;
//! use humus_data::Weather;
//!
//! let grid_config = AppConfig::default();
//! let mut grid = SoilGrid::new(grid_config).unwrap();
//! let forcing = grid.new_forcing(Weather::new(12.0, 3.0));
//! let report = grid.step(&forcing).unwrap();
//! assert_eq!(report.day, 1);
//! assert!(report.failures.is_empty());
//! ```

/// Irrigation management actions
pub mod actions;
/// Configuration management and validation
pub mod config;
/// Per-cell orchestration of the eight sub-processes
pub mod engine;
/// Error types
pub mod error;
/// Derived, validated soil geometry shared by all sub-processes
pub mod geometry;
/// Grid of soil cells stepped once per day
pub mod grid;
/// Day counters and structured logging
pub mod metrics;
/// The eight soil sub-processes
pub mod systems;

pub use actions::IrrigationAction;
pub use engine::{step_cell, Stage};
pub use error::{SoilError, SoilResult};
pub use geometry::SoilGeometry;
pub use grid::SoilGrid;
pub use metrics::{init_logging, Metrics};
