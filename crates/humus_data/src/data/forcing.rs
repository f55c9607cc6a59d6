//! External forcing supplied by collaborators for one simulated day.
//!
//! The soil engine never owns these entities. Weather, fertilizer, cide, plant
//! and weed models each report what they do to a cell today and the engine
//! folds those contributions into the cell state.

use super::pools::{ContaminantPools, NutrientPools};
use serde::{Deserialize, Serialize};

/// Daily weather shared by every cell of the field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    /// Rain depth (mm). 1 mm over 1 m² is 1 L.
    pub rain_mm: f64,
    /// Reference evaporation (mL·m⁻²·day⁻¹).
    pub et0: f64,
}

impl Weather {
    #[must_use]
    pub fn new(rain_mm: f64, et0: f64) -> Self {
        Self { rain_mm, et0 }
    }

    #[must_use]
    pub fn dry() -> Self {
        Self::default()
    }
}

/// Nutrients released by one fertilizer application on a cell today (kg).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FertilizerRelease {
    pub nutrients_kg: NutrientPools,
}

/// Mass released by one pesticide/herbicide/fungicide application (kg) and
/// the fraction of it attributed to each functional group.
///
/// Fractions need not sum to one: a substance can hit several groups
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CideRelease {
    pub total_kg: f64,
    pub partition: ContaminantPools,
}

/// Resource demand of a plant or weed rooted in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDemand {
    /// Nutrient requirement for today (g).
    pub requirement_g: NutrientPools,
    /// Water requirement for today (L).
    pub water_l: f64,
    /// Nutrients returned to the soil as litter or dead roots (g).
    pub litter_g: NutrientPools,
    /// Canopy shadow cast on the cell (m²).
    pub shadow_m2: f64,
}

/// Everything collaborators apply to a single cell on one day.
///
/// Each sequence is processed in order; entities of the same kind fold their
/// contributions into the pools one after another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellForcing {
    /// Irrigation volume (L) applied together with rain.
    pub irrigation_l: f64,
    pub fertilizers: Vec<FertilizerRelease>,
    pub cides: Vec<CideRelease>,
    pub weeds: Vec<ResourceDemand>,
    pub plants: Vec<ResourceDemand>,
}

/// Forcing for a whole grid: shared weather plus one entry per cell in
/// row-major order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyForcing {
    pub weather: Weather,
    pub cells: Vec<CellForcing>,
}

impl DailyForcing {
    /// Forcing with no entity activity on any of `cell_count` cells.
    #[must_use]
    pub fn new(weather: Weather, cell_count: usize) -> Self {
        Self {
            weather,
            cells: vec![CellForcing::default(); cell_count],
        }
    }
}
