use super::pools::{ContaminantPools, NutrientPools};
use serde::{Deserialize, Serialize};

/// What a plant actually received today and how much demand went unmet.
///
/// This is the feedback channel to the plant growth model; the soil engine
/// computes it but does not own any plant state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UptakeFeedback {
    pub nutrient_uptake_g: NutrientPools,
    pub nutrient_stress_g: NutrientPools,
    pub water_uptake_l: f64,
    pub water_stress_l: f64,
}

/// Fluxes observed while stepping one cell for one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellReport {
    pub x: u16,
    pub y: u16,
    /// Irrigation volume applied in the water balance (L).
    pub irrigation_l: f64,
    /// Part of `irrigation_l` the soil held below field capacity (L).
    pub irrigation_absorbed_l: f64,
    /// Water above field capacity after rain and irrigation (L).
    pub water_surplus_l: f64,
    /// Bedrock weathering plus fertilizer input (g).
    pub nutrient_input_g: NutrientPools,
    /// Contaminant mass added by cide applications (g).
    pub contaminant_input_g: ContaminantPools,
    /// Nutrients returned by weed litter (g).
    pub weed_litter_g: NutrientPools,
    /// One entry per plant, in the order the plants were supplied.
    pub plant_feedback: Vec<UptakeFeedback>,
    /// Bare-soil evaporation plus basal percolation (L).
    pub evapotranspiration_l: f64,
    /// Microbial health after today's update.
    pub microlife_health: f64,
    pub leached_nutrients_g: NutrientPools,
    pub degraded_contaminants_g: ContaminantPools,
}

impl CellReport {
    #[must_use]
    pub fn leached(&self) -> bool {
        self.water_surplus_l > 0.0
    }
}

/// A cell whose update was rejected; its state was left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFailure {
    pub x: u16,
    pub y: u16,
    pub message: String,
}

/// Outcome of stepping a whole grid by one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyReport {
    /// Day number after the step (the first step produces day 1).
    pub day: u64,
    pub cells: Vec<CellReport>,
    pub failures: Vec<CellFailure>,
}

impl DailyReport {
    #[must_use]
    pub fn leaching_events(&self) -> usize {
        self.cells.iter().filter(|c| c.leached()).count()
    }

    #[must_use]
    pub fn total_leached_nutrients(&self) -> NutrientPools {
        let mut total = NutrientPools::ZERO;
        for cell in &self.cells {
            total.accumulate(&cell.leached_nutrients_g);
        }
        total
    }

    #[must_use]
    pub fn total_surplus_l(&self) -> f64 {
        self.cells.iter().map(|c| c.water_surplus_l).sum()
    }
}

/// Inputs accumulated since the last reset, for environmental accounting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CumulativeTotals {
    /// Irrigation water actually absorbed; spill above capacity is excluded.
    pub irrigation_l: f64,
    pub contaminants_g: ContaminantPools,
}
