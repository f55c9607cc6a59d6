use super::pools::{ContaminantPools, NutrientPools};
use serde::{Deserialize, Serialize};

/// Upper bound of the microbial health index.
pub const MAX_MICROLIFE_HEALTH: f64 = 100.0;
/// Share of field capacity above which a cell reads as wet.
pub const WET_THRESHOLD: f64 = 0.75;

/// Health index as a share of a full community, in `[0, 1]` for valid input.
#[must_use]
pub fn microlife_fraction(microlife_health: f64) -> f64 {
    microlife_health / MAX_MICROLIFE_HEALTH
}

/// Biogeochemical state of one cultivated soil cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilCell {
    /// X grid coordinate.
    pub x: u16,
    /// Y grid coordinate.
    pub y: u16,
    /// Water held in the root zone (L), within `[0, field_capacity]`.
    pub water_l: f64,
    /// Plant-available nutrient pools (g).
    pub nutrients: NutrientPools,
    /// Contaminant residues aggregated per functional group (g).
    pub contaminants: ContaminantPools,
    /// Microbial community condition, within `[0, 100]`.
    pub microlife_health: f64,
}

impl SoilCell {
    /// Empty cell with a fully healthy microbial community.
    #[must_use]
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            water_l: 0.0,
            nutrients: NutrientPools::ZERO,
            contaminants: ContaminantPools::ZERO,
            microlife_health: MAX_MICROLIFE_HEALTH,
        }
    }

    /// Pulls every quantity back into its physical range. Idempotent.
    pub fn clamp_to(&mut self, field_capacity_l: f64) {
        self.water_l = self.water_l.max(0.0).min(field_capacity_l);
        self.nutrients.clamp_non_negative();
        self.contaminants.clamp_non_negative();
        self.microlife_health = self.microlife_health.max(0.0).min(MAX_MICROLIFE_HEALTH);
    }

    #[must_use]
    pub fn is_within_bounds(&self, field_capacity_l: f64) -> bool {
        self.water_l >= 0.0
            && self.water_l <= field_capacity_l
            && self.nutrients.is_non_negative()
            && self.contaminants.is_non_negative()
            && (0.0..=MAX_MICROLIFE_HEALTH).contains(&self.microlife_health)
    }

    #[must_use]
    pub fn is_wet(&self, field_capacity_l: f64) -> bool {
        self.water_l > WET_THRESHOLD * field_capacity_l
    }
}
