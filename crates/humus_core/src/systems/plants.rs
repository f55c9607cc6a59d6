//! Plant nutrient and water uptake.
//!
//! Two limits apply to every plant. Microbial mediation caps the share of the
//! nutrient requirement a plant can take at all (`health / 100 × requirement`),
//! and the soil pool caps what is actually there. Water below the wilting point
//! is physically present but cannot be extracted.
//!
//! Unmet demand is reported back as stress. The engine only computes the
//! signal; growth models own what it does to the plant.

use crate::geometry::SoilGeometry;
use humus_data::{
    microlife_fraction, Nutrient, NutrientPools, ResourceDemand, SoilCell, UptakeFeedback,
};

/// Runs uptake for every plant in order and returns one feedback record per
/// plant. Each plant sees the pools as left by the previous one.
pub fn update_plant_interactions(
    cell: &mut SoilCell,
    plants: &[ResourceDemand],
    microlife_health: f64,
    geometry: &SoilGeometry,
) -> Vec<UptakeFeedback> {
    let microlife_fraction = microlife_fraction(microlife_health);
    let mut feedback = Vec::with_capacity(plants.len());

    for plant in plants {
        let mut uptake = NutrientPools::ZERO;
        let mut stress = NutrientPools::ZERO;

        for kind in Nutrient::ALL {
            let requirement = plant.requirement_g[kind].max(0.0);
            let available = cell.nutrients[kind];
            let taken = available.min(microlife_fraction * requirement);

            uptake[kind] = taken;
            stress[kind] = (requirement - taken).max(0.0);
            cell.nutrients[kind] = (available - taken + plant.litter_g[kind].max(0.0)).max(0.0);
        }

        let (water_uptake_l, water_stress_l) = extract_water(cell, plant.water_l, geometry);

        feedback.push(UptakeFeedback {
            nutrient_uptake_g: uptake,
            nutrient_stress_g: stress,
            water_uptake_l,
            water_stress_l,
        });
    }

    feedback
}

/// Takes up to `requirement_l` from the water above the wilting point.
/// Returns `(uptake, stress)`.
fn extract_water(cell: &mut SoilCell, requirement_l: f64, geometry: &SoilGeometry) -> (f64, f64) {
    let requirement = requirement_l.max(0.0);
    let extractable = (cell.water_l - geometry.wilting_point_l).max(0.0);
    let uptake = requirement.min(extractable);
    cell.water_l = (cell.water_l - uptake).max(0.0);
    (uptake, (requirement - uptake).max(0.0))
}
