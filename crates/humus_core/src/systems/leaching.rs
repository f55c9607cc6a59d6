use crate::geometry::SoilGeometry;
use humus_data::{
    microlife_fraction, ContaminantGroup, ContaminantPools, Nutrient, NutrientPools, SoilCell,
};

/// First-order decay constant coupling contaminant loss to drainage flux.
pub const CONTAMINANT_DECAY_RATE: f64 = 1.0;

/// Mass removed from the cell by one drainage event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LeachingLoss {
    pub nutrients_g: NutrientPools,
    pub contaminants_g: ContaminantPools,
}

/// Drains nutrients and contaminants with the day's water surplus.
///
/// Nutrient loss shrinks as microbial health rises. Contaminant loss depends
/// on drainage intensity only. Without a surplus this is a no-op.
pub fn update_leaching(
    cell: &mut SoilCell,
    water_surplus_l: f64,
    microlife_health: f64,
    geometry: &SoilGeometry,
) -> LeachingLoss {
    let mut loss = LeachingLoss::default();
    if water_surplus_l <= 0.0 {
        return loss;
    }

    let leaching_intensity = geometry.surplus_ratio(water_surplus_l);
    let exposure = 1.0 - microlife_fraction(microlife_health);

    // A full community retains everything, even under unbounded drainage.
    // Otherwise intensity can exceed 1 on extreme rain and the pool empties.
    let nutrient_loss_fraction = if exposure <= 0.0 {
        0.0
    } else {
        (leaching_intensity * exposure).clamp(0.0, 1.0)
    };
    for kind in Nutrient::ALL {
        let current = cell.nutrients[kind];
        let lost = current * nutrient_loss_fraction;
        cell.nutrients[kind] = (current - lost).max(0.0);
        loss.nutrients_g[kind] = current - cell.nutrients[kind];
    }

    let contaminant_loss_fraction = 1.0 - (-CONTAMINANT_DECAY_RATE * leaching_intensity).exp();
    for group in ContaminantGroup::ALL {
        let current = cell.contaminants[group];
        let lost = current * contaminant_loss_fraction;
        cell.contaminants[group] = (current - lost).max(0.0);
        loss.contaminants_g[group] = current - cell.contaminants[group];
    }

    loss
}
