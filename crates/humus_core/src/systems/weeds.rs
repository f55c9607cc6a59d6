use humus_data::{Nutrient, NutrientPools, ResourceDemand, SoilCell};

/// Applies weed extraction and litter return, one weed after another.
///
/// Each nutrient pool is updated as a single net step,
/// `max(0, pool - requirement + litter)`. Water is extracted without a return
/// term. Returns the total litter returned (g).
pub fn update_weed_dynamics(cell: &mut SoilCell, weeds: &[ResourceDemand]) -> NutrientPools {
    let mut litter = NutrientPools::ZERO;

    for weed in weeds {
        for kind in Nutrient::ALL {
            let returned = weed.litter_g[kind].max(0.0);
            cell.nutrients[kind] =
                (cell.nutrients[kind] - weed.requirement_g[kind].max(0.0) + returned).max(0.0);
            litter[kind] += returned;
        }
        cell.water_l = (cell.water_l - weed.water_l.max(0.0)).max(0.0);
    }

    litter
}
