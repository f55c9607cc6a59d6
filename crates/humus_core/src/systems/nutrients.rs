use crate::geometry::SoilGeometry;
use humus_data::{
    microlife_fraction, FertilizerRelease, Nutrient, NutrientPools, SoilCell, G_PER_KG, MG_PER_G,
};

/// Adds bedrock weathering and fertilizer input to every nutrient pool.
///
/// Weathering is biologically mediated and scales linearly with microbial
/// health: a dead community releases nothing from bedrock. Fertilizer input is
/// independent of health. Returns the total release per nutrient (g).
pub fn update_nutrient_cycling(
    cell: &mut SoilCell,
    fertilizers: &[FertilizerRelease],
    microlife_health: f64,
    geometry: &SoilGeometry,
) -> NutrientPools {
    let microlife_fraction = microlife_fraction(microlife_health);
    let mut released = NutrientPools::ZERO;

    for kind in Nutrient::ALL {
        let mut release =
            microlife_fraction * geometry.bedrock_release_mg_per_day[kind] / MG_PER_G;
        for fertilizer in fertilizers {
            release += fertilizer.nutrients_kg[kind].max(0.0) * G_PER_KG;
        }
        cell.nutrients[kind] += release;
        released[kind] = release;
    }

    released
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::fixtures;

    #[test]
    fn test_bedrock_release_scales_with_health() {
        let geometry = fixtures::geometry();
        let mut cell = fixtures::cell(100.0, 50.0);
        let released = update_nutrient_cycling(&mut cell, &[], 50.0, &geometry);
        // default N rate is 200 mg/day
        assert!((released.n - 0.1).abs() < 1e-12);
        assert!((cell.nutrients.n - 1000.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_health_releases_nothing_from_bedrock() {
        let geometry = fixtures::geometry();
        let mut cell = fixtures::cell(100.0, 0.0);
        let before = cell.nutrients;
        let released = update_nutrient_cycling(&mut cell, &[], 0.0, &geometry);
        assert_eq!(released, NutrientPools::ZERO);
        assert_eq!(cell.nutrients, before);
    }

    #[test]
    fn test_fertilizer_unaffected_by_health() {
        let geometry = fixtures::geometry();
        let mut cell = fixtures::cell(100.0, 0.0);
        let fertilizer = FertilizerRelease {
            nutrients_kg: NutrientPools::new(0.5, 0.0, 0.25, 0.0),
        };
        let released =
            update_nutrient_cycling(&mut cell, &[fertilizer, fertilizer], 0.0, &geometry);
        assert_eq!(released.n, 1000.0);
        assert_eq!(released.k, 500.0);
        assert_eq!(cell.nutrients.n, 2000.0);
        assert_eq!(cell.nutrients.p, 1000.0);
    }

    #[test]
    fn test_negative_fertilizer_treated_as_zero() {
        let geometry = fixtures::geometry();
        let mut cell = fixtures::cell(100.0, 0.0);
        let fertilizer = FertilizerRelease {
            nutrients_kg: NutrientPools::splat(-3.0),
        };
        update_nutrient_cycling(&mut cell, &[fertilizer], 0.0, &geometry);
        assert_eq!(cell.nutrients, NutrientPools::splat(1000.0));
    }
}
