use crate::geometry::SoilGeometry;
use humus_data::{ResourceDemand, SoilCell, MAX_MICROLIFE_HEALTH};

/// Millilitres per litre.
pub const ML_PER_L: f64 = 1000.0;
/// Upper end of the basal percolation health term `(1.1 - health / 100)`.
/// Percolation keeps a floor of 0.1 even at full health.
pub const BASAL_PERCOLATION_CEILING: f64 = 1.1;

/// Share of the cell surface covered by plant and weed canopies, in `[0, 1]`.
#[must_use]
pub fn shadow_fraction(
    plants: &[ResourceDemand],
    weeds: &[ResourceDemand],
    geometry: &SoilGeometry,
) -> f64 {
    if geometry.surface_m2 <= 0.0 {
        return 0.0;
    }
    let shadow_m2: f64 = plants
        .iter()
        .chain(weeds)
        .map(|d| d.shadow_m2.max(0.0))
        .sum();
    (shadow_m2 / geometry.surface_m2).clamp(0.0, 1.0)
}

/// Bare-soil evaporation (L), reduced by canopy shade and by dryness.
///
/// `et0` is in mL·m⁻²·day⁻¹; the product with the evaporable volume is in mL.
#[must_use]
pub fn bare_soil_evaporation_l(
    water_l: f64,
    et0: f64,
    shadow: f64,
    geometry: &SoilGeometry,
) -> f64 {
    let wetness = geometry.wetness(water_l);
    et0.max(0.0) * (1.0 - shadow) * wetness * geometry.evaporable_volume_l / ML_PER_L
}

/// Structural drainage (L). Grows as microbial health falls.
#[must_use]
pub fn basal_percolation_l(microlife_health: f64, geometry: &SoilGeometry) -> f64 {
    (BASAL_PERCOLATION_CEILING - microlife_health / MAX_MICROLIFE_HEALTH)
        * geometry.surface_m2
        * geometry.depth_m
        * geometry.leakage_l_per_m3_day
}

/// Removes evaporation and basal percolation from the cell.
///
/// Returns the water actually lost (L), which is less than the demand when
/// the cell runs dry.
pub fn update_evapotranspiration(
    cell: &mut SoilCell,
    et0: f64,
    shadow: f64,
    microlife_health: f64,
    geometry: &SoilGeometry,
) -> f64 {
    let total_loss = bare_soil_evaporation_l(cell.water_l, et0, shadow, geometry)
        + basal_percolation_l(microlife_health, geometry);
    let before = cell.water_l;
    cell.water_l = (before - total_loss.max(0.0)).max(0.0);
    before - cell.water_l
}
