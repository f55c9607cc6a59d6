//! Microbial health update.
//!
//! Two stressors act on the community: residues aimed at soil organisms
//! (toxicity) and waterlogging (anoxia, proxied by the day's surplus relative
//! to field capacity). They combine into a survival probability through an
//! exponential dose-response link, which then drives a multiplicative
//! recovery factor.
//!
//! The recovery law is asymmetric. With no stress the community grows by 2 %
//! a day; growth turns into decline once `p_survive` drops below ~0.876, and a
//! stressed community shrinks much faster than a favoured one recovers.

use crate::geometry::SoilGeometry;
use humus_data::{SoilCell, MAX_MICROLIFE_HEALTH};

/// Soil-group residue (g) corresponding to one unit of toxicity stress.
pub const TOXICITY_SCALE_G: f64 = 100.0;
pub const TOXICITY_WEIGHT: f64 = 2.0;
/// Waterlogging weighs more heavily than toxicity.
pub const ANOXIA_WEIGHT: f64 = 5.0;
/// Daily growth rate of an unstressed community.
pub const GROWTH_RATE: f64 = 0.02;

/// Probability that the community persists under the given stresses, in
/// `(0, 1]`. Decreasing in both arguments.
#[must_use]
pub fn survival_probability(toxicity_stress: f64, anoxia_stress: f64) -> f64 {
    let dose = TOXICITY_WEIGHT * toxicity_stress.abs() + ANOXIA_WEIGHT * anoxia_stress.abs();
    (-dose).exp()
}

#[must_use]
pub fn recovery_factor(p_survive: f64) -> f64 {
    p_survive * (1.0 + GROWTH_RATE * p_survive) + (1.0 - p_survive) * p_survive
}

/// Updates `microlife_health` from today's toxicity and waterlogging.
///
/// Returns the new health. Modules that already ran today have read the old
/// value; the new one is seen from tomorrow on.
pub fn update_microlife_health(
    cell: &mut SoilCell,
    water_surplus_l: f64,
    geometry: &SoilGeometry,
) -> f64 {
    let toxicity_stress = cell.contaminants.soil / TOXICITY_SCALE_G;
    let anoxia_stress = geometry.surplus_ratio(water_surplus_l);

    let p_survive = survival_probability(toxicity_stress, anoxia_stress);
    cell.microlife_health =
        (cell.microlife_health * recovery_factor(p_survive)).clamp(0.0, MAX_MICROLIFE_HEALTH);

    tracing::trace!(
        x = cell.x,
        y = cell.y,
        toxicity_stress,
        anoxia_stress,
        p_survive,
        health = cell.microlife_health,
        "Microlife update"
    );

    cell.microlife_health
}
