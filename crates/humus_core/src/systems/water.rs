use crate::geometry::SoilGeometry;
use humus_data::SoilCell;

/// Adds rain and irrigation to the cell and caps it at field capacity.
///
/// Returns the surplus above capacity (L), which drives anoxia stress and
/// leaching later in the same day. Negative inputs count as zero.
pub fn update_water_balance(
    cell: &mut SoilCell,
    rain_l: f64,
    irrigation_l: f64,
    geometry: &SoilGeometry,
) -> f64 {
    let water_after = cell.water_l + rain_l.max(0.0) + irrigation_l.max(0.0);
    cell.water_l = water_after.min(geometry.field_capacity_l);
    (water_after - geometry.field_capacity_l).max(0.0)
}

/// Irrigation volume the cell can hold before rain is added (L).
///
/// Irrigation is credited first; whatever exceeds the remaining room spills
/// into the surplus together with the rain.
#[must_use]
pub fn absorbed_irrigation_l(water_l: f64, irrigation_l: f64, geometry: &SoilGeometry) -> f64 {
    let room_l = (geometry.field_capacity_l - water_l).max(0.0);
    irrigation_l.max(0.0).min(room_l)
}
