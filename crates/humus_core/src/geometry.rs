use crate::config::AppConfig;
use crate::error::SoilResult;
use humus_data::NutrientPools;
use serde::{Deserialize, Serialize};

/// Litres per cubic metre.
pub const L_PER_M3: f64 = 1000.0;
/// Only the top layer of the profile loses water to bare-soil evaporation.
pub const EVAPORABLE_DEPTH_M: f64 = 0.15;

/// Physical quantities derived once from a validated configuration and
/// threaded, read-only, into every sub-process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilGeometry {
    pub surface_m2: f64,
    pub depth_m: f64,
    /// Maximum water a cell holds against gravity (L).
    pub field_capacity_l: f64,
    /// Water below which roots cannot extract (L).
    pub wilting_point_l: f64,
    /// Soil volume of the evaporating top layer (L).
    pub evaporable_volume_l: f64,
    pub leakage_l_per_m3_day: f64,
    pub bedrock_release_mg_per_day: NutrientPools,
}

impl SoilGeometry {
    /// Validates `config` and derives the geometry. Fails fast on any
    /// missing or non-positive physical parameter.
    pub fn from_config(config: &AppConfig) -> SoilResult<Self> {
        config.validate()?;
        let surface = config.field.plot_surface_m2;
        let soil = &config.soil;
        Ok(Self {
            surface_m2: surface,
            depth_m: soil.depth_m,
            field_capacity_l: soil.max_water_capacity_l_per_m3 * surface * soil.depth_m,
            wilting_point_l: soil.wilting_point_l_per_m3 * surface * soil.depth_m,
            evaporable_volume_l: surface * EVAPORABLE_DEPTH_M.min(soil.depth_m) * L_PER_M3,
            leakage_l_per_m3_day: soil.water_leakage_max_l_per_m3_day,
            bedrock_release_mg_per_day: soil.bedrock_release_mg_per_day,
        })
    }

    /// Converts a rain depth to a volume over the cell: 1 mm on 1 m² is 1 L.
    #[must_use]
    pub fn rain_volume_l(&self, rain_mm: f64) -> f64 {
        rain_mm * self.surface_m2
    }

    #[must_use]
    pub fn soil_volume_m3(&self) -> f64 {
        self.surface_m2 * self.depth_m
    }

    /// Relative wetness between wilting point (0) and field capacity (1).
    ///
    /// Returns 0 when capacity equals the wilting point.
    #[must_use]
    pub fn wetness(&self, water_l: f64) -> f64 {
        let range = self.field_capacity_l - self.wilting_point_l;
        if range <= 0.0 {
            return 0.0;
        }
        ((water_l - self.wilting_point_l) / range).clamp(0.0, 1.0)
    }

    /// Drainage intensity of a surplus, as a share of field capacity.
    #[must_use]
    pub fn surplus_ratio(&self, water_surplus_l: f64) -> f64 {
        if self.field_capacity_l <= 0.0 {
            return 0.0;
        }
        water_surplus_l / self.field_capacity_l
    }
}
