//! Configuration management for soil parameters.
//!
//! Strongly-typed structures mapping to the `[field]`, `[soil]` and
//! `[initial]` tables of a TOML file. Every table has defaults, so a file only
//! needs to name what it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [field]
//! width = 8
//! height = 4
//! plot_surface_m2 = 1.0
//!
//! [soil]
//! max_water_capacity_l_per_m3 = 250.0
//! wilting_point_l_per_m3 = 75.0
//! depth_m = 1.0
//!
//! [soil.bedrock_release_mg_per_day]
//! n = 200.0
//! ```
//!
//! Configuration is the only place where the engine refuses input: a
//! non-positive surface, depth or capacity fails here, before any cell exists.

use crate::error::{SoilError, SoilResult};
use humus_data::{ContaminantPools, NutrientPools, MAX_MICROLIFE_HEALTH};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Water content (L/m³) a freshly reset cell starts with, capped by capacity.
pub const DEFAULT_INITIAL_WATER_L_PER_M3: f64 = 250.0;

/// Grid dimensions and the surface of one cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub width: u16,
    pub height: u16,
    pub plot_surface_m2: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            plot_surface_m2: 1.0,
        }
    }
}

/// Physical soil parameters, shared by every cell and never mutated mid-run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SoilConfig {
    /// Water holding capacity per soil volume.
    pub max_water_capacity_l_per_m3: f64,
    /// Water per soil volume below which roots cannot extract.
    pub wilting_point_l_per_m3: f64,
    /// Root zone depth.
    pub depth_m: f64,
    /// Maximum basal percolation rate.
    pub water_leakage_max_l_per_m3_day: f64,
    /// Bedrock weathering rate per nutrient at full microbial health.
    pub bedrock_release_mg_per_day: NutrientPools,
}

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            max_water_capacity_l_per_m3: 250.0,
            wilting_point_l_per_m3: 75.0,
            depth_m: 1.0,
            water_leakage_max_l_per_m3_day: 2.0,
            bedrock_release_mg_per_day: NutrientPools::new(200.0, 50.0, 150.0, 400.0),
        }
    }
}

/// State a cell is given at reset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InitialConfig {
    /// Nutrient content per soil volume (g/m³).
    pub nutrient_density_g_per_m3: NutrientPools,
    /// Water per soil volume; `None` uses `min(capacity, 250)`.
    pub water_l_per_m3: Option<f64>,
    pub microlife_health: f64,
    /// Contaminant residues already present (g per cell).
    pub contaminants_g: ContaminantPools,
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            nutrient_density_g_per_m3: NutrientPools::new(2600.0, 2550.0, 27500.0, 30000.0),
            water_l_per_m3: None,
            microlife_health: MAX_MICROLIFE_HEALTH,
            contaminants_g: ContaminantPools::ZERO,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub field: FieldConfig,
    pub soil: SoilConfig,
    pub initial: InitialConfig,
}

fn ensure(condition: bool, msg: &str) -> SoilResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SoilError::config(msg))
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violated rule as [`SoilError::Config`].
    ///
    /// # Validation Rules
    /// - Grid dimensions must be positive and at most 1000 per side
    /// - Surface, depth and water capacity must be positive and finite
    /// - Wilting point must lie in `[0, capacity]` (equality is allowed)
    /// - Rates and initial pools must be non-negative and finite
    /// - Initial microbial health must lie in `[0, 100]`
    pub fn validate(&self) -> SoilResult<()> {
        ensure(self.field.width > 0, "Field width must be positive")?;
        ensure(self.field.width <= 1000, "Field width too large (max 1000)")?;
        ensure(self.field.height > 0, "Field height must be positive")?;
        ensure(self.field.height <= 1000, "Field height too large (max 1000)")?;
        ensure(
            positive(self.field.plot_surface_m2),
            "Plot surface must be positive",
        )?;

        ensure(positive(self.soil.depth_m), "Soil depth must be positive")?;
        ensure(
            positive(self.soil.max_water_capacity_l_per_m3),
            "Water capacity must be positive",
        )?;
        ensure(
            non_negative(self.soil.wilting_point_l_per_m3),
            "Wilting point must be non-negative",
        )?;
        ensure(
            self.soil.wilting_point_l_per_m3 <= self.soil.max_water_capacity_l_per_m3,
            "Wilting point must not exceed water capacity",
        )?;
        ensure(
            non_negative(self.soil.water_leakage_max_l_per_m3_day),
            "Water leakage rate must be non-negative",
        )?;
        ensure(
            self.soil
                .bedrock_release_mg_per_day
                .iter()
                .all(|(_, v)| non_negative(v)),
            "Bedrock release rates must be non-negative",
        )?;

        ensure(
            self.initial
                .nutrient_density_g_per_m3
                .iter()
                .all(|(_, v)| non_negative(v)),
            "Initial nutrient densities must be non-negative",
        )?;
        ensure(
            self.initial.water_l_per_m3.map_or(true, non_negative),
            "Initial water must be non-negative",
        )?;
        ensure(
            self.initial.microlife_health.is_finite()
                && (0.0..=MAX_MICROLIFE_HEALTH).contains(&self.initial.microlife_health),
            "Initial microlife health must be in [0, 100]",
        )?;
        ensure(
            self.initial
                .contaminants_g
                .iter()
                .all(|(_, v)| non_negative(v)),
            "Initial contaminants must be non-negative",
        )?;

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> SoilResult<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> SoilResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// sha256 of the physical parameters, for tracing run outputs back to
    /// their configuration.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.field).as_bytes());
        hasher.update(format!("{:?}", self.soil).as_bytes());
        hasher.update(format!("{:?}", self.initial).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_surface_rejected() {
        let config = AppConfig {
            field: FieldConfig {
                plot_surface_m2: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SoilError::Config(_))));
    }

    #[test]
    fn test_negative_depth_rejected() {
        let config = AppConfig {
            soil: SoilConfig {
                depth_m: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_capacity_rejected() {
        let config = AppConfig {
            soil: SoilConfig {
                max_water_capacity_l_per_m3: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wilting_point_above_capacity_rejected() {
        let config = AppConfig {
            soil: SoilConfig {
                max_water_capacity_l_per_m3: 100.0,
                wilting_point_l_per_m3: 120.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wilting_point_equal_to_capacity_allowed() {
        let config = AppConfig {
            soil: SoilConfig {
                max_water_capacity_l_per_m3: 100.0,
                wilting_point_l_per_m3: 100.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_health_out_of_range() {
        let config = AppConfig {
            initial: InitialConfig {
                microlife_health: 101.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = AppConfig {
            field: FieldConfig {
                width: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [field]
            width = 8

            [soil.bedrock_release_mg_per_day]
            n = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(config.field.width, 8);
        assert_eq!(config.field.height, FieldConfig::default().height);
        assert_eq!(config.soil.bedrock_release_mg_per_day.n, 10.0);
        assert_eq!(config.soil.bedrock_release_mg_per_day.p, 0.0);
        assert_eq!(config.soil.depth_m, 1.0);
    }

    #[test]
    fn test_invalid_toml_value_fails_fast() {
        let result = AppConfig::from_toml("[soil]\ndepth_m = 0.0\n");
        assert!(matches!(result, Err(SoilError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = AppConfig::from_toml("[soil\n");
        assert!(matches!(result, Err(SoilError::Parse(_))));
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let mut config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());
        config2.soil.depth_m = 0.5;
        assert_ne!(config1.fingerprint(), config2.fingerprint());
    }
}
