//! Seeded synthetic forcing for standalone runs.
//!
//! The engine expects collaborators (weather, crop, weed and treatment models)
//! to supply daily forcing. For command-line runs this module stands in for
//! them with a simple stochastic scenario: random rain events, one crop per
//! plot, sporadic weeds, periodic fertilization, an optional cide treatment
//! and an irrigation rule that waters dry plots.

use anyhow::{ensure, Result};
use humus_core::actions::{IrrigationAction, DISCRETE_MAX_L};
use humus_core::grid::SoilGrid;
use humus_data::{
    CideRelease, ContaminantPools, DailyForcing, FertilizerRelease, NutrientPools, ResourceDemand,
    Weather,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub days: u64,
    pub seed: u64,
    /// Daily probability of a rain event.
    pub rain_probability: f64,
    pub rain_mm_min: f64,
    pub rain_mm_max: f64,
    /// Reference evaporation range (mL·m⁻²·day⁻¹).
    pub et0_min: f64,
    pub et0_max: f64,
    /// Demand of the single crop planted on every plot.
    pub crop: ResourceDemand,
    /// Daily probability that a plot carries a weed.
    pub weed_probability: f64,
    pub weed: ResourceDemand,
    /// Days between fertilizer applications; 0 disables fertilization.
    pub fertilizer_interval_days: u64,
    pub fertilizer_kg: NutrientPools,
    /// Day of the single cide treatment, if any.
    pub cide_day: Option<u64>,
    pub cide_kg: f64,
    pub cide_partition: ContaminantPools,
    /// Plots below this relative wetness are irrigated; 0 disables irrigation.
    pub irrigate_below_wetness: f64,
    pub irrigation_l: u8,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            days: 120,
            seed: 42,
            rain_probability: 0.3,
            rain_mm_min: 2.0,
            rain_mm_max: 30.0,
            et0_min: 2.0,
            et0_max: 6.0,
            crop: ResourceDemand {
                requirement_g: NutrientPools::new(3.0, 0.6, 2.5, 6.0),
                water_l: 2.5,
                litter_g: NutrientPools::new(0.2, 0.05, 0.2, 1.0),
                shadow_m2: 0.3,
            },
            weed_probability: 0.2,
            weed: ResourceDemand {
                requirement_g: NutrientPools::new(1.0, 0.2, 0.8, 2.0),
                water_l: 0.8,
                litter_g: NutrientPools::new(0.3, 0.05, 0.2, 1.5),
                shadow_m2: 0.1,
            },
            fertilizer_interval_days: 30,
            fertilizer_kg: NutrientPools::new(0.02, 0.005, 0.015, 0.0),
            cide_day: Some(45),
            cide_kg: 0.01,
            cide_partition: ContaminantPools::new(0.2, 0.6, 0.1, 0.1),
            irrigate_below_wetness: 0.3,
            irrigation_l: 10,
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.rain_probability),
            "rain_probability must lie in [0, 1]"
        );
        ensure!(
            (0.0..=1.0).contains(&self.weed_probability),
            "weed_probability must lie in [0, 1]"
        );
        ensure!(
            self.rain_mm_min.is_finite() && self.rain_mm_min >= 0.0,
            "rain_mm_min must be non-negative"
        );
        ensure!(
            self.rain_mm_max.is_finite() && self.rain_mm_max >= self.rain_mm_min,
            "rain_mm_max must be at least rain_mm_min"
        );
        ensure!(
            self.et0_min.is_finite() && self.et0_min >= 0.0,
            "et0_min must be non-negative"
        );
        ensure!(
            self.et0_max.is_finite() && self.et0_max >= self.et0_min,
            "et0_max must be at least et0_min"
        );
        ensure!(
            (0.0..=1.0).contains(&self.irrigate_below_wetness),
            "irrigate_below_wetness must lie in [0, 1]"
        );
        ensure!(
            self.irrigation_l <= DISCRETE_MAX_L,
            "irrigation_l must be at most {DISCRETE_MAX_L}"
        );
        Ok(())
    }
}

/// Produces one day of forcing at a time from a seeded generator.
pub struct ScenarioGenerator {
    config: ScenarioConfig,
    rng: ChaCha8Rng,
}

impl ScenarioGenerator {
    #[must_use]
    pub fn new(config: ScenarioConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Forcing for the grid's next day. Dry plots get an irrigation action
    /// queued on the grid before the forcing is returned.
    pub fn next_day(&mut self, grid: &mut SoilGrid) -> Result<DailyForcing> {
        let day = grid.day() + 1;
        let weather = self.weather();
        let mut forcing = grid.new_forcing(weather);

        let fertilize = self.config.fertilizer_interval_days > 0
            && day % self.config.fertilizer_interval_days == 0;
        let treat = self.config.cide_day == Some(day);

        for cell_forcing in &mut forcing.cells {
            cell_forcing.plants.push(self.config.crop);
            if self.rng.gen_bool(self.config.weed_probability) {
                cell_forcing.weeds.push(self.config.weed);
            }
            if fertilize {
                cell_forcing.fertilizers.push(FertilizerRelease {
                    nutrients_kg: self.config.fertilizer_kg,
                });
            }
            if treat {
                cell_forcing.cides.push(CideRelease {
                    total_kg: self.config.cide_kg,
                    partition: self.config.cide_partition,
                });
            }
        }

        if self.config.irrigate_below_wetness > 0.0 && self.config.irrigation_l > 0 {
            let geometry = *grid.geometry();
            let dry: Vec<(u16, u16)> = grid
                .cells()
                .iter()
                .filter(|c| geometry.wetness(c.water_l) < self.config.irrigate_below_wetness)
                .map(|c| (c.x, c.y))
                .collect();
            for (x, y) in dry {
                grid.irrigate(IrrigationAction::Discrete {
                    x,
                    y,
                    amount_l: self.config.irrigation_l,
                })?;
            }
        }

        Ok(forcing)
    }

    fn weather(&mut self) -> Weather {
        let rain_mm = if self.rng.gen_bool(self.config.rain_probability) {
            self.rng
                .gen_range(self.config.rain_mm_min..=self.config.rain_mm_max)
        } else {
            0.0
        };
        let et0 = self
            .rng
            .gen_range(self.config.et0_min..=self.config.et0_max);
        Weather::new(rain_mm, et0)
    }
}
