pub mod macros;

use humus_data::{NutrientPools, ResourceDemand, SoilCell};
use humus_lib::model::config::AppConfig;
use humus_lib::model::grid::SoilGrid;

type CellMod = Box<dyn Fn(&mut SoilCell)>;

#[allow(dead_code)]
pub struct GridBuilder {
    config: AppConfig,
    cell_mods: Vec<CellMod>,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.field.width = 1;
        config.field.height = 1;
        Self {
            config,
            cell_mods: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.config.field.width = width;
        self.config.field.height = height;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Removes every flux that is not driven by forcing: no weathering,
    /// no basal percolation.
    pub fn closed_system(self) -> Self {
        self.with_config(|c| {
            c.soil.bedrock_release_mg_per_day = NutrientPools::ZERO;
            c.soil.water_leakage_max_l_per_m3_day = 0.0;
        })
    }

    pub fn with_water(self, water_l_per_m3: f64) -> Self {
        self.with_config(move |c| c.initial.water_l_per_m3 = Some(water_l_per_m3))
    }

    pub fn with_health(self, health: f64) -> Self {
        self.with_config(move |c| c.initial.microlife_health = health)
    }

    pub fn with_nutrients(self, grams_per_m3: f64) -> Self {
        self.with_config(move |c| {
            c.initial.nutrient_density_g_per_m3 = NutrientPools::splat(grams_per_m3);
        })
    }

    /// Applies `modifier` to every cell after the grid is built.
    pub fn with_cells<F>(mut self, modifier: F) -> Self
    where
        F: Fn(&mut SoilCell) + 'static,
    {
        self.cell_mods.push(Box::new(modifier));
        self
    }

    pub fn build(self) -> SoilGrid {
        let mut grid = SoilGrid::new(self.config).expect("Failed to build grid");
        if !self.cell_mods.is_empty() {
            grid.modify_cells(|cell| {
                for modifier in &self.cell_mods {
                    modifier(cell);
                }
            });
        }
        grid
    }
}

#[allow(dead_code)]
pub fn demand(requirement_g: f64, water_l: f64) -> ResourceDemand {
    ResourceDemand {
        requirement_g: NutrientPools::splat(requirement_g),
        water_l,
        litter_g: NutrientPools::ZERO,
        shadow_m2: 0.0,
    }
}
