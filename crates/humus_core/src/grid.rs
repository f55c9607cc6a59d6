//! The field: a row-major grid of independent soil cells.
//!
//! Cells never exchange water or mass, so a day is stepped in parallel when
//! the `parallel` feature is on. Each cell is fail-stop on its own: a
//! rejected forcing leaves that cell untouched and the rest of the grid
//! advances normally.

use crate::actions::IrrigationAction;
use crate::config::{AppConfig, DEFAULT_INITIAL_WATER_L_PER_M3};
use crate::engine::step_cell;
use crate::error::{SoilError, SoilResult};
use crate::geometry::SoilGeometry;
use humus_data::{
    CellFailure, CellForcing, CellReport, CumulativeTotals, DailyForcing, DailyReport, SoilCell,
    Weather, G_PER_KG,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::borrow::Cow;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SoilGrid {
    width: u16,
    height: u16,
    cells: Vec<SoilCell>,
    geometry: SoilGeometry,
    config: AppConfig,
    day: u64,
    /// Irrigation queued by actions since the last step (L per cell).
    pending_irrigation: Vec<f64>,
    totals: CumulativeTotals,
}

impl SoilGrid {
    /// Builds a grid with every cell at its configured initial state.
    pub fn new(config: AppConfig) -> SoilResult<Self> {
        let geometry = SoilGeometry::from_config(&config)?;
        let width = config.field.width;
        let height = config.field.height;
        let cell_count = width as usize * height as usize;

        let mut grid = Self {
            width,
            height,
            cells: Vec::with_capacity(cell_count),
            geometry,
            config,
            day: 0,
            pending_irrigation: vec![0.0; cell_count],
            totals: CumulativeTotals::default(),
        };
        grid.reset();

        info!(
            width,
            height,
            field_capacity_l = geometry.field_capacity_l,
            fingerprint = %grid.config.fingerprint(),
            "Soil grid created"
        );
        Ok(grid)
    }

    /// Restores every cell to its initial state and clears the day counter,
    /// queued irrigation and cumulative totals.
    pub fn reset(&mut self) {
        self.cells.clear();
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.initial_cell(x, y);
                self.cells.push(cell);
            }
        }
        self.pending_irrigation.iter_mut().for_each(|v| *v = 0.0);
        self.totals = CumulativeTotals::default();
        self.day = 0;
        info!(cells = self.cells.len(), "Soil grid reset");
    }

    fn initial_cell(&self, x: u16, y: u16) -> SoilCell {
        let initial = &self.config.initial;
        let volume_m3 = self.geometry.soil_volume_m3();
        let water_per_m3 = initial
            .water_l_per_m3
            .unwrap_or(DEFAULT_INITIAL_WATER_L_PER_M3)
            .min(self.config.soil.max_water_capacity_l_per_m3);

        let mut cell = SoilCell::new(x, y);
        cell.water_l = water_per_m3 * volume_m3;
        cell.nutrients = initial.nutrient_density_g_per_m3.scaled(volume_m3);
        cell.contaminants = initial.contaminants_g;
        cell.microlife_health = initial.microlife_health;
        cell.clamp_to(self.geometry.field_capacity_l);
        cell
    }

    #[must_use]
    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn cell(&self, x: u16, y: u16) -> SoilResult<&SoilCell> {
        self.index(x, y)
            .map(|i| &self.cells[i])
            .ok_or(SoilError::OutOfBounds { x, y })
    }

    #[must_use]
    pub fn cells(&self) -> &[SoilCell] {
        &self.cells
    }

    /// Edits cell state directly, e.g. to load an observed field. Every cell
    /// is clamped back into its physical range afterwards.
    pub fn modify_cells<F>(&mut self, mut modifier: F)
    where
        F: FnMut(&mut SoilCell),
    {
        let capacity = self.geometry.field_capacity_l;
        for cell in &mut self.cells {
            modifier(cell);
            cell.clamp_to(capacity);
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn geometry(&self) -> &SoilGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Number of days stepped since creation or the last reset.
    #[must_use]
    pub fn day(&self) -> u64 {
        self.day
    }

    #[must_use]
    pub fn totals(&self) -> &CumulativeTotals {
        &self.totals
    }

    /// Irrigation currently queued for a plot (L).
    pub fn pending_irrigation(&self, x: u16, y: u16) -> SoilResult<f64> {
        self.index(x, y)
            .map(|i| self.pending_irrigation[i])
            .ok_or(SoilError::OutOfBounds { x, y })
    }

    /// Empty forcing shaped for this grid.
    #[must_use]
    pub fn new_forcing(&self, weather: Weather) -> DailyForcing {
        DailyForcing::new(weather, self.cell_count())
    }

    /// Queues an irrigation action for the next step. Several actions on the
    /// same plot add up.
    pub fn irrigate(&mut self, action: IrrigationAction) -> SoilResult<()> {
        action.validate()?;
        let (x, y) = action.plot();
        let index = self.index(x, y).ok_or(SoilError::OutOfBounds { x, y })?;
        self.pending_irrigation[index] += action.volume_l();
        Ok(())
    }

    /// Advances every cell by one day.
    ///
    /// Queued irrigation is added to each cell's forcing. Cells whose forcing
    /// is rejected keep their state, are listed in the report's failures and
    /// keep their queued irrigation for the next step.
    pub fn step(&mut self, forcing: &DailyForcing) -> SoilResult<DailyReport> {
        if forcing.cells.len() != self.cells.len() {
            return Err(SoilError::ForcingShape {
                expected: self.cells.len(),
                actual: forcing.cells.len(),
            });
        }

        let pending = std::mem::replace(&mut self.pending_irrigation, vec![0.0; self.cells.len()]);
        let geometry = self.geometry;
        let weather = forcing.weather;

        let step_one = |(cell, (cell_forcing, queued)): (&mut SoilCell, (&CellForcing, &f64))| {
            let cell_forcing = with_irrigation(cell_forcing, *queued);
            step_cell(cell, &weather, &cell_forcing, &geometry).map_err(|e| (cell.x, cell.y, e))
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<CellReport, (u16, u16, SoilError)>> = self
            .cells
            .par_iter_mut()
            .zip(forcing.cells.par_iter().zip(pending.par_iter()))
            .map(step_one)
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<CellReport, (u16, u16, SoilError)>> = self
            .cells
            .iter_mut()
            .zip(forcing.cells.iter().zip(pending.iter()))
            .map(step_one)
            .collect();

        self.day += 1;
        let mut report = DailyReport {
            day: self.day,
            cells: Vec::with_capacity(outcomes.len()),
            failures: Vec::new(),
        };

        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(cell_report) => {
                    self.totals.irrigation_l += cell_report.irrigation_absorbed_l;
                    self.totals
                        .contaminants_g
                        .accumulate(&cell_report.contaminant_input_g);
                    report.cells.push(cell_report);
                }
                Err((x, y, err)) => {
                    warn!(day = self.day, x, y, error = %err, "Cell update rejected");
                    self.pending_irrigation[index] += pending[index];
                    report.failures.push(CellFailure {
                        x,
                        y,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Total cide mass applied so far, summed over groups (kg).
    #[must_use]
    pub fn total_contaminants_kg(&self) -> f64 {
        self.totals.contaminants_g.total() / G_PER_KG
    }
}

fn with_irrigation(forcing: &CellForcing, queued_l: f64) -> Cow<'_, CellForcing> {
    if queued_l == 0.0 {
        Cow::Borrowed(forcing)
    } else {
        let mut owned = forcing.clone();
        owned.irrigation_l += queued_l;
        Cow::Owned(owned)
    }
}
