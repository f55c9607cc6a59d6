//! Day summaries for the command line.

use humus_core::grid::SoilGrid;
use humus_data::{ContaminantGroup, ContaminantPools, DailyReport, Nutrient, NutrientPools, Weather};
use serde::Serialize;
use std::fmt::Write;

const WET_GLYPH: char = '~';
const DRY_GLYPH: char = '.';
/// Residue group listed in the cell table; the one microbes respond to.
const TABLE_RESIDUE: ContaminantGroup = ContaminantGroup::Soil;

/// Field-wide aggregates after one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: u64,
    pub rain_mm: f64,
    pub et0: f64,
    pub mean_water_l: f64,
    pub mean_health: f64,
    pub wet_cells: usize,
    pub nutrients_g: NutrientPools,
    pub contaminants_g: ContaminantPools,
    pub surplus_l: f64,
    pub leaching_events: usize,
    pub leached_nutrients_g: NutrientPools,
    pub total_irrigation_l: f64,
    pub failures: usize,
}

impl DaySummary {
    #[must_use]
    pub fn new(grid: &SoilGrid, weather: &Weather, report: &DailyReport) -> Self {
        let cells = grid.cells();
        let count = cells.len().max(1) as f64;
        let capacity = grid.geometry().field_capacity_l;

        let mut nutrients_g = NutrientPools::ZERO;
        let mut contaminants_g = ContaminantPools::ZERO;
        for cell in cells {
            nutrients_g.accumulate(&cell.nutrients);
            contaminants_g.accumulate(&cell.contaminants);
        }

        Self {
            day: report.day,
            rain_mm: weather.rain_mm,
            et0: weather.et0,
            mean_water_l: cells.iter().map(|c| c.water_l).sum::<f64>() / count,
            mean_health: cells.iter().map(|c| c.microlife_health).sum::<f64>() / count,
            wet_cells: cells.iter().filter(|c| c.is_wet(capacity)).count(),
            nutrients_g,
            contaminants_g,
            surplus_l: report.total_surplus_l(),
            leaching_events: report.leaching_events(),
            leached_nutrients_g: report.total_leached_nutrients(),
            total_irrigation_l: grid.totals().irrigation_l,
            failures: report.failures.len(),
        }
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "day {:>4} | rain {:>5.1} mm | water {:>6.1} L | health {:>5.1} | wet {:>3}",
            self.day, self.rain_mm, self.mean_water_l, self.mean_health, self.wet_cells
        );
        let _ = write!(
            text,
            " | N {:>9.1} g | leached N {:>7.2} g ({} cells) | irrigation {:>7.1} L",
            self.nutrients_g.n,
            self.leached_nutrients_g.n,
            self.leaching_events,
            self.total_irrigation_l,
        );
        if self.failures > 0 {
            let _ = write!(text, " | {} rejected", self.failures);
        }
        text
    }
}

/// One glyph per cell, one line per grid row: wet cells above 75 % of
/// capacity, dry cells otherwise.
#[must_use]
pub fn wetness_map(grid: &SoilGrid) -> String {
    let capacity = grid.geometry().field_capacity_l;
    let width = grid.width() as usize;
    let mut out = String::with_capacity(grid.cell_count() + grid.height() as usize);
    for row in grid.cells().chunks(width.max(1)) {
        for cell in row {
            out.push(if cell.is_wet(capacity) { WET_GLYPH } else { DRY_GLYPH });
        }
        out.push('\n');
    }
    out
}

/// Renders the final state of every cell as a table.
#[must_use]
pub fn cell_table(grid: &SoilGrid) -> String {
    let mut out = format!("{:>4} {:>4} {:>10} {:>8}", "x", "y", "water_l", "health");
    for kind in Nutrient::ALL {
        let _ = write!(out, " {:>9}", kind.label());
    }
    let _ = writeln!(out, " {:>10}", format!("{}_tox", TABLE_RESIDUE.label()));

    for cell in grid.cells() {
        let _ = write!(
            out,
            "{:>4} {:>4} {:>10.2} {:>8.2}",
            cell.x, cell.y, cell.water_l, cell.microlife_health
        );
        for (_, grams) in cell.nutrients.iter() {
            let _ = write!(out, " {grams:>9.1}");
        }
        let _ = writeln!(out, " {:>10.3}", cell.contaminants[TABLE_RESIDUE]);
    }
    out
}
