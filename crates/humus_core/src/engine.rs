//! Per-cell orchestration of the eight soil sub-processes.
//!
//! One day for one cell is a strict sequence: later stages consume values
//! that are only valid after earlier ones ran. The two values exchanged
//! between stages are threaded explicitly through [`PipelineState`]:
//!
//! - the water surplus produced by [`Stage::WaterBalance`], consumed by
//!   [`Stage::MicrolifeHealth`] and [`Stage::Leaching`];
//! - the microbial health captured before any stage runs, read by
//!   [`Stage::NutrientCycling`], [`Stage::PlantInteractions`],
//!   [`Stage::Evapotranspiration`] and [`Stage::Leaching`]. The value written
//!   by [`Stage::MicrolifeHealth`] is therefore seen from the next day on.

use crate::error::{SoilError, SoilResult};
use crate::geometry::SoilGeometry;
use crate::systems::{
    contaminants, evapotranspiration, leaching, microlife, nutrients, plants, water, weeds,
};
use humus_data::{CellForcing, CellReport, ResourceDemand, SoilCell, Weather};

/// One sub-process of the daily soil update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    WaterBalance,
    NutrientCycling,
    Contaminants,
    WeedDynamics,
    PlantInteractions,
    Evapotranspiration,
    MicrolifeHealth,
    Leaching,
}

impl Stage {
    /// The only order in which [`step_cell`] runs the stages.
    pub const ORDER: [Stage; 8] = [
        Stage::WaterBalance,
        Stage::NutrientCycling,
        Stage::Contaminants,
        Stage::WeedDynamics,
        Stage::PlantInteractions,
        Stage::Evapotranspiration,
        Stage::MicrolifeHealth,
        Stage::Leaching,
    ];
}

/// Values handed from one stage to the next within a single cell-day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineState {
    /// Microbial health at the start of the day.
    pub start_health: f64,
    /// Water above field capacity after today's inputs (L).
    pub water_surplus_l: f64,
}

/// Advances one cell by one day.
///
/// The forcing is checked before anything runs and the stages operate on a
/// working copy that replaces `cell` only on success. On error the cell is
/// left exactly as it was.
pub fn step_cell(
    cell: &mut SoilCell,
    weather: &Weather,
    forcing: &CellForcing,
    geometry: &SoilGeometry,
) -> SoilResult<CellReport> {
    validate_forcing(cell.x, cell.y, weather, forcing, geometry)?;

    let mut next = cell.clone();
    let report = run_stages(&mut next, weather, forcing, geometry, &Stage::ORDER);
    *cell = next;
    Ok(report)
}

/// Runs `stages` on `cell` in the given order, without validation.
///
/// [`step_cell`] always passes [`Stage::ORDER`]; other orders exist for
/// experiments that compare pipeline arrangements.
pub fn run_stages(
    cell: &mut SoilCell,
    weather: &Weather,
    forcing: &CellForcing,
    geometry: &SoilGeometry,
    stages: &[Stage],
) -> CellReport {
    let mut state = PipelineState {
        start_health: cell.microlife_health,
        water_surplus_l: 0.0,
    };
    let mut report = CellReport {
        x: cell.x,
        y: cell.y,
        ..Default::default()
    };

    for stage in stages {
        run_stage(*stage, cell, weather, forcing, geometry, &mut state, &mut report);
    }

    cell.clamp_to(geometry.field_capacity_l);
    report.microlife_health = cell.microlife_health;

    tracing::debug!(
        x = cell.x,
        y = cell.y,
        water_l = cell.water_l,
        surplus_l = state.water_surplus_l,
        health = cell.microlife_health,
        "Cell stepped"
    );

    report
}

fn run_stage(
    stage: Stage,
    cell: &mut SoilCell,
    weather: &Weather,
    forcing: &CellForcing,
    geometry: &SoilGeometry,
    state: &mut PipelineState,
    report: &mut CellReport,
) {
    match stage {
        Stage::WaterBalance => {
            let irrigation_l = forcing.irrigation_l.max(0.0);
            report.irrigation_absorbed_l =
                water::absorbed_irrigation_l(cell.water_l, irrigation_l, geometry);
            state.water_surplus_l = water::update_water_balance(
                cell,
                geometry.rain_volume_l(weather.rain_mm),
                irrigation_l,
                geometry,
            );
            report.irrigation_l = irrigation_l;
            report.water_surplus_l = state.water_surplus_l;
        }
        Stage::NutrientCycling => {
            report.nutrient_input_g = nutrients::update_nutrient_cycling(
                cell,
                &forcing.fertilizers,
                state.start_health,
                geometry,
            );
        }
        Stage::Contaminants => {
            report.contaminant_input_g = contaminants::update_contaminants(cell, &forcing.cides);
        }
        Stage::WeedDynamics => {
            report.weed_litter_g = weeds::update_weed_dynamics(cell, &forcing.weeds);
        }
        Stage::PlantInteractions => {
            report.plant_feedback = plants::update_plant_interactions(
                cell,
                &forcing.plants,
                state.start_health,
                geometry,
            );
        }
        Stage::Evapotranspiration => {
            let shadow =
                evapotranspiration::shadow_fraction(&forcing.plants, &forcing.weeds, geometry);
            report.evapotranspiration_l = evapotranspiration::update_evapotranspiration(
                cell,
                weather.et0,
                shadow,
                state.start_health,
                geometry,
            );
        }
        Stage::MicrolifeHealth => {
            microlife::update_microlife_health(cell, state.water_surplus_l, geometry);
        }
        Stage::Leaching => {
            let loss = leaching::update_leaching(
                cell,
                state.water_surplus_l,
                state.start_health,
                geometry,
            );
            report.leached_nutrients_g = loss.nutrients_g;
            report.degraded_contaminants_g = loss.contaminants_g;
        }
    }
}

/// Rejects forcing values that clamping cannot repair (NaN or infinite),
/// including a day's water input that overflows once rain and irrigation are
/// combined.
///
/// Negative finite amounts pass: the stages treat them as zero.
pub fn validate_forcing(
    x: u16,
    y: u16,
    weather: &Weather,
    forcing: &CellForcing,
    geometry: &SoilGeometry,
) -> SoilResult<()> {
    let fail = |reason: String| Err(SoilError::invalid_forcing(x, y, reason));

    if !weather.rain_mm.is_finite() {
        return fail("rain is not finite".into());
    }
    if !weather.et0.is_finite() {
        return fail("reference evaporation is not finite".into());
    }
    if !forcing.irrigation_l.is_finite() {
        return fail("irrigation volume is not finite".into());
    }
    let water_input_l =
        geometry.rain_volume_l(weather.rain_mm.max(0.0)) + forcing.irrigation_l.max(0.0);
    if !water_input_l.is_finite() {
        return fail("combined rain and irrigation volume is not finite".into());
    }
    for (i, fertilizer) in forcing.fertilizers.iter().enumerate() {
        if !fertilizer.nutrients_kg.is_finite() {
            return fail(format!("fertilizer {i} release is not finite"));
        }
    }
    for (i, cide) in forcing.cides.iter().enumerate() {
        if !cide.total_kg.is_finite() || !cide.partition.is_finite() {
            return fail(format!("cide {i} release is not finite"));
        }
    }
    for (i, weed) in forcing.weeds.iter().enumerate() {
        if !demand_is_finite(weed) {
            return fail(format!("weed {i} demand is not finite"));
        }
    }
    for (i, plant) in forcing.plants.iter().enumerate() {
        if !demand_is_finite(plant) {
            return fail(format!("plant {i} demand is not finite"));
        }
    }
    Ok(())
}

fn demand_is_finite(demand: &ResourceDemand) -> bool {
    demand.requirement_g.is_finite()
        && demand.litter_g.is_finite()
        && demand.water_l.is_finite()
        && demand.shadow_m2.is_finite()
}
