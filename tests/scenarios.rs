mod common;
use common::{demand, GridBuilder};
use humus_data::{ContaminantPools, FertilizerRelease, NutrientPools, Weather};

#[test]
fn test_saturated_cell_spills_rain_as_surplus() {
    let mut grid = GridBuilder::new().closed_system().build();
    let capacity = grid.geometry().field_capacity_l;
    assert_eq!(grid.cells()[0].water_l, capacity);

    let forcing = grid.new_forcing(Weather::new(30.0, 0.0));
    let report = grid.step(&forcing).unwrap();

    assert_close!(report.cells[0].water_surplus_l, 30.0);
    assert_close!(grid.cells()[0].water_l, capacity);
    assert_eq!(report.leaching_events(), 1);
}

#[test]
fn test_partial_fill_produces_no_surplus() {
    let mut grid = GridBuilder::new().closed_system().with_water(200.0).build();
    let forcing = grid.new_forcing(Weather::new(30.0, 0.0));
    let report = grid.step(&forcing).unwrap();

    assert_eq!(report.cells[0].water_surplus_l, 0.0);
    assert_close!(grid.cells()[0].water_l, 230.0);
}

#[test]
fn test_dead_community_releases_nothing_from_bedrock() {
    let mut grid = GridBuilder::new().with_health(0.0).build();
    let before = grid.cells()[0].nutrients;

    let forcing = grid.new_forcing(Weather::dry());
    let report = grid.step(&forcing).unwrap();

    assert_eq!(report.cells[0].nutrient_input_g, NutrientPools::ZERO);
    assert_eq!(grid.cells()[0].nutrients, before);
}

#[test]
fn test_healthy_community_weathers_bedrock() {
    let mut grid = GridBuilder::new().build();
    let forcing = grid.new_forcing(Weather::dry());
    let report = grid.step(&forcing).unwrap();

    // 200 mg N per day at full health
    assert_close!(report.cells[0].nutrient_input_g.n, 0.2);
    assert_close!(report.cells[0].nutrient_input_g.c, 0.4);
}

#[test]
fn test_fertilizer_adds_release_in_grams() {
    let mut grid = GridBuilder::new().closed_system().build();
    let before = grid.cells()[0].nutrients.n;

    let mut forcing = grid.new_forcing(Weather::dry());
    forcing.cells[0].fertilizers.push(FertilizerRelease {
        nutrients_kg: NutrientPools::new(0.01, 0.0, 0.0, 0.0),
    });
    grid.step(&forcing).unwrap();

    assert_close!(grid.cells()[0].nutrients.n - before, 10.0, 1e-6);
}

#[test]
fn test_no_surplus_means_no_leaching() {
    let mut grid = GridBuilder::new()
        .with_water(100.0)
        .with_health(20.0)
        .with_cells(|cell| cell.contaminants = ContaminantPools::splat(5.0))
        .build();

    let forcing = grid.new_forcing(Weather::new(10.0, 0.0));
    let report = grid.step(&forcing).unwrap();

    assert_eq!(report.cells[0].leached_nutrients_g, NutrientPools::ZERO);
    assert_eq!(report.cells[0].degraded_contaminants_g, ContaminantPools::ZERO);
    assert_eq!(grid.cells()[0].contaminants, ContaminantPools::splat(5.0));
}

#[test]
fn test_plant_cannot_drain_below_wilting_point() {
    let mut grid = GridBuilder::new().closed_system().with_water(75.0).build();
    let wilting = grid.geometry().wilting_point_l;

    let mut forcing = grid.new_forcing(Weather::dry());
    forcing.cells[0].plants.push(demand(0.0, 5.0));
    let report = grid.step(&forcing).unwrap();

    let feedback = &report.cells[0].plant_feedback[0];
    assert_eq!(feedback.water_uptake_l, 0.0);
    assert_close!(feedback.water_stress_l, 5.0);
    assert_close!(grid.cells()[0].water_l, wilting);
}

#[test]
fn test_closed_quiet_cell_is_stationary() {
    let mut grid = GridBuilder::new().closed_system().with_water(180.0).build();
    let initial = grid.cells()[0].clone();
    let forcing = grid.new_forcing(Weather::dry());

    for _ in 0..10 {
        let report = grid.step(&forcing).unwrap();
        assert_eq!(report.cells[0].evapotranspiration_l, 0.0);
    }

    assert_eq!(grid.cells()[0], initial);
    assert_eq!(grid.day(), 10);
}

#[test]
fn test_unmet_demand_reported_as_stress() {
    let mut grid = GridBuilder::new().closed_system().with_health(50.0).build();
    let mut forcing = grid.new_forcing(Weather::dry());
    forcing.cells[0].plants.push(demand(10.0, 1.0));
    let report = grid.step(&forcing).unwrap();

    let feedback = &report.cells[0].plant_feedback[0];
    assert_close!(feedback.nutrient_uptake_g.n, 5.0);
    assert_close!(feedback.nutrient_stress_g.n, 5.0);
    assert_close!(feedback.water_uptake_l, 1.0);
}

#[test]
fn test_waterlogging_and_toxicity_erode_health_over_days() {
    let mut grid = GridBuilder::new()
        .with_cells(|cell| cell.contaminants.soil = 20.0)
        .build();
    let forcing = grid.new_forcing(Weather::new(40.0, 3.0));

    let mut last = grid.cells()[0].microlife_health;
    for _ in 0..5 {
        grid.step(&forcing).unwrap();
        let health = grid.cells()[0].microlife_health;
        assert!(health < last, "health {health} did not fall below {last}");
        last = health;
    }
}
