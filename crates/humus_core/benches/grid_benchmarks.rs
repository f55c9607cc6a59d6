use criterion::{black_box, criterion_group, criterion_main, Criterion};
use humus_core::config::{AppConfig, FieldConfig};
use humus_core::engine::step_cell;
use humus_core::geometry::SoilGeometry;
use humus_core::grid::SoilGrid;
use humus_data::{CellForcing, NutrientPools, ResourceDemand, SoilCell, Weather};

fn crop() -> ResourceDemand {
    ResourceDemand {
        requirement_g: NutrientPools::new(4.0, 1.0, 3.0, 8.0),
        water_l: 3.0,
        litter_g: NutrientPools::splat(0.5),
        shadow_m2: 0.4,
    }
}

fn bench_step_cell(c: &mut Criterion) {
    let config = AppConfig::default();
    let geometry = SoilGeometry::from_config(&config).unwrap();
    let forcing = CellForcing {
        plants: vec![crop(); 4],
        weeds: vec![crop()],
        ..Default::default()
    };
    let weather = Weather::new(12.0, 4.0);

    c.bench_function("step_cell_4_plants", |b| {
        let mut cell = SoilCell::new(0, 0);
        cell.water_l = 200.0;
        cell.nutrients = NutrientPools::splat(5000.0);
        b.iter(|| black_box(step_cell(&mut cell, &weather, &forcing, &geometry)))
    });
}

fn bench_grid_step(c: &mut Criterion) {
    let config = AppConfig {
        field: FieldConfig {
            width: 100,
            height: 100,
            plot_surface_m2: 1.0,
        },
        ..Default::default()
    };
    let mut grid = SoilGrid::new(config).unwrap();
    let mut forcing = grid.new_forcing(Weather::new(20.0, 4.0));
    for cell in &mut forcing.cells {
        cell.plants.push(crop());
    }

    c.bench_function("grid_step_100x100", |b| {
        b.iter(|| black_box(grid.step(&forcing).unwrap().leaching_events()))
    });
}

criterion_group!(benches, bench_step_cell, bench_grid_step);
criterion_main!(benches);
