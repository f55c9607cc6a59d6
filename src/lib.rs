//! Command-line driver for the humus soil engine: run configuration, a
//! seeded synthetic scenario and day summaries.

pub mod config;
pub mod render;
pub mod scenario;

pub mod model {
    pub mod config {
        pub use humus_core::config::*;
    }
    pub mod engine {
        pub use humus_core::engine::*;
    }
    pub mod grid {
        pub use humus_core::grid::*;
    }
    pub mod actions {
        pub use humus_core::actions::*;
    }
    pub mod systems {
        pub use humus_core::systems::*;
    }
    pub mod state {
        pub use humus_data::*;
    }
}
