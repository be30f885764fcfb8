pub mod config;
pub mod grid;
pub mod report;
pub mod world;

pub use config::{SimConfig, SimConfigError, VictimSweep};
pub use grid::{Cell, Ocean, PredatorState, VictimState};
pub use world::{
    IterationRecord, PopulationStats, RunError, RunSummary, StepEvents, World, WorldInitError,
};
