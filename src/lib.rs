pub mod brain;
pub mod config;
pub mod organism;
pub mod simulation;
pub mod stats;
pub mod world;
