//! Scenario files and their execution

pub mod config;
pub mod player;

pub use config::{Scenario, ScenarioStep};
pub use player::ScenarioPlayer;
