//! Core configuration

pub mod config;

pub use config::{PlannerConfig, ScoringWeights};
