//! # ck_core - Corner-kick trajectory simulation and search
//!
//! Deterministic physics core for finding corner kicks that score near a
//! goalpost in minimum flight time:
//!
//! - ball flight under gravity, quadratic drag, and Magnus lift, advanced by
//!   an adaptive Dormand-Prince 4(5) integrator with event termination
//!   (ground contact / goal-line crossing);
//! - brute-force grid search over (speed, elevation, horizontal angle, spin)
//!   with tiered scoring and diversified top-k selection, parallelized with
//!   rayon.
//!
//! Everything is driven by explicit [`config`] values; there is no global
//! state, and the same inputs always produce the same outputs. Presentation
//! concerns (CSV files, plots, CLI) live outside this crate and consume
//! [`SelectedTrajectory`] / [`GoalRecord`] values.

pub mod config;
pub mod error;
pub mod export;
pub mod kick;
pub mod physics;
pub mod search;

pub use config::{
    AeroConfig, BallConfig, Config, PitchConfig, SearchConfig, SimulationConfig,
};
pub use error::{KickError, Result};
pub use export::{collect_goal_records, GoalRecord};
pub use kick::{
    BallState, Candidate, KickParameters, SelectedTrajectory, SimulationOutcome, TrajectorySample,
};
pub use physics::Simulator;
pub use search::{search, select_diverse};
