//! Bulk goal-distribution sweep
//!
//! Produces one flat record per goal-scoring grid point: the kick parameters
//! plus where the ball crossed the goal plane. Downstream tooling turns the
//! rows into CSV / distribution plots; there is no file I/O here.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{SearchConfig, SimulationConfig};
use crate::error::Result;
use crate::physics::Simulator;
use crate::search::Grid;

/// One goal-scoring grid point, ready for tabular export.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalRecord {
    pub speed_mps: f64,
    pub elevation_deg: f64,
    pub horizontal_deg: f64,
    pub spin_rad_s: f64,
    /// Lateral crossing position on the goal plane (m, goal center = 0).
    pub y_pos: f64,
    /// Crossing height (m).
    pub z_pos: f64,
    pub is_near_post: bool,
    pub flight_time_s: f64,
}

/// Sweep the configured grid and keep a record for every scored point.
///
/// Scored points are re-simulated traced to recover the crossing position;
/// goals are rare relative to the grid, so the double work is negligible.
pub fn collect_goal_records(
    simulation: &SimulationConfig,
    config: &SearchConfig,
) -> Result<Vec<GoalRecord>> {
    simulation.validate()?;
    config.validate()?;

    let simulator = Simulator::new(simulation);
    let grid = Grid::new(config);
    log::info!("goal sweep over {} grid points", grid.len());

    let mut records: Vec<GoalRecord> = (0..grid.len())
        .into_par_iter()
        .filter_map(|index| {
            let params = grid.params_at(index);
            let outcome = simulator.simulate(&params).ok()?;
            if !outcome.scored {
                return None;
            }
            let traced = simulator.simulate_traced(&params).ok()?;
            let hit = traced.samples.last()?.position;
            Some(GoalRecord {
                speed_mps: params.speed_mps,
                elevation_deg: params.elevation_deg,
                horizontal_deg: params.horizontal_deg,
                spin_rad_s: params.spin_rad_s,
                y_pos: hit.y,
                z_pos: hit.z,
                is_near_post: outcome.near_post,
                flight_time_s: outcome.flight_time_s,
            })
        })
        .collect();

    // par_iter collection order is stable for indexed ranges, but sort by
    // flight time anyway so the export reads fastest-first.
    records.sort_by(|a, b| a.flight_time_s.total_cmp(&b.flight_time_s));
    Ok(records)
}
