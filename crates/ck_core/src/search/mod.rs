//! Grid search over the 4-dimensional kick parameter space
//!
//! Enumerates the Cartesian product of evenly spaced values on each axis
//! (speed, elevation, horizontal angle, spin rate), scores every point with
//! the trajectory simulator, and hands the scoring candidates to the
//! selection step. Grid points are independent, so the sweep runs on the
//! rayon thread pool; the candidate list is the only thing merged.
//!
//! ## Score tiers
//!
//! - near-post goal: `flight_time` — the actual objective
//! - goal away from the posts: `off_post_penalty + flight_time`
//! - no goal: `no_goal_penalty + min_distance_to_goal`
//!
//! The penalty gap dwarfs the time horizon, so the tiers never interleave.

mod select;

use std::time::Instant;

use rayon::prelude::*;

use crate::config::{AxisBounds, SearchConfig, SimulationConfig};
use crate::error::{KickError, Result};
use crate::kick::{Candidate, KickParameters, SelectedTrajectory, SimulationOutcome};
use crate::physics::Simulator;

pub use select::select_diverse;

/// Evenly spaced values across inclusive bounds; a single-point axis
/// degenerates to the lower bound.
pub fn linspace(bounds: AxisBounds, n: usize) -> Vec<f64> {
    let (lo, hi) = bounds;
    if n <= 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

/// The materialized search grid: one value list per axis.
pub struct Grid {
    speeds: Vec<f64>,
    elevations: Vec<f64>,
    horizontals: Vec<f64>,
    spins: Vec<f64>,
}

impl Grid {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            speeds: linspace(config.speed_bounds, config.resolution[0]),
            elevations: linspace(config.elevation_bounds, config.resolution[1]),
            horizontals: linspace(config.horizontal_bounds, config.resolution[2]),
            spins: linspace(config.spin_bounds, config.resolution[3]),
        }
    }

    pub fn len(&self) -> usize {
        self.speeds.len() * self.elevations.len() * self.horizontals.len() * self.spins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a flat index into kick parameters (spin varies fastest).
    pub fn params_at(&self, index: usize) -> KickParameters {
        let n_spin = self.spins.len();
        let n_horiz = self.horizontals.len();
        let n_elev = self.elevations.len();

        let spin = self.spins[index % n_spin];
        let rest = index / n_spin;
        let horizontal = self.horizontals[rest % n_horiz];
        let rest = rest / n_horiz;
        let elevation = self.elevations[rest % n_elev];
        let speed = self.speeds[rest / n_elev];

        KickParameters::new(speed, elevation, horizontal, spin)
    }
}

/// Collapse an outcome into the tiered minimization score.
pub fn score_outcome(config: &SearchConfig, outcome: &SimulationOutcome) -> f64 {
    if !outcome.scored {
        config.no_goal_penalty + outcome.min_distance_to_goal_m
    } else if !outcome.near_post {
        config.off_post_penalty + outcome.flight_time_s
    } else {
        outcome.flight_time_s
    }
}

/// Sweep the whole grid and keep every goal-scoring point.
///
/// Returned candidates are unordered (the rayon reduction order is not
/// deterministic); callers sort before selection.
fn sweep_goals(simulator: &Simulator, config: &SearchConfig, grid: &Grid) -> Vec<Candidate> {
    (0..grid.len())
        .into_par_iter()
        .filter_map(|index| {
            let params = grid.params_at(index);
            let outcome = match simulator.simulate(&params) {
                Ok(outcome) => outcome,
                Err(err) => {
                    // A bad grid point is local; penalize by omission.
                    log::warn!("skipping grid point {params:?}: {err}");
                    return None;
                }
            };
            let score = score_outcome(config, &outcome);
            (score < config.no_goal_penalty).then_some(Candidate { score, params })
        })
        .collect()
}

/// Run the full search: sweep, rank, diversify, and re-trace the winners.
///
/// Returns `KickError::NoSolution` when not a single grid point scores,
/// even after falling back from near-post goals to any goal.
pub fn search(
    simulation: &SimulationConfig,
    config: &SearchConfig,
) -> Result<Vec<SelectedTrajectory>> {
    simulation.validate()?;
    config.validate()?;

    let simulator = Simulator::new(simulation);
    let grid = Grid::new(config);
    log::info!("sweeping {} grid points", grid.len());
    let started = Instant::now();

    let goals = sweep_goals(&simulator, config, &grid);
    log::info!(
        "sweep finished in {:.2?}: {} scoring points",
        started.elapsed(),
        goals.len()
    );

    // Preferred tier: goals near a post. Fall back to any goal; the sweep
    // already kept those, so no second pass over the grid is needed.
    let mut candidates: Vec<Candidate> =
        goals.iter().copied().filter(|c| c.score < config.off_post_penalty).collect();
    if candidates.is_empty() {
        log::info!("no near-post goals; falling back to all {} goals", goals.len());
        candidates = goals;
    }
    if candidates.is_empty() {
        return Err(KickError::NoSolution);
    }

    candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
    let picked = select_diverse(&candidates, config.min_score_separation, config.result_count);

    // Re-run the winners traced so callers get full trajectories without
    // touching the physics again.
    picked
        .into_iter()
        .map(|candidate| {
            let outcome = simulator.simulate_traced(&candidate.params)?;
            Ok(SelectedTrajectory {
                params: candidate.params,
                outcome,
                score: candidate.score,
            })
        })
        .collect()
}
