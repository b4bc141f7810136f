//! Kick parameters and simulation outcome types

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{KickError, Result};

/// One candidate kick: the four searched parameters.
///
/// Spin is modeled about the vertical axis only (a sidespin corner); the
/// full 3-vector exists solely to feed the Magnus cross product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickParameters {
    /// Launch speed (m/s)
    pub speed_mps: f64,
    /// Elevation angle above the ground (degrees)
    pub elevation_deg: f64,
    /// Horizontal angle away from the goal line (degrees)
    pub horizontal_deg: f64,
    /// Spin rate about the vertical axis (rad/s, negative swings goalward)
    pub spin_rad_s: f64,
}

impl KickParameters {
    pub fn new(speed_mps: f64, elevation_deg: f64, horizontal_deg: f64, spin_rad_s: f64) -> Self {
        Self { speed_mps, elevation_deg, horizontal_deg, spin_rad_s }
    }

    /// Reject non-physical input before it reaches the integrator.
    pub fn validate(&self) -> Result<()> {
        if !self.speed_mps.is_finite() || self.speed_mps < 0.0 {
            return Err(KickError::InvalidParameters(format!(
                "speed must be finite and non-negative, got {}",
                self.speed_mps
            )));
        }
        if !self.elevation_deg.is_finite()
            || !self.horizontal_deg.is_finite()
            || !self.spin_rad_s.is_finite()
        {
            return Err(KickError::InvalidParameters(
                "angles and spin rate must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Angular velocity vector: vertical component only.
    pub fn spin_vector(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, self.spin_rad_s)
    }

    /// Initial velocity by spherical decomposition: elevation lifts the ball,
    /// the horizontal angle rotates it off the goal line into the pitch.
    pub fn initial_velocity(&self) -> Vector3<f64> {
        let theta = self.elevation_deg.to_radians();
        let phi = self.horizontal_deg.to_radians();
        Vector3::new(
            self.speed_mps * theta.cos() * phi.sin(), // into the pitch
            self.speed_mps * theta.cos() * phi.cos(), // across, toward the far corner
            self.speed_mps * theta.sin(),             // up
        )
    }
}

/// Instantaneous ball state advanced by the integrator.
#[derive(Debug, Clone, Copy)]
pub struct BallState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// One retained trajectory point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub position: Vector3<f64>,
}

/// Result of a single simulation run. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// The ball crossed the goal plane inside the frame.
    pub scored: bool,
    /// Scored within the target radius of a post, on the open side.
    /// Always false when `scored` is false.
    pub near_post: bool,
    /// Time of the terminating event, or the horizon if none fired (s).
    pub flight_time_s: f64,
    /// Minimum distance of any sampled point to the goal-mouth center (m).
    pub min_distance_to_goal_m: f64,
    /// Ordered samples; empty unless the run was traced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<TrajectorySample>,
}

/// A scoring grid point awaiting selection.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// Lower is better; tiered so near-post < off-post goal < no goal.
    pub score: f64,
    pub params: KickParameters,
}

/// Final output unit: a selected kick with its full traced outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedTrajectory {
    pub params: KickParameters,
    pub outcome: SimulationOutcome,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_velocity_decomposition() {
        // 10 m/s straight along the goal line: no elevation, no forward angle.
        let flat = KickParameters::new(10.0, 0.0, 0.0, 0.0);
        let v = flat.initial_velocity();
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 10.0).abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);

        // Straight up.
        let lofted = KickParameters::new(10.0, 90.0, 0.0, 0.0);
        let v = lofted.initial_velocity();
        assert!(v.x.abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
        assert!((v.z - 10.0).abs() < 1e-9);

        // Speed is preserved for any angle pair.
        let angled = KickParameters::new(27.0, 20.0, 25.0, -95.0);
        assert!((angled.initial_velocity().norm() - 27.0).abs() < 1e-9);
    }

    #[test]
    fn spin_vector_is_vertical_only() {
        let params = KickParameters::new(25.0, 15.0, 20.0, -95.0);
        let spin = params.spin_vector();
        assert_eq!(spin.x, 0.0);
        assert_eq!(spin.y, 0.0);
        assert_eq!(spin.z, -95.0);
    }

    #[test]
    fn validate_rejects_bad_input() {
        assert!(KickParameters::new(-1.0, 10.0, 10.0, 0.0).validate().is_err());
        assert!(KickParameters::new(f64::NAN, 10.0, 10.0, 0.0).validate().is_err());
        assert!(KickParameters::new(25.0, f64::NAN, 10.0, 0.0).validate().is_err());
        assert!(KickParameters::new(25.0, 10.0, 10.0, f64::INFINITY).validate().is_err());
        // Zero speed is degenerate but allowed; the simulator must survive it.
        assert!(KickParameters::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());
    }
}
