//! Simulation and search configuration
//!
//! All physical/geometric constants and search controls live here as plain
//! serde structs; nothing in the physics or search code reaches for globals.
//! Defaults describe a regulation goal on a shortened training pitch with a
//! standard match ball.
//!
//! ## Coordinate system
//!
//! - X: distance from the goal line into the pitch (goal plane at x = 0)
//! - Y: across the pitch, goal center at y = 0, kick corner at y = -width/2
//! - Z: height above the ground
//!
//! The kick is taken from (0, -pitch_width/2, 0).

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KickError, Result};

/// Ball properties
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallConfig {
    /// Ball mass (kg) (default: 0.45)
    pub mass_kg: f64,
    /// Ball radius (m) (default: 0.11)
    pub radius_m: f64,
}

impl BallConfig {
    /// Cross-sectional area (m²)
    pub fn cross_section_m2(&self) -> f64 {
        PI * self.radius_m * self.radius_m
    }

    /// Ball diameter (m)
    pub fn diameter_m(&self) -> f64 {
        2.0 * self.radius_m
    }
}

impl Default for BallConfig {
    fn default() -> Self {
        Self { mass_kg: 0.45, radius_m: 0.11 }
    }
}

/// Aerodynamic environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AeroConfig {
    /// Gravitational acceleration (m/s²) (default: 9.81)
    pub gravity: f64,
    /// Air density (kg/m³) (default: 1.2)
    pub air_density: f64,
    /// Drag coefficient (default: 0.33)
    pub drag_coefficient: f64,
    /// Lift (Magnus) coefficient (default: 0.30)
    pub lift_coefficient: f64,
}

impl Default for AeroConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            air_density: 1.2,
            drag_coefficient: 0.33,
            lift_coefficient: 0.30,
        }
    }
}

/// Pitch and goal geometry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Pitch length in front of the goal (m) (default: 20.0)
    pub length_m: f64,
    /// Pitch width, corner to corner (m) (default: 68.0)
    pub width_m: f64,
    /// Goal width between posts (m) (default: 7.32)
    pub goal_width_m: f64,
    /// Crossbar height (m) (default: 2.44)
    pub goal_height_m: f64,
}

impl PitchConfig {
    /// Y coordinate of a post base. `sign` is -1 for the near (kick-side)
    /// post and +1 for the far post.
    pub fn post_y(&self, sign: f64) -> f64 {
        sign * self.goal_width_m / 2.0
    }

    /// Goal-mouth center, half the goal height up.
    pub fn goal_center(&self) -> (f64, f64, f64) {
        (0.0, 0.0, self.goal_height_m / 2.0)
    }

    /// Kick position: the corner on the negative-Y side of the goal line.
    pub fn corner(&self) -> (f64, f64, f64) {
        (0.0, -self.width_m / 2.0, 0.0)
    }
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            length_m: 20.0,
            width_m: 68.0,
            goal_width_m: 7.32,
            goal_height_m: 2.44,
        }
    }
}

/// Simulator controls shared by every run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub ball: BallConfig,
    pub aero: AeroConfig,
    pub pitch: PitchConfig,
    /// Hard time horizon; a run is cut off here if no event fires (s) (default: 7.0)
    pub max_time_s: f64,
    /// Sample interval and maximum integrator step (s) (default: 0.02)
    pub time_step_s: f64,
    /// Relative tolerance for the adaptive integrator (default: 1e-6)
    pub rel_tolerance: f64,
}

impl SimulationConfig {
    /// Near-post target radius: within two ball diameters of a post base.
    pub fn target_radius_m(&self) -> f64 {
        2.0 * self.ball.diameter_m()
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_time_s > 0.0 && self.max_time_s.is_finite()) {
            return Err(KickError::InvalidConfig("max_time_s must be positive".into()));
        }
        if !(self.time_step_s > 0.0 && self.time_step_s < self.max_time_s) {
            return Err(KickError::InvalidConfig(
                "time_step_s must be positive and below max_time_s".into(),
            ));
        }
        if self.ball.mass_kg <= 0.0 || self.ball.radius_m <= 0.0 {
            return Err(KickError::InvalidConfig("ball mass/radius must be positive".into()));
        }
        if self.pitch.goal_width_m <= 0.0 || self.pitch.goal_height_m <= 0.0 {
            return Err(KickError::InvalidConfig("goal dimensions must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ball: BallConfig::default(),
            aero: AeroConfig::default(),
            pitch: PitchConfig::default(),
            max_time_s: 7.0,
            time_step_s: 0.02,
            rel_tolerance: 1e-6,
        }
    }
}

/// Inclusive (min, max) bounds of one search axis
pub type AxisBounds = (f64, f64);

/// Grid-search controls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Launch speed bounds (m/s) (default: 20-35)
    pub speed_bounds: AxisBounds,
    /// Elevation angle bounds (degrees) (default: 10-30)
    pub elevation_bounds: AxisBounds,
    /// Horizontal angle bounds (degrees) (default: 5-45)
    pub horizontal_bounds: AxisBounds,
    /// Spin rate bounds (rad/s, negative = inswing) (default: -120--70)
    pub spin_bounds: AxisBounds,
    /// Grid points per axis: speed, elevation, horizontal, spin (default: 12 each)
    pub resolution: [usize; 4],
    /// Minimum score gap between two selected trajectories (s) (default: 0.05)
    pub min_score_separation: f64,
    /// How many trajectories to select (default: 3)
    pub result_count: usize,
    /// Score floor for any non-scoring outcome (default: 1000.0)
    pub no_goal_penalty: f64,
    /// Score floor for a goal away from both posts (default: 500.0)
    pub off_post_penalty: f64,
}

impl SearchConfig {
    /// Total number of grid points.
    pub fn grid_len(&self) -> usize {
        self.resolution.iter().product()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, (lo, hi)) in [
            ("speed", self.speed_bounds),
            ("elevation", self.elevation_bounds),
            ("horizontal", self.horizontal_bounds),
            ("spin", self.spin_bounds),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(KickError::InvalidConfig(format!("bad {name} bounds: ({lo}, {hi})")));
            }
        }
        if self.speed_bounds.0 <= 0.0 {
            return Err(KickError::InvalidConfig("speed bounds must be positive".into()));
        }
        if self.resolution.contains(&0) {
            return Err(KickError::InvalidConfig("resolution axes must be >= 1".into()));
        }
        if self.result_count == 0 {
            return Err(KickError::InvalidConfig("result_count must be >= 1".into()));
        }
        // The score tiers only order correctly when the penalty gap exceeds
        // any reachable flight time.
        if self.off_post_penalty <= 0.0 || self.no_goal_penalty <= self.off_post_penalty {
            return Err(KickError::InvalidConfig(
                "penalties must satisfy 0 < off_post < no_goal".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            speed_bounds: (20.0, 35.0),
            elevation_bounds: (10.0, 30.0),
            horizontal_bounds: (5.0, 45.0),
            spin_bounds: (-120.0, -70.0),
            resolution: [12, 12, 12, 12],
            min_score_separation: 0.05,
            result_count: 3,
            no_goal_penalty: 1000.0,
            off_post_penalty: 500.0,
        }
    }
}

/// Top-level config file: both halves, each optional on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load a JSON config file, falling back to defaults for missing sections.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.simulation.validate()?;
        config.search.validate()?;
        Ok(config)
    }
}
