//! Corner-kick trajectory simulation
//!
//! Integrates one kick forward from the corner until the ball lands, crosses
//! the goal plane inside the frame, or runs out the time horizon. Events are
//! pure predicates tested against each accepted integrator step, with the
//! exact crossing recovered by linear interpolation inside the step — no
//! stateful event callbacks, no equality-to-zero tests.

use nalgebra::Vector3;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::kick::{BallState, KickParameters, SimulationOutcome, TrajectorySample};
use crate::physics::forces;
use crate::physics::integrator::{Derivative, Rk45};

/// Below this step size the step is accepted regardless of the error
/// estimate; a pathological derivative must not stall the run.
const MIN_STEP: f64 = 1e-10;

/// What fired first inside an accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    /// Ball crossed z = 0 from above.
    Ground,
    /// Ball crossed the goal plane inside the frame.
    Goal,
}

pub struct Simulator {
    config: SimulationConfig,
    goal_center: Vector3<f64>,
}

impl Simulator {
    pub fn new(config: &SimulationConfig) -> Self {
        let (gx, gy, gz) = config.pitch.goal_center();
        Self {
            config: *config,
            goal_center: Vector3::new(gx, gy, gz),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate one kick; trajectory samples are discarded.
    pub fn simulate(&self, params: &KickParameters) -> Result<SimulationOutcome> {
        self.run(params, false)
    }

    /// Simulate one kick and retain the full (time, position) sample sequence.
    pub fn simulate_traced(&self, params: &KickParameters) -> Result<SimulationOutcome> {
        self.run(params, true)
    }

    fn run(&self, params: &KickParameters, keep_samples: bool) -> Result<SimulationOutcome> {
        params.validate()?;

        let (cx, cy, cz) = self.config.pitch.corner();
        let mut state = BallState {
            position: Vector3::new(cx, cy, cz),
            velocity: params.initial_velocity(),
        };
        let spin = params.spin_vector();
        let config = self.config;
        let deriv = move |s: &BallState| Derivative {
            dpos: s.velocity,
            dvel: forces::acceleration(&config, s.velocity, spin),
        };

        let rk = Rk45::new(self.config.rel_tolerance, self.config.time_step_s);
        let mut t = 0.0;
        let mut h = self.config.time_step_s;
        let mut min_distance = (state.position - self.goal_center).norm();
        let mut samples = Vec::new();
        if keep_samples {
            samples.push(TrajectorySample { time_s: 0.0, position: state.position });
        }

        let mut scored = false;
        let mut near_post = false;
        let mut flight_time = self.config.max_time_s;

        while t < self.config.max_time_s {
            let h_try = h.min(self.config.max_time_s - t);
            let attempt = rk.step(&deriv, &state, h_try);
            if attempt.error > 1.0 && h_try > MIN_STEP {
                h = rk.next_step_size(h_try, attempt.error);
                continue;
            }

            let new = attempt.state;
            if let Some((frac, event)) = self.first_event(&state, &new) {
                let hit = lerp(&state, &new, frac);
                flight_time = t + frac * h_try;
                min_distance = min_distance.min((hit.position - self.goal_center).norm());
                if keep_samples {
                    samples.push(TrajectorySample { time_s: flight_time, position: hit.position });
                }
                if event == Event::Goal {
                    scored = true;
                    near_post = self.is_near_post(&hit.position);
                }
                break;
            }

            t += h_try;
            state = new;
            min_distance = min_distance.min((state.position - self.goal_center).norm());
            if keep_samples {
                samples.push(TrajectorySample { time_s: t, position: state.position });
            }
            h = rk.next_step_size(h_try, attempt.error);
        }

        Ok(SimulationOutcome {
            scored,
            near_post,
            flight_time_s: flight_time,
            min_distance_to_goal_m: min_distance,
            samples,
        })
    }

    /// Test both event predicates over the (prev, new) step; return the
    /// earliest as a fraction of the step, if any fired.
    fn first_event(&self, prev: &BallState, new: &BallState) -> Option<(f64, Event)> {
        let mut first: Option<(f64, Event)> = None;

        // Ground: downward crossing of z = 0. Launch at z = 0 while
        // ascending never triggers because the next sample is above ground.
        if prev.position.z >= 0.0 && new.position.z < 0.0 {
            let frac = prev.position.z / (prev.position.z - new.position.z);
            first = Some((frac, Event::Ground));
        }

        // Goal plane: the kick starts on the plane with forward velocity, so
        // only a return crossing from the positive side counts.
        if prev.position.x > 0.0 && new.position.x <= 0.0 {
            let frac = prev.position.x / (prev.position.x - new.position.x);
            let hit = lerp(prev, new, frac);
            if self.in_goal_mouth(&hit.position) {
                match first {
                    Some((f, _)) if f <= frac => {}
                    _ => first = Some((frac, Event::Goal)),
                }
            }
        }

        first
    }

    fn in_goal_mouth(&self, p: &Vector3<f64>) -> bool {
        p.y.abs() < self.config.pitch.goal_width_m / 2.0
            && p.z > 0.0
            && p.z < self.config.pitch.goal_height_m
    }

    /// Near-post: within the target radius of either post base, on the
    /// goal-center side of that post. The inside test is `sign * (post_y -
    /// crossing_y) > 0`, i.e. the crossing sits between the post and the
    /// center of the goal.
    fn is_near_post(&self, crossing: &Vector3<f64>) -> bool {
        let radius = self.config.target_radius_m();
        [-1.0, 1.0].into_iter().any(|sign| {
            let post = Vector3::new(0.0, self.config.pitch.post_y(sign), 0.0);
            let inside = sign * (post.y - crossing.y) > 0.0;
            (crossing - post).norm() <= radius && inside
        })
    }
}

fn lerp(a: &BallState, b: &BallState, frac: f64) -> BallState {
    BallState {
        position: a.position + (b.position - a.position) * frac,
        velocity: a.velocity + (b.velocity - a.velocity) * frac,
    }
}
