//! Adaptive Dormand-Prince 4(5) integrator
//!
//! Advances the 6-dimensional ball state (position + velocity) with an
//! embedded Runge-Kutta pair: the 5th-order solution propagates, the 4th-order
//! one prices the local error. Step size doubles down or backs off from the
//! weighted RMS error so a several-second arc stays inside the configured
//! relative tolerance without compounding drift.
//!
//! The integrator knows nothing about events or termination; the simulation
//! loop owns accept/reject and inspects the accepted states.

use nalgebra::Vector3;

use crate::kick::BallState;

/// State derivative: d(position)/dt and d(velocity)/dt.
#[derive(Debug, Clone, Copy)]
pub struct Derivative {
    pub dpos: Vector3<f64>,
    pub dvel: Vector3<f64>,
}

/// One attempted step: the 5th-order state and its scaled error estimate.
#[derive(Debug, Clone, Copy)]
pub struct StepAttempt {
    pub state: BallState,
    /// Weighted RMS error; <= 1.0 means the step is acceptable.
    pub error: f64,
}

// Dormand-Prince coefficients (RK45 pair).
const A2: [f64; 1] = [1.0 / 5.0];
const A3: [f64; 2] = [3.0 / 40.0, 9.0 / 40.0];
const A4: [f64; 3] = [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0];
const A5: [f64; 4] = [19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0];
const A6: [f64; 5] = [
    9017.0 / 3168.0,
    -355.0 / 33.0,
    46732.0 / 5247.0,
    49.0 / 176.0,
    -5103.0 / 18656.0,
];
/// 5th-order weights (also the last stage's coefficients: FSAL pair).
const B5: [f64; 6] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];
/// 4th-order (embedded) weights.
const B4: [f64; 7] = [
    5179.0 / 57600.0,
    0.0,
    7571.0 / 16695.0,
    393.0 / 640.0,
    -92097.0 / 339200.0,
    187.0 / 2100.0,
    1.0 / 40.0,
];

const SAFETY: f64 = 0.9;
const MIN_SHRINK: f64 = 0.2;
const MAX_GROW: f64 = 5.0;

pub struct Rk45 {
    rel_tolerance: f64,
    abs_tolerance: f64,
    max_step: f64,
}

impl Rk45 {
    pub fn new(rel_tolerance: f64, max_step: f64) -> Self {
        Self {
            rel_tolerance,
            // Positions are meters and speeds tens of m/s; a fixed small
            // absolute floor keeps the error weights sane near zero crossings.
            abs_tolerance: 1e-9,
            max_step,
        }
    }

    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    /// Attempt a single step of size `h` from `state`.
    pub fn step<F>(&self, deriv: &F, state: &BallState, h: f64) -> StepAttempt
    where
        F: Fn(&BallState) -> Derivative,
    {
        let k1 = deriv(state);
        let k2 = deriv(&offset(state, h, &[(A2[0], &k1)]));
        let k3 = deriv(&offset(state, h, &[(A3[0], &k1), (A3[1], &k2)]));
        let k4 = deriv(&offset(state, h, &[(A4[0], &k1), (A4[1], &k2), (A4[2], &k3)]));
        let k5 = deriv(&offset(
            state,
            h,
            &[(A5[0], &k1), (A5[1], &k2), (A5[2], &k3), (A5[3], &k4)],
        ));
        let k6 = deriv(&offset(
            state,
            h,
            &[(A6[0], &k1), (A6[1], &k2), (A6[2], &k3), (A6[3], &k4), (A6[4], &k5)],
        ));

        let next = offset(
            state,
            h,
            &[
                (B5[0], &k1),
                (B5[2], &k3),
                (B5[3], &k4),
                (B5[4], &k5),
                (B5[5], &k6),
            ],
        );
        let k7 = deriv(&next);

        // Error = (5th-order - 4th-order) combination of the stages.
        let stages = [&k1, &k2, &k3, &k4, &k5, &k6, &k7];
        let mut err_pos = Vector3::zeros();
        let mut err_vel = Vector3::zeros();
        for (i, k) in stages.iter().enumerate() {
            let d = if i < 6 { B5[i] - B4[i] } else { -B4[6] };
            err_pos += k.dpos * (d * h);
            err_vel += k.dvel * (d * h);
        }

        let error = self.weighted_rms(state, &next, &err_pos, &err_vel);
        StepAttempt { state: next, error }
    }

    /// Next step size after an attempt with size `h` and the reported error.
    pub fn next_step_size(&self, h: f64, error: f64) -> f64 {
        let factor = if error > 0.0 {
            (SAFETY * error.powf(-0.2)).clamp(MIN_SHRINK, MAX_GROW)
        } else {
            MAX_GROW
        };
        (h * factor).min(self.max_step)
    }

    fn weighted_rms(
        &self,
        old: &BallState,
        new: &BallState,
        err_pos: &Vector3<f64>,
        err_vel: &Vector3<f64>,
    ) -> f64 {
        let mut sum = 0.0;
        for i in 0..3 {
            let scale = self.abs_tolerance
                + self.rel_tolerance * old.position[i].abs().max(new.position[i].abs());
            sum += (err_pos[i] / scale).powi(2);
            let scale = self.abs_tolerance
                + self.rel_tolerance * old.velocity[i].abs().max(new.velocity[i].abs());
            sum += (err_vel[i] / scale).powi(2);
        }
        (sum / 6.0).sqrt()
    }
}

/// state + h * Σ coeff·k, skipping explicit zero coefficients at call sites.
fn offset(state: &BallState, h: f64, terms: &[(f64, &Derivative)]) -> BallState {
    let mut position = state.position;
    let mut velocity = state.velocity;
    for (coeff, k) in terms {
        position += k.dpos * (coeff * h);
        velocity += k.dvel * (coeff * h);
    }
    BallState { position, velocity }
}
