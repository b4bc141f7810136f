//! Aerodynamic force model: gravity, quadratic drag, Magnus lift
//!
//! Drag opposes the velocity with magnitude 0.5·ρ·A·Cd·|v|²/m.
//! The Magnus acceleration acts along the normalized `v × ω` direction with
//! magnitude 0.5·ρ·A·Cl·|v|²/m — note the cross product is normalized, so
//! the spin rate sets the deflection *direction*, not its strength. That is
//! the model this simulator is calibrated for; keep it when touching this
//! file (see the spin-direction test below).

use nalgebra::Vector3;

use crate::config::SimulationConfig;

/// Velocities below this are treated as rest; aerodynamic terms vanish
/// instead of dividing by a zero norm.
const REST_SPEED: f64 = 1e-12;

/// Net acceleration on the ball at the given velocity and spin.
pub fn acceleration(
    config: &SimulationConfig,
    velocity: Vector3<f64>,
    spin: Vector3<f64>,
) -> Vector3<f64> {
    let mut accel = Vector3::new(0.0, 0.0, -config.aero.gravity);

    let speed = velocity.norm();
    if speed <= REST_SPEED {
        return accel;
    }

    let dynamic = 0.5 * config.aero.air_density * config.ball.cross_section_m2() * speed * speed
        / config.ball.mass_kg;

    // Drag: anti-parallel to the velocity.
    accel -= velocity * (dynamic * config.aero.drag_coefficient / speed);

    // Magnus: perpendicular to the velocity, toward v × ω.
    let cross = velocity.cross(&spin);
    let cross_norm = cross.norm();
    if cross_norm > REST_SPEED {
        accel += cross * (dynamic * config.aero.lift_coefficient / cross_norm);
    }

    accel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    #[test]
    fn rest_ball_feels_only_gravity() {
        let a = acceleration(&config(), Vector3::zeros(), Vector3::new(0.0, 0.0, -95.0));
        assert_eq!(a.x, 0.0);
        assert_eq!(a.y, 0.0);
        assert!((a.z + 9.81).abs() < 1e-12);
    }

    #[test]
    fn zero_spin_means_zero_magnus() {
        let cfg = config();
        let v = Vector3::new(12.0, 7.0, 3.0);
        let a = acceleration(&cfg, v, Vector3::zeros());

        // With no spin the only non-gravity term is drag, which is
        // anti-parallel to v: the residual must be colinear with v.
        let residual = a - Vector3::new(0.0, 0.0, -cfg.aero.gravity);
        let cross = residual.cross(&v);
        assert!(cross.norm() < 1e-12, "magnus leaked in: {cross:?}");
        assert!(residual.dot(&v) < 0.0, "drag must oppose motion");
    }

    #[test]
    fn drag_magnitude_matches_formula() {
        let cfg = config();
        let v = Vector3::new(27.0, 0.0, 0.0);
        let a = acceleration(&cfg, v, Vector3::zeros());
        let expected = 0.5 * 1.2 * cfg.ball.cross_section_m2() * 27.0 * 27.0 * 0.33 / 0.45;
        assert!((a.x + expected).abs() < 1e-9, "drag accel {} vs {}", a.x, -expected);
    }

    #[test]
    fn magnus_is_perpendicular_to_velocity() {
        let cfg = config();
        let v = Vector3::new(20.0, 10.0, 5.0);
        let spin = Vector3::new(0.0, 0.0, -95.0);
        let with_spin = acceleration(&cfg, v, spin);
        let without = acceleration(&cfg, v, Vector3::zeros());
        let magnus = with_spin - without;
        assert!(magnus.dot(&v).abs() < 1e-9);
        let expected = 0.5 * 1.2 * cfg.ball.cross_section_m2() * v.norm_squared() * 0.30 / 0.45;
        assert!((magnus.norm() - expected).abs() < 1e-9);
    }

    #[test]
    fn spin_magnitude_only_sets_direction() {
        // The normalized cross product makes -70 and -120 rad/s identical.
        let cfg = config();
        let v = Vector3::new(20.0, 10.0, 5.0);
        let a_soft = acceleration(&cfg, v, Vector3::new(0.0, 0.0, -70.0));
        let a_hard = acceleration(&cfg, v, Vector3::new(0.0, 0.0, -120.0));
        assert!((a_soft - a_hard).norm() < 1e-12);

        // Opposite spin flips the Magnus term.
        let a_out = acceleration(&cfg, v, Vector3::new(0.0, 0.0, 95.0));
        let base = acceleration(&cfg, v, Vector3::zeros());
        assert!(((a_soft - base) + (a_out - base)).norm() < 1e-12);
    }

    #[test]
    fn vertical_velocity_parallel_to_spin_has_no_magnus() {
        // v × ω = 0 when the ball moves straight along the spin axis.
        let cfg = config();
        let v = Vector3::new(0.0, 0.0, -4.0);
        let a = acceleration(&cfg, v, Vector3::new(0.0, 0.0, -95.0));
        assert!(a.x.abs() < 1e-12 && a.y.abs() < 1e-12);
    }
}
