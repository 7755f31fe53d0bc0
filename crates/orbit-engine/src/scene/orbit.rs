//! Orbit kinematics as pure functions of elapsed time.
//!
//! Angles are computed in f64 from absolute elapsed time; conversion to f32
//! happens only when building transforms.

use std::f64::consts::TAU;

use glam::Vec3;

/// Smallest period the kinematics will divide by, whatever the input says.
pub const MIN_KINEMATIC_PERIOD_MS: i32 = 1;

/// User-adjustable satellite orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Orbit radius in world units, measured from the planet center.
    pub radius: f32,
    /// Milliseconds per revolution. Smaller is faster.
    pub period_ms: i32,
}

impl OrbitParams {
    pub fn new(radius: f32, period_ms: i32) -> Self {
        Self { radius, period_ms }
    }

    /// Move the orbit outward by `step`.
    pub fn widen(&mut self, step: f32) {
        self.radius += step;
    }

    /// Move the orbit inward by `step`, stopping at `min_radius`.
    pub fn narrow(&mut self, step: f32, min_radius: f32) {
        self.radius -= step;
        if self.radius <= min_radius {
            self.radius = min_radius;
        }
    }

    /// Shorten the period by `step`, stopping at `min_period_ms`. A period
    /// already at or below the floor is left alone.
    pub fn speed_up(&mut self, step: i32, min_period_ms: i32) {
        if self.period_ms <= min_period_ms {
            return;
        }
        self.period_ms = self.period_ms.saturating_sub(step).max(min_period_ms);
    }

    /// Lengthen the period by `step`. A non-positive period stays frozen.
    pub fn slow_down(&mut self, step: i32) {
        if self.period_ms <= 0 {
            return;
        }
        self.period_ms = self.period_ms.saturating_add(step);
    }
}

/// Where the satellite is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatellitePose {
    /// Orbit angle in `[0, 2π)`.
    pub angle: f64,
    /// Position in the planet-centered frame (orbit lies in the XZ plane).
    pub position: Vec3,
    /// Yaw about +Y; the negated orbit angle keeps the satellite facing along its path.
    pub heading: f32,
}

/// Fraction of a full turn after `elapsed_ms` for a motion of `period_ms`, in radians.
fn turn_angle(elapsed_ms: f64, period_ms: f64) -> f64 {
    (elapsed_ms.max(0.0) / period_ms * TAU) % TAU
}

/// Planet self-rotation angle in `[0, 2π)`. Applied as a negative yaw.
pub fn planet_angle(elapsed_ms: f64, spin_period_ms: f64) -> f64 {
    turn_angle(elapsed_ms, spin_period_ms)
}

/// Satellite orbit angle in `[0, 2π)`.
/// Periods below [`MIN_KINEMATIC_PERIOD_MS`] are clamped up to it.
pub fn orbit_angle(elapsed_ms: f64, period_ms: i32) -> f64 {
    let period = period_ms.max(MIN_KINEMATIC_PERIOD_MS);
    turn_angle(elapsed_ms, f64::from(period))
}

pub fn satellite_pose(elapsed_ms: f64, orbit: &OrbitParams) -> SatellitePose {
    let angle = orbit_angle(elapsed_ms, orbit.period_ms);
    let r = f64::from(orbit.radius);
    SatellitePose {
        angle,
        position: Vec3::new((r * angle.cos()) as f32, 0.0, (r * angle.sin()) as f32),
        heading: -angle as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn planet_angle_stays_in_range() {
        for i in 0..10_000 {
            let t = i as f64 * 137.3;
            let a = planet_angle(t, 10_000.0);
            assert!((0.0..TAU).contains(&a), "t = {t}, angle = {a}");
        }
    }

    #[test]
    fn planet_turns_once_per_ten_seconds() {
        assert!((planet_angle(2_500.0, 10_000.0) - FRAC_PI_2).abs() < 1e-12);
        assert!(planet_angle(10_000.0, 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn quarter_orbit_scenario() {
        let orbit = OrbitParams::new(15.0, 5000);
        let pose = satellite_pose(1250.0, &orbit);
        assert!((pose.angle - FRAC_PI_2).abs() < 1e-12);
        assert!(pose.position.x.abs() < 1e-5);
        assert_eq!(pose.position.y, 0.0);
        assert!((pose.position.z - 15.0).abs() < 1e-5);
        assert!((pose.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn satellite_stays_on_circle() {
        let orbit = OrbitParams::new(23.7, 3100);
        for i in 0..2_000 {
            let pose = satellite_pose(i as f64 * 41.0, &orbit);
            let r2 = pose.position.x * pose.position.x + pose.position.z * pose.position.z;
            assert!((r2 - 23.7 * 23.7).abs() < 1e-2, "r² = {r2}");
        }
    }

    #[test]
    fn non_positive_period_is_guarded() {
        for period in [0, -100, -5000] {
            let a = orbit_angle(1234.0, period);
            assert!(a.is_finite());
            assert!((0.0..TAU).contains(&a));
        }
    }

    #[test]
    fn narrow_clamps_and_slow_down_freezes_at_zero() {
        let mut orbit = OrbitParams::new(11.05, 0);
        orbit.narrow(0.1, 11.0);
        assert_eq!(orbit.radius, 11.0);

        orbit.slow_down(100);
        assert_eq!(orbit.period_ms, 0);

        orbit.period_ms = 200;
        orbit.speed_up(100, 100);
        orbit.speed_up(100, 100);
        assert_eq!(orbit.period_ms, 100);
    }

    #[test]
    fn speed_up_never_lengthens_a_below_floor_period() {
        let mut orbit = OrbitParams::new(15.0, 0);
        orbit.speed_up(100, 100);
        assert_eq!(orbit.period_ms, 0);

        orbit.period_ms = 40;
        orbit.speed_up(100, 100);
        assert_eq!(orbit.period_ms, 40);

        orbit.period_ms = 150;
        orbit.speed_up(100, 100);
        assert_eq!(orbit.period_ms, 100);
    }
}
