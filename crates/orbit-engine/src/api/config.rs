use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable constants for the scene, provided by the host page as JSON.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Radius of the planet sphere in world units.
    pub planet_radius: f32,
    /// Minimum gap between the planet surface and the orbit (half the satellite body).
    pub orbit_clearance: f32,
    /// Initial orbit radius above the planet radius.
    pub initial_orbit_offset: f32,
    /// Initial time for one full satellite revolution, in milliseconds.
    pub initial_period_ms: i32,
    /// Radius change per frame while an arrow key is held.
    pub radius_step: f32,
    /// Period change per frame while an arrow key is held.
    pub period_step_ms: i32,
    /// Floor for the orbit period; also the divisor guard in kinematics.
    pub min_period_ms: i32,
    /// Time for one full planet self-rotation, in milliseconds.
    pub planet_spin_period_ms: f64,
    /// Pointer pixels per radian of camera rotation.
    pub rotate_divisor: f32,
    /// Pointer pixels per world unit of drag panning.
    pub drag_pan_divisor: f32,
    /// Wheel detail units per world unit of panning.
    pub wheel_divisor: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the initial eye position from the planet center along +Z.
    pub eye_distance: f32,
    pub sphere_lat_bands: u16,
    pub sphere_long_bands: u16,
    /// The dish draws `1 / dish_index_ratio` of the sphere's indices.
    pub dish_index_ratio: f32,
    /// Maximum number of input events buffered between two frames.
    pub input_queue_capacity: usize,
    /// Image wrapped around the planet sphere.
    pub planet_texture_url: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            planet_radius: 10.0,
            orbit_clearance: 1.0,
            initial_orbit_offset: 5.0,
            initial_period_ms: 5000,
            radius_step: 0.1,
            period_step_ms: 100,
            min_period_ms: 100,
            planet_spin_period_ms: 10_000.0,
            rotate_divisor: 50.0,
            drag_pan_divisor: 10.0,
            wheel_divisor: 3.0,
            fov_degrees: 60.0,
            near: 1.0,
            far: 150.0,
            eye_distance: 45.0,
            sphere_lat_bands: 25,
            sphere_long_bands: 25,
            dish_index_ratio: 8.7,
            input_queue_capacity: 256,
            planet_texture_url: "texs/earth.jpg".to_owned(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Smallest orbit radius the satellite may be moved to.
    pub fn min_orbit_radius(&self) -> f32 {
        self.planet_radius + self.orbit_clearance
    }

    pub fn initial_orbit_radius(&self) -> f32 {
        self.planet_radius + self.initial_orbit_offset
    }

    /// Reject values that would make the scene degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("planet_radius", self.planet_radius),
            ("radius_step", self.radius_step),
            ("rotate_divisor", self.rotate_divisor),
            ("drag_pan_divisor", self.drag_pan_divisor),
            ("wheel_divisor", self.wheel_divisor),
            ("fov_degrees", self.fov_degrees),
            ("near", self.near),
            ("eye_distance", self.eye_distance),
            ("dish_index_ratio", self.dish_index_ratio),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.orbit_clearance < 0.0 {
            return Err(ConfigError::Invalid("orbit_clearance must not be negative".into()));
        }
        if self.initial_orbit_offset < self.orbit_clearance {
            return Err(ConfigError::Invalid(
                "initial_orbit_offset must be at least orbit_clearance".into(),
            ));
        }
        if self.far <= self.near {
            return Err(ConfigError::Invalid("far must be greater than near".into()));
        }
        if !(self.planet_spin_period_ms > 0.0) {
            return Err(ConfigError::Invalid("planet_spin_period_ms must be positive".into()));
        }
        if self.min_period_ms <= 0 || self.period_step_ms <= 0 {
            return Err(ConfigError::Invalid(
                "min_period_ms and period_step_ms must be positive".into(),
            ));
        }
        if self.initial_period_ms < self.min_period_ms {
            return Err(ConfigError::Invalid(format!(
                "initial_period_ms {} is below min_period_ms {}",
                self.initial_period_ms, self.min_period_ms
            )));
        }
        if self.sphere_lat_bands < 2 || self.sphere_long_bands < 3 {
            return Err(ConfigError::Invalid("sphere needs at least 2x3 bands".into()));
        }
        // u16 index buffer
        let vertices = (self.sphere_lat_bands as u32 + 1) * (self.sphere_long_bands as u32 + 1);
        if vertices > u16::MAX as u32 + 1 {
            return Err(ConfigError::Invalid(format!(
                "sphere has {vertices} vertices, more than a u16 index buffer can address"
            )));
        }
        if self.input_queue_capacity == 0 {
            return Err(ConfigError::Invalid("input_queue_capacity must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.initial_orbit_radius(), 15.0);
        assert_eq!(config.min_orbit_radius(), 11.0);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = SceneConfig::from_json(r#"{ "planet_radius": 4.0, "initial_period_ms": 8000 }"#).unwrap();
        assert_eq!(config.planet_radius, 4.0);
        assert_eq!(config.initial_period_ms, 8000);
        assert_eq!(config.period_step_ms, 100);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SceneConfig::from_json("{ planet_radius: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = SceneConfig::from_json(r#"{ "near": 10.0, "far": 5.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SceneConfig::from_json(r#"{ "min_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SceneConfig::from_json(r#"{ "sphere_lat_bands": 300, "sphere_long_bands": 300 }"#).unwrap_err();
        assert!(err.to_string().contains("u16"));
    }
}
