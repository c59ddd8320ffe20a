// Engine configuration

use super::EngineError;

/// Class that marks the rendered preview element
pub const DEFAULT_PREVIEW_CLASS: &str = "euiMarkdownFormat";

/// Fixed simulation step (60 steps per simulated second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Tunables for world building, interaction and stepping
///
/// `Default` carries the values the engine was tuned with; the setters
/// allow overriding individual values before `validate()`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Class that marks the preview element whose presence activates the engine
    pub preview_class: String,

    /// Simulated seconds advanced per step
    pub timestep: f32,

    /// Half-extent of the thin side of each boundary wall
    pub wall_thickness: f32,

    /// Mass of every dynamic body
    pub body_mass: f32,

    /// Half depth of every dynamic body (reported only, the solver is planar)
    pub body_half_depth: f32,

    /// Linear velocity damping
    pub linear_damping: f32,

    /// Angular velocity damping
    pub angular_damping: f32,

    /// Bounciness of dynamic bodies (0.0 = none, 1.0 = perfect)
    pub restitution: f32,

    /// Multiplier applied to the pointer-to-body vector on click
    pub impulse_scale: f32,

    /// Vertical correction subtracted before scaling the click impulse
    pub impulse_vertical_offset: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preview_class: DEFAULT_PREVIEW_CLASS.to_string(),
            timestep: FIXED_TIMESTEP,
            wall_thickness: 50.0,
            body_mass: 10.0,
            body_half_depth: 10.0,
            linear_damping: 0.7,
            angular_damping: 0.2,
            restitution: 0.2,
            impulse_scale: 2.0,
            impulse_vertical_offset: 40.0,
        }
    }
}

impl EngineConfig {
    /// Set the preview marker class
    pub fn preview_class(mut self, class: impl Into<String>) -> Self {
        self.preview_class = class.into();
        self
    }

    /// Set the fixed timestep
    pub fn timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the body mass
    pub fn body_mass(mut self, mass: f32) -> Self {
        self.body_mass = mass;
        self
    }

    /// Set linear and angular damping
    pub fn damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Set restitution
    pub fn restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the click impulse scale and vertical offset
    pub fn impulse(mut self, scale: f32, vertical_offset: f32) -> Self {
        self.impulse_scale = scale;
        self.impulse_vertical_offset = vertical_offset;
        self
    }

    /// Set the wall thickness
    pub fn wall_thickness(mut self, thickness: f32) -> Self {
        self.wall_thickness = thickness;
        self
    }

    /// Check that every value can drive a stable simulation
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.preview_class.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "preview class must not be empty".to_string(),
            ));
        }

        let positive = [
            ("timestep", self.timestep),
            ("wall thickness", self.wall_thickness),
            ("body mass", self.body_mass),
            ("impulse scale", self.impulse_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("body half depth", self.body_half_depth),
            ("linear damping", self.linear_damping),
            ("angular damping", self.angular_damping),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(EngineError::InvalidConfig(format!(
                "restitution must be within [0, 1], got {}",
                self.restitution
            )));
        }

        if !self.impulse_vertical_offset.is_finite() {
            return Err(EngineError::InvalidConfig(
                "impulse vertical offset must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
