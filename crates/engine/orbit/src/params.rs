//! Tunable animation and bloom parameters

use serde::{Deserialize, Serialize};

/// Settings owned by the frame driver and edited through the parameter panel
///
/// Setters assign directly. Range limits live on the panel controls
/// ([`ParamField::range`]), not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Angular speed of every orbit, radians per second
    pub rotation_speed: f32,
    /// Luminance above which pixels contribute to bloom
    pub bloom_threshold: f32,
    /// Bloom intensity
    pub bloom_strength: f32,
    /// Bloom spread
    pub bloom_radius: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            rotation_speed: 0.5,
            bloom_threshold: 0.0,
            bloom_strength: 0.3,
            bloom_radius: 0.85,
        }
    }
}

impl AnimationParams {
    pub fn set_rotation_speed(&mut self, value: f32) {
        self.rotation_speed = value;
    }

    pub fn set_bloom_threshold(&mut self, value: f32) {
        self.bloom_threshold = value;
    }

    pub fn set_bloom_strength(&mut self, value: f32) {
        self.bloom_strength = value;
    }

    pub fn set_bloom_radius(&mut self, value: f32) {
        self.bloom_radius = value;
    }

    /// Read a field by name
    pub fn get(&self, field: ParamField) -> f32 {
        match field {
            ParamField::RotationSpeed => self.rotation_speed,
            ParamField::BloomThreshold => self.bloom_threshold,
            ParamField::BloomStrength => self.bloom_strength,
            ParamField::BloomRadius => self.bloom_radius,
        }
    }

    /// Write a field by name through its typed setter
    pub fn set(&mut self, field: ParamField, value: f32) {
        match field {
            ParamField::RotationSpeed => self.set_rotation_speed(value),
            ParamField::BloomThreshold => self.set_bloom_threshold(value),
            ParamField::BloomStrength => self.set_bloom_strength(value),
            ParamField::BloomRadius => self.set_bloom_radius(value),
        }
    }

    pub fn apply(&mut self, change: ParamChange) {
        self.set(change.field, change.value);
    }
}

/// Inclusive slider range with a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Where a change to a field has to be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Only the parameter record; readers pull it every frame
    Record,
    /// The record and the live bloom pass
    Pipeline,
}

/// One field of [`AnimationParams`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    RotationSpeed,
    BloomThreshold,
    BloomStrength,
    BloomRadius,
}

impl ParamField {
    pub const ALL: [ParamField; 4] = [
        ParamField::RotationSpeed,
        ParamField::BloomThreshold,
        ParamField::BloomStrength,
        ParamField::BloomRadius,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParamField::RotationSpeed => "Rotation Speed",
            ParamField::BloomThreshold => "Threshold",
            ParamField::BloomStrength => "Strength",
            ParamField::BloomRadius => "Radius",
        }
    }

    pub fn range(self) -> ParamRange {
        match self {
            ParamField::RotationSpeed => ParamRange::new(0.0, 2.0, 0.01),
            ParamField::BloomThreshold => ParamRange::new(0.0, 1.0, 0.01),
            ParamField::BloomStrength => ParamRange::new(0.0, 3.0, 0.01),
            ParamField::BloomRadius => ParamRange::new(0.0, 1.0, 0.01),
        }
    }

    pub fn binding(self) -> Binding {
        match self {
            ParamField::RotationSpeed => Binding::Record,
            _ => Binding::Pipeline,
        }
    }
}

/// A "parameter changed" message sent from the panel to the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub field: ParamField,
    pub value: f32,
}

impl ParamChange {
    pub fn new(field: ParamField, value: f32) -> Self {
        Self { field, value }
    }
}
