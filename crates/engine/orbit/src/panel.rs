//! Parameter panel model
//!
//! The panel owns its own copy of the values it displays. Editing a control
//! updates that copy and sends a [`ParamChange`] to the frame driver; nothing
//! flows back from the driver or the pipeline.
//!
//! Edits the channel cannot take yet stay queued in the panel, one per field
//! (latest value wins), until [`ParamPanel::flush`] gets them through.

use crate::channel::ParamSender;
use crate::error::Result;
use crate::params::{AnimationParams, Binding, ParamChange, ParamField};

/// One slider bound to a parameter field
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub field: ParamField,
    pub label: String,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub binding: Binding,
}

impl ControlSpec {
    /// Control using the field's default label, range and binding
    pub fn for_field(field: ParamField) -> Self {
        let range = field.range();
        Self {
            field,
            label: field.label().to_string(),
            min: range.min,
            max: range.max,
            step: range.step,
            binding: field.binding(),
        }
    }

    pub fn with_range(mut self, min: f32, max: f32, step: f32) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }
}

/// Named, ordered set of controls
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGroup {
    pub name: String,
    pub controls: Vec<ControlSpec>,
}

/// Controls grouped by name plus the values they edit
#[derive(Debug, Clone)]
pub struct ParamPanel {
    title: String,
    groups: Vec<ControlGroup>,
    values: AnimationParams,
    sender: ParamSender,
    /// Edits not yet accepted by the channel, in edit order
    pending: Vec<ParamChange>,
}

impl ParamPanel {
    pub fn new(title: impl Into<String>, values: AnimationParams, sender: ParamSender) -> Self {
        Self {
            title: title.into(),
            groups: Vec::new(),
            values,
            sender,
            pending: Vec::new(),
        }
    }

    /// The demo layout: an "Animation" group and a "Bloom" group
    pub fn standard(values: AnimationParams, sender: ParamSender) -> Self {
        let mut panel = Self::new("Controls", values, sender);
        panel.register("Animation", ControlSpec::for_field(ParamField::RotationSpeed));
        panel.register("Bloom", ControlSpec::for_field(ParamField::BloomThreshold));
        panel.register("Bloom", ControlSpec::for_field(ParamField::BloomStrength));
        panel.register("Bloom", ControlSpec::for_field(ParamField::BloomRadius));
        panel
    }

    /// Append a control to `group`, creating the group after existing ones
    pub fn register(&mut self, group: &str, spec: ControlSpec) {
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.controls.push(spec),
            None => self.groups.push(ControlGroup {
                name: group.to_string(),
                controls: vec![spec],
            }),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn groups(&self) -> &[ControlGroup] {
        &self.groups
    }

    pub fn value(&self, field: ParamField) -> f32 {
        self.values.get(field)
    }

    pub fn values(&self) -> &AnimationParams {
        &self.values
    }

    /// Record an edit and forward it to the driver
    ///
    /// The local value is updated even when the channel is full, so the
    /// slider does not snap back. The edit stays pending and goes out with
    /// the next [`flush`](Self::flush); the error is returned for logging.
    pub fn set(&mut self, field: ParamField, value: f32) -> Result<()> {
        self.values.set(field, value);
        let change = ParamChange::new(field, value);
        match self.pending.iter_mut().find(|c| c.field == field) {
            Some(queued) => *queued = change,
            None => self.pending.push(change),
        }
        self.flush()
    }

    /// Send pending edits until the channel refuses one
    pub fn flush(&mut self) -> Result<()> {
        while let Some(&change) = self.pending.first() {
            self.sender.send(change)?;
            self.pending.remove(0);
        }
        Ok(())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
