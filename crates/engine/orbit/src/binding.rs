//! Delivery of parameter changes to the record and the bloom pass

use crate::host::BloomPass;
use crate::params::{AnimationParams, Binding, ParamChange, ParamField};

/// Apply one change: always to `params`, and to `bloom` for pipeline-bound fields.
///
/// Values are assigned as-is; the panel control already limits the range.
pub fn apply_change<B: BloomPass + ?Sized>(
    change: ParamChange,
    params: &mut AnimationParams,
    bloom: &mut B,
) {
    params.apply(change);

    if change.field.binding() == Binding::Pipeline {
        match change.field {
            ParamField::BloomThreshold => bloom.set_threshold(change.value),
            ParamField::BloomStrength => bloom.set_strength(change.value),
            ParamField::BloomRadius => bloom.set_radius(change.value),
            ParamField::RotationSpeed => {}
        }
    }

    tracing::debug!("Applied {:?} = {}", change.field, change.value);
}

/// Copy every pipeline-bound field from `params` onto the pass
pub fn sync_bloom<B: BloomPass + ?Sized>(params: &AnimationParams, bloom: &mut B) {
    bloom.set_threshold(params.bloom_threshold);
    bloom.set_strength(params.bloom_strength);
    bloom.set_radius(params.bloom_radius);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Bloom pass that records the raw values it was given
    #[derive(Debug, Default, Clone, PartialEq)]
    pub(crate) struct FakeBloom {
        pub threshold: f32,
        pub strength: f32,
        pub radius: f32,
        pub writes: usize,
    }

    impl BloomPass for FakeBloom {
        fn threshold(&self) -> f32 {
            self.threshold
        }
        fn set_threshold(&mut self, value: f32) {
            self.threshold = value;
            self.writes += 1;
        }
        fn strength(&self) -> f32 {
            self.strength
        }
        fn set_strength(&mut self, value: f32) {
            self.strength = value;
            self.writes += 1;
        }
        fn radius(&self) -> f32 {
            self.radius
        }
        fn set_radius(&mut self, value: f32) {
            self.radius = value;
            self.writes += 1;
        }
    }

    #[test]
    fn test_bloom_fields_written_verbatim() {
        let mut params = AnimationParams::default();
        let mut bloom = FakeBloom::default();

        for (field, value) in [
            (ParamField::BloomThreshold, 0.73),
            (ParamField::BloomStrength, 2.41),
            (ParamField::BloomRadius, 0.07),
        ] {
            apply_change(ParamChange::new(field, value), &mut params, &mut bloom);
        }

        assert_eq!(bloom.threshold(), 0.73);
        assert_eq!(bloom.strength(), 2.41);
        assert_eq!(bloom.radius(), 0.07);
        assert_eq!(params.bloom_threshold, 0.73);
        assert_eq!(params.bloom_strength, 2.41);
        assert_eq!(params.bloom_radius, 0.07);
    }

    #[test]
    fn test_rotation_speed_only_touches_record() {
        let mut params = AnimationParams::default();
        let mut bloom = FakeBloom::default();

        apply_change(
            ParamChange::new(ParamField::RotationSpeed, 1.75),
            &mut params,
            &mut bloom,
        );

        assert_eq!(params.rotation_speed, 1.75);
        assert_eq!(bloom.writes, 0);
    }

    #[test]
    fn test_sync_bloom_copies_all_fields() {
        let params = AnimationParams {
            rotation_speed: 0.0,
            bloom_threshold: 0.2,
            bloom_strength: 1.1,
            bloom_radius: 0.6,
        };
        let mut bloom = FakeBloom::default();
        sync_bloom(&params, &mut bloom);
        assert_eq!((bloom.threshold, bloom.strength, bloom.radius), (0.2, 1.1, 0.6));
    }
}
