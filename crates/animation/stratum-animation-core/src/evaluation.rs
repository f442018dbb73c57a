//! Single-layer evaluation.
//!
//! `evaluate_layer` walks a layer's strips from last to first. Every keyframe
//! strip whose interval contains the evaluation time contributes the curves it
//! has for the requested output, but only for properties that no later strip
//! already supplied. Influence and mixing with other layers are not applied
//! here; the result is meant to feed a later mixing stage or be applied as-is.

use hashbrown::{Equivalent, HashMap};
use serde::{Deserialize, Serialize};

use crate::binding::PropertyResolver;
use crate::channels::ChannelsForOutput;
use crate::ids::OutputIndex;
use crate::layer::Layer;

/// Identifies one scalar component of one animated property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropIdentifier {
    pub rna_path: String,
    pub array_index: i32,
}

impl PropIdentifier {
    pub fn new(rna_path: &str, array_index: i32) -> Self {
        Self {
            rna_path: rna_path.to_string(),
            array_index,
        }
    }
}

/// Borrowed form of `PropIdentifier` for allocation-free lookups.
/// Field order and types hash identically to the owned key.
#[derive(Hash)]
struct PropKey<'a> {
    rna_path: &'a str,
    array_index: i32,
}

impl Equivalent<PropIdentifier> for PropKey<'_> {
    fn equivalent(&self, key: &PropIdentifier) -> bool {
        self.array_index == key.array_index && self.rna_path == key.rna_path
    }
}

/// Evaluated value of a property plus the resolved handle to write it back through.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedProperty<H> {
    pub value: f32,
    pub prop: H,
}

/// Evaluated curves for one output: property identifier -> value and handle.
#[derive(Clone, Debug)]
pub struct EvaluationResult<H> {
    result: HashMap<PropIdentifier, AnimatedProperty<H>>,
}

impl<H> Default for EvaluationResult<H> {
    fn default() -> Self {
        Self {
            result: HashMap::new(),
        }
    }
}

impl<H> EvaluationResult<H> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn contains(&self, rna_path: &str, array_index: i32) -> bool {
        self.result.contains_key(&PropKey {
            rna_path,
            array_index,
        })
    }

    /// Store a value unless the property already has one.
    /// Returns whether the value was stored.
    pub fn store(&mut self, rna_path: &str, array_index: i32, value: f32, prop: H) -> bool {
        if self.contains(rna_path, array_index) {
            return false;
        }
        self.result.insert(
            PropIdentifier::new(rna_path, array_index),
            AnimatedProperty { value, prop },
        );
        true
    }

    /// Value of a single property, `None` when it was not animated.
    pub fn value(&self, rna_path: &str, array_index: i32) -> Option<f32> {
        self.result
            .get(&PropKey {
                rna_path,
                array_index,
            })
            .map(|p| p.value)
    }

    pub fn lookup(&self, key: &PropIdentifier) -> Option<&AnimatedProperty<H>> {
        self.result.get(key)
    }

    pub fn lookup_mut(&mut self, key: &PropIdentifier) -> Option<&mut AnimatedProperty<H>> {
        self.result.get_mut(key)
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropIdentifier, &AnimatedProperty<H>)> {
        self.result.iter()
    }
}

/// Per-call evaluation parameters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalContext {
    /// Global (layer) time to evaluate at, in frames.
    pub eval_time: f32,
}

impl EvalContext {
    pub fn new(eval_time: f32) -> Self {
        Self { eval_time }
    }
}

/// Evaluate `layer` for one output at `ctx.eval_time`, resolving property
/// handles on `target`. The target is never modified.
///
/// Properties not covered by any strip at that time are absent from the result.
pub fn evaluate_layer<R>(
    target: &R,
    layer: &Layer,
    output_index: OutputIndex,
    ctx: &EvalContext,
) -> EvaluationResult<R::Handle>
where
    R: PropertyResolver + ?Sized,
{
    let mut result = EvaluationResult::new();

    for strip in layer.strips().iter().rev() {
        let Some(keyframes) = strip.keyframe_data() else {
            continue;
        };
        if !strip.contains_frame(ctx.eval_time) {
            log::trace!(
                "strip {:?} [{}, {}] does not contain frame {}",
                strip.id(),
                strip.frame_start(),
                strip.frame_end(),
                ctx.eval_time
            );
            continue;
        }
        let Some(channels) = keyframes.channels(output_index) else {
            log::trace!(
                "strip {:?} has no channels for output {output_index}",
                strip.id()
            );
            continue;
        };

        let local_time = strip.local_time(ctx.eval_time);
        log::trace!(
            "evaluating strip {:?} at local time {local_time}",
            strip.id()
        );
        evaluate_keyframe_channels(target, channels, local_time, &mut result);
    }

    result
}

fn evaluate_keyframe_channels<R>(
    target: &R,
    channels: &ChannelsForOutput,
    local_time: f32,
    result: &mut EvaluationResult<R::Handle>,
) where
    R: PropertyResolver + ?Sized,
{
    for fcurve in channels.fcurves() {
        let rna_path = fcurve.rna_path();
        let array_index = fcurve.array_index();

        // A later strip already animated this property.
        if result.contains(rna_path, array_index) {
            continue;
        }
        let Some(value) = fcurve.evaluate(local_time) else {
            continue;
        };
        let Some(prop) = target.resolve(rna_path, array_index) else {
            log::warn!(
                "cannot resolve {rna_path}[{array_index}] on output {}; skipping",
                channels.output_stable_index()
            );
            continue;
        };
        result.store(rna_path, array_index, value, prop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_keeps_first_value() {
        let mut result = EvaluationResult::new();
        assert!(result.is_empty());
        assert!(result.store("location", 0, 1.0, "a"));
        assert!(!result.store("location", 0, 2.0, "b"));
        assert!(result.store("location", 1, 3.0, "c"));

        assert_eq!(result.len(), 2);
        assert_eq!(result.value("location", 0), Some(1.0));
        assert_eq!(
            result.lookup(&PropIdentifier::new("location", 0)),
            Some(&AnimatedProperty {
                value: 1.0,
                prop: "a"
            })
        );
    }

    #[test]
    fn missing_property_is_none() {
        let mut result: EvaluationResult<()> = EvaluationResult::new();
        result.store("location", 0, 1.0, ());
        assert_eq!(result.value("location", 2), None);
        assert_eq!(result.value("rotation_euler", 0), None);
        assert!(!result.contains("scale", 0));
    }

    #[test]
    fn borrowed_key_matches_owned_key() {
        let mut result = EvaluationResult::new();
        result.store("rotation_quaternion", 3, 0.5, ());
        assert!(result.contains("rotation_quaternion", 3));
        if let Some(p) = result.lookup_mut(&PropIdentifier::new("rotation_quaternion", 3)) {
            p.value = 0.75;
        }
        assert_eq!(result.value("rotation_quaternion", 3), Some(0.75));
        assert_eq!(result.iter().count(), 1);
    }
}
