//! Keyframe strip payload: per-output channel storage.
//!
//! A `KeyframeStrip` owns one `ChannelsForOutput` per output stable index,
//! and each of those owns at most one curve per `(rna_path, array_index)`.

use crate::error::AnimError;
use crate::fcurve::{FCurve, KeyframeSettings};
use crate::ids::OutputIndex;
use crate::output::Output;

/// Curves animating one output within one strip.
#[derive(Clone, Debug)]
pub struct ChannelsForOutput {
    output_stable_index: OutputIndex,
    fcurves: Vec<FCurve>,
}

impl ChannelsForOutput {
    fn new(output_stable_index: OutputIndex) -> Self {
        Self {
            output_stable_index,
            fcurves: Vec::new(),
        }
    }

    #[inline]
    pub fn output_stable_index(&self) -> OutputIndex {
        self.output_stable_index
    }

    /// Curves in creation order.
    #[inline]
    pub fn fcurves(&self) -> &[FCurve] {
        &self.fcurves
    }

    pub fn fcurve_find(&self, rna_path: &str, array_index: i32) -> Option<&FCurve> {
        self.fcurves.iter().find(|f| f.matches(rna_path, array_index))
    }

    pub fn fcurve_find_mut(&mut self, rna_path: &str, array_index: i32) -> Option<&mut FCurve> {
        self.fcurves
            .iter_mut()
            .find(|f| f.matches(rna_path, array_index))
    }

    /// Find the curve for `(rna_path, array_index)`, creating it if missing.
    pub fn fcurve_ensure(&mut self, rna_path: &str, array_index: i32) -> &mut FCurve {
        let pos = match self
            .fcurves
            .iter()
            .position(|f| f.matches(rna_path, array_index))
        {
            Some(pos) => pos,
            None => {
                log::debug!(
                    "creating curve {rna_path}[{array_index}] for output {}",
                    self.output_stable_index
                );
                self.fcurves.push(FCurve::new(rna_path, array_index));
                self.fcurves.len() - 1
            }
        };
        &mut self.fcurves[pos]
    }
}

/// Keyframe strip data.
#[derive(Clone, Debug, Default)]
pub struct KeyframeStrip {
    channels_for_output: Vec<ChannelsForOutput>,
}

impl KeyframeStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel groups in creation order, one per animated output.
    #[inline]
    pub fn channels_for_output(&self) -> &[ChannelsForOutput] {
        &self.channels_for_output
    }

    /// Channels for the given output, if this strip animates it.
    pub fn channels(&self, output_index: OutputIndex) -> Option<&ChannelsForOutput> {
        self.channels_for_output
            .iter()
            .find(|c| c.output_stable_index == output_index)
    }

    pub fn channels_mut(&mut self, output_index: OutputIndex) -> Option<&mut ChannelsForOutput> {
        self.channels_for_output
            .iter_mut()
            .find(|c| c.output_stable_index == output_index)
    }

    /// Channels for `output`, created on first use.
    pub fn channels_ensure(&mut self, output: &Output) -> &mut ChannelsForOutput {
        let output_index = output.stable_index();
        let pos = match self
            .channels_for_output
            .iter()
            .position(|c| c.output_stable_index == output_index)
        {
            Some(pos) => pos,
            None => {
                self.channels_for_output
                    .push(ChannelsForOutput::new(output_index));
                self.channels_for_output.len() - 1
            }
        };
        &mut self.channels_for_output[pos]
    }

    /// Insert a key on `rna_path[array_index]` of `output`, creating the
    /// channel storage and curve as needed. Returns the curve that received
    /// the key; repeated calls for the same property return the same curve.
    pub fn keyframe_insert(
        &mut self,
        output: &Output,
        rna_path: &str,
        array_index: i32,
        time_value: (f32, f32),
        settings: &KeyframeSettings,
    ) -> Result<&mut FCurve, AnimError> {
        let (time, value) = time_value;
        if !time.is_finite() || !value.is_finite() {
            return Err(AnimError::NonFiniteKey { time, value });
        }
        let fcurve = self
            .channels_ensure(output)
            .fcurve_ensure(rna_path, array_index);
        fcurve.insert_key(time, value, settings)?;
        Ok(fcurve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_are_created_once_per_output() {
        let out_a = Output::new(OutputIndex(1));
        let out_b = Output::new(OutputIndex(2));
        let mut strip = KeyframeStrip::new();
        let settings = KeyframeSettings::default();

        strip
            .keyframe_insert(&out_a, "location", 0, (1.0, 1.0), &settings)
            .unwrap();
        strip
            .keyframe_insert(&out_a, "location", 1, (1.0, 1.0), &settings)
            .unwrap();
        strip
            .keyframe_insert(&out_b, "location", 0, (1.0, 1.0), &settings)
            .unwrap();

        assert_eq!(strip.channels_for_output().len(), 2);
        assert_eq!(
            strip.channels(OutputIndex(1)).map(|c| c.fcurves().len()),
            Some(2)
        );
        assert_eq!(
            strip.channels(OutputIndex(2)).map(|c| c.fcurves().len()),
            Some(1)
        );
        assert!(strip.channels(OutputIndex(3)).is_none());
    }

    #[test]
    fn rejected_insert_creates_no_storage() {
        let out = Output::new(OutputIndex(1));
        let mut strip = KeyframeStrip::new();
        let err = strip
            .keyframe_insert(&out, "location", 0, (f32::NAN, 1.0), &KeyframeSettings::default())
            .unwrap_err();
        assert!(matches!(err, AnimError::NonFiniteKey { .. }));
        assert!(strip.channels_for_output().is_empty());
    }
}
