//! Keyed curves: storage of keyframes for one scalar property component and
//! evaluation of that curve at an arbitrary (strip-local) time.
//!
//! Model:
//! - Keys are kept sorted by time.
//! - Inserting within `settings.merge_threshold` frames of an existing key overwrites
//!   that key's value instead of adding a second key.
//! - Each segment [Ki -> K(i+1)] is interpolated according to Ki's mode.
//! - Outside the keyed range the curve holds its first/last value.

use serde::{Deserialize, Serialize};

use crate::error::AnimError;
use crate::ids::CurveId;
use crate::interp::{auto_clamped_slope, bezier_segment, lerp_f32};

/// How a segment is interpolated, taken from the key on its left.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Hold the left key's value until the next key.
    Constant,
    Linear,
    /// Cubic bezier with auto-clamped handles.
    #[default]
    Bezier,
}

/// Semantic tag of a key. Does not affect evaluation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeType {
    #[default]
    Keyframe,
    Breakdown,
    MovingHold,
    Extreme,
    Jitter,
}

/// Keys closer than this (in frames) are treated as the same key.
pub const DEFAULT_MERGE_THRESHOLD: f32 = 0.01;

/// Settings applied to keys created by an insertion.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyframeSettings {
    pub interpolation: Interpolation,
    pub keyframe_type: KeyframeType,
    /// Inserting within this many frames of an existing key overwrites it.
    pub merge_threshold: f32,
}

impl Default for KeyframeSettings {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            keyframe_type: KeyframeType::default(),
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
        }
    }
}

impl KeyframeSettings {
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub interpolation: Interpolation,
    pub keyframe_type: KeyframeType,
}

/// Animation curve for `(rna_path, array_index)` of one output.
#[derive(Debug)]
pub struct FCurve {
    id: CurveId,
    rna_path: String,
    array_index: i32,
    keys: Vec<Keyframe>,
}

/// A copy is a distinct curve with its own identity.
impl Clone for FCurve {
    fn clone(&self) -> Self {
        Self {
            id: CurveId::alloc(),
            rna_path: self.rna_path.clone(),
            array_index: self.array_index,
            keys: self.keys.clone(),
        }
    }
}

impl FCurve {
    pub(crate) fn new(rna_path: &str, array_index: i32) -> Self {
        Self {
            id: CurveId::alloc(),
            rna_path: rna_path.to_string(),
            array_index,
            keys: Vec::new(),
        }
    }

    /// Identity of this curve. Stable for the curve's lifetime.
    #[inline]
    pub fn id(&self) -> CurveId {
        self.id
    }

    #[inline]
    pub fn rna_path(&self) -> &str {
        &self.rna_path
    }

    #[inline]
    pub fn array_index(&self) -> i32 {
        self.array_index
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub(crate) fn matches(&self, rna_path: &str, array_index: i32) -> bool {
        self.array_index == array_index && self.rna_path == rna_path
    }

    /// Insert a key, returning its index in the sorted key list.
    pub fn insert_key(
        &mut self,
        time: f32,
        value: f32,
        settings: &KeyframeSettings,
    ) -> Result<usize, AnimError> {
        if !time.is_finite() || !value.is_finite() {
            return Err(AnimError::NonFiniteKey { time, value });
        }

        let idx = self.keys.partition_point(|k| k.time < time);
        let near = [idx.checked_sub(1), Some(idx)]
            .into_iter()
            .flatten()
            .filter(|&i| i < self.keys.len())
            .find(|&i| (self.keys[i].time - time).abs() < settings.merge_threshold);

        if let Some(existing) = near {
            self.keys[existing].value = value;
            return Ok(existing);
        }

        self.keys.insert(
            idx,
            Keyframe {
                time,
                value,
                interpolation: settings.interpolation,
                keyframe_type: settings.keyframe_type,
            },
        );
        Ok(idx)
    }

    /// Evaluate the curve at `time`. `None` only when the curve has no keys.
    pub fn evaluate(&self, time: f32) -> Option<f32> {
        let keys = &self.keys;
        let first = keys.first()?;
        let last = keys[keys.len() - 1];
        if keys.len() == 1 || time <= first.time {
            return Some(first.value);
        }
        if time >= last.time {
            return Some(last.value);
        }

        // first.time < time < last.time, so 1 <= right < len.
        let right = keys.partition_point(|k| k.time <= time);
        let a = &keys[right - 1];
        let b = &keys[right];
        let dt = b.time - a.time;
        if dt <= 0.0 {
            return Some(a.value);
        }
        let frac = (time - a.time) / dt;

        let value = match a.interpolation {
            Interpolation::Constant => a.value,
            Interpolation::Linear => lerp_f32(a.value, b.value, frac),
            Interpolation::Bezier => {
                let slope_a = self.slope_at(right - 1);
                let slope_b = self.slope_at(right);
                bezier_segment(a.value, b.value, slope_a, slope_b, dt, frac)
            }
        };
        Some(value)
    }

    fn slope_at(&self, i: usize) -> f32 {
        let point = |k: &Keyframe| (k.time, k.value);
        let prev = i.checked_sub(1).map(|p| point(&self.keys[p]));
        let next = self.keys.get(i + 1).map(point);
        auto_clamped_slope(prev, point(&self.keys[i]), next)
    }
}
