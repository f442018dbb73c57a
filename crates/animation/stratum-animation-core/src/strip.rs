//! Strips: time intervals on a layer carrying one kind of animation data.
//!
//! A strip covers the closed interval `[frame_start, frame_end]`; either end
//! may be infinite. Its data is keyed on a local time axis shifted by
//! `frame_offset`: `local_time = global_time - frame_offset`.

use serde::{Deserialize, Serialize};

use crate::channels::KeyframeStrip;
use crate::error::AnimError;
use crate::ids::StripId;

/// `is_last_frame` accepts frames this many float steps away from `frame_end`.
const LAST_FRAME_MAX_ULPS: i64 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripType {
    Keyframe,
}

/// Type-specific strip payload.
#[derive(Clone, Debug)]
pub enum StripData {
    Keyframe(KeyframeStrip),
}

impl StripData {
    fn new(strip_type: StripType) -> Self {
        match strip_type {
            StripType::Keyframe => StripData::Keyframe(KeyframeStrip::new()),
        }
    }

    #[inline]
    pub fn strip_type(&self) -> StripType {
        match self {
            StripData::Keyframe(_) => StripType::Keyframe,
        }
    }
}

#[derive(Debug)]
pub struct Strip {
    id: StripId,
    frame_start: f32,
    frame_end: f32,
    frame_offset: f32,
    data: StripData,
}

/// A copy is a distinct strip with its own identity; its curves are copied likewise.
impl Clone for Strip {
    fn clone(&self) -> Self {
        Self {
            id: StripId::alloc(),
            frame_start: self.frame_start,
            frame_end: self.frame_end,
            frame_offset: self.frame_offset,
            data: self.data.clone(),
        }
    }
}

impl Strip {
    /// New infinite strip without offset.
    pub fn new(strip_type: StripType) -> Self {
        Self {
            id: StripId::alloc(),
            frame_start: f32::NEG_INFINITY,
            frame_end: f32::INFINITY,
            frame_offset: 0.0,
            data: StripData::new(strip_type),
        }
    }

    #[inline]
    pub fn id(&self) -> StripId {
        self.id
    }

    #[inline]
    pub fn frame_start(&self) -> f32 {
        self.frame_start
    }

    #[inline]
    pub fn frame_end(&self) -> f32 {
        self.frame_end
    }

    #[inline]
    pub fn frame_offset(&self) -> f32 {
        self.frame_offset
    }

    #[inline]
    pub fn strip_type(&self) -> StripType {
        self.data.strip_type()
    }

    #[inline]
    pub fn data(&self) -> &StripData {
        &self.data
    }

    /// Set the strip's interval. Rejects `start > end` and NaN bounds,
    /// leaving the strip untouched.
    pub fn resize(&mut self, frame_start: f32, frame_end: f32) -> Result<(), AnimError> {
        if frame_start.is_nan() || frame_end.is_nan() || frame_start > frame_end {
            return Err(AnimError::InvalidStripRange {
                start: frame_start,
                end: frame_end,
            });
        }
        self.frame_start = frame_start;
        self.frame_end = frame_end;
        Ok(())
    }

    pub fn set_frame_offset(&mut self, frame_offset: f32) -> Result<(), AnimError> {
        if !frame_offset.is_finite() {
            return Err(AnimError::NonFiniteOffset(frame_offset));
        }
        self.frame_offset = frame_offset;
        Ok(())
    }

    /// Whether `frame_time` lies in `[frame_start, frame_end]`.
    #[inline]
    pub fn contains_frame(&self, frame_time: f32) -> bool {
        self.frame_start <= frame_time && frame_time <= self.frame_end
    }

    /// Whether `frame_time` is this strip's last frame, allowing for the
    /// rounding error that grows with the magnitude of `frame_end`.
    ///
    /// On a strip without an end, `f32::MAX` is one float step from infinity
    /// and therefore also counts as the last frame.
    pub fn is_last_frame(&self, frame_time: f32) -> bool {
        compare_relative(frame_time, self.frame_end, f32::EPSILON, LAST_FRAME_MAX_ULPS)
    }

    /// Map a global evaluation time onto this strip's key axis.
    #[inline]
    pub fn local_time(&self, global_time: f32) -> f32 {
        global_time - self.frame_offset
    }

    pub fn keyframe_data(&self) -> Option<&KeyframeStrip> {
        self.as_keyframe().ok()
    }

    pub fn keyframe_data_mut(&mut self) -> Option<&mut KeyframeStrip> {
        self.as_keyframe_mut().ok()
    }

    /// Keyframe payload. Keyframe is the only strip type so far, so this
    /// cannot fail yet; other types will report `StripTypeMismatch`.
    pub fn as_keyframe(&self) -> Result<&KeyframeStrip, AnimError> {
        match &self.data {
            StripData::Keyframe(keyframes) => Ok(keyframes),
        }
    }

    pub fn as_keyframe_mut(&mut self) -> Result<&mut KeyframeStrip, AnimError> {
        match &mut self.data {
            StripData::Keyframe(keyframes) => Ok(keyframes),
        }
    }
}

/// Equal within `max_abs`, or within `max_ulps` representable floats of each other.
fn compare_relative(a: f32, b: f32, max_abs: f32, max_ulps: i64) -> bool {
    if a == b {
        return true;
    }
    if (a - b).abs() <= max_abs {
        return true;
    }
    if a.is_sign_negative() != b.is_sign_negative() {
        return false;
    }
    let ua = a.to_bits() as i32 as i64;
    let ub = b.to_bits() as i32 as i64;
    (ua - ub).abs() <= max_ulps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strip_is_infinite() {
        let strip = Strip::new(StripType::Keyframe);
        assert_eq!(strip.frame_start(), f32::NEG_INFINITY);
        assert_eq!(strip.frame_end(), f32::INFINITY);
        assert_eq!(strip.frame_offset(), 0.0);
        assert_eq!(strip.strip_type(), StripType::Keyframe);
    }

    #[test]
    fn infinite_strip_contains_everything() {
        let strip = Strip::new(StripType::Keyframe);
        assert!(strip.contains_frame(0.0));
        assert!(strip.contains_frame(-100000.0));
        assert!(strip.contains_frame(100000.0));
        assert!(strip.is_last_frame(f32::INFINITY));
    }

    #[test]
    fn largest_finite_frame_is_last_frame_of_infinite_strip() {
        let strip = Strip::new(StripType::Keyframe);
        assert!(strip.is_last_frame(f32::MAX));
        assert!(!strip.is_last_frame(f32::MAX / 2.0));
        assert!(!strip.is_last_frame(0.0));
    }

    #[test]
    fn cloned_strip_gets_new_identity() {
        let strip = Strip::new(StripType::Keyframe);
        let copy = strip.clone();
        assert_ne!(copy.id(), strip.id());
        assert_eq!(copy.frame_end(), strip.frame_end());
    }

    #[test]
    fn finite_strip_is_closed_on_both_ends() {
        let mut strip = Strip::new(StripType::Keyframe);
        strip.resize(1.0, 2.0).unwrap();
        assert!(!strip.contains_frame(0.0));
        assert!(strip.contains_frame(1.0));
        assert!(strip.contains_frame(2.0));
        assert!(!strip.contains_frame(2.0001));

        assert!(!strip.is_last_frame(1.0));
        assert!(!strip.is_last_frame(1.5));
        assert!(!strip.is_last_frame(1.9999));
        assert!(strip.is_last_frame(2.0));
        assert!(!strip.is_last_frame(2.0001));
    }

    #[test]
    fn last_frame_tolerance_at_large_frame_numbers() {
        // Two hours at 24 FPS.
        let mut strip = Strip::new(StripType::Keyframe);
        strip.resize(1.0, 172800.0).unwrap();
        assert!(strip.contains_frame(172800.0));
        assert!(!strip.contains_frame(172800.1));

        assert!(!strip.is_last_frame(172799.925));
        assert!(strip.is_last_frame(172800.0));
        assert!(!strip.is_last_frame(172800.075));
        // One float step either side still counts.
        assert!(strip.is_last_frame(172800.016));
        assert!(strip.is_last_frame(172799.984));
    }

    #[test]
    fn invalid_resize_is_rejected_without_mutation() {
        let mut strip = Strip::new(StripType::Keyframe);
        strip.resize(1.0, 10.0).unwrap();
        assert_eq!(
            strip.resize(5.0, 4.0),
            Err(AnimError::InvalidStripRange {
                start: 5.0,
                end: 4.0
            })
        );
        assert!(strip.resize(f32::NAN, 4.0).is_err());
        assert_eq!((strip.frame_start(), strip.frame_end()), (1.0, 10.0));
        // Zero-length strips are fine.
        assert!(strip.resize(3.0, 3.0).is_ok());
    }

    #[test]
    fn local_time_applies_offset() {
        let mut strip = Strip::new(StripType::Keyframe);
        strip.set_frame_offset(9.0).unwrap();
        assert_eq!(strip.local_time(10.0), 1.0);
        assert!(strip.set_frame_offset(f32::INFINITY).is_err());
        assert_eq!(strip.frame_offset(), 9.0);
    }

    #[test]
    fn keyframe_downcast() {
        let mut strip = Strip::new(StripType::Keyframe);
        assert!(strip.as_keyframe().is_ok());
        assert!(strip.as_keyframe_mut().is_ok());
    }
}
