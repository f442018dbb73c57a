//! Error types for the animation data model.

use thiserror::Error;

use crate::strip::StripType;

/// Errors produced when an edit would break a model invariant.
///
/// Ownership mismatches on removal are not errors; those operations report a
/// plain `false` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnimError {
    #[error("invalid strip range: start {start} must not exceed end {end}")]
    InvalidStripRange { start: f32, end: f32 },

    #[error("strip frame offset must be finite, got {0}")]
    NonFiniteOffset(f32),

    #[error("keyframe must have a finite time and value (time {time}, value {value})")]
    NonFiniteKey { time: f32, value: f32 },

    /// Reserved for typed downcasts once strip types other than keyframe exist.
    #[error("strip is of type {found:?}, expected {expected:?}")]
    StripTypeMismatch { expected: StripType, found: StripType },

    #[error("config error: {0}")]
    Config(String),
}
