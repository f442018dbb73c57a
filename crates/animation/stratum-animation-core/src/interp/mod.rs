//! Scalar interpolation helpers used by curve evaluation.
//!
//! Registers constant (hold-left), linear, and cubic-bezier segment
//! interpolation with auto-clamped tangents.

pub mod functions;

pub use functions::{auto_clamped_slope, bezier_segment, lerp_f32};
