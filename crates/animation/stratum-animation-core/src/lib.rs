//! Stratum Animation Core (engine-agnostic)
//!
//! Layered animation data model and evaluator. An [`Animation`] owns a stack
//! of [`Layer`]s, each holding ordered [`Strip`]s of keyed curves per
//! [`Output`]. [`evaluate_layer`] computes the property values one layer
//! yields for one output at one point in time.
//!
//! Target binding is expressed through the [`AnimatedTarget`] and
//! [`PropertyResolver`] traits; adapters implement them for their own objects.

pub mod animation;
pub mod binding;
pub mod channels;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod fcurve;
pub mod ids;
pub mod interp;
pub mod layer;
pub mod output;
pub mod strip;

// Re-exports for consumers (adapters)
pub use animation::Animation;
pub use binding::{split_id_name, AnimatedTarget, IdType, PropertyResolver};
pub use channels::{ChannelsForOutput, KeyframeStrip};
pub use config::Config;
pub use error::AnimError;
pub use evaluation::{evaluate_layer, AnimatedProperty, EvalContext, EvaluationResult, PropIdentifier};
pub use fcurve::{FCurve, Interpolation, Keyframe, KeyframeSettings, KeyframeType};
pub use ids::{CurveId, LayerId, OutputIndex, StripId};
pub use layer::Layer;
pub use output::Output;
pub use strip::{Strip, StripData, StripType};
