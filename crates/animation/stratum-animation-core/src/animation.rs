//! Animation: the root aggregate owning layers and the output registry.
//!
//! Ownership is tree-shaped: Animation -> Layers -> Strips -> per-output
//! channels -> curves. Outputs are referenced by stable index only, so
//! rebinding or dropping a target never leaves a dangling reference inside
//! the tree.

use crate::config::Config;
use crate::fcurve::KeyframeSettings;
use crate::ids::{LayerId, OutputIndex, StableIndexAllocator};
use crate::layer::Layer;
use crate::output::Output;

/// Cloning copies every layer, strip and curve under fresh identities, so
/// the copy never owns anything of the original.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    cfg: Config,
    layers: Vec<Layer>,
    layer_active_index: Option<usize>,
    outputs: Vec<Output>,
    output_indices: StableIndexAllocator,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// See [`Config::keyframe_settings`].
    pub fn keyframe_settings(&self, from_userprefs: bool) -> KeyframeSettings {
        self.cfg.keyframe_settings(from_userprefs)
    }

    // ----- layers -----

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    #[inline]
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_by_id(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn layer_by_id_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Append a new layer and make it the active one.
    pub fn layer_add(&mut self, name: &str) -> &mut Layer {
        let layer = Layer::new(name, self.cfg.layer_influence);
        log::debug!("adding layer '{}' ({:?})", name, layer.id());
        self.layers.push(layer);
        let index = self.layers.len() - 1;
        self.layer_active_index = Some(index);
        &mut self.layers[index]
    }

    /// Remove (and drop, with all its strips) the layer with the given identity.
    /// Returns `false` without touching the animation if it does not own that layer.
    pub fn layer_remove(&mut self, layer: LayerId) -> bool {
        let Some(pos) = self.layers.iter().position(|l| l.id() == layer) else {
            log::debug!("refusing to remove layer {:?} not owned by this animation", layer);
            return false;
        };
        let removed = self.layers.remove(pos);
        log::debug!("removed layer '{}' ({:?})", removed.name(), layer);

        self.layer_active_index = match self.layer_active_index {
            Some(active) if active == pos => None,
            Some(active) if active > pos => Some(active - 1),
            other => other,
        };
        true
    }

    #[inline]
    pub fn layer_active_index(&self) -> Option<usize> {
        self.layer_active_index
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layer_active_index.and_then(|i| self.layers.get(i))
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layer_active_index.and_then(|i| self.layers.get_mut(i))
    }

    /// Make the given layer active. `false` if this animation does not own it.
    pub fn set_active_layer(&mut self, layer: LayerId) -> bool {
        match self.layers.iter().position(|l| l.id() == layer) {
            Some(pos) => {
                self.layer_active_index = Some(pos);
                true
            }
            None => false,
        }
    }

    // ----- outputs -----

    #[inline]
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Register a new output with the next stable index.
    pub fn output_add(&mut self) -> &mut Output {
        let stable_index = self.output_indices.alloc();
        log::debug!("adding output {stable_index}");
        self.outputs.push(Output::new(stable_index));
        let last = self.outputs.len() - 1;
        &mut self.outputs[last]
    }

    /// Highest stable index handed out so far (0 before the first output).
    #[inline]
    pub fn last_output_stable_index(&self) -> u32 {
        self.output_indices.last()
    }

    pub fn output_for_stable_index(&self, stable_index: OutputIndex) -> Option<&Output> {
        self.outputs
            .iter()
            .find(|o| o.stable_index() == stable_index)
    }

    pub fn output_for_stable_index_mut(&mut self, stable_index: OutputIndex) -> Option<&mut Output> {
        self.outputs
            .iter_mut()
            .find(|o| o.stable_index() == stable_index)
    }
}
