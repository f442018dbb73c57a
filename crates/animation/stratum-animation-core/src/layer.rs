//! Layers: ordered, owning collections of strips.

use crate::ids::{LayerId, StripId};
use crate::strip::{Strip, StripType};

#[derive(Debug)]
pub struct Layer {
    id: LayerId,
    name: String,
    influence: f32,
    /// Insertion order; later strips win where intervals overlap.
    strips: Vec<Strip>,
}

/// A copy is a distinct layer with its own identity; strips are copied likewise.
impl Clone for Layer {
    fn clone(&self) -> Self {
        Self {
            id: LayerId::alloc(),
            name: self.name.clone(),
            influence: self.influence,
            strips: self.strips.clone(),
        }
    }
}

impl Layer {
    pub(crate) fn new(name: &str, influence: f32) -> Self {
        Self {
            id: LayerId::alloc(),
            name: name.to_string(),
            influence: influence.clamp(0.0, 1.0),
            strips: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> LayerId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    #[inline]
    pub fn influence(&self) -> f32 {
        self.influence
    }

    /// Set the influence, clamped to [0, 1]. NaN is ignored.
    pub fn set_influence(&mut self, influence: f32) {
        if !influence.is_nan() {
            self.influence = influence.clamp(0.0, 1.0);
        }
    }

    #[inline]
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    #[inline]
    pub fn strip(&self, index: usize) -> Option<&Strip> {
        self.strips.get(index)
    }

    #[inline]
    pub fn strip_mut(&mut self, index: usize) -> Option<&mut Strip> {
        self.strips.get_mut(index)
    }

    pub fn strip_by_id(&self, id: StripId) -> Option<&Strip> {
        self.strips.iter().find(|s| s.id() == id)
    }

    pub fn strip_by_id_mut(&mut self, id: StripId) -> Option<&mut Strip> {
        self.strips.iter_mut().find(|s| s.id() == id)
    }

    /// Append a new infinite strip of the given type.
    pub fn strip_add(&mut self, strip_type: StripType) -> &mut Strip {
        let strip = Strip::new(strip_type);
        log::debug!(
            "layer '{}': adding {:?} strip {:?}",
            self.name,
            strip_type,
            strip.id()
        );
        self.strips.push(strip);
        let last = self.strips.len() - 1;
        &mut self.strips[last]
    }

    /// Remove (and drop) the strip with the given identity.
    /// Returns `false` without touching the layer if it does not own that strip.
    pub fn strip_remove(&mut self, strip: StripId) -> bool {
        let Some(pos) = self.strips.iter().position(|s| s.id() == strip) else {
            log::debug!(
                "layer '{}': refusing to remove strip {:?} it does not own",
                self.name,
                strip
            );
            return false;
        };
        self.strips.remove(pos);
        log::debug!("layer '{}': removed strip {:?}", self.name, strip);
        true
    }
}
