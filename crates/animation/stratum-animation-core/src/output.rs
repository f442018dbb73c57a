//! Outputs: the animated targets an animation knows about.

use crate::binding::{AnimatedTarget, IdType};
use crate::ids::OutputIndex;

/// One animation target, addressed by a stable index that survives rebinding.
#[derive(Clone, Debug)]
pub struct Output {
    stable_index: OutputIndex,
    /// Kind of the bound target; `IdType::NONE` until `assign_id` is called.
    pub idtype: IdType,
    /// Display name of the last bound target, used while no live binding exists.
    pub fallback: String,
}

impl Output {
    pub(crate) fn new(stable_index: OutputIndex) -> Self {
        Self {
            stable_index,
            idtype: IdType::NONE,
            fallback: String::new(),
        }
    }

    #[inline]
    pub fn stable_index(&self) -> OutputIndex {
        self.stable_index
    }

    /// Bind this output to `target`, refreshing the cached type and name.
    /// The stable index is unaffected.
    pub fn assign_id(&mut self, target: &dyn AnimatedTarget) {
        self.idtype = target.id_type();
        self.fallback = target.display_name().to_string();
        log::debug!(
            "output {} assigned to {} '{}'",
            self.stable_index,
            self.idtype,
            self.fallback
        );
    }
}
