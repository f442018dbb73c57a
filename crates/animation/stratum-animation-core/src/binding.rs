//! Target-side contracts: identifying an animated target and resolving its
//! animated properties to opaque handles.
//!
//! Adapters implement these traits for their own object model. The core never
//! dereferences a resolved handle; it only carries it through evaluation
//! results so the consumer can write values back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of an animated target, encoded from its two-character name prefix
/// (e.g. `"OB"` for objects). `IdType::NONE` means "not bound yet".
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct IdType(pub u16);

impl IdType {
    pub const NONE: IdType = IdType(0);

    #[inline]
    pub fn from_code(code: [u8; 2]) -> Self {
        IdType(u16::from_le_bytes(code))
    }

    #[inline]
    pub fn code(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.code();
        write!(f, "{}{}", a as char, b as char)
    }
}

/// Split a prefixed identifier name (`"OBCube"`) into its type and display name.
/// Names too short to carry a prefix yield `IdType::NONE` and the name as-is.
pub fn split_id_name(id_name: &str) -> (IdType, &str) {
    match (id_name.as_bytes().get(..2), id_name.get(2..)) {
        (Some(&[a, b]), Some(display)) => (IdType::from_code([a, b]), display),
        _ => (IdType::NONE, id_name),
    }
}

/// Something an output can be bound to.
pub trait AnimatedTarget {
    /// Full identifier name including the two-character type prefix.
    fn id_name(&self) -> &str;

    fn id_type(&self) -> IdType {
        split_id_name(self.id_name()).0
    }

    fn display_name(&self) -> &str {
        split_id_name(self.id_name()).1
    }
}

/// Resolves `(rna_path, array_index)` on a target to a handle of the concrete
/// property slot. Resolution must not modify the target.
pub trait PropertyResolver {
    type Handle: Clone + fmt::Debug;

    fn resolve(&self, rna_path: &str, array_index: i32) -> Option<Self::Handle>;
}
