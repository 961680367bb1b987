//! Entity identification.
//!
//! Every combatant on the grid has a unique `EntityId`. IDs are allocated
//! sequentially in roster order when a combat is built, so comparing two IDs
//! also compares roster positions. The AI relies on this for tie-breaks.
//!
//! ```
//! use grid_tactics::core::EntityId;
//!
//! let first = EntityId::new(0);
//! let second = first.next();
//! assert!(first < second);
//! assert_eq!(second.raw(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated right after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_allocation() {
        let a = EntityId::new(3);
        assert!(a < a.next());
        assert_eq!(a.next(), EntityId(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
