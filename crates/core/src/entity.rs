//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is optional: records that arrive from outside the domain may lack
/// one, and such records never compare as the same entity as anything else.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if the record carries one.
    fn id(&self) -> Option<&Self::Id>;

    /// Two entities are the same iff both carry an identifier and the
    /// identifiers are equal.
    fn same_identity(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
