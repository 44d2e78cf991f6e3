//! # Component Storage
//!
//! Pre-allocated, dense component storage with zero runtime allocations.
//!
//! The storage uses a dense array strategy:
//! - All component slots are pre-allocated at creation
//! - Access is O(1) via entity index
//! - Tag components are zero-sized, so their storage costs nothing

use super::component::Component;

/// Pre-allocated storage for a single component type.
///
/// Slots are indexed by entity index. Whether a slot is meaningful is
/// decided by the owning entity's mask, not by the storage.
///
/// # Example
///
/// ```rust,ignore
/// let mut storage: ComponentStorage<Position> = ComponentStorage::new(10_000);
/// storage.set(0, Position::new().with(1.0, 2.0));
/// ```
pub struct ComponentStorage<C: Component> {
    data: Box<[C]>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates new component storage with the specified capacity.
    ///
    /// All slots are initialized to the component's default value.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        Self {
            data: vec![C::default(); capacity].into_boxed_slice(),
        }
    }

    /// Returns the capacity of this storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Gets a component by entity index.
    ///
    /// # Returns
    ///
    /// Reference to the component, or None if index is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Gets a mutable component by entity index.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.data.get_mut(index)
    }

    /// Overwrites the slot at `index`.
    ///
    /// # Returns
    ///
    /// `true` if the component was set, `false` if index was out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Returns a slice of all slots.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns a mutable slice of all slots.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }

    /// Resets a component slot to its default value.
    #[inline]
    pub fn reset(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = C::default();
        }
    }

    /// Resets every slot.
    pub fn clear(&mut self) {
        self.data.fill(C::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Particle, Position, Size};

    #[test]
    fn test_storage_creation() {
        let storage: ComponentStorage<Position> = ComponentStorage::new(1000);
        assert_eq!(storage.capacity(), 1000);
    }

    #[test]
    fn test_storage_get_set_reset() {
        let mut storage: ComponentStorage<Size> = ComponentStorage::new(100);

        let size = Size::new().with_radius(7.0);
        assert!(storage.set(50, size));
        assert_eq!(storage.get(50), Some(&size));

        storage.reset(50);
        assert_eq!(storage.get(50), Some(&Size::default()));
    }

    #[test]
    fn test_storage_bounds() {
        let mut storage: ComponentStorage<Position> = ComponentStorage::new(100);
        assert!(storage.get(100).is_none());
        assert!(storage.get(99).is_some());
        assert!(!storage.set(100, Position::new()));
    }

    #[test]
    fn test_tag_storage_is_free() {
        let storage: ComponentStorage<Particle> = ComponentStorage::new(1_000_000);
        assert_eq!(storage.capacity(), 1_000_000);
        assert_eq!(std::mem::size_of_val(storage.as_slice()), 0);
    }
}
