//! # ECS World
//!
//! The entity manager: owns every entity slot and one dense storage per
//! component type. All memory is pre-allocated at creation.
//!
//! ## Identity policy
//!
//! Ids are handed out by [`World::spawn`]; callers never choose them, so a
//! duplicate add cannot happen. Attaching a component the entity already
//! carries overwrites the previous value and leaves the mask unchanged.
//!
//! ## Filtering
//!
//! Live entity indices are kept in a dense list (swap-remove on despawn),
//! so [`World::filter_by_mask_into`] touches only live entities. Result
//! order is not stable across despawns.

use super::builder::EntityBuilder;
use super::component::{
    Acceleration, Attractor, Color, Component, Emitter, Lifetime, Mass, Particle, Position, Size,
    Velocity,
};
use super::entity::{Entity, EntityId};
use super::storage::ComponentStorage;

/// A component type the [`World`] has storage for.
///
/// Implemented for the ten built-in components; lets generic code reach
/// the matching storage without dynamic dispatch.
pub trait Stored: Component {
    /// The storage for this component type.
    fn storage(world: &World) -> &ComponentStorage<Self>;
    /// The mutable storage for this component type.
    fn storage_mut(world: &mut World) -> &mut ComponentStorage<Self>;
    /// The builder slot for this component type.
    fn slot(builder: &mut EntityBuilder) -> &mut Option<Self>;
}

macro_rules! impl_stored {
    ($($ty:ty => $storage:ident, $slot:ident;)*) => {
        $(
            impl Stored for $ty {
                #[inline]
                fn storage(world: &World) -> &ComponentStorage<Self> {
                    &world.$storage
                }

                #[inline]
                fn storage_mut(world: &mut World) -> &mut ComponentStorage<Self> {
                    &mut world.$storage
                }

                #[inline]
                fn slot(builder: &mut EntityBuilder) -> &mut Option<Self> {
                    &mut builder.$slot
                }
            }
        )*
    };
}

impl_stored! {
    Position => positions, position;
    Velocity => velocities, velocity;
    Acceleration => accelerations, acceleration;
    Color => colors, color;
    Lifetime => lifetimes, lifetime;
    Mass => masses, mass;
    Size => sizes, size;
    Emitter => emitters, emitter;
    Attractor => attractors, attractor;
    Particle => particles, particle;
}

/// The ECS World - container for all simulation state.
///
/// # Capacity
///
/// The world has a fixed capacity set at creation. Spawning past it
/// returns `None` and changes nothing.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(16_384);
///
/// let id = world
///     .spawn_with(EntityBuilder::new().with(Position::new().with(1.0, 2.0)).with(Particle))
///     .expect("capacity");
/// assert!(world.filter_by_mask(mask::PARTICLE).contains(&id));
/// ```
pub struct World {
    /// All entity slots (pre-allocated).
    entities: Box<[Entity]>,
    /// Free list of entity indices for reuse.
    free_indices: Vec<u32>,
    /// Dense list of live entity indices.
    live: Vec<u32>,
    /// Position of each live index inside `live`.
    live_slot: Box<[u32]>,

    // =========================================================================
    // Component Storages - Add new component types here
    // =========================================================================
    /// Position component storage.
    pub positions: ComponentStorage<Position>,
    /// Velocity component storage.
    pub velocities: ComponentStorage<Velocity>,
    /// Acceleration component storage.
    pub accelerations: ComponentStorage<Acceleration>,
    /// Color component storage.
    pub colors: ComponentStorage<Color>,
    /// Lifetime component storage.
    pub lifetimes: ComponentStorage<Lifetime>,
    /// Mass component storage.
    pub masses: ComponentStorage<Mass>,
    /// Size component storage.
    pub sizes: ComponentStorage<Size>,
    /// Emitter tag storage (zero-sized).
    pub emitters: ComponentStorage<Emitter>,
    /// Attractor tag storage (zero-sized).
    pub attractors: ComponentStorage<Attractor>,
    /// Particle tag storage (zero-sized).
    pub particles: ComponentStorage<Particle>,
}

impl World {
    /// Creates a new world with the specified entity capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        let Ok(max_index) = u32::try_from(capacity) else {
            panic!("Capacity cannot exceed u32::MAX");
        };

        Self {
            entities: vec![Entity::dead(); capacity].into_boxed_slice(),
            free_indices: (0..max_index).rev().collect(),
            live: Vec::with_capacity(capacity),
            live_slot: vec![0; capacity].into_boxed_slice(),
            positions: ComponentStorage::new(capacity),
            velocities: ComponentStorage::new(capacity),
            accelerations: ComponentStorage::new(capacity),
            colors: ComponentStorage::new(capacity),
            lifetimes: ComponentStorage::new(capacity),
            masses: ComponentStorage::new(capacity),
            sizes: ComponentStorage::new(capacity),
            emitters: ComponentStorage::new(capacity),
            attractors: ComponentStorage::new(capacity),
            particles: ComponentStorage::new(capacity),
        }
    }

    /// Returns the maximum capacity of this world.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of currently alive entities.
    #[inline]
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.live.len()
    }

    /// Spawns an entity with no components.
    ///
    /// # Returns
    ///
    /// The new entity's ID, or `None` if capacity is reached.
    #[inline]
    pub fn spawn(&mut self) -> Option<EntityId> {
        let index = self.free_indices.pop()?;
        let idx = index as usize;
        let entity = &mut self.entities[idx];

        // Bump the generation so ids held for the previous occupant go stale.
        let generation = entity.id.generation().wrapping_add(1);
        let id = EntityId::new(index, generation);
        *entity = Entity::new(id);

        self.live_slot[idx] = self.live.len() as u32;
        self.live.push(index);

        Some(id)
    }

    /// Spawns a fully built entity in one step.
    ///
    /// Every staged component is written before this returns, so no system
    /// ever observes a half-initialised entity.
    ///
    /// # Returns
    ///
    /// The new entity's ID, or `None` if capacity is reached.
    pub fn spawn_with(&mut self, builder: EntityBuilder) -> Option<EntityId> {
        let id = self.spawn()?;
        let idx = id.index() as usize;

        self.commit(idx, builder.position);
        self.commit(idx, builder.velocity);
        self.commit(idx, builder.acceleration);
        self.commit(idx, builder.color);
        self.commit(idx, builder.lifetime);
        self.commit(idx, builder.mass);
        self.commit(idx, builder.size);
        self.commit(idx, builder.emitter);
        self.commit(idx, builder.attractor);
        self.commit(idx, builder.particle);

        Some(id)
    }

    #[inline]
    fn commit<C: Stored>(&mut self, idx: usize, value: Option<C>) {
        if let Some(value) = value {
            C::storage_mut(self).set(idx, value);
            self.entities[idx].add_component(C::ID);
        }
    }

    /// Despawns an entity, freeing its slot for reuse.
    ///
    /// # Returns
    ///
    /// `true` if the entity was despawned, `false` if it was already dead
    /// or the ID was invalid/stale.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        let idx = id.index() as usize;
        let entity = &mut self.entities[idx];
        entity.alive = false;
        entity.component_mask = 0;

        let slot = self.live_slot[idx] as usize;
        self.live.swap_remove(slot);
        if let Some(&moved) = self.live.get(slot) {
            self.live_slot[moved as usize] = slot as u32;
        }
        self.free_indices.push(id.index());

        self.positions.reset(idx);
        self.velocities.reset(idx);
        self.accelerations.reset(idx);
        self.colors.reset(idx);
        self.lifetimes.reset(idx);
        self.masses.reset(idx);
        self.sizes.reset(idx);

        true
    }

    /// Checks if an entity is alive.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        if id.is_null() {
            return false;
        }

        self.entities
            .get(id.index() as usize)
            .is_some_and(|e| e.alive && e.id.generation() == id.generation())
    }

    /// Gets an entity by ID.
    ///
    /// # Returns
    ///
    /// Reference to the entity, or None if not found/dead/stale.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if !self.is_alive(id) {
            return None;
        }
        Some(&self.entities[id.index() as usize])
    }

    /// Returns the component mask of a live entity.
    #[inline]
    #[must_use]
    pub fn mask_of(&self, id: EntityId) -> Option<u64> {
        self.get(id).map(|e| e.component_mask)
    }

    /// Attaches (or overwrites) a component on a live entity.
    ///
    /// # Returns
    ///
    /// `false` if the entity is dead or stale.
    pub fn insert<C: Stored>(&mut self, id: EntityId, component: C) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.commit(id.index() as usize, Some(component));
        true
    }

    /// Detaches a component from a live entity.
    ///
    /// # Returns
    ///
    /// `true` if the component was present and is now gone.
    pub fn remove<C: Stored>(&mut self, id: EntityId) -> bool {
        if !self.has::<C>(id) {
            return false;
        }
        let idx = id.index() as usize;
        self.entities[idx].remove_component(C::ID);
        C::storage_mut(self).reset(idx);
        true
    }

    /// Checks whether a live entity carries component `C`.
    #[inline]
    #[must_use]
    pub fn has<C: Stored>(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|e| e.has_component(C::ID))
    }

    /// Typed component read.
    ///
    /// # Returns
    ///
    /// `None` if the entity is dead, stale, or lacks the component.
    #[inline]
    #[must_use]
    pub fn get_component<C: Stored>(&self, id: EntityId) -> Option<&C> {
        if !self.has::<C>(id) {
            return None;
        }
        C::storage(self).get(id.index() as usize)
    }

    /// Typed component write.
    #[inline]
    pub fn get_component_mut<C: Stored>(&mut self, id: EntityId) -> Option<&mut C> {
        if !self.has::<C>(id) {
            return None;
        }
        C::storage_mut(self).get_mut(id.index() as usize)
    }

    /// Typed component read for callers that already filtered by mask.
    ///
    /// # Panics
    ///
    /// Panics in every build profile if the entity is not alive or lacks
    /// the component. That is a query bug, not a runtime condition.
    #[inline]
    #[must_use]
    pub fn component<C: Stored>(&self, id: EntityId) -> &C {
        match self.get_component::<C>(id) {
            Some(component) => component,
            None => missing_component::<C>(id),
        }
    }

    /// Mutable counterpart of [`World::component`].
    ///
    /// # Panics
    ///
    /// Same conditions as [`World::component`].
    #[inline]
    pub fn component_mut<C: Stored>(&mut self, id: EntityId) -> &mut C {
        if !self.has::<C>(id) {
            missing_component::<C>(id);
        }
        &mut C::storage_mut(self).as_mut_slice()[id.index() as usize]
    }

    /// Collects every live entity whose mask contains `mask` into `out`.
    ///
    /// `out` is cleared first; its allocation is reused, so systems keep
    /// one scratch buffer for the whole run.
    pub fn filter_by_mask_into(&self, mask: u64, out: &mut Vec<EntityId>) {
        out.clear();
        out.extend(
            self.live
                .iter()
                .map(|&index| self.entities[index as usize])
                .filter(|e| e.matches(mask))
                .map(|e| e.id),
        );
    }

    /// Allocating variant of [`World::filter_by_mask_into`].
    #[must_use]
    pub fn filter_by_mask(&self, mask: u64) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.filter_by_mask_into(mask, &mut out);
        out
    }

    /// Counts live entities whose mask contains `mask`.
    #[must_use]
    pub fn count_matching(&self, mask: u64) -> usize {
        self.live
            .iter()
            .filter(|&&index| self.entities[index as usize].matches(mask))
            .count()
    }

    /// Despawns every entity whose mask contains `mask`.
    ///
    /// # Returns
    ///
    /// The number of entities removed.
    pub fn clear_mask(&mut self, mask: u64) -> usize {
        let doomed = self.filter_by_mask(mask);
        doomed.into_iter().filter(|&id| self.despawn(id)).count()
    }

    /// Iterates over all alive entities.
    pub fn iter_alive(&self) -> impl Iterator<Item = &Entity> {
        self.live.iter().map(|&index| &self.entities[index as usize])
    }
}

#[cold]
#[inline(never)]
fn missing_component<C: Component>(id: EntityId) -> ! {
    panic!(
        "entity {id} has no {} component (bit {})",
        std::any::type_name::<C>(),
        C::ID
    );
}
