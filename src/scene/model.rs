use crate::scene::part::{LiveState, Part, PartId};

/// Ordered parts of the composite face. Order is the activation sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    parts: Vec<Part>,
}

impl Scene {
    /// The six standard parts, all Idle.
    pub fn standard() -> Self {
        Self::from_ids(&PartId::ALL)
    }

    /// Idle parts for `ids`, in the given order.
    pub fn from_ids(ids: &[PartId]) -> Self {
        Self {
            parts: ids.iter().copied().map(Part::new).collect(),
        }
    }

    /// Wrap pre-built parts, in the given order.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Parts in activation order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Return `true` when the scene has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Look a part up by identifier.
    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub(crate) fn part_mut(&mut self, index: usize) -> Option<&mut Part> {
        self.parts.get_mut(index)
    }

    /// Number of parts currently Animating; never more than one under the controller.
    pub fn animating_count(&self) -> usize {
        self.count(LiveState::Animating)
    }

    /// Number of Frozen parts.
    pub fn frozen_count(&self) -> usize {
        self.count(LiveState::Frozen)
    }

    fn count(&self, state: LiveState) -> usize {
        self.parts.iter().filter(|p| p.live == state).count()
    }

    /// Read-only view available only once every part is Frozen.
    pub fn frozen(&self) -> Option<FrozenScene<'_>> {
        (!self.parts.is_empty() && self.frozen_count() == self.parts.len())
            .then_some(FrozenScene { scene: self })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::standard()
    }
}

/// Proof that every part of a scene is Frozen.
#[derive(Clone, Copy, Debug)]
pub struct FrozenScene<'a> {
    scene: &'a Scene,
}

impl<'a> FrozenScene<'a> {
    /// Frozen parts in activation order.
    pub fn parts(&self) -> &'a [Part] {
        self.scene.parts()
    }

    /// The underlying scene.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
