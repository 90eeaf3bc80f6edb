use std::hash::{Hash, Hasher};

use fnv::FnvHashSet;

use crate::types::ColliderId;

/// Unordered pair of colliders found overlapping.
///
/// `(a, b)` and `(b, a)` compare and hash equal; the stored order only
/// decides which side is notified first.
#[derive(Copy, Clone, Debug)]
pub struct Collision {
    a: ColliderId,
    b: ColliderId,
}

impl Collision {
    pub fn new(a: ColliderId, b: ColliderId) -> Self {
        Self { a, b }
    }

    pub fn first(&self) -> ColliderId {
        self.a
    }

    pub fn second(&self) -> ColliderId {
        self.b
    }

    pub fn contains(&self, id: ColliderId) -> bool {
        self.a == id || self.b == id
    }

    fn key(&self) -> (ColliderId, ColliderId) {
        if self.a <= self.b { (self.a, self.b) } else { (self.b, self.a) }
    }
}

impl PartialEq for Collision {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Collision {}

impl Hash for Collision {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Set of collisions for one tick, iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct CollisionSet {
    order: Vec<Collision>,
    members: FnvHashSet<Collision>,
}

impl CollisionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `c`; returns false if an equal pair was already present.
    pub fn add(&mut self, c: Collision) -> bool {
        if !self.members.insert(c) {
            return false;
        }
        self.order.push(c);
        true
    }

    /// Remove the pair equal to `c`; returns whether anything was removed.
    pub fn delete(&mut self, c: &Collision) -> bool {
        if !self.members.remove(c) {
            return false;
        }
        self.order.retain(|existing| existing != c);
        true
    }

    pub fn has(&self, c: &Collision) -> bool {
        self.members.contains(c)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Collision> {
        self.order.iter()
    }
}

impl<'a> IntoIterator for &'a CollisionSet {
    type Item = &'a Collision;
    type IntoIter = std::slice::Iter<'a, Collision>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
