//! Arena of transform records with parent links by index.
//!
//! World position composes additively: a child's position is NOT rotated or
//! scaled by its parent. Scale multiplies component-wise and rotation adds.

use glam::Vec2;

use crate::api::TransformSource;
use crate::error::CollisionError;
use crate::types::{ObjectId, WorldTransform};

/// Local transform of one scene object.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub local_position: Vec2,
    pub local_scale: Vec2,
    /// Radians.
    pub local_rotation: f32,
    parent: Option<ObjectId>,
}

impl Transform {
    pub fn new(local_position: Vec2, local_scale: Vec2) -> Self {
        Self {
            local_position,
            local_scale,
            local_rotation: 0.0,
            parent: None,
        }
    }

    pub fn at(local_position: Vec2) -> Self {
        Self::new(local_position, Vec2::ONE)
    }

    pub fn with_rotation(mut self, local_rotation: f32) -> Self {
        self.local_rotation = local_rotation;
        self
    }

    /// Parent link; changed only through [`TransformArena::set_parent`].
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec2::ONE, Vec2::ONE)
    }
}

/// Owns every transform of one scene; `ObjectId` is the slot index.
#[derive(Clone, Debug, Default)]
pub struct TransformArena {
    records: Vec<Transform>,
}

impl TransformArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root record.
    pub fn insert(&mut self, mut t: Transform) -> ObjectId {
        t.parent = None;
        let id = ObjectId(self.records.len() as u32);
        self.records.push(t);
        id
    }

    /// Add a record under an existing `parent`. A fresh id cannot close a cycle.
    pub fn insert_child(&mut self, parent: ObjectId, mut t: Transform) -> Result<ObjectId, CollisionError> {
        self.check(parent)?;
        t.parent = Some(parent);
        let id = ObjectId(self.records.len() as u32);
        self.records.push(t);
        Ok(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Transform> {
        self.records.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.records.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Link `child` under `parent` (or detach it with `None`).
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) -> Result<(), CollisionError> {
        self.check(child)?;
        if let Some(p) = parent {
            self.check(p)?;
            let mut cursor = Some(p);
            while let Some(ancestor) = cursor {
                if ancestor == child {
                    return Err(CollisionError::TransformCycle { child, parent: p });
                }
                cursor = self.records[ancestor.0 as usize].parent;
            }
        }
        self.records[child.0 as usize].parent = parent;
        Ok(())
    }

    pub fn translate(&mut self, id: ObjectId, delta: Vec2) -> Result<(), CollisionError> {
        let t = self.get_mut(id).ok_or(CollisionError::UnknownObject(id))?;
        t.local_position += delta;
        Ok(())
    }

    pub fn rotate(&mut self, id: ObjectId, angle: f32) -> Result<(), CollisionError> {
        let t = self.get_mut(id).ok_or(CollisionError::UnknownObject(id))?;
        t.local_rotation += angle;
        Ok(())
    }

    pub fn world_position(&self, id: ObjectId) -> Option<Vec2> {
        self.fold_chain(id, Vec2::ZERO, |acc, t| acc + t.local_position)
    }

    pub fn world_scale(&self, id: ObjectId) -> Option<Vec2> {
        self.fold_chain(id, Vec2::ONE, |acc, t| acc * t.local_scale)
    }

    pub fn world_rotation(&self, id: ObjectId) -> Option<f32> {
        self.fold_chain(id, 0.0, |acc, t| acc + t.local_rotation)
    }

    pub fn min_axis_scale(&self, id: ObjectId) -> Option<f32> {
        self.world_scale(id).map(|s| s.x.min(s.y))
    }

    /// Position, scale and rotation in a single walk up the chain.
    pub fn world(&self, id: ObjectId) -> Option<WorldTransform> {
        self.fold_chain(id, WorldTransform::IDENTITY, |acc, t| WorldTransform {
            position: acc.position + t.local_position,
            scale: acc.scale * t.local_scale,
            rotation: acc.rotation + t.local_rotation,
        })
    }

    fn check(&self, id: ObjectId) -> Result<(), CollisionError> {
        if (id.0 as usize) < self.records.len() {
            Ok(())
        } else {
            Err(CollisionError::UnknownObject(id))
        }
    }

    fn fold_chain<A>(&self, id: ObjectId, init: A, mut f: impl FnMut(A, &Transform) -> A) -> Option<A> {
        let mut acc = init;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let t = self.get(current)?;
            acc = f(acc, t);
            cursor = t.parent;
        }
        Some(acc)
    }
}

impl TransformSource for TransformArena {
    fn world_transform(&self, id: ObjectId) -> Option<WorldTransform> {
        self.world(id)
    }
}
