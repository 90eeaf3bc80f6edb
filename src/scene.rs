//! One scene: a transform arena, its collider manager and an init routine.

use log::debug;

use crate::api::CollidersManagerApi;
use crate::error::CollisionError;
use crate::shape::ColliderShape;
use crate::transform::{Transform, TransformArena};
use crate::types::{ColliderId, ManagerConfig, ObjectId, TickStats};
use crate::world::CollidersManager;

type InitFn = Box<dyn FnMut(&mut Scene)>;

pub struct Scene {
    pub transforms: TransformArena,
    pub colliders: CollidersManager,
    init: Option<InitFn>,
    started: bool,
}

impl Scene {
    /// `init` populates the scene; it runs on every `start`/`restart`.
    pub fn new(cfg: ManagerConfig, init: impl FnMut(&mut Scene) + 'static) -> Self {
        Self {
            transforms: TransformArena::new(),
            colliders: CollidersManager::new(cfg),
            init: Some(Box::new(init)),
            started: false,
        }
    }

    pub fn start(&mut self) {
        self.transforms.clear();
        self.colliders.reset();
        // take the closure out so it can borrow the scene mutably
        if let Some(mut init) = self.init.take() {
            init(self);
            self.init = Some(init);
        }
        self.started = true;
        debug!(
            "scene started: {} objects, {} colliders",
            self.transforms.len(),
            self.colliders.collider_count()
        );
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Run one collision pass over this scene's own transforms.
    pub fn tick(&mut self) -> Result<TickStats, CollisionError> {
        self.colliders.update(&self.transforms)
    }

    pub fn spawn(&mut self, transform: Transform) -> ObjectId {
        self.transforms.insert(transform)
    }

    pub fn attach(&mut self, owner: ObjectId, shape: ColliderShape) -> ColliderId {
        self.colliders.add_collider(owner, shape)
    }
}
