use glam::Vec2;

use crate::error::CollisionError;
use crate::shape::{ColliderShape, WorldShape};
use crate::types::*;

/// Read-only view of the object hierarchy the engine needs each pass.
pub trait TransformSource {
    /// World-space transform of `id`, or `None` if the object is unknown.
    fn world_transform(&self, id: ObjectId) -> Option<WorldTransform>;
}

/// Boxed per-collider notification handler. Receives the other collider of the pair.
pub type CollisionHandler = Box<dyn FnMut(ColliderId)>;

/// Public API contract for the per-scene collider manager.
pub trait CollidersManagerApi {
    /// Construct a fresh manager with the given configuration.
    fn new(cfg: ManagerConfig) -> Self
    where
        Self: Sized;

    // --- Lifecycle ---------------------------------------------------------

    /// Drop every collider, both collision sets and buffered events.
    fn reset(&mut self);

    /// Register a collider owned by `owner` and return its handle.
    fn add_collider(&mut self, owner: ObjectId, shape: ColliderShape) -> ColliderId;

    /// Run one full pass: broad phase, narrow phase, diff and notify.
    fn update<T: TransformSource>(&mut self, transforms: &T) -> Result<TickStats, CollisionError>;

    /// Drain and return the events recorded since the last drain.
    fn drain_events(&mut self) -> Vec<CollisionEvent>;

    // --- Handlers ----------------------------------------------------------

    fn set_on_collision_enter(&mut self, id: ColliderId, handler: CollisionHandler) -> Result<(), CollisionError>;
    fn set_on_collision_stay(&mut self, id: ColliderId, handler: CollisionHandler) -> Result<(), CollisionError>;
    fn set_on_collision_exit(&mut self, id: ColliderId, handler: CollisionHandler) -> Result<(), CollisionError>;

    // --- Queries -----------------------------------------------------------

    /// World-space extreme points of a collider, for debug overlays.
    fn bounds<T: TransformSource>(&self, id: ColliderId, transforms: &T) -> Result<Bounds, CollisionError>;

    /// Whether `a` and `b` were found colliding by the last pass.
    fn is_colliding(&self, a: ColliderId, b: ColliderId) -> bool;
}

/// Exact pairwise intersection tests.
pub trait NarrowphaseApi {
    /// Strict: touching circles do not collide.
    fn circle_circle(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> bool;

    /// Separating-axis test over both polygons' edge normals.
    fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> bool;

    /// Nearest-vertex axis plus every edge normal.
    fn polygon_circle(poly: &[Vec2], center: Vec2, radius: f32) -> Result<bool, CollisionError>;

    /// Pick the test matching both shapes' kinds.
    fn dispatch(a: &WorldShape, b: &WorldShape) -> Result<bool, CollisionError>;
}
