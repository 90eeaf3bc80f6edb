//! clack: detection-only 2D collider engine (x-sweep broadphase, SAT narrowphase,
//! enter/stay/exit notifications; no response)

pub mod types;
pub mod error;
pub mod geom;
pub mod api;
pub mod shape;
pub mod narrowphase;
pub mod collision_set;
pub mod transform;
pub mod world;
pub mod scene;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::error::CollisionError;
pub use crate::shape::{ColliderShape, WorldShape};
pub use crate::narrowphase::Narrowphase;
pub use crate::collision_set::{Collision, CollisionSet};
pub use crate::transform::{Transform, TransformArena};
pub use crate::world::{Collider, CollidersManager, could_be_colliding};
pub use crate::scene::Scene;
