use crate::types::{ColliderId, ObjectId};

/// Errors surfaced by the collider engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Attempted to normalize a vector of length exactly zero.
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthNormalize,

    /// No transform record exists for the given object.
    #[error("unknown object: {0:?}")]
    UnknownObject(ObjectId),

    /// The collider handle does not belong to this manager activation.
    #[error("unknown collider: {0:?}")]
    UnknownCollider(ColliderId),

    /// Linking `child` under `parent` would make the hierarchy cyclic.
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    TransformCycle { child: ObjectId, parent: ObjectId },

    /// A polygon preset received fewer vertices than it needs.
    #[error("{shape} collider needs {expected} vertices, got {found}")]
    TooFewVertices {
        shape: &'static str,
        expected: usize,
        found: usize,
    },
}
