use glam::Vec2;

/// Stable index of a scene object in its transform arena.
///
/// Also serves as the owner identity of a collider: colliders sharing an
/// `ObjectId` belong to the same logical object and never notify each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

/// Handle for a collider registered with a `CollidersManager`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColliderId(pub u32);

/// World-space snapshot of one object's transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldTransform {
    pub position: Vec2,
    pub scale: Vec2,
    /// Radians.
    pub rotation: f32,
}

impl WorldTransform {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        scale: Vec2::ONE,
        rotation: 0.0,
    };

    /// Convenience constructor for an unscaled, unrotated transform.
    pub fn at(position: Vec2) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Smaller of the two scale components; circles use this as their radius factor.
    pub fn min_axis_scale(&self) -> f32 {
        self.scale.x.min(self.scale.y)
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Four world-space extreme points of a collider.
///
/// Screen convention: `up` has the smallest y, `down` the largest.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub up: Vec2,
    pub down: Vec2,
    pub left: Vec2,
    pub right: Vec2,
}

/// Shape discriminator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Polygon,
}

/// Event discriminator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionEventKind {
    Enter,
    Stay,
    Exit,
}

/// One side of a fired notification: `this` was told about `other`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionEvent {
    pub kind: CollisionEventKind,
    pub this: ColliderId,
    pub other: ColliderId,
}

/// Manager-level configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManagerConfig {
    /// Mirror every fired notification into the drainable event buffer.
    pub record_events: bool,
    /// Maximum number of buffered events between drains; extra are dropped.
    pub max_events: usize,
    /// Enable internal timing instrumentation (adds small overhead when true).
    pub enable_timing: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            record_events: true,
            max_events: 4096,
            enable_timing: false,
        }
    }
}

/// Counters for one completed update pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub colliders: usize,
    /// Pairs that passed the x-sweep filter.
    pub candidate_pairs: usize,
    /// Narrow-phase tests actually run (equals `candidate_pairs`).
    pub narrow_tests: usize,
    /// Size of the current collision set after the pass.
    pub collisions: usize,
    pub entered: usize,
    pub stayed: usize,
    pub exited: usize,
    /// Pairs skipped because their geometry could not be normalized.
    pub degenerate_pairs: usize,
}

/// Timing breakdown for the last completed update pass.
#[derive(Copy, Clone, Debug, Default)]
pub struct TickTiming {
    pub total_ms: f64,
    pub snapshot_ms: f64,
    pub sort_ms: f64,
    pub pairs_ms: f64,
    pub notify_ms: f64,
}
