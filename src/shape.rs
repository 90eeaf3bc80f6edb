use glam::Vec2;
use log::{error, warn};

use crate::error::CollisionError;
use crate::geom::{Projection, horizontal, rotated, vertical};
use crate::narrowphase::{edge_normals, project_circle, project_vertices};
use crate::types::{Bounds, ShapeKind, WorldTransform};

const TRIANGLE_PRESET: [Vec2; 3] = [
    Vec2::new(0.0, -0.5),
    Vec2::new(-0.5, 0.5),
    Vec2::new(0.5, 0.5),
];

const SQUARE_PRESET: [Vec2; 4] = [
    Vec2::new(0.5, -0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(-0.5, 0.5),
    Vec2::new(-0.5, -0.5),
];

/// Local-space collider geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum ColliderShape {
    /// Circle centered on the owner; world radius is scaled by the smaller axis scale.
    Circle { local_radius: f32 },
    /// Convex vertex ring in local space. Ring order is insertion order.
    Polygon { vertices: Vec<Vec2> },
}

impl ColliderShape {
    pub fn circle(local_radius: f32) -> Self {
        Self::Circle { local_radius }
    }

    /// Arbitrary convex polygon. Convexity is not checked.
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        if vertices.is_empty() {
            warn!("polygon collider created with no vertices; it will never collide");
        }
        Self::Polygon { vertices }
    }

    /// Unit triangle centered on the owner.
    pub fn triangle() -> Self {
        Self::Polygon { vertices: TRIANGLE_PRESET.to_vec() }
    }

    /// Unit square centered on the owner.
    pub fn square() -> Self {
        Self::Polygon { vertices: SQUARE_PRESET.to_vec() }
    }

    /// Triangle with a custom ring. Fewer than 3 vertices is reported and then accepted.
    pub fn triangle_with(vertices: Vec<Vec2>) -> Self {
        if let Err(e) = check_count("triangle", 3, &vertices) {
            error!("{e}");
        }
        Self::Polygon { vertices }
    }

    /// Square with a custom ring. Fewer than 4 vertices is reported and then accepted.
    pub fn square_with(vertices: Vec<Vec2>) -> Self {
        if let Err(e) = check_count("square", 4, &vertices) {
            error!("{e}");
        }
        Self::Polygon { vertices }
    }

    /// Like [`ColliderShape::triangle_with`] but rejects short rings.
    pub fn try_triangle_with(vertices: Vec<Vec2>) -> Result<Self, CollisionError> {
        check_count("triangle", 3, &vertices)?;
        Ok(Self::Polygon { vertices })
    }

    /// Like [`ColliderShape::square_with`] but rejects short rings.
    pub fn try_square_with(vertices: Vec<Vec2>) -> Result<Self, CollisionError> {
        check_count("square", 4, &vertices)?;
        Ok(Self::Polygon { vertices })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Circle { .. } => 0,
            Self::Polygon { vertices } => vertices.len(),
        }
    }

    /// Derive world-space geometry from the owner's current transform.
    ///
    /// Polygon vertices are scaled, then rotated, then translated.
    pub fn to_world(&self, t: &WorldTransform) -> WorldShape {
        match self {
            Self::Circle { local_radius } => WorldShape::Circle {
                center: t.position,
                radius: local_radius * t.min_axis_scale(),
            },
            Self::Polygon { vertices } => WorldShape::Polygon {
                vertices: vertices
                    .iter()
                    .map(|&v| rotated(v * t.scale, t.rotation) + t.position)
                    .collect(),
            },
        }
    }
}

fn check_count(shape: &'static str, expected: usize, vertices: &[Vec2]) -> Result<(), CollisionError> {
    if vertices.len() < expected {
        return Err(CollisionError::TooFewVertices {
            shape,
            expected,
            found: vertices.len(),
        });
    }
    Ok(())
}

/// Collider geometry resolved into world space for one pass.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldShape {
    Circle { center: Vec2, radius: f32 },
    Polygon { vertices: Vec<Vec2> },
}

impl WorldShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Extreme points along x and y. A polygon without vertices reports all zeros.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Circle { center, radius } => Bounds {
                up: *center - vertical(*radius),
                down: *center + vertical(*radius),
                left: *center - horizontal(*radius),
                right: *center + horizontal(*radius),
            },
            Self::Polygon { vertices } => {
                let Some(&first) = vertices.first() else {
                    warn!("bounds of a polygon with no vertices; using the origin");
                    return Bounds::default();
                };
                let mut b = Bounds { up: first, down: first, left: first, right: first };
                for &v in &vertices[1..] {
                    if v.x < b.left.x {
                        b.left = v;
                    }
                    if v.x > b.right.x {
                        b.right = v;
                    }
                    if v.y > b.down.y {
                        b.down = v;
                    }
                    if v.y < b.up.y {
                        b.up = v;
                    }
                }
                b
            }
        }
    }

    /// One un-normalized normal per edge, in ring order. Circles have none.
    pub fn normals(&self) -> Vec<Vec2> {
        match self {
            Self::Circle { .. } => Vec::new(),
            Self::Polygon { vertices } => edge_normals(vertices).collect(),
        }
    }

    /// Interval covered by this shape along `axis`.
    pub fn project(&self, axis: Vec2) -> Projection {
        match self {
            Self::Circle { center, radius } => project_circle(*center, *radius, axis),
            Self::Polygon { vertices } => project_vertices(vertices, axis),
        }
    }
}
