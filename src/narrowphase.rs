use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::error::CollisionError;
use crate::geom::{Projection, normalized};
use crate::shape::WorldShape;

/// Narrowphase primitive tests.
pub struct Narrowphase;

pub(crate) fn project_vertices(vertices: &[Vec2], axis: Vec2) -> Projection {
    vertices
        .iter()
        .fold(Projection::EMPTY, |p, v| p.include(axis.dot(*v)))
}

pub(crate) fn project_circle(center: Vec2, radius: f32, axis: Vec2) -> Projection {
    let c = axis.dot(center);
    Projection::new(c - radius, c + radius)
}

pub(crate) fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| {
        let edge = vertices[i] - vertices[(i + 1) % n];
        Vec2::new(-edge.y, edge.x)
    })
}

/// Vertex closest to `p`; the first one wins ties.
fn nearest_vertex(vertices: &[Vec2], p: Vec2) -> Option<Vec2> {
    let (&first, rest) = vertices.split_first()?;
    let mut best = first;
    let mut best_dist = first.distance(p);
    for &v in rest {
        let d = v.distance(p);
        if d < best_dist {
            best = v;
            best_dist = d;
        }
    }
    Some(best)
}

impl NarrowphaseApi for Narrowphase {
    fn circle_circle(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> bool {
        c0.distance(c1) < r0 + r1
    }

    fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        // Normals stay un-normalized: both intervals scale by the same factor.
        for axis in edge_normals(a).chain(edge_normals(b)) {
            if !project_vertices(a, axis).overlaps(&project_vertices(b, axis)) {
                return false;
            }
        }
        true
    }

    fn polygon_circle(poly: &[Vec2], center: Vec2, radius: f32) -> Result<bool, CollisionError> {
        let Some(nearest) = nearest_vertex(poly, center) else {
            return Ok(false);
        };

        let axis = normalized(nearest - center)?;
        if !project_vertices(poly, axis).overlaps(&project_circle(center, radius, axis)) {
            return Ok(false);
        }

        for normal in edge_normals(poly) {
            let axis = normalized(normal)?;
            if !project_vertices(poly, axis).overlaps(&project_circle(center, radius, axis)) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn dispatch(a: &WorldShape, b: &WorldShape) -> Result<bool, CollisionError> {
        match (a, b) {
            (
                WorldShape::Circle { center: c0, radius: r0 },
                WorldShape::Circle { center: c1, radius: r1 },
            ) => Ok(Self::circle_circle(*c0, *r0, *c1, *r1)),
            (WorldShape::Polygon { vertices: va }, WorldShape::Polygon { vertices: vb }) => {
                Ok(Self::polygon_polygon(va, vb))
            }
            (WorldShape::Polygon { vertices }, WorldShape::Circle { center, radius })
            | (WorldShape::Circle { center, radius }, WorldShape::Polygon { vertices }) => {
                Self::polygon_circle(vertices, *center, *radius)
            }
        }
    }
}
