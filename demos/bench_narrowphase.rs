use clack::*;
use glam::Vec2;
use std::time::Instant;

fn main() {
    let n = 1_000_000u32;
    let square = match ColliderShape::square().to_world(&WorldTransform {
        position: Vec2::ZERO,
        scale: Vec2::splat(2.0),
        rotation: 0.3,
    }) {
        WorldShape::Polygon { vertices } => vertices,
        WorldShape::Circle { .. } => return,
    };

    let mut hits = 0u32;
    let start = Instant::now();
    for i in 0..n {
        let t = (i as f32) * 0.001;
        let c = Vec2::new(-3.0 + 2.0 * t.sin(), 0.5 * t.cos());
        if Narrowphase::circle_circle(c, 1.0, Vec2::ZERO, 1.0) {
            hits += 1;
        }
    }
    println!("circle_circle {} iters in {:?} hits={}", n, start.elapsed(), hits);

    let mut hits = 0u32;
    let start = Instant::now();
    for i in 0..n {
        let t = (i as f32) * 0.001;
        let offset = Vec2::new(-3.0 + 2.0 * t.sin(), 0.5 * t.cos());
        let moved: Vec<Vec2> = square.iter().map(|v| *v + offset).collect();
        if Narrowphase::polygon_polygon(&square, &moved) {
            hits += 1;
        }
    }
    println!("polygon_polygon {} iters in {:?} hits={}", n, start.elapsed(), hits);

    let mut hits = 0u32;
    let mut degenerate = 0u32;
    let start = Instant::now();
    for i in 0..n {
        let t = (i as f32) * 0.001;
        let c = Vec2::new(-3.0 + 2.0 * t.sin(), 0.5 * t.cos());
        match Narrowphase::polygon_circle(&square, c, 1.0) {
            Ok(true) => hits += 1,
            Ok(false) => {}
            Err(_) => degenerate += 1,
        }
    }
    println!(
        "polygon_circle {} iters in {:?} hits={} degenerate={}",
        n,
        start.elapsed(),
        hits,
        degenerate
    );
}
