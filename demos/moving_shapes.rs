use clack::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;
const N: usize = 200;
const TICKS: u32 = 600;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // (object, velocity) for everything the init routine spawned
    let movers: Rc<RefCell<Vec<(ObjectId, Vec2)>>> = Rc::new(RefCell::new(Vec::new()));
    let spawned = movers.clone();
    let mut scene = Scene::new(
        ManagerConfig {
            record_events: true,
            max_events: 1_000_000,
            enable_timing: true,
        },
        move |scene| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut movers = spawned.borrow_mut();
            movers.clear();
            for i in 0..N {
                let pos = Vec2::new(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT));
                let size = rng.gen_range(8.0..24.0);
                let t = Transform::new(pos, Vec2::splat(size)).with_rotation(rng.gen_range(0.0..std::f32::consts::TAU));
                let obj = scene.spawn(t);
                let shape = match i % 3 {
                    0 => ColliderShape::square(),
                    1 => ColliderShape::triangle(),
                    _ => ColliderShape::circle(0.5),
                };
                scene.attach(obj, shape);
                let vel = Vec2::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
                movers.push((obj, vel));
            }
        },
    );
    scene.start();

    let (mut entered, mut exited) = (0usize, 0usize);
    for tick in 1..=TICKS {
        for (obj, vel) in movers.borrow_mut().iter_mut() {
            let Some(t) = scene.transforms.get_mut(*obj) else { continue };
            t.local_position += *vel;
            t.local_rotation += 0.01;
            if t.local_position.x < 0.0 || t.local_position.x > WIDTH {
                vel.x = -vel.x;
            }
            if t.local_position.y < 0.0 || t.local_position.y > HEIGHT {
                vel.y = -vel.y;
            }
        }

        let stats = match scene.tick() {
            Ok(s) => s,
            Err(e) => {
                log::error!("tick {tick} failed: {e}");
                return;
            }
        };
        entered += stats.entered;
        exited += stats.exited;
        scene.colliders.drain_events();

        if tick % 120 == 0 {
            let t = scene.colliders.timing().unwrap_or_default();
            println!(
                "tick {:>4}: colliders={} candidates={} collisions={} total={:.3}ms (snapshot={:.3}ms sort={:.3}ms pairs={:.3}ms notify={:.3}ms)",
                tick,
                stats.colliders,
                stats.candidate_pairs,
                stats.collisions,
                t.total_ms,
                t.snapshot_ms,
                t.sort_ms,
                t.pairs_ms,
                t.notify_ms
            );
        }
    }
    println!("{} enters, {} exits over {} ticks", entered, exited, TICKS);

    scene.restart();
    println!("restarted with {} colliders", scene.colliders.collider_count());
}
