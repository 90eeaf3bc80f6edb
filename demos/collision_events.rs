use clack::*;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let mut arena = TransformArena::new();
    let mut colliders = CollidersManager::new(ManagerConfig::default());

    let paddle = arena.insert(Transform::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 1.0)));
    let ball = arena.insert(Transform::at(Vec2::new(-6.0, 0.0)));
    // a sensor ring glued to the ball: same owner, never reports against it
    let ball_body = colliders.add_collider(ball, ColliderShape::circle(0.5));
    let ball_sensor = colliders.add_collider(ball, ColliderShape::circle(1.5));
    let paddle_id = colliders.add_collider(paddle, ColliderShape::square());

    println!("paddle={:?} ball={:?} sensor={:?}", paddle_id, ball_body, ball_sensor);

    let log = Rc::new(RefCell::new(Vec::new()));
    let (on_enter, on_exit) = (log.clone(), log.clone());
    let wired = colliders
        .set_on_collision_enter(paddle_id, Box::new(move |other| on_enter.borrow_mut().push(format!("paddle entered by {other:?}"))))
        .and_then(|_| {
            colliders.set_on_collision_exit(paddle_id, Box::new(move |other| on_exit.borrow_mut().push(format!("paddle left by {other:?}"))))
        });
    if let Err(e) = wired {
        eprintln!("could not attach handlers: {e}");
        return;
    }

    for frame in 0..16 {
        if let Err(e) = arena.translate(ball, Vec2::new(0.8, 0.0)) {
            eprintln!("{e}");
            return;
        }
        let stats = match colliders.update(&arena) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("update failed: {e}");
                return;
            }
        };
        if let Ok(b) = colliders.bounds(ball_sensor, &arena) {
            println!(
                "frame {:>2}: sensor x=[{:.1}, {:.1}] collisions={}",
                frame, b.left.x, b.right.x, stats.collisions
            );
        }
        for ev in colliders.drain_events() {
            println!("  {:?}: {:?} -> {:?}", ev.kind, ev.this, ev.other);
        }
    }
    for line in log.borrow().iter() {
        println!("{line}");
    }
}
