use glam::Vec2;
use log::{debug, trace, warn};

use std::fmt::{Debug, Formatter};
use std::time::Instant;

use crate::api::{CollidersManagerApi, CollisionHandler, NarrowphaseApi, TransformSource};
use crate::collision_set::{Collision, CollisionSet};
use crate::error::CollisionError;
use crate::narrowphase::Narrowphase;
use crate::shape::{ColliderShape, WorldShape};
use crate::types::*;

/// A registered collider: owner, local shape and notification handlers.
pub struct Collider {
    owner: ObjectId,
    shape: ColliderShape,
    on_enter: Option<CollisionHandler>,
    on_stay: Option<CollisionHandler>,
    on_exit: Option<CollisionHandler>,
}

impl Collider {
    fn new(owner: ObjectId, shape: ColliderShape) -> Self {
        Self {
            owner,
            shape,
            on_enter: None,
            on_stay: None,
            on_exit: None,
        }
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    fn handler(&mut self, kind: CollisionEventKind) -> Option<&mut CollisionHandler> {
        match kind {
            CollisionEventKind::Enter => self.on_enter.as_mut(),
            CollisionEventKind::Stay => self.on_stay.as_mut(),
            CollisionEventKind::Exit => self.on_exit.as_mut(),
        }
    }
}

impl Debug for Collider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider")
            .field("owner", &self.owner)
            .field("shape", &self.shape)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_stay", &self.on_stay.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

/// Per-pass world-space view of one collider.
struct Entry {
    id: ColliderId,
    center: Vec2,
    radius: f32,
    shape: WorldShape,
    bounds: Bounds,
}

/// Weak x-only accept filter for a pair in x-sorted order.
///
/// Only checks that `second` starts before `first` ends; it never rejects a
/// pair that actually overlaps, but accepts many that do not.
pub fn could_be_colliding(first: &Bounds, second: &Bounds) -> bool {
    second.left.x <= first.right.x
}

/// Per-scene collider registry and enter/stay/exit state machine.
pub struct CollidersManager {
    pub cfg: ManagerConfig,
    pub tick_counter: u32,

    colliders: Vec<Collider>,
    // x-sorted iteration order of the last pass
    order: Vec<ColliderId>,

    previous: CollisionSet,
    current: CollisionSet,

    // true until a non-circle collider is registered
    all_circles: bool,

    events: Vec<CollisionEvent>,
    last_stats: TickStats,
    last_timing: Option<TickTiming>,
}

impl CollidersManagerApi for CollidersManager {
    fn new(cfg: ManagerConfig) -> Self {
        Self {
            cfg,
            tick_counter: 0,
            colliders: Vec::new(),
            order: Vec::new(),
            previous: CollisionSet::new(),
            current: CollisionSet::new(),
            all_circles: true,
            events: Vec::new(),
            last_stats: TickStats::default(),
            last_timing: None,
        }
    }

    fn reset(&mut self) {
        debug!("resetting collider manager ({} colliders dropped)", self.colliders.len());
        self.colliders.clear();
        self.order.clear();
        self.previous.clear();
        self.current.clear();
        self.all_circles = true;
        self.events.clear();
        self.last_stats = TickStats::default();
        self.last_timing = None;
        self.tick_counter = 0;
    }

    fn add_collider(&mut self, owner: ObjectId, shape: ColliderShape) -> ColliderId {
        let id = ColliderId(self.colliders.len() as u32);
        if !shape.is_circle() {
            self.all_circles = false;
        }
        trace!("registered {:?} ({:?}) on {:?}", id, shape.kind(), owner);
        self.colliders.push(Collider::new(owner, shape));
        self.order.push(id);
        id
    }

    fn update<T: TransformSource>(&mut self, transforms: &T) -> Result<TickStats, CollisionError> {
        let t_all = self.cfg.enable_timing.then(Instant::now);
        let mut timing = TickTiming::default();

        // Resolve geometry first so a missing transform leaves the sets untouched.
        let t0 = self.cfg.enable_timing.then(Instant::now);
        // Walk last pass's order so ties on x keep their previous ranking.
        let mut entries = Vec::with_capacity(self.order.len());
        for &id in &self.order {
            let c = &self.colliders[id.0 as usize];
            let t = transforms
                .world_transform(c.owner)
                .ok_or(CollisionError::UnknownObject(c.owner))?;
            let shape = c.shape.to_world(&t);
            let radius = match shape {
                WorldShape::Circle { radius, .. } => radius,
                WorldShape::Polygon { .. } => 0.0,
            };
            entries.push(Entry {
                id,
                center: t.position,
                radius,
                bounds: shape.bounds(),
                shape,
            });
        }
        timing.snapshot_ms = elapsed_ms(t0);

        self.tick_counter = self.tick_counter.wrapping_add(1);
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();

        let t1 = self.cfg.enable_timing.then(Instant::now);
        entries.sort_by(|a, b| a.center.x.total_cmp(&b.center.x));
        self.order.clear();
        self.order.extend(entries.iter().map(|e| e.id));
        timing.sort_ms = elapsed_ms(t1);

        let mut stats = TickStats {
            colliders: entries.len(),
            ..Default::default()
        };

        let t2 = self.cfg.enable_timing.then(Instant::now);
        for i in 0..entries.len() {
            for k in (i + 1)..entries.len() {
                let (a, b) = (&entries[i], &entries[k]);
                if !could_be_colliding(&a.bounds, &b.bounds) {
                    continue;
                }
                stats.candidate_pairs += 1;
                stats.narrow_tests += 1;

                let hit = if self.all_circles {
                    Ok(Narrowphase::circle_circle(a.center, a.radius, b.center, b.radius))
                } else {
                    Narrowphase::dispatch(&a.shape, &b.shape)
                };
                match hit {
                    Ok(true) => {
                        self.current.add(Collision::new(a.id, b.id));
                    }
                    Ok(false) => {}
                    Err(e) => {
                        stats.degenerate_pairs += 1;
                        warn!("skipping pair {:?}/{:?}: {e}", a.id, b.id);
                    }
                }
            }
        }
        timing.pairs_ms = elapsed_ms(t2);

        let t3 = self.cfg.enable_timing.then(Instant::now);
        self.notify_all(&mut stats);
        timing.notify_ms = elapsed_ms(t3);

        stats.collisions = self.current.len();
        if let Some(t_all) = t_all {
            timing.total_ms = t_all.elapsed().as_secs_f64() * 1000.0;
            self.last_timing = Some(timing);
        }
        debug!(
            "tick {}: {} colliders, {} candidates, {} collisions (+{} ={} -{})",
            self.tick_counter,
            stats.colliders,
            stats.candidate_pairs,
            stats.collisions,
            stats.entered,
            stats.stayed,
            stats.exited
        );
        self.last_stats = stats;
        Ok(stats)
    }

    fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_on_collision_enter(&mut self, id: ColliderId, handler: CollisionHandler) -> Result<(), CollisionError> {
        self.collider_mut(id)?.on_enter = Some(handler);
        Ok(())
    }

    fn set_on_collision_stay(&mut self, id: ColliderId, handler: CollisionHandler) -> Result<(), CollisionError> {
        self.collider_mut(id)?.on_stay = Some(handler);
        Ok(())
    }

    fn set_on_collision_exit(&mut self, id: ColliderId, handler: CollisionHandler) -> Result<(), CollisionError> {
        self.collider_mut(id)?.on_exit = Some(handler);
        Ok(())
    }

    fn bounds<T: TransformSource>(&self, id: ColliderId, transforms: &T) -> Result<Bounds, CollisionError> {
        let c = self.collider(id).ok_or(CollisionError::UnknownCollider(id))?;
        let t = transforms
            .world_transform(c.owner)
            .ok_or(CollisionError::UnknownObject(c.owner))?;
        Ok(c.shape.to_world(&t).bounds())
    }

    fn is_colliding(&self, a: ColliderId, b: ColliderId) -> bool {
        self.current.has(&Collision::new(a, b))
    }
}

impl CollidersManager {
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id.0 as usize)
    }

    fn collider_mut(&mut self, id: ColliderId) -> Result<&mut Collider, CollisionError> {
        self.colliders
            .get_mut(id.0 as usize)
            .ok_or(CollisionError::UnknownCollider(id))
    }

    /// Replace a collider's shape. A non-circle shape disables the all-circles fast path.
    pub fn set_shape(&mut self, id: ColliderId, shape: ColliderShape) -> Result<(), CollisionError> {
        let c = self.collider_mut(id)?;
        let is_circle = shape.is_circle();
        c.shape = shape;
        if !is_circle {
            self.all_circles = false;
        }
        Ok(())
    }

    /// Remove all three handlers from a collider.
    pub fn clear_handlers(&mut self, id: ColliderId) -> Result<(), CollisionError> {
        let c = self.collider_mut(id)?;
        c.on_enter = None;
        c.on_stay = None;
        c.on_exit = None;
        Ok(())
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn all_circles(&self) -> bool {
        self.all_circles
    }

    /// Iteration order of the last pass (ascending owner world x).
    pub fn sorted_colliders(&self) -> &[ColliderId] {
        &self.order
    }

    pub fn current_collisions(&self) -> &CollisionSet {
        &self.current
    }

    pub fn previous_collisions(&self) -> &CollisionSet {
        &self.previous
    }

    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }

    /// Return timing breakdown for the last `update` run.
    pub fn timing(&self) -> Option<TickTiming> {
        self.last_timing
    }

    fn notify_all(&mut self, stats: &mut TickStats) {
        let Self {
            cfg,
            colliders,
            previous,
            current,
            events,
            ..
        } = self;
        let mut dropped = 0usize;

        for c in current.iter() {
            let kind = if previous.has(c) {
                CollisionEventKind::Stay
            } else {
                CollisionEventKind::Enter
            };
            if notify(colliders, events, cfg, c, kind, &mut dropped) {
                match kind {
                    CollisionEventKind::Enter => stats.entered += 1,
                    _ => stats.stayed += 1,
                }
            }
        }
        for c in previous.iter() {
            if !current.has(c) && notify(colliders, events, cfg, c, CollisionEventKind::Exit, &mut dropped) {
                stats.exited += 1;
            }
        }

        if dropped > 0 {
            debug!("event buffer full ({}); dropped {dropped} events", cfg.max_events);
        }
    }
}

/// Fire `kind` on both sides of `c`. Returns false for pairs sharing an owner,
/// which never notify.
fn notify(
    colliders: &mut [Collider],
    events: &mut Vec<CollisionEvent>,
    cfg: &ManagerConfig,
    c: &Collision,
    kind: CollisionEventKind,
    dropped: &mut usize,
) -> bool {
    let (a, b) = (c.first(), c.second());
    if colliders[a.0 as usize].owner == colliders[b.0 as usize].owner {
        return false;
    }
    for (this, other) in [(a, b), (b, a)] {
        if let Some(handler) = colliders[this.0 as usize].handler(kind) {
            handler(other);
        }
        if cfg.record_events {
            if events.len() < cfg.max_events {
                events.push(CollisionEvent { kind, this, other });
            } else {
                *dropped += 1;
            }
        }
    }
    true
}

fn elapsed_ms(start: Option<Instant>) -> f64 {
    start.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Transform, TransformArena};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cfg() -> ManagerConfig {
        ManagerConfig {
            record_events: true,
            max_events: 1024,
            enable_timing: false,
        }
    }

    fn spawn(arena: &mut TransformArena, x: f32, y: f32, scale: f32) -> ObjectId {
        arena.insert(Transform::new(Vec2::new(x, y), Vec2::splat(scale)))
    }

    type Log = Rc<RefCell<Vec<(CollisionEventKind, ColliderId)>>>;

    fn record_all(m: &mut CollidersManager, id: ColliderId) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let (l0, l1, l2) = (log.clone(), log.clone(), log.clone());
        m.set_on_collision_enter(id, Box::new(move |o| l0.borrow_mut().push((CollisionEventKind::Enter, o))))
            .unwrap();
        m.set_on_collision_stay(id, Box::new(move |o| l1.borrow_mut().push((CollisionEventKind::Stay, o))))
            .unwrap();
        m.set_on_collision_exit(id, Box::new(move |o| l2.borrow_mut().push((CollisionEventKind::Exit, o))))
            .unwrap();
        log
    }

    #[test]
    fn test_three_circles_single_pair() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let ids: Vec<_> = [0.0, 5.0, 100.0]
            .into_iter()
            .map(|x| {
                let owner = spawn(&mut arena, x, 0.0, 1.0);
                m.add_collider(owner, ColliderShape::circle(10.0))
            })
            .collect();
        let stats = m.update(&arena).unwrap();
        assert_eq!(stats.collisions, 1);
        assert!(m.is_colliding(ids[0], ids[1]));
        assert!(m.is_colliding(ids[1], ids[0]));
        assert!(!m.is_colliding(ids[1], ids[2]));
        assert!(!m.is_colliding(ids[0], ids[2]));
    }

    #[test]
    fn test_enter_stay_exit_lifecycle() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let oa = spawn(&mut arena, 0.0, 0.0, 1.0);
        let ob = spawn(&mut arena, 15.0, 0.0, 1.0);
        let a = m.add_collider(oa, ColliderShape::circle(10.0));
        let b = m.add_collider(ob, ColliderShape::circle(10.0));
        let log_a = record_all(&mut m, a);
        let log_b = record_all(&mut m, b);

        let s1 = m.update(&arena).unwrap();
        assert_eq!((s1.entered, s1.stayed, s1.exited), (1, 0, 0));
        assert_eq!(*log_a.borrow(), vec![(CollisionEventKind::Enter, b)]);
        assert_eq!(*log_b.borrow(), vec![(CollisionEventKind::Enter, a)]);

        let s2 = m.update(&arena).unwrap();
        assert_eq!((s2.entered, s2.stayed, s2.exited), (0, 1, 0));
        assert_eq!(log_a.borrow().last(), Some(&(CollisionEventKind::Stay, b)));

        arena.translate(ob, Vec2::new(100.0, 0.0)).unwrap();
        let s3 = m.update(&arena).unwrap();
        assert_eq!((s3.entered, s3.stayed, s3.exited), (0, 0, 1));
        assert_eq!(log_b.borrow().last(), Some(&(CollisionEventKind::Exit, a)));

        let s4 = m.update(&arena).unwrap();
        assert_eq!((s4.entered, s4.stayed, s4.exited), (0, 0, 0));
        assert_eq!(log_a.borrow().len(), 3);
        assert_eq!(log_b.borrow().len(), 3);

        let kinds: Vec<_> = m.drain_events().into_iter().map(|e| (e.kind, e.this)).collect();
        assert_eq!(
            kinds,
            vec![
                (CollisionEventKind::Enter, a),
                (CollisionEventKind::Enter, b),
                (CollisionEventKind::Stay, a),
                (CollisionEventKind::Stay, b),
                (CollisionEventKind::Exit, a),
                (CollisionEventKind::Exit, b),
            ]
        );
        assert!(m.drain_events().is_empty());
    }

    #[test]
    fn test_same_owner_never_notifies() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let owner = spawn(&mut arena, 0.0, 0.0, 10.0);
        let a = m.add_collider(owner, ColliderShape::square());
        let b = m.add_collider(owner, ColliderShape::circle(0.5));
        let log_a = record_all(&mut m, a);
        let log_b = record_all(&mut m, b);

        for _ in 0..3 {
            let stats = m.update(&arena).unwrap();
            assert_eq!(stats.entered + stats.stayed + stats.exited, 0);
        }
        // the pair still occupies a set slot
        assert!(m.is_colliding(a, b));
        assert!(log_a.borrow().is_empty());
        assert!(log_b.borrow().is_empty());
        assert!(m.drain_events().is_empty());
    }

    #[test]
    fn test_mixed_shapes_collide() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let sq = m.add_collider(spawn(&mut arena, 0.0, 0.0, 20.0), ColliderShape::square());
        let tri = m.add_collider(spawn(&mut arena, 25.0, 0.0, 20.0), ColliderShape::triangle());
        let ball = m.add_collider(spawn(&mut arena, -14.0, 0.0, 1.0), ColliderShape::circle(5.0));
        let far = m.add_collider(spawn(&mut arena, 200.0, 0.0, 1.0), ColliderShape::circle(5.0));
        assert!(!m.all_circles());

        m.update(&arena).unwrap();
        // square spans x in [-10, 10]; triangle's left corner reaches 25 - 10 = 15
        assert!(!m.is_colliding(sq, tri));
        assert!(m.is_colliding(sq, ball));
        assert!(!m.is_colliding(ball, far));

        arena.translate(ObjectId(1), Vec2::new(-10.0, 0.0)).unwrap();
        m.update(&arena).unwrap();
        assert!(m.is_colliding(sq, tri));
    }

    #[test]
    fn test_sorted_by_world_x() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let c = m.add_collider(spawn(&mut arena, 30.0, 0.0, 1.0), ColliderShape::circle(1.0));
        let a = m.add_collider(spawn(&mut arena, -5.0, 0.0, 1.0), ColliderShape::circle(1.0));
        let b = m.add_collider(spawn(&mut arena, 2.0, 9.0, 1.0), ColliderShape::circle(1.0));
        assert_eq!(m.sorted_colliders(), &[c, a, b]);
        m.update(&arena).unwrap();
        assert_eq!(m.sorted_colliders(), &[a, b, c]);
    }

    #[test]
    fn test_ties_on_x_keep_previous_order() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let oa = spawn(&mut arena, 5.0, 0.0, 1.0);
        let ob = spawn(&mut arena, 0.0, 0.0, 1.0);
        let a = m.add_collider(oa, ColliderShape::circle(10.0));
        let b = m.add_collider(ob, ColliderShape::circle(10.0));

        m.update(&arena).unwrap();
        assert_eq!(m.sorted_colliders(), &[b, a]);
        let firsts: Vec<_> = m.drain_events().into_iter().map(|e| e.this).collect();
        assert_eq!(firsts, vec![b, a]);

        // a now ties with b on x; the previous ranking wins
        arena.translate(oa, Vec2::new(-5.0, 0.0)).unwrap();
        m.update(&arena).unwrap();
        assert_eq!(m.sorted_colliders(), &[b, a]);
        let events = m.drain_events();
        assert!(events.iter().all(|e| e.kind == CollisionEventKind::Stay));
        let firsts: Vec<_> = events.into_iter().map(|e| e.this).collect();
        assert_eq!(firsts, vec![b, a]);
        assert_eq!(m.current_collisions().iter().next().unwrap().first(), b);
    }

    #[test]
    fn test_fast_path_flag() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let owner = spawn(&mut arena, 0.0, 0.0, 1.0);
        let id = m.add_collider(owner, ColliderShape::circle(1.0));
        assert!(m.all_circles());
        m.set_shape(id, ColliderShape::circle(2.0)).unwrap();
        assert!(m.all_circles());
        m.set_shape(id, ColliderShape::triangle()).unwrap();
        assert!(!m.all_circles());
        // flag stays off even once the shape is a circle again
        m.set_shape(id, ColliderShape::circle(2.0)).unwrap();
        assert!(!m.all_circles());
        m.reset();
        assert!(m.all_circles());
        m.add_collider(owner, ColliderShape::square());
        assert!(!m.all_circles());
    }

    #[test]
    fn test_set_shape_unknown_id_keeps_flag() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        m.add_collider(spawn(&mut arena, 0.0, 0.0, 1.0), ColliderShape::circle(1.0));
        let ghost = ColliderId(7);
        assert_eq!(
            m.set_shape(ghost, ColliderShape::square()),
            Err(CollisionError::UnknownCollider(ghost))
        );
        assert!(m.all_circles());
    }

    #[test]
    fn test_fast_path_matches_dispatch() {
        let mut arena = TransformArena::new();
        let mut fast = CollidersManager::new(cfg());
        let mut slow = CollidersManager::new(cfg());
        for (x, y, r) in [(0.0, 0.0, 4.0), (7.0, 1.0, 3.5), (10.0, -3.0, 2.0), (30.0, 0.0, 1.0)] {
            let owner = spawn(&mut arena, x, y, 1.0);
            fast.add_collider(owner, ColliderShape::circle(r));
            slow.add_collider(owner, ColliderShape::circle(r));
        }
        // a far-away polygon forces the dispatching path
        slow.add_collider(spawn(&mut arena, 1000.0, 1000.0, 1.0), ColliderShape::square());
        assert!(fast.all_circles());
        assert!(!slow.all_circles());
        fast.update(&arena).unwrap();
        slow.update(&arena).unwrap();
        for i in 0..4 {
            for k in (i + 1)..4 {
                let (a, b) = (ColliderId(i), ColliderId(k));
                assert_eq!(fast.is_colliding(a, b), slow.is_colliding(a, b), "pair {i}/{k}");
            }
        }
        assert_eq!(fast.current_collisions().len(), 2);
    }

    #[test]
    fn test_reset_forgets_collisions() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let a = m.add_collider(spawn(&mut arena, 0.0, 0.0, 1.0), ColliderShape::circle(5.0));
        let b = m.add_collider(spawn(&mut arena, 1.0, 0.0, 1.0), ColliderShape::circle(5.0));
        m.update(&arena).unwrap();
        assert!(m.is_colliding(a, b));

        m.reset();
        assert_eq!(m.collider_count(), 0);
        assert!(m.current_collisions().is_empty());
        assert!(m.drain_events().is_empty());
        let stats = m.update(&arena).unwrap();
        assert_eq!(stats, TickStats::default());
        assert!(m.previous_collisions().is_empty());
    }

    #[test]
    fn test_missing_transform_leaves_state() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let a = m.add_collider(spawn(&mut arena, 0.0, 0.0, 1.0), ColliderShape::circle(5.0));
        let b = m.add_collider(spawn(&mut arena, 1.0, 0.0, 1.0), ColliderShape::circle(5.0));
        m.update(&arena).unwrap();
        m.drain_events();

        let ghost = ObjectId(42);
        m.add_collider(ghost, ColliderShape::circle(1.0));
        assert_eq!(m.update(&arena), Err(CollisionError::UnknownObject(ghost)));
        assert!(m.is_colliding(a, b));
        assert!(m.drain_events().is_empty());
    }

    #[test]
    fn test_degenerate_pair_is_skipped() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        // circle centered exactly on the square's (1, 1) corner
        let sq = m.add_collider(spawn(&mut arena, 0.0, 0.0, 2.0), ColliderShape::square());
        let ball = m.add_collider(spawn(&mut arena, 1.0, 1.0, 1.0), ColliderShape::circle(1.0));
        let stats = m.update(&arena).unwrap();
        assert_eq!(stats.degenerate_pairs, 1);
        assert!(!m.is_colliding(sq, ball));

        arena.translate(ObjectId(1), Vec2::new(0.25, 0.0)).unwrap();
        let stats = m.update(&arena).unwrap();
        assert_eq!(stats.degenerate_pairs, 0);
        assert!(m.is_colliding(sq, ball));
    }

    #[test]
    fn test_event_buffer_cap() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(ManagerConfig { max_events: 3, ..cfg() });
        for x in [0.0, 1.0, 2.0] {
            m.add_collider(spawn(&mut arena, x, 0.0, 1.0), ColliderShape::circle(5.0));
        }
        let stats = m.update(&arena).unwrap();
        assert_eq!(stats.entered, 3);
        assert_eq!(m.drain_events().len(), 3);

        let mut quiet = CollidersManager::new(ManagerConfig { record_events: false, ..cfg() });
        quiet.add_collider(ObjectId(0), ColliderShape::circle(5.0));
        quiet.add_collider(ObjectId(1), ColliderShape::circle(5.0));
        quiet.update(&arena).unwrap();
        assert!(quiet.drain_events().is_empty());
    }

    #[test]
    fn test_bounds_query_and_unknown_ids() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let id = m.add_collider(spawn(&mut arena, 10.0, 20.0, 4.0), ColliderShape::square());
        let b = m.bounds(id, &arena).unwrap();
        assert_eq!(b.left.x, 8.0);
        assert_eq!(b.right.x, 12.0);
        assert_eq!(b.up.y, 18.0);
        assert_eq!(b.down.y, 22.0);

        let ghost = ColliderId(9);
        assert_eq!(m.bounds(ghost, &arena), Err(CollisionError::UnknownCollider(ghost)));
        assert!(m.set_on_collision_enter(ghost, Box::new(|_| {})).is_err());
        assert!(m.clear_handlers(ghost).is_err());
        assert!(m.collider(ghost).is_none());
        assert_eq!(m.collider(id).unwrap().owner(), ObjectId(0));
    }

    #[test]
    fn test_handlers_can_be_cleared() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(cfg());
        let a = m.add_collider(spawn(&mut arena, 0.0, 0.0, 1.0), ColliderShape::circle(5.0));
        m.add_collider(spawn(&mut arena, 1.0, 0.0, 1.0), ColliderShape::circle(5.0));
        let log = record_all(&mut m, a);
        m.clear_handlers(a).unwrap();
        m.update(&arena).unwrap();
        assert!(log.borrow().is_empty());
        // events are still recorded
        assert_eq!(m.drain_events().len(), 2);
    }

    #[test]
    fn test_timing_recorded_when_enabled() {
        let mut arena = TransformArena::new();
        let mut m = CollidersManager::new(ManagerConfig { enable_timing: true, ..cfg() });
        m.add_collider(spawn(&mut arena, 0.0, 0.0, 1.0), ColliderShape::circle(1.0));
        assert!(m.timing().is_none());
        m.update(&arena).unwrap();
        let t = m.timing().unwrap();
        assert!(t.total_ms >= 0.0);
        assert_eq!(m.last_stats().colliders, 1);
    }

    #[test]
    fn test_broad_phase_never_rejects_narrow_hits() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _round in 0..50 {
            let mut shapes = Vec::new();
            for i in 0..24 {
                let t = WorldTransform {
                    position: Vec2::new(rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0)),
                    scale: Vec2::new(rng.gen_range(1.0..25.0), rng.gen_range(1.0..25.0)),
                    rotation: rng.gen_range(0.0..std::f32::consts::TAU),
                };
                // keep the two families apart: polygon-polygon and circle-circle
                let local = match i % 3 {
                    0 => ColliderShape::square(),
                    1 => ColliderShape::triangle(),
                    _ => ColliderShape::circle(rng.gen_range(0.5..8.0)),
                };
                shapes.push((t.position.x, local.to_world(&t)));
            }
            shapes.sort_by(|a, b| a.0.total_cmp(&b.0));
            for i in 0..shapes.len() {
                for k in (i + 1)..shapes.len() {
                    let (a, b) = (&shapes[i].1, &shapes[k].1);
                    if a.kind() != b.kind() {
                        continue;
                    }
                    if Narrowphase::dispatch(a, b) == Ok(true) {
                        assert!(could_be_colliding(&a.bounds(), &b.bounds()), "false negative: {a:?} vs {b:?}");
                    }
                }
            }
        }
    }
}
