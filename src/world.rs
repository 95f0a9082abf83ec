use glam::DVec2;
use log::{debug, trace, warn};

use std::collections::{BTreeMap, HashSet};

use crate::api::{NarrowphaseApi, PhysicsWorldApi};
use crate::body::{Body, Contact, PhysicsBody};
use crate::config::PhysicsConfig;
use crate::error::PhysicsError;
use crate::integrate;
use crate::layers::LayerMatrix;
use crate::narrowphase::Narrowphase;
use crate::tiles::TileGrid;
use crate::types::*;

/// Tile-platformer physics world.
///
/// Owns registered entities (keyed by [`BodyId`], iterated in id order), the
/// current tile grid and the set of body pairs that are currently touching.
pub struct PhysicsWorld<E: PhysicsBody = Body> {
    cfg: PhysicsConfig,
    tiles: Option<TileGrid>,
    layers: LayerMatrix,

    entities: BTreeMap<BodyId, E>,
    next_id: u64,

    // Collision pair registry: unordered pairs overlapping as of the last tick
    contacts: HashSet<PairKey>,

    // Contact changes not yet drained
    events: Vec<CollisionEvent>,

    last_stats: StepStats,
    tick: u64,
}

/// Unordered pair key, lower id first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct PairKey(BodyId, BodyId);

impl PairKey {
    fn new(a: BodyId, b: BodyId) -> Self {
        if a < b { Self(a, b) } else { Self(b, a) }
    }

    fn involves(self, id: BodyId) -> bool {
        self.0 == id || self.1 == id
    }
}

/// New contact found during the scan; indices into the tick's snapshot.
struct Started {
    a: usize,
    b: usize,
    side_a: Side,
}

impl<E: PhysicsBody> PhysicsWorldApi<E> for PhysicsWorld<E> {
    fn new(cfg: PhysicsConfig) -> Result<Self, PhysicsError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            tiles: None,
            layers: LayerMatrix::default(),
            entities: BTreeMap::new(),
            next_id: 0,
            contacts: HashSet::new(),
            events: Vec::new(),
            last_stats: StepStats::default(),
            tick: 0,
        })
    }

    fn set_tile_map<R: AsRef<[u8]>>(&mut self, rows: &[R], cell_size: f64) -> Result<(), PhysicsError> {
        let grid = TileGrid::from_rows(rows, cell_size)?;
        self.set_tile_grid(grid);
        Ok(())
    }

    fn set_tile_grid(&mut self, grid: TileGrid) {
        debug!("tile map set: {}x{} cells of {}", grid.cols(), grid.rows(), grid.cell_size());
        self.tiles = Some(grid);
    }

    fn clear_tile_map(&mut self) {
        debug!("tile map cleared");
        self.tiles = None;
    }

    fn add_entity(&mut self, mut entity: E, layer: Layer) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        let body = entity.body_mut();
        body.layer = layer;
        if body.gravity {
            body.grounded = false;
        }
        debug!("added body {:?} on {:?}", id, layer);
        self.entities.insert(id, entity);
        id
    }

    fn remove_entity(&mut self, id: BodyId) -> Option<E> {
        let entity = self.entities.remove(&id)?;
        self.contacts.retain(|k| !k.involves(id));
        debug!("removed body {:?}", id);
        Some(entity)
    }

    fn has_entity(&self, id: BodyId) -> bool {
        self.entities.contains_key(&id)
    }

    fn update(&mut self, dt: f64) {
        let dt = self.clamp_dt(dt);
        self.tick = self.tick.wrapping_add(1);
        let mut stats = StepStats::default();
        let tiles = self.tiles.as_ref();

        // Grounded pre-pass on last tick's positions
        for entity in self.entities.values_mut() {
            let body = entity.body_mut();
            if body.active {
                let grounded = tiles.is_some_and(|t| t.probe_ground(body));
                body.grounded = grounded;
            }
        }

        for entity in self.entities.values_mut() {
            let body = entity.body_mut();
            if !body.active || !body.physics_enabled {
                continue;
            }
            stats.bodies_integrated += 1;
            stats.tile_contacts += integrate::step_body(body, &self.cfg, tiles, dt);
        }

        self.detect_contacts(&mut stats);
        self.last_stats = stats;
    }

    fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    fn is_point_in_tile(&self, x: f64, y: f64) -> bool {
        self.tiles.as_ref().is_some_and(|t| t.is_point_solid(x, y))
    }

    fn raycast(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Option<RaycastHit> {
        self.tiles.as_ref()?.raycast(DVec2::new(x1, y1), DVec2::new(x2, y2))
    }

    fn ground_below(&self, x: f64, y: f64, max_distance: f64) -> Option<RaycastHit> {
        if max_distance.is_nan() || max_distance < 0.0 {
            return None;
        }
        // Nothing solid lies past the grid's bottom edge.
        let bottom = self.tiles.as_ref()?.bounds().max.y;
        self.raycast(x, y, x, (y + max_distance).min(bottom.max(y)))
    }

    fn query_point(&self, x: f64, y: f64) -> Vec<BodyId> {
        let p = DVec2::new(x, y);
        self.entities
            .iter()
            .filter(|(_, e)| e.body().active && Narrowphase::overlap_point_aabb(p, &e.body().aabb()))
            .map(|(&id, _)| id)
            .collect()
    }
}

impl<E: PhysicsBody> PhysicsWorld<E> {
    fn clamp_dt(&self, dt: f64) -> f64 {
        if dt.is_nan() || dt < 0.0 {
            warn!("ignoring invalid dt {dt}");
            return 0.0;
        }
        if dt > self.cfg.max_dt {
            debug!("clamping dt {dt} to {}", self.cfg.max_dt);
            return self.cfg.max_dt;
        }
        dt
    }

    /// Pairwise AABB scan over active, collidable bodies whose layers interact.
    /// Handlers run after the scan against a snapshot, so nothing they do to
    /// their own body changes this tick's pair list.
    fn detect_contacts(&mut self, stats: &mut StepStats) {
        let snapshot: Vec<(BodyId, Body)> = self
            .entities
            .iter()
            .map(|(&id, e)| (id, *e.body()))
            .filter(|(_, b)| b.active && b.collidable)
            .collect();

        let mut touching: HashSet<PairKey> = HashSet::with_capacity(self.contacts.len());
        let mut started: Vec<Started> = Vec::new();

        for i in 0..snapshot.len() {
            for j in (i + 1)..snapshot.len() {
                let (ia, a) = &snapshot[i];
                let (ib, b) = &snapshot[j];
                if !self.layers.allows(a.layer, b.layer) {
                    continue;
                }
                stats.pairs_tested += 1;
                let (box_a, box_b) = (a.aabb(), b.aabb());
                if !Narrowphase::overlap_aabb_aabb(&box_a, &box_b) {
                    continue;
                }
                let key = PairKey::new(*ia, *ib);
                touching.insert(key);
                if self.contacts.insert(key) {
                    started.push(Started { a: i, b: j, side_a: Narrowphase::contact_side(&box_a, &box_b) });
                }
            }
        }

        // Snapshot is in id order, so `a` always holds the lower id.
        for s in &started {
            let (ia, a) = snapshot[s.a];
            let (ib, b) = snapshot[s.b];
            trace!("contact start {:?} <-> {:?} ({:?})", ia, ib, s.side_a);
            self.push_event(CollisionEvent { kind: EventKind::Enter, a: ia, b: ib, side: s.side_a });
            if let Some(e) = self.entities.get_mut(&ia) {
                e.on_collision(&Contact { other_id: ib, other: &b, side: s.side_a });
            }
            if let Some(e) = self.entities.get_mut(&ib) {
                e.on_collision(&Contact { other_id: ia, other: &a, side: s.side_a.opposite() });
            }
        }
        stats.contacts_started = started.len();

        let mut ended: Vec<PairKey> = self.contacts.difference(&touching).copied().collect();
        ended.sort_unstable();
        self.contacts = touching;
        stats.contacts_ended = ended.len();

        if !self.cfg.exit_notifications {
            return;
        }
        for PairKey(a, b) in ended {
            trace!("contact end {:?} <-> {:?}", a, b);
            self.push_event(CollisionEvent { kind: EventKind::Exit, a, b, side: Side::None });
            if let Some(e) = self.entities.get_mut(&a) {
                e.on_separation(b);
            }
            if let Some(e) = self.entities.get_mut(&b) {
                e.on_separation(a);
            }
        }
    }

    fn push_event(&mut self, ev: CollisionEvent) {
        if self.events.len() < self.cfg.max_events {
            self.events.push(ev);
        }
    }

    pub fn cfg(&self) -> &PhysicsConfig {
        &self.cfg
    }

    /// Runtime time scale (slow motion). Negative or non-finite values are rejected.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> Result<(), PhysicsError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(PhysicsError::InvalidConfig { field: "speed_multiplier", value: multiplier });
        }
        self.cfg.speed_multiplier = multiplier;
        Ok(())
    }

    pub fn tiles(&self) -> Option<&TileGrid> {
        self.tiles.as_ref()
    }

    pub fn layers(&self) -> &LayerMatrix {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerMatrix {
        &mut self.layers
    }

    pub fn get(&self, id: BodyId) -> Option<&E> {
        self.entities.get(&id)
    }

    /// Mutable access between ticks. `grounded` and `layer` stay engine-owned.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut E> {
        self.entities.get_mut(&id)
    }

    /// Convenience accessor for the physics record of an entity.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.entities.get(&id).map(|e| e.body())
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &E)> {
        self.entities.iter().map(|(&id, e)| (id, e))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Move a registered body to another layer.
    pub fn set_layer(&mut self, id: BodyId, layer: Layer) -> bool {
        match self.entities.get_mut(&id) {
            Some(e) => {
                e.body_mut().layer = layer;
                true
            }
            None => false,
        }
    }

    /// Whether two bodies were overlapping as of the last tick.
    pub fn is_touching(&self, a: BodyId, b: BodyId) -> bool {
        self.contacts.contains(&PairKey::new(a, b))
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Forget every tracked contact (level reset). Overlaps that persist
    /// are reported again as new contacts on the next tick.
    pub fn reset_contacts(&mut self) {
        debug!("contacts reset ({} dropped)", self.contacts.len());
        self.contacts.clear();
        self.events.clear();
    }

    /// Counters for the most recent `update`.
    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Number of `update` calls so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
