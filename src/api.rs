use glam::DVec2;

use crate::body::PhysicsBody;
use crate::config::PhysicsConfig;
use crate::error::PhysicsError;
use crate::narrowphase::Aabb;
use crate::tiles::TileGrid;
use crate::types::*;

/// Public API contract for the tile-platformer physics world.
pub trait PhysicsWorldApi<E: PhysicsBody> {
    /// Construct a world. Fails if the configuration is unusable.
    fn new(cfg: PhysicsConfig) -> Result<Self, PhysicsError>
    where
        Self: Sized;

    // --- Geometry ----------------------------------------------------------

    /// Replace the static collision geometry wholesale.
    fn set_tile_map<R: AsRef<[u8]>>(&mut self, rows: &[R], cell_size: f64) -> Result<(), PhysicsError>;

    /// Install an already built grid.
    fn set_tile_grid(&mut self, grid: TileGrid);

    /// Remove the geometry; bodies then fall freely.
    fn clear_tile_map(&mut self);

    // --- Registration ------------------------------------------------------

    /// Register an entity on `layer` and return its stable id.
    fn add_entity(&mut self, entity: E, layer: Layer) -> BodyId;

    /// Unregister an entity, dropping its contacts silently.
    fn remove_entity(&mut self, id: BodyId) -> Option<E>;

    fn has_entity(&self, id: BodyId) -> bool;

    // --- Simulation --------------------------------------------------------

    /// Advance one logical tick of `dt` seconds (clamped to `max_dt`).
    fn update(&mut self, dt: f64);

    /// Drain and return the contact changes recorded since the last drain.
    fn drain_events(&mut self) -> Vec<CollisionEvent>;

    // --- Queries -----------------------------------------------------------

    fn is_point_in_tile(&self, x: f64, y: f64) -> bool;

    /// First solid cell on the grid line between two points.
    fn raycast(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Option<RaycastHit>;

    /// Active bodies whose box contains the point.
    fn query_point(&self, x: f64, y: f64) -> Vec<BodyId>;

    /// First solid cell straight below `(x, y)` within `max_distance`.
    fn ground_below(&self, x: f64, y: f64, max_distance: f64) -> Option<RaycastHit>;
}

/// AABB primitive signatures.
pub trait NarrowphaseApi {
    /// Strict overlap; shared edges do not count.
    fn overlap_aabb_aabb(a: &Aabb, b: &Aabb) -> bool;
    /// Half-open containment test.
    fn overlap_point_aabb(p: DVec2, b: &Aabb) -> bool;
    /// Face of `receiver` touched by `other`.
    fn contact_side(receiver: &Aabb, other: &Aabb) -> Side;
}
