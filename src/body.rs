//! Body data and the gameplay-facing body trait.

use glam::DVec2;

use crate::narrowphase::Aabb;
use crate::types::{BodyId, Layer, Side};

/// Physics record of one gameplay entity. Position is the top-left corner.
///
/// `grounded` and `layer` are owned by the engine and only readable from
/// gameplay code.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    pub size: DVec2,
    /// Inactive bodies are skipped entirely.
    pub active: bool,
    /// Non-collidable bodies still integrate but never enter entity contacts.
    pub collidable: bool,
    pub gravity: bool,
    pub gravity_scale: f64,
    /// Fraction of `vel.y` removed per tick, `0` disables.
    pub air_resistance: f64,
    /// Overrides the engine's terminal fall speed.
    pub max_fall_speed: Option<f64>,
    /// Overrides the engine's ground friction.
    pub friction: Option<f64>,
    /// When false the engine keeps probing and contact tests but leaves
    /// motion to the owner (scripted movers).
    pub physics_enabled: bool,
    pub(crate) grounded: bool,
    pub(crate) layer: Layer,
}

impl Body {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::ZERO,
            size: DVec2::new(width, height),
            active: true,
            collidable: true,
            gravity: true,
            gravity_scale: 1.0,
            air_resistance: 0.0,
            max_fall_speed: None,
            friction: None,
            physics_enabled: true,
            grounded: false,
            layer: Layer::Player,
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vel = DVec2::new(vx, vy);
        self
    }

    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.gravity = enabled;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f64) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_air_resistance(mut self, resistance: f64) -> Self {
        self.air_resistance = resistance;
        self
    }

    pub fn with_max_fall_speed(mut self, speed: f64) -> Self {
        self.max_fall_speed = Some(speed);
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_physics_enabled(mut self, enabled: bool) -> Self {
        self.physics_enabled = enabled;
        self
    }

    pub fn with_collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    /// Resting on solid ground as of the last tick.
    #[inline]
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    #[inline]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.pos + self.size * 0.5
    }
}

/// Notification passed to a body when another body starts touching it.
#[derive(Copy, Clone, Debug)]
pub struct Contact<'a> {
    pub other_id: BodyId,
    /// The other body as it was when the contact was detected.
    pub other: &'a Body,
    /// Face of the receiving body that `other` touches.
    pub side: Side,
}

/// Anything the engine can simulate.
///
/// Handlers receive only `&mut self`; despawning or spawning in response to a
/// contact has to be queued by the owner and applied between ticks.
pub trait PhysicsBody {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Called once when a contact starts.
    fn on_collision(&mut self, _contact: &Contact<'_>) {}

    /// Called when a contact ends, only if the engine has exit notifications enabled.
    fn on_separation(&mut self, _other: BodyId) {}
}

impl PhysicsBody for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}
