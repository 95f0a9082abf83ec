//! Per-body motion: gravity, axis-by-axis movement with tile resolution, ground friction.
//!
//! All rates are authored per nominal tick, so every step scales by
//! `dt * NOMINAL_STEPS_PER_SECOND`.

use crate::body::Body;
use crate::config::{NOMINAL_STEPS_PER_SECOND, PhysicsConfig};
use crate::tiles::TileGrid;
use crate::types::Axis;

/// Gravity then air resistance (both skipped while grounded), then the fall clamp.
/// Upward velocity is never clamped.
pub fn apply_gravity(body: &mut Body, cfg: &PhysicsConfig, dt: f64) {
    if !body.gravity {
        return;
    }
    if !body.grounded {
        let g = cfg.gravity * body.gravity_scale;
        body.vel.y += g * dt * NOMINAL_STEPS_PER_SECOND * cfg.speed_multiplier;
        if body.air_resistance > 0.0 {
            body.vel.y *= 1.0 - body.air_resistance;
        }
    }
    let max_fall = body.max_fall_speed.unwrap_or(cfg.max_fall_speed);
    if body.vel.y > 0.0 && body.vel.y > max_fall {
        body.vel.y = max_fall;
    }
}

/// Exponential horizontal damping for grounded bodies, snapping to rest below
/// `friction_epsilon`.
pub fn apply_friction(body: &mut Body, cfg: &PhysicsConfig, dt: f64) {
    if !body.grounded {
        return;
    }
    let friction = body.friction.unwrap_or(cfg.friction);
    body.vel.x *= friction.powf(dt * NOMINAL_STEPS_PER_SECOND);
    if body.vel.x.abs() < cfg.friction_epsilon {
        body.vel.x = 0.0;
    }
}

/// One full step for a body. X moves and resolves before Y; that order decides
/// which face a body catches on at inside corners. Returns tile resolutions done.
pub fn step_body(body: &mut Body, cfg: &PhysicsConfig, tiles: Option<&TileGrid>, dt: f64) -> usize {
    apply_gravity(body, cfg, dt);

    let motion = dt * NOMINAL_STEPS_PER_SECOND * cfg.speed_multiplier;
    let mut contacts = 0;

    body.pos.x += body.vel.x * motion;
    if let Some(tiles) = tiles {
        contacts += tiles.resolve(body, Axis::Horizontal);
    }

    body.pos.y += body.vel.y * motion;
    if let Some(tiles) = tiles {
        contacts += tiles.resolve(body, Axis::Vertical);
    }

    apply_friction(body, cfg, dt);
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::SOLID;
    use approx::assert_relative_eq;

    const DT: f64 = 1.0 / 60.0;

    fn cfg() -> PhysicsConfig {
        PhysicsConfig::new(0.5, 12.0, 0.8)
    }

    #[test]
    fn test_gravity_nominal_tick() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0);
        apply_gravity(&mut b, &cfg(), DT);
        assert_relative_eq!(b.vel.y, 0.5, epsilon = 1e-12);
        // Double dt, double impulse.
        apply_gravity(&mut b, &cfg(), 2.0 * DT);
        assert_relative_eq!(b.vel.y, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_gravity_scale_and_disabled() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_gravity_scale(0.5);
        apply_gravity(&mut b, &cfg(), DT);
        assert_relative_eq!(b.vel.y, 0.25, epsilon = 1e-12);

        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_gravity(false).with_velocity(0.0, 40.0);
        apply_gravity(&mut b, &cfg(), DT);
        assert_eq!(b.vel.y, 40.0);
    }

    #[test]
    fn test_grounded_body_gets_no_gravity() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0);
        b.grounded = true;
        apply_gravity(&mut b, &cfg(), DT);
        assert_eq!(b.vel.y, 0.0);
    }

    #[test]
    fn test_air_resistance_after_gravity() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_air_resistance(0.1).with_velocity(0.0, 1.5);
        apply_gravity(&mut b, &cfg(), DT);
        assert_relative_eq!(b.vel.y, 1.8, epsilon = 1e-12);
    }

    #[test]
    fn test_grounded_jump_keeps_launch_speed() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_air_resistance(0.1).with_velocity(0.0, -10.0);
        b.grounded = true;
        apply_gravity(&mut b, &cfg(), DT);
        assert_eq!(b.vel.y, -10.0);
        // Airborne on the next tick: gravity, then damping.
        b.grounded = false;
        apply_gravity(&mut b, &cfg(), DT);
        assert_relative_eq!(b.vel.y, -8.55, epsilon = 1e-12);
    }

    #[test]
    fn test_fall_clamp_only_downward() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_velocity(0.0, 11.9);
        apply_gravity(&mut b, &cfg(), DT);
        assert_eq!(b.vel.y, 12.0);

        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_velocity(0.0, -30.0);
        apply_gravity(&mut b, &cfg(), DT);
        assert_relative_eq!(b.vel.y, -29.5, epsilon = 1e-12);

        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_max_fall_speed(3.0).with_velocity(0.0, 5.0);
        apply_gravity(&mut b, &cfg(), DT);
        assert_eq!(b.vel.y, 3.0);
    }

    #[test]
    fn test_friction_decays_and_snaps() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_velocity(5.0, 0.0);
        b.grounded = true;
        apply_friction(&mut b, &cfg(), DT);
        assert_relative_eq!(b.vel.x, 4.0, epsilon = 1e-12);

        b.vel.x = 0.11;
        apply_friction(&mut b, &cfg(), DT);
        assert_eq!(b.vel.x, 0.0);
    }

    #[test]
    fn test_friction_airborne_untouched_and_override() {
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_velocity(5.0, 0.0);
        apply_friction(&mut b, &cfg(), DT);
        assert_eq!(b.vel.x, 5.0);

        let mut ice = Body::new(0.0, 0.0, 16.0, 16.0).with_velocity(5.0, 0.0).with_friction(1.0);
        ice.grounded = true;
        apply_friction(&mut ice, &cfg(), DT);
        assert_eq!(ice.vel.x, 5.0);
    }

    #[test]
    fn test_step_without_tiles_free_falls() {
        let mut b = Body::new(10.0, 0.0, 16.0, 16.0).with_velocity(2.0, 0.0);
        let n = step_body(&mut b, &cfg(), None, DT);
        assert_eq!(n, 0);
        assert_relative_eq!(b.pos.x, 12.0, epsilon = 1e-12);
        assert_relative_eq!(b.pos.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_speed_multiplier_scales_motion() {
        let cfg = cfg().with_speed_multiplier(0.5);
        let mut b = Body::new(0.0, 0.0, 16.0, 16.0).with_gravity(false).with_velocity(4.0, 2.0);
        step_body(&mut b, &cfg, None, DT);
        assert_relative_eq!(b.pos.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(b.pos.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inside_corner_resolves_x_first() {
        // Wall at column 4 rows 0..=3, floor on row 4.
        let mut g = TileGrid::new(8, 6, 16.0).unwrap();
        g.fill(4..=4, 0..=3, SOLID);
        g.fill(0..=7, 4..=4, SOLID);
        let mut b = Body::new(46.0, 46.0, 16.0, 16.0).with_gravity(false).with_velocity(6.0, 6.0);
        let n = step_body(&mut b, &cfg(), Some(&g), DT);
        assert_eq!(n, 2);
        assert_eq!(b.pos.x, 48.0);
        assert_eq!(b.pos.y, 48.0);
        assert_eq!(b.vel.x, 0.0);
        assert_eq!(b.vel.y, 0.0);
        assert!(b.grounded());
    }
}
