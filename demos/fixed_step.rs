use tilephys::*;

/// Enemy that records stomps from above.
struct Goomba {
    body: Body,
    stomped: bool,
}

impl PhysicsBody for Goomba {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_collision(&mut self, contact: &Contact<'_>) {
        if contact.side == Side::Top && contact.other.layer() == Layer::Player {
            self.stomped = true;
        }
    }
}

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let cfg = PhysicsConfig::new(0.5, 12.0, 0.8).with_exit_notifications(true);
    let mut world: PhysicsWorld<Goomba> = PhysicsWorld::new(cfg)?;

    let mut grid = TileGrid::new(32, 16, 16.0)?;
    grid.fill(0..=31, 14..=15, tilephys::tiles::SOLID);
    world.set_tile_grid(grid);

    let enemy = world.add_entity(Goomba { body: Body::new(200.0, 208.0, 16.0, 16.0), stomped: false }, Layer::Enemy);
    world.add_entity(Goomba { body: Body::new(200.0, 100.0, 16.0, 16.0), stomped: false }, Layer::Player);

    // Uneven frame times, as a real display loop would deliver them.
    let frames = [0.016, 0.017, 0.050, 0.008, 0.016, 0.250, 0.016];
    let mut clock = FixedTimestep::new(1.0 / 60.0, 5);
    for (i, frame_dt) in frames.iter().cycle().take(60).enumerate() {
        let ran = clock.advance(*frame_dt, |dt| world.update(dt));
        for ev in world.drain_events() {
            println!("frame {:>2} ({} ticks): {:?} {:?}/{:?} side={:?}", i, ran, ev.kind, ev.a, ev.b, ev.side);
        }
    }

    if let Some(g) = world.get(enemy) {
        println!("enemy stomped: {}", g.stomped);
    }
    println!("ticks run: {}, interpolation alpha: {:.2}", world.tick(), clock.alpha());
    Ok(())
}
