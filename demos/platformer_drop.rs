use tilephys::*;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let mut world: PhysicsWorld = PhysicsWorld::new(PhysicsConfig::new(0.5, 12.0, 0.8))?;

    // 20x15 cells of 16 units: floor on row 13, a wall on column 10.
    let rows: Vec<Vec<u8>> = (0..15)
        .map(|row| (0..20).map(|col| u8::from(row == 13 || (col == 10 && row >= 9))).collect())
        .collect();
    world.set_tile_map(rows.as_slice(), 16.0)?;

    let player = world.add_entity(Body::new(100.0, 120.0, 16.0, 16.0).with_velocity(3.0, 0.0), Layer::Player);
    let coin = world.add_entity(Body::new(130.0, 190.0, 8.0, 8.0).with_gravity(false), Layer::Item);
    println!("Inserted player={:?} coin={:?}", player, coin);

    for tick in 0..90 {
        world.update(1.0 / 60.0);
        if let Some(b) = world.body(player) {
            if tick % 10 == 0 {
                println!(
                    "tick {:>3}: pos=({:.2},{:.2}) vel=({:.2},{:.2}) grounded={}",
                    tick, b.pos.x, b.pos.y, b.vel.x, b.vel.y, b.grounded()
                );
            }
        }
        for ev in world.drain_events() {
            println!("tick {:>3}: {:?} {:?} vs {:?} side={:?}", tick, ev.kind, ev.a, ev.b, ev.side);
        }
    }

    let s = world.last_stats();
    println!(
        "last tick: integrated={} tile_contacts={} pairs_tested={}",
        s.bodies_integrated, s.tile_contacts, s.pairs_tested
    );

    match world.ground_below(40.0, 0.0, 400.0) {
        Some(hit) => println!("Ground below x=40 at y={} (cell {},{})", hit.y, hit.col, hit.row),
        None => println!("No ground below x=40"),
    }
    Ok(())
}
