/// Stable identity of a registered body. Assigned monotonically, never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

/// Collision layers. A closed set so the layer matrix stays a fixed table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Tile,
    Player,
    Enemy,
    Item,
    Platform,
    Projectile,
}

impl Layer {
    pub const COUNT: usize = 6;

    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::Tile,
        Layer::Player,
        Layer::Enemy,
        Layer::Item,
        Layer::Platform,
        Layer::Projectile,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis a body has just moved along.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Face of the receiving body that the other body touches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    /// Centers coincide; no meaningful face.
    None,
}

impl Side {
    /// The same contact seen from the other body.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::None => Side::None,
        }
    }
}

/// First solid cell met by a grid raycast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaycastHit {
    /// World-space top-left corner of the hit cell.
    pub x: f64,
    pub y: f64,
    pub col: i32,
    pub row: i32,
    /// Raw cell code.
    pub tile: u8,
}

/// Event discriminator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Pair started overlapping this tick.
    Enter,
    /// Pair stopped overlapping (only with `exit_notifications`).
    Exit,
}

/// Contact change recorded during `update`, drained by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollisionEvent {
    pub kind: EventKind,
    /// Lower id of the pair.
    pub a: BodyId,
    pub b: BodyId,
    /// Side of `a` touched by `b` (`Side::None` for exits).
    pub side: Side,
}

/// Counters for the most recent tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub bodies_integrated: usize,
    /// Tile resolutions performed (both axes).
    pub tile_contacts: usize,
    /// Body pairs that passed the layer filter and were overlap-tested.
    pub pairs_tested: usize,
    pub contacts_started: usize,
    pub contacts_ended: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_indices_dense() {
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
        }
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::None.opposite(), Side::None);
    }
}
