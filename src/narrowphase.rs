use glam::DVec2;

use crate::api::NarrowphaseApi;
use crate::types::Side;

/// Axis-aligned box stored as (min, max) corners. Y grows downward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    /// Box from a top-left corner and a size.
    #[inline]
    pub fn from_pos_size(pos: DVec2, size: DVec2) -> Self {
        Self { min: pos, max: pos + size }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// AABB primitives used by tile resolution and entity contacts.
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn overlap_aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
        // Strict: boxes that only share an edge are not overlapping.
        a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
    }

    fn overlap_point_aabb(p: DVec2, b: &Aabb) -> bool {
        p.x >= b.min.x && p.x < b.max.x && p.y >= b.min.y && p.y < b.max.y
    }

    fn contact_side(receiver: &Aabb, other: &Aabb) -> Side {
        // Minkowski comparison: weigh each center offset by the opposite
        // axis' summed extents; the dominant product picks the axis.
        let d = other.center() - receiver.center();
        if d == DVec2::ZERO {
            return Side::None;
        }
        let sum = receiver.size() + other.size();
        let wy = sum.x * d.y;
        let hx = sum.y * d.x;
        if wy.abs() >= hx.abs() {
            if d.y < 0.0 { Side::Top } else { Side::Bottom }
        } else if d.x < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}
