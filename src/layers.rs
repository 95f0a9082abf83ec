//! Collision layer matrix.
//!
//! Each layer lists the layers its bodies test against. A pair is tested when
//! either side lists the other, so the relation is symmetric even if a row is not.

use crate::types::Layer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerMatrix {
    table: [[bool; Layer::COUNT]; Layer::COUNT],
}

impl LayerMatrix {
    /// Matrix where no layer interacts with any other.
    pub fn empty() -> Self {
        Self { table: [[false; Layer::COUNT]; Layer::COUNT] }
    }

    /// Declare that `layer` tests against every layer in `others`.
    pub fn set(&mut self, layer: Layer, others: &[Layer]) -> &mut Self {
        for &other in others {
            self.table[layer.index()][other.index()] = true;
        }
        self
    }

    pub fn unset(&mut self, layer: Layer, other: Layer) -> &mut Self {
        self.table[layer.index()][other.index()] = false;
        self.table[other.index()][layer.index()] = false;
        self
    }

    /// Layers `layer` itself names (one direction only).
    pub fn targets(&self, layer: Layer) -> impl Iterator<Item = Layer> + '_ {
        Layer::ALL.into_iter().filter(move |o| self.table[layer.index()][o.index()])
    }

    /// Pair filtering rule: tested if either direction names the other layer.
    #[inline]
    pub fn allows(&self, a: Layer, b: Layer) -> bool {
        self.table[a.index()][b.index()] || self.table[b.index()][a.index()]
    }
}

impl Default for LayerMatrix {
    fn default() -> Self {
        let mut m = Self::empty();
        m.set(Layer::Player, &[Layer::Tile, Layer::Enemy, Layer::Item, Layer::Platform])
            .set(Layer::Enemy, &[Layer::Tile, Layer::Player, Layer::Platform, Layer::Projectile])
            .set(Layer::Item, &[Layer::Tile, Layer::Player, Layer::Platform])
            .set(Layer::Platform, &[Layer::Player, Layer::Enemy, Layer::Item])
            .set(Layer::Projectile, &[Layer::Tile, Layer::Enemy]);
        m
    }
}
