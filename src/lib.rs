//! tilephys: fixed-step physics for tile-based 2D platformers
//! (per-axis tile resolution, grounded probing, layered enter-only contacts).

pub mod types;
pub mod api;
pub mod body;
pub mod config;
pub mod error;
pub mod integrate;
pub mod layers;
pub mod narrowphase;
pub mod tiles;
pub mod timestep;
pub mod world;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::body::{Body, Contact, PhysicsBody};
pub use crate::config::PhysicsConfig;
pub use crate::error::{ConfigError, PhysicsError};
pub use crate::layers::LayerMatrix;
pub use crate::tiles::TileGrid;
pub use crate::timestep::FixedTimestep;
pub use crate::world::PhysicsWorld;
