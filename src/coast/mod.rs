//! Coastline-side data model: ids, geometry metadata, directed adjacency,
//! and the per-iteration polygon arena.

pub mod adjacency;
pub mod arena;
pub mod geometry;
pub mod id;
pub mod polygon;

pub use adjacency::{AdjacencyList, AdjacencySlot, Neighbor};
pub use arena::{PolygonArena, SHARE_SUM_TOLERANCE};
pub use geometry::{GridCoord, WorldPoint};
pub use id::{CoastId, PolyId};
pub use polygon::{CoastPolygon, PolygonGeometry};
