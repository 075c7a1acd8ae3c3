//! # littoral-drift
//!
//! littoral-drift is a polygon-graph routing engine for coastal
//! morphodynamics: it moves actually-eroded (supply-limited) beach sediment
//! between the polygons a coastline has been segmented into, one iteration
//! at a time. The crate owns the ordering, budgeting, and hand-off logic;
//! wave climate, coastline geometry, and per-cell raster placement stay with
//! external collaborators behind small trait seams.
//!
//! ## Features
//! - Arena-backed polygon records with directed, share-weighted adjacency
//!   and a typed grid-edge sentinel
//! - A processing-order resolver whose pairwise precedence (edge-last,
//!   source-before-target) is a pure, unit-testable function
//! - A three-phase redistribution engine (deposition, supply-limited
//!   erosion, share-split export) with closed/open/recirculating grid-edge
//!   policies
//! - Cross-iteration carry-forward of unmet deposition demand, held in an
//!   explicit routing context rather than hidden globals
//! - Per-polygon sediment ledgers with signed depth conventions checked by
//!   debug invariants
//!
//! ## Determinism
//!
//! Given the same arena contents, context, and placement responses, every
//! pass produces identical orders, ledgers, and totals. Processing order is
//! part of the engine's contract: a polygon's deposition targets include
//! exports computed earlier in the same pass.
//!
//! ## Usage
//! Add `littoral-drift` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! littoral-drift = "0.4"
//! # Optional features:
//! # features = ["check-invariants"]
//! ```

// Re-export our major subsystems:
pub mod coast;
pub mod debug_invariants;
pub mod drift_error;
pub mod routing;
pub mod sediment;

pub use debug_invariants::DebugInvariants;
pub use drift_error::DriftError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::coast::{
        AdjacencyList, AdjacencySlot, CoastId, CoastPolygon, GridCoord, Neighbor, PolyId,
        PolygonArena, PolygonGeometry, WorldPoint,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::drift_error::DriftError;
    pub use crate::routing::{
        route_coastline, run_iteration, update_stored_pools, BucketPlacement, EdgePolicy,
        ErodibilityWeights, IterationReport, PlacementError, ProcessingOrder, RoutingAnomaly,
        RoutingContext, RoutingKey, SedimentPlacement,
    };
    pub use crate::sediment::{
        CarryForward, IterationTotals, PerClass, RunTotals, SandCoarse, SedimentLedger, SizeClass,
    };
}
