//! DriftError: unified error type for littoral-drift public APIs.
//!
//! Every fallible operation in the crate reports through this enum so callers
//! can match on failure modes without digging through nested error types. Only
//! placement failures are fatal to a coastline's iteration; construction and
//! validation errors are raised before routing starts.

use thiserror::Error;

use crate::coast::id::PolyId;
use crate::routing::placement::PlacementError;
use crate::sediment::class::SizeClass;

/// Unified error type for littoral-drift operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DriftError {
    /// Adjacency neighbor ids and boundary shares were supplied with
    /// different lengths.
    #[error("polygon {polygon}: adjacency has {ids} neighbor ids but {shares} boundary shares")]
    AdjacencyShapeMismatch {
        /// Polygon whose adjacency was being set.
        polygon: PolyId,
        /// Number of neighbor ids supplied.
        ids: usize,
        /// Number of boundary shares supplied.
        shares: usize,
    },

    /// A boundary share was negative or not finite.
    #[error("polygon {polygon}: boundary share {share} at slot {slot} must be finite and >= 0")]
    NegativeBoundaryShare {
        /// Polygon whose adjacency was being set.
        polygon: PolyId,
        /// Slot index within the adjacency list.
        slot: usize,
        /// Offending share value.
        share: f64,
    },

    /// Boundary shares of an all-polygon adjacency list do not partition the
    /// export (sum is not ≈ 1).
    #[error("polygon {polygon}: boundary shares sum to {sum}, expected ~1")]
    BoundaryShareSum {
        /// Polygon whose list failed validation.
        polygon: PolyId,
        /// Actual sum of the shares.
        sum: f64,
    },

    /// An adjacency entry references a polygon id outside the arena.
    #[error("polygon {polygon}: adjacency references polygon {neighbor} but the coastline has {len} polygons")]
    NeighborOutOfBounds {
        /// Polygon holding the bad reference.
        polygon: PolyId,
        /// The out-of-range neighbor id.
        neighbor: PolyId,
        /// Number of polygons in the arena.
        len: usize,
    },

    /// The cached point-in-polygon search start does not index the boundary.
    #[error("polygon {polygon}: search start {start} out of range for a {len}-point boundary")]
    SearchStartOutOfRange {
        /// Polygon being constructed.
        polygon: PolyId,
        /// Cached start index.
        start: usize,
        /// Boundary point count.
        len: usize,
    },

    /// A stored (or other deposition-like) depth went negative.
    #[error("polygon {polygon}: stored {class} depth {depth} must be >= 0")]
    StoredDepthNegative {
        /// Polygon holding the bad ledger value.
        polygon: PolyId,
        /// Size class of the depth.
        class: SizeClass,
        /// Offending depth.
        depth: f64,
    },

    /// An erosion-like ledger field went positive.
    #[error("polygon {polygon}: {class} erosion {depth} must be <= 0")]
    ErosionSignConvention {
        /// Polygon holding the bad ledger value.
        polygon: PolyId,
        /// Size class of the depth.
        class: SizeClass,
        /// Offending depth.
        depth: f64,
    },

    /// A deposition-like ledger field went negative.
    #[error("polygon {polygon}: {class} deposition {depth} must be >= 0")]
    DepositionSignConvention {
        /// Polygon holding the bad ledger value.
        polygon: PolyId,
        /// Size class of the depth.
        class: SizeClass,
        /// Offending depth.
        depth: f64,
    },

    /// The all-class potential erosion depth went positive.
    #[error("polygon {polygon}: potential erosion {depth} must be <= 0")]
    PotentialErosionSign {
        /// Polygon holding the bad ledger value.
        polygon: PolyId,
        /// Offending depth.
        depth: f64,
    },

    /// Raw erodibility values could not be normalized (negative, non-finite,
    /// or all zero).
    #[error("erodibilities (fine {fine}, sand {sand}, coarse {coarse}) must be finite, >= 0, with a positive sum")]
    InvalidErodibility {
        /// Raw fine erodibility.
        fine: f64,
        /// Raw sand erodibility.
        sand: f64,
        /// Raw coarse erodibility.
        coarse: f64,
    },

    /// A per-cell placement collaborator failed; the coastline's iteration is
    /// aborted (already-processed polygons keep their state).
    #[error("placement of {class} on polygon {polygon} failed")]
    Placement {
        /// Polygon being processed when the collaborator failed.
        polygon: PolyId,
        /// Size class being placed.
        class: SizeClass,
        /// Collaborator failure.
        #[source]
        source: PlacementError,
    },

    /// A placement collaborator violated its contract by reporting an applied
    /// depth outside `0..=target`.
    #[error("placement of {class} on polygon {polygon} applied {applied}, outside 0..={target}")]
    PlacementOutOfRange {
        /// Polygon being processed.
        polygon: PolyId,
        /// Size class being placed.
        class: SizeClass,
        /// Depth the engine requested.
        target: f64,
        /// Depth the collaborator claims to have applied.
        applied: f64,
    },
}
