//! Seam between depth-level routing and cell-level sediment placement.
//!
//! The engine decides how much of each class a polygon should gain or lose;
//! a [`SedimentPlacement`] collaborator owns the raster truth and decides how
//! much of that request physically fits (cell stacks fill up, pools run dry
//! between the census and placement). The engine budgets with the applied
//! depths the collaborator reports, never with its own requests.

use hashbrown::HashMap;

use crate::coast::id::{CoastId, PolyId};
use crate::sediment::class::{PerClass, SizeClass};

/// Failure inside a placement collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    /// The collaborator has no cell state for the polygon.
    #[error("no cell state tracked for polygon {0}")]
    UntrackedPolygon(PolyId),
    /// Backend-specific failure (raster I/O, storage, ...).
    #[error("placement backend: {0}")]
    Backend(String),
}

/// Applies per-polygon depth changes to whatever holds the cells.
///
/// Contract for both methods: `target >= 0`, and the returned applied depth
/// lies in `0..=target`. The engine checks this and treats a violation as a
/// [`DriftError::PlacementOutOfRange`].
///
/// [`DriftError::PlacementOutOfRange`]: crate::drift_error::DriftError::PlacementOutOfRange
pub trait SedimentPlacement {
    /// Lays up to `target` metres of `class` onto the polygon's cells and
    /// returns the depth actually placed.
    ///
    /// # Errors
    /// Any [`PlacementError`]; the engine aborts the coastline's iteration.
    fn place_deposition(
        &mut self,
        coast: CoastId,
        polygon: PolyId,
        class: SizeClass,
        target: f64,
    ) -> Result<f64, PlacementError>;

    /// Removes up to `target` metres of `class` from the polygon's cells and
    /// returns the depth actually removed.
    ///
    /// # Errors
    /// Any [`PlacementError`]; the engine aborts the coastline's iteration.
    fn place_erosion(
        &mut self,
        coast: CoastId,
        polygon: PolyId,
        class: SizeClass,
        target: f64,
    ) -> Result<f64, PlacementError>;
}

#[derive(Copy, Clone, Debug)]
struct Bucket {
    available: PerClass<f64>,
    headroom: PerClass<f64>,
}

/// Aggregate placement backend: one erodible pool and one deposition
/// headroom per polygon, no per-cell resolution.
///
/// Useful as the default collaborator when no raster is attached, and as the
/// test double for engine behaviour: headroom defaults to unlimited, so a
/// fresh bucket accepts every deposition request in full.
#[derive(Clone, Debug, Default)]
pub struct BucketPlacement {
    cells: HashMap<(CoastId, PolyId), Bucket>,
}

impl BucketPlacement {
    /// Empty backend tracking no polygons.
    pub fn new() -> Self {
        BucketPlacement::default()
    }

    /// Starts tracking a polygon with `available` erodible depth per class
    /// and unlimited deposition headroom.
    pub fn insert(&mut self, coast: CoastId, polygon: PolyId, available: PerClass<f64>) {
        self.cells.insert(
            (coast, polygon),
            Bucket {
                available,
                headroom: PerClass::splat(f64::INFINITY),
            },
        );
    }

    /// Caps how much deposition the polygon's cells will accept per class.
    /// The polygon must already be tracked.
    pub fn set_headroom(&mut self, coast: CoastId, polygon: PolyId, headroom: PerClass<f64>) {
        if let Some(bucket) = self.cells.get_mut(&(coast, polygon)) {
            bucket.headroom = headroom;
        }
    }

    /// Remaining erodible depth for a tracked polygon.
    pub fn available(&self, coast: CoastId, polygon: PolyId) -> Option<PerClass<f64>> {
        self.cells.get(&(coast, polygon)).map(|b| b.available)
    }

    /// Remaining deposition headroom for a tracked polygon.
    pub fn headroom(&self, coast: CoastId, polygon: PolyId) -> Option<PerClass<f64>> {
        self.cells.get(&(coast, polygon)).map(|b| b.headroom)
    }

    fn bucket_mut(
        &mut self,
        coast: CoastId,
        polygon: PolyId,
    ) -> Result<&mut Bucket, PlacementError> {
        self.cells
            .get_mut(&(coast, polygon))
            .ok_or(PlacementError::UntrackedPolygon(polygon))
    }
}

impl SedimentPlacement for BucketPlacement {
    fn place_deposition(
        &mut self,
        coast: CoastId,
        polygon: PolyId,
        class: SizeClass,
        target: f64,
    ) -> Result<f64, PlacementError> {
        let bucket = self.bucket_mut(coast, polygon)?;
        let applied = target.min(bucket.headroom[class]);
        bucket.headroom[class] -= applied;
        bucket.available[class] += applied;
        Ok(applied)
    }

    fn place_erosion(
        &mut self,
        coast: CoastId,
        polygon: PolyId,
        class: SizeClass,
        target: f64,
    ) -> Result<f64, PlacementError> {
        let bucket = self.bucket_mut(coast, polygon)?;
        let applied = target.min(bucket.available[class]);
        bucket.available[class] -= applied;
        Ok(applied)
    }
}
