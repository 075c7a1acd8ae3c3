//! Per-polygon record: geometry metadata, adjacency, and the sediment ledger.

use crate::coast::adjacency::{AdjacencyList, Neighbor};
use crate::coast::geometry::{point_in_ring, GridCoord, WorldPoint};
use crate::coast::id::PolyId;
use crate::drift_error::DriftError;
use crate::sediment::ledger::SedimentLedger;

/// Geometry and provenance handed over by the coastline-segmentation stage.
///
/// The routing engine treats all of this as opaque metadata except for
/// `boundary` and `pip_start`, which back the point-in-polygon query.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolygonGeometry {
    /// Run-wide identifier, unique across every coast in the simulation.
    pub global_id: u32,
    /// Index of this polygon's node on the parent coastline.
    pub coast_node: usize,
    /// Index of the normal profile bounding this polygon on its up-coast side.
    pub profile_up_coast: usize,
    /// Index of the normal profile bounding this polygon on its down-coast side.
    pub profile_down_coast: usize,
    /// Points of the up-coast profile incorporated into the boundary.
    pub up_coast_points_used: usize,
    /// Points of the down-coast profile incorporated into the boundary.
    pub down_coast_points_used: usize,
    /// Boundary ring in the external CRS; the closing edge is implied.
    pub boundary: Vec<WorldPoint>,
    /// Cell at the polygon's coastline node.
    pub node: GridCoord,
    /// Cell at the seaward antinode.
    pub antinode: GridCoord,
    /// Boundary vertex where point-in-polygon edge walks begin.
    pub pip_start: usize,
}

/// One coastal polygon: identity, this iteration's transport direction,
/// geometry, directed adjacency, detected circularities, and sediment state.
///
/// Records are created through [`PolygonArena::try_push`], which assigns the
/// coast-local id.
///
/// [`PolygonArena::try_push`]: crate::coast::PolygonArena::try_push
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoastPolygon {
    id: PolyId,
    down_coast_this_iter: bool,
    geometry: PolygonGeometry,
    cell_count: usize,
    up_coast: AdjacencyList,
    down_coast: AdjacencyList,
    circular_with: Vec<PolyId>,
    ledger: SedimentLedger,
}

impl CoastPolygon {
    pub(crate) fn new(id: PolyId, geometry: PolygonGeometry, down_coast_this_iter: bool) -> Self {
        CoastPolygon {
            id,
            down_coast_this_iter,
            geometry,
            cell_count: 0,
            up_coast: AdjacencyList::default(),
            down_coast: AdjacencyList::default(),
            circular_with: Vec::new(),
            ledger: SedimentLedger::default(),
        }
    }

    /// Coast-local id, equal to this polygon's position along the coastline.
    #[inline]
    pub fn id(&self) -> PolyId {
        self.id
    }

    /// Run-wide id assigned by the segmentation stage.
    #[inline]
    pub fn global_id(&self) -> u32 {
        self.geometry.global_id
    }

    /// `true` when this iteration's longshore transport at this polygon runs
    /// down-coast (towards higher coast-local ids).
    #[inline]
    pub fn is_down_coast(&self) -> bool {
        self.down_coast_this_iter
    }

    /// Overrides the transport direction recorded at construction.
    #[inline]
    pub fn set_down_coast(&mut self, down_coast: bool) {
        self.down_coast_this_iter = down_coast;
    }

    /// Geometry metadata handed over at construction.
    #[inline]
    pub fn geometry(&self) -> &PolygonGeometry {
        &self.geometry
    }

    /// Number of raster cells assigned to this polygon.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Records the raster-cell census for this polygon.
    #[inline]
    pub fn set_cell_count(&mut self, cells: usize) {
        self.cell_count = cells;
    }

    /// Adjacency towards lower coast-local ids.
    #[inline]
    pub fn up_coast(&self) -> &AdjacencyList {
        &self.up_coast
    }

    /// Adjacency towards higher coast-local ids.
    #[inline]
    pub fn down_coast(&self) -> &AdjacencyList {
        &self.down_coast
    }

    /// Replaces the up-coast adjacency.
    ///
    /// # Errors
    /// Propagates [`DriftError::AdjacencyShapeMismatch`] and
    /// [`DriftError::NegativeBoundaryShare`] from slot validation.
    pub fn set_up_coast_adjacency(
        &mut self,
        neighbors: &[Neighbor],
        shares: &[f64],
    ) -> Result<(), DriftError> {
        self.up_coast = AdjacencyList::from_parts(self.id, neighbors, shares)?;
        Ok(())
    }

    /// Replaces the down-coast adjacency.
    ///
    /// # Errors
    /// Propagates [`DriftError::AdjacencyShapeMismatch`] and
    /// [`DriftError::NegativeBoundaryShare`] from slot validation.
    pub fn set_down_coast_adjacency(
        &mut self,
        neighbors: &[Neighbor],
        shares: &[f64],
    ) -> Result<(), DriftError> {
        self.down_coast = AdjacencyList::from_parts(self.id, neighbors, shares)?;
        Ok(())
    }

    /// The adjacency list sediment leaves through this iteration: the
    /// down-coast list when transport runs down-coast, the up-coast list
    /// otherwise.
    #[inline]
    pub fn transport_adjacency(&self) -> &AdjacencyList {
        if self.down_coast_this_iter {
            &self.down_coast
        } else {
            &self.up_coast
        }
    }

    /// Marks `other` as forming a circular hand-off with this polygon.
    pub(crate) fn add_circularity(&mut self, other: PolyId) {
        self.circular_with.push(other);
    }

    /// Polygons this record was found to trade sediment with both ways.
    #[inline]
    pub fn circularities(&self) -> &[PolyId] {
        &self.circular_with
    }

    /// Even-odd containment test against the boundary ring, starting the
    /// edge walk at the cached `pip_start` vertex.
    #[inline]
    pub fn contains(&self, pt: &WorldPoint) -> bool {
        point_in_ring(*pt, &self.geometry.boundary, self.geometry.pip_start)
    }

    /// Sediment state for this iteration.
    #[inline]
    pub fn ledger(&self) -> &SedimentLedger {
        &self.ledger
    }

    /// Mutable sediment state for this iteration.
    #[inline]
    pub fn ledger_mut(&mut self) -> &mut SedimentLedger {
        &mut self.ledger
    }
}
