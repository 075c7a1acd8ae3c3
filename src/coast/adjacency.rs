//! Directed adjacency for sediment hand-off.
//!
//! Each polygon carries two lists, one per transport direction. A slot pairs a
//! [`Neighbor`] with the fraction of the shared boundary it owns; the engine
//! splits exported sediment across slots in proportion to those shares.
//!
//! The grid edge is a first-class neighbor variant rather than a reserved id,
//! so "this polygon drains off the modelled coast" is visible in the type and
//! cannot collide with a real polygon index.

use crate::coast::id::PolyId;
use crate::drift_error::DriftError;

/// One destination a polygon can hand sediment to.
///
/// Variant order matters: `GridEdge` is declared first so the derived `Ord`
/// sorts it before every `Polygon(_)`, matching the convention that the edge
/// sentinel compares below all real ids.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Neighbor {
    /// The boundary of the modelled raster; sediment crossing it leaves the
    /// polygon graph entirely.
    GridEdge,
    /// An adjacent polygon on the same coast.
    Polygon(PolyId),
}

impl Neighbor {
    /// Returns the polygon id if this neighbor is a real polygon.
    #[inline]
    pub fn polygon(self) -> Option<PolyId> {
        match self {
            Neighbor::Polygon(id) => Some(id),
            Neighbor::GridEdge => None,
        }
    }

    /// `true` when this neighbor is the grid edge.
    #[inline]
    pub fn is_grid_edge(self) -> bool {
        matches!(self, Neighbor::GridEdge)
    }
}

impl std::fmt::Display for Neighbor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Neighbor::GridEdge => write!(f, "edge"),
            Neighbor::Polygon(id) => write!(f, "{id}"),
        }
    }
}

/// A neighbor together with its boundary share in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdjacencySlot {
    /// Where this slot sends sediment.
    pub neighbor: Neighbor,
    /// Fraction of the shared boundary owned by this slot.
    pub share: f64,
}

/// Ordered per-direction adjacency of one polygon.
///
/// Shares of the `Polygon` slots sum to 1 when the list is non-empty and
/// free of `GridEdge` entries; a list containing the edge sentinel carries
/// whatever shares the geometry stage assigned to the remaining slots.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdjacencyList {
    slots: Vec<AdjacencySlot>,
}

impl AdjacencyList {
    /// Builds a list from parallel neighbor/share arrays.
    ///
    /// # Errors
    /// - [`DriftError::AdjacencyShapeMismatch`] when the arrays differ in length.
    /// - [`DriftError::NegativeBoundaryShare`] when a share is negative or non-finite.
    pub(crate) fn from_parts(
        owner: PolyId,
        neighbors: &[Neighbor],
        shares: &[f64],
    ) -> Result<Self, DriftError> {
        if neighbors.len() != shares.len() {
            return Err(DriftError::AdjacencyShapeMismatch {
                polygon: owner,
                ids: neighbors.len(),
                shares: shares.len(),
            });
        }
        for (slot, &share) in shares.iter().enumerate() {
            if !share.is_finite() || share < 0.0 {
                return Err(DriftError::NegativeBoundaryShare {
                    polygon: owner,
                    slot,
                    share,
                });
            }
        }
        let slots = neighbors
            .iter()
            .zip(shares)
            .map(|(&neighbor, &share)| AdjacencySlot { neighbor, share })
            .collect();
        Ok(AdjacencyList { slots })
    }

    /// Slots in hand-off order.
    #[inline]
    pub fn slots(&self) -> &[AdjacencySlot] {
        &self.slots
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when no adjacency has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `true` when the first slot is the grid edge.
    ///
    /// End-of-coast polygons record the edge sentinel in slot 0; the resolver
    /// and the export phase both key off this position.
    #[inline]
    pub fn first_is_grid_edge(&self) -> bool {
        matches!(
            self.slots.first(),
            Some(AdjacencySlot {
                neighbor: Neighbor::GridEdge,
                ..
            })
        )
    }

    /// `true` when `id` appears among the polygon slots.
    #[inline]
    pub fn contains(&self, id: PolyId) -> bool {
        self.slots
            .iter()
            .any(|s| s.neighbor == Neighbor::Polygon(id))
    }

    /// Iterator over the neighbor tags, in slot order.
    #[inline]
    pub fn neighbors(&self) -> impl Iterator<Item = Neighbor> + '_ {
        self.slots.iter().map(|s| s.neighbor)
    }

    /// Sum of all shares, edge slots included.
    #[inline]
    pub fn share_sum(&self) -> f64 {
        self.slots.iter().map(|s| s.share).sum()
    }
}
