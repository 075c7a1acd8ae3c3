//! Iteration-scoped arena of polygon records for one coastline.
//!
//! The arena owns every [`CoastPolygon`] of a coast for the current
//! iteration; coast-local ids are indices into it, so lookups are O(1) and
//! the whole structure is rebuilt from fresh geometry each iteration rather
//! than patched in place.

use std::ops::{Index, IndexMut};

use crate::coast::adjacency::AdjacencyList;
use crate::coast::id::{CoastId, PolyId};
use crate::coast::polygon::{CoastPolygon, PolygonGeometry};
use crate::debug_invariants::DebugInvariants;
use crate::drift_error::DriftError;

/// Tolerance for boundary-share sums when an adjacency list is required to
/// split the whole outflow across real polygons.
pub const SHARE_SUM_TOLERANCE: f64 = 1e-6;

/// All polygons of one coastline, indexed by coast-local id.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolygonArena {
    coast: CoastId,
    polygons: Vec<CoastPolygon>,
}

impl PolygonArena {
    /// Empty arena for `coast`.
    pub fn new(coast: CoastId) -> Self {
        PolygonArena {
            coast,
            polygons: Vec::new(),
        }
    }

    /// Empty arena with room for `capacity` polygons.
    pub fn with_capacity(coast: CoastId, capacity: usize) -> Self {
        PolygonArena {
            coast,
            polygons: Vec::with_capacity(capacity),
        }
    }

    /// Coast this arena belongs to.
    #[inline]
    pub fn coast(&self) -> CoastId {
        self.coast
    }

    /// Appends a polygon built from `geometry`, assigning the next
    /// coast-local id. `down_coast` records this iteration's transport
    /// direction at the new polygon.
    ///
    /// # Errors
    /// [`DriftError::SearchStartOutOfRange`] when the cached point-in-polygon
    /// start does not index the boundary ring.
    pub fn try_push(
        &mut self,
        geometry: PolygonGeometry,
        down_coast: bool,
    ) -> Result<PolyId, DriftError> {
        let id = PolyId::new(self.polygons.len() as u32);
        if geometry.pip_start >= geometry.boundary.len().max(1) {
            return Err(DriftError::SearchStartOutOfRange {
                polygon: id,
                start: geometry.pip_start,
                len: geometry.boundary.len(),
            });
        }
        self.polygons.push(CoastPolygon::new(id, geometry, down_coast));
        Ok(id)
    }

    /// Number of polygons on this coast.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// `true` when the coast has no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Record for `id`, or `None` if out of range.
    #[inline]
    pub fn get(&self, id: PolyId) -> Option<&CoastPolygon> {
        self.polygons.get(id.index())
    }

    /// Mutable record for `id`, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, id: PolyId) -> Option<&mut CoastPolygon> {
        self.polygons.get_mut(id.index())
    }

    /// Records in coast-local id order.
    #[inline]
    pub fn polygons(&self) -> impl Iterator<Item = &CoastPolygon> {
        self.polygons.iter()
    }

    /// Mutable records in coast-local id order.
    #[inline]
    pub fn polygons_mut(&mut self) -> impl Iterator<Item = &mut CoastPolygon> {
        self.polygons.iter_mut()
    }

    /// Coast-local ids, `0..len`.
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = PolyId> {
        (0..self.polygons.len() as u32).map(PolyId::new)
    }

    fn validate_adjacency(
        &self,
        owner: PolyId,
        list: &AdjacencyList,
    ) -> Result<(), DriftError> {
        let mut polygon_only = !list.is_empty();
        for slot in list.slots() {
            match slot.neighbor.polygon() {
                Some(id) if id.index() >= self.polygons.len() => {
                    return Err(DriftError::NeighborOutOfBounds {
                        polygon: owner,
                        neighbor: id,
                        len: self.polygons.len(),
                    });
                }
                Some(_) => {}
                None => polygon_only = false,
            }
        }
        // A list that splits the whole outflow across real polygons must
        // account for the full boundary; lists touching the grid edge carry
        // whatever shares the geometry stage assigned.
        if polygon_only {
            let sum = list.share_sum();
            if (sum - 1.0).abs() > SHARE_SUM_TOLERANCE {
                return Err(DriftError::BoundaryShareSum {
                    polygon: owner,
                    sum,
                });
            }
        }
        Ok(())
    }
}

impl Index<PolyId> for PolygonArena {
    type Output = CoastPolygon;

    /// # Panics
    /// Panics when `id` is not a polygon of this coast.
    #[inline]
    fn index(&self, id: PolyId) -> &CoastPolygon {
        &self.polygons[id.index()]
    }
}

impl IndexMut<PolyId> for PolygonArena {
    /// # Panics
    /// Panics when `id` is not a polygon of this coast.
    #[inline]
    fn index_mut(&mut self, id: PolyId) -> &mut CoastPolygon {
        &mut self.polygons[id.index()]
    }
}

impl DebugInvariants for PolygonArena {
    fn debug_assert_invariants(&self) {
        crate::drift_debug_assert_ok!(self.validate_invariants(), "PolygonArena");
    }

    /// Checks structural and sign invariants over every record:
    /// - adjacency targets stay within the arena;
    /// - all-polygon adjacency shares sum to 1 within [`SHARE_SUM_TOLERANCE`];
    /// - ledger fields respect their sign conventions.
    fn validate_invariants(&self) -> Result<(), DriftError> {
        for poly in &self.polygons {
            self.validate_adjacency(poly.id(), poly.up_coast())?;
            self.validate_adjacency(poly.id(), poly.down_coast())?;
            poly.ledger().validate_signs(poly.id())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coast::adjacency::Neighbor;
    use crate::coast::geometry::WorldPoint;
    use crate::sediment::class::SizeClass;

    fn push_plain(arena: &mut PolygonArena) -> PolyId {
        arena.try_push(PolygonGeometry::default(), true).unwrap()
    }

    #[test]
    fn push_assigns_sequential_ids() {
        let mut arena = PolygonArena::with_capacity(CoastId::new(0), 4);
        assert!(arena.is_empty());
        let a = push_plain(&mut arena);
        let b = push_plain(&mut arena);
        let c = push_plain(&mut arena);
        assert_eq!(
            (a, b, c),
            (PolyId::new(0), PolyId::new(1), PolyId::new(2))
        );
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[b].id(), b);
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn push_rejects_bad_search_start() {
        let mut arena = PolygonArena::new(CoastId::new(1));
        let geometry = PolygonGeometry {
            boundary: vec![
                WorldPoint::new(0.0, 0.0),
                WorldPoint::new(1.0, 0.0),
                WorldPoint::new(0.0, 1.0),
            ],
            pip_start: 3,
            ..PolygonGeometry::default()
        };
        let err = arena.try_push(geometry, false).unwrap_err();
        assert!(matches!(
            err,
            DriftError::SearchStartOutOfRange { start: 3, len: 3, .. }
        ));
        // an empty boundary only admits start 0
        let empty_ok = PolygonGeometry::default();
        arena.try_push(empty_ok, false).unwrap();
    }

    #[test]
    fn get_and_index_agree() {
        let mut arena = PolygonArena::new(CoastId::new(0));
        let id = push_plain(&mut arena);
        assert!(arena.get(id).is_some());
        assert!(arena.get(PolyId::new(9)).is_none());
        arena.get_mut(id).unwrap().set_cell_count(17);
        assert_eq!(arena[id].cell_count(), 17);
    }

    #[test]
    fn invariants_catch_out_of_bounds_neighbor() {
        let mut arena = PolygonArena::new(CoastId::new(0));
        let id = push_plain(&mut arena);
        arena[id]
            .set_down_coast_adjacency(&[Neighbor::Polygon(PolyId::new(5))], &[1.0])
            .unwrap();
        assert!(matches!(
            arena.validate_invariants(),
            Err(DriftError::NeighborOutOfBounds {
                neighbor, len: 1, ..
            }) if neighbor == PolyId::new(5)
        ));
    }

    #[test]
    fn invariants_check_share_sums_for_polygon_only_lists() {
        let mut arena = PolygonArena::new(CoastId::new(0));
        let a = push_plain(&mut arena);
        let b = push_plain(&mut arena);
        let c = push_plain(&mut arena);

        arena[a]
            .set_down_coast_adjacency(
                &[Neighbor::Polygon(b), Neighbor::Polygon(c)],
                &[0.6, 0.3],
            )
            .unwrap();
        assert!(matches!(
            arena.validate_invariants(),
            Err(DriftError::BoundaryShareSum { .. })
        ));

        // a list containing the edge sentinel is exempt from the sum rule
        arena[a]
            .set_down_coast_adjacency(&[Neighbor::GridEdge], &[0.0])
            .unwrap();
        arena.validate_invariants().unwrap();
    }

    #[test]
    fn invariants_check_ledger_signs() {
        let mut arena = PolygonArena::new(CoastId::new(2));
        let id = push_plain(&mut arena);
        arena[id].ledger_mut().stored[SizeClass::Coarse] = -0.2;
        assert!(matches!(
            arena.validate_invariants(),
            Err(DriftError::StoredDepthNegative {
                class: SizeClass::Coarse,
                ..
            })
        ));
    }
}
