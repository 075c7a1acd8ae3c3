//! Processing-order resolution for one coastline.
//!
//! Sediment routed off one polygon lands in the deposition ledgers of
//! polygons processed later in the same pass, so the order polygons are
//! visited in is part of the engine's contract, not a tuning knob: sources
//! must come before their targets wherever the pairwise precedence can tell
//! them apart. [`ProcessingOrder::resolve`] produces that order and, as a
//! side effect, records circular hand-offs on the polygon records.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::coast::adjacency::Neighbor;
use crate::coast::arena::PolygonArena;
use crate::coast::id::PolyId;
use crate::coast::polygon::CoastPolygon;

/// Sort key for one polygon: its id, this iteration's transport direction,
/// and the adjacency list transport leaves through.
///
/// Keys are value types detached from the arena so the precedence relation
/// can be exercised on its own.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoutingKey {
    /// Coast-local id.
    pub id: PolyId,
    /// `true` when transport at this polygon runs down-coast.
    pub down_coast: bool,
    /// Neighbors of the transport-direction adjacency list, in slot order.
    pub neighbors: Vec<Neighbor>,
}

impl RoutingKey {
    /// Extracts the key for one polygon record.
    pub fn from_polygon(poly: &CoastPolygon) -> Self {
        RoutingKey {
            id: poly.id(),
            down_coast: poly.is_down_coast(),
            neighbors: poly.transport_adjacency().neighbors().collect(),
        }
    }

    fn first_neighbor_is_grid_edge(&self) -> bool {
        matches!(self.neighbors.first(), Some(Neighbor::GridEdge))
    }

    fn feeds(&self, other: PolyId) -> bool {
        self.neighbors.contains(&Neighbor::Polygon(other))
    }
}

/// Pairwise precedence between two polygons' routing keys.
///
/// Rules, first match wins; rules 1 to 3 only apply when both keys carry at
/// least one neighbor:
/// 1. A key whose first neighbor is the grid edge goes after one whose first
///    neighbor is a polygon; two edge-first keys are tied.
/// 2. If the left key's neighbors contain the right key's id, the left is a
///    source of the right and goes first.
/// 3. Symmetrically, if the right feeds the left, the right goes first.
/// 4. Tie-break on the full `(id, direction, neighbors)` tuple, ascending
///    when the left key's transport runs down-coast and descending when it
///    runs up-coast. Ids are unique, so this always resolves; it carries no
///    physical meaning beyond reproducibility.
///
/// A mutually-feeding pair trips rules 2 and 3 at once; neither side gets
/// precedence and the pair falls through to rule 4. Such pairs surface later
/// as circularities.
///
/// The relation is not transitive across dependency chains (A feeds B and B
/// feeds C say nothing about A versus C), so it must not be handed to sorts
/// that require a total order; see [`stable_insertion_sort`].
pub fn routing_precedence(l: &RoutingKey, r: &RoutingKey) -> Ordering {
    if !l.neighbors.is_empty() && !r.neighbors.is_empty() {
        match (l.first_neighbor_is_grid_edge(), r.first_neighbor_is_grid_edge()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        match (l.feeds(r.id), r.feeds(l.id)) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    let forward = (l.id, l.down_coast, &l.neighbors).cmp(&(r.id, r.down_coast, &r.neighbors));
    if l.down_coast { forward } else { forward.reverse() }
}

/// Stable sort by [`routing_precedence`].
///
/// The precedence relation is intentionally not a total order, and the
/// standard library sorts are free to misbehave when their comparator is
/// inconsistent. Plain insertion keeps stability, terminates for any
/// comparator, and the arenas being sorted hold tens of keys, so the
/// quadratic bound never matters.
fn stable_insertion_sort(keys: &mut [RoutingKey]) {
    for i in 1..keys.len() {
        let mut j = i;
        while j > 0 && routing_precedence(&keys[j - 1], &keys[j]) == Ordering::Greater {
            keys.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Resolved visiting order for one coastline's iteration, plus the circular
/// hand-offs found while resolving.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessingOrder {
    keys: Vec<RoutingKey>,
    circular_pairs: Vec<(PolyId, PolyId)>,
}

impl ProcessingOrder {
    /// Sorts the arena's polygons by [`routing_precedence`] and walks the
    /// sorted sequence for circular hand-offs.
    ///
    /// The walk keeps a growing list of polygons already emitted as sources;
    /// a transport-direction target found in that list means the pair trades
    /// sediment both ways, and the circularity is recorded symmetrically on
    /// both records. A polygon's own id is emitted before its targets are
    /// checked, so only pairs (and self-loops) are found; longer cycles pass
    /// through undetected, which downstream reporting relies on.
    ///
    /// # Determinism
    /// Output depends only on the arena's ids, direction flags, and
    /// adjacency lists.
    pub fn resolve(arena: &mut PolygonArena) -> Self {
        let mut keys: Vec<RoutingKey> = arena.polygons().map(RoutingKey::from_polygon).collect();
        stable_insertion_sort(&mut keys);

        let mut emitted: Vec<PolyId> = Vec::with_capacity(keys.len());
        let mut circular_pairs = Vec::new();
        for key in &keys {
            emitted.push(key.id);
            for target in key.neighbors.iter().filter_map(|n| n.polygon()) {
                if emitted.contains(&target) {
                    log::debug!(
                        "coast {}: circular sediment hand-off between polygons {} and {}",
                        arena.coast(),
                        key.id,
                        target
                    );
                    arena[key.id].add_circularity(target);
                    arena[target].add_circularity(key.id);
                    circular_pairs.push((key.id, target));
                }
            }
        }
        ProcessingOrder {
            keys,
            circular_pairs,
        }
    }

    /// Keys in processing order.
    #[inline]
    pub fn keys(&self) -> &[RoutingKey] {
        &self.keys
    }

    /// Polygon ids in processing order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = PolyId> + '_ {
        self.keys.iter().map(|k| k.id)
    }

    /// Circular pairs in discovery order, `(later polygon, earlier polygon)`.
    #[inline]
    pub fn circular_pairs(&self) -> &[(PolyId, PolyId)] {
        &self.circular_pairs
    }

    /// Number of polygons ordered.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` when the coastline had no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl std::fmt::Display for ProcessingOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keys.iter().map(|k| k.id).join(" -> "))?;
        if !self.circular_pairs.is_empty() {
            let pairs = self
                .circular_pairs
                .iter()
                .map(|(a, b)| format!("{a}<->{b}"))
                .join(", ");
            write!(f, " (circular: {pairs})")?;
        }
        Ok(())
    }
}
