//! Minimal geometry carried by polygon records.
//!
//! The routing engine itself never computes geometry: polygon boundaries,
//! profiles and cell assignments come from an external geometry collaborator.
//! What lives here is the data those collaborators hand over (boundary points
//! in external CRS, node/antinode cells in raster CRS) and the one query the
//! boundary sequence exists for: point-in-polygon.

use std::fmt;

/// Raster-grid cell coordinate (column, row).
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridCoord {
    /// Column (x) index.
    pub x: i32,
    /// Row (y) index.
    pub y: i32,
}

impl GridCoord {
    /// Creates a cell coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        GridCoord { x, y }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Point in the run's external (projected) coordinate reference system.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldPoint {
    /// Easting.
    pub x: f64,
    /// Northing.
    pub y: f64,
}

impl WorldPoint {
    /// Creates a world-CRS point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        WorldPoint { x, y }
    }
}

/// Ray-crossing (even-odd) point-in-ring test.
///
/// `ring` is an ordered boundary; the closing edge from the last point back to
/// the first is implied, so the ring may but need not repeat its first point.
/// Traversal starts at `start` (the polygon's cached search-start vertex) and
/// wraps; the hint does not change the answer, it just begins the edge walk
/// where the geometry builder expects queries to land.
///
/// Points exactly on an edge may land on either side. The raster upstream
/// assigns every cell to exactly one polygon, so the engine never depends on
/// boundary-exact answers.
pub(crate) fn point_in_ring(pt: WorldPoint, ring: &[WorldPoint], start: usize) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for k in 0..n {
        let i = (start + k) % n;
        let j = (start + k + 1) % n;
        let (a, b) = (ring[i], ring[j]);
        let crosses = (a.y > pt.y) != (b.y > pt.y);
        if crosses {
            let x_at = a.x + (pt.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if pt.x < x_at {
                inside = !inside;
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<WorldPoint> {
        vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(1.0, 0.0),
            WorldPoint::new(1.0, 1.0),
            WorldPoint::new(0.0, 1.0),
        ]
    }

    #[test]
    fn square_contains_centre_not_outside() {
        let ring = unit_square();
        assert!(point_in_ring(WorldPoint::new(0.5, 0.5), &ring, 0));
        assert!(!point_in_ring(WorldPoint::new(1.5, 0.5), &ring, 0));
        assert!(!point_in_ring(WorldPoint::new(-0.1, 0.99), &ring, 0));
    }

    #[test]
    fn search_start_does_not_change_answer() {
        let ring = unit_square();
        let inside = WorldPoint::new(0.25, 0.75);
        let outside = WorldPoint::new(0.25, 1.75);
        for start in 0..ring.len() {
            assert!(point_in_ring(inside, &ring, start));
            assert!(!point_in_ring(outside, &ring, start));
        }
    }

    #[test]
    fn triangle_and_degenerate_rings() {
        let tri = vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(2.0, 0.0),
            WorldPoint::new(1.0, 2.0),
        ];
        assert!(point_in_ring(WorldPoint::new(1.0, 0.5), &tri, 0));
        assert!(!point_in_ring(WorldPoint::new(1.9, 1.5), &tri, 0));
        // fewer than three points can never contain anything
        assert!(!point_in_ring(WorldPoint::new(0.0, 0.0), &tri[..2], 0));
        assert!(!point_in_ring(WorldPoint::new(0.0, 0.0), &[], 0));
    }

    #[test]
    fn closed_ring_with_repeated_first_point() {
        let mut ring = unit_square();
        ring.push(ring[0]);
        assert!(point_in_ring(WorldPoint::new(0.5, 0.5), &ring, 0));
        assert!(!point_in_ring(WorldPoint::new(2.0, 2.0), &ring, 0));
    }
}
