use super::*;

use crate::coast::adjacency::Neighbor;
use crate::coast::id::{CoastId, PolyId};
use crate::coast::polygon::PolygonGeometry;
use crate::sediment::class::PerClass;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Linear coastline of `n` polygons with a consistent transport direction.
/// Interior polygons feed their next one or two neighbors (split shares when
/// two), and the draining end carries the grid-edge sentinel first.
fn chain_arena(n: usize, down_coast: bool, rng: &mut SmallRng) -> PolygonArena {
    let mut arena = PolygonArena::with_capacity(CoastId::new(0), n);
    for _ in 0..n {
        arena
            .try_push(PolygonGeometry::default(), down_coast)
            .unwrap();
    }
    for i in 0..n {
        let id = PolyId::new(i as u32);
        let targets: Vec<usize> = if down_coast {
            (i + 1..n).take(2).collect()
        } else {
            (0..i).rev().take(2).collect()
        };
        let (neighbors, shares): (Vec<Neighbor>, Vec<f64>) = if targets.is_empty() {
            (vec![Neighbor::GridEdge], vec![0.0])
        } else if targets.len() == 2 && rng.gen_bool(0.5) {
            let split = rng.gen_range(0.1..0.9);
            (
                targets
                    .iter()
                    .map(|&t| Neighbor::Polygon(PolyId::new(t as u32)))
                    .collect(),
                vec![split, 1.0 - split],
            )
        } else {
            (
                vec![Neighbor::Polygon(PolyId::new(targets[0] as u32))],
                vec![1.0],
            )
        };
        if down_coast {
            arena[id]
                .set_down_coast_adjacency(&neighbors, &shares)
                .unwrap();
        } else {
            arena[id]
                .set_up_coast_adjacency(&neighbors, &shares)
                .unwrap();
        }
    }
    arena
}

/// Mirrors every polygon's stored pools into a bucket backend with unlimited
/// deposition headroom.
fn bucket_for(arena: &PolygonArena) -> BucketPlacement {
    let mut placement = BucketPlacement::new();
    for poly in arena.polygons() {
        placement.insert(arena.coast(), poly.id(), poly.ledger().stored);
    }
    placement
}

#[test]
fn tiny_coast_routes_end_to_end() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut arena = chain_arena(3, true, &mut rng);
    for poly in arena.polygons_mut() {
        let ledger = poly.ledger_mut();
        ledger.potential_erosion = -0.5;
        ledger.stored = PerClass::new(0.0, 0.2, 0.1);
    }
    let mut placement = bucket_for(&arena);
    let mut ctx = RoutingContext::new(EdgePolicy::Open, ErodibilityWeights::default());

    let order = run_iteration(&mut arena, &mut ctx, &mut placement).unwrap();
    assert_eq!(order.len(), 3);
    assert!(order.circular_pairs().is_empty());

    let report = ctx.finish_iteration();
    assert!(report.totals.eroded.sand > 0.0);
    assert!(report.anomalies.is_empty());
}
