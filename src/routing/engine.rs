//! Supply-limited redistribution of beach sediment across one coastline.
//!
//! [`route_coastline`] visits every polygon exactly once, in the order a
//! fresh [`ProcessingOrder::resolve`] produced for the same arena, and runs
//! three phases per polygon:
//!
//! - deposition of the targets accumulated so far (coarse, then sand), with
//!   any unplaced remainder pushed into the carried demand;
//! - supply-limited erosion (fine, sand, coarse), each class clamped to its
//!   stored pool, sand and coarse absorbing the carried demand exactly once;
//! - export of whatever sand and coarse actually eroded, split across the
//!   transport-direction adjacency by boundary share, with the grid-edge
//!   policy deciding the fate of sediment leaving the coastline.
//!
//! The order is load-bearing: a polygon's deposition targets must already
//! include every export computed earlier in the same pass, so callers must
//! not reorder, skip, or interleave polygons. Stored pools are left alone
//! here; the placement collaborator owns the cell-level truth and the next
//! iteration rebuilds the arena from it.

use crate::coast::adjacency::{AdjacencySlot, Neighbor};
use crate::coast::arena::PolygonArena;
use crate::coast::id::{CoastId, PolyId};
use crate::drift_error::DriftError;
use crate::routing::context::{EdgePolicy, RoutingAnomaly, RoutingContext};
use crate::routing::order::ProcessingOrder;
use crate::routing::placement::SedimentPlacement;
use crate::sediment::class::{SandCoarse, SizeClass};

/// Routes one coastline's sediment for one iteration.
///
/// `order` must come from [`ProcessingOrder::resolve`] on this same arena,
/// unmodified since. The context carries the edge policy, erodibility
/// weights, carried demand, and accumulators across the pass.
///
/// # Errors
/// [`DriftError::Placement`] or [`DriftError::PlacementOutOfRange`] when the
/// placement collaborator fails or breaks its `0..=target` contract. The
/// pass stops at the failing polygon; earlier polygons keep their mutated
/// ledgers and nothing is rolled back.
pub fn route_coastline<P>(
    arena: &mut PolygonArena,
    order: &ProcessingOrder,
    ctx: &mut RoutingContext,
    placement: &mut P,
) -> Result<(), DriftError>
where
    P: SedimentPlacement + ?Sized,
{
    let coast = arena.coast();
    let count = arena.len();

    for key in order.keys() {
        let id = key.id;

        // Deposition first, coarse settling out before sand. The targets may
        // include exports from polygons already processed this pass.
        for class in SizeClass::DEPOSITION_SEQUENCE {
            let target = arena[id].ledger().deposition[class];
            if target > 0.0 {
                let applied = place_deposition_checked(placement, coast, id, class, target)?;
                let shortfall = target - applied;
                if shortfall > 0.0 {
                    ctx.carry.add(class, shortfall);
                }
                ctx.totals.deposited[class] += applied;
            }
        }

        let potential = -arena[id].ledger().potential_erosion;
        if potential <= 0.0 {
            continue;
        }

        // Erosion, fine to coarse. Eroding a class needs a non-empty stored
        // pool; carried demand is absorbed only by a class that erodes, and
        // stays carried otherwise.
        let mut outflow = SandCoarse::default();
        for class in SizeClass::ALL {
            let stored = arena[id].ledger().stored[class];
            if stored <= 0.0 {
                continue;
            }
            let mut target = (potential * ctx.erodibility.weight(class)).min(stored);
            if class != SizeClass::Fine {
                target += ctx.carry.take(class);
            }
            let eroded = place_erosion_checked(placement, coast, id, class, target)?;
            if eroded > 0.0 {
                arena[id].ledger_mut().erosion[class] = -eroded;
                ctx.totals.eroded[class] += eroded;
                match class {
                    SizeClass::Fine => {}
                    SizeClass::Sand => outflow.sand = eroded,
                    SizeClass::Coarse => outflow.coarse = eroded,
                }
            }
        }

        if outflow.total() <= 0.0 {
            continue;
        }

        // Export what actually eroded. Slots are copied out so neighbor
        // ledgers (the exporting polygon's own included, for self-loops and
        // recirculation) can be written through the arena.
        let down_coast = arena[id].is_down_coast();
        let slots: Vec<AdjacencySlot> = arena[id].transport_adjacency().slots().to_vec();
        for slot in slots {
            match slot.neighbor {
                Neighbor::Polygon(adj) => {
                    let ledger = arena[adj].ledger_mut();
                    if outflow.sand > 0.0 {
                        ledger.deposition.sand += outflow.sand * slot.share;
                    }
                    if outflow.coarse > 0.0 {
                        ledger.deposition.coarse += outflow.coarse * slot.share;
                    }
                }
                Neighbor::GridEdge => {
                    let at_expected_end = if down_coast {
                        id.index() + 1 == count
                    } else {
                        id.index() == 0
                    };
                    if !at_expected_end {
                        let dir = if down_coast { "down-coast" } else { "up-coast" };
                        log::warn!(
                            "coast {coast}: polygon {id} moving sediment {dir} hit the grid \
                             edge away from the coastline end; export stays unrouted"
                        );
                        ctx.record_anomaly(RoutingAnomaly::UnexpectedGridEdge {
                            polygon: id,
                            down_coast,
                        });
                        continue;
                    }
                    match ctx.edge_policy {
                        EdgePolicy::Closed => {
                            log::trace!(
                                "coast {coast}: polygon {id} export stopped at closed grid edge"
                            );
                        }
                        EdgePolicy::Open => {
                            ctx.totals.left_grid.sand += outflow.sand;
                            ctx.totals.left_grid.coarse += outflow.coarse;
                        }
                        EdgePolicy::Recirculate => {
                            let other_end = PolyId::new(0);
                            let ledger = arena[other_end].ledger_mut();
                            if outflow.sand > 0.0 {
                                ledger.deposition.sand += outflow.sand;
                            }
                            if outflow.coarse > 0.0 {
                                ledger.deposition.coarse += outflow.coarse;
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn place_deposition_checked<P>(
    placement: &mut P,
    coast: CoastId,
    polygon: PolyId,
    class: SizeClass,
    target: f64,
) -> Result<f64, DriftError>
where
    P: SedimentPlacement + ?Sized,
{
    let applied = placement
        .place_deposition(coast, polygon, class, target)
        .map_err(|source| DriftError::Placement {
            polygon,
            class,
            source,
        })?;
    if !(0.0..=target).contains(&applied) {
        return Err(DriftError::PlacementOutOfRange {
            polygon,
            class,
            target,
            applied,
        });
    }
    Ok(applied)
}

fn place_erosion_checked<P>(
    placement: &mut P,
    coast: CoastId,
    polygon: PolyId,
    class: SizeClass,
    target: f64,
) -> Result<f64, DriftError>
where
    P: SedimentPlacement + ?Sized,
{
    let applied = placement
        .place_erosion(coast, polygon, class, target)
        .map_err(|source| DriftError::Placement {
            polygon,
            class,
            source,
        })?;
    if !(0.0..=target).contains(&applied) {
        return Err(DriftError::PlacementOutOfRange {
            polygon,
            class,
            target,
            applied,
        });
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coast::polygon::PolygonGeometry;
    use crate::routing::context::ErodibilityWeights;
    use crate::routing::placement::{BucketPlacement, PlacementError};
    use crate::sediment::class::PerClass;

    const COAST: CoastId = CoastId::new(0);

    fn one_polygon_arena() -> PolygonArena {
        let mut arena = PolygonArena::new(COAST);
        arena.try_push(PolygonGeometry::default(), true).unwrap();
        arena
    }

    /// Claims to have eroded more than asked; never fails outright.
    struct OverEager;

    impl SedimentPlacement for OverEager {
        fn place_deposition(
            &mut self,
            _coast: CoastId,
            _polygon: PolyId,
            _class: SizeClass,
            target: f64,
        ) -> Result<f64, PlacementError> {
            Ok(target)
        }

        fn place_erosion(
            &mut self,
            _coast: CoastId,
            _polygon: PolyId,
            _class: SizeClass,
            target: f64,
        ) -> Result<f64, PlacementError> {
            Ok(target * 2.0 + 1.0)
        }
    }

    struct AlwaysFails;

    impl SedimentPlacement for AlwaysFails {
        fn place_deposition(
            &mut self,
            _coast: CoastId,
            _polygon: PolyId,
            _class: SizeClass,
            _target: f64,
        ) -> Result<f64, PlacementError> {
            Err(PlacementError::Backend("raster offline".into()))
        }

        fn place_erosion(
            &mut self,
            _coast: CoastId,
            _polygon: PolyId,
            _class: SizeClass,
            _target: f64,
        ) -> Result<f64, PlacementError> {
            Err(PlacementError::Backend("raster offline".into()))
        }
    }

    #[test]
    fn contract_breaking_placement_is_an_error() {
        let mut arena = one_polygon_arena();
        let id = PolyId::new(0);
        arena[id].ledger_mut().potential_erosion = -1.0;
        arena[id].ledger_mut().stored.sand = 0.5;

        let order = ProcessingOrder::resolve(&mut arena);
        let mut ctx = RoutingContext::default();
        let err = route_coastline(&mut arena, &order, &mut ctx, &mut OverEager).unwrap_err();
        assert!(matches!(
            err,
            DriftError::PlacementOutOfRange {
                class: SizeClass::Sand,
                ..
            }
        ));
    }

    #[test]
    fn placement_failure_carries_polygon_and_class() {
        let mut arena = one_polygon_arena();
        let id = PolyId::new(0);
        arena[id].ledger_mut().deposition.coarse = 0.3;

        let order = ProcessingOrder::resolve(&mut arena);
        let mut ctx = RoutingContext::default();
        let err = route_coastline(&mut arena, &order, &mut ctx, &mut AlwaysFails).unwrap_err();
        match err {
            DriftError::Placement {
                polygon,
                class,
                source,
            } => {
                assert_eq!(polygon, id);
                assert_eq!(class, SizeClass::Coarse);
                assert_eq!(source, PlacementError::Backend("raster offline".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn carry_stays_put_when_the_class_pool_is_empty() {
        let mut arena = one_polygon_arena();
        let id = PolyId::new(0);
        arena[id].ledger_mut().potential_erosion = -1.0;
        // no stored sand, so the carried sand demand must survive the pass
        arena[id].ledger_mut().stored.coarse = 0.2;

        let mut placement = BucketPlacement::new();
        placement.insert(COAST, id, PerClass::new(0.0, 0.0, 0.2));

        let order = ProcessingOrder::resolve(&mut arena);
        let mut ctx = RoutingContext::default();
        ctx.carry.add(SizeClass::Sand, 0.7);
        ctx.carry.add(SizeClass::Coarse, 0.1);

        route_coastline(&mut arena, &order, &mut ctx, &mut placement).unwrap();

        assert_eq!(ctx.carry().peek(SizeClass::Sand), 0.7);
        // coarse pool existed, so its carry was absorbed into the target
        assert_eq!(ctx.carry().peek(SizeClass::Coarse), 0.0);
        // 0.2 stored limits the class potential, carry lifts the target to
        // 0.2/3 + 0.1, all of it available at cell level up to 0.2
        let eroded = -arena[id].ledger().erosion.coarse;
        assert!(eroded > 0.0);
        assert!(eroded <= 0.2);
    }

    #[test]
    fn erosion_ledger_is_set_not_accumulated() {
        let mut arena = one_polygon_arena();
        let id = PolyId::new(0);
        arena[id].ledger_mut().potential_erosion = -0.9;
        arena[id].ledger_mut().stored.fine = 0.4;
        // stale value from some earlier stage must be overwritten
        arena[id].ledger_mut().erosion.fine = -123.0;

        let mut placement = BucketPlacement::new();
        placement.insert(COAST, id, PerClass::new(0.4, 0.0, 0.0));

        let order = ProcessingOrder::resolve(&mut arena);
        let mut ctx =
            RoutingContext::new(EdgePolicy::Closed, ErodibilityWeights::default());
        route_coastline(&mut arena, &order, &mut ctx, &mut placement).unwrap();

        let expected = (0.9 / 3.0_f64).min(0.4);
        assert!((-arena[id].ledger().erosion.fine - expected).abs() < 1e-12);
        assert!((ctx.totals().eroded.fine - expected).abs() < 1e-12);
    }
}
