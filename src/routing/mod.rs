//! Sediment routing: order resolution, the redistribution engine, and the
//! run-level context threaded between them.
//!
//! One iteration of one coastline is [`run_iteration`]: fold upstream
//! platform and talus input into the stored pools, resolve the processing
//! order, then route. The pieces are public so callers that need to inspect
//! the order before routing (or skip the pool update) can compose them
//! directly.

pub mod context;
pub mod engine;
pub mod order;
pub mod placement;

#[cfg(test)]
mod tests;

pub use context::{
    EdgePolicy, ErodibilityWeights, IterationReport, RoutingAnomaly, RoutingContext,
};
pub use engine::route_coastline;
pub use order::{routing_precedence, ProcessingOrder, RoutingKey};
pub use placement::{BucketPlacement, PlacementError, SedimentPlacement};

use crate::coast::arena::PolygonArena;
use crate::debug_invariants::DebugInvariants;
use crate::drift_error::DriftError;

/// Folds shore-platform and cliff-talus input into the stored sand and
/// coarse pools of every polygon.
///
/// Fine fractions of those inputs go to suspension upstream and never pass
/// through here; fine stored pools are untouched by construction.
pub fn update_stored_pools(arena: &mut PolygonArena) {
    for poly in arena.polygons_mut() {
        let ledger = poly.ledger_mut();
        ledger.stored.sand += ledger.platform.sand + ledger.cliff_talus.sand;
        ledger.stored.coarse += ledger.platform.coarse + ledger.cliff_talus.coarse;
    }
}

/// Runs one full iteration for one coastline: pool update, order
/// resolution, then supply-limited routing.
///
/// Returns the resolved order so callers can report it. Call
/// [`RoutingContext::finish_iteration`] afterwards to collect totals and
/// anomalies.
///
/// # Errors
/// Propagates placement failures from [`route_coastline`]; the arena keeps
/// whatever state the pass reached.
pub fn run_iteration<P>(
    arena: &mut PolygonArena,
    ctx: &mut RoutingContext,
    placement: &mut P,
) -> Result<ProcessingOrder, DriftError>
where
    P: SedimentPlacement + ?Sized,
{
    arena.debug_assert_invariants();
    update_stored_pools(arena);
    let order = ProcessingOrder::resolve(arena);
    log::debug!(
        "coast {}: routing {} polygons in order {}",
        arena.coast(),
        order.len(),
        order
    );
    route_coastline(arena, &order, ctx, placement)?;
    Ok(order)
}
