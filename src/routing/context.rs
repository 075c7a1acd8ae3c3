//! Run-level routing state: policies, erodibility weights, carried demand,
//! and movement accounting.

use crate::coast::id::PolyId;
use crate::drift_error::DriftError;
use crate::sediment::budget::{CarryForward, IterationTotals, RunTotals};
use crate::sediment::class::{SandCoarse, SizeClass};

/// What happens to sediment whose transport direction points across the
/// grid edge.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum EdgePolicy {
    /// The edge is a wall: sediment headed off-grid stays unrouted.
    #[default]
    Closed,
    /// The edge is open: sediment leaves the simulation and is tallied as
    /// lost.
    Open,
    /// The coastline wraps: off-grid sediment re-enters at the coast's first
    /// polygon.
    Recirculate,
}

/// Relative erodibility of the three size classes, held normalized so the
/// weights sum to 1.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErodibilityWeights {
    fine: f64,
    sand: f64,
    coarse: f64,
}

impl ErodibilityWeights {
    /// Normalizes raw erodibility values into weights.
    ///
    /// # Errors
    /// [`DriftError::InvalidErodibility`] when a value is negative or
    /// non-finite, or the sum is not positive.
    pub fn from_raw(fine: f64, sand: f64, coarse: f64) -> Result<Self, DriftError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        let sum = fine + sand + coarse;
        if !ok(fine) || !ok(sand) || !ok(coarse) || !(sum > 0.0) {
            return Err(DriftError::InvalidErodibility { fine, sand, coarse });
        }
        Ok(ErodibilityWeights {
            fine: fine / sum,
            sand: sand / sum,
            coarse: coarse / sum,
        })
    }

    /// Normalized weight for `class`.
    #[inline]
    pub fn weight(&self, class: SizeClass) -> f64 {
        match class {
            SizeClass::Fine => self.fine,
            SizeClass::Sand => self.sand,
            SizeClass::Coarse => self.coarse,
        }
    }
}

impl Default for ErodibilityWeights {
    /// Equal weights for all three classes.
    fn default() -> Self {
        ErodibilityWeights {
            fine: 1.0 / 3.0,
            sand: 1.0 / 3.0,
            coarse: 1.0 / 3.0,
        }
    }
}

/// Off-pattern situation the engine records and routes around instead of
/// failing the iteration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RoutingAnomaly {
    /// A polygon's adjacency pointed at the grid edge although the polygon
    /// is not at the expected end of the coastline for its transport
    /// direction. The would-be export stays unrouted.
    UnexpectedGridEdge {
        /// Polygon whose adjacency carried the sentinel.
        polygon: PolyId,
        /// Transport direction at that polygon.
        down_coast: bool,
    },
}

impl std::fmt::Display for RoutingAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingAnomaly::UnexpectedGridEdge { polygon, down_coast } => {
                let dir = if *down_coast { "down-coast" } else { "up-coast" };
                write!(
                    f,
                    "polygon {polygon} hit the grid edge {dir} away from the coastline end"
                )
            }
        }
    }
}

/// Everything one iteration leaves behind for the caller.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterationReport {
    /// Coast-wide movement totals for the finished iteration.
    pub totals: IterationTotals,
    /// Anomalies recorded while routing.
    pub anomalies: Vec<RoutingAnomaly>,
    /// Demand still unmet at the end of the iteration; the context keeps
    /// carrying it into the next one.
    pub carried_forward: SandCoarse,
}

/// Mutable state threaded through the routing passes of a run.
///
/// One context serves a whole run: carried demand and run totals survive
/// from iteration to iteration, the per-iteration fields are taken out by
/// [`RoutingContext::finish_iteration`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoutingContext {
    /// Grid-edge handling for this run.
    pub edge_policy: EdgePolicy,
    /// Class erodibility weights for this run.
    pub erodibility: ErodibilityWeights,
    pub(crate) carry: CarryForward,
    pub(crate) totals: IterationTotals,
    run_totals: RunTotals,
    anomalies: Vec<RoutingAnomaly>,
}

impl RoutingContext {
    /// Fresh context with the given policy and weights.
    pub fn new(edge_policy: EdgePolicy, erodibility: ErodibilityWeights) -> Self {
        RoutingContext {
            edge_policy,
            erodibility,
            ..RoutingContext::default()
        }
    }

    /// Demand currently carried forward.
    #[inline]
    pub fn carry(&self) -> &CarryForward {
        &self.carry
    }

    /// Movement totals of the iteration in progress.
    #[inline]
    pub fn totals(&self) -> &IterationTotals {
        &self.totals
    }

    /// Totals over all finished iterations.
    #[inline]
    pub fn run_totals(&self) -> &RunTotals {
        &self.run_totals
    }

    /// Anomalies recorded since the last [`finish_iteration`].
    ///
    /// [`finish_iteration`]: RoutingContext::finish_iteration
    #[inline]
    pub fn anomalies(&self) -> &[RoutingAnomaly] {
        &self.anomalies
    }

    pub(crate) fn record_anomaly(&mut self, anomaly: RoutingAnomaly) {
        self.anomalies.push(anomaly);
    }

    /// Closes out the iteration: folds its totals into the run totals,
    /// hands back totals and anomalies, and reports (without clearing) the
    /// demand still carried forward.
    pub fn finish_iteration(&mut self) -> IterationReport {
        let totals = std::mem::take(&mut self.totals);
        self.run_totals.absorb(&totals);
        IterationReport {
            totals,
            anomalies: std::mem::take(&mut self.anomalies),
            carried_forward: self.carry.as_pair(),
        }
    }
}
