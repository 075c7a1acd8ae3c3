//! Cross-polygon and cross-iteration budget state.

use crate::sediment::class::{PerClass, SandCoarse, SizeClass};

/// Unfulfilled deposition demand carried from one polygon to later ones in
/// the processing order, and across iterations if still unmet at the end.
///
/// Only sand and coarse take part: fine sediment goes into suspension and is
/// never re-deposited, so a fine shortfall is dropped rather than carried.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CarryForward {
    sand: f64,
    coarse: f64,
}

impl CarryForward {
    /// Adds a deposition shortfall to the carried demand. Fine shortfalls
    /// are discarded.
    pub fn add(&mut self, class: SizeClass, depth: f64) {
        debug_assert!(depth >= 0.0, "carried shortfall must be non-negative");
        match class {
            SizeClass::Fine => {}
            SizeClass::Sand => self.sand += depth,
            SizeClass::Coarse => self.coarse += depth,
        }
    }

    /// Takes the whole carried demand for `class`, leaving zero behind.
    /// Fine always yields zero.
    pub fn take(&mut self, class: SizeClass) -> f64 {
        match class {
            SizeClass::Fine => 0.0,
            SizeClass::Sand => std::mem::take(&mut self.sand),
            SizeClass::Coarse => std::mem::take(&mut self.coarse),
        }
    }

    /// Currently carried demand without clearing it.
    #[inline]
    pub fn peek(&self, class: SizeClass) -> f64 {
        match class {
            SizeClass::Fine => 0.0,
            SizeClass::Sand => self.sand,
            SizeClass::Coarse => self.coarse,
        }
    }

    /// Carried demand as a sand/coarse pair.
    #[inline]
    pub fn as_pair(&self) -> SandCoarse {
        SandCoarse::new(self.sand, self.coarse)
    }

    /// `true` when nothing is carried.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sand == 0.0 && self.coarse == 0.0
    }
}

/// Coast-wide movement totals for a single iteration.
///
/// Depths here are unsigned magnitudes; the per-polygon ledgers keep the
/// signed convention.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterationTotals {
    /// Depth actually eroded, per class.
    pub eroded: PerClass<f64>,
    /// Depth scheduled for deposition on polygons, per class.
    pub deposited: PerClass<f64>,
    /// Depth exported across the grid edge under the open-edge policy.
    pub left_grid: SandCoarse,
}

/// Movement totals accumulated over a whole run.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunTotals {
    /// Depth eroded over all iterations, per class.
    pub eroded: PerClass<f64>,
    /// Depth deposited over all iterations, per class.
    pub deposited: PerClass<f64>,
    /// Depth lost across the grid edge over all iterations.
    pub left_grid: SandCoarse,
    /// Iterations folded in so far.
    pub iterations: u64,
}

impl RunTotals {
    /// Folds one iteration's totals into the running sums.
    pub fn absorb(&mut self, iter: &IterationTotals) {
        for class in SizeClass::ALL {
            self.eroded[class] += iter.eroded[class];
            self.deposited[class] += iter.deposited[class];
        }
        self.left_grid.sand += iter.left_grid.sand;
        self.left_grid.coarse += iter.left_grid.coarse;
        self.iterations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_accumulates_and_clears_on_take() {
        let mut carry = CarryForward::default();
        assert!(carry.is_empty());

        carry.add(SizeClass::Sand, 0.2);
        carry.add(SizeClass::Sand, 0.3);
        carry.add(SizeClass::Coarse, 0.1);
        assert_eq!(carry.peek(SizeClass::Sand), 0.5);
        assert_eq!(carry.as_pair(), SandCoarse::new(0.5, 0.1));

        assert_eq!(carry.take(SizeClass::Sand), 0.5);
        assert_eq!(carry.take(SizeClass::Sand), 0.0);
        assert_eq!(carry.peek(SizeClass::Coarse), 0.1);
        assert!(!carry.is_empty());
        assert_eq!(carry.take(SizeClass::Coarse), 0.1);
        assert!(carry.is_empty());
    }

    #[test]
    fn fine_shortfall_is_dropped() {
        let mut carry = CarryForward::default();
        carry.add(SizeClass::Fine, 1.5);
        assert!(carry.is_empty());
        assert_eq!(carry.take(SizeClass::Fine), 0.0);
        assert_eq!(carry.peek(SizeClass::Fine), 0.0);
    }

    #[test]
    fn run_totals_absorb_iterations() {
        let mut run = RunTotals::default();
        let mut iter = IterationTotals::default();
        iter.eroded.sand = 0.4;
        iter.deposited.coarse = 0.25;
        iter.left_grid.sand = 0.05;

        run.absorb(&iter);
        run.absorb(&iter);

        assert_eq!(run.iterations, 2);
        assert!((run.eroded.sand - 0.8).abs() < 1e-12);
        assert!((run.deposited.coarse - 0.5).abs() < 1e-12);
        assert!((run.left_grid.sand - 0.1).abs() < 1e-12);
        assert_eq!(run.eroded.fine, 0.0);
    }
}
