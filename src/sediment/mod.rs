//! Sediment bookkeeping: size classes, per-polygon ledgers, and the budget
//! state shared across polygons and iterations.

pub mod budget;
pub mod class;
pub mod ledger;

pub use budget::{CarryForward, IterationTotals, RunTotals};
pub use class::{PerClass, SandCoarse, SizeClass};
pub use ledger::SedimentLedger;
