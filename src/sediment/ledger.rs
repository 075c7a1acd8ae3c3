//! Per-polygon sediment accounting for one iteration.
//!
//! All depths are metres of sediment averaged over the polygon's cell area,
//! signed by convention:
//!
//! | field | sign | meaning |
//! |---|---|---|
//! | `potential_erosion` | <= 0 | unconstrained potential loss |
//! | `erosion` | <= 0 | supply-limited actual loss |
//! | `deposition` | >= 0 | gain scheduled on this polygon |
//! | `cliff_collapse_erosion` | <= 0 | loss carved by cliff collapse |
//! | `cliff_talus` | >= 0 | collapse talus laid on the beach |
//! | `platform` | >= 0 | shore-platform derived input |
//! | `stored` | >= 0 | erodible pool depth |
//!
//! A run of negative depths flowing out and positive depths flowing in keeps
//! coast-wide mass balance a plain sum over ledgers.

use crate::coast::id::PolyId;
use crate::drift_error::DriftError;
use crate::sediment::class::{PerClass, SandCoarse, SizeClass};

/// Sediment state of one polygon for the current iteration.
///
/// Upstream stages (wave energy, cliff collapse, platform erosion) fill the
/// input fields; the routing engine reads `potential_erosion` and `stored`,
/// and writes `erosion` and `deposition`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SedimentLedger {
    /// Mean D50 of unconsolidated sediment in this polygon, in millimetres.
    pub avg_d50: f64,
    /// Seawater volume over the polygon, cubic metres. Diagnostic only.
    pub seawater_volume: f64,
    /// Potential (unconstrained) erosion depth for this iteration, all
    /// classes combined.
    pub potential_erosion: f64,
    /// Actual erosion realised by the engine, per class.
    pub erosion: PerClass<f64>,
    /// Deposition scheduled on this polygon, per class. Seeded by upstream
    /// stages and grown as neighbors export into this polygon.
    pub deposition: PerClass<f64>,
    /// Erosion attributed to cliff collapse, per class.
    pub cliff_collapse_erosion: PerClass<f64>,
    /// Cliff-collapse talus deposited on this polygon's beach.
    pub cliff_talus: SandCoarse,
    /// Shore-platform erosion products delivered to this polygon.
    pub platform: SandCoarse,
    /// Erodible beach pools available to this iteration, per class.
    pub stored: PerClass<f64>,
}

impl SedimentLedger {
    /// Actual erosion over all classes. Non-positive by convention.
    #[inline]
    pub fn total_erosion(&self) -> f64 {
        self.erosion.total()
    }

    /// Scheduled deposition over all classes. Non-negative by convention.
    #[inline]
    pub fn total_deposition(&self) -> f64 {
        self.deposition.total()
    }

    /// Checks every signed field against its convention. NaN fails whichever
    /// side it sits on.
    ///
    /// # Errors
    /// Returns the first violation found, tagged with `polygon`.
    pub fn validate_signs(&self, polygon: PolyId) -> Result<(), DriftError> {
        if !(self.potential_erosion <= 0.0) {
            return Err(DriftError::PotentialErosionSign {
                polygon,
                depth: self.potential_erosion,
            });
        }
        for class in SizeClass::ALL {
            if !(self.stored[class] >= 0.0) {
                return Err(DriftError::StoredDepthNegative {
                    polygon,
                    class,
                    depth: self.stored[class],
                });
            }
            if !(self.erosion[class] <= 0.0) {
                return Err(DriftError::ErosionSignConvention {
                    polygon,
                    class,
                    depth: self.erosion[class],
                });
            }
            if !(self.cliff_collapse_erosion[class] <= 0.0) {
                return Err(DriftError::ErosionSignConvention {
                    polygon,
                    class,
                    depth: self.cliff_collapse_erosion[class],
                });
            }
            if !(self.deposition[class] >= 0.0) {
                return Err(DriftError::DepositionSignConvention {
                    polygon,
                    class,
                    depth: self.deposition[class],
                });
            }
        }
        for (class, depth) in [
            (SizeClass::Sand, self.cliff_talus.sand),
            (SizeClass::Coarse, self.cliff_talus.coarse),
            (SizeClass::Sand, self.platform.sand),
            (SizeClass::Coarse, self.platform.coarse),
        ] {
            if !(depth >= 0.0) {
                return Err(DriftError::DepositionSignConvention {
                    polygon,
                    class,
                    depth,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ledger_is_valid() {
        SedimentLedger::default()
            .validate_signs(PolyId::new(0))
            .unwrap();
    }

    #[test]
    fn totals_sum_over_classes() {
        let mut ledger = SedimentLedger::default();
        ledger.erosion = PerClass::new(-0.1, -0.2, -0.3);
        ledger.deposition = PerClass::new(0.0, 0.4, 0.1);
        assert!((ledger.total_erosion() + 0.6).abs() < 1e-12);
        assert!((ledger.total_deposition() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sign_violations_are_reported() {
        let mut ledger = SedimentLedger::default();
        ledger.potential_erosion = 0.2;
        assert!(matches!(
            ledger.validate_signs(PolyId::new(1)),
            Err(DriftError::PotentialErosionSign { depth, .. }) if depth == 0.2
        ));

        let mut ledger = SedimentLedger::default();
        ledger.stored.sand = -0.05;
        assert!(matches!(
            ledger.validate_signs(PolyId::new(2)),
            Err(DriftError::StoredDepthNegative {
                class: SizeClass::Sand,
                ..
            })
        ));

        let mut ledger = SedimentLedger::default();
        ledger.erosion.coarse = 0.01;
        assert!(matches!(
            ledger.validate_signs(PolyId::new(3)),
            Err(DriftError::ErosionSignConvention {
                class: SizeClass::Coarse,
                ..
            })
        ));

        let mut ledger = SedimentLedger::default();
        ledger.cliff_talus.coarse = -1.0;
        assert!(matches!(
            ledger.validate_signs(PolyId::new(4)),
            Err(DriftError::DepositionSignConvention {
                class: SizeClass::Coarse,
                ..
            })
        ));
    }

    #[test]
    fn nan_fails_validation() {
        let mut ledger = SedimentLedger::default();
        ledger.deposition.fine = f64::NAN;
        assert!(ledger.validate_signs(PolyId::new(0)).is_err());

        let mut ledger = SedimentLedger::default();
        ledger.potential_erosion = f64::NAN;
        assert!(ledger.validate_signs(PolyId::new(0)).is_err());
    }
}
