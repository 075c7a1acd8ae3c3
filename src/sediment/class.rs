//! Sediment size classes and small per-class containers.

use std::fmt;
use std::ops::{Index, IndexMut};

/// The three grain-size classes tracked by the budget.
///
/// Fine sediment goes into suspension when eroded and never re-deposits on a
/// beach, so several code paths treat it differently from sand and coarse.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum SizeClass {
    /// Silt and clay fractions; suspended on erosion.
    Fine,
    /// Sand fraction.
    Sand,
    /// Gravel and coarser fractions.
    Coarse,
}

impl SizeClass {
    /// All classes in erosion order (fine before sand before coarse).
    pub const ALL: [SizeClass; 3] = [SizeClass::Fine, SizeClass::Sand, SizeClass::Coarse];

    /// Classes that can be deposited on a beach, in deposition order
    /// (coarse settles out before sand).
    pub const DEPOSITION_SEQUENCE: [SizeClass; 2] = [SizeClass::Coarse, SizeClass::Sand];

    /// Lower-case label, used in error and log messages.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            SizeClass::Fine => "fine",
            SizeClass::Sand => "sand",
            SizeClass::Coarse => "coarse",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value per size class.
///
/// Indexable by [`SizeClass`], so phase loops can stay generic over the class
/// they are working on.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerClass<T> {
    /// Fine-fraction value.
    pub fine: T,
    /// Sand-fraction value.
    pub sand: T,
    /// Coarse-fraction value.
    pub coarse: T,
}

impl<T> PerClass<T> {
    /// Builds a container from the three per-class values.
    #[inline]
    pub const fn new(fine: T, sand: T, coarse: T) -> Self {
        PerClass { fine, sand, coarse }
    }

    /// Iterates `(class, value)` pairs in erosion order.
    pub fn iter(&self) -> impl Iterator<Item = (SizeClass, &T)> {
        SizeClass::ALL.iter().map(move |&class| (class, &self[class]))
    }
}

impl PerClass<f64> {
    /// Container with the same depth in every class.
    #[inline]
    pub const fn splat(value: f64) -> Self {
        PerClass::new(value, value, value)
    }

    /// Sum over the three classes.
    #[inline]
    pub fn total(&self) -> f64 {
        self.fine + self.sand + self.coarse
    }
}

impl<T> Index<SizeClass> for PerClass<T> {
    type Output = T;

    #[inline]
    fn index(&self, class: SizeClass) -> &T {
        match class {
            SizeClass::Fine => &self.fine,
            SizeClass::Sand => &self.sand,
            SizeClass::Coarse => &self.coarse,
        }
    }
}

impl<T> IndexMut<SizeClass> for PerClass<T> {
    #[inline]
    fn index_mut(&mut self, class: SizeClass) -> &mut T {
        match class {
            SizeClass::Fine => &mut self.fine,
            SizeClass::Sand => &mut self.sand,
            SizeClass::Coarse => &mut self.coarse,
        }
    }
}

/// Sand and coarse depths for quantities that never have a fine fraction
/// (talus, platform input, off-grid losses, carried-forward demand).
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SandCoarse {
    /// Sand-fraction depth.
    pub sand: f64,
    /// Coarse-fraction depth.
    pub coarse: f64,
}

impl SandCoarse {
    /// Builds a pair from sand and coarse depths.
    #[inline]
    pub const fn new(sand: f64, coarse: f64) -> Self {
        SandCoarse { sand, coarse }
    }

    /// Sum of the two fractions.
    #[inline]
    pub fn total(&self) -> f64 {
        self.sand + self.coarse
    }
}
