//! Strong id newtypes for coastlines and coastal polygons.
//!
//! A [`PolyId`] is the coast-local number of a polygon and doubles as its
//! stable index into the owning [`PolygonArena`](crate::coast::PolygonArena):
//! polygon 0 is the up-coast end of the coastline, the highest id the
//! down-coast end. The arena is rebuilt every iteration, so a `PolyId` only
//! means "same relative position along the coast" across iterations, never
//! "same physical polygon".
//!
//! There is deliberately no reserved sentinel value here. "No adjacent
//! polygon, just the grid edge" is expressed by the tagged
//! [`Neighbor::GridEdge`](crate::coast::Neighbor) variant instead of a magic
//! id, so every `PolyId` that exists is a valid index.
//!
//! # Memory layout
//! Both newtypes are `repr(transparent)` over their integer and can cross FFI
//! or be packed into snapshot buffers exactly like the raw value.

use std::fmt;

/// Coast-local polygon id; also the polygon's index in its arena.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct PolyId(u32);

impl PolyId {
    /// Creates a `PolyId` from a raw coast-local number.
    ///
    /// # Example
    /// ```rust
    /// use littoral_drift::coast::PolyId;
    /// let p = PolyId::new(3);
    /// assert_eq!(p.get(), 3);
    /// assert_eq!(p.index(), 3);
    /// ```
    #[inline]
    pub const fn new(raw: u32) -> Self {
        PolyId(raw)
    }

    /// Returns the raw coast-local number.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the arena index for this id.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Prints the numeric id without wrapper text (for logs and error messages).
impl fmt::Display for PolyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one coastline within a simulation run.
///
/// The routing engine handles one coastline at a time; the id is threaded
/// through placement-collaborator calls so a multi-coast placement backend can
/// keep its stores apart.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[repr(transparent)]
pub struct CoastId(u32);

impl CoastId {
    /// Creates a `CoastId` from a raw coastline number.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        CoastId(raw)
    }

    /// Returns the raw coastline number.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CoastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}



#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let p = PolyId::new(123);
        let s = serde_json::to_string(&p).unwrap();
        let p2: PolyId = serde_json::from_str(&s).unwrap();
        assert_eq!(p2, p);
    }

    #[test]
    fn bincode_roundtrip() {
        let c = CoastId::new(456);
        let bytes = bincode::serialize(&c).unwrap();
        let c2: CoastId = bincode::deserialize(&bytes).unwrap();
        assert_eq!(c2, c);
    }
}
