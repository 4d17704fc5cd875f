//! Core value types of the Blotto puzzle.
//!
//! A [`CastleSet`] fixes the point value of each castle, an [`Allocation`]
//! is one player's distribution of soldiers across those castles, and a
//! [`ScoringMode`] decides how match outcomes turn into fitness.

use crate::error::{BlottoError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Ordered victory-point values, one per castle.
///
/// Immutable once built. Cloning shares the underlying buffer, so a run
/// can snapshot the castle set without copying it.
///
/// ```
/// use blotto_ga::blotto::CastleSet;
///
/// let castles = CastleSet::new(vec![1, 2, 3]).unwrap();
/// assert_eq!(castles.len(), 3);
/// assert_eq!(castles.total_points(), 6);
/// assert!(CastleSet::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u32>", into = "Vec<u32>"))]
pub struct CastleSet {
    points: Arc<[u32]>,
}

impl CastleSet {
    /// Builds a castle set, rejecting an empty list or a castle worth 0.
    pub fn new(points: Vec<u32>) -> Result<Self> {
        if points.is_empty() {
            return Err(BlottoError::invalid_configuration(
                "at least one castle is required",
            ));
        }
        if let Some(idx) = points.iter().position(|&p| p == 0) {
            return Err(BlottoError::invalid_configuration(format!(
                "castle {idx} must be worth at least 1 point"
            )));
        }
        Ok(Self {
            points: points.into(),
        })
    }

    /// Castles worth `1, 2, ..., n` points, as in the classic puzzle.
    pub fn ascending(n: usize) -> Result<Self> {
        let points = (1..=n)
            .map(|p| {
                u32::try_from(p).map_err(|_| {
                    BlottoError::invalid_configuration(format!("too many castles: {n}"))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        Self::new(points)
    }

    /// Number of castles.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a castle set holds at least one castle.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point value of each castle.
    pub fn points(&self) -> &[u32] {
        &self.points
    }

    /// Sum of all castle values.
    pub fn total_points(&self) -> u64 {
        self.points.iter().map(|&p| u64::from(p)).sum()
    }

    /// Castle indices ordered by point value, cheapest first.
    ///
    /// Castles of equal value keep their original relative order.
    pub fn indices_by_value(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by_key(|&i| self.points[i]);
        order
    }
}

impl TryFrom<Vec<u32>> for CastleSet {
    type Error = BlottoError;

    fn try_from(points: Vec<u32>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<CastleSet> for Vec<u32> {
    fn from(castles: CastleSet) -> Self {
        castles.points.to_vec()
    }
}

/// One individual's soldier distribution across castles.
///
/// Inside the engine every allocation satisfies two invariants: its length
/// equals the number of castles, and its entries sum to the configured
/// soldier total. Entries are unsigned, so non-negativity holds by type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Allocation {
    soldiers: Vec<u32>,
}

impl Allocation {
    /// Wraps `soldiers`, checking that they add up to `total`.
    pub fn new(soldiers: Vec<u32>, total: u32) -> Result<Self> {
        let allocation = Self { soldiers };
        if allocation.total() != u64::from(total) {
            return Err(BlottoError::invalid_configuration(format!(
                "allocation {:?} sums to {}, expected {total}",
                allocation.soldiers,
                allocation.total()
            )));
        }
        Ok(allocation)
    }

    /// Wraps soldiers produced by an operator that upholds the invariants.
    pub(crate) fn from_vec(soldiers: Vec<u32>) -> Self {
        Self { soldiers }
    }

    /// Soldiers sent to each castle.
    pub fn soldiers(&self) -> &[u32] {
        &self.soldiers
    }

    pub(crate) fn soldiers_mut(&mut self) -> &mut [u32] {
        &mut self.soldiers
    }

    /// Number of castles this allocation covers.
    pub fn num_castles(&self) -> usize {
        self.soldiers.len()
    }

    /// Total soldiers deployed.
    pub fn total(&self) -> u64 {
        self.soldiers.iter().map(|&s| u64::from(s)).sum()
    }

    /// Verifies the length and sum invariants.
    ///
    /// A failure here is an internal fault, reported as
    /// [`BlottoError::InvalidState`].
    pub fn check(&self, soldiers: u32, num_castles: usize) -> Result<()> {
        if self.soldiers.len() != num_castles {
            return Err(BlottoError::invalid_state(format!(
                "allocation covers {} castles, expected {num_castles}",
                self.soldiers.len()
            )));
        }
        if self.total() != u64::from(soldiers) {
            return Err(BlottoError::invalid_state(format!(
                "allocation deploys {} soldiers, expected {soldiers}",
                self.total()
            )));
        }
        Ok(())
    }

    /// Consumes the allocation, returning the raw soldier counts.
    pub fn into_vec(self) -> Vec<u32> {
        self.soldiers
    }
}

impl AsRef<[u32]> for Allocation {
    fn as_ref(&self) -> &[u32] {
        &self.soldiers
    }
}

/// How match outcomes accumulate into fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScoringMode {
    /// Fitness counts matches won. Draws count for nobody.
    #[default]
    Wins,
    /// Fitness accumulates the castle points earned in every match.
    Points,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Wins => f.write_str("wins"),
            ScoringMode::Points => f.write_str("points"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = BlottoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wins" | "0" => Ok(ScoringMode::Wins),
            "points" | "1" => Ok(ScoringMode::Points),
            other => Err(BlottoError::invalid_configuration(format!(
                "unknown scoring mode: {other}"
            ))),
        }
    }
}

impl TryFrom<u8> for ScoringMode {
    type Error = BlottoError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ScoringMode::Wins),
            1 => Ok(ScoringMode::Points),
            unknown => Err(BlottoError::invalid_configuration(format!(
                "invalid scoring type: {unknown}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castle_set_rejects_empty_and_zero() {
        assert!(CastleSet::new(vec![]).is_err());
        assert!(matches!(
            CastleSet::new(vec![3, 0, 1]),
            Err(BlottoError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_castle_set_ascending() {
        let castles = CastleSet::ascending(4).unwrap();
        assert_eq!(castles.points(), &[1, 2, 3, 4]);
        assert_eq!(castles.total_points(), 10);
        assert!(CastleSet::ascending(0).is_err());
    }

    #[test]
    fn test_castle_clone_shares_buffer() {
        let castles = CastleSet::new(vec![5, 10]).unwrap();
        let snapshot = castles.clone();
        assert!(Arc::ptr_eq(&castles.points, &snapshot.points));
    }

    #[test]
    fn test_indices_by_value_is_stable() {
        let castles = CastleSet::new(vec![3, 1, 2, 1]).unwrap();
        assert_eq!(castles.indices_by_value(), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_allocation_new_checks_sum() {
        assert!(Allocation::new(vec![1, 2, 3], 6).is_ok());
        assert!(Allocation::new(vec![1, 2, 3], 7).is_err());
        assert!(Allocation::new(vec![], 0).is_ok());
    }

    #[test]
    fn test_allocation_check() {
        let a = Allocation::from_vec(vec![4, 0, 6]);
        assert!(a.check(10, 3).is_ok());
        assert!(matches!(
            a.check(10, 4),
            Err(BlottoError::InvalidState { .. })
        ));
        assert!(matches!(a.check(9, 3), Err(BlottoError::InvalidState { .. })));
    }

    #[test]
    fn test_allocation_total_does_not_overflow() {
        let a = Allocation::from_vec(vec![u32::MAX, u32::MAX]);
        assert_eq!(a.total(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_scoring_mode_parsing() {
        assert_eq!("wins".parse::<ScoringMode>().unwrap(), ScoringMode::Wins);
        assert_eq!("Points".parse::<ScoringMode>().unwrap(), ScoringMode::Points);
        assert_eq!("1".parse::<ScoringMode>().unwrap(), ScoringMode::Points);
        assert!("draws".parse::<ScoringMode>().is_err());

        assert_eq!(ScoringMode::try_from(0).unwrap(), ScoringMode::Wins);
        assert!(ScoringMode::try_from(2).is_err());
        assert_eq!(ScoringMode::Points.to_string(), "points");
    }
}
