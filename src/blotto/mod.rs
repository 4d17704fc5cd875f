//! The Colonel Blotto game itself.
//!
//! Two players distribute the same number of soldiers across castles of
//! differing value. Each castle goes to whoever sent more soldiers, and the
//! player holding more castle points wins the match.
//!
//! # Key Types
//!
//! - [`CastleSet`]: per-castle victory points
//! - [`Allocation`]: one strategy (soldiers per castle)
//! - [`ScoringMode`]: whether fitness counts wins or points
//! - [`MatchOutcome`]: result of [`evaluate_match`]

mod battle;
mod types;

pub use battle::{battle, evaluate_match, MatchOutcome};
pub use types::{Allocation, CastleSet, ScoringMode};
