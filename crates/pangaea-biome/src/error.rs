//! Generation error types.

use crate::World;

/// Errors raised while configuring or running a generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Grid dimensions or seed count cannot produce a world.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No unclaimed tile with non-zero openness exists, or no archetype is selectable.
    #[error("no placement available for a new seed")]
    NoPlacementAvailable,

    /// The spread loop hit its step cap or stopped making progress.
    #[error("spread did not cover the grid after {steps} steps ({claimed}/{total} tiles claimed)")]
    NonTerminatingSpread {
        steps: u32,
        claimed: usize,
        total: usize,
    },
}

/// A generation that stopped early, together with whatever it produced.
#[derive(Debug, thiserror::Error)]
#[error("world generation aborted")]
pub struct Aborted {
    /// What went wrong.
    #[source]
    pub error: GenerationError,
    /// The grid and biomes as they stood when generation stopped.
    pub partial: World,
}
