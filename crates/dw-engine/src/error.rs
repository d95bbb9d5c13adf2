//! Runtime error taxonomy for verb operations.
//!
//! Every error here is a *player-facing outcome*, surfaced as a return value
//! with a stable message string (the agent driving the session reads these
//! verbatim). Internal invariant violations (mode/enemy mismatches, names
//! that should have been validated at load time) are panics, not variants:
//! they indicate a loader bug and abort the session.

use thiserror::Error;

use dw_world::{AmmoError, CombineError, FixtureError, LockError};

use crate::state::Mode;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors returned by verb operations.
#[derive(Debug, Error)]
pub enum EngineError {
    // --- mode and completion gating ---
    /// The verb is not allowed in the current mode.
    #[error("cannot perform this action in {0} mode")]
    WrongMode(Mode),

    /// The level has already been completed; no verb may mutate state.
    #[error("level is already complete")]
    LevelAlreadyComplete,

    /// The player is dead; no verb may mutate state.
    #[error("player is dead")]
    PlayerDead,

    // --- target resolution ---
    /// The named target is not visible here: not a room item, not in the
    /// inventory, not a reachable door, not inside a searched container.
    #[error("you don't see a {0} here")]
    NotHere(String),

    // --- capability mismatches ---
    #[error("the {0} is not a container")]
    NotAContainer(String),

    #[error("the {0} cannot conceal anything")]
    NotAConcealer(String),

    #[error("you cannot take the {0}")]
    NotPortable(String),

    #[error("the {0} is not a key")]
    NotAKey(String),

    #[error("the {0} is not a weapon")]
    NotAWeapon(String),

    #[error("the {0} is not a health item")]
    NotAHealthItem(String),

    #[error("the {0} is not a fixture")]
    NotAFixture(String),

    #[error("the {0} has already been uncovered")]
    AlreadyUncovered(String),

    #[error("you are already at full health")]
    AlreadyFullHealth,

    // --- locks and latches ---
    /// A locked container blocked a search.
    #[error("the {0} is locked")]
    ContainerLocked(String),

    /// A key-locked door blocked a traverse and no matching key was held.
    #[error("the {0} is locked")]
    DoorLocked(String),

    /// A code-locked door never auto-unlocks; `unlock` must be called.
    #[error("the {0} is locked, it requires a code")]
    DoorCodeLocked(String),

    /// The door's latch can only be released from the other room.
    #[error("this door is latched from the other side")]
    LatchedFromOtherSide,

    /// A failed unlock attempt (wrong key, wrong code, wrong mechanism,
    /// already unlocked, no lock).
    #[error(transparent)]
    Lock(#[from] LockError),

    // --- combat ---
    #[error(transparent)]
    Ammo(#[from] AmmoError),

    // --- crafting ---
    #[error(transparent)]
    Combine(#[from] CombineError),

    // --- fixtures ---
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}
