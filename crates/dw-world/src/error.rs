//! Error types for the world model.

use thiserror::Error;

/// An item declared an invalid combination of capabilities.
///
/// Returned by [`Item::validate_initial_state`](crate::Item::validate_initial_state);
/// the loader wraps these with the offending item's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ItemError {
    /// A key that is not portable, or carries container/concealer/weapon/fixture facets.
    #[error("invalid key")]
    InvalidKey,

    /// A weapon that is not portable, or carries key/container/concealer/fixture facets.
    #[error("invalid weapon")]
    InvalidWeapon,

    /// A container that is portable or carries key/weapon/concealer/fixture facets.
    #[error("invalid container")]
    InvalidContainer,

    /// A concealer that is portable or carries key/weapon/container/fixture facets.
    #[error("invalid concealer")]
    InvalidConcealer,

    /// A fixture that is portable or carries key/weapon/container/concealer facets.
    #[error("invalid fixture")]
    InvalidFixture,

    /// A container directly containing another container.
    #[error("container cannot be nested")]
    NestedContainer,

    /// A concealer directly hiding another concealer.
    #[error("concealers cannot be nested")]
    NestedConcealer,

    /// A locked container must start in the locked state.
    #[error("container with lock must start in a locked state")]
    ContainerLockUnlocked,
}

/// A failed unlock attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The key offered does not match the lock.
    #[error("wrong key")]
    WrongKey,

    /// The code entered does not match the lock.
    #[error("wrong code")]
    WrongCode,

    /// The lock is already open.
    #[error("already unlocked")]
    AlreadyUnlocked,

    /// A key was offered to a code lock, or a code to a key lock.
    /// The payload names the mechanism that was attempted.
    #[error("this lock doesn't take a {0}")]
    WrongMechanism(&'static str),

    /// The target has no lock at all.
    #[error("the {0} has no lock")]
    NoLock(String),
}

/// Container access failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// The container is locked and cannot be searched.
    #[error("container is locked")]
    Locked,

    /// There is nothing inside to remove.
    #[error("container is empty")]
    Empty,
}

/// Fixture interaction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// The offered item is not one of the fixture's required items.
    #[error("the {0} is of no use here")]
    ItemNotRequired(String),
}

/// Weapon ammunition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmoError {
    /// The weapon's ammo count is zero.
    #[error("the {0} is out of ammo")]
    OutOfAmmo(String),
}

/// Crafting failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    /// No combo recipe matches the given pair of items.
    #[error("you can't combine the {0} and {1}")]
    NoSuchCombination(String, String),
}
