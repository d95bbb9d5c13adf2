//! Core world model for Darkwell: levels, floors, rooms, doors, items, and
//! the capability components that give items behavior.
//!
//! This crate defines the data model that the level loader materializes. It
//! is independent of the document format: you can construct a [`Level`]
//! programmatically or build one from JSON/YAML via `dw-loader`. Types here
//! are pure data with small invariant-checking operations; all live game
//! state and verb logic belongs to `dw-engine`.

pub mod door;
pub mod enemy;
pub mod error;
pub mod item;
pub mod level;
pub mod lock;
pub mod player;
pub mod room;

pub use door::{Connection, Door, DoorSide, Latch};
pub use enemy::Enemy;
pub use error::{AmmoError, CombineError, ContainerError, FixtureError, ItemError, LockError};
pub use item::{
    Ammo, AmmoBox, CapabilitySet, Concealer, Container, Fixture, HealthEffect, HealthItem, Item,
    Weapon,
};
pub use level::{ComboItem, Effect, EffectKind, Event, EventKind, Level, Trigger};
pub use lock::{Lock, LockMechanism};
pub use player::{HealthState, Player};
pub use room::{Floor, Room};
