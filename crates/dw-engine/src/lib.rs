//! Per-session game engine for Darkwell.
//!
//! One [`Engine`] drives one level for one session: it owns the level graph
//! and the live play state (player, current room, combat mode, minimap) and
//! advances it through a fixed set of verb operations. Every verb returns a
//! typed result paired with a [`StateInfo`] report designed for an LLM agent
//! to consume.
//!
//! The engine is synchronous and single-threaded; multi-tenancy is the
//! transport's concern (one engine per session, verbs serialized per
//! engine). Combat randomness comes from an injectable [`Rng`] capability so
//! tests are deterministic.

pub mod config;
pub mod debug;
pub mod engine;
pub mod error;
pub mod info;
pub mod minimap;
pub mod results;
pub mod rng;
pub mod state;

pub use config::EngineConfig;
pub use debug::DebugResult;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use info::{AmmoCount, DoorInfo, FloorInfo, ItemInfo, ItemInspection};
pub use minimap::{MinimapDoor, MinimapResult, MinimapRoom};
pub use results::{
    BattleResult, CombineResult, HealResult, InspectResult, InventoryResult, ObserveResult,
    SearchResult, TakeResult, TraverseResult, UncoverResult, UnlockResult, UseResult,
};
pub use rng::{DefaultRng, FixedRng, Rng};
pub use state::{Completion, EnemyInfo, Mode, Notification, StateInfo, Validation, VerbReply};
