//! Serde shapes for the level document.
//!
//! These mirror the on-disk JSON/YAML format, including the legacy spellings
//! (`rooms` at top level, `direction` on connections, `enter_room` event
//! kinds). Normalization to the world model happens in [`crate::build`].

use serde::Deserialize;

/// Top-level level document.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDoc {
    pub name: String,
    pub intro_narrative: Option<String>,
    pub outro_narrative: Option<String>,
    /// Accepted for the transport's prompt assembly; not part of the world.
    pub system_prompt_theme: Option<String>,
    pub win_condition: Option<EventDoc>,
    /// Current nested form.
    pub floors: Option<Vec<FloorDoc>>,
    /// Legacy flat form: sugar for a single unnamed floor.
    pub rooms: Option<Vec<RoomDoc>>,
    #[serde(default)]
    pub doors: Vec<DoorDoc>,
    #[serde(default)]
    pub enemies: Vec<EnemyDoc>,
    #[serde(default)]
    pub combo_items: Vec<ComboDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rooms: Vec<RoomDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub initial_description: Option<String>,
    #[serde(default)]
    pub connections: Vec<ConnectionDoc>,
    #[serde(default)]
    pub items: Vec<ItemDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDoc {
    /// Room-relative placement; `direction` is the legacy spelling.
    #[serde(alias = "direction")]
    pub location: String,
    pub door_name: String,
    pub description: Option<String>,
}

/// A container's `contains` field: either a nested item or the literal
/// string `"empty"` (an empty container, distinct from not being a
/// container at all).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContainerContentsDoc {
    Sentinel(String),
    Item(Box<ItemDoc>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureDoc {
    pub required_items: Vec<String>,
    pub produces: Option<Box<ItemDoc>>,
    pub completion_narrative: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: Option<String>,
    pub detail: Option<String>,
    #[serde(default)]
    pub portable: bool,
    #[serde(default)]
    pub key: bool,
    /// A positive damage value makes the item a weapon.
    #[serde(default)]
    pub weapon_damage: f64,
    /// Rounds: initial weapon ammo, or the ammo box quantity.
    #[serde(default)]
    pub ammo: u32,
    /// Present (with `ammo`) on ammo boxes: which weapon the rounds feed.
    pub weapon_name: Option<String>,
    pub health_effect: Option<HealthEffectDoc>,
    /// A code lock on a container item.
    pub code: Option<String>,
    pub conceals: Option<Box<ItemDoc>>,
    pub contains: Option<ContainerContentsDoc>,
    pub fixture: Option<FixtureDoc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthEffectDoc {
    Weak,
    Strong,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoorDoc {
    pub name: String,
    pub room_a: String,
    pub room_b: String,
    #[serde(default)]
    pub locked: bool,
    pub required_key_name: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub stairwell: bool,
    pub latched_from: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnemyDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub hp: i32,
    pub room: Option<String>,
    pub trigger: Option<TriggerDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerDoc {
    pub event: String,
    pub item_name: Option<String>,
    pub room_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDoc {
    pub event: String,
    pub room_name: Option<String>,
    pub item_name: Option<String>,
    pub enemy_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComboDoc {
    pub input_item_a_name: String,
    pub input_item_b_name: String,
    pub output_item: ItemDoc,
}
