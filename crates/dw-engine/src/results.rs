//! Typed result records, one per verb.

use serde::Serialize;

use dw_world::HealthState;

use crate::info::{AmmoCount, DoorInfo, FloorInfo, ItemInfo, ItemInspection};

/// Result of observing the current room.
#[derive(Debug, Clone, Serialize)]
pub struct ObserveResult {
    pub room_name: String,
    pub room_description: String,
    pub visible_items: Vec<ItemInfo>,
    pub doors: Vec<DoorInfo>,
}

/// Result of inspecting something by name: an item or a door.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectResult {
    Item(ItemInspection),
    Door(DoorInfo),
}

/// Result of uncovering a concealer.
#[derive(Debug, Clone, Serialize)]
pub struct UncoverResult {
    pub concealer_name: String,
    pub revealed: ItemInfo,
}

/// Result of unlocking a door or container.
#[derive(Debug, Clone, Serialize)]
pub struct UnlockResult {
    pub unlocked: bool,
}

/// Result of searching a container.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub container_name: String,
    /// The revealed contents; `None` for an empty container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<ItemInfo>,
    /// True if a held key auto-unlocked the container first.
    pub unlocked: bool,
}

/// Result of taking an item.
#[derive(Debug, Clone, Serialize)]
pub struct TakeResult {
    pub item: ItemInfo,
}

/// Result of listing the inventory.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryResult {
    pub items: Vec<ItemInfo>,
    pub ammo: Vec<AmmoCount>,
}

/// Result of consuming a health item.
#[derive(Debug, Clone, Serialize)]
pub struct HealResult {
    pub health: HealthState,
}

/// Result of traversing a door. Includes an implicit observation of the
/// entered room.
#[derive(Debug, Clone, Serialize)]
pub struct TraverseResult {
    pub entered_room: ObserveResult,
    /// Present when a stairwell moved the player to a different floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_floor: Option<FloorInfo>,
    /// True if the door's latch was released on the way through.
    pub unlatched: bool,
    /// True if a held key auto-unlocked the door first.
    pub unlocked: bool,
}

/// Result of one combat round.
#[derive(Debug, Clone, Serialize)]
pub struct BattleResult {
    pub enemy_name: String,
    pub won_round: bool,
    pub enemy_alive: bool,
    pub player_alive: bool,
}

/// Result of combining two inventory items.
#[derive(Debug, Clone, Serialize)]
pub struct CombineResult {
    pub crafted: ItemInfo,
}

/// Result of applying an item to a fixture.
#[derive(Debug, Clone, Serialize)]
pub struct UseResult {
    pub fixture_name: String,
    pub used_item_name: String,
    /// The item the fixture produced, already placed in the inventory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produced: Option<ItemInfo>,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_narrative: Option<String>,
}
