//! Response payloads, one per operation.
//!
//! Flat DTOs with stable wire names, converted from the engine's result
//! records. Optional and false-valued fields are omitted from the JSON to
//! keep the payloads the agent reads small.

use serde::{Deserialize, Serialize};

use dw_engine::{
    AmmoCount, BattleResult, CombineResult, DebugResult, DoorInfo, FloorInfo, HealResult,
    InspectResult, InventoryResult, ItemInfo, MinimapResult, ObserveResult, SearchResult,
    StateInfo, TakeResult, TraverseResult, UncoverResult, UnlockResult, UseResult, VerbReply,
};

/// Engine state reported with every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDto {
    pub level_completion: String,
    pub mode: String,
    pub player_health: String,
    pub current_floor: String,
    pub current_room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fighting_enemy: Option<EnemyDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outro_narrative: Option<String>,
}

impl From<&StateInfo> for StateDto {
    fn from(state: &StateInfo) -> Self {
        Self {
            level_completion: state.completion.to_string(),
            mode: state.mode.to_string(),
            player_health: state.player_health.to_string(),
            current_floor: state.current_floor.clone(),
            current_room: state.current_room.clone(),
            fighting_enemy: state.fighting_enemy.as_ref().map(|enemy| EnemyDto {
                name: enemy.name.clone(),
                description: enemy.description.clone(),
                hp: enemy.hp,
                is_alive: enemy.alive,
            }),
            notification: state.notification.map(|notification| {
                match notification {
                    dw_engine::Notification::EnterCombat => "enter_combat",
                    dw_engine::Notification::ExitCombat => "exit_combat",
                    dw_engine::Notification::LevelComplete => "level_complete",
                    dw_engine::Notification::LevelFailed => "level_failed",
                }
                .to_string()
            }),
            outro_narrative: state.outro_narrative.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDto {
    pub name: String,
    pub description: String,
    pub hp: i32,
    pub is_alive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDto {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_portable: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_key: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_weapon: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_ammo_box: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_health_item: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_container: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub conceals_something: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_fixture: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_key_lock: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_code_lock: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_searched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_uncovered: bool,
}

impl From<&ItemInfo> for ItemDto {
    fn from(info: &ItemInfo) -> Self {
        Self {
            name: info.name.clone(),
            description: info.description.clone(),
            location: info.location.clone(),
            is_portable: info.portable,
            is_key: info.key,
            is_weapon: info.weapon,
            is_ammo_box: info.ammo_box,
            is_health_item: info.health_item,
            is_container: info.container,
            conceals_something: info.concealer,
            is_fixture: info.fixture,
            has_key_lock: info.has_key_lock,
            has_code_lock: info.has_code_lock,
            is_locked: info.locked,
            is_searched: info.searched,
            contains: info.contains.clone(),
            is_uncovered: info.uncovered,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoorDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_key_lock: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_code_lock: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_latched: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_stairwell: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leads_to: Option<String>,
}

impl From<&DoorInfo> for DoorDto {
    fn from(info: &DoorInfo) -> Self {
        Self {
            name: info.name.clone(),
            description: info.description.clone(),
            location: info.location.clone(),
            has_key_lock: info.has_key_lock,
            has_code_lock: info.has_code_lock,
            is_locked: info.locked,
            is_latched: info.latched,
            is_stairwell: info.stairwell,
            leads_to: info.leads_to.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorDto {
    pub name: String,
    pub description: String,
}

impl From<&FloorInfo> for FloorDto {
    fn from(info: &FloorInfo) -> Self {
        Self {
            name: info.name.clone(),
            description: info.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoCountDto {
    pub weapon_name: String,
    pub ammo_count: u32,
}

impl From<&AmmoCount> for AmmoCountDto {
    fn from(count: &AmmoCount) -> Self {
        Self {
            weapon_name: count.weapon_name.clone(),
            ammo_count: count.count,
        }
    }
}

/// A room as observed: shared by `observe` and `traverse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomViewDto {
    pub room_name: String,
    pub room_description: String,
    pub visible_items: Vec<ItemDto>,
    pub doors: Vec<DoorDto>,
}

impl From<&ObserveResult> for RoomViewDto {
    fn from(result: &ObserveResult) -> Self {
        Self {
            room_name: result.room_name.clone(),
            room_description: result.room_description.clone(),
            visible_items: result.visible_items.iter().map(ItemDto::from).collect(),
            doors: result.doors.iter().map(DoorDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserveResponse {
    pub engine_state: StateDto,
    #[serde(flatten)]
    pub room: RoomViewDto,
}

impl From<&VerbReply<ObserveResult>> for ObserveResponse {
    fn from(reply: &VerbReply<ObserveResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            room: RoomViewDto::from(&reply.result),
        }
    }
}

/// Exactly one of `item` or `door` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResponse {
    pub engine_state: StateDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door: Option<DoorDto>,
}

impl From<&VerbReply<InspectResult>> for InspectResponse {
    fn from(reply: &VerbReply<InspectResult>) -> Self {
        let engine_state = StateDto::from(&reply.state);
        match &reply.result {
            InspectResult::Item(inspection) => Self {
                engine_state,
                item: Some(ItemDto::from(&inspection.info)),
                detail: inspection.detail.clone(),
                door: None,
            },
            InspectResult::Door(door) => Self {
                engine_state,
                item: None,
                detail: None,
                door: Some(DoorDto::from(door)),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncoverResponse {
    pub engine_state: StateDto,
    pub concealer_name: String,
    pub revealed_item: ItemDto,
}

impl From<&VerbReply<UncoverResult>> for UncoverResponse {
    fn from(reply: &VerbReply<UncoverResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            concealer_name: reply.result.concealer_name.clone(),
            revealed_item: ItemDto::from(&reply.result.revealed),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockResponse {
    pub engine_state: StateDto,
    pub unlocked: bool,
}

impl From<&VerbReply<UnlockResult>> for UnlockResponse {
    fn from(reply: &VerbReply<UnlockResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            unlocked: reply.result.unlocked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub engine_state: StateDto,
    pub container_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contained_item: Option<ItemDto>,
    pub unlocked: bool,
}

impl From<&VerbReply<SearchResult>> for SearchResponse {
    fn from(reply: &VerbReply<SearchResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            container_name: reply.result.container_name.clone(),
            contained_item: reply.result.contained.as_ref().map(ItemDto::from),
            unlocked: reply.result.unlocked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeResponse {
    pub engine_state: StateDto,
    pub item: ItemDto,
}

impl From<&VerbReply<TakeResult>> for TakeResponse {
    fn from(reply: &VerbReply<TakeResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            item: ItemDto::from(&reply.result.item),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResponse {
    pub engine_state: StateDto,
    pub items: Vec<ItemDto>,
    pub ammo: Vec<AmmoCountDto>,
}

impl From<&VerbReply<InventoryResult>> for InventoryResponse {
    fn from(reply: &VerbReply<InventoryResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            items: reply.result.items.iter().map(ItemDto::from).collect(),
            ammo: reply.result.ammo.iter().map(AmmoCountDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealResponse {
    pub engine_state: StateDto,
    pub health: String,
}

impl From<&VerbReply<HealResult>> for HealResponse {
    fn from(reply: &VerbReply<HealResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            health: reply.result.health.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraverseResponse {
    pub engine_state: StateDto,
    pub entered_room: RoomViewDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_floor: Option<FloorDto>,
    pub unlatched: bool,
    pub unlocked: bool,
}

impl From<&VerbReply<TraverseResult>> for TraverseResponse {
    fn from(reply: &VerbReply<TraverseResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            entered_room: RoomViewDto::from(&reply.result.entered_room),
            changed_floor: reply.result.changed_floor.as_ref().map(FloorDto::from),
            unlatched: reply.result.unlatched,
            unlocked: reply.result.unlocked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleResponse {
    pub engine_state: StateDto,
    pub enemy_name: String,
    pub won_round: bool,
    pub enemy_alive: bool,
    pub player_alive: bool,
}

impl From<&VerbReply<BattleResult>> for BattleResponse {
    fn from(reply: &VerbReply<BattleResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            enemy_name: reply.result.enemy_name.clone(),
            won_round: reply.result.won_round,
            enemy_alive: reply.result.enemy_alive,
            player_alive: reply.result.player_alive,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineResponse {
    pub engine_state: StateDto,
    pub crafted_item: ItemDto,
}

impl From<&VerbReply<CombineResult>> for CombineResponse {
    fn from(reply: &VerbReply<CombineResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            crafted_item: ItemDto::from(&reply.result.crafted),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseResponse {
    pub engine_state: StateDto,
    pub fixture_name: String,
    pub used_item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produced_item: Option<ItemDto>,
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_narrative: Option<String>,
}

impl From<&VerbReply<UseResult>> for UseResponse {
    fn from(reply: &VerbReply<UseResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            fixture_name: reply.result.fixture_name.clone(),
            used_item_name: reply.result.used_item_name.clone(),
            produced_item: reply.result.produced.as_ref().map(ItemDto::from),
            is_complete: reply.result.complete,
            completion_narrative: reply.result.completion_narrative.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimapDoorDto {
    pub name: String,
    /// Absent while the lock state is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimapRoomDto {
    pub name: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimapResponse {
    pub engine_state: StateDto,
    pub doors: Vec<MinimapDoorDto>,
    pub rooms: Vec<MinimapRoomDto>,
    pub current_room: String,
}

impl From<&VerbReply<MinimapResult>> for MinimapResponse {
    fn from(reply: &VerbReply<MinimapResult>) -> Self {
        Self {
            engine_state: StateDto::from(&reply.state),
            doors: reply
                .result
                .doors
                .iter()
                .map(|door| MinimapDoorDto {
                    name: door.name.clone(),
                    locked: door.locked,
                    hidden: door.hidden,
                })
                .collect(),
            rooms: reply
                .result
                .rooms
                .iter()
                .map(|room| MinimapRoomDto {
                    name: room.name.clone(),
                    hidden: room.hidden,
                })
                .collect(),
            current_room: reply.result.current_room.clone(),
        }
    }
}

/// The debug snapshot is passed through as-is; its shape is an engine
/// concern, not a wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugResponse {
    pub debug: serde_json::Value,
}

impl From<&DebugResult> for DebugResponse {
    fn from(snapshot: &DebugResult) -> Self {
        Self {
            debug: serde_json::to_value(snapshot).unwrap_or_default(),
        }
    }
}
