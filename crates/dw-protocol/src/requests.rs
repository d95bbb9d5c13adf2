//! Request payloads, one per operation.
//!
//! `observe`, `inventory`, `minimap`, and `debug` take no payload and have
//! no request record.

use serde::{Deserialize, Serialize};

/// Create a session from a raw level document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub level: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncoverRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockRequest {
    /// A key item name from the inventory, or a literal code.
    pub key_or_code: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraverseRequest {
    /// A door name, or a room-relative location such as "north" or "left".
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRequest {
    /// A weapon from the inventory; empty, "fists", or "hands" fight
    /// unarmed.
    #[serde(default)]
    pub weapon_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineRequest {
    pub input_item_a_name: String,
    pub input_item_b_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseRequest {
    pub item_name: String,
    pub target_name: String,
}
