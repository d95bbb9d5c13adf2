//! Enemies.

use serde::{Deserialize, Serialize};

/// An opponent the player must defeat to return to investigation mode.
///
/// Enemies have no room of their own; where a fight happens is implied by
/// the trigger that starts it. The optional `room` field from the level
/// document is carried for authoring and debug purposes only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub description: String,
    /// Remaining hit points; each lost combat round costs one.
    pub hp: i32,
    /// Authored room hint; not enforced by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl Enemy {
    /// Create an enemy with the given hit points.
    pub fn new(name: impl Into<String>, description: impl Into<String>, hp: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            hp,
            room: None,
        }
    }

    /// Take one hit.
    pub fn inflict_damage(&mut self) {
        self.hp -= 1;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
