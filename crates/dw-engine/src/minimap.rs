//! The minimap: what the player knows about doors and rooms so far.
//!
//! Maintained incrementally. Every door starts hidden with an unknown lock
//! state; entering a room reveals its adjacent doors; trying or unlocking a
//! door records a definitive lock state.

use std::collections::BTreeMap;

use serde::Serialize;

use dw_world::{Level, Room};

/// What the minimap knows about one door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinimapDoor {
    pub name: String,
    /// `None` while the lock state is unknown.
    pub locked: Option<bool>,
    /// Hidden until the player has stood in an adjacent room.
    pub hidden: bool,
}

/// What the minimap knows about one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinimapRoom {
    pub name: String,
    /// Hidden until visited.
    pub hidden: bool,
}

/// The minimap query result: all known doors, the rooms of the current
/// floor, and where the player stands.
#[derive(Debug, Clone, Serialize)]
pub struct MinimapResult {
    pub doors: Vec<MinimapDoor>,
    pub rooms: Vec<MinimapRoom>,
    pub current_room: String,
}

/// Incrementally-maintained door knowledge.
#[derive(Debug, Clone)]
pub struct Minimap {
    doors: BTreeMap<String, MinimapDoor>,
}

impl Minimap {
    /// Initialize with every door hidden and its lock state unknown.
    pub fn new(level: &Level) -> Self {
        let doors = level
            .doors
            .iter()
            .map(|door| {
                (
                    door.name.clone(),
                    MinimapDoor {
                        name: door.name.clone(),
                        locked: None,
                        hidden: true,
                    },
                )
            })
            .collect();
        Self { doors }
    }

    /// Reveal the doors adjacent to a room (lock state stays unknown).
    pub fn reveal_room_doors(&mut self, room: &Room) {
        for conn in &room.connections {
            if let Some(door) = self.doors.get_mut(&conn.door_name) {
                door.hidden = false;
            }
        }
    }

    /// Record a definitive lock state for a door, revealing it.
    pub fn record_lock(&mut self, door_name: &str, locked: bool) {
        if let Some(door) = self.doors.get_mut(door_name) {
            door.locked = Some(locked);
            door.hidden = false;
        }
    }

    /// Known door entries, in name order.
    pub fn doors(&self) -> impl Iterator<Item = &MinimapDoor> {
        self.doors.values()
    }

    /// Look up one door's entry.
    pub fn door(&self, name: &str) -> Option<&MinimapDoor> {
        self.doors.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dw_world::{Door, Floor};

    fn test_level() -> Level {
        Level {
            name: "test".to_string(),
            intro_narrative: None,
            outro_narrative: None,
            floors: vec![Floor::new(
                "main floor",
                "the main floor",
                vec![
                    Room::new("hall", "a hall").with_connection("oak door", "north"),
                    Room::new("study", "a study").with_connection("oak door", "south"),
                ],
            )],
            doors: vec![Door::between("oak door", "hall", "study")],
            enemies: Vec::new(),
            triggers: Vec::new(),
            win_condition: None,
            combo_items: Vec::new(),
        }
    }

    #[test]
    fn starts_hidden_and_unknown() {
        let minimap = Minimap::new(&test_level());
        let door = minimap.door("oak door").unwrap();
        assert!(door.hidden);
        assert_eq!(door.locked, None);
    }

    #[test]
    fn revealing_keeps_lock_unknown() {
        let level = test_level();
        let mut minimap = Minimap::new(&level);
        minimap.reveal_room_doors(level.room("hall").unwrap());

        let door = minimap.door("oak door").unwrap();
        assert!(!door.hidden);
        assert_eq!(door.locked, None);
    }

    #[test]
    fn recording_lock_state_reveals() {
        let level = test_level();
        let mut minimap = Minimap::new(&level);
        minimap.record_lock("oak door", true);

        let door = minimap.door("oak door").unwrap();
        assert!(!door.hidden);
        assert_eq!(door.locked, Some(true));
    }
}
