//! The level: the whole playable unit, plus events, triggers, and combos.

use serde::{Deserialize, Serialize};

use crate::door::Door;
use crate::enemy::Enemy;
use crate::error::CombineError;
use crate::item::Item;
use crate::room::{Floor, Room};

/// What kind of thing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ItemTaken,
    RoomEntered,
    EnemyKilled,
    PlayerKilled,
}

/// A one-shot record of something that happened, dispatched to triggers and
/// the win condition. Doubles as the pattern those matchers are written in:
/// the field relevant to `kind` carries the name to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enemy_name: Option<String>,
}

impl Event {
    /// An `item_taken` event for the named item.
    pub fn item_taken(item_name: impl Into<String>) -> Self {
        Self {
            kind: EventKind::ItemTaken,
            room_name: None,
            item_name: Some(item_name.into()),
            enemy_name: None,
        }
    }

    /// A `room_entered` event for the named room.
    pub fn room_entered(room_name: impl Into<String>) -> Self {
        Self {
            kind: EventKind::RoomEntered,
            room_name: Some(room_name.into()),
            item_name: None,
            enemy_name: None,
        }
    }

    /// An `enemy_killed` event for the named enemy.
    pub fn enemy_killed(enemy_name: impl Into<String>) -> Self {
        Self {
            kind: EventKind::EnemyKilled,
            room_name: None,
            item_name: None,
            enemy_name: Some(enemy_name.into()),
        }
    }

    /// A `player_killed` event.
    pub fn player_killed() -> Self {
        Self {
            kind: EventKind::PlayerKilled,
            room_name: None,
            item_name: None,
            enemy_name: None,
        }
    }

    /// Returns true if this pattern matches the given event: same kind, and
    /// the kind's key field agrees.
    pub fn matches(&self, event: &Event) -> bool {
        if self.kind != event.kind {
            return false;
        }
        match self.kind {
            EventKind::ItemTaken => self.item_name == event.item_name,
            EventKind::RoomEntered => self.room_name == event.room_name,
            EventKind::EnemyKilled => self.enemy_name == event.enemy_name,
            EventKind::PlayerKilled => true,
        }
    }
}

/// What a trigger does when its event pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    EnterCombat,
}

/// A triggered effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub enemy_name: String,
}

/// Pairs an event pattern with an effect. Triggers are stateless matchers
/// scanned in level order; a trigger can fire again if its event recurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub event: Event,
    pub effect: Effect,
}

/// A declarative two-input, one-output crafting recipe. Symmetric in its
/// inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboItem {
    pub input_a_name: String,
    pub input_b_name: String,
    pub output_item: Item,
}

/// The whole playable unit: the static world graph the engine runs over.
///
/// Created once by the loader and structurally immutable during play:
/// contained state (items, door locks, enemy HP, room `visited` flags)
/// mutates, but no rooms, doors, or enemies appear or disappear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_narrative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outro_narrative: Option<String>,
    pub floors: Vec<Floor>,
    pub doors: Vec<Door>,
    pub enemies: Vec<Enemy>,
    pub triggers: Vec<Trigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_condition: Option<Event>,
    pub combo_items: Vec<ComboItem>,
}

impl Level {
    /// Find a floor by name.
    pub fn floor(&self, name: &str) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.name == name)
    }

    /// Find a room anywhere in the level by name.
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.floors.iter().find_map(|floor| floor.room(name))
    }

    /// Find a room anywhere in the level by name, mutably.
    pub fn room_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.floors
            .iter_mut()
            .flat_map(|floor| floor.rooms.iter_mut())
            .find(|room| room.name == name)
    }

    /// Find the floor that contains the named room.
    pub fn floor_of_room(&self, room_name: &str) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.room(room_name).is_some())
    }

    /// Find a door by name.
    pub fn door(&self, name: &str) -> Option<&Door> {
        self.doors.iter().find(|door| door.name == name)
    }

    /// Find a door by name, mutably.
    pub fn door_mut(&mut self, name: &str) -> Option<&mut Door> {
        self.doors.iter_mut().find(|door| door.name == name)
    }

    /// Find an enemy by name.
    pub fn enemy(&self, name: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.name == name)
    }

    /// Find an enemy by name, mutably.
    pub fn enemy_mut(&mut self, name: &str) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.name == name)
    }

    /// Look up the combo recipe for an unordered pair of input items and
    /// return a fresh copy of its output. The caller removes the inputs from
    /// the inventory.
    pub fn combine_items(&self, a: &str, b: &str) -> Result<Item, CombineError> {
        self.combo_items
            .iter()
            .find(|combo| {
                (combo.input_a_name == a && combo.input_b_name == b)
                    || (combo.input_a_name == b && combo.input_b_name == a)
            })
            .map(|combo| combo.output_item.clone())
            .ok_or_else(|| CombineError::NoSuchCombination(a.to_string(), b.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_level() -> Level {
        Level {
            name: "test level".to_string(),
            intro_narrative: None,
            outro_narrative: None,
            floors: vec![
                Floor::new(
                    "ground floor",
                    "the ground floor",
                    vec![Room::new("hall", "a long hall")],
                ),
                Floor::new(
                    "upstairs",
                    "the upper floor",
                    vec![Room::new("landing", "a dusty landing")],
                ),
            ],
            doors: vec![Door::between("stairwell door", "hall", "landing").stairwell()],
            enemies: vec![Enemy::new("ghoul", "a hungry ghoul", 3)],
            triggers: Vec::new(),
            win_condition: None,
            combo_items: vec![ComboItem {
                input_a_name: "fish hook".to_string(),
                input_b_name: "dental floss".to_string(),
                output_item: Item::new("retrieval tool", "a hook on a line").portable(),
            }],
        }
    }

    #[test]
    fn lookups_by_name() {
        let level = test_level();
        assert!(level.floor("upstairs").is_some());
        assert!(level.room("landing").is_some());
        assert!(level.door("stairwell door").is_some());
        assert!(level.enemy("ghoul").is_some());
        assert!(level.room("basement").is_none());
    }

    #[test]
    fn floor_of_room_spans_floors() {
        let level = test_level();
        assert_eq!(level.floor_of_room("hall").map(|f| f.name.as_str()), Some("ground floor"));
        assert_eq!(level.floor_of_room("landing").map(|f| f.name.as_str()), Some("upstairs"));
        assert!(level.floor_of_room("basement").is_none());
    }

    #[test]
    fn combine_is_symmetric() {
        let level = test_level();
        let forward = level.combine_items("fish hook", "dental floss").unwrap();
        let reverse = level.combine_items("dental floss", "fish hook").unwrap();
        assert_eq!(forward.name, "retrieval tool");
        assert_eq!(reverse.name, "retrieval tool");
    }

    #[test]
    fn combine_unknown_pair_fails() {
        let level = test_level();
        let err = level.combine_items("fish hook", "bubble gum").unwrap_err();
        assert_eq!(
            err.to_string(),
            "you can't combine the fish hook and bubble gum"
        );
    }

    #[test]
    fn event_pattern_matching() {
        let pattern = Event::room_entered("vault");
        assert!(pattern.matches(&Event::room_entered("vault")));
        assert!(!pattern.matches(&Event::room_entered("hall")));
        assert!(!pattern.matches(&Event::item_taken("vault")));

        let pattern = Event::item_taken("gem");
        assert!(pattern.matches(&Event::item_taken("gem")));
        assert!(!pattern.matches(&Event::item_taken("coin")));

        let pattern = Event::enemy_killed("ghoul");
        assert!(pattern.matches(&Event::enemy_killed("ghoul")));
        assert!(pattern.matches(&Event {
            kind: EventKind::EnemyKilled,
            room_name: Some("ignored".to_string()),
            item_name: None,
            enemy_name: Some("ghoul".to_string()),
        }));
    }
}
