//! Rooms and floors.

use serde::{Deserialize, Serialize};

use crate::door::Connection;
use crate::item::Item;

/// One node in the map. The player is always in exactly one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique name within the whole level (not per floor).
    pub name: String,
    pub description: String,
    /// Shown instead of `description` the first time the room is observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_description: Option<String>,
    /// Doors as seen from this room.
    pub connections: Vec<Connection>,
    /// Items lying in the room.
    pub items: Vec<Item>,
    /// True once the player has observed the room.
    pub visited: bool,
}

impl Room {
    /// Create an empty room.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            initial_description: None,
            connections: Vec::new(),
            items: Vec::new(),
            visited: false,
        }
    }

    /// Set the first-visit description.
    pub fn with_initial_description(mut self, text: impl Into<String>) -> Self {
        self.initial_description = Some(text.into());
        self
    }

    /// Add a connection to a door.
    pub fn with_connection(mut self, door_name: impl Into<String>, location: impl Into<String>) -> Self {
        self.connections.push(Connection {
            door_name: door_name.into(),
            location: location.into(),
            description: None,
        });
        self
    }

    /// Add an item to the room.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Find a connection by door name.
    pub fn connection(&self, door_name: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|conn| conn.door_name == door_name)
    }

    /// Find a connection by its room-relative location ("left", "north", ...).
    pub fn connection_at(&self, location: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|conn| conn.location == location)
    }

    /// Find an item in the room by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Find an item in the room by name, mutably.
    pub fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.name == name)
    }

    /// Remove an item from the room, e.g. when the player picks it up.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(index))
    }
}

/// A named grouping of rooms. Only stairwell doors join rooms across floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub name: String,
    pub description: String,
    pub rooms: Vec<Room>,
}

impl Floor {
    /// Create a floor with the given rooms.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rooms: Vec<Room>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rooms,
        }
    }

    /// Find a room on this floor by name.
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }
}
