//! Doors, latches, and room-relative connections.

use serde::{Deserialize, Serialize};

use crate::error::LockError;
use crate::lock::Lock;

/// Which endpoint of a door something refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorSide {
    RoomA,
    RoomB,
}

/// A one-sided bolt: the door can only be unlatched from the room on the
/// `locked_from` side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latch {
    /// Whether the latch is currently engaged.
    pub locked: bool,
    /// The side the latch was thrown from; only that room can release it.
    pub locked_from: DoorSide,
}

/// A door as seen from a specific room.
///
/// The `location` is relative to the room from which it is observed
/// ("left", "north", "ahead", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub door_name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An undirected edge between two rooms, optionally gated by a lock and/or a
/// latch. Doors marked `stairwell` may join rooms on different floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub name: String,
    pub room_a: String,
    pub room_b: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<Lock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latch: Option<Latch>,
    pub stairwell: bool,
    /// True once the player has walked through this door.
    pub traversed: bool,
    /// True once the player has attempted this door (successfully or not).
    pub tried: bool,
}

impl Door {
    /// Create an open door between two rooms.
    pub fn between(
        name: impl Into<String>,
        room_a: impl Into<String>,
        room_b: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            room_a: room_a.into(),
            room_b: room_b.into(),
            lock: None,
            latch: None,
            stairwell: false,
            traversed: false,
            tried: false,
        }
    }

    /// Attach a lock.
    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Latch the door from the given side.
    pub fn latched_from(mut self, side: DoorSide) -> Self {
        self.latch = Some(Latch {
            locked: true,
            locked_from: side,
        });
        self
    }

    /// Mark the door as a stairwell (may join rooms across floors).
    pub fn stairwell(mut self) -> Self {
        self.stairwell = true;
        self
    }

    pub fn has_key_lock(&self) -> bool {
        self.lock.as_ref().is_some_and(Lock::has_key_lock)
    }

    pub fn has_code_lock(&self) -> bool {
        self.lock.as_ref().is_some_and(Lock::has_code_lock)
    }

    pub fn has_lock(&self) -> bool {
        self.lock.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.lock.as_ref().is_some_and(Lock::is_locked)
    }

    pub fn is_latched(&self) -> bool {
        self.latch.is_some_and(|latch| latch.locked)
    }

    /// The name of the room the latch was thrown from, if latched.
    pub fn latched_from_room(&self) -> Option<&str> {
        self.latch.map(|latch| match latch.locked_from {
            DoorSide::RoomA => self.room_a.as_str(),
            DoorSide::RoomB => self.room_b.as_str(),
        })
    }

    /// Returns true if the latch can be released from the given room.
    pub fn can_unlatch(&self, room_name: &str) -> bool {
        self.latched_from_room() == Some(room_name)
    }

    /// Release the latch.
    pub fn unlatch(&mut self) {
        if let Some(latch) = &mut self.latch {
            latch.locked = false;
        }
    }

    /// Given one endpoint room, return the other.
    pub fn other_room(&self, room_name: &str) -> &str {
        if self.room_a == room_name {
            &self.room_b
        } else {
            &self.room_a
        }
    }

    /// Attempt to unlock the door with a key item.
    pub fn unlock_with_key(&mut self, key_name: &str) -> Result<(), LockError> {
        match &mut self.lock {
            Some(lock) => lock.unlock_with_key(key_name),
            None => Err(LockError::NoLock(self.name.clone())),
        }
    }

    /// Attempt to unlock the door by entering a code.
    pub fn unlock_with_code(&mut self, code: &str) -> Result<(), LockError> {
        match &mut self.lock {
            Some(lock) => lock.unlock_with_code(code),
            None => Err(LockError::NoLock(self.name.clone())),
        }
    }
}
