//! Player state: inventory, health ladder, ammo pool.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmoError;
use crate::item::Item;

/// The four-step health ladder. Damage moves down one step at a time;
/// healing moves up (weak) or resets to `Fine` (strong).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Fine,
    Hurt,
    Critical,
    Dead,
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fine => write!(f, "fine"),
            Self::Hurt => write!(f, "hurt"),
            Self::Critical => write!(f, "critical"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

/// The player: ordered inventory, health, and per-weapon ammo counts.
///
/// Ammo is keyed by weapon *name*: each weapon instance is a unique named
/// item, so the pool tracks rounds per individual weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub inventory: Vec<Item>,
    pub health: HealthState,
    pub ammo: BTreeMap<String, u32>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A fresh player: empty-handed, unhurt, no ammo.
    pub fn new() -> Self {
        Self {
            inventory: Vec::new(),
            health: HealthState::Fine,
            ammo: BTreeMap::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health != HealthState::Dead
    }

    /// Find an inventory item by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|item| item.name == name)
    }

    /// Returns true if the named item is in the inventory.
    pub fn has_item(&self, name: &str) -> bool {
        self.item(name).is_some()
    }

    /// Remove an inventory item by name.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.inventory.iter().position(|item| item.name == name)?;
        Some(self.inventory.remove(index))
    }

    /// Append an item to the inventory.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Step health down one level.
    ///
    /// Panics on a dead player; callers must gate on liveness first. A
    /// damage call past `Dead` indicates an engine bug.
    pub fn inflict_damage(&mut self) {
        self.health = match self.health {
            HealthState::Fine => HealthState::Hurt,
            HealthState::Hurt => HealthState::Critical,
            HealthState::Critical => HealthState::Dead,
            HealthState::Dead => panic!("cannot damage a dead player"),
        };
    }

    /// Step health up one level.
    ///
    /// Panics at `Fine` (nothing to heal) or `Dead` (no coming back); the
    /// engine rejects those cases before calling.
    pub fn increase_health(&mut self) {
        self.health = match self.health {
            HealthState::Hurt => HealthState::Fine,
            HealthState::Critical => HealthState::Hurt,
            state => panic!("cannot increase health from {state}"),
        };
    }

    /// Add rounds to the pool for the named weapon.
    pub fn add_ammo(&mut self, weapon_name: impl Into<String>, quantity: u32) {
        *self.ammo.entry(weapon_name.into()).or_insert(0) += quantity;
    }

    /// Rounds currently pooled for the named weapon.
    pub fn ammo_for(&self, weapon_name: &str) -> u32 {
        self.ammo.get(weapon_name).copied().unwrap_or(0)
    }

    /// Spend one round from the named weapon's pool.
    pub fn fire_weapon(&mut self, weapon_name: &str) -> Result<(), AmmoError> {
        match self.ammo.get_mut(weapon_name) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(AmmoError::OutOfAmmo(weapon_name.to_string())),
        }
    }
}
