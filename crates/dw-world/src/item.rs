//! Items and their capability components.
//!
//! An [`Item`] is a base record (name, description, placement text, inspect
//! detail) plus a [`CapabilitySet`] of optional facets. Each facet is
//! independent data; the legal combinations are enforced by
//! [`Item::validate_initial_state`], which the loader runs on every item it
//! constructs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ContainerError, FixtureError, ItemError};
use crate::lock::Lock;

/// A quantity of ammunition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ammo {
    /// Number of rounds.
    pub quantity: u32,
}

/// Gives an item the ability to tilt combat rounds in the player's favor.
///
/// `damage` is the per-round win probability in `[0, 1]`. Weapons that use
/// ammo may come with zero or more initial rounds; those rounds move into the
/// player's ammo pool when the weapon is picked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ammo: Option<Ammo>,
}

impl Weapon {
    /// Returns true if this weapon consumes ammo when fired.
    pub fn uses_ammo(&self) -> bool {
        self.ammo.is_some()
    }
}

/// A box of ammunition for a specific named weapon.
///
/// Consumed on pickup: the rounds transfer to the player's ammo pool and the
/// box itself never reaches the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoBox {
    pub weapon_name: String,
    pub ammo: Ammo,
}

/// Strength of a health item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthEffect {
    /// Restores health one step up the ladder.
    Weak,
    /// Restores health to full.
    Strong,
}

/// An item that restores player health when consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthItem {
    pub effect: HealthEffect,
}

/// Holds at most one other item and remembers whether it has been searched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// The contained item, if any. Searching does not remove it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Box<Item>>,
    /// Whether the player has searched this container.
    pub searched: bool,
    /// Optional lock; a locked container cannot be searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<Lock>,
}

impl Container {
    /// Create a container holding the given item (or nothing).
    pub fn holding(contains: Option<Item>) -> Self {
        Self {
            contains: contains.map(Box::new),
            searched: false,
            lock: None,
        }
    }

    /// Attach a lock to the container.
    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
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

    pub fn is_empty(&self) -> bool {
        self.contains.is_none()
    }

    /// Search the container. Fails while locked; otherwise marks the
    /// container searched and returns a view of the contents. Contents stay
    /// in place; searching reveals, it does not remove.
    pub fn search(&mut self) -> Result<Option<&Item>, ContainerError> {
        if self.is_locked() {
            return Err(ContainerError::Locked);
        }
        self.searched = true;
        Ok(self.contains.as_deref())
    }

    /// Take the contained item out of the container.
    pub fn remove_item(&mut self) -> Result<Item, ContainerError> {
        self.contains
            .take()
            .map(|item| *item)
            .ok_or(ContainerError::Empty)
    }
}

/// Hides exactly one item until it is uncovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concealer {
    /// The hidden item; cleared on reveal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<Box<Item>>,
    /// Whether the concealer has already been uncovered.
    pub uncovered: bool,
}

impl Concealer {
    /// Create a concealer hiding the given item.
    pub fn hiding(item: Item) -> Self {
        Self {
            hidden: Some(Box::new(item)),
            uncovered: false,
        }
    }

    /// Reveal the hidden item. Marks the concealer uncovered and clears the
    /// hidden slot; the caller decides where the revealed item lands.
    pub fn reveal(&mut self) -> Option<Item> {
        self.uncovered = true;
        self.hidden.take().map(|item| *item)
    }
}

/// A non-portable installation that consumes a set of required items and
/// produces one output item when all of them have been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Required item names mapped to whether each has been applied yet.
    pub required_items: BTreeMap<String, bool>,
    /// The item produced on completion; handed out exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Box<Item>>,
    /// Narrative text surfaced when the fixture completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_narrative: Option<String>,
}

impl Fixture {
    /// Create a fixture requiring the given item names, none applied yet.
    pub fn requiring<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_items: names.into_iter().map(|n| (n.into(), false)).collect(),
            produces: None,
            completion_narrative: None,
        }
    }

    /// Set the item produced on completion.
    pub fn producing(mut self, item: Item) -> Self {
        self.produces = Some(Box::new(item));
        self
    }

    /// Set the completion narrative.
    pub fn with_completion_narrative(mut self, text: impl Into<String>) -> Self {
        self.completion_narrative = Some(text.into());
        self
    }

    /// Returns true once every required item has been applied.
    pub fn is_complete(&self) -> bool {
        self.required_items.values().all(|applied| *applied)
    }

    /// Apply an item to the fixture. The name must be one of the required
    /// items. Returns the produced item the first time the last requirement
    /// is satisfied, `None` otherwise.
    pub fn use_item(&mut self, name: &str) -> Result<Option<Item>, FixtureError> {
        let Some(applied) = self.required_items.get_mut(name) else {
            return Err(FixtureError::ItemNotRequired(name.to_string()));
        };
        *applied = true;
        if self.is_complete() {
            Ok(self.produces.take().map(|item| *item))
        } else {
            Ok(None)
        }
    }
}

/// The optional capability facets attached to an item.
///
/// Every facet is independent data; which combinations are legal is decided
/// by [`Item::validate_initial_state`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Whether the item can be taken into inventory.
    #[serde(default)]
    pub portable: bool,
    /// Marks the item as a key (keys are named; the lock stores the name).
    #[serde(default)]
    pub key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Weapon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ammo_box: Option<AmmoBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_item: Option<HealthItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concealer: Option<Concealer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<Fixture>,
}

/// Anything that can exist in a room or an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Globally unique name within a level; the stable identifier.
    pub name: String,
    /// Free-text description shown on observe.
    pub description: String,
    /// Free-form placement anchor, e.g. "on the floor".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Richer text shown on inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The item's capability facets.
    #[serde(default)]
    pub caps: CapabilitySet,
}

impl Item {
    /// Create a plain item with no capabilities.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            location: None,
            detail: None,
            caps: CapabilitySet::default(),
        }
    }

    /// Set the placement anchor text.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the inspect detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Mark the item portable.
    pub fn portable(mut self) -> Self {
        self.caps.portable = true;
        self
    }

    /// Mark the item as a key. Keys are always portable.
    pub fn key(mut self) -> Self {
        self.caps.key = true;
        self.caps.portable = true;
        self
    }

    /// Give the item a weapon facet. Weapons are always portable.
    pub fn weapon(mut self, damage: f64, ammo: Option<u32>) -> Self {
        self.caps.weapon = Some(Weapon {
            damage,
            ammo: ammo.map(|quantity| Ammo { quantity }),
        });
        self.caps.portable = true;
        self
    }

    /// Give the item an ammo box facet. Ammo boxes are always portable.
    pub fn ammo_box(mut self, weapon_name: impl Into<String>, quantity: u32) -> Self {
        self.caps.ammo_box = Some(AmmoBox {
            weapon_name: weapon_name.into(),
            ammo: Ammo { quantity },
        });
        self.caps.portable = true;
        self
    }

    /// Give the item a health facet. Health items are always portable.
    pub fn health(mut self, effect: HealthEffect) -> Self {
        self.caps.health_item = Some(HealthItem { effect });
        self.caps.portable = true;
        self
    }

    /// Give the item a container facet.
    pub fn container(mut self, container: Container) -> Self {
        self.caps.container = Some(container);
        self
    }

    /// Give the item a concealer facet.
    pub fn concealing(mut self, hidden: Item) -> Self {
        self.caps.concealer = Some(Concealer::hiding(hidden));
        self
    }

    /// Give the item a fixture facet.
    pub fn fixture(mut self, fixture: Fixture) -> Self {
        self.caps.fixture = Some(fixture);
        self
    }

    pub fn is_portable(&self) -> bool {
        self.caps.portable
    }

    pub fn is_key(&self) -> bool {
        self.caps.key
    }

    pub fn is_weapon(&self) -> bool {
        self.caps.weapon.is_some()
    }

    pub fn is_ammo_box(&self) -> bool {
        self.caps.ammo_box.is_some()
    }

    pub fn is_health_item(&self) -> bool {
        self.caps.health_item.is_some()
    }

    pub fn is_container(&self) -> bool {
        self.caps.container.is_some()
    }

    pub fn is_concealer(&self) -> bool {
        self.caps.concealer.is_some()
    }

    pub fn is_fixture(&self) -> bool {
        self.caps.fixture.is_some()
    }

    /// Validate the capability combination of a newly created item.
    ///
    /// Run by the loader at every node of the item tree; the engine assumes
    /// items it sees have passed.
    pub fn validate_initial_state(&self) -> Result<(), ItemError> {
        if self.is_key()
            && (!self.is_portable()
                || self.is_container()
                || self.is_concealer()
                || self.is_weapon()
                || self.is_fixture())
        {
            return Err(ItemError::InvalidKey);
        }
        if self.is_weapon()
            && (!self.is_portable()
                || self.is_container()
                || self.is_concealer()
                || self.is_key()
                || self.is_fixture())
        {
            return Err(ItemError::InvalidWeapon);
        }
        if let Some(container) = &self.caps.container {
            if self.is_portable()
                || self.is_concealer()
                || self.is_key()
                || self.is_weapon()
                || self.is_fixture()
            {
                return Err(ItemError::InvalidContainer);
            }
            if container
                .contains
                .as_ref()
                .is_some_and(|inner| inner.is_container())
            {
                return Err(ItemError::NestedContainer);
            }
            if container.has_lock() && !container.is_locked() {
                return Err(ItemError::ContainerLockUnlocked);
            }
        }
        if let Some(concealer) = &self.caps.concealer {
            if self.is_portable()
                || self.is_container()
                || self.is_key()
                || self.is_weapon()
                || self.is_fixture()
            {
                return Err(ItemError::InvalidConcealer);
            }
            if concealer
                .hidden
                .as_ref()
                .is_some_and(|inner| inner.is_concealer())
            {
                return Err(ItemError::NestedConcealer);
            }
        }
        if self.is_fixture()
            && (self.is_portable()
                || self.is_container()
                || self.is_concealer()
                || self.is_key()
                || self.is_weapon())
        {
            return Err(ItemError::InvalidFixture);
        }
        Ok(())
    }
}
