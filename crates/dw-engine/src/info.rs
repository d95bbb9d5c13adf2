//! View records handed back by verbs.
//!
//! These are deliberately flatter than the world model: an [`ItemInfo`]
//! carries capability flags and the little container/concealer state an
//! agent needs to plan, but never leaks hidden contents: an unsearched
//! container's item and a covered concealer's item stay invisible.

use serde::Serialize;

use dw_world::{Floor, Item};

/// Basic information about an item, excluding its inspect detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemInfo {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub portable: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub key: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub weapon: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ammo_box: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub health_item: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub container: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub concealer: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fixture: bool,

    // Container state
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_key_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_code_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub searched: bool,
    /// Name of the contained item, shown only once the container has been
    /// searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    // Concealer state
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub uncovered: bool,
}

impl From<&Item> for ItemInfo {
    fn from(item: &Item) -> Self {
        let mut info = Self {
            name: item.name.clone(),
            description: item.description.clone(),
            location: item.location.clone(),
            portable: item.is_portable(),
            key: item.is_key(),
            weapon: item.is_weapon(),
            ammo_box: item.is_ammo_box(),
            health_item: item.is_health_item(),
            container: item.is_container(),
            concealer: item.is_concealer(),
            fixture: item.is_fixture(),
            ..Self::default()
        };

        if let Some(container) = &item.caps.container {
            info.has_key_lock = container.has_key_lock();
            info.has_code_lock = container.has_code_lock();
            info.locked = container.is_locked();
            if container.searched {
                info.searched = true;
                info.contains = container.contains.as_ref().map(|inner| inner.name.clone());
            }
        }

        if let Some(concealer) = &item.caps.concealer {
            info.uncovered = concealer.uncovered;
        }

        info
    }
}

/// An item's inspect view: the basic info plus its detail text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemInspection {
    #[serde(flatten)]
    pub info: ItemInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A door as reported to the agent from the current room.
///
/// Lock and latch state only appear once the door has been tried; where the
/// door leads only appears once it has been traversed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoorInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_key_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_code_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub latched: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stairwell: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leads_to: Option<String>,
}

/// A floor, as reported when a stairwell changes the current floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorInfo {
    pub name: String,
    pub description: String,
}

impl From<&Floor> for FloorInfo {
    fn from(floor: &Floor) -> Self {
        Self {
            name: floor.name.clone(),
            description: floor.description.clone(),
        }
    }
}

/// One entry of the inventory's ammo report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmmoCount {
    pub weapon_name: String,
    pub count: u32,
}
