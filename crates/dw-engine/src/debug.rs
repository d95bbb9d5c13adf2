//! Read-only debug snapshot of the whole engine.
//!
//! Unlike the player-facing views, the snapshot sees everything: unsearched
//! container contents, covered concealers, lock keys and codes, trigger
//! wiring, the win condition. It changes no state and is available in every
//! completion state. It backs a debug endpoint and the CLI's `show`
//! command.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use dw_world::{Door, Enemy, Event, Item, Room, Trigger};

use crate::engine::Engine;
use crate::state::{EnemyInfo, StateInfo};

/// Full capability detail for one item, nested contents included.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DebugItem {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

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

    // Container detail
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_key_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_code_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub searched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Box<DebugItem>>,

    // Weapon detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_damage: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub uses_ammo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ammo_quantity: Option<u32>,

    // Ammo box detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ammo_count: Option<u32>,

    // Health item detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_effect: Option<String>,

    // Concealer detail
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub uncovered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_item: Option<Box<DebugItem>>,

    // Fixture detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_items: Option<BTreeMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Box<DebugItem>>,
}

impl From<&Item> for DebugItem {
    fn from(item: &Item) -> Self {
        let mut debug = Self {
            name: item.name.clone(),
            description: item.description.clone(),
            location: item.location.clone(),
            detail: item.detail.clone(),
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
            debug.has_key_lock = container.has_key_lock();
            debug.has_code_lock = container.has_code_lock();
            debug.locked = container.is_locked();
            debug.searched = container.searched;
            debug.contains = container
                .contains
                .as_deref()
                .map(|inner| Box::new(DebugItem::from(inner)));
        }

        if let Some(weapon) = &item.caps.weapon {
            debug.weapon_damage = Some(weapon.damage);
            debug.uses_ammo = weapon.uses_ammo();
            debug.ammo_quantity = weapon.ammo.map(|ammo| ammo.quantity);
        }

        if let Some(ammo_box) = &item.caps.ammo_box {
            debug.weapon_name = Some(ammo_box.weapon_name.clone());
            debug.ammo_count = Some(ammo_box.ammo.quantity);
        }

        if let Some(health_item) = &item.caps.health_item {
            debug.health_effect = Some(format!("{:?}", health_item.effect).to_lowercase());
        }

        if let Some(concealer) = &item.caps.concealer {
            debug.uncovered = concealer.uncovered;
            debug.hidden_item = concealer
                .hidden
                .as_deref()
                .map(|inner| Box::new(DebugItem::from(inner)));
        }

        if let Some(fixture) = &item.caps.fixture {
            debug.required_items = Some(fixture.required_items.clone());
            debug.produces = fixture
                .produces
                .as_deref()
                .map(|inner| Box::new(DebugItem::from(inner)));
        }

        debug
    }
}

/// Full detail for one door, locks and codes included.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DebugDoor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub room_a: String,
    pub room_b: String,
    pub stairwell: bool,
    pub traversed: bool,
    pub tried: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_key_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_code_lock: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub latched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

fn debug_door(door: &Door, location: Option<String>) -> DebugDoor {
    let mut debug = DebugDoor {
        name: door.name.clone(),
        location,
        room_a: door.room_a.clone(),
        room_b: door.room_b.clone(),
        stairwell: door.stairwell,
        traversed: door.traversed,
        tried: door.tried,
        has_key_lock: door.has_key_lock(),
        has_code_lock: door.has_code_lock(),
        locked: door.is_locked(),
        latched: door.is_latched(),
        ..DebugDoor::default()
    };
    if let Some(lock) = &door.lock {
        match &lock.mechanism {
            dw_world::LockMechanism::Key(name) => debug.key_name = Some(name.clone()),
            dw_world::LockMechanism::Code(code) => debug.code = Some(code.clone()),
        }
    }
    debug
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugEnemy {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub hp: i32,
    pub alive: bool,
}

impl From<&Enemy> for DebugEnemy {
    fn from(enemy: &Enemy) -> Self {
        Self {
            name: enemy.name.clone(),
            description: enemy.description.clone(),
            room: enemy.room.clone(),
            hp: enemy.hp,
            alive: enemy.is_alive(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugRoom {
    pub name: String,
    pub description: String,
    pub visited: bool,
    pub is_current: bool,
    pub items: Vec<DebugItem>,
    pub doors: Vec<DebugDoor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugTrigger {
    pub event: Event,
    pub effect_kind: String,
    pub enemy_name: String,
}

impl From<&Trigger> for DebugTrigger {
    fn from(trigger: &Trigger) -> Self {
        Self {
            event: trigger.event.clone(),
            effect_kind: "enter_combat".to_string(),
            enemy_name: trigger.effect.enemy_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugPlayer {
    pub health: String,
    pub alive: bool,
    pub inventory: Vec<DebugItem>,
    pub ammo: BTreeMap<String, u32>,
}

/// The complete engine snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DebugResult {
    pub state: StateInfo,
    pub level_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_narrative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outro_narrative: Option<String>,
    pub player: DebugPlayer,
    /// Rooms of the current floor.
    pub rooms: Vec<DebugRoom>,
    pub enemies: Vec<DebugEnemy>,
    pub triggers: Vec<DebugTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_condition: Option<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fighting_enemy: Option<EnemyInfo>,
}

impl Engine {
    /// Produce the full read-only snapshot. No state changes, no
    /// mode/completion gating.
    pub fn debug_snapshot(&self) -> DebugResult {
        let level = self.level();
        let current_floor = level
            .floor(self.current_floor_name())
            .expect("current floor exists");

        let rooms = current_floor
            .rooms
            .iter()
            .map(|room| self.debug_room(room))
            .collect();

        DebugResult {
            state: self.debug_state_info(),
            level_name: level.name.clone(),
            intro_narrative: level.intro_narrative.clone(),
            outro_narrative: level.outro_narrative.clone(),
            player: DebugPlayer {
                health: self.player().health.to_string(),
                alive: self.player().is_alive(),
                inventory: self.player().inventory.iter().map(DebugItem::from).collect(),
                ammo: self.player().ammo.clone(),
            },
            rooms,
            enemies: level.enemies.iter().map(DebugEnemy::from).collect(),
            triggers: level.triggers.iter().map(DebugTrigger::from).collect(),
            win_condition: level.win_condition.clone(),
            fighting_enemy: self
                .fighting_enemy_name()
                .map(|name| EnemyInfo::from(level.enemy(name).expect("fighting enemy exists"))),
        }
    }

    fn debug_state_info(&self) -> StateInfo {
        StateInfo {
            completion: self.completion(),
            mode: self.mode(),
            player_health: self.player().health,
            current_floor: self.current_floor_name().to_string(),
            current_room: self.current_room_name().to_string(),
            fighting_enemy: self
                .fighting_enemy_name()
                .map(|name| EnemyInfo::from(self.level().enemy(name).expect("enemy exists"))),
            notification: None,
            outro_narrative: None,
        }
    }

    fn debug_room(&self, room: &Room) -> DebugRoom {
        DebugRoom {
            name: room.name.clone(),
            description: room.description.clone(),
            visited: room.visited,
            is_current: room.name == self.current_room_name(),
            items: room.items.iter().map(DebugItem::from).collect(),
            doors: room
                .connections
                .iter()
                .map(|conn| {
                    let door = self
                        .level()
                        .door(&conn.door_name)
                        .unwrap_or_else(|| panic!("no door named {}", conn.door_name));
                    debug_door(door, Some(conn.location.clone()))
                })
                .collect(),
        }
    }
}

impl DebugResult {
    /// Format the snapshot as readable text, for terminals and logs.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== ENGINE STATE ===");
        let _ = writeln!(out, "Level: {}", self.level_name);
        let _ = writeln!(out, "Mode: {}", self.state.mode);
        let _ = writeln!(out, "Completion: {}", self.state.completion);
        let _ = writeln!(out, "Current room: {}", self.state.current_room);
        match &self.fighting_enemy {
            Some(enemy) => {
                let _ = writeln!(
                    out,
                    "Fighting enemy: {} (HP: {}, alive: {})",
                    enemy.name, enemy.hp, enemy.alive
                );
            }
            None => {
                let _ = writeln!(out, "Fighting enemy: none");
            }
        }

        let _ = writeln!(out, "\n=== PLAYER ===");
        let _ = writeln!(out, "Health: {}", self.player.health);
        let _ = writeln!(out, "Inventory: {} item(s)", self.player.inventory.len());
        for item in &self.player.inventory {
            let _ = writeln!(out, "  - {} ({})", item.name, item.description);
        }
        for (weapon, count) in &self.player.ammo {
            let _ = writeln!(out, "  ammo {weapon}: {count}");
        }

        let _ = writeln!(out, "\n=== ROOMS ===");
        for room in &self.rooms {
            let marker = if room.is_current { " (CURRENT)" } else { "" };
            let _ = writeln!(out, "{}{marker}", room.name);
            for item in &room.items {
                let _ = writeln!(out, "  item: {} ({})", item.name, item.description);
                if let Some(inner) = &item.contains {
                    let _ = writeln!(out, "    contains: {}", inner.name);
                }
                if let Some(inner) = &item.hidden_item {
                    let _ = writeln!(out, "    hides: {}", inner.name);
                }
            }
            for door in &room.doors {
                let location = door.location.as_deref().unwrap_or("?");
                let _ = writeln!(out, "  door: {} ({location})", door.name);
            }
        }

        let _ = writeln!(out, "\n=== ENEMIES ===");
        for enemy in &self.enemies {
            let _ = writeln!(
                out,
                "{} (HP: {}, alive: {})",
                enemy.name, enemy.hp, enemy.alive
            );
        }

        let _ = writeln!(out, "\n=== TRIGGERS ===");
        for trigger in &self.triggers {
            let _ = writeln!(
                out,
                "{:?} -> {} ({})",
                trigger.event.kind, trigger.effect_kind, trigger.enemy_name
            );
        }

        let _ = writeln!(out, "\n=== WIN CONDITION ===");
        match &self.win_condition {
            Some(win) => {
                let _ = writeln!(out, "{:?}", win.kind);
                if let Some(room) = &win.room_name {
                    let _ = writeln!(out, "room: {room}");
                }
                if let Some(enemy) = &win.enemy_name {
                    let _ = writeln!(out, "enemy: {enemy}");
                }
            }
            None => {
                let _ = writeln!(out, "none");
            }
        }

        out
    }
}
