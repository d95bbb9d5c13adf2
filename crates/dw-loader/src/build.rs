//! Document → world model construction.
//!
//! Runs in passes: floors and rooms first, then doors, then connection
//! resolution and items, then enemies, triggers, the win condition, and
//! combo recipes. Items validate their capability combination at every node
//! of the tree.

use tracing::warn;

use dw_world::{
    Connection, Container, Door, DoorSide, Effect, EffectKind, Enemy, Event, EventKind, Fixture,
    Floor, HealthEffect, Item, Level, Lock, Room, Trigger,
};

use crate::error::LoaderError;
use crate::schema::{
    ComboDoc, ConnectionDoc, ContainerContentsDoc, DoorDoc, EnemyDoc, EventDoc, FloorDoc,
    HealthEffectDoc, ItemDoc, LevelDoc, RoomDoc,
};

/// Name given to the synthetic floor wrapping a legacy flat `rooms` list.
const LEGACY_FLOOR_NAME: &str = "main floor";

/// Build a [`Level`] from a parsed document. Reachability is validated
/// separately by [`crate::reachability`].
pub fn build_level(doc: LevelDoc) -> Result<Level, LoaderError> {
    let doors = build_doors(&doc.doors)?;

    let floors = match (&doc.floors, &doc.rooms) {
        (Some(floor_docs), _) => floor_docs
            .iter()
            .map(|floor| build_floor(floor, &doors))
            .collect::<Result<Vec<_>, _>>()?,
        (None, Some(room_docs)) => vec![Floor::new(
            LEGACY_FLOOR_NAME,
            "the main floor",
            build_rooms(room_docs, &doors)?,
        )],
        // Structural validation guarantees one of the two is present.
        (None, None) => Vec::new(),
    };

    check_door_endpoints(&doors, &floors)?;

    let enemies = doc.enemies.iter().map(build_enemy).collect();
    let triggers = build_triggers(&doc.enemies)?;
    let win_condition = doc.win_condition.as_ref().map(build_event).transpose()?;
    let combo_items = doc
        .combo_items
        .into_iter()
        .map(build_combo)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Level {
        name: doc.name,
        intro_narrative: doc.intro_narrative,
        outro_narrative: doc.outro_narrative,
        floors,
        doors,
        enemies,
        triggers,
        win_condition,
        combo_items,
    })
}

fn build_floor(doc: &FloorDoc, doors: &[Door]) -> Result<Floor, LoaderError> {
    if doc.rooms.is_empty() {
        return Err(LoaderError::EmptyFloor(doc.name.clone()));
    }
    Ok(Floor::new(
        doc.name.clone(),
        doc.description.clone(),
        build_rooms(&doc.rooms, doors)?,
    ))
}

fn build_rooms(docs: &[RoomDoc], doors: &[Door]) -> Result<Vec<Room>, LoaderError> {
    docs.iter().map(|doc| build_room(doc, doors)).collect()
}

fn build_room(doc: &RoomDoc, doors: &[Door]) -> Result<Room, LoaderError> {
    let mut room = Room::new(doc.name.clone(), doc.description.clone());
    room.initial_description = doc.initial_description.clone();
    room.connections = resolve_connections(&doc.name, &doc.connections, doors);
    room.items = doc
        .items
        .iter()
        .map(build_item)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(room)
}

/// Resolve a room's declared connections against the door list.
///
/// Connections naming unknown doors are dropped, not rejected; existing
/// levels rely on this.
fn resolve_connections(
    room_name: &str,
    docs: &[ConnectionDoc],
    doors: &[Door],
) -> Vec<Connection> {
    docs.iter()
        .filter_map(|doc| {
            if doors.iter().any(|door| door.name == doc.door_name) {
                Some(Connection {
                    door_name: doc.door_name.clone(),
                    location: doc.location.clone(),
                    description: doc.description.clone(),
                })
            } else {
                warn!(room = room_name, door = %doc.door_name, "dropping connection to unknown door");
                None
            }
        })
        .collect()
}

/// Recursively build an item, handling `contains`, `conceals`, and
/// `fixture.produces`. Every node validates its capability combination.
pub fn build_item(doc: &ItemDoc) -> Result<Item, LoaderError> {
    let mut item = Item::new(doc.name.clone(), doc.description.clone());
    item.location = doc.location.clone();
    item.detail = doc.detail.clone();
    item.caps.portable = doc.portable;

    if doc.key {
        item = item.key();
    }

    if doc.weapon_damage > 0.0 {
        let rounds = (doc.ammo > 0).then_some(doc.ammo);
        item = item.weapon(doc.weapon_damage, rounds);
    }

    if let Some(effect) = doc.health_effect {
        item = item.health(match effect {
            HealthEffectDoc::Weak => HealthEffect::Weak,
            HealthEffectDoc::Strong => HealthEffect::Strong,
        });
    }

    if let Some(weapon_name) = &doc.weapon_name {
        if doc.ammo > 0 {
            item = item.ammo_box(weapon_name.clone(), doc.ammo);
        }
    }

    if let Some(contents) = &doc.contains {
        let contains = match contents {
            ContainerContentsDoc::Sentinel(word) if word == "empty" => None,
            ContainerContentsDoc::Sentinel(_) => {
                return Err(LoaderError::InvalidContainerContents(doc.name.clone()));
            }
            ContainerContentsDoc::Item(inner) => Some(build_item(inner)?),
        };
        let mut container = Container::holding(contains);
        if let Some(code) = &doc.code {
            container = container.with_lock(Lock::code(code.clone()));
        }
        item = item.container(container);
    }

    if let Some(hidden) = &doc.conceals {
        item = item.concealing(build_item(hidden)?);
    }

    if let Some(fixture_doc) = &doc.fixture {
        let mut fixture = Fixture::requiring(fixture_doc.required_items.iter().cloned());
        if let Some(produced) = &fixture_doc.produces {
            fixture = fixture.producing(build_item(produced)?);
        }
        if let Some(narrative) = &fixture_doc.completion_narrative {
            fixture = fixture.with_completion_narrative(narrative.clone());
        }
        item = item.fixture(fixture);
    }

    item.validate_initial_state()
        .map_err(|source| LoaderError::InvalidItem {
            name: item.name.clone(),
            source,
        })?;

    Ok(item)
}

fn build_doors(docs: &[DoorDoc]) -> Result<Vec<Door>, LoaderError> {
    docs.iter().map(build_door).collect()
}

fn build_door(doc: &DoorDoc) -> Result<Door, LoaderError> {
    let mut door = Door::between(doc.name.clone(), doc.room_a.clone(), doc.room_b.clone());

    if doc.locked {
        let lock = match (&doc.required_key_name, &doc.code) {
            (Some(key_name), None) => Lock::key(key_name.clone()),
            (None, Some(code)) => Lock::code(code.clone()),
            _ => return Err(LoaderError::InvalidDoorLock(doc.name.clone())),
        };
        door = door.with_lock(lock);
    }

    if let Some(side) = &doc.latched_from {
        let side = match side.as_str() {
            "room_a" => DoorSide::RoomA,
            "room_b" => DoorSide::RoomB,
            other => {
                return Err(LoaderError::InvalidLatchSide {
                    door: doc.name.clone(),
                    value: other.to_string(),
                });
            }
        };
        door = door.latched_from(side);
    }

    if doc.stairwell {
        door = door.stairwell();
    }

    Ok(door)
}

/// Every door endpoint must name a declared room; a dangling endpoint would
/// be fatal at traverse time.
fn check_door_endpoints(doors: &[Door], floors: &[Floor]) -> Result<(), LoaderError> {
    let room_exists =
        |name: &str| floors.iter().any(|floor| floor.room(name).is_some());
    for door in doors {
        for room in [&door.room_a, &door.room_b] {
            if !room_exists(room) {
                return Err(LoaderError::UnknownDoor {
                    door: door.name.clone(),
                    room: room.clone(),
                });
            }
        }
    }
    Ok(())
}

fn build_enemy(doc: &EnemyDoc) -> Enemy {
    let mut enemy = Enemy::new(doc.name.clone(), doc.description.clone(), doc.hp);
    enemy.room = doc.room.clone();
    enemy
}

/// Synthesize top-level triggers from per-enemy trigger specs. The engine
/// expects triggers detached from enemies.
fn build_triggers(enemies: &[EnemyDoc]) -> Result<Vec<Trigger>, LoaderError> {
    let mut triggers = Vec::new();
    for enemy in enemies {
        let Some(trigger_doc) = &enemy.trigger else {
            continue;
        };
        let kind = normalize_event_kind(&trigger_doc.event)?;
        triggers.push(Trigger {
            event: Event {
                kind,
                room_name: trigger_doc.room_name.clone(),
                item_name: trigger_doc.item_name.clone(),
                enemy_name: None,
            },
            effect: Effect {
                kind: EffectKind::EnterCombat,
                enemy_name: enemy.name.clone(),
            },
        });
    }
    Ok(triggers)
}

fn build_event(doc: &EventDoc) -> Result<Event, LoaderError> {
    Ok(Event {
        kind: normalize_event_kind(&doc.event)?,
        room_name: doc.room_name.clone(),
        item_name: doc.item_name.clone(),
        enemy_name: doc.enemy_name.clone(),
    })
}

/// Map document event names, including the legacy spellings, onto the
/// engine's event kinds.
fn normalize_event_kind(name: &str) -> Result<EventKind, LoaderError> {
    match name {
        "take_item" | "item_taken" => Ok(EventKind::ItemTaken),
        "enter_room" | "room_entered" => Ok(EventKind::RoomEntered),
        "enemy_killed" => Ok(EventKind::EnemyKilled),
        other => Err(LoaderError::UnknownEventKind(other.to_string())),
    }
}

fn build_combo(doc: ComboDoc) -> Result<dw_world::ComboItem, LoaderError> {
    Ok(dw_world::ComboItem {
        input_a_name: doc.input_item_a_name,
        input_b_name: doc.input_item_b_name,
        output_item: build_item(&doc.output_item)?,
    })
}
