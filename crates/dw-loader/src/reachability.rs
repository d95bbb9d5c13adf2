//! Global room reachability validation.
//!
//! Every room in the level must be reachable from the first room of the
//! first floor by walking doors (locks and latches are ignored here; a
//! locked door still counts as an edge). Anything the walk misses is a level
//! authoring bug.

use std::collections::{HashSet, VecDeque};

use dw_world::Level;

use crate::error::LoaderError;

/// Breadth-first search across doors from the starting room; fails if any
/// room is left unvisited.
pub fn validate(level: &Level) -> Result<(), LoaderError> {
    let all_rooms: Vec<&dw_world::Room> = level
        .floors
        .iter()
        .flat_map(|floor| floor.rooms.iter())
        .collect();

    let Some(start) = all_rooms.first() else {
        // Structural validation rejects empty levels before this point.
        return Ok(());
    };

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    visited.insert(start.name.as_str());
    queue.push_back(start.name.as_str());

    while let Some(current) = queue.pop_front() {
        let room = all_rooms
            .iter()
            .find(|room| room.name == current)
            .expect("queued room exists in level");

        for conn in &room.connections {
            // Connections to unknown doors were dropped at build time.
            let Some(door) = level.door(&conn.door_name) else {
                continue;
            };
            let other = door.other_room(current);
            if visited.insert(other) {
                queue.push_back(other);
            }
        }
    }

    let unreachable: Vec<String> = all_rooms
        .iter()
        .filter(|room| !visited.contains(room.name.as_str()))
        .map(|room| room.name.clone())
        .collect();

    if unreachable.is_empty() {
        Ok(())
    } else {
        Err(LoaderError::UnreachableRooms(unreachable))
    }
}
