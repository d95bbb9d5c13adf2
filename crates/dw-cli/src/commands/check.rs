use std::path::Path;

pub fn run(file: &Path) -> Result<(), String> {
    let level = super::load_level(file)?;

    let room_count: usize = level.floors.iter().map(|floor| floor.rooms.len()).sum();
    let item_count: usize = level
        .floors
        .iter()
        .flat_map(|floor| floor.rooms.iter())
        .map(|room| room.items.len())
        .sum();

    println!("  All checks passed for '{}'.", level.name);
    println!(
        "  {} floor(s), {} room(s), {} door(s), {} item(s), {} enem(ies)",
        level.floors.len(),
        room_count,
        level.doors.len(),
        item_count,
        level.enemies.len()
    );

    Ok(())
}
