use std::path::Path;

use dw_engine::Engine;

pub fn run(file: &Path, json: bool) -> Result<(), String> {
    let level = super::load_level(file)?;
    let engine = Engine::new(level);
    let snapshot = engine.debug_snapshot();

    if json {
        let rendered = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| format!("failed to serialize snapshot: {err}"))?;
        println!("{rendered}");
    } else {
        print!("{}", snapshot.render());
    }

    Ok(())
}
