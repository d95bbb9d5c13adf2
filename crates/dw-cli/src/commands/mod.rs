pub mod check;
pub mod show;

use std::path::Path;

use dw_world::Level;

/// Load a level document, mapping loader errors to display strings.
pub fn load_level(file: &Path) -> Result<Level, String> {
    dw_loader::load_file(file).map_err(|err| err.to_string())
}
