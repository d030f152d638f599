pub mod check;
pub mod play;

use std::fs;
use std::path::Path;

use delve_core::World;

/// Read and parse a world file without validating it.
fn read_world(path: &Path) -> Result<World, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    let world: World = serde_json::from_str(&source)
        .map_err(|e| format!("cannot parse '{}': {e}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        items = world.items().count(),
        locations = world.locations().count(),
        "world parsed"
    );
    Ok(world)
}

/// Read a world file and print every validation problem.
/// Returns the world if it is valid.
fn load_world(path: &Path) -> Result<World, String> {
    let world = read_world(path)?;
    let issues = world.validate();
    if issues.is_empty() {
        return Ok(world);
    }
    for issue in &issues {
        eprintln!("  {issue}");
    }
    Err(format!("{} problem(s) in '{}'", issues.len(), path.display()))
}
