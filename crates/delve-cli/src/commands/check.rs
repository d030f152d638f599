use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path) -> Result<(), String> {
    let world = super::load_world(path)?;

    println!(
        "  {} for '{}'.",
        "All checks passed".green(),
        world.meta().title
    );
    println!(
        "  {} items, {} locations, {} interactions",
        world.items().count(),
        world.locations().count(),
        world.interactions().len()
    );

    Ok(())
}
