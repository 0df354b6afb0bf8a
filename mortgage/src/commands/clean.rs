// mortgage/src/commands/clean.rs
//
// USE CASE: Remove generated files.

use std::path::PathBuf;

use mortgage_core::application::clean_outputs;

pub fn execute(output_dir: PathBuf) -> anyhow::Result<()> {
    println!("🧹 Cleaning '{}'...", output_dir.display());

    let removed = clean_outputs(&output_dir)?;
    for path in &removed {
        println!("   🗑️  Artifact removed: {}", path.display());
    }

    println!("✨ {} file(s) removed.", removed.len());
    Ok(())
}
