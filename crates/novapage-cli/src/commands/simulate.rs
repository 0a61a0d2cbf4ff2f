use std::path::Path;

use anyhow::Result;

use novapage_core::PageConfig;
use novapage_tui::simulate::{simulate, SimulationOptions};
use novapage_tui::Manifest;

pub fn run(config: PageConfig, manifest_path: &Path, options: &SimulationOptions) -> Result<()> {
    let built = Manifest::load(manifest_path)?.build()?;
    println!(
        "Simulating '{}' at {}x{}, {} rows per step",
        built.title, options.width, options.height, options.step_rows
    );

    for snapshot in simulate(built, config, options) {
        println!("{}", snapshot);
    }
    Ok(())
}
