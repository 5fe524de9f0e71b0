//! Sweep command handler.

use mosaic::{MosaicConfig, ResourceLifecycleManager};
use tracing::instrument;

/// Handles the sweep command.
#[instrument(skip_all)]
pub fn handle_sweep_command(config: &MosaicConfig) -> anyhow::Result<()> {
    let lifecycle = ResourceLifecycleManager::new(config.scratch_dir())?;
    let report = lifecycle.sweep()?;

    for path in report.removed() {
        println!("removed {}", path.display());
    }
    println!(
        "{} removed, {} ignored in {}",
        report.removed().len(),
        report.ignored(),
        lifecycle.scratch_dir().display()
    );
    Ok(())
}
