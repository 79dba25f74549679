//! Headless one-shot generation: `pddlgen generate`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use tracing::error;

use pddlgen_core::{ProjectGenerator, prompt};

/// Run one generation and write all four artifacts into `out`.
pub async fn run(generator: Arc<dyn ProjectGenerator>, out: &Path) -> anyhow::Result<()> {
    println!("Generating planning project (this may take a moment)...");

    let project = match generator.generate(prompt::PROJECT_BRIEF).await {
        Ok(project) => project,
        Err(e) => {
            // Raw cause to the log; fixed user-safe message to the user.
            error!(cause = ?e, "generation failed");
            return Err(anyhow!("{}", e.user_message()));
        }
    };

    let paths = project
        .save_all(out)
        .context("failed to write project artifacts")?;

    println!("Project written:");
    for path in &paths {
        println!("  {}", path.display());
    }

    Ok(())
}
