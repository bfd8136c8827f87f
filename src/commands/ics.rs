use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use quickagenda_core::{EventStore, ShareCode};

pub async fn run<S: EventStore>(store: S, code: &str, output: Option<PathBuf>) -> Result<()> {
    let ics = store.fetch_ics(&ShareCode::new(code)).await?;

    match output {
        Some(path) => {
            std::fs::write(&path, &ics)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!("{} {}", "Saved".green(), path.display());
        }
        None => print!("{}", ics),
    }
    Ok(())
}
