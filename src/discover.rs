use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

/// Enumerates the per-taxon BUSCO result directories directly under the
/// results root.
///
/// The returned list is sorted so that downstream processing, and therefore
/// the record order of the merged output, is reproducible across platforms.
///
/// # Errors
///
/// Fails if the results root does not exist, is not a directory, or contains
/// no entries at all.
pub fn discover_taxa(results_root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(results_root).with_context(|| {
        format!(
            "Unable to read input directory {}",
            results_root.display()
        )
    })?;

    let mut taxa = entries
        .map(|entry| -> Result<String> {
            let entry = entry?;
            Ok(entry.file_name().to_string_lossy().into_owned())
        })
        .collect::<Result<Vec<_>>>()?;

    ensure!(
        !taxa.is_empty(),
        "no BUSCO runs found in input directory {}",
        results_root.display()
    );

    taxa.sort_unstable();

    info!(
        "Found {} BUSCO runs in input directory ('{}'):",
        taxa.len(),
        results_root.display()
    );
    for taxon in &taxa {
        info!("\t- {taxon}");
    }

    Ok(taxa)
}
