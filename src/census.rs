use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::layout::{self, SeqType, COPY_TYPES, RUN_MARKER};

/// The per-ortholog presence tally across all taxa, plus the lineage shared
/// by every taxon's run directory.
#[derive(Debug)]
pub struct Census {
    /// OrthologID -> number of distinct taxa with at least one matching
    /// sequence file, keyed in first-seen order.
    pub counts: IndexMap<String, usize>,
    pub lineage: String,
}

#[derive(Debug, Error)]
pub enum CensusError {
    #[error(
        "inconsistent lineages across taxa:
taxon `{taxon}` was run against lineage `{found}`,
whereas earlier taxa were run against `{expected}`
suggestion: aggregate results from a single BUSCO lineage at a time"
    )]
    LineageMismatch {
        taxon: String,
        expected: String,
        found: String,
    },

    #[error(
        "no `run_<lineage>` directory found in any taxon; \
         is this a directory of BUSCO results?"
    )]
    NoLineage,
}

/// Scans every taxon's run directory and tallies which orthologs are
/// present where.
///
/// A taxon contributes at most 1 to an ortholog's count, regardless of
/// whether the ortholog appears in its single-copy set, its multi-copy set,
/// or both.
///
/// # Errors
///
/// Fails if two taxa were run against different lineages, or if no taxon has
/// a run directory at all. A taxon lacking one of the copy-type directories
/// is normal and contributes nothing for that copy type; a taxon lacking a
/// run directory entirely is skipped with a warning.
pub fn take_census(results_root: &Path, taxa: &[String], seqtype: SeqType) -> Result<Census> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    let mut lineage: Option<String> = None;

    for taxon in taxa {
        let Some(taxon_lineage) = find_lineage(results_root, taxon)? else {
            warn!("No {RUN_MARKER}<lineage> directory in taxon {taxon}; skipping");
            continue;
        };

        match &lineage {
            None => lineage = Some(taxon_lineage.clone()),
            Some(expected) if *expected != taxon_lineage => {
                return Err(CensusError::LineageMismatch {
                    taxon: taxon.clone(),
                    expected: expected.clone(),
                    found: taxon_lineage,
                }
                .into());
            }
            Some(_) => {}
        }

        // collect the taxon's orthologs across both copy types before
        // tallying, so that a taxon with a single-copy and a multi-copy hit
        // for the same ortholog is counted once
        let mut seen = IndexSet::new();
        for copy_type in COPY_TYPES {
            let dir = layout::copy_dir(results_root, taxon, &taxon_lineage, copy_type);
            seen.extend(ortholog_ids(&dir, seqtype)?);
        }

        for id in seen {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    let lineage = lineage.ok_or(CensusError::NoLineage)?;

    info!(
        "Counted {} distinct BUSCOs across {} taxa (lineage: {lineage})",
        counts.len(),
        taxa.len()
    );

    Ok(Census { counts, lineage })
}

/// Finds the lineage encoded in a taxon's `run_<lineage>` directory name.
/// Only one run directory is expected per taxon; the first match wins.
fn find_lineage(results_root: &Path, taxon: &str) -> Result<Option<String>> {
    let taxon_dir = results_root.join(taxon);
    let entries = fs::read_dir(&taxon_dir)
        .with_context(|| format!("Unable to read taxon directory {}", taxon_dir.display()))?;

    for entry in entries {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if let Some(lineage) = name.strip_prefix(RUN_MARKER) {
            return Ok(Some(lineage.to_string()));
        }
    }

    Ok(None)
}

/// Lists the ortholog IDs in one copy-type directory, sorted. A missing
/// directory is expected (e.g. a taxon with no multi-copy hits) and yields
/// an empty list.
fn ortholog_ids(dir: &Path, seqtype: SeqType) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Unable to read {}", dir.display()));
        }
    };

    let mut ids = Vec::new();
    for entry in entries {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if let Some(id) = name.strip_suffix(seqtype.suffix()) {
            debug!("Processing file: {name}");
            ids.push(id.to_string());
        }
    }

    ids.sort_unstable();
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CopyType;

    fn add_sequence(root: &Path, taxon: &str, lineage: &str, copy_type: CopyType, id: &str) {
        let dir = layout::copy_dir(root, taxon, lineage, copy_type);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{id}.faa")), ">seq\nMKTV\n").unwrap();
    }

    fn taxa(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_distinct_taxa_not_files() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("A")).unwrap();
        fs::create_dir(root.join("B")).unwrap();

        // A has OG1 in both copy-type sets; B has it once
        add_sequence(root, "A", "lin", CopyType::SingleCopy, "OG1");
        add_sequence(root, "A", "lin", CopyType::MultiCopy, "OG1");
        add_sequence(root, "B", "lin", CopyType::SingleCopy, "OG1");
        add_sequence(root, "B", "lin", CopyType::SingleCopy, "OG2");

        let census = take_census(root, &taxa(&["A", "B"]), SeqType::Protein).unwrap();
        assert_eq!(census.lineage, "lin");
        assert_eq!(census.counts["OG1"], 2);
        assert_eq!(census.counts["OG2"], 1);
    }

    #[test]
    fn missing_copy_type_dir_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        // single-copy only; the multi-copy directory never exists
        add_sequence(root, "A", "lin", CopyType::SingleCopy, "OG1");

        let census = take_census(root, &taxa(&["A"]), SeqType::Protein).unwrap();
        assert_eq!(census.counts.len(), 1);
    }

    #[test]
    fn other_suffixes_ignored() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        add_sequence(root, "A", "lin", CopyType::SingleCopy, "OG1");
        let dir = layout::copy_dir(root, "A", "lin", CopyType::SingleCopy);
        fs::write(dir.join("OG2.fna"), ">seq\nACGT\n").unwrap();

        let census = take_census(root, &taxa(&["A"]), SeqType::Protein).unwrap();
        assert_eq!(census.counts.keys().collect::<Vec<_>>(), vec!["OG1"]);
    }

    #[test]
    fn lineage_mismatch_fails() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        add_sequence(root, "A", "lin1", CopyType::SingleCopy, "OG1");
        add_sequence(root, "B", "lin2", CopyType::SingleCopy, "OG1");

        let err = take_census(root, &taxa(&["A", "B"]), SeqType::Protein).unwrap_err();
        assert!(err.to_string().contains("inconsistent lineages"));
    }

    #[test]
    fn taxon_without_run_dir_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        add_sequence(root, "A", "lin", CopyType::SingleCopy, "OG1");
        fs::create_dir(root.join("B")).unwrap();

        let census = take_census(root, &taxa(&["A", "B"]), SeqType::Protein).unwrap();
        assert_eq!(census.counts["OG1"], 1);
    }

    #[test]
    fn no_run_dir_anywhere_fails() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("A")).unwrap();

        let err = take_census(root, &taxa(&["A"]), SeqType::Protein).unwrap_err();
        assert!(err.to_string().contains("no `run_<lineage>` directory"));
    }
}
