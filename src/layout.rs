use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Marker prefixing the per-taxon run directory, e.g. `run_eukaryota_odb10`.
/// The text after the marker is the lineage name.
pub const RUN_MARKER: &str = "run_";

const SEQUENCE_SUBDIR: &str = "busco_sequences";

/// The sequence type of the BUSCO output files to aggregate.
#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum SeqType {
    Protein,
    Nucleotide,
}

impl SeqType {
    /// The file suffix BUSCO uses for this sequence type.
    pub fn suffix(&self) -> &'static str {
        match self {
            SeqType::Protein => ".faa",
            SeqType::Nucleotide => ".fna",
        }
    }
}

impl std::fmt::Display for SeqType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SeqType::Protein => "protein",
            SeqType::Nucleotide => "nucleotide",
        })
    }
}

/// Whether a sequence file came from the single-copy or the multi-copy
/// BUSCO set of its taxon.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CopyType {
    SingleCopy,
    MultiCopy,
}

/// Both copy types, in the order they are always visited.
pub const COPY_TYPES: [CopyType; 2] = [CopyType::SingleCopy, CopyType::MultiCopy];

impl CopyType {
    /// The suffix appended to rewritten headers in the merged output.
    pub fn header_suffix(&self) -> &'static str {
        match self {
            CopyType::SingleCopy => "_sc",
            CopyType::MultiCopy => "_mc",
        }
    }

    fn dir_name(&self) -> &'static str {
        match self {
            CopyType::SingleCopy => "single_copy_busco_sequences",
            CopyType::MultiCopy => "multi_copy_busco_sequences",
        }
    }
}

/// The directory holding one copy type's sequence files for a taxon's run.
pub fn copy_dir(results_root: &Path, taxon: &str, lineage: &str, copy_type: CopyType) -> PathBuf {
    results_root
        .join(taxon)
        .join(format!("{RUN_MARKER}{lineage}"))
        .join(SEQUENCE_SUBDIR)
        .join(copy_type.dir_name())
}

/// The full path of one ortholog's sequence file within a taxon's run.
pub fn sequence_file(
    results_root: &Path,
    taxon: &str,
    lineage: &str,
    copy_type: CopyType,
    ortholog: &str,
    seqtype: SeqType,
) -> PathBuf {
    copy_dir(results_root, taxon, lineage, copy_type).join(format!("{ortholog}{}", seqtype.suffix()))
}
