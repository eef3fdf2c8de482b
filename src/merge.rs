use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;
use itertools::iproduct;

use crate::layout::{self, CopyType, SeqType, COPY_TYPES};

/// One record of a merged ortholog FASTA: the rewritten header and the full
/// sequence body on a single line.
#[derive(Debug)]
pub struct MergedRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

/// Reads one (taxon, copy-type) sequence file for an ortholog, rewriting
/// each record header to `{taxon}.{original_id}{_sc|_mc}`. Descriptive text
/// after the first whitespace of the original header is discarded, and
/// multi-line sequence bodies are flattened into one line.
///
/// Returns `None` when the file does not exist; a taxon is not expected to
/// have every ortholog in every copy-type set.
///
/// # Errors
///
/// Fails if the file exists but is not valid FASTA, e.g. when its first
/// content line is not a `>` header.
pub fn read_contribution(
    path: &Path,
    taxon: &str,
    copy_type: CopyType,
) -> Result<Option<Vec<MergedRecord>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Unable to open {}", path.display())),
    };

    let reader = fasta::Reader::new(file);

    let mut records = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Malformed FASTA in {}", path.display()))?;

        records.push(MergedRecord {
            id: format!("{taxon}.{}{}", record.id(), copy_type.header_suffix()),
            seq: record.seq().to_vec(),
        });
    }

    Ok(Some(records))
}

/// Appends every located (taxon, copy-type) contribution for one ortholog to
/// its merged output file. Taxa are visited in discovery order, and within a
/// taxon the single-copy set comes before the multi-copy set.
fn write_ortholog(
    results_root: &Path,
    outdir: &Path,
    taxa: &[String],
    lineage: &str,
    ortholog: &str,
    seqtype: SeqType,
) -> Result<()> {
    let out_path = outdir.join(format!("{ortholog}{}", seqtype.suffix()));
    let out_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&out_path)
        .with_context(|| format!("Unable to create {}", out_path.display()))?;
    let mut writer = fasta::Writer::new(out_file);

    for (taxon, copy_type) in iproduct!(taxa, COPY_TYPES) {
        let path =
            layout::sequence_file(results_root, taxon, lineage, copy_type, ortholog, seqtype);

        if let Some(records) = read_contribution(&path, taxon, copy_type)? {
            for record in records {
                writer.write(&record.id, None, &record.seq)?;
            }
        }
    }

    writer
        .flush()
        .with_context(|| format!("Unable to write {}", out_path.display()))?;

    Ok(())
}

/// Writes one merged multi-FASTA per selected ortholog into the output
/// directory, with a running progress counter on the console.
pub fn write_output_fastas(
    results_root: &Path,
    outdir: &Path,
    taxa: &[String],
    lineage: &str,
    selected: &[String],
    seqtype: SeqType,
) -> Result<()> {
    let total = selected.len();
    info!(
        "Writing {total} merged FASTA files to output directory ('{}'). This may take a moment...",
        outdir.display()
    );

    for (i, ortholog) in selected.iter().enumerate() {
        write_ortholog(results_root, outdir, taxa, lineage, ortholog, seqtype)?;

        print!("\r\t{}/{total} files written.", i + 1);
        io::stdout().flush()?;
    }
    println!("\r\t{total}/{total} files written.");

    Ok(())
}
