extern crate env_logger;
#[macro_use]
extern crate log;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

mod census;
mod cli;
mod discover;
mod filter;
mod layout;
mod merge;

use cli::Cli;

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    println!("busco2fasta v{}", cli::VERSION);

    let results_root = Path::new(&cli.busco_dir);
    let outdir = Path::new(&cli.outdir);

    info!("busco2fasta parameters:");
    info!("\tinput_dir: {}", results_root.display());
    info!("\toutput_dir: {}", outdir.display());
    info!("\tseqtype: {}", cli.seqtype);
    info!("\tproportion: {}", cli.proportion.0);

    if outdir.exists() {
        warn!(
            "Removing existing output directory ('{}') and its contents...",
            outdir.display()
        );
        fs::remove_dir_all(outdir)
            .with_context(|| format!("Unable to remove {}", outdir.display()))?;
    }
    fs::create_dir_all(outdir)
        .with_context(|| format!("Unable to create {}", outdir.display()))?;

    let taxa = discover::discover_taxa(results_root)?;
    let census = census::take_census(results_root, &taxa, cli.seqtype)?;
    let usable = filter::usable_orthologs(&census.counts, cli.proportion.0, taxa.len());

    merge::write_output_fastas(
        results_root,
        outdir,
        &taxa,
        &census.lineage,
        &usable,
        cli.seqtype,
    )?;

    info!("busco2fasta completed successfully.");
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
