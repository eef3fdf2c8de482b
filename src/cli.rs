use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::Parser;

use crate::layout::SeqType;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 busco2fasta version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   aggregate per-taxon BUSCO results into per-ortholog FASTA files";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    styles = STYLES
)]
pub struct Cli {
    /// directory containing a set of BUSCO results directories (e.g. one per taxon)
    #[arg(short, long)]
    pub busco_dir: String,

    /// output directory for the merged FASTA files.
    /// if it already exists, it is removed and recreated
    #[arg(short, long, default_value = "b2f_output", verbatim_doc_comment)]
    pub outdir: String,

    /// sequence type to aggregate; selects the file suffix (.faa or .fna)
    #[arg(short, long, value_enum, default_value_t = SeqType::Protein)]
    pub seqtype: SeqType,

    /// proportion of taxa a BUSCO must be present in to be output as FASTA
    #[arg(
        short,
        long,
        value_parser = |x: &str| Proportion::try_from(x),
        default_value = "1.0"
    )]
    pub proportion: Proportion,
}

/// A fraction of the total taxon count, within the closed interval [0, 1].
#[derive(Copy, Clone, Debug)]
pub struct Proportion(pub f64);

/// Error type for parsing a proportion string.
#[derive(Debug)]
pub struct ParseProportionErr(String);

impl std::fmt::Display for ParseProportionErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid proportion: {}", self.0)
    }
}

impl std::error::Error for ParseProportionErr {}

impl<'a> TryFrom<&'a str> for Proportion {
    type Error = ParseProportionErr;

    fn try_from(arg: &'a str) -> Result<Proportion, Self::Error> {
        let value = arg
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseProportionErr(format!("'{arg}' is not a float")))?;

        if !(0.0..=1.0).contains(&value) {
            return Err(ParseProportionErr(indoc::formatdoc! {"
            '{arg}' is outside the interval [0, 1]. The proportion is the \
            fraction of taxa a BUSCO must be present in, as in:
              --proportion 1.0
              --proportion 0.8
            "}));
        }

        Ok(Proportion(value))
    }
}
