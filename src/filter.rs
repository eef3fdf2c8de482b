use indexmap::IndexMap;

/// Selects the orthologs present in at least `round(n_taxa * proportion)`
/// taxa, in tally insertion order.
///
/// A proportion of 0.0 selects every ortholog ever seen; 1.0 requires
/// presence in every taxon.
pub fn usable_orthologs(
    counts: &IndexMap<String, usize>,
    proportion: f64,
    n_taxa: usize,
) -> Vec<String> {
    let min_required = (n_taxa as f64 * proportion).round() as usize;

    info!("Selecting BUSCOs present (single-copy or multi-copy) in >= {min_required} taxa...");

    counts
        .iter()
        .filter(|&(_, &count)| count >= min_required)
        .map(|(id, _)| id.clone())
        .collect()
}
