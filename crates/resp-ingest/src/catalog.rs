use std::collections::BTreeSet;

use resp_model::SurveillanceRecord;

/// Sorted, de-duplicated union of the regions present in either table.
pub fn region_catalog(
    variants: &[SurveillanceRecord],
    severity: &[SurveillanceRecord],
) -> Vec<String> {
    variants
        .iter()
        .chain(severity)
        .map(|record| record.region.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
