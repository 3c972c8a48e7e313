use chrono::NaiveDate;
use tracing::debug;

use resp_model::{AlignedSeriesPair, WideSeries};

use crate::error::Result;

/// Put both series on the severity series' date index.
///
/// Both are first cut to dates on or after `epoch`. Variant weeks missing from
/// the severity index are dropped; severity weeks without variant reporting
/// get `0.0` in every variant column.
pub fn align(
    severity: &WideSeries,
    variants: &WideSeries,
    epoch: NaiveDate,
) -> Result<AlignedSeriesPair> {
    let severity = severity.since(epoch);
    let variants_in_window = variants.since(epoch);
    let dropped = variants_in_window
        .index()
        .iter()
        .filter(|date| severity.index().binary_search(date).is_err())
        .count();
    let variants = variants_in_window.reindex_like(&severity);
    debug!(
        %epoch,
        dates = severity.len(),
        dropped_variant_weeks = dropped,
        "series aligned"
    );
    Ok(AlignedSeriesPair::from_parts(severity, variants)?)
}
