// lcstats/src/ui/feature_table.rs
//! Human-readable name/value tables for `extract --format table`.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use lcstats_core::FeatureVector;

/// Formats a value with six decimal places; non-finite values print as-is.
pub fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{:.6}", value)
    } else {
        value.to_string()
    }
}

/// Builds a two-column table for one light curve.
pub fn build_feature_table(source: &str, features: &FeatureVector) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("feature"), Cell::new(source)]);

    for (name, value) in features.iter() {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format_value(value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
