pub mod builder;
pub mod normalize;

use tracing::{debug, info, warn};

use crate::catalog::{RawRow, RowSource};
use crate::models::{ClassRecord, Query};

pub use builder::{BuiltRecord, Parsed, build};
pub use normalize::{Discard, Field, NormalizedRow, Variant, normalize};

#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ClassRecord>,
    pub rows_seen: usize,
    pub rows_discarded: usize,
    pub fields_defaulted: usize,
}

/// Runs a query against the catalog and turns every usable row into a
/// record, in source order.
///
/// Invalid queries never reach the source. Source failures yield an empty
/// extraction.
pub async fn extract(source: &dyn RowSource, query: &Query) -> Extraction {
    if !query.is_valid() {
        debug!("Skipping fetch for invalid query: {}", query);
        return Extraction::default();
    }

    let rows = match source.fetch_rows(query).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Failed to fetch rows for {}: {}", query, e);
            return Extraction::default();
        }
    };

    let extraction = extract_rows(&rows);
    info!(
        "Extracted {} records for {} ({} rows, {} discarded, {} fields defaulted)",
        extraction.records.len(),
        query,
        extraction.rows_seen,
        extraction.rows_discarded,
        extraction.fields_defaulted
    );
    extraction
}

pub fn extract_rows(rows: &[RawRow]) -> Extraction {
    let mut extraction = Extraction {
        rows_seen: rows.len(),
        ..Extraction::default()
    };

    for (i, row) in rows.iter().enumerate() {
        match normalize(row) {
            Ok(normalized) => {
                let built = build(&normalized, &row.markup);
                extraction.fields_defaulted += built.defaulted.len();
                extraction.records.push(built.record);
            }
            Err(reason) => {
                debug!("Discarding row {}: {}", i, reason);
                extraction.rows_discarded += 1;
            }
        }
    }

    extraction
}
