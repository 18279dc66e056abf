use crate::models::ProductRecord;
use std::collections::HashSet;

/// Keep the first record seen for each `product_url`, preserving input order.
///
/// Pure and idempotent; duplicate policy is keyed on `product_url` only,
/// not full-record equality.
pub fn dedup_by_product_url(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.product_url.clone()))
        .collect()
}
