use serde::{Deserialize, Serialize};

/// One product listing extracted from a collection page.
///
/// Field order doubles as the CSV column order
/// (`title,brand,image_url,product_url`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub title: String,
    /// Empty string when the listing carries no brand element and the
    /// title yields no fallback.
    pub brand: String,
    pub image_url: String,
    /// Dedup key: unique within the final output set.
    pub product_url: String,
}
