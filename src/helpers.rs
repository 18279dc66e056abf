//! Helper functions for product URL handling
//!
//! ShopMy collection pages link out through affiliate redirectors; these
//! utilities unwrap the indirection and strip tracking parameters so the
//! stored `product_url` points at the product itself.
//!
//! # Examples
//!
//! ```
//! use shopmy_scraper::helpers::{brand_from_title, clean_url};
//!
//! let url = clean_url("https://www.gap.com/shop/p/123?utm_source=shopmy");
//! assert_eq!(url, "https://www.gap.com/shop/p/123");
//!
//! let brand = brand_from_title("Khaite | The Danielle Jean");
//! assert_eq!(brand.as_deref(), Some("Khaite"));
//! ```

use url::Url;

/// Query parameters worth keeping on a product URL (variant selection)
const ESSENTIAL_PARAMS: &[&str] = &["variant", "color", "size"];

/// Unwrap affiliate indirection and strip tracking parameters.
///
/// Returns the input unchanged when it does not parse as a URL.
pub fn clean_url(raw: &str) -> String {
    let unwrapped = unwrap_affiliate(raw);
    strip_tracking(&unwrapped).unwrap_or(unwrapped)
}

/// Extract the destination URL from known affiliate redirectors
fn unwrap_affiliate(raw: &str) -> String {
    if raw.contains("api.shopmy.us/api/redirect_click") {
        if let Some(dest) = query_param(raw, "url") {
            return dest;
        }
    } else if raw.contains("anrdoezrs.net/click") {
        // Destination is everything after the last `url=`
        if let Some((_, tail)) = raw.rsplit_once("url=") {
            return urlencoding::decode(tail)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| tail.to_string());
        }
    } else if raw.contains("click.linksynergy.com/deeplink") {
        if let Some(dest) = query_param(raw, "murl") {
            return dest;
        }
    }
    raw.to_string()
}

fn query_param(raw: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Drop the query string except variant-selection parameters, and any fragment
fn strip_tracking(input: &str) -> Option<String> {
    let parsed = Url::parse(input).ok()?;
    parsed.host_str()?;

    let essential: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| ESSENTIAL_PARAMS.contains(&k.to_ascii_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut cleaned = parsed;
    cleaned.set_query(None);
    cleaned.set_fragment(None);
    if !essential.is_empty() {
        cleaned.query_pairs_mut().extend_pairs(essential);
    }

    Some(cleaned.to_string())
}

/// Resolve an href against the page URL.
///
/// Handles protocol-relative (`//cdn...`), root-relative (`/p/...`) and
/// already-absolute links alike.
pub fn absolutize(href: &str, base: &Url) -> Option<String> {
    base.join(href).ok().map(|u| u.to_string())
}

/// Fall back to the `"Brand | Product"` title convention when a listing
/// has no brand element.
pub fn brand_from_title(title: &str) -> Option<String> {
    let (brand, _) = title.split_once('|')?;
    let brand = brand.trim();
    if brand.is_empty() {
        None
    } else {
        Some(brand.to_string())
    }
}
