use crate::helpers::{absolutize, brand_from_title, clean_url};
use crate::models::ProductRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Candidate selectors for a product tile, tried in order; the first one
/// matching anything on the page wins.
pub const PRODUCT_CONTAINER_SELECTORS: &[&str] =
    &[r#"[class*="product"]"#, ".product-card", ".product-item"];

const TITLE_SELECTORS: &[&str] = &[r#"[class*="title"]"#, "h3", "h2"];
const BRAND_SELECTORS: &[&str] = &[r#"[class*="brand"]"#, r#"[class*="vendor"]"#];

/// Walk the rendered HTML and collect one `ProductRecord` per product tile,
/// in DOM order.
///
/// A candidate missing its title or product link is skipped with a warning;
/// a missing brand falls back to the `"Brand | Product"` title convention or
/// the empty string. This is the only record-level failure policy — nothing
/// here aborts the run.
pub fn extract_products(html: &str, base: &Url) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);

    let containers: Vec<ElementRef> = PRODUCT_CONTAINER_SELECTORS
        .iter()
        .find_map(|s| {
            let selector = Selector::parse(s).unwrap();
            let found: Vec<ElementRef> = document.select(&selector).collect();
            if found.is_empty() {
                None
            } else {
                log::debug!("Matched {} elements with selector: {}", found.len(), s);
                Some(found)
            }
        })
        .unwrap_or_default();

    containers
        .into_iter()
        .filter_map(|element| extract_one(element, base))
        .collect()
}

fn extract_one(element: ElementRef, base: &Url) -> Option<ProductRecord> {
    let title = match first_text(element, TITLE_SELECTORS) {
        Some(title) => title,
        None => {
            log::warn!("Skipping product candidate without a title");
            return None;
        }
    };

    let link_selector = Selector::parse("a").unwrap();
    let product_url = match element
        .select(&link_selector)
        .find_map(|a| a.value().attr("href"))
        .and_then(|href| absolutize(href, base))
    {
        Some(url) => clean_url(&url),
        None => {
            log::warn!("Skipping '{}': no product link", title);
            return None;
        }
    };

    let brand = first_text(element, BRAND_SELECTORS)
        .or_else(|| brand_from_title(&title))
        .unwrap_or_default();

    let image_selector = Selector::parse("img").unwrap();
    let image_url = element
        .select(&image_selector)
        .find_map(|img| img.value().attr("src").or_else(|| img.value().attr("data-src")))
        .and_then(|src| absolutize(src, base))
        .unwrap_or_default();

    Some(ProductRecord {
        title,
        brand,
        image_url,
        product_url,
    })
}

/// First non-empty inner text among the candidate selectors, in order
fn first_text(element: ElementRef, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|s| {
        let selector = Selector::parse(s).unwrap();
        element
            .select(&selector)
            .next()
            .map(inner_text)
            .filter(|text| !text.is_empty())
    })
}

fn inner_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://shopmy.us/collections/727615").unwrap()
    }

    #[test]
    fn test_extracts_all_fields() {
        let html = r#"
            <div class="product-card">
                <a href="/products/gaspard?utm_source=shopmy">
                    <img src="//cdn.shopmy.us/img/gaspard.jpg">
                    <h3 class="title">Gaspard Cardigan</h3>
                    <div class="brand">Sezane</div>
                </a>
            </div>
        "#;

        let records = extract_products(html, &base());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Gaspard Cardigan");
        assert_eq!(records[0].brand, "Sezane");
        assert_eq!(records[0].image_url, "https://cdn.shopmy.us/img/gaspard.jpg");
        assert_eq!(records[0].product_url, "https://shopmy.us/products/gaspard");
    }

    #[test]
    fn test_missing_brand_yields_empty_string() {
        let html = r#"
            <div class="product-card">
                <a href="/products/tote"><h3>Canvas Tote</h3></a>
                <img src="https://cdn.shopmy.us/img/tote.jpg">
            </div>
        "#;

        let records = extract_products(html, &base());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].brand, "");
        assert_eq!(records[0].title, "Canvas Tote");
    }

    #[test]
    fn test_brand_falls_back_to_title_pipe() {
        let html = r#"
            <div class="product-card">
                <a href="/products/jean"><h3>Khaite | The Danielle Jean</h3></a>
            </div>
        "#;

        let records = extract_products(html, &base());
        assert_eq!(records[0].brand, "Khaite");
    }

    #[test]
    fn test_missing_title_skips_candidate() {
        let html = r#"
            <div class="product-card">
                <a href="/products/mystery"><img src="/img/mystery.jpg"></a>
            </div>
            <div class="product-card">
                <a href="/products/named"><h3>Named Product</h3></a>
            </div>
        "#;

        let records = extract_products(html, &base());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Named Product");
    }

    #[test]
    fn test_missing_link_skips_candidate() {
        let html = r#"
            <div class="product-card"><h3>Orphan Product</h3></div>
        "#;

        assert!(extract_products(html, &base()).is_empty());
    }

    #[test]
    fn test_data_src_fallback_for_lazy_images() {
        let html = r#"
            <div class="product-card">
                <a href="/products/lazy"><h3>Lazy Image Product</h3></a>
                <img data-src="https://cdn.shopmy.us/img/lazy.jpg">
            </div>
        "#;

        let records = extract_products(html, &base());
        assert_eq!(records[0].image_url, "https://cdn.shopmy.us/img/lazy.jpg");
    }

    #[test]
    fn test_empty_page_yields_no_records() {
        assert!(extract_products("<html><body></body></html>", &base()).is_empty());
    }

    #[test]
    fn test_dom_order_preserved() {
        let html = r#"
            <div class="product-card"><a href="/p/1"><h3>First</h3></a></div>
            <div class="product-card"><a href="/p/2"><h3>Second</h3></a></div>
            <div class="product-card"><a href="/p/3"><h3>Third</h3></a></div>
        "#;

        let titles: Vec<String> = extract_products(html, &base())
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }
}
