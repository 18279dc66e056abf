use crate::error::Result;
use crate::models::ProductRecord;
use std::path::Path;

/// Write the record set as CSV, overwriting any existing file.
///
/// The header row comes from `ProductRecord`'s field order; quoting and
/// escaping follow RFC 4180. Zero records still produce a header-only file.
pub fn write_csv(records: &[ProductRecord], path: &Path) -> Result<()> {
    // The csv crate only emits its automatic header on the first serialize,
    // so an empty record set would produce an empty file. Write the header
    // ourselves to keep the zero-product output valid.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["title", "brand", "image_url", "product_url"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "title,brand,image_url,product_url\n");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let records = vec![
            ProductRecord {
                title: "Gaspard Cardigan".to_string(),
                brand: "Sezane".to_string(),
                image_url: "https://cdn.example.com/gaspard.jpg".to_string(),
                product_url: "https://www.sezane.com/us/product/gaspard".to_string(),
            },
            ProductRecord {
                title: "Dress, with \"quotes\"\nand a newline".to_string(),
                brand: String::new(),
                image_url: "https://cdn.example.com/dress.jpg".to_string(),
                product_url: "https://shop.example.com/p/dress?variant=1".to_string(),
            },
        ];

        write_csv(&records, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let parsed: Vec<ProductRecord> =
            reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale content from a previous run\n").unwrap();

        write_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "title,brand,image_url,product_url\n");
    }
}
