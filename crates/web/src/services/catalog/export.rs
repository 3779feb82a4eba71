//! CSV rendering of a product list.

use std::fmt::Write;

use crate::models::Product;

/// Column header of the export.
pub const HEADER: &str = "id,owner,name,price,category,description,image_bytes,created_at";

/// Render products as CSV (RFC 4180 quoting, `\n` line endings).
#[must_use]
pub fn to_csv(products: &[Product]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for p in products {
        let image_bytes = p.image.as_ref().map(|i| i.len().to_string()).unwrap_or_default();
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{}",
            p.id,
            escape(p.owner.as_str()),
            escape(&p.name),
            p.price.plain(),
            escape(p.category.label()),
            escape(&p.description),
            image_bytes,
            p.created_at.to_rfc3339(),
        );
    }

    csv
}

/// Quote a field if it contains a separator, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Bytes;
    use chrono::{TimeZone, Utc};
    use startify_core::{Category, Price, ProductId, Username};

    use super::*;
    use crate::models::ProductImage;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_to_csv_rows() {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        let products = vec![
            Product {
                id: ProductId::new(1_772_368_200_042),
                owner: Username::parse("ana").unwrap(),
                name: "Rust, from zero".to_owned(),
                price: Price::parse("97,5").unwrap(),
                category: Category::Course,
                description: "Video lessons".to_owned(),
                image: Some(ProductImage {
                    content_type: "image/png",
                    bytes: Bytes::from_static(&[1, 2, 3]),
                }),
                created_at,
            },
            Product {
                id: ProductId::new(1_772_368_200_043),
                owner: Username::parse("ana").unwrap(),
                name: "Notion kit".to_owned(),
                price: Price::parse("19").unwrap(),
                category: Category::Template,
                description: "Planner".to_owned(),
                image: None,
                created_at,
            },
        ];

        let csv = to_csv(&products);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "1772368200042,ana,\"Rust, from zero\",97.50,Course,Video lessons,3,2026-03-01T12:30:00+00:00"
        );
        assert_eq!(
            lines[2],
            "1772368200043,ana,Notion kit,19.00,Template,Planner,,2026-03-01T12:30:00+00:00"
        );
    }
}
