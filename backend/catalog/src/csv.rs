//! # CSV
//!
//! Line-oriented parser for the product sheet.
//!
//! - A leading byte-order mark is dropped
//! - Whole text is trimmed and split on `\n`, header plus at least one row
//! - Header is split on plain commas
//! - Rows are split with a quote-aware splitter, `"` toggles quoting and is dropped
//! - Values are zipped to header names positionally, missing values are empty
//! - `price`, `rating` and `reviews` are coerced leniently and default to 0
use std::collections::BTreeMap;

use crate::{
    error::CatalogError,
    products::{MAX_RATING, ProductCollection, ProductRecord},
};

pub fn parse_catalog(text: &str) -> Result<ProductCollection, CatalogError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        return Err(CatalogError::TooFewLines);
    }

    let headers: Vec<&str> = lines[0].split(',').map(str::trim).collect();

    let records = lines[1..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| build_record(&headers, split_line(line)))
        .collect();

    Ok(records)
}

pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.iter().map(|field| strip_quotes(field)).collect()
}

fn strip_quotes(field: &str) -> String {
    let field = field.strip_prefix('"').unwrap_or(field);
    let field = field.strip_suffix('"').unwrap_or(field);

    field.trim().to_string()
}

fn build_record(headers: &[&str], values: Vec<String>) -> ProductRecord {
    let mut record = ProductRecord::default();
    let mut values = values.into_iter();

    for header in headers {
        let value = values.next().unwrap_or_default();

        match *header {
            "name" => record.name = value,
            "category" => record.category = value,
            "description" => record.description = value,
            "price" => record.price = coerce_price(&value),
            "rating" => record.rating = coerce_rating(&value),
            "reviews" => record.reviews = coerce_reviews(&value),
            "image" => record.image = non_empty(value),
            "amazon_link" => record.amazon_link = non_empty(value),
            "featured" => record.featured = value,
            other => {
                record.extra.insert(other.to_string(), value);
            }
        }
    }

    record
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

pub fn coerce_price(value: &str) -> f64 {
    leading_float(value)
        .filter(|price| price.is_finite() && *price > 0.0)
        .unwrap_or(0.0)
}

pub fn coerce_rating(value: &str) -> f64 {
    leading_float(value)
        .filter(|rating| rating.is_finite())
        .map(|rating| rating.clamp(0.0, MAX_RATING))
        .unwrap_or(0.0)
}

pub fn coerce_reviews(value: &str) -> u32 {
    let digits = leading_digits(value.strip_prefix('+').unwrap_or(value));

    // Negative counts collapse to zero along with garbage.
    if digits.is_empty() {
        return 0;
    }

    digits.parse::<u64>().map_or(u32::MAX, |count| {
        u32::try_from(count).unwrap_or(u32::MAX)
    })
}

/// Longest numeric prefix, the way browsers read `"12.5kg"` as `12.5`.
fn leading_float(value: &str) -> Option<f64> {
    let bytes = value.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    value[..end].parse().ok()
}

fn leading_digits(value: &str) -> &str {
    &value[..count_digits(value.as_bytes())]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::{coerce_price, coerce_rating, coerce_reviews, parse_catalog, split_line};
    use crate::error::CatalogError;

    #[test]
    fn test_quoted_comma() {
        let products = parse_catalog("name,price\n\"A, B\",10").unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products.records()[0].name, "A, B");
        assert_eq!(products.records()[0].price, 10.0);
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let products = parse_catalog("\u{feff}name,price\nBanner,80\n").unwrap();

        assert_eq!(products.records()[0].name, "Banner");
        assert_eq!(products.records()[0].price, 80.0);
        assert!(products.records()[0].extra.is_empty());
    }

    #[test]
    fn test_header_only_is_rejected() {
        assert!(matches!(
            parse_catalog("name,price\n"),
            Err(CatalogError::TooFewLines)
        ));
        assert!(matches!(parse_catalog(""), Err(CatalogError::TooFewLines)));
        assert!(matches!(
            parse_catalog("name,price\n   \n\n"),
            Err(CatalogError::TooFewLines)
        ));
    }

    #[test]
    fn test_full_row() {
        let csv = "name,category,description,price,rating,reviews,image,amazon_link,featured\r\n\
                   Banner,Banners,\"Gold, silver\",235,3.7,100,img.jpg,https://a.in/x,Yes\r\n";
        let products = parse_catalog(csv).unwrap();
        let record = &products.records()[0];

        assert_eq!(record.name, "Banner");
        assert_eq!(record.category, "Banners");
        assert_eq!(record.description, "Gold, silver");
        assert_eq!(record.price, 235.0);
        assert_eq!(record.rating, 3.7);
        assert_eq!(record.reviews, 100);
        assert_eq!(record.image.as_deref(), Some("img.jpg"));
        assert_eq!(record.amazon_link.as_deref(), Some("https://a.in/x"));
        assert!(record.is_featured());
    }

    #[test]
    fn test_missing_trailing_fields() {
        let products = parse_catalog("name,price,image,featured\nSolo,12").unwrap();
        let record = &products.records()[0];

        assert_eq!(record.name, "Solo");
        assert_eq!(record.price, 12.0);
        assert_eq!(record.image, None);
        assert_eq!(record.featured, "");
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let products = parse_catalog("name\na\n\n   \nb").unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products.records()[1].name, "b");
    }

    #[test]
    fn test_header_order_and_extra_columns() {
        let products = parse_catalog(" sku , name ,price\n42,Cake Topper,99").unwrap();
        let record = &products.records()[0];

        assert_eq!(record.name, "Cake Topper");
        assert_eq!(record.price, 99.0);
        assert_eq!(record.extra.get("sku").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("a,\"b,c\", d "), ["a", "b,c", "d"]);
        assert_eq!(split_line(""), [""]);
        assert_eq!(split_line("x,,"), ["x", "", ""]);
        assert_eq!(split_line("\"unterminated, tail"), ["unterminated, tail"]);
    }

    #[test]
    fn test_coercion_defaults() {
        assert_eq!(coerce_reviews("many"), 0);
        assert_eq!(coerce_reviews(""), 0);
        assert_eq!(coerce_reviews("-3"), 0);
        assert_eq!(coerce_reviews("12.9"), 12);
        assert_eq!(coerce_reviews("+7 reviews"), 7);

        assert_eq!(coerce_price(""), 0.0);
        assert_eq!(coerce_price("free"), 0.0);
        assert_eq!(coerce_price("-20"), 0.0);
        assert_eq!(coerce_price("299.50 INR"), 299.5);
        assert_eq!(coerce_price(".5"), 0.5);
        assert_eq!(coerce_price("1e3"), 1000.0);
        assert_eq!(coerce_price("7e"), 7.0);

        assert_eq!(coerce_rating("4.5"), 4.5);
        assert_eq!(coerce_rating("9"), 5.0);
        assert_eq!(coerce_rating("n/a"), 0.0);
    }
}
