use std::fmt::{self, Display, Write};

use crate::products::{MAX_RATING, ProductRecord};

pub const CARD_PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/400x400/FFE5EC/FF8BA7?text=Product+Image";
pub const SPOTLIGHT_IMAGE: &str = "assets/placeholder-product.jpg";
pub const SPOTLIGHT_PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/400x400/FF8BA7/FFFFFF?text=Featured+Product";
pub const FALLBACK_LINK: &str = "https://www.amazon.in/s?k=party+supplies";

const FULL_STAR: char = '★';
const HALF_STAR: char = '⯨';
const EMPTY_STAR: char = '☆';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarRating {
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, MAX_RATING)
        };

        let whole = rating.floor();
        let full = whole as u8;
        let half = u8::from(rating - whole >= 0.5);

        Self {
            full,
            half,
            empty: MAX_RATING as u8 - full - half,
        }
    }
}

impl Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.full {
            f.write_char(FULL_STAR)?;
        }
        if self.half == 1 {
            f.write_char(HALF_STAR)?;
        }
        for _ in 0..self.empty {
            f.write_char(EMPTY_STAR)?;
        }

        Ok(())
    }
}

/// Rupee amount with Indian digit grouping and no paise, e.g. `₹1,23,456`.
pub fn format_inr(price: f64) -> String {
    let price = if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    };
    let digits = format!("{:.0}", price.round());

    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("₹{},{tail}", groups.join(","))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub stars: StarRating,
    pub reviews: u32,
    pub description: String,
    pub price: String,
    pub image: String,
    pub link: String,
}

impl ProductCard {
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            stars: StarRating::from_rating(record.rating),
            reviews: record.reviews,
            description: record.description.clone(),
            price: format_inr(record.price),
            image: record
                .image
                .clone()
                .unwrap_or_else(|| CARD_PLACEHOLDER_IMAGE.to_string()),
            link: link_or_fallback(record),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="product-card">
    <img src="{image}" alt="{name}" class="product-image" onerror="this.src='{placeholder}'">
    <div class="product-info">
        <h3 class="product-title">{name}</h3>
        <div class="product-rating">{stars} ({reviews})</div>
        <p class="product-description">{description}</p>
        <div class="product-price">
            <span class="current-price">{price}</span>
        </div>
        <a href="{link}" target="_blank" class="product-button">Shop on Amazon</a>
    </div>
</div>"#,
            image = escape_html(&self.image),
            name = escape_html(&self.name),
            placeholder = CARD_PLACEHOLDER_IMAGE,
            stars = self.stars,
            reviews = self.reviews,
            description = escape_html(&self.description),
            price = self.price,
            link = escape_html(&self.link),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightPanel {
    pub name: String,
    pub stars: StarRating,
    pub reviews: u32,
    pub description: String,
    pub price: String,
    pub image: String,
    pub link: String,
}

impl SpotlightPanel {
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            stars: StarRating::from_rating(record.rating),
            reviews: record.reviews,
            description: record.description.clone(),
            price: format_inr(record.price),
            image: record
                .image
                .clone()
                .unwrap_or_else(|| SPOTLIGHT_IMAGE.to_string()),
            link: link_or_fallback(record),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="featured-product-image">
    <img src="{image}" alt="{name}" onerror="this.src='{placeholder}'">
</div>
<div class="featured-product-details">
    <h3>{name}</h3>
    <div class="featured-rating">{stars} ({reviews} reviews)</div>
    <p>{description}</p>
    <div class="featured-price">{price}</div>
    <a href="{link}" target="_blank" class="btn btn-primary">Shop Now on Amazon</a>
</div>"#,
            image = escape_html(&self.image),
            name = escape_html(&self.name),
            placeholder = SPOTLIGHT_PLACEHOLDER_IMAGE,
            stars = self.stars,
            reviews = self.reviews,
            description = escape_html(&self.description),
            price = self.price,
            link = escape_html(&self.link),
        )
    }
}

fn link_or_fallback(record: &ProductRecord) -> String {
    record
        .amazon_link
        .clone()
        .unwrap_or_else(|| FALLBACK_LINK.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Card(ProductCard),
    Spotlight(SpotlightPanel),
}

impl Fragment {
    pub fn name(&self) -> &str {
        match self {
            Self::Card(card) => &card.name,
            Self::Spotlight(panel) => &panel.name,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Card(card) => card.to_html(),
            Self::Spotlight(panel) => panel.to_html(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CARD_PLACEHOLDER_IMAGE, FALLBACK_LINK, ProductCard, SPOTLIGHT_IMAGE, SpotlightPanel,
        StarRating, escape_html, format_inr,
    };
    use crate::products::ProductRecord;

    fn stars(rating: f64) -> (u8, u8, u8) {
        let stars = StarRating::from_rating(rating);
        (stars.full, stars.half, stars.empty)
    }

    #[test]
    fn test_star_counts() {
        assert_eq!(stars(3.7), (3, 1, 1));
        assert_eq!(stars(0.0), (0, 0, 5));
        assert_eq!(stars(3.4), (3, 0, 2));
        assert_eq!(stars(4.5), (4, 1, 0));
        assert_eq!(stars(5.0), (5, 0, 0));
        assert_eq!(stars(7.0), (5, 0, 0));
        assert_eq!(stars(-1.0), (0, 0, 5));
        assert_eq!(stars(f64::NAN), (0, 0, 5));
    }

    #[test]
    fn test_star_glyphs() {
        assert_eq!(StarRating::from_rating(3.7).to_string(), "★★★⯨☆");
        assert_eq!(StarRating::from_rating(0.0).to_string(), "☆☆☆☆☆");

        for tenth in 0..=50 {
            let glyphs = StarRating::from_rating(f64::from(tenth) / 10.0).to_string();
            assert_eq!(glyphs.chars().count(), 5);
        }
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(299.0), "₹299");
        assert_eq!(format_inr(299.5), "₹300");
        assert_eq!(format_inr(1234.0), "₹1,234");
        assert_eq!(format_inr(123456.0), "₹1,23,456");
        assert_eq!(format_inr(12345678.0), "₹1,23,45,678");
        assert_eq!(format_inr(f64::NAN), "₹0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_card_defaults() {
        let card = ProductCard::from_record(&ProductRecord {
            name: "Bare".to_string(),
            ..Default::default()
        });

        assert_eq!(card.image, CARD_PLACEHOLDER_IMAGE);
        assert_eq!(card.link, FALLBACK_LINK);
        assert_eq!(card.price, "₹0");
        assert!(card.to_html().contains("☆☆☆☆☆ (0)"));
    }

    #[test]
    fn test_spotlight_html() {
        let panel = SpotlightPanel::from_record(&ProductRecord {
            name: "Kit <3".to_string(),
            price: 235.0,
            rating: 3.7,
            reviews: 100,
            ..Default::default()
        });
        let html = panel.to_html();

        assert_eq!(panel.image, SPOTLIGHT_IMAGE);
        assert!(html.contains("<h3>Kit &lt;3</h3>"));
        assert!(html.contains("★★★⯨☆ (100 reviews)"));
        assert!(html.contains("₹235"));
    }
}
