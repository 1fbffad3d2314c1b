//! # Products
//!
//! One [`ProductRecord`] per CSV row, collected into an ordered
//! [`ProductCollection`] that is built once and only read afterwards.
//!
//! ## Page views
//!
//! | View | Records |
//! |---|---|
//! | Home preview | first 4 |
//! | Main grid | first 6 |
//! | Overflow | everything after the first 6 |
//! | Spotlight | first `featured = yes`, else the first record |
//! | Related pool | everything except the `featured = yes` record |
use std::collections::BTreeMap;

use serde::Serialize;

pub const HOME_PREVIEW_LEN: usize = 4;
pub const MAIN_GRID_LEN: usize = 6;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    pub reviews: u32,
    pub image: Option<String>,
    pub amazon_link: Option<String>,
    pub featured: String,
    /// Columns outside the recognised set, kept verbatim.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ProductRecord {
    pub fn is_featured(&self) -> bool {
        self.featured.trim().eq_ignore_ascii_case("yes")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductCollection {
    records: Vec<ProductRecord>,
}

impl ProductCollection {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn home_preview(&self) -> &[ProductRecord] {
        self.head(HOME_PREVIEW_LEN)
    }

    pub fn main_grid(&self) -> &[ProductRecord] {
        self.head(MAIN_GRID_LEN)
    }

    pub fn overflow(&self) -> &[ProductRecord] {
        self.records.get(MAIN_GRID_LEN..).unwrap_or_default()
    }

    /// First record flagged `featured = yes`. Later flagged records are ordinary.
    pub fn featured(&self) -> Option<&ProductRecord> {
        self.records.iter().find(|record| record.is_featured())
    }

    pub fn spotlight(&self) -> Option<&ProductRecord> {
        self.featured().or_else(|| self.records.first())
    }

    /// Candidates for the related panel, in collection order.
    ///
    /// Only the chosen featured record is excluded, compared by position so
    /// identical duplicates of it stay eligible.
    pub fn related_pool(&self) -> Vec<&ProductRecord> {
        let featured_index = self.records.iter().position(|record| record.is_featured());

        self.records
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != featured_index)
            .map(|(_, record)| record)
            .collect()
    }

    fn head(&self, len: usize) -> &[ProductRecord] {
        &self.records[..len.min(self.records.len())]
    }

    /// Built-in catalog used whenever the CSV source cannot be loaded.
    pub fn fallback() -> Self {
        let records = FALLBACK_PRODUCTS
            .iter()
            .map(|product| ProductRecord {
                name: product.name.to_string(),
                category: product.category.to_string(),
                description: product.description.to_string(),
                price: product.price,
                rating: product.rating,
                reviews: product.reviews,
                image: Some(product.image.to_string()),
                amazon_link: Some(product.amazon_link.to_string()),
                featured: product.featured.to_string(),
                extra: BTreeMap::new(),
            })
            .collect();

        Self::new(records)
    }
}

impl FromIterator<ProductRecord> for ProductCollection {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

struct FallbackProduct {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    price: f64,
    rating: f64,
    reviews: u32,
    image: &'static str,
    amazon_link: &'static str,
    featured: &'static str,
}

const FALLBACK_PRODUCTS: [FallbackProduct; 6] = [
    FallbackProduct {
        name: "Happy Birthday Decoration Set",
        category: "Combos",
        description: "20 Golden Confetti Balloons, Hello 30 Cake Topper,Banner, 8 Star Cupcake Toppers – 30th Birthday Decor for Women, Girls",
        price: 299.0,
        rating: 4.8,
        reviews: 17,
        image: "https://m.media-amazon.com/images/I/81hrc+qh4BL._SL1500_.jpg",
        amazon_link: "https://www.amazon.in/dp/B0FD35LM2T?th=1",
        featured: "",
    },
    FallbackProduct {
        name: "Birthday Decoration Kit for Boys",
        category: "Banners",
        description: "Royal Blue, Silver & Gold Balloons with Happy Birthday Banner, Star Foil Balloons & Foil Fringe Backdrop (41 Pcs Combo Set)",
        price: 235.0,
        rating: 3.7,
        reviews: 100,
        image: "https://m.media-amazon.com/images/I/71SmQeuiCSL._SL1024_.jpg",
        amazon_link: "https://www.amazon.in/gp/product/B0FBRLHYL7?th=1",
        featured: "yes",
    },
    FallbackProduct {
        name: "Party Decoration Kit",
        category: "Cake Toppers",
        description: "66 Pcs | Blue, Silver & White Balloon Garland Arch with Banner, Net Curtains, Hooks & Tapes | Birthday Decoration Kit for Boys, Girls, Kids & Adults",
        price: 299.0,
        rating: 3.5,
        reviews: 5,
        image: "https://m.media-amazon.com/images/I/81KyUHh3YvL._SL1500_.jpg",
        amazon_link: "https://www.amazon.in/gp/product/B0FQDMJXXK?th=1",
        featured: "",
    },
    FallbackProduct {
        name: "Small Jungle Theme Animal Face Foil Balloons",
        category: "Props",
        description: "Pack of 6 | Jungle Theme Party Supplies & Backdrop Decorations | Small Size",
        price: 179.0,
        rating: 3.7,
        reviews: 100,
        image: "https://m.media-amazon.com/images/I/915vGH4oc3L._SL1500_.jpg",
        amazon_link: "https://www.amazon.in/dp/B0FB37N2HP?th=1",
        featured: "",
    },
    FallbackProduct {
        name: "Happy birthday decoration Items",
        category: "Cupcake Toppers",
        description: "35Pcs Kit | Birthday Backdrop For Decoration | Birthday Balloons For Decoration | Rainbow Theme",
        price: 330.0,
        rating: 3.7,
        reviews: 100,
        image: "https://m.media-amazon.com/images/I/91xef2MalsL._SL1500_.jpg",
        amazon_link: "https://www.amazon.in/dp/B0FBK23QH2?th=1",
        featured: "",
    },
    FallbackProduct {
        name: "Official Teenager Birthday Decoration Kit ",
        category: "Seasonal",
        description: "Gold & White Balloon Garland, Banner, Cake & Cupcake Toppers – 13th Birthday Party Supplies for Boys & Girls (30 Pcs)",
        price: 329.0,
        rating: 1.8,
        reviews: 4,
        image: "https://m.media-amazon.com/images/I/81B1i8sJLsL._SL1500_.jpg",
        amazon_link: "https://www.amazon.in/dp/B0FDCGYCMK?th=1",
        featured: "",
    },
];

#[cfg(test)]
pub(crate) fn named(names: &[&str]) -> ProductCollection {
    names
        .iter()
        .map(|name| ProductRecord {
            name: name.to_string(),
            ..Default::default()
        })
        .collect()
}
