//! # Catalog
//!
//! Product list behind the storefront pages.
//!
//! ## Flow
//! 1. [`load_catalog`] reads the CSV sheet from a path or URL, once per start
//! 2. Any failure (unreachable source, bad status, fewer than 2 lines) swaps in the six built-in products
//! 3. [`render_catalog`] writes every page region into a [`ViewSink`]
//!
//! ## Sheet
//! ```text
//! name,category,description,price,rating,reviews,image,amazon_link,featured
//! Banner Kit,Banners,"Gold, silver and white",235,3.7,100,kit.jpg,https://www.amazon.in/dp/X,yes
//! ```
//! Column order is free, names must match for `price`, `rating` and `reviews` to be read as numbers.
pub mod csv;
pub mod error;
pub mod loader;
pub mod products;
pub mod render;

pub use csv::parse_catalog;
pub use error::CatalogError;
pub use loader::{Catalog, CatalogSource, Origin, fetch_catalog, load_catalog};
pub use products::{ProductCollection, ProductRecord};
pub use render::{
    FixedPermutation, Fragment, HtmlPage, RandomSource, Region, RngSource, ViewSink,
    render_catalog,
};
