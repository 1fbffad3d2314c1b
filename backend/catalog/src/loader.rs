use std::{fmt::Display, path::PathBuf, str::FromStr};

use reqwest::get;
use serde::Serialize;
use tokio::fs::read_to_string;
use tracing::{info, warn};

use crate::{csv::parse_catalog, error::CatalogError, products::ProductCollection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl FromStr for CatalogSource {
    type Err = std::convert::Infallible;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let source = source.trim();

        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(Self::Url(source.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(source)))
        }
    }
}

impl Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Source,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub origin: Origin,
    pub products: ProductCollection,
}

/// Loads the catalog once, substituting the built-in products on any failure.
///
/// The result is never empty.
pub async fn load_catalog(source: &CatalogSource) -> Catalog {
    match fetch_catalog(source).await {
        Ok(products) if !products.is_empty() => {
            info!("Loaded {} products from {source}", products.len());

            Catalog {
                origin: Origin::Source,
                products,
            }
        }
        Ok(_) => {
            warn!("{source} held no products, loading defaults");
            fallback()
        }
        Err(e) => {
            warn!("Failed to load products from {source}: {e}, loading defaults");
            fallback()
        }
    }
}

pub async fn fetch_catalog(source: &CatalogSource) -> Result<ProductCollection, CatalogError> {
    let text = fetch_text(source).await?;

    parse_catalog(&text)
}

async fn fetch_text(source: &CatalogSource) -> Result<String, CatalogError> {
    match source {
        CatalogSource::Path(path) => Ok(read_to_string(path).await?),
        CatalogSource::Url(url) => {
            let response = get(url).await?;

            if !response.status().is_success() {
                return Err(CatalogError::Status(response.status()));
            }

            Ok(response.text().await?)
        }
    }
}

fn fallback() -> Catalog {
    Catalog {
        origin: Origin::Fallback,
        products: ProductCollection::fallback(),
    }
}
