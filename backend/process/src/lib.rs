//! # Prerender
//!
//! Static build of the storefront regions.
//!
//! ## Output
//! - `<out>/<region>.html` for `home`, `main`, `overflow`, `featured` and `related`
//! - `<out>/products.json` with the loaded catalog and where it came from
//!
//! Each region file is the container element with its cards inside. Overflow
//! sits inside its wrapper, shown only when the catalog has more than six products.
//!
//! ```sh
//! prerender products.csv --out-dir dist --seed 42
//! ```
use std::{fs, path::Path};

use anyhow::Context;
use catalog::{
    Catalog, CatalogSource, HtmlPage, Origin, Region, RngSource, load_catalog, render_catalog,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

pub struct Summary {
    pub origin: Origin,
    pub products: usize,
    pub regions: Vec<(Region, usize)>,
}

impl Summary {
    pub fn print(&self) {
        match self.origin {
            Origin::Source => println!("Loaded Products: {}", self.products),
            Origin::Fallback => println!("Source unusable, rendered defaults: {}", self.products),
        }

        for (region, count) in &self.regions {
            println!("{region}: {count}");
        }
    }
}

pub async fn prerender(
    source: &CatalogSource,
    out_dir: &Path,
    seed: Option<u64>,
) -> anyhow::Result<Summary> {
    let catalog = load_catalog(source).await;

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut page = HtmlPage::full();
    render_catalog(&catalog.products, &mut page, &mut RngSource(rng));

    write_output(&catalog, &page, out_dir)?;

    Ok(Summary {
        origin: catalog.origin,
        products: catalog.products.len(),
        regions: page
            .regions()
            .map(|region| (region, page.fragments(region).len()))
            .collect(),
    })
}

fn write_output(catalog: &Catalog, page: &HtmlPage, out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for region in page.regions() {
        let path = out_dir.join(format!("{region}.html"));
        fs::write(&path, region_document(page, region))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote {}", path.display());
    }

    let path = out_dir.join("products.json");
    fs::write(&path, serde_json::to_string_pretty(catalog)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

fn region_document(page: &HtmlPage, region: Region) -> String {
    let inner = page.region_html(region).unwrap_or_default();
    let container = format!("<div id=\"{}\">\n{inner}\n</div>\n", region.element_id());

    match region.wrapper_id() {
        Some(wrapper) => {
            let display = if page.is_visible(region) { "block" } else { "none" };
            format!("<div id=\"{wrapper}\" style=\"display: {display}\">\n{container}</div>\n")
        }
        None => container,
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Write};

    use catalog::{CatalogSource, Origin, Region};
    use tempfile::NamedTempFile;

    use super::prerender;

    fn sheet(rows: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,price,rating,featured").unwrap();
        for i in 0..rows {
            writeln!(file, "Item {i},{},4.5,", 100 + i).unwrap();
        }
        file
    }

    fn count(rendered: &[(Region, usize)], region: Region) -> usize {
        rendered
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, n)| *n)
            .unwrap()
    }

    #[tokio::test]
    async fn test_writes_every_region() {
        let file = sheet(8);
        let out = tempfile::tempdir().unwrap();
        let source = CatalogSource::Path(file.path().to_path_buf());

        let summary = prerender(&source, out.path(), Some(42)).await.unwrap();

        assert_eq!(summary.origin, Origin::Source);
        assert_eq!(summary.products, 8);
        assert_eq!(count(&summary.regions, Region::HomeGrid), 4);
        assert_eq!(count(&summary.regions, Region::MainGrid), 6);
        assert_eq!(count(&summary.regions, Region::Overflow), 2);
        assert_eq!(count(&summary.regions, Region::Featured), 1);
        assert_eq!(count(&summary.regions, Region::Related), 4);

        for region in Region::ALL {
            assert!(out.path().join(format!("{region}.html")).exists());
        }

        let overflow = fs::read_to_string(out.path().join("overflow.html")).unwrap();
        assert!(overflow.starts_with("<div id=\"productsScrollableWrapper\" style=\"display: block\">"));
        assert!(overflow.contains("Item 7"));

        let json = fs::read_to_string(out.path().join("products.json")).unwrap();
        assert!(json.contains("\"origin\": \"source\""));
    }

    #[tokio::test]
    async fn test_seed_is_reproducible() {
        let file = sheet(10);
        let source = CatalogSource::Path(file.path().to_path_buf());
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        prerender(&source, first.path(), Some(7)).await.unwrap();
        prerender(&source, second.path(), Some(7)).await.unwrap();

        assert_eq!(
            fs::read_to_string(first.path().join("related.html")).unwrap(),
            fs::read_to_string(second.path().join("related.html")).unwrap()
        );
    }

    #[tokio::test]
    async fn test_fallback_hides_overflow() {
        let out = tempfile::tempdir().unwrap();
        let source = CatalogSource::Path(out.path().join("missing.csv"));

        let summary = prerender(&source, out.path(), None).await.unwrap();

        assert_eq!(summary.origin, Origin::Fallback);
        assert_eq!(summary.products, 6);

        let overflow = fs::read_to_string(out.path().join("overflow.html")).unwrap();
        assert!(overflow.contains("style=\"display: none\""));
    }
}
