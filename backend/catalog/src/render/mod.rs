//! # Rendering
//!
//! Projects a [`ProductCollection`] into page regions through a [`ViewSink`].
//!
//! Every operation clears its region before writing, skips regions the sink
//! does not have, and never fails. Missing fields render as their defaults.
use tracing::debug;

use crate::products::{ProductCollection, ProductRecord};

pub mod fragments;
pub mod random;
pub mod sink;

pub use fragments::{Fragment, ProductCard, SpotlightPanel, StarRating, format_inr};
pub use random::{FixedPermutation, RandomSource, RngSource};
pub use sink::{HtmlPage, Region, UnknownRegion, ViewSink};

pub const RELATED_LEN: usize = 4;

/// Single render pass over every region.
pub fn render_catalog<S, R>(products: &ProductCollection, sink: &mut S, random: &mut R)
where
    S: ViewSink + ?Sized,
    R: RandomSource + ?Sized,
{
    debug!("Rendering {} products", products.len());

    render_home(products, sink);
    render_main_grid(products, sink);
    render_featured(products, sink);
    render_related(products, sink, random);
}

pub fn render_home<S: ViewSink + ?Sized>(products: &ProductCollection, sink: &mut S) {
    if !sink.has_region(Region::HomeGrid) {
        return;
    }

    let shown = fill_cards(sink, Region::HomeGrid, products.home_preview());
    debug!("Home grid: {shown} products");
}

/// Main grid takes the first six, the overflow region the rest.
pub fn render_main_grid<S: ViewSink + ?Sized>(products: &ProductCollection, sink: &mut S) {
    if !sink.has_region(Region::MainGrid) {
        return;
    }

    let shown = fill_cards(sink, Region::MainGrid, products.main_grid());
    debug!("Main grid: {shown} products");

    if !sink.has_region(Region::Overflow) {
        return;
    }

    let overflow = products.overflow();
    fill_cards(sink, Region::Overflow, overflow);
    sink.set_visible(Region::Overflow, !overflow.is_empty());

    if !overflow.is_empty() {
        debug!("Overflow: {} products", overflow.len());
    }
}

pub fn render_featured<S: ViewSink + ?Sized>(products: &ProductCollection, sink: &mut S) {
    if !sink.has_region(Region::Featured) {
        return;
    }

    sink.clear(Region::Featured);

    let Some(spotlight) = products.spotlight() else {
        debug!("No featured product found");
        return;
    };

    debug!("Featured product: {}", spotlight.name);
    sink.append(
        Region::Featured,
        Fragment::Spotlight(SpotlightPanel::from_record(spotlight)),
    );
}

pub fn render_related<S, R>(products: &ProductCollection, sink: &mut S, random: &mut R)
where
    S: ViewSink + ?Sized,
    R: RandomSource + ?Sized,
{
    if !sink.has_region(Region::Related) {
        return;
    }

    let selected = select_related(products, random);

    sink.clear(Region::Related);
    for record in &selected {
        sink.append(Region::Related, Fragment::Card(ProductCard::from_record(record)));
    }

    debug!("Related: {} products", selected.len());
}

/// Up to [`RELATED_LEN`] records from the related pool, in shuffled order.
pub fn select_related<'a, R>(products: &'a ProductCollection, random: &mut R) -> Vec<&'a ProductRecord>
where
    R: RandomSource + ?Sized,
{
    let pool = products.related_pool();

    let mut order: Vec<usize> = (0..pool.len()).collect();
    random.shuffle(&mut order);

    order
        .into_iter()
        .take(RELATED_LEN)
        .filter_map(|index| pool.get(index).copied())
        .collect()
}

fn fill_cards<S: ViewSink + ?Sized>(sink: &mut S, region: Region, records: &[ProductRecord]) -> usize {
    sink.clear(region);

    for record in records {
        sink.append(region, Fragment::Card(ProductCard::from_record(record)));
    }

    records.len()
}
