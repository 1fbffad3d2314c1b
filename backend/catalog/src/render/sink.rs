use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use thiserror::Error;

use super::fragments::Fragment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    HomeGrid,
    MainGrid,
    Overflow,
    Featured,
    Related,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::HomeGrid,
        Region::MainGrid,
        Region::Overflow,
        Region::Featured,
        Region::Related,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Region::HomeGrid => "homeProductsGrid",
            Region::MainGrid => "productsGridMain",
            Region::Overflow => "productsScrollable",
            Region::Featured => "featuredProduct",
            Region::Related => "youMayLikeGrid",
        }
    }

    /// Element whose display toggles with the region, when it differs from the region itself.
    pub fn wrapper_id(self) -> Option<&'static str> {
        match self {
            Region::Overflow => Some("productsScrollableWrapper"),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Region::HomeGrid => "home",
            Region::MainGrid => "main",
            Region::Overflow => "overflow",
            Region::Featured => "featured",
            Region::Related => "related",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(slug: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.slug() == slug || region.element_id() == slug)
            .ok_or_else(|| UnknownRegion(slug.to_string()))
    }
}

/// Display target the renderer writes into.
///
/// Regions the sink does not have are skipped by every render operation.
pub trait ViewSink {
    fn has_region(&self, region: Region) -> bool;

    fn clear(&mut self, region: Region);

    fn append(&mut self, region: Region, fragment: Fragment);

    fn set_visible(&mut self, region: Region, visible: bool);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionContent {
    pub fragments: Vec<Fragment>,
    pub visible: bool,
}

/// In-memory page holding rendered fragments per region.
#[derive(Debug, Clone, Default)]
pub struct HtmlPage {
    regions: BTreeMap<Region, RegionContent>,
}

impl HtmlPage {
    /// Overflow starts hidden, every other region visible.
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        let regions = regions
            .into_iter()
            .map(|region| {
                let content = RegionContent {
                    fragments: Vec::new(),
                    visible: region != Region::Overflow,
                };
                (region, content)
            })
            .collect();

        Self { regions }
    }

    pub fn full() -> Self {
        Self::new(Region::ALL)
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions.keys().copied()
    }

    pub fn fragments(&self, region: Region) -> &[Fragment] {
        self.regions
            .get(&region)
            .map(|content| content.fragments.as_slice())
            .unwrap_or_default()
    }

    pub fn names(&self, region: Region) -> Vec<&str> {
        self.fragments(region).iter().map(Fragment::name).collect()
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.regions
            .get(&region)
            .is_some_and(|content| content.visible)
    }

    pub fn region_html(&self, region: Region) -> Option<String> {
        let content = self.regions.get(&region)?;

        Some(
            content
                .fragments
                .iter()
                .map(Fragment::to_html)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

impl ViewSink for HtmlPage {
    fn has_region(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    fn clear(&mut self, region: Region) {
        if let Some(content) = self.regions.get_mut(&region) {
            content.fragments.clear();
        }
    }

    fn append(&mut self, region: Region, fragment: Fragment) {
        if let Some(content) = self.regions.get_mut(&region) {
            content.fragments.push(fragment);
        }
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if let Some(content) = self.regions.get_mut(&region) {
            content.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HtmlPage, Region};

    #[test]
    fn test_region_lookup() {
        assert_eq!("home".parse::<Region>().unwrap(), Region::HomeGrid);
        assert_eq!("youMayLikeGrid".parse::<Region>().unwrap(), Region::Related);
        assert!("footer".parse::<Region>().is_err());

        for region in Region::ALL {
            assert_eq!(region.slug().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn test_page_defaults() {
        let page = HtmlPage::new([Region::MainGrid, Region::Overflow]);

        assert!(page.is_visible(Region::MainGrid));
        assert!(!page.is_visible(Region::Overflow));
        assert!(!page.is_visible(Region::Featured));
        assert_eq!(page.region_html(Region::MainGrid).as_deref(), Some(""));
        assert_eq!(page.region_html(Region::Featured), None);
    }
}
