use scraper::{ElementRef, Html, Selector};

/// Main-content landmark candidates, in priority order
pub const MAIN_CONTENT: &[&str] = &["main", "article", "[role='main']"];

/// Navigation / sidebar landmark candidates, in priority order
pub const SIDEBAR: &[&str] = &["nav", "aside", "[role='navigation']"];

/// Search input candidates, in priority order
pub const SEARCH_INPUT: &[&str] = &[
    "input[type='search']",
    "input[placeholder*='Find']",
    "input[placeholder*='Search']",
];

/// Links inside the navigation regions
pub const NAV_LINKS: &str = "nav a, aside a";

/// Ordered list of alternative CSS selectors; the first one that matches wins
#[derive(Debug, Clone)]
pub struct SelectorChain {
    patterns: Vec<(&'static str, Selector)>,
}

impl SelectorChain {
    /// Build a chain from CSS patterns.
    ///
    /// Panics on an invalid pattern; chains are built from the constants above.
    pub fn new(patterns: &[&'static str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| (*p, Selector::parse(p).expect("landmark selector is valid")))
            .collect();
        Self { patterns }
    }

    /// First element matching the earliest pattern that has any match,
    /// along with that pattern
    pub fn first_match<'a>(&self, doc: &'a Html) -> Option<(&'static str, ElementRef<'a>)> {
        self.patterns
            .iter()
            .find_map(|(pattern, selector)| doc.select(selector).next().map(|el| (*pattern, el)))
    }
}

/// Landmarks and accessibility signals read from one DOM snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Pattern that located the main content region, if any
    pub main_content: Option<&'static str>,

    /// Pattern that located the sidebar, if any
    pub sidebar: Option<&'static str>,

    /// Whitespace-normalised text of the first `h1`
    pub h1: Option<String>,

    /// Number of `a` elements
    pub link_count: usize,

    /// Number of `img` elements
    pub image_count: usize,

    /// Images whose `alt` is absent or empty
    pub images_without_alt: usize,

    /// Links inside `nav` / `aside`
    pub nav_link_count: usize,
}

impl PageSnapshot {
    /// Parse serialised page HTML and collect landmark signals
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);

        let main_content = SelectorChain::new(MAIN_CONTENT)
            .first_match(&doc)
            .map(|(pattern, _)| pattern);
        let sidebar = SelectorChain::new(SIDEBAR)
            .first_match(&doc)
            .map(|(pattern, _)| pattern);

        let h1_selector = Selector::parse("h1").unwrap();
        let h1 = doc.select(&h1_selector).next().map(|el| {
            el.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        });

        let link_selector = Selector::parse("a").unwrap();
        let link_count = doc.select(&link_selector).count();

        let img_selector = Selector::parse("img").unwrap();
        let (image_count, images_without_alt) =
            doc.select(&img_selector)
                .fold((0, 0), |(total, missing), img| match img.value().attr("alt") {
                    Some(alt) if !alt.is_empty() => (total + 1, missing),
                    _ => (total + 1, missing + 1),
                });

        let nav_link_selector = Selector::parse(NAV_LINKS).unwrap();
        let nav_link_count = doc.select(&nav_link_selector).count();

        ::log::debug!(
            "Snapshot: main={:?} sidebar={:?} links={} images={} (without alt: {})",
            main_content,
            sidebar,
            link_count,
            image_count,
            images_without_alt
        );

        Self {
            main_content,
            sidebar,
            h1,
            link_count,
            image_count,
            images_without_alt,
            nav_link_count,
        }
    }
}
