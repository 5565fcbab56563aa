use crate::app::AppContext;
use crate::models::Property;

/// Free-text search box of the hero section
pub struct SearchBar {
    ctx: AppContext,
}

impl SearchBar {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Listings whose title, address or type contain every word of `query`,
    /// ignoring case. An empty query only produces a warning.
    pub fn submit(&self, query: &str, listings: &[Property]) -> Option<Vec<Property>> {
        let query = query.trim();
        if query.is_empty() {
            self.ctx.notifier.warning("Please enter a search term");
            return None;
        }
        self.ctx.notifier.info(format!("Searching for \"{query}\"..."));

        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let hits = listings
            .iter()
            .filter(|p| {
                let haystack =
                    format!("{} {} {}", p.title, p.address, p.property_type).to_lowercase();
                words.iter().all(|w| haystack.contains(w.as_str()))
            })
            .cloned()
            .collect();
        Some(hits)
    }
}
