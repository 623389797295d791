//! The stadium catalogue: which titles the guide knows about.

use crate::config::StadiumsConfig;

/// Ordered list of Wikipedia titles shown by the guide.
#[derive(Debug, Clone)]
pub struct Catalogue {
    titles: Vec<String>,
}

impl Catalogue {
    pub fn new(titles: Vec<String>) -> Self {
        Self { titles }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Titles containing `query`, ignoring case. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query_lower = query.trim().to_lowercase();
        self.titles
            .iter()
            .filter(|title| title.to_lowercase().contains(&query_lower))
            .map(String::as_str)
            .collect()
    }
}

impl From<&StadiumsConfig> for Catalogue {
    fn from(config: &StadiumsConfig) -> Self {
        Self::new(config.titles.clone())
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::from(&StadiumsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogue_lists_london_grounds() {
        let catalogue = Catalogue::default();
        assert_eq!(
            catalogue.titles(),
            [
                "Emirates Stadium",
                "Tottenham Hotspur Stadium",
                "Wembley Stadium",
                "Stamford Bridge",
            ]
        );
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let catalogue = Catalogue::default();
        assert_eq!(
            catalogue.search("STADIUM"),
            vec!["Emirates Stadium", "Tottenham Hotspur Stadium", "Wembley Stadium"]
        );
        assert_eq!(catalogue.search("  bridge "), vec!["Stamford Bridge"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let catalogue = Catalogue::default();
        assert_eq!(catalogue.search("").len(), 4);
        assert_eq!(catalogue.search("   ").len(), 4);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(Catalogue::default().search("Anfield").is_empty());
    }
}
