//! Free-text narrowing of a transaction listing.

/// A search over the title, description and price of transactions.
///
/// A transaction matches if its title or description contains the term
/// (ignoring case), or if the term is a number equal to its price.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    price: Option<f64>,
}

impl SearchTerm {
    /// Create a search from the raw `search` query parameter.
    ///
    /// Returns `None` for a missing or blank term, in which case the listing
    /// is not narrowed at all. Otherwise the term is matched as given,
    /// including any surrounding whitespace.
    pub fn new(search: Option<&str>) -> Option<Self> {
        let search = search?;

        if search.trim().is_empty() {
            return None;
        }

        let price = search
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Some(Self {
            text: search.to_lowercase(),
            price,
        })
    }

    /// The lowercased text to look for in titles and descriptions.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The price to match exactly, only set when the term is numeric.
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Whether a transaction with the given fields matches this search.
    pub fn matches(&self, title: &str, description: &str, price: f64) -> bool {
        title.to_lowercase().contains(&self.text)
            || description.to_lowercase().contains(&self.text)
            || self.price == Some(price)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchTerm;

    #[test]
    fn blank_search_is_absent() {
        assert_eq!(SearchTerm::new(None), None);
        assert_eq!(SearchTerm::new(Some("")), None);
        assert_eq!(SearchTerm::new(Some("   ")), None);
    }

    #[test]
    fn matches_title_and_description_ignoring_case() {
        let search = SearchTerm::new(Some("JACKET")).unwrap();

        assert!(search.matches("Men's Jacket", "", 10.0));
        assert!(search.matches("Coat", "a warm jacket for winter", 10.0));
        assert!(!search.matches("Coat", "a warm coat", 10.0));
    }

    #[test]
    fn numeric_search_matches_exact_price() {
        let search = SearchTerm::new(Some("329.85")).unwrap();

        assert_eq!(search.price(), Some(329.85));
        assert!(search.matches("Coat", "warm", 329.85));
        assert!(!search.matches("Coat", "warm", 329.0));
    }

    #[test]
    fn numeric_search_also_matches_text() {
        let search = SearchTerm::new(Some("64")).unwrap();

        assert!(search.matches("64GB USB drive", "", 9.99));
    }

    #[test]
    fn alphabetic_search_never_matches_price() {
        let search = SearchTerm::new(Some("abc")).unwrap();

        assert_eq!(search.price(), None);
        assert!(!search.matches("", "", 0.0));
    }

    #[test]
    fn non_finite_numbers_are_not_prices() {
        for term in ["inf", "NaN", "infinity"] {
            let search = SearchTerm::new(Some(term)).unwrap();

            assert_eq!(search.price(), None, "{term} should not be a price");
        }
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_term() {
        let search = SearchTerm::new(Some(" lamp")).unwrap();

        assert_eq!(search.text(), " lamp");
        assert!(search.matches("Desk Lamp", "", 1.0));
        assert!(!search.matches("Lampshade", "", 1.0));
        assert!(!search.matches("Desklamp", "", 1.0));
    }

    #[test]
    fn padded_number_is_still_a_price() {
        let search = SearchTerm::new(Some(" 150 ")).unwrap();

        assert_eq!(search.price(), Some(150.0));
    }

    #[test]
    fn matches_non_ascii_text_ignoring_case() {
        let search = SearchTerm::new(Some("ÉCLAIR")).unwrap();

        assert!(search.matches("Éclair box", "", 1.0));
        assert!(search.matches("Petit", "Six ÉCLAIRS au chocolat", 1.0));
    }

    #[test]
    fn search_is_literal_text() {
        let search = SearchTerm::new(Some("a.c")).unwrap();

        assert!(search.matches("a.c", "", 1.0));
        assert!(!search.matches("abc", "", 1.0));
    }
}
