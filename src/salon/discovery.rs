//! Salon Discovery
//!
//! Customer-facing salon list: verified salons only, narrowed by a free-text
//! search over name and area and by category, then sorted by the selected
//! criterion.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::salon::types::{Salon, SalonType};

/// Category chip on the discovery screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(SalonType),
}

impl CategoryFilter {
    /// Check whether a salon passes this filter
    pub fn matches(&self, salon: &Salon) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(t) => salon.salon_type == *t,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<SalonType>().map(CategoryFilter::Only)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(t) => write!(f, "{}", t),
        }
    }
}

/// Sort criterion for the discovery list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Fewest people waiting first
    #[default]
    Waiting,
    /// Highest rated first
    Rating,
    /// Nearest first
    Distance,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "waiting" | "wait" => Ok(SortBy::Waiting),
            "rating" => Ok(SortBy::Rating),
            "distance" | "nearest" => Ok(SortBy::Distance),
            _ => Err(format!(
                "Invalid sort: {}. Use waiting, rating, or distance",
                s
            )),
        }
    }
}

/// Discovery screen inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryQuery {
    /// Case-insensitive substring matched against name or area
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortBy,
}

impl DiscoveryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set search text
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Builder method: set category filter
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Builder method: set sort criterion
    pub fn sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether a salon is visible under this query
    pub fn matches(&self, salon: &Salon) -> bool {
        if !salon.verified {
            return false;
        }

        let needle = self.search.to_lowercase();
        let matches_search = salon.name.to_lowercase().contains(&needle)
            || salon.area.to_lowercase().contains(&needle);

        matches_search && self.category.matches(salon)
    }
}

/// Filter and sort salons for a customer
///
/// Unverified salons are never returned. Ties keep no particular order.
pub fn discover<'a>(salons: &'a [Salon], query: &DiscoveryQuery) -> Vec<&'a Salon> {
    let mut visible: Vec<&Salon> = salons.iter().filter(|s| query.matches(s)).collect();

    match query.sort {
        SortBy::Waiting => visible.sort_by_key(|s| s.waiting),
        SortBy::Rating => visible.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::Distance => visible.sort_by(|a, b| compare_distance(&a.distance, &b.distance)),
    }

    visible
}

/// Order two display distances by their numeric prefix; unparsable sorts last
fn compare_distance(a: &str, b: &str) -> Ordering {
    let da = parse_numeric_prefix(a).unwrap_or(f64::INFINITY);
    let db = parse_numeric_prefix(b).unwrap_or(f64::INFINITY);
    da.total_cmp(&db)
}

/// Parse the leading decimal number of a string ("1.2 km" → 1.2)
///
/// Leading whitespace and an optional sign are accepted; anything after the
/// number is ignored. Returns `None` when no digits lead the string.
pub fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salon::seed;

    fn names<'a>(salons: &[&'a Salon]) -> Vec<&'a str> {
        salons.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_never_returns_unverified() {
        let salons = seed::salons();
        for sort in [SortBy::Waiting, SortBy::Rating, SortBy::Distance] {
            let result = discover(&salons, &DiscoveryQuery::new().sort(sort));
            assert_eq!(result.len(), 3);
            assert!(result.iter().all(|s| s.verified));
        }

        // Even an exact search for it
        let result = discover(&salons, &DiscoveryQuery::new().search("Glow"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_sort_by_waiting_ascending() {
        let salons = seed::salons();
        let result = discover(&salons, &DiscoveryQuery::new());
        assert!(result.windows(2).all(|w| w[0].waiting <= w[1].waiting));
        assert_eq!(
            names(&result),
            vec!["Fade & Blade Men’s Salon", "Urban Cut Pro", "The Royal Cut Studio"]
        );
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let salons = seed::salons();
        let result = discover(&salons, &DiscoveryQuery::new().sort(SortBy::Rating));
        assert!(result.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert_eq!(result[0].rating, 4.9);
    }

    #[test]
    fn test_sort_by_distance_numeric() {
        let mut salons = seed::salons();
        salons.push(
            Salon::new(9, "Far Away", "Mandore", SalonType::Unisex)
                .distance("12 km")
                .verified(true),
        );
        salons.push(
            Salon::new(10, "Unknown", "Paota", SalonType::Unisex)
                .distance("n/a")
                .verified(true),
        );

        let result = discover(&salons, &DiscoveryQuery::new().sort(SortBy::Distance));
        let distances: Vec<_> = result.iter().map(|s| s.distance.as_str()).collect();
        // 12 km sorts after 2.0 km numerically, not lexically
        assert_eq!(distances, vec!["0.9 km", "1.2 km", "2.0 km", "12 km", "n/a"]);
    }

    #[test]
    fn test_search_name_or_area_case_insensitive() {
        let salons = seed::salons();

        let by_name = discover(&salons, &DiscoveryQuery::new().search("ROYAL"));
        assert_eq!(names(&by_name), vec!["The Royal Cut Studio"]);

        let by_area = discover(&salons, &DiscoveryQuery::new().search("sardar"));
        assert_eq!(names(&by_area), vec!["Fade & Blade Men’s Salon"]);

        let none = discover(&salons, &DiscoveryQuery::new().search("xyz"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_category_filter() {
        let salons = seed::salons();

        let men = discover(
            &salons,
            &DiscoveryQuery::new().category(CategoryFilter::Only(SalonType::MenOnly)),
        );
        assert_eq!(men.len(), 2);
        assert!(men.iter().all(|s| s.salon_type == SalonType::MenOnly));

        // The only women-only salon is unverified
        let women = discover(
            &salons,
            &DiscoveryQuery::new().category(CategoryFilter::Only(SalonType::WomenOnly)),
        );
        assert!(women.is_empty());
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!("".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Men Only".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(SalonType::MenOnly))
        );
        assert_eq!("RATING".parse::<SortBy>(), Ok(SortBy::Rating));
        assert!("price".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_parse_numeric_prefix() {
        assert_eq!(parse_numeric_prefix("1.2 km"), Some(1.2));
        assert_eq!(parse_numeric_prefix("  0.9km"), Some(0.9));
        assert_eq!(parse_numeric_prefix("12"), Some(12.0));
        assert_eq!(parse_numeric_prefix(".5 mi"), Some(0.5));
        assert_eq!(parse_numeric_prefix("3. km"), Some(3.0));
        assert_eq!(parse_numeric_prefix("-2 km"), Some(-2.0));
        assert_eq!(parse_numeric_prefix("km"), None);
        assert_eq!(parse_numeric_prefix("."), None);
        assert_eq!(parse_numeric_prefix(""), None);
    }
}
