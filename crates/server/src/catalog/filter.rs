//! Filter engine for gym and product listings.
//!
//! Pure functions that narrow a catalog list by search text, amenity set,
//! price range, category, and sort order. Inputs are never mutated; callers
//! get back a fresh, sorted vector.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Gym, Product};

/// Sort key for gym listings.
///
/// `Distance` is accepted but leaves the catalog order untouched: no
/// geo-distance computation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Price,
    Rating,
}

/// Filter specification for gym listings.
#[derive(Debug, Clone, Default)]
pub struct GymFilter {
    /// Case-insensitive substring match on name and address; empty passes all.
    pub search: String,
    /// An item passes only if it has every selected amenity (AND semantics).
    pub amenities: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    /// Membership tier the gym must list.
    pub category: Option<String>,
    pub sort_by: SortKey,
}

/// Filter specification for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name and description.
    pub search: String,
    /// Exact category label.
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

fn matches_search(search: &str, name: &str, detail: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    name.to_lowercase().contains(&needle) || detail.to_lowercase().contains(&needle)
}

fn within_price(price: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> bool {
    min.is_none_or(|min| price >= min) && max.is_none_or(|max| price <= max)
}

/// Apply a [`GymFilter`] to a gym list, returning a new filtered+sorted vector.
#[must_use]
pub fn filter_gyms(gyms: &[Gym], filter: &GymFilter) -> Vec<Gym> {
    let mut result: Vec<Gym> = gyms
        .iter()
        .filter(|gym| matches_search(&filter.search, &gym.name, &gym.location.address))
        .filter(|gym| {
            filter
                .amenities
                .iter()
                .all(|amenity| gym.amenities.contains(amenity))
        })
        .filter(|gym| within_price(gym.price, filter.min_price, filter.max_price))
        .filter(|gym| {
            filter
                .category
                .as_ref()
                .is_none_or(|category| gym.categories.contains(category))
        })
        .cloned()
        .collect();

    // Vec::sort_by is stable, so ties keep catalog order.
    match filter.sort_by {
        SortKey::Price => result.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::Rating => result.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Distance => {}
    }

    result
}

/// Apply a [`ProductFilter`] to a product list, returning a new vector.
#[must_use]
pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|product| matches_search(&filter.search, &product.name, &product.description))
        .filter(|product| {
            filter
                .category
                .as_ref()
                .is_none_or(|category| &product.category == category)
        })
        .filter(|product| within_price(product.price, filter.min_price, filter.max_price))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn gyms() -> Vec<Gym> {
        Catalog::seed().gyms().to_vec()
    }

    #[test]
    fn test_empty_filter_passes_everything_through() {
        let gyms = gyms();
        let result = filter_gyms(&gyms, &GymFilter::default());
        assert_eq!(result, gyms);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_and_address() {
        let gyms = gyms();

        let by_name = filter_gyms(
            &gyms,
            &GymFilter {
                search: "powerhouse".to_owned(),
                ..GymFilter::default()
            },
        );
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "PowerHouse Fitness");

        let by_address = filter_gyms(
            &gyms,
            &GymFilter {
                search: "ZEN BLVD".to_owned(),
                ..GymFilter::default()
            },
        );
        assert_eq!(by_address.len(), 1);
        assert_eq!(by_address[0].name, "Yoga Bliss Studio");
    }

    #[test]
    fn test_amenity_filter_requires_every_selected_amenity() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                amenities: vec!["Weight Training".to_owned(), "Sauna".to_owned()],
                ..GymFilter::default()
            },
        );
        // No false positives: every result has both amenities.
        assert!(!result.is_empty());
        for gym in &result {
            assert!(gym.amenities.contains(&"Weight Training".to_owned()));
            assert!(gym.amenities.contains(&"Sauna".to_owned()));
        }
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_empty_amenity_set_is_a_no_op() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                amenities: Vec::new(),
                ..GymFilter::default()
            },
        );
        assert_eq!(result.len(), gyms.len());
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                min_price: Some(Decimal::new(50, 0)),
                max_price: Some(Decimal::new(60, 0)),
                ..GymFilter::default()
            },
        );
        let names: Vec<_> = result.iter().map(|gym| gym.name.as_str()).collect();
        assert_eq!(names, ["FitZone Gym", "Yoga Bliss Studio"]);
    }

    #[test]
    fn test_inverted_price_range_yields_empty_result() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                min_price: Some(Decimal::new(100, 0)),
                max_price: Some(Decimal::new(10, 0)),
                ..GymFilter::default()
            },
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_category_filter() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                category: Some("Elite".to_owned()),
                ..GymFilter::default()
            },
        );
        let names: Vec<_> = result.iter().map(|gym| gym.name.as_str()).collect();
        assert_eq!(names, ["PowerHouse Fitness", "Yoga Bliss Studio"]);
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                sort_by: SortKey::Price,
                ..GymFilter::default()
            },
        );
        let prices: Vec<_> = result.iter().map(|gym| gym.price).collect();
        assert_eq!(
            prices,
            [Decimal::new(50, 0), Decimal::new(60, 0), Decimal::new(75, 0)]
        );
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                sort_by: SortKey::Rating,
                ..GymFilter::default()
            },
        );
        let names: Vec<_> = result.iter().map(|gym| gym.name.as_str()).collect();
        assert_eq!(
            names,
            ["PowerHouse Fitness", "Yoga Bliss Studio", "FitZone Gym"]
        );
    }

    #[test]
    fn test_sort_by_distance_preserves_catalog_order() {
        let gyms = gyms();
        let result = filter_gyms(
            &gyms,
            &GymFilter {
                sort_by: SortKey::Distance,
                ..GymFilter::default()
            },
        );
        assert_eq!(result, gyms);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let gyms = gyms();
        let snapshot = gyms.clone();
        let _ = filter_gyms(
            &gyms,
            &GymFilter {
                sort_by: SortKey::Rating,
                search: "fit".to_owned(),
                ..GymFilter::default()
            },
        );
        assert_eq!(gyms, snapshot);
    }

    #[test]
    fn test_product_filter_by_category_and_price() {
        let products = Catalog::seed().products().to_vec();
        let result = filter_products(
            &products,
            &ProductFilter {
                category: Some("Accessories".to_owned()),
                max_price: Some(Decimal::new(2000, 2)),
                ..ProductFilter::default()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Gym Towel Set");
    }

    #[test]
    fn test_product_search_matches_description() {
        let products = Catalog::seed().products().to_vec();
        let result = filter_products(
            &products,
            &ProductFilter {
                search: "muscle recovery".to_owned(),
                ..ProductFilter::default()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Premium Protein Shake");
    }
}
