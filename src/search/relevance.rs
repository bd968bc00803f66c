//! Relevance scoring and client-side result ordering.
//!
//! Queries against the document store stay single-field; filtering and
//! ordering happen here after the fetch, so no server-side composite
//! indexes are required.

use super::text::{normalize, normalize_query};
use crate::domain::Product;

/// Result orderings offered by the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Relevance,
    PriceAscending,
    PriceDescending,
    NameAscending,
}

impl SortOrder {
    pub fn from_str(s: &str) -> Self {
        match s {
            "price_asc" => Self::PriceAscending,
            "price_desc" => Self::PriceDescending,
            "name_asc" => Self::NameAscending,
            _ => Self::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAscending => "price_asc",
            Self::PriceDescending => "price_desc",
            Self::NameAscending => "name_asc",
        }
    }
}

/// Match-quality rank for a product against an already-normalized query.
///
/// 3: name starts with the query; 2: name contains it; 1: only the
/// description contains it; 0: no match or empty query. Ties keep their
/// original relative order downstream (stable sort).
pub fn relevance(product: &Product, normalized_query: &str) -> u8 {
    if normalized_query.is_empty() {
        return 0;
    }

    let name = normalize(&product.name);
    if name.starts_with(normalized_query) {
        return 3;
    }
    if name.contains(normalized_query) {
        return 2;
    }

    let description = product.description.as_deref().map(normalize).unwrap_or_default();
    if description.contains(normalized_query) {
        1
    } else {
        0
    }
}

/// Filter a product collection by a raw query and order the survivors.
///
/// A product is retained when the normalized query is a substring of its
/// normalized name or description; an empty query retains everything.
pub fn filter_and_sort(products: &[Product], raw_query: &str, sort: SortOrder) -> Vec<Product> {
    let query = normalize_query(raw_query);

    let mut results: Vec<Product> = products
        .iter()
        .filter(|p| {
            if query.is_empty() {
                return true;
            }
            normalize(&p.name).contains(&query)
                || p.description
                    .as_deref()
                    .map(|d| normalize(d).contains(&query))
                    .unwrap_or(false)
        })
        .cloned()
        .collect();

    match sort {
        SortOrder::Relevance => {
            let mut scored: Vec<(u8, Product)> = results
                .into_iter()
                .map(|p| (relevance(&p, &query), p))
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            results = scored.into_iter().map(|(_, p)| p).collect();
        }
        SortOrder::PriceAscending => results.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::PriceDescending => results.sort_by(|a, b| b.price.total_cmp(&a.price)),
        // Diacritic-folded comparison stands in for locale collation
        SortOrder::NameAscending => results.sort_by(|a, b| normalize(&a.name).cmp(&normalize(&b.name))),
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, name: &str, description: Option<&str>, price: f64) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            description: description.map(Into::into),
            price,
            stock: Some(10),
            category_id: "c1".into(),
            image_url: None,
            rating_sum: 0.0,
            review_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn prefix_beats_contains_beats_description() {
        let starts = product("a", "M\u{00ec} Vi\u{1ec7}t", None, 1.0);
        let contains = product("b", "B\u{00e1}nh M\u{00ec}", None, 1.0);
        let described = product("c", "Baguette", Some("gi\u{00f2}n nh\u{01b0} m\u{00ec}"), 1.0);

        assert_eq!(relevance(&starts, "mi"), 3);
        assert_eq!(relevance(&contains, "mi"), 2);
        assert_eq!(relevance(&described, "mi"), 1);

        let ranked = filter_and_sort(
            &[described.clone(), contains.clone(), starts.clone()],
            "Mi",
            SortOrder::Relevance,
        );
        let ids: Vec<_> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_query_retains_everything_unscored() {
        let all = vec![
            product("a", "Tart", None, 3.0),
            product("b", "Flan", None, 1.0),
        ];
        assert_eq!(relevance(&all[0], ""), 0);

        let kept = filter_and_sort(&all, "", SortOrder::Relevance);
        assert_eq!(kept.len(), all.len());
        // Stable: original relative order preserved on equal scores
        assert_eq!(kept[0].id, "a");
        assert_eq!(kept[1].id, "b");
    }

    #[test]
    fn filtering_is_a_subset() {
        let all = vec![
            product("a", "B\u{00e1}nh bao", None, 1.0),
            product("b", "Donut", None, 2.0),
        ];
        let hits = filter_and_sort(&all, "banh", SortOrder::Relevance);
        assert!(hits.len() <= all.len());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn price_and_name_orderings() {
        let all = vec![
            product("a", "\u{00c9}clair", None, 30000.0),
            product("b", "B\u{00e1}nh bao", None, 10000.0),
            product("c", "Croissant", None, 20000.0),
        ];

        let asc = filter_and_sort(&all, "", SortOrder::PriceAscending);
        let ids: Vec<_> = asc.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let desc = filter_and_sort(&all, "", SortOrder::PriceDescending);
        let ids: Vec<_> = desc.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);

        // "Éclair" collates under e once diacritics are folded
        let by_name = filter_and_sort(&all, "", SortOrder::NameAscending);
        let ids: Vec<_> = by_name.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
