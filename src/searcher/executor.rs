//! Query execution: filter the full collection, then order what survives.
//!
//! Same inputs always give the same sequence, which is what lets clients walk
//! pages one request at a time without seeing duplicates or gaps.

use crate::models::Listing;

use super::filter::ListingPredicate;
use super::sort::ListingComparator;

pub fn execute<'a>(
    listings: &'a [Listing],
    predicate: &ListingPredicate,
    comparator: &ListingComparator,
) -> Vec<&'a Listing> {
    let mut matched: Vec<&Listing> = if predicate.is_unconstrained() {
        listings.iter().collect()
    } else {
        listings.iter().filter(|l| predicate.matches(l)).collect()
    };

    matched.sort_by(|a, b| comparator.compare(a, b));

    tracing::debug!(
        scanned = listings.len(),
        matched = matched.len(),
        conditions = predicate.conditions().len(),
        "Executed listing query"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyType, Brand, Fuel, Transmission};
    use crate::searcher::filter::FilterSpec;
    use crate::searcher::sort::{SortField, SortKey, SortOrder};
    use std::collections::HashSet;

    fn listing(id: u64, brand: Brand, year: u16) -> Listing {
        Listing {
            id,
            name: format!("{brand} {id}"),
            brand,
            body_type: BodyType::Suv,
            fuel: Fuel::Hybrid,
            transmission: Transmission::Automatic,
            year,
            price_max: 20_000 + id as u32,
        }
    }

    fn catalog() -> Vec<Listing> {
        vec![
            listing(5, Brand::Toyota, 2018),
            listing(2, Brand::Bmw, 2022),
            listing(8, Brand::Toyota, 2022),
            listing(1, Brand::Toyota, 2015),
            listing(3, Brand::Volvo, 2020),
        ]
    }

    #[test]
    fn filters_then_sorts() {
        let listings = catalog();
        let predicate = ListingPredicate::from_spec(&FilterSpec {
            brands: HashSet::from([Brand::Toyota]),
            ..Default::default()
        });
        let comparator = ListingComparator::from_order(
            &SortOrder::unsorted().then(SortKey::desc(SortField::ByYear)),
        );

        let ids: Vec<u64> = execute(&listings, &predicate, &comparator)
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![8, 5, 1]);
    }

    #[test]
    fn default_order_is_by_id() {
        let listings = catalog();
        let ids: Vec<u64> = execute(
            &listings,
            &ListingPredicate::default(),
            &ListingComparator::default(),
        )
        .iter()
        .map(|l| l.id)
        .collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 8]);
    }

    #[test]
    fn is_deterministic_across_input_orderings() {
        let listings = catalog();
        let mut reversed = catalog();
        reversed.reverse();

        let predicate = ListingPredicate::default();
        let comparator = ListingComparator::from_order(
            &SortOrder::unsorted().then(SortKey::asc(SortField::ByYear)),
        );

        assert_eq!(
            execute(&listings, &predicate, &comparator),
            execute(&reversed, &predicate, &comparator)
        );
    }

    #[test]
    fn empty_collection() {
        let result = execute(&[], &ListingPredicate::default(), &ListingComparator::default());
        assert!(result.is_empty());
    }
}
