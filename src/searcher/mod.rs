// Query engine: predicate + comparator + paginator over a repository snapshot

pub mod executor;
pub mod filter;
pub mod paginator;
pub mod sort;

use std::sync::Arc;

use crate::{models::Listing, repository::ListingRepository};

pub use filter::{FilterSpec, ListingPredicate};
pub use paginator::{Page, PageRequest};
pub use sort::{ListingComparator, SortDirection, SortField, SortKey, SortOrder};

#[derive(Clone)]
pub struct SearchEngine {
    repository: Arc<dyn ListingRepository>,
}

impl SearchEngine {
    pub fn new(repository: Arc<dyn ListingRepository>) -> Self {
        Self { repository }
    }

    /// Runs one search. Never fails: an empty catalog or a page past the end
    /// simply produce an empty page.
    pub fn search(
        &self,
        filter: &FilterSpec,
        order: &SortOrder,
        request: PageRequest,
    ) -> Page<Listing> {
        let snapshot = self.repository.snapshot();
        let predicate = ListingPredicate::from_spec(filter);
        let comparator = ListingComparator::from_order(order);

        let ordered = executor::execute(&snapshot, &predicate, &comparator);
        paginator::paginate(&ordered, request).map(Listing::clone)
    }
}
