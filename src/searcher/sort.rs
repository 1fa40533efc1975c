//! Sort order and the comparator built from it.
//!
//! Keys apply lexicographically: the first key dominates and later keys only
//! break its ties. Listings equal on every key are ordered by ascending `id`,
//! which makes the result a total order and page boundaries reproducible.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Listing, UnknownVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    ByYear,
    ByPriceMax,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::ByYear => "BY_YEAR",
            SortField::ByPriceMax => "BY_PRICE_MAX",
        }
    }

    fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortField::ByYear => a.year.cmp(&b.year),
            SortField::ByPriceMax => a.price_max.cmp(&b.price_max),
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BY_YEAR" => Ok(SortField::ByYear),
            "BY_PRICE_MAX" => Ok(SortField::ByPriceMax),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = UnknownVariant;

    // Direction names are accepted in any case ("desc", "DESC")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ASC") {
            Ok(SortDirection::Asc)
        } else if trimmed.eq_ignore_ascii_case("DESC") {
            Ok(SortDirection::Desc)
        } else {
            Err(UnknownVariant(trimmed.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self { field, direction: SortDirection::Asc }
    }

    pub fn desc(field: SortField) -> Self {
        Self { field, direction: SortDirection::Desc }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        write!(f, "{},{}", self.field.as_str(), direction)
    }
}

/// Ordered list of sort keys; earlier keys are more significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    keys: Vec<SortKey>,
}

impl SortOrder {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Adds a key with lower precedence than the existing ones.
    /// A repeated field is ignored since the earlier key already decides it.
    pub fn then(mut self, key: SortKey) -> Self {
        if !self.keys.iter().any(|k| k.field == key.field) {
            self.keys.push(key);
        }
        self
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_sorted(&self) -> bool {
        !self.keys.is_empty()
    }
}

impl FromIterator<SortKey> for SortOrder {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        iter.into_iter().fold(SortOrder::unsorted(), SortOrder::then)
    }
}

/// Total order over listings derived from a [`SortOrder`].
#[derive(Debug, Clone, Default)]
pub struct ListingComparator {
    keys: Vec<SortKey>,
}

impl ListingComparator {
    pub fn from_order(order: &SortOrder) -> Self {
        Self { keys: order.keys().to_vec() }
    }

    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        self.keys
            .iter()
            .map(|key| {
                let ordering = key.field.compare(a, b);
                match key.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}
