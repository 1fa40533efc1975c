//! Filter specification and the predicate built from it.
//!
//! Every non-empty constraint becomes one [`Condition`]; a listing matches
//! when all conditions hold. With no conditions everything matches.

use std::collections::HashSet;

use crate::models::{BodyType, Brand, Fuel, Listing, Transmission};

/// Optional constraints supplied by one request.
///
/// Empty strings and empty sets mean "no constraint", exactly like `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub model_name_prefix: Option<String>,
    pub brands: HashSet<Brand>,
    pub types: HashSet<BodyType>,
    pub fuels: HashSet<Fuel>,
    pub transmissions: HashSet<Transmission>,
    pub min_price_lower_limit: Option<u32>,
    pub max_price_upper_limit: Option<u32>,
}

/// A single conjunct of a [`ListingPredicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Lowercased prefix of `name`
    NamePrefix(String),
    BrandIn(HashSet<Brand>),
    TypeIn(HashSet<BodyType>),
    FuelIn(HashSet<Fuel>),
    TransmissionIn(HashSet<Transmission>),
    /// Inclusive lower bound on `price_max`
    PriceAtLeast(u32),
    /// Inclusive upper bound on `price_max`
    PriceAtMost(u32),
}

impl Condition {
    fn matches(&self, listing: &Listing) -> bool {
        match self {
            Condition::NamePrefix(prefix) => listing.name.to_lowercase().starts_with(prefix),
            Condition::BrandIn(brands) => brands.contains(&listing.brand),
            Condition::TypeIn(types) => types.contains(&listing.body_type),
            Condition::FuelIn(fuels) => fuels.contains(&listing.fuel),
            Condition::TransmissionIn(transmissions) => {
                transmissions.contains(&listing.transmission)
            }
            Condition::PriceAtLeast(min) => listing.price_max >= *min,
            Condition::PriceAtMost(max) => listing.price_max <= *max,
        }
    }
}

/// AND of the active conditions of a [`FilterSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPredicate {
    conditions: Vec<Condition>,
}

impl ListingPredicate {
    pub fn from_spec(spec: &FilterSpec) -> Self {
        let mut conditions = Vec::new();

        if let Some(prefix) = spec.model_name_prefix.as_deref() {
            if !prefix.is_empty() {
                conditions.push(Condition::NamePrefix(prefix.to_lowercase()));
            }
        }
        if !spec.brands.is_empty() {
            conditions.push(Condition::BrandIn(spec.brands.clone()));
        }
        if !spec.types.is_empty() {
            conditions.push(Condition::TypeIn(spec.types.clone()));
        }
        if !spec.fuels.is_empty() {
            conditions.push(Condition::FuelIn(spec.fuels.clone()));
        }
        if !spec.transmissions.is_empty() {
            conditions.push(Condition::TransmissionIn(spec.transmissions.clone()));
        }
        if let Some(min) = spec.min_price_lower_limit {
            conditions.push(Condition::PriceAtLeast(min));
        }
        if let Some(max) = spec.max_price_upper_limit {
            conditions.push(Condition::PriceAtMost(max));
        }

        Self { conditions }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.conditions.iter().all(|c| c.matches(listing))
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_unconstrained(&self) -> bool {
        self.conditions.is_empty()
    }
}
