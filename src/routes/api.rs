// Handler for the search endpoint: query string in, page envelope out

use axum::{extract::State, response::Json};
use axum_extra::extract::{Query, QueryRejection};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, hash::Hash, num::IntErrorKind, str::FromStr};

use crate::{
    AppState,
    error::{AppError, AppResult, ParamError},
    models::{Listing, UnknownVariant},
    searcher::{FilterSpec, Page, PageRequest, SortDirection, SortField, SortKey, SortOrder},
};

// --- Request ---

// Raw query parameters. Everything is kept as text so that empty values
// ("brands=") behave like absent ones and bad values get a clear message.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    model_name: Option<String>,
    #[serde(default)]
    brands: Vec<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    fuels: Vec<String>,
    #[serde(default)]
    transmissions: Vec<String>,
    min_price_lower_limit: Option<String>,
    max_price_upper_limit: Option<String>,
    page: Option<String>,
    size: Option<String>,
    #[serde(default)]
    sort: Vec<String>,
}

impl SearchQuery {
    pub fn filter_spec(&self) -> Result<FilterSpec, ParamError> {
        Ok(FilterSpec {
            // Whitespace-only means absent; anything else is a literal prefix
            model_name_prefix: self
                .model_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .map(str::to_string),
            brands: parse_set("brands", &self.brands)?,
            types: parse_set("types", &self.types)?,
            fuels: parse_set("fuels", &self.fuels)?,
            transmissions: parse_set("transmissions", &self.transmissions)?,
            min_price_lower_limit: parse_number(
                "minPriceLowerLimit",
                self.min_price_lower_limit.as_deref(),
            )?,
            max_price_upper_limit: parse_number(
                "maxPriceUpperLimit",
                self.max_price_upper_limit.as_deref(),
            )?,
        })
    }

    pub fn sort_order(&self) -> Result<SortOrder, ParamError> {
        self.sort
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_sort_key(s))
            .collect()
    }

    // Sizes above the configured maximum are clamped rather than rejected,
    // including sizes too large to represent
    pub fn page_request(
        &self,
        default_size: usize,
        max_size: usize,
    ) -> Result<PageRequest, ParamError> {
        let page_number = parse_count("page", self.page.as_deref())?.unwrap_or(0);
        let page_size = parse_count("size", self.size.as_deref())?
            .unwrap_or(default_size)
            .min(max_size);
        PageRequest::new(page_number, page_size).ok_or(ParamError::ZeroPageSize)
    }
}

// Accepts both repeated keys (brands=A&brands=B) and comma lists (brands=A,B)
fn parse_set<T>(param: &'static str, values: &[String]) -> Result<HashSet<T>, ParamError>
where
    T: FromStr<Err = UnknownVariant> + Eq + Hash,
{
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse()
                .map_err(|UnknownVariant(value)| ParamError::UnknownValue { param, value })
        })
        .collect()
}

fn parse_number<T: FromStr>(
    param: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, ParamError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| ParamError::InvalidNumber {
            param,
            value: raw.to_string(),
        }),
    }
}

// Like `parse_number`, but a value that overflows `usize` saturates.
// Page numbers that large land past the last page, sizes get clamped.
fn parse_count(param: &'static str, value: Option<&str>) -> Result<Option<usize>, ParamError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(count) => Ok(Some(count)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Some(usize::MAX)),
            Err(_) => Err(ParamError::InvalidNumber {
                param,
                value: raw.to_string(),
            }),
        },
    }
}

// "BY_YEAR,DESC" or just "BY_YEAR" (ascending)
fn parse_sort_key(raw: &str) -> Result<SortKey, ParamError> {
    let invalid = || ParamError::InvalidSort(raw.to_string());
    let mut parts = raw.split(',');

    let field: SortField = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let key = match parts.next().map(str::parse::<SortDirection>) {
        None | Some(Ok(SortDirection::Asc)) => SortKey::asc(field),
        Some(Ok(SortDirection::Desc)) => SortKey::desc(field),
        Some(Err(_)) => return Err(invalid()),
    };
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(key)
}

// --- Response ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SortInfo {
    sorted: bool,
    unsorted: bool,
    empty: bool,
}

impl SortInfo {
    fn of(order: &SortOrder) -> Self {
        Self {
            sorted: order.is_sorted(),
            unsorted: !order.is_sorted(),
            empty: !order.is_sorted(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    page_number: usize,
    page_size: usize,
    offset: usize,
    paged: bool,
    unpaged: bool,
    sort: SortInfo,
}

// Response shape consumed by clients
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    content: Vec<Listing>,
    pageable: Pageable,
    size: usize,
    number: usize,
    number_of_elements: usize,
    total_elements: usize,
    total_pages: usize,
    first: bool,
    last: bool,
    empty: bool,
    sort: SortInfo,
}

impl PageEnvelope {
    pub fn new(page: Page<Listing>, order: &SortOrder) -> Self {
        Self {
            pageable: Pageable {
                page_number: page.page_number,
                page_size: page.page_size,
                offset: page.offset(),
                paged: true,
                unpaged: false,
                sort: SortInfo::of(order),
            },
            size: page.page_size,
            number: page.page_number,
            number_of_elements: page.number_of_elements(),
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            first: page.is_first(),
            last: page.is_last(),
            empty: page.is_empty(),
            sort: SortInfo::of(order),
            content: page.content,
        }
    }
}

// --- Handlers ---

pub async fn search_listings(
    State(app_state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<Json<PageEnvelope>> {
    // Malformed query strings (e.g. a repeated `page`) get the same JSON error body
    let Query(query) = query?;
    tracing::info!("[HANDLER] /searcher - Request received: {:?}", query);

    let filter = query.filter_spec()?;
    let order = query.sort_order()?;
    let request = query.page_request(
        app_state.settings.default_page_size,
        app_state.settings.max_page_size,
    )?;
    tracing::debug!(
        "[HANDLER] /searcher - page {} size {} sort [{}]",
        request.page_number,
        request.page_size,
        order.keys().iter().map(|k| k.to_string()).collect::<Vec<_>>().join(";")
    );

    // Filtering and sorting the whole catalog is CPU-bound
    let engine = app_state.engine.clone();
    let envelope = tokio::task::spawn_blocking(move || {
        let page = engine.search(&filter, &order, request);
        PageEnvelope::new(page, &order)
    })
    .await
    .map_err(|e| {
        AppError::InternalServerError(anyhow::Error::new(e).context("Search task failed"))
    })?;

    tracing::info!(
        "[HANDLER] /searcher - Returning {} of {} listings (page {}/{})",
        envelope.number_of_elements,
        envelope.total_elements,
        envelope.number,
        envelope.total_pages
    );
    Ok(Json(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Brand, Fuel};

    fn query(pairs: &[(&str, &str)]) -> SearchQuery {
        let mut query = SearchQuery::default();
        for (key, value) in pairs {
            let value = value.to_string();
            match *key {
                "modelName" => query.model_name = Some(value),
                "brands" => query.brands.push(value),
                "types" => query.types.push(value),
                "fuels" => query.fuels.push(value),
                "transmissions" => query.transmissions.push(value),
                "minPriceLowerLimit" => query.min_price_lower_limit = Some(value),
                "maxPriceUpperLimit" => query.max_price_upper_limit = Some(value),
                "page" => query.page = Some(value),
                "size" => query.size = Some(value),
                "sort" => query.sort.push(value),
                other => panic!("unknown key {other}"),
            }
        }
        query
    }

    #[test]
    fn blank_parameters_mean_no_filter() {
        let blank = query(&[
            ("modelName", ""),
            ("brands", ""),
            ("types", ""),
            ("fuels", ""),
            ("transmissions", ""),
            ("minPriceLowerLimit", ""),
        ]);
        assert_eq!(blank.filter_spec().unwrap(), FilterSpec::default());
        assert_eq!(blank.sort_order().unwrap(), SortOrder::unsorted());
    }

    #[test]
    fn model_name_is_kept_as_sent() {
        let spec = query(&[("modelName", "Seat ")]).filter_spec().unwrap();
        assert_eq!(spec.model_name_prefix.as_deref(), Some("Seat "));

        let spec = query(&[("modelName", "   ")]).filter_spec().unwrap();
        assert_eq!(spec.model_name_prefix, None);
    }

    #[test]
    fn repeated_and_comma_separated_values() {
        let q = query(&[("brands", "BMW,AUDI"), ("brands", "TESLA"), ("fuels", "DIESEL")]);
        let spec = q.filter_spec().unwrap();
        assert_eq!(spec.brands, HashSet::from([Brand::Bmw, Brand::Audi, Brand::Tesla]));
        assert_eq!(spec.fuels, HashSet::from([Fuel::Diesel]));
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let err = query(&[("types", "SPACESHIP")]).filter_spec().unwrap_err();
        assert_eq!(
            err,
            ParamError::UnknownValue {
                param: "types",
                value: "SPACESHIP".to_string()
            }
        );
    }

    #[test]
    fn sort_pairs_keep_their_order() {
        let q = query(&[("sort", "BY_YEAR,DESC"), ("sort", "BY_PRICE_MAX,asc")]);
        assert_eq!(
            q.sort_order().unwrap().keys(),
            &[SortKey::desc(SortField::ByYear), SortKey::asc(SortField::ByPriceMax)]
        );

        let q = query(&[("sort", "BY_PRICE_MAX")]);
        assert_eq!(q.sort_order().unwrap().keys(), &[SortKey::asc(SortField::ByPriceMax)]);

        for bad in ["BY_MILEAGE,ASC", "BY_YEAR,SIDEWAYS", "BY_YEAR,DESC,ASC"] {
            assert!(query(&[("sort", bad)]).sort_order().is_err(), "{bad}");
        }
    }

    #[test]
    fn page_request_defaults_and_limits() {
        let request = query(&[]).page_request(5, 2000).unwrap();
        assert_eq!(request, PageRequest::new(0, 5).unwrap());

        let request = query(&[("page", "3"), ("size", "10")]).page_request(5, 2000).unwrap();
        assert_eq!(request, PageRequest::new(3, 10).unwrap());

        let request = query(&[("size", "5000")]).page_request(5, 2000).unwrap();
        assert_eq!(request.page_size, 2000);

        assert_eq!(
            query(&[("size", "0")]).page_request(5, 2000),
            Err(ParamError::ZeroPageSize)
        );
        assert!(matches!(
            query(&[("page", "-1")]).page_request(5, 2000),
            Err(ParamError::InvalidNumber { param: "page", .. })
        ));
    }

    #[test]
    fn oversized_numbers_saturate() {
        let huge = "340282366920938463463374607431768211456";

        let request = query(&[("size", huge)]).page_request(5, 2000).unwrap();
        assert_eq!(request.page_size, 2000);

        let request = query(&[("page", huge)]).page_request(5, 2000).unwrap();
        assert_eq!(request.page_number, usize::MAX);
    }

    #[test]
    fn invalid_price_is_rejected() {
        let err = query(&[("maxPriceUpperLimit", "cheap")]).filter_spec().unwrap_err();
        assert!(matches!(err, ParamError::InvalidNumber { param: "maxPriceUpperLimit", .. }));
    }
}
