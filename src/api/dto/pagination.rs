//! Paging query parameters and paged response envelopes.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ProductFilter;
use crate::domain::pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest, Slice};
use crate::error::AppError;

/// Query parameters accepted by product listing endpoints.
///
/// Parsed with `axum_extra::extract::Query`, so `sort` may repeat:
/// `?sort=price,desc&sort=name`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    #[serde(default)]
    pub sort: Vec<String>,
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category_id: Option<i64>,
}

impl ProductQuery {
    /// Builds the page request, sorting by `default_sort` when no `sort`
    /// parameter was given.
    ///
    /// # Errors
    ///
    /// See [`PageRequest::parse`].
    pub fn page_request(&self, default_sort: &str) -> Result<PageRequest, AppError> {
        let default = [default_sort.to_string()];
        let sort: &[String] = if self.sort.is_empty() {
            &default
        } else {
            &self.sort
        };

        PageRequest::parse(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
        )
    }

    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new()
            .with_name(self.name.clone())
            .with_price_range(self.min_price, self.max_price)
            .with_category(self.category_id)
    }
}

/// Page of results with totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();

        Self {
            number_of_elements: page.content.len(),
            empty: page.content.is_empty(),
            content: page.content,
            number: page.number,
            size: page.size,
            total_elements: page.total_elements,
            total_pages,
            first,
            last,
        }
    }
}

/// Page of results without totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceResponse<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool,
    pub empty: bool,
}

impl<T> From<Slice<T>> for SliceResponse<T> {
    fn from(slice: Slice<T>) -> Self {
        let has_previous = slice.has_previous();

        Self {
            number_of_elements: slice.content.len(),
            empty: slice.content.is_empty(),
            content: slice.content,
            number: slice.number,
            size: slice.size,
            first: !has_previous,
            last: !slice.has_next,
            has_next: slice.has_next,
            has_previous,
        }
    }
}
