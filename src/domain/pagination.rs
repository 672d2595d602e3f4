//! Page requests, sort orders, and paged results.
//!
//! Pages are zero-based. A [`Page`] carries the total element count; a
//! [`Slice`] only knows whether another page follows, which lets the
//! repository skip the `COUNT(*)` query.

use serde_json::json;

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sortable product properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Parses an API property name. Accepts camelCase and snake_case.
    pub fn parse(property: &str) -> Option<Self> {
        match property {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "price" => Some(SortField::Price),
            "createdAt" | "created_at" => Some(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Some(SortField::UpdatedAt),
            _ => None,
        }
    }

    /// Column name used in `ORDER BY`.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    /// Parses `property[,direction]`. Anything but `desc` sorts ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unknown property.
    pub fn parse(param: &str) -> Result<Self, AppError> {
        let mut parts = param.split(',').map(str::trim);
        let property = parts.next().unwrap_or_default();
        let direction = parts.next().unwrap_or("asc");

        let field = SortField::parse(property).ok_or_else(|| {
            AppError::bad_request(
                format!("Invalid sort property: {}", property),
                json!({ "allowed": ["id", "name", "price", "createdAt", "updatedAt"] }),
            )
        })?;

        Ok(if direction.eq_ignore_ascii_case("desc") {
            SortOrder::desc(field)
        } else {
            SortOrder::asc(field)
        })
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Validates raw query values and builds a page request.
    ///
    /// An empty `sort` list sorts by `id` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `page` is negative
    /// - `size` is outside `1..=100`
    /// - a sort property is not sortable
    pub fn parse(page: i64, size: i64, sort: &[String]) -> Result<Self, AppError> {
        if page < 0 {
            return Err(AppError::bad_request(
                "Page must be greater than or equal to 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(AppError::bad_request(
                "Size must be between 1 and 100",
                json!({ "size": size }),
            ));
        }

        let page = u32::try_from(page).map_err(|_| {
            AppError::bad_request("Page number is too large", json!({ "page": page }))
        })?;

        let sort = if sort.is_empty() {
            vec![SortOrder::asc(SortField::Id)]
        } else {
            sort.iter()
                .map(|s| SortOrder::parse(s))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            page,
            size: size as u32,
            sort,
        })
    }

    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }

    /// Sort orders with `id` appended as a tiebreaker when absent.
    pub fn orders_with_tiebreaker(&self) -> Vec<SortOrder> {
        let mut orders = self.sort.clone();
        if !orders.iter().any(|o| o.field == SortField::Id) {
            orders.push(SortOrder::asc(SortField::Id));
        }
        orders
    }
}

/// One page of results with the total count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        ((self.total_elements.max(0) as u64).div_ceil(self.size as u64)) as u32
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.number) + 1 >= u64::from(self.total_pages())
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// One page of results without a total count.
#[derive(Debug, Clone)]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub has_next: bool,
}

impl<T> Slice<T> {
    /// Builds a slice from up to `size + 1` fetched rows; the extra row only
    /// signals that a next page exists and is dropped.
    pub fn from_overfetch(mut rows: Vec<T>, request: &PageRequest) -> Self {
        let has_next = rows.len() > request.size as usize;
        rows.truncate(request.size as usize);

        Self {
            content: rows,
            number: request.page,
            size: request.size,
            has_next,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Slice<U> {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            has_next: self.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_sort_by_id() {
        let req = PageRequest::parse(0, DEFAULT_PAGE_SIZE, &[]).unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 10);
        assert_eq!(req.sort, vec![SortOrder::asc(SortField::Id)]);
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::parse(3, 25, &[]).unwrap();
        assert_eq!(req.offset(), 75);
    }

    #[test]
    fn test_negative_page_is_error() {
        assert!(matches!(
            PageRequest::parse(-1, 10, &[]),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_size_bounds() {
        assert!(PageRequest::parse(0, 0, &[]).is_err());
        assert!(PageRequest::parse(0, 1, &[]).is_ok());
        assert!(PageRequest::parse(0, 100, &[]).is_ok());
        assert!(PageRequest::parse(0, 101, &[]).is_err());
    }

    #[test]
    fn test_sort_parsing() {
        let req = PageRequest::parse(0, 10, &sort(&["name,desc", "price", "createdAt,ASC"]))
            .unwrap();

        assert_eq!(
            req.sort,
            vec![
                SortOrder::desc(SortField::Name),
                SortOrder::asc(SortField::Price),
                SortOrder::asc(SortField::CreatedAt),
            ]
        );
    }

    #[test]
    fn test_sort_direction_is_case_insensitive() {
        assert_eq!(
            SortOrder::parse("price,DESC").unwrap(),
            SortOrder::desc(SortField::Price)
        );
    }

    #[test]
    fn test_sort_accepts_snake_case() {
        assert_eq!(
            SortOrder::parse("updated_at,desc").unwrap(),
            SortOrder::desc(SortField::UpdatedAt)
        );
    }

    #[test]
    fn test_invalid_sort_property() {
        let err = PageRequest::parse(0, 10, &sort(&["password"])).unwrap_err();
        match err {
            AppError::Validation { message, .. } => {
                assert_eq!(message, "Invalid sort property: password")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tiebreaker_added_once() {
        let req = PageRequest::parse(0, 10, &sort(&["price,desc"])).unwrap();
        assert_eq!(
            req.orders_with_tiebreaker(),
            vec![
                SortOrder::desc(SortField::Price),
                SortOrder::asc(SortField::Id)
            ]
        );

        let req = PageRequest::parse(0, 10, &sort(&["id,desc"])).unwrap();
        assert_eq!(
            req.orders_with_tiebreaker(),
            vec![SortOrder::desc(SortField::Id)]
        );
    }

    #[test]
    fn test_page_metadata() {
        let req = PageRequest::parse(1, 10, &[]).unwrap();
        let page = Page::new(vec![1, 2, 3], &req, 23);

        assert_eq!(page.total_pages(), 3);
        assert!(!page.is_first());
        assert!(!page.is_last());

        let last = Page::new(vec![1], &PageRequest::parse(2, 10, &[]).unwrap(), 21);
        assert!(last.is_last());
    }

    #[test]
    fn test_empty_page_is_first_and_last() {
        let page: Page<i32> = Page::new(vec![], &PageRequest::parse(0, 10, &[]).unwrap(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn test_last_page_at_max_page_number() {
        let req = PageRequest::parse(u32::MAX as i64, 10, &[]).unwrap();
        let page: Page<i32> = Page::new(vec![], &req, 0);
        assert!(page.is_last());
        assert!(!page.is_first());

        let page: Page<i32> = Page::new(vec![], &req, i64::MAX);
        assert!(!page.is_last());
    }

    #[test]
    fn test_page_map() {
        let req = PageRequest::parse(0, 10, &[]).unwrap();
        let page = Page::new(vec![1, 2], &req, 2).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 2);
    }

    #[test]
    fn test_slice_from_overfetch() {
        let req = PageRequest::parse(0, 2, &[]).unwrap();

        let slice = Slice::from_overfetch(vec![1, 2, 3], &req);
        assert_eq!(slice.content, vec![1, 2]);
        assert!(slice.has_next);
        assert!(!slice.has_previous());

        let slice = Slice::from_overfetch(vec![1, 2], &req);
        assert!(!slice.has_next);
    }
}
