//! Listing query for contributors.
//!
//! A [`ContributorListQuery`] is built once from request parameters and then
//! interpreted by a store: the Postgres store renders it into SQL, the
//! in-memory store evaluates it with [`ContributorListQuery::apply`]. Both
//! follow the same composition order:
//!
//! 1. count the whole collection (`total`)
//! 2. filter by id equality and case-sensitive name substring
//! 3. count the filtered rows (`results`)
//! 4. order by the requested field, tie-broken by `id ASC`
//! 5. apply `LIMIT page_size` / `OFFSET (page_num - 1) * page_size`

use std::cmp::Ordering;
use std::str::FromStr;

use crate::core::error::AppError;
use crate::features::contributors::models::Contributor;

/// Page window. Zero means "unbounded" for `page_size` and "first page" for `page_num`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: u32,
    pub page_num: u32,
}

impl Pagination {
    pub fn new(page_size: u32, page_num: u32) -> Self {
        Self {
            page_size,
            page_num,
        }
    }

    /// SQL LIMIT, if any
    pub fn limit(&self) -> Option<i64> {
        (self.page_size > 0).then(|| i64::from(self.page_size))
    }

    /// SQL OFFSET, only when both page size and page number are set.
    /// Saturates instead of overflowing for absurd page numbers.
    pub fn offset(&self) -> Option<i64> {
        if self.page_size > 0 && self.page_num > 0 {
            Some(i64::from(self.page_num - 1).saturating_mul(i64::from(self.page_size)))
        } else {
            None
        }
    }
}

/// Columns a listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Link,
    Image,
}

impl SortField {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Link => "link",
            SortField::Image => "image",
        }
    }

    /// Ascending comparison with Postgres semantics (NULLs sort last)
    fn compare(&self, a: &Contributor, b: &Contributor) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Link => nulls_last(&a.profile_link, &b.profile_link),
            SortField::Image => nulls_last(&a.image_link, &b.image_link),
        }
    }
}

fn nulls_last(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "link" => Ok(SortField::Link),
            "image" => Ok(SortField::Image),
            _ => Err(AppError::Validation(format!(
                "sort must be one of: id, name, link, image (got '{}')",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(AppError::Validation(format!(
                "order must be 'asc' or 'desc' (got '{}')",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributorSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ContributorSort {
    /// Parses the raw `sort`/`order` pair. An empty `sort` means "unsorted" and
    /// `order` is then ignored.
    pub fn parse(sort: &str, order: &str) -> Result<Option<Self>, AppError> {
        if sort.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            field: sort.parse()?,
            direction: order.parse()?,
        }))
    }

    fn compare(&self, a: &Contributor, b: &Contributor) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Optional row filters; all present filters must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorFilter {
    pub id: Option<i64>,
    /// Case-sensitive literal substring of `name`
    pub name: Option<String>,
}

impl ContributorFilter {
    /// Parses the raw `searchbyid`/`searchbyname` values; empty strings mean "no filter"
    pub fn parse(
        search_by_id: Option<&str>,
        search_by_name: Option<&str>,
    ) -> Result<Self, AppError> {
        let id = match search_by_id.filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
                AppError::Validation(format!("searchbyid must be an integer (got '{}')", raw))
            })?),
            None => None,
        };

        let name = search_by_name.filter(|s| !s.is_empty()).map(str::to_string);

        Ok(Self { id, name })
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }

    pub fn matches(&self, contributor: &Contributor) -> bool {
        self.id.is_none_or(|id| contributor.id == id)
            && self
                .name
                .as_deref()
                .is_none_or(|name| contributor.name.contains(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorListQuery {
    pub pagination: Pagination,
    pub sort: Option<ContributorSort>,
    pub filter: ContributorFilter,
}

/// One page of a listing plus the collection counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorPage {
    pub items: Vec<Contributor>,
    /// Rows in the collection before filtering
    pub total: i64,
    /// Rows left after filtering, before pagination
    pub results: i64,
}

impl ContributorListQuery {
    /// Row ordering with the `id ASC` tie-break
    pub fn compare(&self, a: &Contributor, b: &Contributor) -> Ordering {
        let primary = self
            .sort
            .map(|sort| sort.compare(a, b))
            .unwrap_or(Ordering::Equal);
        primary.then_with(|| a.id.cmp(&b.id))
    }

    /// Evaluates the query over an in-memory collection
    pub fn apply<'a, I>(&self, rows: I) -> ContributorPage
    where
        I: IntoIterator<Item = &'a Contributor>,
    {
        let mut total = 0i64;
        let mut matched: Vec<Contributor> = Vec::new();
        for row in rows {
            total += 1;
            if self.filter.matches(row) {
                matched.push(row.clone());
            }
        }
        let results = matched.len() as i64;

        matched.sort_by(|a, b| self.compare(a, b));

        let offset = self.pagination.offset().unwrap_or(0) as usize;
        let items = match self.pagination.limit() {
            Some(limit) => matched
                .into_iter()
                .skip(offset)
                .take(limit as usize)
                .collect(),
            None => matched.into_iter().skip(offset).collect(),
        };

        ContributorPage {
            items,
            total,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(id: i64, name: &str) -> Contributor {
        Contributor {
            id,
            name: name.to_string(),
            profile_link: None,
            image_link: None,
        }
    }

    fn roster() -> Vec<Contributor> {
        vec![
            contributor(1, "Alice"),
            contributor(2, "Bob"),
            contributor(3, "alison"),
            contributor(4, "Carol"),
            contributor(5, "Bob"),
        ]
    }

    #[test]
    fn test_pagination_window() {
        assert_eq!(Pagination::new(0, 0).limit(), None);
        assert_eq!(Pagination::new(0, 0).offset(), None);
        assert_eq!(Pagination::new(0, 3).offset(), None);
        assert_eq!(Pagination::new(10, 0).limit(), Some(10));
        assert_eq!(Pagination::new(10, 0).offset(), None);
        assert_eq!(Pagination::new(10, 1).offset(), Some(0));
        assert_eq!(Pagination::new(10, 3).offset(), Some(20));
    }

    #[test]
    fn test_pagination_offset_does_not_overflow() {
        let page = Pagination::new(u32::MAX, u32::MAX);
        assert_eq!(page.offset(), Some(i64::MAX));
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(ContributorSort::parse("", "desc").unwrap(), None);
        assert_eq!(
            ContributorSort::parse("Name", "").unwrap(),
            Some(ContributorSort {
                field: SortField::Name,
                direction: SortDirection::Asc,
            })
        );
        assert_eq!(
            ContributorSort::parse("id", "DESC").unwrap(),
            Some(ContributorSort {
                field: SortField::Id,
                direction: SortDirection::Desc,
            })
        );
    }

    #[test]
    fn test_sort_parse_rejects_unknown_columns() {
        assert!(matches!(
            ContributorSort::parse("name; DROP TABLE contributors", "asc"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            ContributorSort::parse("name", "sideways"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(
            ContributorFilter::parse(Some(""), Some("")).unwrap(),
            ContributorFilter::default()
        );
        assert_eq!(
            ContributorFilter::parse(Some("7"), Some("li")).unwrap(),
            ContributorFilter {
                id: Some(7),
                name: Some("li".to_string()),
            }
        );
        assert!(matches!(
            ContributorFilter::parse(Some("seven"), None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_second_page_sorted_by_name() {
        let rows = vec![contributor(1, "Alice"), contributor(2, "Bob")];
        let query = ContributorListQuery {
            pagination: Pagination::new(1, 2),
            sort: ContributorSort::parse("name", "asc").unwrap(),
            filter: ContributorFilter::default(),
        };

        let page = query.apply(&rows);

        assert_eq!(page.items, vec![contributor(2, "Bob")]);
        assert_eq!(page.total, 2);
        assert_eq!(page.results, 2);
    }

    #[test]
    fn test_name_filter_is_case_sensitive_substring() {
        let rows = roster();
        let query = ContributorListQuery {
            filter: ContributorFilter {
                id: None,
                name: Some("li".to_string()),
            },
            ..Default::default()
        };

        let page = query.apply(&rows);

        let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "alison"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.results, 2);

        let upper = ContributorListQuery {
            filter: ContributorFilter {
                id: None,
                name: Some("Ali".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(upper.apply(&rows).results, 1);
    }

    #[test]
    fn test_name_filter_has_no_wildcards() {
        let rows = vec![contributor(1, "100% Bob"), contributor(2, "Bob")];
        let query = ContributorListQuery {
            filter: ContributorFilter {
                id: None,
                name: Some("%".to_string()),
            },
            ..Default::default()
        };

        assert_eq!(query.apply(&rows).items, vec![contributor(1, "100% Bob")]);
    }

    #[test]
    fn test_id_filter_returns_at_most_one() {
        let rows = roster();
        let hit = ContributorListQuery {
            filter: ContributorFilter {
                id: Some(3),
                name: None,
            },
            ..Default::default()
        };
        let miss = ContributorListQuery {
            filter: ContributorFilter {
                id: Some(42),
                name: None,
            },
            ..Default::default()
        };

        assert_eq!(hit.apply(&rows).items, vec![contributor(3, "alison")]);
        assert!(miss.apply(&rows).items.is_empty());
        assert_eq!(miss.apply(&rows).total, 5);
    }

    #[test]
    fn test_filters_combine() {
        let rows = roster();
        let query = ContributorListQuery {
            filter: ContributorFilter {
                id: Some(2),
                name: Some("Al".to_string()),
            },
            ..Default::default()
        };

        let page = query.apply(&rows);
        assert!(page.items.is_empty());
        assert_eq!(page.results, 0);
    }

    #[test]
    fn test_ties_break_by_id() {
        let rows = roster();
        let query = ContributorListQuery {
            sort: ContributorSort::parse("name", "desc").unwrap(),
            ..Default::default()
        };

        let ids: Vec<_> = query.apply(&rows).items.iter().map(|c| c.id).collect();
        // "alison" > "Carol" > "Bob" (2, 5) > "Alice" in byte order
        assert_eq!(ids, vec![3, 4, 2, 5, 1]);
    }

    #[test]
    fn test_nulls_sort_last_ascending() {
        let mut with_link = contributor(1, "A");
        with_link.profile_link = Some("https://example.com/a".to_string());
        let rows = vec![contributor(2, "B"), with_link];

        let asc = ContributorListQuery {
            sort: ContributorSort::parse("link", "asc").unwrap(),
            ..Default::default()
        };
        let desc = ContributorListQuery {
            sort: ContributorSort::parse("link", "desc").unwrap(),
            ..Default::default()
        };

        let asc_ids: Vec<_> = asc.apply(&rows).items.iter().map(|c| c.id).collect();
        let desc_ids: Vec<_> = desc.apply(&rows).items.iter().map(|c| c.id).collect();
        assert_eq!(asc_ids, vec![1, 2]);
        assert_eq!(desc_ids, vec![2, 1]);
    }

    #[test]
    fn test_pages_are_contiguous_windows() {
        let rows = roster();
        let sort = ContributorSort::parse("name", "asc").unwrap();
        let full = ContributorListQuery {
            sort,
            ..Default::default()
        }
        .apply(&rows)
        .items;

        for page_size in 1..=6u32 {
            let mut stitched = Vec::new();
            for page_num in 1..=6u32 {
                let page = ContributorListQuery {
                    pagination: Pagination::new(page_size, page_num),
                    sort,
                    filter: ContributorFilter::default(),
                }
                .apply(&rows);

                assert!(page.items.len() <= page_size as usize);
                let start = ((page_num - 1) * page_size) as usize;
                let end = (start + page_size as usize).min(full.len());
                let expected = if start < full.len() {
                    full[start..end].to_vec()
                } else {
                    Vec::new()
                };
                assert_eq!(page.items, expected);
                stitched.extend(page.items);
            }
            assert_eq!(stitched, full);
        }
    }

    #[test]
    fn test_page_num_zero_is_first_page() {
        let rows = roster();
        let query = ContributorListQuery {
            pagination: Pagination::new(2, 0),
            ..Default::default()
        };

        let ids: Vec<_> = query.apply(&rows).items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
