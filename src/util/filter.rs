//! Search, status filter and pagination for admin list screens.

use serde::{Deserialize, Serialize};

/// Fields an admin can search a record by.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
    fn status_str(&self) -> Option<&str>;
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilter {
    /// Case-insensitive substring matched against `search_fields`
    pub q: Option<String>,
    /// Exact status, case-insensitive; `all` disables the filter
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?,
            total: self.total,
            page: self.page,
            limit: self.limit,
        })
    }
}

impl ListFilter {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    fn query(&self) -> Option<String> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()).map(str::to_lowercase)
    }

    fn status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        let status_ok = match self.status() {
            Some(wanted) => item.status_str().is_some_and(|s| s.eq_ignore_ascii_case(wanted)),
            None => true,
        };
        let query_ok = match self.query() {
            Some(q) => item.search_fields().iter().any(|f| f.to_lowercase().contains(&q)),
            None => true,
        };
        status_ok && query_ok
    }

    /// Filters `items` (already ordered) and cuts out the requested page.
    pub fn apply<T: Searchable>(&self, items: Vec<T>) -> Page<T> {
        let matching: Vec<T> = items.into_iter().filter(|i| self.matches(i)).collect();
        let total = matching.len();
        let (page, limit) = (self.page(), self.limit());
        let skip = ((page - 1) as usize).saturating_mul(limit as usize);
        Page {
            items: matching.into_iter().skip(skip).take(limit as usize).collect(),
            total,
            page,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        email: &'static str,
        status: &'static str,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.email]
        }
        fn status_str(&self) -> Option<&str> {
            Some(self.status)
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Alice Smith", email: "alice@acme.test", status: "new" },
            Row { name: "Bob Jones", email: "bob@SMITHS.test", status: "quoted" },
            Row { name: "Carol White", email: "carol@white.test", status: "new" },
            Row { name: "Dan Smithers", email: "dan@x.test", status: "declined" },
        ]
    }

    fn filter(q: Option<&str>, status: Option<&str>) -> ListFilter {
        ListFilter {
            q: q.map(str::to_string),
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let page = filter(Some("SMITH"), None).apply(rows());
        let names: Vec<_> = page.items.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Alice Smith", "Bob Jones", "Dan Smithers"]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_status_and_query_combine() {
        let page = filter(Some("smith"), Some("NEW")).apply(rows());
        assert_eq!(page.items, vec![rows()[0].clone()]);
    }

    #[test]
    fn test_blank_query_and_all_status_match_everything() {
        let page = filter(Some("   "), Some("all")).apply(rows());
        assert_eq!(page.total, 4);
        assert_eq!(page.items, rows());
    }

    #[test]
    fn test_exact_subset_against_brute_force() {
        for q in ["", "a", "test", "white", "zzz"] {
            for status in [None, Some("new"), Some("quoted")] {
                let f = filter(Some(q), status);
                let expected: Vec<Row> = rows()
                    .into_iter()
                    .filter(|r| {
                        (r.name.to_lowercase().contains(q) || r.email.to_lowercase().contains(q))
                            && status.map_or(true, |s| r.status == s)
                    })
                    .collect();
                assert_eq!(f.apply(rows()).items, expected, "q={q:?} status={status:?}");
            }
        }
    }

    #[test]
    fn test_pagination() {
        let f = ListFilter { page: Some(2), limit: Some(3), ..Default::default() };
        let page = f.apply(rows());
        assert_eq!(page.total, 4);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Dan Smithers");

        let f = ListFilter { page: Some(0), limit: Some(0), ..Default::default() };
        assert_eq!(f.page(), 1);
        assert_eq!(f.limit(), 1);
    }
}
