//! Sort and pagination directives and the utilities that apply them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

/// Caller-supplied sort directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sort {
    /// Attribute to sort by. Table listings always sort by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

impl Sort {
    pub fn ascending() -> Self {
        Self::default()
    }

    pub fn descending() -> Self {
        Self {
            sort_by: None,
            order: SortOrder::Descending,
        }
    }
}

/// Caller-supplied page directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Pageable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Pageable {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0) as usize
    }
}

/// Stable sort of `items` using `compare`, reversed for descending order.
pub fn sort<T, F>(items: &mut [T], sort: &Sort, compare: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    match sort.order {
        SortOrder::Ascending => items.sort_by(|a, b| compare(a, b)),
        SortOrder::Descending => items.sort_by(|a, b| compare(b, a)),
    }
}

/// Slice `items` to `[offset, offset + limit)`.
///
/// No directive returns `items` unchanged. An offset past the end yields an
/// empty vector.
pub fn paginate<T>(items: Vec<T>, pageable: Option<&Pageable>) -> Vec<T> {
    let Some(page) = pageable else {
        return items;
    };
    let start = page.offset();
    if start >= items.len() {
        return Vec::new();
    }
    let end = match page.limit {
        Some(limit) => start.saturating_add(limit as usize).min(items.len()),
        None => items.len(),
    };
    items.into_iter().skip(start).take(end - start).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<&'static str> {
        vec!["a", "b", "c", "d", "e"]
    }

    #[test]
    fn paginate_returns_requested_window() {
        let page = Pageable::new(2, 2);
        assert_eq!(paginate(names(), Some(&page)), vec!["c", "d"]);
    }

    #[test]
    fn paginate_past_end_is_empty() {
        let page = Pageable::new(10, 2);
        assert!(paginate(names(), Some(&page)).is_empty());
    }

    #[test]
    fn paginate_truncates_last_page() {
        let page = Pageable::new(4, 10);
        assert_eq!(paginate(names(), Some(&page)), vec!["e"]);
    }

    #[test]
    fn paginate_without_limit_skips_offset_only() {
        let page = Pageable {
            offset: Some(3),
            limit: None,
        };
        assert_eq!(paginate(names(), Some(&page)), vec!["d", "e"]);
        assert_eq!(paginate(names(), None), names());
    }

    #[test]
    fn sort_descending_reverses_comparator() {
        let mut items = vec!["b", "a", "c"];
        sort(&mut items, &Sort::descending(), |a, b| a.cmp(b));
        assert_eq!(items, vec!["c", "b", "a"]);
    }

    #[test]
    fn sort_is_stable() {
        let mut items = vec![("x", 1), ("a", 2), ("x", 0)];
        sort(&mut items, &Sort::ascending(), |a, b| a.0.cmp(b.0));
        assert_eq!(items, vec![("a", 2), ("x", 1), ("x", 0)]);
    }

    #[test]
    fn sort_order_accepts_short_aliases() {
        let sort: Sort = serde_yaml::from_str("order: desc").unwrap();
        assert_eq!(sort.order, SortOrder::Descending);
    }
}
