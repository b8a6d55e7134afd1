//! Paginated query engine shared by every list endpoint.
//!
//! The pipeline is always sort-then-slice: callers compute [`PagingInfo`]
//! against the total item count (validating the requested page), apply the
//! entity's static sort-key table with [`apply_sort`], then take one page
//! with [`paginate`]. Sort keys are small integers resolved through a fixed
//! per-entity table rather than raw field names from the client.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagingError {
    #[error("page {page} is out of range (valid pages: 1..={total_pages})")]
    OutOfRange { page: i64, total_pages: i64 },
}

/// Paging metadata for one windowed view over a collection.
///
/// `total_pages` is 0 when the collection is empty; page validation is
/// skipped in that case since any page yields an empty slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct PagingInfo {
    pub current_page: i64,
    pub items_per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub sort: i32,
    pub ascending: bool,
}

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Deserialize, TS)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_sort")]
    pub sort: i32,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_page() -> i64 {
    1
}

fn default_sort() -> i32 {
    1
}

fn default_ascending() -> bool {
    true
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            sort: 1,
            ascending: true,
        }
    }
}

/// One page of results plus the metadata needed to render navigation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub paging: PagingInfo,
}

/// Comparator resolved from an entity's sort-key table.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Static `sort key -> comparator` table for one entity type.
///
/// Key 1 is the primary key by convention. Unknown keys resolve to `None`
/// and the collection keeps its natural (insertion/primary-key) order.
pub trait SortSelector: Sized {
    fn comparator(sort: i32) -> Option<Comparator<Self>>;
}

/// Validate the requested page and derive paging metadata.
///
/// Pure computation. Fails with [`PagingError::OutOfRange`] only when the
/// collection is non-empty and the page falls outside `1..=total_pages`;
/// an empty collection accepts any page (the result set is simply empty).
pub fn compute_paging_info(
    total_items: i64,
    current_page: i64,
    items_per_page: i64,
    sort: i32,
    ascending: bool,
) -> Result<PagingInfo, PagingError> {
    debug_assert!(items_per_page > 0, "items_per_page comes from config");
    let total_pages = (total_items + items_per_page - 1) / items_per_page;
    if total_items > 0 && (current_page < 1 || current_page > total_pages) {
        return Err(PagingError::OutOfRange {
            page: current_page,
            total_pages,
        });
    }
    Ok(PagingInfo {
        current_page,
        items_per_page,
        total_items,
        total_pages,
        sort,
        ascending,
    })
}

/// Order a collection by the entity's sort-key table.
///
/// Unknown sort keys leave the input order untouched. The sort is stable
/// and descending order flips the comparator, so ties keep their natural
/// order in both directions.
pub fn apply_sort<T: SortSelector>(mut items: Vec<T>, sort: i32, ascending: bool) -> Vec<T> {
    if let Some(cmp) = T::comparator(sort) {
        if ascending {
            items.sort_by(cmp);
        } else {
            items.sort_by(|a, b| cmp(b, a));
        }
    }
    items
}

/// Take one page from an already-ordered collection.
///
/// Callers must have validated the page with [`compute_paging_info`] first;
/// slicing is checked-then-act.
pub fn paginate<T>(items: Vec<T>, current_page: i64, items_per_page: i64) -> Vec<T> {
    // An empty collection accepts any page, so the offset math must not
    // overflow even for absurd page numbers.
    let skip = current_page
        .saturating_sub(1)
        .max(0)
        .saturating_mul(items_per_page);
    items
        .into_iter()
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(items_per_page as usize)
        .collect()
}

/// Total ordering for optional floats: `None` sorts first, values compare
/// with `total_cmp`.
pub fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        label: &'static str,
        weight: Option<f64>,
    }

    impl Row {
        fn new(id: i64, label: &'static str, weight: Option<f64>) -> Self {
            Self { id, label, weight }
        }
    }

    impl SortSelector for Row {
        fn comparator(sort: i32) -> Option<Comparator<Self>> {
            match sort {
                1 => Some(|a, b| a.id.cmp(&b.id)),
                2 => Some(|a, b| a.label.cmp(b.label)),
                3 => Some(|a, b| cmp_opt_f64(a.weight, b.weight)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new(3, "cabbage", Some(1.5)),
            Row::new(1, "beet", None),
            Row::new(7, "apple", Some(0.2)),
            Row::new(5, "dill", Some(0.1)),
            Row::new(2, "endive", Some(0.4)),
            Row::new(6, "fennel", Some(2.0)),
            Row::new(4, "garlic", Some(0.05)),
        ]
    }

    #[test]
    fn empty_collection_accepts_any_page() {
        for page in [-3, 0, 1, 5, 9999] {
            let info = compute_paging_info(0, page, 3, 1, true).unwrap();
            assert_eq!(info.total_pages, 0);
            assert_eq!(info.total_items, 0);
        }
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(compute_paging_info(7, 1, 3, 1, true).unwrap().total_pages, 3);
        assert_eq!(compute_paging_info(6, 1, 3, 1, true).unwrap().total_pages, 2);
        assert_eq!(compute_paging_info(1, 1, 3, 1, true).unwrap().total_pages, 1);
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        assert_eq!(
            compute_paging_info(7, 4, 3, 1, true),
            Err(PagingError::OutOfRange {
                page: 4,
                total_pages: 3
            })
        );
        assert!(compute_paging_info(7, 0, 3, 1, true).is_err());
        assert!(compute_paging_info(7, -1, 3, 1, true).is_err());
        assert!(compute_paging_info(7, 3, 3, 1, true).is_ok());
    }

    #[test]
    fn seven_items_three_per_page() {
        let info = compute_paging_info(7, 1, 3, 1, true).unwrap();
        assert_eq!(info.total_pages, 3);

        let sorted = apply_sort(rows(), 1, true);
        let first = paginate(sorted.clone(), 1, 3);
        assert_eq!(
            first.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        let last = paginate(sorted, 3, 3);
        assert_eq!(last.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn paginate_on_empty_collection_is_empty() {
        let slice = paginate(Vec::<Row>::new(), 5, 3);
        assert!(slice.is_empty());
    }

    #[test]
    fn huge_page_on_empty_collection_is_empty() {
        let info = compute_paging_info(0, i64::MAX, 3, 1, true).unwrap();
        assert_eq!(info.total_pages, 0);
        let slice = paginate(Vec::<Row>::new(), i64::MAX, 3);
        assert!(slice.is_empty());
        let slice = paginate(Vec::<Row>::new(), i64::MIN, 3);
        assert!(slice.is_empty());
    }

    #[test]
    fn unknown_sort_key_keeps_natural_order() {
        let original = rows();
        let sorted = apply_sort(rows(), 99, true);
        assert_eq!(sorted, original);
        let sorted = apply_sort(rows(), 99, false);
        assert_eq!(sorted, original);
    }

    #[test]
    fn descending_is_reverse_of_ascending_without_ties() {
        // ids are unique so the strict-total-order property applies
        let mut asc = apply_sort(rows(), 1, true);
        let desc = apply_sort(rows(), 1, false);
        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn optional_floats_sort_none_first() {
        let sorted = apply_sort(rows(), 3, true);
        assert_eq!(sorted[0].weight, None);
        assert_eq!(sorted[1].weight, Some(0.05));
        assert_eq!(sorted.last().unwrap().weight, Some(2.0));
    }

    #[test]
    fn ties_keep_natural_order_in_both_directions() {
        let items = vec![
            Row::new(1, "same", Some(1.0)),
            Row::new(2, "same", Some(1.0)),
            Row::new(3, "same", Some(1.0)),
        ];
        let asc = apply_sort(items.clone(), 2, true);
        assert_eq!(asc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        let desc = apply_sort(items, 2, false);
        assert_eq!(desc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn paginate_is_idempotent_for_identical_arguments() {
        let sorted = apply_sort(rows(), 2, true);
        let a = paginate(sorted.clone(), 2, 3);
        let b = paginate(sorted, 2, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn list_query_defaults() {
        let q: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.sort, 1);
        assert!(q.ascending);
    }
}
