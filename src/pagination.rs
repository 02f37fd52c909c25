use serde::Serialize;

use crate::domain::query::{ListResult, Pagination};

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = left_edge.saturating_add(1).min(last_page.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page.saturating_add(1));

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page links shown under the table. Pages are 1-based; `None` marks a gap.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pager {
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

impl Pager {
    pub fn new(result: &ListResult, pagination: Pagination) -> Self {
        let page_count = result.page_count(pagination.page_size);
        let page = pagination.page_index.saturating_add(1);

        Self {
            pages: get_pages(page_count, page, 2, 2, 4, 2),
            page,
            page_count,
            total: result.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_page_counts_list_every_page() {
        assert_eq!(get_pages(3, 1, 2, 2, 4, 2), vec![Some(1), Some(2), Some(3)]);
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn large_page_counts_insert_gaps() {
        let pages = get_pages(30, 15, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(13),
                Some(14),
                Some(15),
                Some(16),
                Some(17),
                Some(18),
                Some(19),
                None,
                Some(29),
                Some(30),
            ]
        );
    }

    #[test]
    fn huge_current_page_does_not_overflow() {
        assert_eq!(
            get_pages(3, usize::MAX, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3)]
        );

        let pager = Pager::new(
            &ListResult::new(Vec::new(), 40),
            Pagination {
                page_index: usize::MAX,
                page_size: 12,
            },
        );
        assert_eq!(pager.page, usize::MAX);
        assert_eq!(pager.pages, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn pager_is_one_based() {
        let result = ListResult::new(Vec::new(), 25);
        let pager = Pager::new(
            &result,
            Pagination {
                page_index: 1,
                page_size: 12,
            },
        );
        assert_eq!(pager.page, 2);
        assert_eq!(pager.page_count, 3);
        assert_eq!(pager.total, 25);
    }
}
