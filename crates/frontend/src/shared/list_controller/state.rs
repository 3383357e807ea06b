use crate::shared::list_utils::{filter_items, ListFilter};
use contracts::domain::common::Entity;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages for `count` items, never below 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Index range of a 1-based page, clipped to `count`
pub fn page_range(page: usize, page_size: usize, count: usize) -> std::ops::Range<usize> {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(count);
    let end = start.saturating_add(size).min(count);
    start..end
}

/// Everything a list page renders, kept in a single signal.
///
/// `current_page` is 1-based and stays within `1..=total_pages` after every
/// mutation the controller performs.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T: Entity> {
    pub items: Vec<T>,
    pub filter: ListFilter,
    pub current_page: usize,
    pub page_size: usize,
    /// Set after the first successful load
    pub is_loaded: bool,
}

impl<T: Entity> Default for ListState<T> {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl<T: Entity> ListState<T> {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            filter: ListFilter::default(),
            current_page: 1,
            page_size: page_size.max(1),
            is_loaded: false,
        }
    }

    pub fn filtered<'a>(&'a self, fields: &[&str]) -> Vec<&'a T> {
        filter_items(&self.items, &self.filter, fields)
    }

    pub fn filtered_count(&self, fields: &[&str]) -> usize {
        self.filtered(fields).len()
    }

    pub fn total_pages(&self, fields: &[&str]) -> usize {
        total_pages(self.filtered_count(fields), self.page_size)
    }

    pub fn visible(&self, fields: &[&str]) -> Vec<T> {
        let filtered = self.filtered(fields);
        filtered[page_range(self.current_page, self.page_size, filtered.len())]
            .iter()
            .map(|item| (*item).clone())
            .collect()
    }

    /// Pull `current_page` back into `1..=total_pages`
    pub fn clamp_page(&mut self, fields: &[&str]) {
        let last = self.total_pages(fields);
        self.current_page = self.current_page.clamp(1, last);
    }

    /// Replace the items after a load; the view goes back to page 1
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
        self.is_loaded = true;
    }

    pub fn find(&self, id: contracts::domain::common::EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_service_category::entity::ServiceCategory;

    fn state_with(n: usize) -> ListState<ServiceCategory> {
        let mut state = ListState::default();
        state.replace_items(
            (1..=n)
                .map(|i| ServiceCategory {
                    id: Some(i as i64),
                    description: format!("Categoría {}", i),
                })
                .collect(),
        );
        state
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 10), 3);
    }

    #[test]
    fn test_page_range_last_page_is_short() {
        assert_eq!(page_range(1, 10, 23), 0..10);
        assert_eq!(page_range(3, 10, 23), 20..23);
        assert_eq!(page_range(5, 10, 23), 23..23);
    }

    #[test]
    fn test_visible_slice() {
        let mut state = state_with(23);
        state.current_page = 3;
        let visible = state.visible(&["description"]);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].id, Some(21));
    }

    #[test]
    fn test_clamp_after_filter_shrinks_results() {
        let mut state = state_with(23);
        state.current_page = 3;
        state.filter.text = "Categoría 1".into();
        // 1, 10..=19 -> 11 items, 2 pages
        state.clamp_page(&["description"]);
        assert_eq!(state.current_page, 2);

        state.filter.text = "nada".into();
        state.clamp_page(&["description"]);
        assert_eq!(state.current_page, 1);
    }
}
