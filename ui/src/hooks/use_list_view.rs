//! Client-side search/filter/paginate over an already-fetched collection,
//! for lists small enough to keep entirely in memory (the customer list).

use std::rc::Rc;
use yew::prelude::*;

/// Sentinel meaning "no filter" for the status and tag predicates.
pub const ALL_FILTER: &str = "all";

pub const LIST_PAGE_SIZE: usize = 8;

/// Field accessors for the filtered collection.
pub struct ListViewSource<T> {
    /// Concatenated searchable text (two or more fields).
    pub search_text: Rc<dyn Fn(&T) -> String>,
    pub status_of: Rc<dyn Fn(&T) -> String>,
    pub tags_of: Rc<dyn Fn(&T) -> Vec<String>>,
}

pub struct ListViewHandle<T> {
    pub query: String,
    pub set_query: Callback<String>,
    pub status_filter: String,
    pub set_status_filter: Callback<String>,
    pub tag_filter: String,
    pub set_tag_filter: Callback<String>,
    /// The raw, unclamped page state.
    pub current_page: usize,
    pub set_current_page: Callback<usize>,
    pub filtered_items: Rc<Vec<T>>,
    pub paginated_items: Rc<Vec<T>>,
    pub total_pages: usize,
    pub reset_filters: Callback<()>,
    pub has_active_filters: bool,
}

/// Conjunctive filtering: free-text match AND status equality AND tag
/// membership. `"all"` disables the corresponding predicate.
pub fn filter_collection<T: Clone>(
    items: &[T],
    query: &str,
    status: &str,
    tag: &str,
    source: &ListViewSource<T>,
) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            if !needle.is_empty()
                && !(source.search_text)(item)
                    .to_lowercase()
                    .contains(&needle)
            {
                return false;
            }
            if status != ALL_FILTER && (source.status_of)(item) != status {
                return false;
            }
            if tag != ALL_FILTER
                && !(source.tags_of)(item).iter().any(|t| t == tag)
            {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

pub fn total_pages(filtered: usize, page_size: usize) -> usize {
    filtered.div_ceil(page_size)
}

/// 1-based page slice.
pub fn page_slice<T: Clone>(
    items: &[T],
    page: usize,
    page_size: usize,
) -> Vec<T> {
    items
        .iter()
        .skip(page.saturating_sub(1) * page_size)
        .take(page_size)
        .cloned()
        .collect()
}

/// Filters can shrink the result set below the stored page index. The
/// page used for slicing is clamped into range; the stored value is left
/// alone so widening the filters again restores the old position.
pub fn clamp_page(requested: usize, total: usize) -> usize {
    requested.clamp(1, total.max(1))
}

#[hook]
pub fn use_list_view<T>(
    items: Rc<Vec<T>>,
    source: ListViewSource<T>,
) -> ListViewHandle<T>
where
    T: Clone + PartialEq + 'static,
{
    let query = use_state(String::new);
    let status_filter = use_state(|| ALL_FILTER.to_string());
    let tag_filter = use_state(|| ALL_FILTER.to_string());
    let current_page = use_state(|| 1usize);

    // Filtering recomputes only when the collection or a predicate
    // changes; flipping pages must not re-run it.
    let filtered_items = use_memo(
        (
            items,
            (*query).clone(),
            (*status_filter).clone(),
            (*tag_filter).clone(),
        ),
        |(items, query, status, tag)| {
            filter_collection(items, query, status, tag, &source)
        },
    );

    let pages = total_pages(filtered_items.len(), LIST_PAGE_SIZE);
    let effective_page = clamp_page(*current_page, pages);

    let paginated_items = use_memo(
        (filtered_items.clone(), effective_page),
        |(filtered, page)| page_slice(filtered, *page, LIST_PAGE_SIZE),
    );

    let has_active_filters = !query.trim().is_empty()
        || *status_filter != ALL_FILTER
        || *tag_filter != ALL_FILTER;

    let reset_filters = {
        let query = query.clone();
        let status_filter = status_filter.clone();
        let tag_filter = tag_filter.clone();
        let current_page = current_page.clone();
        Callback::from(move |_| {
            query.set(String::new());
            status_filter.set(ALL_FILTER.to_string());
            tag_filter.set(ALL_FILTER.to_string());
            current_page.set(1);
        })
    };

    ListViewHandle {
        query: (*query).clone(),
        set_query: {
            let query = query.clone();
            Callback::from(move |value| query.set(value))
        },
        status_filter: (*status_filter).clone(),
        set_status_filter: {
            let status_filter = status_filter.clone();
            Callback::from(move |value| status_filter.set(value))
        },
        tag_filter: (*tag_filter).clone(),
        set_tag_filter: {
            let tag_filter = tag_filter.clone();
            Callback::from(move |value| tag_filter.set(value))
        },
        current_page: effective_page,
        set_current_page: {
            let current_page = current_page.clone();
            Callback::from(move |value| current_page.set(value))
        },
        filtered_items,
        paginated_items,
        total_pages: pages,
        reset_filters,
        has_active_filters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        phone: String,
        status: String,
        tags: Vec<String>,
    }

    fn row(name: &str, phone: &str, status: &str, tags: &[&str]) -> Row {
        Row {
            name: name.to_string(),
            phone: phone.to_string(),
            status: status.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn source() -> ListViewSource<Row> {
        ListViewSource {
            search_text: Rc::new(|r: &Row| format!("{}\n{}", r.name, r.phone)),
            status_of: Rc::new(|r: &Row| r.status.clone()),
            tags_of: Rc::new(|r: &Row| r.tags.clone()),
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                row(
                    &format!("Customer {i:02}"),
                    &format!("09{i:08}"),
                    if i % 4 == 0 { "inactive" } else { "active" },
                    if i % 2 == 0 { &["vip"] } else { &["retail"] },
                )
            })
            .collect()
    }

    #[test]
    fn twenty_items_make_three_pages_of_eight() {
        let items = rows(20);
        assert_eq!(total_pages(items.len(), LIST_PAGE_SIZE), 3);
        assert_eq!(page_slice(&items, 3, LIST_PAGE_SIZE).len(), 4);
    }

    #[test]
    fn filtering_shrinks_total_pages_without_extra_trigger() {
        let items = rows(20);
        let filtered =
            filter_collection(&items, "", "inactive", ALL_FILTER, &source());
        assert_eq!(filtered.len(), 5);
        assert_eq!(total_pages(filtered.len(), LIST_PAGE_SIZE), 1);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let items = vec![
            row("An", "0900", "active", &["vip"]),
            row("An", "0901", "active", &["retail"]),
            row("An", "0902", "inactive", &["vip"]),
            row("Binh", "0903", "active", &["vip"]),
        ];
        let filtered =
            filter_collection(&items, "an", "active", "vip", &source());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].phone, "0900");
    }

    #[test]
    fn all_sentinel_disables_a_predicate() {
        let items = rows(12);
        let unfiltered =
            filter_collection(&items, "", ALL_FILTER, ALL_FILTER, &source());
        assert_eq!(unfiltered.len(), 12);
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let items = vec![
            row("Tran Khoa", "0901234567", "active", &[]),
            row("Le Hanh", "0907654321", "active", &[]),
        ];
        let by_name =
            filter_collection(&items, "KHOA", ALL_FILTER, ALL_FILTER, &source());
        assert_eq!(by_name.len(), 1);
        let by_phone =
            filter_collection(&items, "7654", ALL_FILTER, ALL_FILTER, &source());
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Le Hanh");
    }

    #[test]
    fn page_is_clamped_when_filters_shrink_the_set() {
        // Stored page 3 of the unfiltered list; after filtering down to a
        // single page the slice must come from page 1.
        assert_eq!(clamp_page(3, 1), 1);
        // And an empty result set still yields a valid page.
        assert_eq!(clamp_page(3, 0), 1);
        // In range stays put.
        assert_eq!(clamp_page(2, 3), 2);
    }
}
