use crate::domain::CaseRecord;

/// Filter criteria for the case list views. All matching is case-insensitive;
/// `search` is a substring match across the record's visible fields, the rest
/// are exact matches against a single field.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub search: Option<String>,
    pub agent: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl CaseFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.agent.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    fn matches(&self, record: &CaseRecord) -> bool {
        if let Some(agent) = &self.agent {
            if !record.agent.eq_ignore_ascii_case(agent) {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if !record.priority.eq_ignore_ascii_case(priority) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if !record.status.eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !record_matches_search(record, &needle) {
                return false;
            }
        }
        true
    }
}

fn record_matches_search(record: &CaseRecord, needle: &str) -> bool {
    let fields = [
        &record.id,
        &record.date,
        &record.agent,
        &record.priority,
        &record.status,
    ];
    if fields.iter().any(|f| f.to_lowercase().contains(needle)) {
        return true;
    }
    record
        .raw_columns
        .values()
        .any(|v| v.to_lowercase().contains(needle))
}

/// Apply a filter over the record set, preserving order.
pub fn filter_cases<'a>(records: &'a [CaseRecord], filter: &CaseFilter) -> Vec<&'a CaseRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// One page of results plus enough shape to render pagination controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice out one page of an already-filtered list. Pages are 1-based; a page
/// number past the end is clamped to the last page so a shrinking result set
/// never strands the caller on an empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}
