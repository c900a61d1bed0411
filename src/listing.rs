//! Derives the visible page of the student table.
//!
//! Everything here is a pure function of its arguments: the collection is
//! only borrowed, and calling [`derive_page`] twice with the same inputs
//! yields equal pages.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::models::Student;

/// One page of the filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage<'a> {
    /// Requested page, 1-based. May lie past `total_pages`.
    pub page: usize,
    pub total_pages: usize,
    /// Number of students matching the search term across all pages.
    pub total_matches: usize,
    pub rows: Vec<&'a Student>,
}

impl ListPage<'_> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// True when `needle` (already lower-cased) occurs in the name or course.
pub fn matches_search(student: &Student, needle: &str) -> bool {
    student.name.to_lowercase().contains(needle) || student.course.to_lowercase().contains(needle)
}

/// Students whose name or course contains `search_term`, ignoring case, in
/// collection order. An empty term keeps everyone.
pub fn filter_students<'a>(collection: &'a [Student], search_term: &str) -> Vec<&'a Student> {
    let needle = search_term.to_lowercase();
    collection
        .iter()
        .filter(|student| matches_search(student, &needle))
        .collect()
}

pub fn total_pages(matches: usize, page_size: NonZeroUsize) -> usize {
    matches.div_ceil(page_size.get())
}

pub fn derive_page<'a>(
    collection: &'a [Student],
    search_term: &str,
    page: usize,
    page_size: NonZeroUsize,
) -> ListPage<'a> {
    let filtered = filter_students(collection, search_term);
    let total_matches = filtered.len();

    // Page 0 and pages past the end both come out empty.
    let rows = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size.get()))
        .filter(|start| *start < total_matches)
        .map(|start| {
            let end = start.saturating_add(page_size.get()).min(total_matches);
            filtered[start..end].to_vec()
        })
        .unwrap_or_default();

    ListPage {
        page,
        total_pages: total_pages(total_matches, page_size),
        total_matches,
        rows,
    }
}
