//! Query pipeline
//!
//! Filter by name, family and title, then sort, then paginate. Each stage
//! works on the output of the previous one.

use std::cmp::Reverse;

use crate::models::{Character, Pagination};
use crate::query::{CharacterQuery, SortField, SortOrder};

/// Output of [`run_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Matching characters for the requested page, or all matches when unpaginated
    pub items: Vec<Character>,
    /// Present only when pagination was requested
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Id(i64),
    Text(String),
}

/// Runs `query` over `all` without modifying it.
pub fn run_query(all: &[Character], query: &CharacterQuery) -> QueryResult {
    let mut matches: Vec<&Character> = all.iter().collect();

    if let Some(q) = &query.q {
        matches.retain(|c| c.display_name().to_lowercase().contains(q.as_str()));
    }
    if let Some(family) = &query.family {
        matches.retain(|c| lowered(&c.family) == *family);
    }
    if let Some(title) = &query.title {
        matches.retain(|c| lowered(&c.title).contains(title.as_str()));
    }

    if let Some(field) = query.sort_by {
        // Both sorts are stable, so ties keep their filtered order
        match query.sort_order {
            SortOrder::Asc => matches.sort_by_cached_key(|c| sort_key(c, field)),
            SortOrder::Desc => matches.sort_by_cached_key(|c| Reverse(sort_key(c, field))),
        }
    }

    let Some(window) = query.page_request() else {
        return QueryResult {
            items: matches.into_iter().cloned().collect(),
            pagination: None,
        };
    };

    let total = matches.len();
    let items = matches
        .into_iter()
        .skip(window.offset())
        .take(window.page_size)
        .cloned()
        .collect();

    QueryResult {
        items,
        pagination: Some(Pagination {
            total,
            page: window.page,
            page_size: window.page_size,
            total_pages: total.div_ceil(window.page_size).max(1),
        }),
    }
}

fn lowered(field: &Option<String>) -> String {
    field.as_deref().unwrap_or_default().to_lowercase()
}

fn sort_key(c: &Character, field: SortField) -> SortKey {
    match field {
        SortField::Id => SortKey::Id(c.id),
        SortField::FullName => SortKey::Text(c.display_name().trim().to_lowercase()),
        SortField::FirstName => SortKey::Text(lowered(&c.first_name)),
        SortField::LastName => SortKey::Text(lowered(&c.last_name)),
        SortField::Title => SortKey::Text(lowered(&c.title)),
        SortField::Family => SortKey::Text(lowered(&c.family)),
    }
}
