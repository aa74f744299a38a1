//! Query Module
//!
//! Turns raw query-string pairs into a typed [`CharacterQuery`] and runs it
//! over a normalized character list: filter, then sort, then paginate.

mod params;
mod pipeline;


pub use params::{
    parse_int_prefix, CharacterQuery, PageRequest, SortField, SortOrder, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use pipeline::{run_query, QueryResult};
