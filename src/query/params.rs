//! Query parameter parsing
//!
//! Nothing here rejects input. Every malformed or missing parameter falls
//! back to a defined default.

use std::collections::HashMap;

// == Constants ==
/// Page size used when `pageSize` is missing, unparseable or below 1
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound for `pageSize`
pub const MAX_PAGE_SIZE: usize = 100;

// == Sort Field ==
/// Character field a list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    FullName,
    FirstName,
    LastName,
    Title,
    Family,
}

impl SortField {
    /// Parses the wire name of a field. Names are case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "fullName" => Some(Self::FullName),
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "title" => Some(Self::Title),
            "family" => Some(Self::Family),
            _ => None,
        }
    }

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FullName => "fullName",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Title => "title",
            Self::Family => "family",
        }
    }
}

// == Sort Order ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` in any casing selects descending order; anything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.to_lowercase() == "desc" {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

// == Page Request ==
/// Effective page window after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number, at least 1
    pub page: usize,
    /// Items per page, in [1, MAX_PAGE_SIZE]
    pub page_size: usize,
}

impl PageRequest {
    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

// == Character Query ==
/// Parsed parameters of `GET /api/v1/characters`.
///
/// Text filters are stored trimmed and lowercased; an empty filter is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterQuery {
    /// Substring of the display name
    pub q: Option<String>,
    /// Exact family name
    pub family: Option<String>,
    /// Substring of the title
    pub title: Option<String>,
    /// Sort field; `None` keeps the filtered order
    pub sort_by: Option<SortField>,
    pub sort_order: SortOrder,
    /// Raw `page` as scanned, before clamping
    pub page: Option<i64>,
    /// Raw `pageSize` as scanned, before clamping
    pub page_size: Option<i64>,
}

impl CharacterQuery {
    /// Builds a query from decoded query-string pairs.
    ///
    /// When a key repeats, its first occurrence wins. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut raw: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            raw.entry(key.into()).or_insert_with(|| value.into());
        }
        let get = |key: &str| raw.get(key).map(String::as_str);

        Self {
            q: get("q").and_then(text_filter),
            family: get("family").and_then(text_filter),
            title: get("title").and_then(text_filter),
            sort_by: get("sortBy").and_then(|v| SortField::parse(v.trim())),
            sort_order: get("sortOrder").map(SortOrder::parse).unwrap_or_default(),
            page: get("page").and_then(parse_int_prefix),
            page_size: get("pageSize").and_then(parse_int_prefix),
        }
    }

    /// Clamped page window, or `None` when neither `page` nor `pageSize`
    /// was supplied as a number.
    pub fn page_request(&self) -> Option<PageRequest> {
        if self.page.is_none() && self.page_size.is_none() {
            return None;
        }

        let page = match self.page {
            Some(p) if p >= 1 => usize::try_from(p).unwrap_or(usize::MAX),
            _ => 1,
        };
        let page_size = match self.page_size {
            Some(s) if s >= 1 => usize::try_from(s).unwrap_or(usize::MAX).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        Some(PageRequest { page, page_size })
    }
}

fn text_filter(value: &str) -> Option<String> {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Scans a leading base-10 integer.
///
/// Skips leading whitespace, accepts one optional sign, then takes the
/// longest run of ASCII digits and ignores the rest (`"2abc"` is 2, `"1.9"`
/// is 1). Returns `None` when no digit follows. Values beyond `i64` saturate.
pub fn parse_int_prefix(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let magnitude = digits[..len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
