//! Character model and normalization
//!
//! Upstream records and downstream responses share one camelCase shape.
//! Normalization only fills in the derived `fullName`.

use serde::{Deserialize, Serialize};

/// A Thrones API character.
///
/// Every optional field serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Character {
    /// Creates a character with only an id; every other field is `None`.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            full_name: None,
            title: None,
            family: None,
            image: None,
            image_url: None,
        }
    }

    /// Maps an upstream record to the canonical shape.
    ///
    /// A missing `fullName` is derived from the non-empty name parts joined
    /// by a single space, or stays `None` when there are none. A supplied
    /// `fullName` is kept as is.
    pub fn normalized(mut self) -> Self {
        if self.full_name.is_none() {
            self.full_name = joined_name(self.first_name.as_deref(), self.last_name.as_deref());
        }
        self
    }

    /// Name used for searching and sorting.
    ///
    /// Falls back to `"{first} {last}"` with missing parts as empty strings,
    /// so the result may carry stray spaces.
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(full) => full.clone(),
            None => format!(
                "{} {}",
                self.first_name.as_deref().unwrap_or_default(),
                self.last_name.as_deref().unwrap_or_default()
            ),
        }
    }
}

fn joined_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
