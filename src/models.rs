use serde::{Deserialize, Serialize};

/// A book the user has saved to the shelf, as stored in the `books` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBook {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub isbn: String,
    pub image_url: Option<String>,
    pub description: String,
}

/// The five mutable fields of a saved book. Used for both create and
/// update; an update replaces all five fields at once.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub author: String,
    pub title: String,
    pub isbn: String,
    pub image_url: Option<String>,
    pub description: String,
}

/// A catalog search result after normalization. Every field is always
/// populated; missing source data is replaced by a deterministic fallback,
/// and `authors` is always a sequence (possibly empty), never a sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub thumbnail: String,
    pub title: String,
    pub identifier: String,
    pub authors: Vec<String>,
    pub description: String,
}
