use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const HTTP_USER_AGENT: &str = "bookshelf/0.1";

/// Client for the external book catalog. Holds one reqwest client built at
/// startup with a request timeout, so a catalog that never answers cannot
/// hang a request forever.
pub struct BookLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl BookLookup {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(HTTP_USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Sends one scoped search to the catalog and returns the raw volume
    /// entries. Transport errors and non-success statuses surface as
    /// [`AppError::Lookup`]; no retry, no backoff.
    pub async fn search(&self, query: &str, field: &str) -> Result<Vec<VolumeInfo>, AppError> {
        let scoped = scoped_query(field, query);
        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(&scoped));
        debug!(%url, "catalog search");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let list: VolumeList = response.json().await?;

        // A zero-result response omits `items` entirely.
        Ok(list
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|volume| volume.volume_info)
            .collect())
    }
}

/// Builds the catalog query string, e.g. `intitle:Hobbit` for a title
/// search of "Hobbit".
pub(crate) fn scoped_query(field: &str, query: &str) -> String {
    format!("in{field}:{query}")
}

#[derive(Debug, Deserialize)]
struct VolumeList {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

/// Volume information as the catalog returns it. Every field the catalog
/// may leave out is an explicit `Option`; presence handling happens once,
/// at the normalizer boundary.
#[derive(Debug, Default, Deserialize)]
pub struct VolumeInfo {
    #[serde(rename = "imageLinks")]
    pub image_links: Option<ImageLinks>,
    pub title: Option<String>,
    #[serde(rename = "industryIdentifiers")]
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IndustryIdentifier {
    pub identifier: String,
}

#[cfg(test)]
mod tests {
    use super::{scoped_query, VolumeList};

    #[test]
    fn title_search_builds_intitle_query() {
        assert_eq!(scoped_query("title", "Hobbit"), "intitle:Hobbit");
    }

    #[test]
    fn author_search_builds_inauthor_query() {
        assert_eq!(scoped_query("author", "Tolkien"), "inauthor:Tolkien");
    }

    #[test]
    fn zero_result_body_without_items_is_empty() {
        let list: VolumeList = serde_json::from_str(r#"{"kind":"books#volumes","totalItems":0}"#)
            .expect("valid zero-result body");
        assert!(list.items.is_none());
    }

    #[test]
    fn sparse_volume_deserializes_with_absent_fields() {
        let list: VolumeList =
            serde_json::from_str(r#"{"items":[{"volumeInfo":{"title":"Dune"}}]}"#)
                .expect("valid sparse body");
        let info = &list.items.expect("one item")[0].volume_info;
        assert_eq!(info.title.as_deref(), Some("Dune"));
        assert!(info.image_links.is_none());
        assert!(info.authors.is_none());
        assert!(info.industry_identifiers.is_none());
        assert!(info.description.is_none());
    }
}
