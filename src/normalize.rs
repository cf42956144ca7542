use crate::lookup::VolumeInfo;
use crate::models::SearchHit;

pub const FALLBACK_THUMBNAIL: &str =
    "https://www.freeiconspng.com/uploads/book-icon--icon-search-engine-6.png";
pub const FALLBACK_TITLE: &str = "there is no title";
pub const FALLBACK_IDENTIFIER: &str = "not found";
pub const FALLBACK_DESCRIPTION: &str = "No description was found";

/// Maps a raw catalog entry onto a fixed-shape [`SearchHit`]. Pure and
/// deterministic: every output field is populated, with absent source data
/// replaced by the fallback constants above.
///
/// The image check inspects the `imageLinks` container before touching the
/// nested thumbnail, so an absent container can never be dereferenced.
pub fn normalize(info: VolumeInfo) -> SearchHit {
    let thumbnail = info
        .image_links
        .and_then(|links| links.thumbnail)
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| FALLBACK_THUMBNAIL.to_string());

    let title = info
        .title
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let identifier = info
        .industry_identifiers
        .and_then(|ids| ids.into_iter().next())
        .map(|id| id.identifier)
        .unwrap_or_else(|| FALLBACK_IDENTIFIER.to_string());

    // Always a sequence; an absent author list becomes an empty one.
    let authors = info.authors.unwrap_or_default();

    let description = info
        .description
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    SearchHit {
        thumbnail,
        title,
        identifier,
        authors,
        description,
    }
}
