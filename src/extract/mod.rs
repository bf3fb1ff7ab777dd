//! Extractors turning raw response fragments into structured results.
//!
//! Each extractor parses the whole response before anything touches the
//! tracker state, so a `MalformedResponse` leaves the state untouched.

pub mod explore;
pub mod fishing;
pub mod inventory;
pub mod page;

use url::Url;

use crate::dom::DomNode;
use crate::error::{Result, TrackerError};

/// Style token the game puts on the icon of a drop that hit the cap.
pub const CAPPED_STYLE_TOKEN: &str = "grayscale";

/// One image in an activity response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropHit {
    pub image: String,
    /// The player was already at capacity for this item.
    pub overflow: bool,
}

/// What one exploration, lemonade or net response reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityResult {
    pub location_id: u32,
    /// `None` in lemonade mode and for nets, where stamina is not spent.
    pub stamina: Option<u32>,
    pub lemonade: bool,
    pub items: Vec<DropHit>,
}

/// The required numeric `id` query parameter.
pub fn location_id(url: &Url) -> Result<u32> {
    let raw = url
        .query_pairs()
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| TrackerError::malformed(format!("no location id in {}", url)))?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TrackerError::malformed(format!("non-numeric location id {:?}", raw)));
    }
    raw.parse::<u32>()
        .map_err(|e| TrackerError::malformed(format!("location id {:?}: {}", raw, e)))
}

/// Optional numeric `id` parameter, for page visits where it only enriches.
pub fn optional_id(url: &Url) -> Option<u32> {
    url.query_pairs()
        .find(|(k, _)| k == "id")
        .and_then(|(_, v)| v.parse::<u32>().ok())
}

/// Every `<img>` with a `src`, in document order.
pub fn drop_hits(doc: &DomNode) -> Vec<DropHit> {
    doc.all_tags("img")
        .into_iter()
        .filter_map(|img| {
            let src = img.attr("src")?;
            let style = img.attr("style").unwrap_or("");
            Some(DropHit {
                image: src.to_string(),
                overflow: style.contains(CAPPED_STYLE_TOKEN),
            })
        })
        .collect()
}
