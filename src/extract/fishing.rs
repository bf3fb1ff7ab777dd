use url::Url;

use crate::dom::parser::parse_fragment;
use crate::error::Result;
use crate::extract::{drop_hits, location_id, ActivityResult};

/// Net results (`worker.php?go=castnet`): one icon per fish caught.
pub fn parse_net_results(content: &str, url: &Url) -> Result<ActivityResult> {
    let location_id = location_id(url)?;
    let doc = parse_fragment(content);
    Ok(ActivityResult {
        location_id,
        stamina: None,
        lemonade: false,
        items: drop_hits(&doc),
    })
}
