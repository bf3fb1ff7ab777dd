//! Exploration and lemonade results (`worker.php?go=explore` / `go=drinklm`).
//!
//! Response shapes:
//!
//! - multi-stamina: `You continued and used <strong>24</strong> stamina<br/>`
//!   followed by one `<img>` per drop,
//! - single: `<img ...><br/>On the ground you find <strong>Thorns</strong>!`,
//! - nothing found: no `<strong>` at all,
//! - lemonade: starts with `Lemonade helped you find:` and wraps every drop
//!   icon in its own `<strong>`.
//!
//! Capped drops carry `filter: grayscale(100%)` in their inline style.

use url::Url;

use crate::dom::parser::parse_fragment;
use crate::error::Result;
use crate::extract::{drop_hits, location_id, ActivityResult};

pub const LEMONADE_SENTINEL: &str = "Lemonade helped you find:";

pub fn parse_explore_results(content: &str, url: &Url) -> Result<ActivityResult> {
    let location_id = location_id(url)?;
    let doc = parse_fragment(content);

    let mut result = ActivityResult {
        location_id,
        stamina: None,
        lemonade: false,
        items: Vec::new(),
    };

    if content.starts_with(LEMONADE_SENTINEL) {
        result.lemonade = true;
    } else {
        result.stamina = Some(1);
        let strong = match doc.first_tag("strong") {
            Some(s) => s,
            // Used stamina, found nothing.
            None => return Ok(result),
        };
        let token = strong.text_content();
        if let Some(stamina) = stamina_count(&token) {
            result.stamina = Some(stamina);
        }
    }

    result.items = drop_hits(&doc);
    Ok(result)
}

/// A digits-only emphasis token as a stamina count of at least 1.
/// Counts past `u32::MAX` saturate.
fn stamina_count(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = token.parse::<u32>().unwrap_or(u32::MAX);
    Some(count.max(1))
}
