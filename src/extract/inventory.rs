//! Inventory page (`inventory.php`), the authoritative resync source.

use std::collections::BTreeMap;

use crate::dom::parser::parse_fragment;
use crate::dom::DomNode;
use crate::engine::inventory::InventoryEntry;
use crate::error::{Result, TrackerError};

const MAX_PREFIX: &str = "more than <strong>";
const MAX_SUFFIX: &str = "</strong> of any";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    pub max: u32,
    pub items: BTreeMap<String, InventoryEntry>,
}

pub fn parse_inventory(content: &str) -> Result<InventorySnapshot> {
    let max = parse_max_inventory(content)?;
    let doc = parse_fragment(content);

    let mut items = BTreeMap::new();
    for group in doc.find_all(|n| n.is_element() && n.has_class("list-group")) {
        for row in group.all_tags("li") {
            if row.has_class("item-divider") {
                continue;
            }
            match parse_row(row) {
                Some((name, entry)) => {
                    items.insert(name, entry);
                }
                None => log::warn!("Skipping unparseable inventory row: {:?}", row.text_content().trim()),
            }
        }
    }

    Ok(InventorySnapshot { max, items })
}

/// `You cannot have more than <strong>1,000</strong> of any single item`
fn parse_max_inventory(content: &str) -> Result<u32> {
    let missing = || TrackerError::malformed("inventory page has no max capacity");
    let start = content.find(MAX_PREFIX).ok_or_else(missing)? + MAX_PREFIX.len();
    let rest = &content[start..];
    let end = rest.find(MAX_SUFFIX).ok_or_else(missing)?;
    let digits: String = rest[..end].chars().filter(|&c| c != ',').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TrackerError::malformed(format!("bad max capacity {:?}", &rest[..end])));
    }
    digits
        .parse::<u32>()
        .map_err(|e| TrackerError::malformed(format!("max capacity {:?}: {}", digits, e)))
}

fn parse_row(row: &DomNode) -> Option<(String, InventoryEntry)> {
    let name = row
        .find(|n| n.is_element() && n.has_class("item-title"))?
        .first_tag("strong")?
        .text_content()
        .trim()
        .to_string();
    if name.is_empty() {
        return None;
    }

    let quantity_text: String = row
        .find(|n| n.is_element() && n.has_class("item-after"))?
        .text_content()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let quantity = quantity_text.parse::<u32>().ok()?;

    let href = row
        .find(|n| n.is_element() && n.tag == "a" && n.has_class("item-link"))?
        .attr("href")?;
    let id = href_id(href)?;

    let image = row
        .find(|n| n.is_element() && n.has_class("item-media"))
        .and_then(|media| media.first_tag("img"))
        .and_then(|img| img.attr("src"))
        .map(str::to_string);

    Some((
        name,
        InventoryEntry {
            quantity,
            id: Some(id),
            image,
        },
    ))
}

/// Digits following the first `id=` in a relative link like `item.php?id=35`.
fn href_id(href: &str) -> Option<String> {
    let start = href.find("id=")? + 3;
    let digits: String = href[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
