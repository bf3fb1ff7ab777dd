//! Shared-icon disambiguation.
//!
//! An observed drop only carries an image path. When several catalog items
//! share that image the location's drop table decides; if it cannot pick a
//! single item the drop goes untracked rather than being credited to the
//! wrong item.

use crate::catalog::ItemRecord;
use crate::registry::Location;

/// Resolve `candidates` (all items sharing one image) to a single item.
///
/// Returns `None` for zero candidates, and when the drop-table intersection
/// of several candidates is empty or still has more than one member.
pub fn match_item<'a>(candidates: &[&'a ItemRecord], location: &Location) -> Option<&'a ItemRecord> {
    match candidates {
        [] => None,
        [only] => Some(*only),
        _ => {
            let mut survivors = candidates.iter().filter(|c| location.drops(&c.name));
            match (survivors.next(), survivors.next()) {
                (Some(item), None) => Some(*item),
                _ => None,
            }
        }
    }
}
