use crate::constants::{RIFLE, SMG};

use log::trace;
use serde::Deserialize;

/// Inventory entry; only the class label is read, other fields are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryItem {
    pub weapon_class: String,
}

/// Per-row extraction result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryOutcome {
    Extracted(Vec<String>),
    Malformed,
}

impl InventoryOutcome {
    pub fn is_malformed(&self) -> bool {
        matches!(self, InventoryOutcome::Malformed)
    }

    /// Weapon classes, with `Malformed` degraded to an empty list
    pub fn into_classes(self) -> Vec<String> {
        match self {
            InventoryOutcome::Extracted(classes) => classes,
            InventoryOutcome::Malformed => Vec::new(),
        }
    }
}

/// Extracts weapon class labels from a raw inventory cell.
///
/// The cell is a JSON array of objects carrying a string `weapon_class`.
/// Missing, blank, `null` or otherwise malformed cells (including a single
/// item without a label) yield [`InventoryOutcome::Malformed`].
pub fn extract_weapon_classes(inventory: Option<&str>) -> InventoryOutcome {
    let Some(raw) = inventory.map(str::trim).filter(|s| !s.is_empty()) else {
        return InventoryOutcome::Malformed;
    };

    match serde_json::from_str::<Vec<InventoryItem>>(raw) {
        Ok(items) => {
            InventoryOutcome::Extracted(items.into_iter().map(|i| i.weapon_class).collect())
        }
        Err(e) => {
            trace!("Malformed inventory {raw:?}: {e}");
            InventoryOutcome::Malformed
        }
    }
}

/// True iff a "Rifle" or "SMG" label is present (exact match)
pub fn has_rifle_or_smg<S: AsRef<str>>(weapon_classes: &[S]) -> bool {
    weapon_classes
        .iter()
        .any(|c| matches!(c.as_ref(), RIFLE | SMG))
}
