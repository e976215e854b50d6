use crate::table::GameStateTable;

use itertools::Itertools;
use log::info;

/// Aggregate counts over an annotated table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub in_bounds: usize,
    pub rifle_or_smg: usize,
    /// rows holding a well-formed but empty inventory
    pub empty_inventories: usize,
    /// rows whose inventory was missing or malformed
    pub malformed_inventories: usize,
    /// weapon class -> number of rows carrying it, most frequent first
    pub weapon_class_rows: Vec<(String, usize)>,
}

impl RunSummary {
    pub fn from_table(table: &GameStateTable) -> Self {
        let rows = table.rows();
        let in_bounds = rows.iter().filter(|r| r.in_bounds == Some(true)).count();
        let rifle_or_smg = rows
            .iter()
            .filter(|r| r.has_rifle_or_smg == Some(true))
            .count();
        let malformed_inventories = rows
            .iter()
            .filter(|r| r.inventory_malformed == Some(true))
            .count();
        let empty_inventories = rows
            .iter()
            .filter(|r| r.inventory_malformed != Some(true))
            .filter(|r| r.weapon_classes.as_ref().is_some_and(Vec::is_empty))
            .count();

        // a class held twice in one inventory counts once for that row
        let weapon_class_rows = rows
            .iter()
            .filter_map(|r| r.weapon_classes.as_ref())
            .flat_map(|classes| classes.iter().unique())
            .counts()
            .into_iter()
            .map(|(class, n)| (class.clone(), n))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect();

        Self {
            rows: rows.len(),
            in_bounds,
            rifle_or_smg,
            empty_inventories,
            malformed_inventories,
            weapon_class_rows,
        }
    }

    pub fn log(&self) {
        info!("Rows processed: {}", self.rows);
        info!("Rows in bounds: {}", self.in_bounds);
        info!("Rows with rifle or SMG: {}", self.rifle_or_smg);
        info!("Rows with empty inventory: {}", self.empty_inventories);
        info!(
            "Rows with missing or malformed inventory: {}",
            self.malformed_inventories
        );
        if !self.weapon_class_rows.is_empty() {
            info!("Weapon classes by row count:");
            for (i, (class, n)) in self.weapon_class_rows.iter().take(10).enumerate() {
                info!("{}. {}: {}", i + 1, class, n);
            }
        }
    }
}
