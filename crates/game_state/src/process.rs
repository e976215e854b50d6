use crate::constants::{MIN_BOUNDARY_EDGES, Z_HEADER};
use crate::csv_reader::read_game_state_csv;
use crate::error::{GameStateError, Result};
use crate::geometry::{Boundary, VerticalBand, Vertex};
use crate::inventory::{extract_weapon_classes, has_rifle_or_smg};
use crate::table::{GameStateRow, GameStateTable};

use log::{debug, info, warn};
use std::path::Path;

/// Stages run by [`GameStateProcessor::process`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// annotate `in_bounds`
    pub bounds: bool,
    /// annotate `weapon_classes`
    pub weapons: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            bounds: true,
            weapons: true,
        }
    }
}

/// Full staged pipeline: bounds -> weapons -> rifle/SMG flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub process: ProcessOptions,
    pub rifle_or_smg: bool,
}

/// Loads game state and annotates it against a configured boundary
#[derive(Debug, Clone, Default)]
pub struct GameStateProcessor {
    table: Option<GameStateTable>,
    boundary: Option<Boundary>,
}

impl GameStateProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads rows from a CSV file, replacing any previously loaded rows
    pub fn load_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let table = read_game_state_csv(path)?;
        Ok(self.with_table(table))
    }

    pub fn with_table(mut self, table: GameStateTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Sets the area of interest from consecutive connected vertices
    pub fn set_bounds(mut self, vertices: &[Vertex], band: Option<VerticalBand>) -> Self {
        self.boundary = Some(Boundary::build(vertices, band));
        self
    }

    pub fn table(&self) -> Option<&GameStateTable> {
        self.table.as_ref()
    }

    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }

    pub fn n_rows(&self) -> usize {
        self.table.as_ref().map_or(0, GameStateTable::len)
    }

    pub fn n_edges(&self) -> usize {
        self.boundary.as_ref().map_or(0, Boundary::n_edges)
    }

    /// Checks that the boundary is usable and data has been loaded.
    ///
    /// # Errors
    /// - `InsufficientBoundary` when fewer than 3 edges are configured
    /// - `MissingData` when no rows are loaded
    /// - `MissingColumn("z")` when a vertical band is set but rows have no z
    pub fn validate(&self) -> Result<(&GameStateTable, &Boundary)> {
        let edges = self.n_edges();
        let boundary = match &self.boundary {
            Some(b) if edges >= MIN_BOUNDARY_EDGES => b,
            _ => {
                return Err(GameStateError::InsufficientBoundary {
                    edges,
                    min: MIN_BOUNDARY_EDGES,
                });
            }
        };
        let table = self.table.as_ref().ok_or(GameStateError::MissingData)?;
        if boundary.band.is_some() && !table.has_z() {
            return Err(GameStateError::MissingColumn(Z_HEADER.to_string()));
        }
        Ok((table, boundary))
    }

    /// Returns a new table annotated with the requested derived columns.
    ///
    /// Validation runs before any row is touched. Rows are independent, so
    /// re-processing an annotated table overwrites fields with the same values.
    pub fn process(&self, options: ProcessOptions) -> Result<GameStateTable> {
        let (table, boundary) = self.validate()?;
        debug!(
            "Processing {} rows against {} edges ({:?})",
            table.len(),
            boundary.n_edges(),
            options
        );

        let out = table.map_rows(|row| {
            let mut next = row.clone();
            if options.bounds {
                next.in_bounds = Some(boundary.contains(&row.position));
            }
            if options.weapons {
                let outcome = extract_weapon_classes(row.inventory.as_deref());
                next.inventory_malformed = Some(outcome.is_malformed());
                next.weapon_classes = Some(outcome.into_classes());
            }
            next
        });

        let malformed = out
            .rows()
            .iter()
            .filter(|r| r.inventory_malformed == Some(true))
            .count();
        if malformed > 0 {
            warn!("{malformed} of {} rows had a missing or malformed inventory", out.len());
        }
        Ok(out)
    }

    /// Runs the staged pipeline in dependency order
    pub fn run(&self, options: PipelineOptions) -> Result<GameStateTable> {
        if options.rifle_or_smg && !options.process.weapons {
            return Err(GameStateError::StageOrder(
                "rifle/SMG flag requires the weapon classes stage".to_string(),
            ));
        }
        let table = self.process(options.process)?;
        if options.rifle_or_smg {
            annotate_rifle_or_smg(&table)
        } else {
            Ok(table)
        }
    }
}

/// Adds the rifle/SMG flag to every row of an already weapon-annotated table.
///
/// # Errors
/// `StageOrder` when any row has not been through weapon extraction yet
pub fn annotate_rifle_or_smg(table: &GameStateTable) -> Result<GameStateTable> {
    if let Some(pos) = table.rows().iter().position(|r| r.weapon_classes.is_none()) {
        return Err(GameStateError::StageOrder(format!(
            "row {pos} has no weapon classes, run weapon extraction first"
        )));
    }

    let out = table.map_rows(|row| GameStateRow {
        has_rifle_or_smg: row.weapon_classes.as_deref().map(has_rifle_or_smg),
        ..row.clone()
    });
    info!(
        "Rifle/SMG flag set on {} of {} rows",
        out.rows()
            .iter()
            .filter(|r| r.has_rifle_or_smg == Some(true))
            .count(),
        out.len()
    );
    Ok(out)
}
