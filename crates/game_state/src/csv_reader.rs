use crate::constants::{INVENTORY_HEADER, X_HEADER, Y_HEADER, Z_HEADER};
use crate::error::{GameStateError, Result};
use crate::geometry::Position;
use crate::table::{GameStateRow, GameStateTable};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::io::Read;
use std::path::Path;

/// Column indices of the fields the processor reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    x: usize,
    y: usize,
    z: Option<usize>,
    inventory: Option<usize>,
    /// header field count; every row is padded or truncated to it
    width: usize,
}

impl ColumnLayout {
    /// Minimum field count a record needs to cover every located column
    fn required_len(&self) -> usize {
        [Some(self.x), Some(self.y), self.z, self.inventory]
            .into_iter()
            .flatten()
            .max()
            .map_or(0, |i| i + 1)
    }
}

/// Reads game state from a CSV file
///
/// # Errors
/// Returns error if file cannot be read, required columns are missing, or a
/// coordinate cannot be parsed
pub fn read_game_state_csv<P: AsRef<Path>>(path: P) -> Result<GameStateTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let table = read_game_state_from_reader(file)?;
    debug!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Read CSV with at least `x` and `y` columns.
/// - `z` and `inventory` are optional
/// - every other column is carried through, rows padded or truncated to the header width
/// - blank lines are skipped
pub fn read_game_state_from_reader<R: Read>(reader: R) -> Result<GameStateTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| GameStateError::CsvHeader(format!("Failed to read headers: {}", e)))?
        .clone();
    let layout = locate_columns(&headers)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        if let Some(parsed) = parse_record(&rec, row, &layout)? {
            rows.push(parsed);
        }
    }

    Ok(GameStateTable::new(
        headers.iter().map(str::to_string).collect(),
        layout.z.is_some(),
        rows,
    ))
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn locate_columns(headers: &StringRecord) -> Result<ColumnLayout> {
    if headers.is_empty() {
        return Err(GameStateError::CsvHeader("Header row is empty".to_string()));
    }
    let x = find_column(headers, X_HEADER)
        .ok_or_else(|| GameStateError::MissingColumn(X_HEADER.to_string()))?;
    let y = find_column(headers, Y_HEADER)
        .ok_or_else(|| GameStateError::MissingColumn(Y_HEADER.to_string()))?;

    Ok(ColumnLayout {
        x,
        y,
        z: find_column(headers, Z_HEADER),
        inventory: find_column(headers, INVENTORY_HEADER),
        width: headers.len(),
    })
}

fn parse_record(
    rec: &StringRecord,
    row: usize,
    layout: &ColumnLayout,
) -> Result<Option<GameStateRow>> {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }
    if rec.len() < layout.required_len() {
        return Err(GameStateError::CsvRow {
            row,
            expected: layout.required_len(),
            got: rec.len(),
        });
    }

    let x = parse_coordinate(&rec[layout.x], X_HEADER, row)?;
    let y = parse_coordinate(&rec[layout.y], Y_HEADER, row)?;
    let z = match layout.z.map(|i| &rec[i]) {
        Some(value) if !value.is_empty() => Some(parse_coordinate(value, Z_HEADER, row)?),
        _ => None,
    };

    if rec.len() != layout.width {
        debug!(
            "Row {row} has {} fields, header has {}; normalizing",
            rec.len(),
            layout.width
        );
    }
    let fields = rec
        .iter()
        .map(str::to_string)
        .chain(std::iter::repeat(String::new()))
        .take(layout.width)
        .collect();

    Ok(Some(GameStateRow {
        fields,
        position: Position { x, y, z },
        inventory: layout.inventory.map(|i| rec[i].to_string()),
        in_bounds: None,
        weapon_classes: None,
        has_rifle_or_smg: None,
        inventory_malformed: None,
    }))
}

/// Parses a coordinate string into f64
fn parse_coordinate(value: &str, column: &'static str, row: usize) -> Result<f64> {
    value
        .parse()
        .map_err(|parse_error| GameStateError::CoordinateParse {
            row,
            column,
            value: value.to_string(),
            source: parse_error,
        })
}
