use crate::geometry::Position;

/// One (player, tick) record
#[derive(Debug, Clone, PartialEq)]
pub struct GameStateRow {
    /// raw values of every input column, in header order
    pub fields: Vec<String>,
    pub position: Position,
    /// raw inventory cell (None when the column is absent)
    pub inventory: Option<String>,

    // derived columns, None until the corresponding stage has run
    pub in_bounds: Option<bool>,
    pub weapon_classes: Option<Vec<String>>,
    pub has_rifle_or_smg: Option<bool>,
    /// set by weapon extraction; `weapon_classes` is then empty
    pub inventory_malformed: Option<bool>,
}

impl GameStateRow {
    pub fn new(position: Position, inventory: Option<&str>) -> Self {
        Self {
            fields: Vec::new(),
            position,
            inventory: inventory.map(str::to_string),
            in_bounds: None,
            weapon_classes: None,
            has_rifle_or_smg: None,
            inventory_malformed: None,
        }
    }
}

/// Loaded game state: input headers plus ordered rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStateTable {
    headers: Vec<String>,
    has_z: bool,
    rows: Vec<GameStateRow>,
}

impl GameStateTable {
    pub fn new(headers: Vec<String>, has_z: bool, rows: Vec<GameStateRow>) -> Self {
        Self {
            headers,
            has_z,
            rows,
        }
    }

    /// Builds a table without passthrough columns, mainly for callers that
    /// construct rows in memory
    pub fn from_rows(rows: Vec<GameStateRow>) -> Self {
        let has_z = rows.iter().any(|r| r.position.z.is_some());
        Self::new(Vec::new(), has_z, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether positions carry a z coordinate column
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    pub fn rows(&self) -> &[GameStateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a new table with every row transformed by `f`
    pub fn map_rows<F>(&self, f: F) -> Self
    where
        F: FnMut(&GameStateRow) -> GameStateRow,
    {
        Self {
            headers: self.headers.clone(),
            has_z: self.has_z,
            rows: self.rows.iter().map(f).collect(),
        }
    }
}
