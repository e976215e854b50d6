/// Boundary settings
pub const MIN_BOUNDARY_EDGES: usize = 3;

/// Expected headers in input CSV files (matched case-insensitively)
pub const X_HEADER: &str = "x";
pub const Y_HEADER: &str = "y";
pub const Z_HEADER: &str = "z";
pub const INVENTORY_HEADER: &str = "inventory";

/// Derived columns appended on export
pub const IN_BOUNDS_HEADER: &str = "in_bounds";
pub const WEAPON_CLASSES_HEADER: &str = "weapon_classes";
pub const RIFLE_OR_SMG_HEADER: &str = "has_rifle_or_smg";

/// Weapon class labels (exact, case-sensitive)
pub const RIFLE: &str = "Rifle";
pub const SMG: &str = "SMG";

/// Output file prefix, followed by a local timestamp
pub const OUTPUT_PREFIX: &str = "game_state";
