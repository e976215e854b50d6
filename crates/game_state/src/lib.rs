pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod error;
pub mod export;
pub mod geometry;
pub mod inventory;
pub mod process;
pub mod stats;
pub mod table;

pub use config::Config;
pub use csv_reader::{read_game_state_csv, read_game_state_from_reader};
pub use error::GameStateError;
pub use export::{export_to_csv_with_path, write_table};
pub use geometry::{Boundary, Edge, Position, VerticalBand, Vertex, build_edges, is_inside};
pub use inventory::{InventoryOutcome, extract_weapon_classes, has_rifle_or_smg};
pub use process::{GameStateProcessor, PipelineOptions, ProcessOptions, annotate_rifle_or_smg};
pub use stats::RunSummary;
pub use table::{GameStateRow, GameStateTable};
