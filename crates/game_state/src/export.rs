use crate::constants::{
    IN_BOUNDS_HEADER, OUTPUT_PREFIX, RIFLE_OR_SMG_HEADER, WEAPON_CLASSES_HEADER, X_HEADER,
    Y_HEADER, Z_HEADER,
};
use crate::error::{GameStateError, Result};
use crate::table::{GameStateRow, GameStateTable};

use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Derived columns present on every row of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DerivedColumns {
    in_bounds: bool,
    weapon_classes: bool,
    rifle_or_smg: bool,
}

impl DerivedColumns {
    fn of(table: &GameStateTable) -> Self {
        let rows = table.rows();
        Self {
            in_bounds: all_rows(rows, |r| r.in_bounds.is_some()),
            weapon_classes: all_rows(rows, |r| r.weapon_classes.is_some()),
            rifle_or_smg: all_rows(rows, |r| r.has_rifle_or_smg.is_some()),
        }
    }
}

fn all_rows(rows: &[GameStateRow], f: impl Fn(&GameStateRow) -> bool) -> bool {
    !rows.is_empty() && rows.iter().all(f)
}

/// Writes the annotated table to `<output_dir>/game_state_<timestamp>.csv`
pub fn export_to_csv_with_path(
    table: &GameStateTable,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("{OUTPUT_PREFIX}_{timestamp}.csv");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| GameStateError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;
    write_table(table, BufWriter::new(file))?;
    Ok(file_path)
}

/// Writes input columns followed by every derived column the rows carry.
///
/// Tables built in memory have no passthrough headers; their positions are
/// written as `x`, `y` (and `z`) instead.
pub fn write_table<W: Write>(table: &GameStateTable, writer: W) -> Result<()> {
    let derived = DerivedColumns::of(table);
    let passthrough = !table.headers().is_empty();

    let mut wtr = WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = if passthrough {
        table.headers().iter().map(String::as_str).collect()
    } else if table.has_z() {
        vec![X_HEADER, Y_HEADER, Z_HEADER]
    } else {
        vec![X_HEADER, Y_HEADER]
    };
    if derived.in_bounds {
        header.push(IN_BOUNDS_HEADER);
    }
    if derived.weapon_classes {
        header.push(WEAPON_CLASSES_HEADER);
    }
    if derived.rifle_or_smg {
        header.push(RIFLE_OR_SMG_HEADER);
    }
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut record: Vec<String> = if passthrough {
            row.fields.clone()
        } else {
            let p = row.position;
            let mut v = vec![p.x.to_string(), p.y.to_string()];
            if table.has_z() {
                v.push(p.z.map(|z| z.to_string()).unwrap_or_default());
            }
            v
        };
        if derived.in_bounds {
            record.push(row.in_bounds.unwrap_or_default().to_string());
        }
        if derived.weapon_classes {
            let classes = row.weapon_classes.as_deref().unwrap_or_default();
            record.push(serde_json::to_string(classes)?);
        }
        if derived.rifle_or_smg {
            record.push(row.has_rifle_or_smg.unwrap_or_default().to_string());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::read_game_state_from_reader;
    use crate::geometry::{Position, Vertex};
    use crate::process::{GameStateProcessor, PipelineOptions, ProcessOptions};
    use tempfile::TempDir;

    const INPUT: &str = "\
tick,x,y,inventory
1,5,5,\"[{\"\"weapon_class\"\":\"\"SMG\"\"},{\"\"weapon_class\"\":\"\"Pistol\"\"}]\"
2,15,15,
";

    fn annotated() -> GameStateTable {
        let table = read_game_state_from_reader(INPUT.as_bytes()).unwrap();
        GameStateProcessor::new()
            .with_table(table)
            .set_bounds(
                &[
                    Vertex::new(0.0, 0.0),
                    Vertex::new(0.0, 10.0),
                    Vertex::new(10.0, 10.0),
                    Vertex::new(10.0, 0.0),
                ],
                None,
            )
            .run(PipelineOptions {
                process: ProcessOptions::default(),
                rifle_or_smg: true,
            })
            .unwrap()
    }

    #[test]
    fn test_write_table_appends_derived_columns() {
        let mut buf = Vec::new();
        write_table(&annotated(), &mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "tick,x,y,inventory,in_bounds,weapon_classes,has_rifle_or_smg"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,5,5,"));
        assert!(lines[1].ends_with(r#",true,"[""SMG"",""Pistol""]",true"#));
        assert_eq!(lines[2], "2,15,15,,false,[],false");
    }

    #[test]
    fn test_exported_table_reads_back() {
        let mut buf = Vec::new();
        write_table(&annotated(), &mut buf).unwrap();
        let reread = read_game_state_from_reader(buf.as_slice()).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.headers()[5], "weapon_classes");
        assert_eq!(reread.rows()[0].fields[5], r#"["SMG","Pistol"]"#);
    }

    #[test]
    fn test_ragged_input_rows_export_aligned() {
        let table = read_game_state_from_reader("x,y,tick\n5,5,1\n15,15\n".as_bytes()).unwrap();
        let out = GameStateProcessor::new()
            .with_table(table)
            .set_bounds(
                &[
                    Vertex::new(0.0, 0.0),
                    Vertex::new(0.0, 10.0),
                    Vertex::new(10.0, 10.0),
                    Vertex::new(10.0, 0.0),
                ],
                None,
            )
            .process(ProcessOptions::default())
            .unwrap();

        let mut buf = Vec::new();
        write_table(&out, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "x,y,tick,in_bounds,weapon_classes\n5,5,1,true,[]\n15,15,,false,[]\n"
        );
    }

    #[test]
    fn test_unprocessed_table_has_no_derived_columns() {
        let table = read_game_state_from_reader(INPUT.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();
        assert_eq!(content.lines().next(), Some("tick,x,y,inventory"));
    }

    #[test]
    fn test_in_memory_table_writes_positions() {
        let table = GameStateTable::from_rows(vec![GameStateRow {
            in_bounds: Some(true),
            ..GameStateRow::new(Position::spatial(1.5, 2.0, 3.0), None)
        }]);
        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "x,y,z,in_bounds\n1.5,2,3,true\n");
    }

    #[test]
    fn test_export_to_csv_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_to_csv_with_path(&annotated(), Some(temp_dir.path())).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("game_state_"));
        assert!(name.ends_with(".csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("run1");
        let path = export_to_csv_with_path(&annotated(), Some(&nested)).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
