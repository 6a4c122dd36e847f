//! Roster CSV import/export
//!
//! The upload format is a header row with `First Name`, `Last Name` and
//! `Jersey Number`; extra columns are ignored. Checks run in a fixed order:
//! columns, then missing values, then jersey parsing, then uniqueness.

use std::io::{Read, Write};

use rustc_hash::FxHashSet;

use crate::error::ImportError;
use crate::roster::Roster;

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const JERSEY_NUMBER: &str = "Jersey Number";

pub const REQUIRED_COLUMNS: [&str; 3] = [FIRST_NAME, LAST_NAME, JERSEY_NUMBER];

/// Parse a roster from any CSV reader
pub fn read_roster<R: Read>(reader: R) -> Result<Roster, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let columns = [column(FIRST_NAME), column(LAST_NAME), column(JERSEY_NUMBER)];

    let mut rows: Vec<[String; 3]> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        // Fully blank lines are skipped
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let mut values: [String; 3] = Default::default();
        for (slot, index) in columns.iter().enumerate() {
            values[slot] = record.get(*index).unwrap_or("").to_string();
        }
        rows.push(values);
    }

    for (row, values) in rows.iter().enumerate() {
        for (slot, value) in values.iter().enumerate() {
            if value.is_empty() {
                return Err(ImportError::MissingValues {
                    row: row + 1,
                    column: REQUIRED_COLUMNS[slot].to_string(),
                });
            }
        }
    }

    let mut parsed = Vec::with_capacity(rows.len());
    for (row, [first, last, jersey]) in rows.into_iter().enumerate() {
        let number = parse_jersey(&jersey).ok_or_else(|| ImportError::InvalidJersey {
            row: row + 1,
            value: jersey.clone(),
        })?;
        parsed.push((first, last, number));
    }

    let mut seen = FxHashSet::default();
    for (_, _, jersey) in &parsed {
        if !seen.insert(*jersey) {
            return Err(ImportError::DuplicateJersey(*jersey));
        }
    }

    let roster = Roster::from_rows(parsed)?;
    tracing::info!("Parsed roster with {} players", roster.len());
    Ok(roster)
}

/// Parse a roster from CSV text
pub fn parse_roster_csv(text: &str) -> Result<Roster, ImportError> {
    read_roster(text.as_bytes())
}

/// Jersey numbers are whole numbers; spreadsheet exports like "12.0" are accepted
pub(crate) fn parse_jersey(value: &str) -> Option<u32> {
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }
    let float = value.parse::<f64>().ok()?;
    if float.fract() == 0.0 && float >= 0.0 && float <= u32::MAX as f64 {
        Some(float as u32)
    } else {
        None
    }
}

/// Write the roster with the required header
pub fn write_roster<W: Write>(roster: &Roster, writer: W) -> Result<(), ImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REQUIRED_COLUMNS)?;
    for player in roster.iter() {
        let jersey = player.jersey_number.to_string();
        csv_writer.write_record([
            player.first_name.as_str(),
            player.last_name.as_str(),
            jersey.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Blank upload template: header plus `rows` empty lines
pub fn roster_template(rows: usize) -> Result<String, ImportError> {
    let mut csv_writer = csv::Writer::from_writer(Vec::new());
    csv_writer.write_record(REQUIRED_COLUMNS)?;
    for _ in 0..rows {
        csv_writer.write_record(["", "", ""])?;
    }
    let bytes = csv_writer
        .into_inner()
        .map_err(|e| ImportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PlayerId;

    #[test]
    fn test_parse_valid_roster() {
        let text = "First Name,Last Name,Jersey Number,Notes\n Ann ,Lee,7,lefty\nBo,Diaz,12.0,\n";
        let roster = parse_roster_csv(text).unwrap();
        assert_eq!(roster.len(), 2);
        let bo = roster.get(PlayerId(1)).unwrap();
        assert_eq!(bo.full_name(), "Bo Diaz");
        assert_eq!(bo.jersey_number, 12);
        assert_eq!(roster.get(PlayerId(0)).unwrap().first_name, "Ann");
    }

    #[test]
    fn test_missing_columns_reported_first() {
        let text = "First Name,Jersey\nAnn,7\n";
        match parse_roster_csv(text) {
            Err(ImportError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["Last Name".to_string(), "Jersey Number".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_value_before_duplicate() {
        let text = "First Name,Last Name,Jersey Number\nAnn,Lee,7\nBo,,7\n";
        assert!(matches!(
            parse_roster_csv(text),
            Err(ImportError::MissingValues { row: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_jersey() {
        let text = "First Name,Last Name,Jersey Number\nAnn,Lee,7\nBo,Diaz,7\n";
        assert!(matches!(parse_roster_csv(text), Err(ImportError::DuplicateJersey(7))));
    }

    #[test]
    fn test_invalid_jersey() {
        let text = "First Name,Last Name,Jersey Number\nAnn,Lee,seven\n";
        assert!(matches!(
            parse_roster_csv(text),
            Err(ImportError::InvalidJersey { row: 1, .. })
        ));
    }

    #[test]
    fn test_write_then_read_keeps_players() {
        let roster = Roster::from_rows([("Ann", "Lee", 7), ("Bo", "Diaz", 12)]).unwrap();
        let mut buffer = Vec::new();
        write_roster(&roster, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("First Name,Last Name,Jersey Number\n"));
        assert_eq!(parse_roster_csv(&text).unwrap(), roster);
    }

    #[test]
    fn test_template_has_blank_rows() {
        let template = roster_template(3).unwrap();
        let lines: Vec<&str> = template.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "First Name,Last Name,Jersey Number");
        assert_eq!(lines[1], ",,");
    }
}
