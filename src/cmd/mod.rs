pub mod calculate;
pub mod capital_gains;
pub mod regimes;
pub mod report;

use crate::disposals::{self, DisposalRecord};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read disposal records from a CSV or JSON file (or stdin with "-")
pub fn read_disposals(path: &Path) -> anyhow::Result<Vec<DisposalRecord>> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<Vec<DisposalRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => disposals::read_json(reader),
        // Default to CSV for .csv files and any other extension
        _ => disposals::read_csv(reader),
    }
}

fn read_from_stdin() -> anyhow::Result<Vec<DisposalRecord>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    // Sniff the format: JSON starts with an object, anything else is CSV
    let cursor = io::Cursor::new(buffer);
    if cursor.get_ref().iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{') {
        disposals::read_json(cursor)
    } else {
        disposals::read_csv(cursor)
    }
}
