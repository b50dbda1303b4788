//! Dataset file readers.

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

use crate::models::VendingMachine;

/// On-disk dataset encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    /// Detect format and compression from the file name.
    ///
    /// Returns `(format, gzipped)`, e.g. `machines.csv.gz` -> `(Csv, true)`.
    pub fn detect(path: &Path) -> Result<(Self, bool)> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let (stem, gzipped) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (name.as_str(), false),
        };

        let format = if stem.ends_with(".json") {
            DatasetFormat::Json
        } else if stem.ends_with(".csv") {
            DatasetFormat::Csv
        } else {
            bail!("Unsupported dataset file: {}", path.display());
        };

        Ok((format, gzipped))
    }
}

/// Read all machine records from a dataset file
pub fn load_machines(path: &Path) -> Result<Vec<VendingMachine>> {
    let (format, gzipped) = DatasetFormat::detect(path)?;
    info!("Loading {:?} dataset from {}", format, path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file {}", path.display()))?;
    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    match format {
        DatasetFormat::Json => parse_json(reader),
        DatasetFormat::Csv => parse_csv(reader),
    }
    .with_context(|| format!("Failed to parse dataset {}", path.display()))
}

pub(super) fn parse_json<R: Read>(reader: R) -> Result<Vec<VendingMachine>> {
    let machines: Vec<VendingMachine> =
        serde_json::from_reader(reader).context("Invalid JSON dataset")?;
    Ok(machines)
}

// Header row uses the same column names as the JSON records
pub(super) fn parse_csv<R: Read>(reader: R) -> Result<Vec<VendingMachine>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut machines = Vec::new();
    for (idx, record) in csv_reader.deserialize::<VendingMachine>().enumerate() {
        let machine = record.with_context(|| format!("Invalid CSV record {}", idx + 1))?;
        machines.push(machine);
    }
    Ok(machines)
}
