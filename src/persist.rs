// persist.rs
//
// Load/save of the underlying rows. The editor never retries these;
// failures bubble up and the caller decides what to show. Only the
// normalized representation (header forced, rows at schema width) is ever
// written.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::document::Matrix;

pub trait PersistenceBridge {
    fn load(&self) -> Result<Matrix>;
    fn save(&self, matrix: &Matrix) -> Result<()>;
}

/// CSV file persistence. Reads are flexible (short rows are fine, the
/// document pads them); writes always produce schema-width records.
pub struct CsvBridge {
    path: PathBuf,
}

impl CsvBridge {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvBridge { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceBridge for CsvBridge {
    fn load(&self) -> Result<Matrix> {
        if !self.path.exists() {
            // first run: the grid starts as header-only
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows: Matrix = Vec::new();
        for result in rdr.records() {
            let record =
                result.with_context(|| format!("reading {}", self.path.display()))?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }
        Ok(rows)
    }

    fn save(&self, matrix: &Matrix) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("creating {}", self.path.display()))?;
        let mut wtr = csv::Writer::from_writer(file);
        for row in matrix {
            let record: Vec<&str> = row.iter().map(|s| s.as_str()).collect();
            wtr.write_record(&record)
                .with_context(|| format!("writing {}", self.path.display()))?;
        }
        wtr.flush()
            .with_context(|| format!("flushing {}", self.path.display()))?;
        Ok(())
    }
}
