//! Export helpers for JSON and CSV artifacts.
//!
//! Writers accept any `Serialize` record, so report formatters downstream only ever
//! see immutable snapshots, never engine state.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod json {
    use std::io::Write;
    use std::path::Path;

    use chrono::{SecondsFormat, Utc};
    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    /// JSON document wrapping a single exported record.
    #[derive(Debug, Serialize)]
    pub struct Envelope<'a, T: Serialize> {
        pub kind: &'a str,
        pub generated_at: String,
        pub payload: &'a T,
    }

    impl<'a, T: Serialize> Envelope<'a, T> {
        pub fn new(kind: &'a str, payload: &'a T) -> Self {
            Self {
                kind,
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                payload,
            }
        }
    }

    /// Write `payload` as pretty JSON inside an [`Envelope`].
    pub fn write_report<T: Serialize>(
        path: &Path,
        kind: &str,
        payload: &T,
    ) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        serde_json::to_writer_pretty(&mut writer, &Envelope::new(kind, payload))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub mod table {
    use std::path::Path;

    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    /// Write one CSV row per record, with a header derived from field names.
    pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
        let writer = writer_for_path(path)?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
