// mortgage-core/src/infrastructure/adapters/csv.rs

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, instrument};

// Imports Hexagonaux
use crate::domain::error::DomainError;
use crate::domain::table::Table;
use crate::error::MortgageError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, remove_file_if_exists};
use crate::ports::table_store::{TableSink, TableSource};

/// A directory holding one `<table>.csv` per table.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    /// Opens an existing directory (reading).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the directory for writing, creating it (and parents) if absent.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path_of<T: Table>(&self) -> PathBuf {
        self.root.join(T::file_name())
    }
}

/// Serializes `rows` with the header taken from `T::COLUMNS`, so an empty
/// table still gets its header line.
pub fn encode_table<T: Table + Serialize>(rows: &[T]) -> Result<Vec<u8>, InfrastructureError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| InfrastructureError::Io(e.into_error()))
}

/// Parses a CSV stream into rows of `T`, after checking that every column
/// of `T::COLUMNS` is present in the header.
pub fn decode_table<T: Table + DeserializeOwned, R: Read>(
    input: R,
) -> Result<Vec<T>, MortgageError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input);

    let headers = reader.headers()?.clone();
    if let Some(missing) = T::COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(DomainError::Schema {
            table: T::NAME.to_string(),
            column: missing.to_string(),
        }
        .into());
    }

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

impl TableSink for CsvDirectory {
    #[instrument(skip(self, rows), fields(table = T::NAME, rows = rows.len()))]
    fn write_table<T: Table + Serialize>(&self, rows: &[T]) -> Result<PathBuf, MortgageError> {
        let path = self.path_of::<T>();
        let bytes = encode_table(rows)?;
        atomic_write(&path, bytes)?;
        debug!(path = ?path, "Table written");
        Ok(path)
    }

    fn write_document(&self, file_name: &str, content: &[u8]) -> Result<PathBuf, MortgageError> {
        let path = self.root.join(file_name);
        atomic_write(&path, content)?;
        Ok(path)
    }

    fn remove(&self, file_name: &str) -> Result<bool, MortgageError> {
        Ok(remove_file_if_exists(&self.root.join(file_name))?)
    }
}

impl TableSource for CsvDirectory {
    #[instrument(skip(self), fields(table = T::NAME))]
    fn read_table<T: Table + DeserializeOwned>(&self) -> Result<Vec<T>, MortgageError> {
        let path = self.path_of::<T>();
        let file = fs::File::open(&path).map_err(|source| InfrastructureError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        let rows = decode_table(file)?;
        debug!(rows = rows.len(), "Table loaded");
        Ok(rows)
    }

    fn has_table<T: Table>(&self) -> bool {
        self.path_of::<T>().is_file()
    }
}
