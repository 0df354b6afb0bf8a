// mortgage-core/src/ports/table_store.rs

// Ce que le pipeline attend d'un stockage tabulaire, sans savoir s'il s'agit
// de fichiers CSV, d'un bucket ou d'une base.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::domain::table::Table;
use crate::error::MortgageError;

pub trait TableSink {
    /// Replaces the whole table. Either every row lands or the previous
    /// content is left as it was.
    fn write_table<T: Table + Serialize>(&self, rows: &[T]) -> Result<PathBuf, MortgageError>;

    /// Side documents (reports) stored next to the tables.
    fn write_document(&self, file_name: &str, content: &[u8]) -> Result<PathBuf, MortgageError>;

    /// Drops a table or document; `false` when it was not there.
    fn remove(&self, file_name: &str) -> Result<bool, MortgageError>;
}

pub trait TableSource {
    /// Loads every row, failing with a schema error when one of
    /// `T::COLUMNS` is missing.
    fn read_table<T: Table + DeserializeOwned>(&self) -> Result<Vec<T>, MortgageError>;

    fn has_table<T: Table>(&self) -> bool;
}
