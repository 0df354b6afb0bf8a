// mortgage-core/src/infrastructure/adapters/mod.rs

pub mod csv;

pub use self::csv::{CsvDirectory, decode_table, encode_table};
