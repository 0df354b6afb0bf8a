// mortgage-core/src/ports/mod.rs

pub mod table_store;

pub use table_store::{TableSink, TableSource};
