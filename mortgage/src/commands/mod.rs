// mortgage/src/commands/mod.rs

pub mod clean;
pub mod generate;
pub mod validate;
