//! Storage: reading options from a TOML file.
//!
//! The `options_file` sub-module locates the platform config file, parses it,
//! and replays its values through the [`StoreOptions`](crate::StoreOptions)
//! setters so file input obeys exactly the same rules as programmatic input.
//! It never writes to disk.

pub mod options_file;
