//! SQL migration rendering for the `memorial_okean` table.
//!
//! [`render_migration`] turns an ordered record sequence into a script that
//! truncates the table, restarts its id sequence and re-inserts every record
//! in batched `INSERT ... VALUES` statements. [`write_migration`] puts the
//! script on disk. Nothing here talks to a database.

pub mod emitter;
pub mod error;
pub mod escape;
pub mod writer;

pub use emitter::{
    COLUMNS, DEFAULT_BATCH_SIZE, MigrationOptions, SEQUENCE, TABLE, insert_statement_count,
    render_migration, render_tuple,
};
pub use error::MigrationError;
pub use escape::escape_literal;
pub use writer::{default_migration_name, write_migration};
