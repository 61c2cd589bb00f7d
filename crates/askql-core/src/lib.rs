//! Core pipeline pieces for askql.
//!
//! Everything in this crate is pure and synchronous: connection-URL
//! assembly, the instruction prompt, SQL extraction from raw model output,
//! and schema-text rendering. Database and model I/O live in the CLI crate,
//! which calls through these pieces in a fixed order:
//!
//! 1. snapshot the schema ([`schema`]),
//! 2. build the prompt ([`prompt`]),
//! 3. send it to the completion model,
//! 4. isolate the SQL from the reply ([`extract`]),
//! 5. run the statement and render the rows ([`types::QueryResult`]).

pub mod extract;
pub mod prompt;
pub mod schema;
pub mod types;

pub use extract::{apply_naming_corrections, extract_sql};
pub use prompt::{build_prompt, STOP_SEQUENCE};
pub use schema::{
    render_schema_text, ColumnInfo, TableInfo, NO_CONNECTION_SENTINEL, SAMPLE_ROW_LIMIT,
};
pub use types::{ConnectionParams, DatabaseDriver, QueryResult};
