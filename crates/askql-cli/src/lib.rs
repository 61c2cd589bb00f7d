//! askql CLI library.
//!
//! Exposes the pipeline stages to the `askql` binary and the integration
//! tests. The pure pieces (prompt, extraction, schema text) live in
//! `askql-core`; this crate owns everything that talks to the outside
//! world: the database handle, the completion client, and the HTTP server.

pub mod cli;
pub mod db;
pub mod llm;
pub mod output;
pub mod server;

pub use cli::Args;
