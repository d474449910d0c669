//! File-backed collaborators: column-indexed CSV ingest and corrected-signal
//! export.

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
