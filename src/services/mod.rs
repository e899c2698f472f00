//! The in-memory catalogue engine: loading, normalization,
//! cross-referencing, filtering, aggregation, and export.

pub mod charts;
pub mod crossref;
pub mod export;
pub mod filter;
pub mod loader;
pub mod normalize;
