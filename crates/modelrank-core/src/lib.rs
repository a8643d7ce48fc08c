//! modelrank-core — Claim parsing and scoring against a model catalog.
//!
//! This crate defines the data model, the claim parser, and the scoring
//! engine. It performs no I/O of its own; catalogs arrive through the
//! [`traits::CatalogSource`] trait.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod traits;

pub use engine::{grade, score};
pub use error::{FormatError, GradeError};
pub use model::{CatalogRecord, Claim, RankedCatalog, ScoreResult};
pub use parser::parse_claim;
