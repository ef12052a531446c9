//! # Recueil - a flat-file poem corpus import core
//!
//! Recueil converts free-form poem files — a markdown-like verse body
//! preceded by a metadata block in one of two dialects — into validated,
//! structured [`model::Poem`] records.
//!
//! ## Features
//!
//! - **Dual-dialect metadata**: block-style (`+++`, TOML-like) and
//!   indent-style (`---`, YAML-like) frontmatter, detected per file
//! - **Taxonomy mapping**: flat category labels reconciled against a
//!   configured two-level category hierarchy
//! - **Derived fields**: variable verse metrics resolved from free text,
//!   structural tags filtered down to genuine extras
//! - **Anomaly reporting**: non-fatal consistency findings returned as data
//!
//! ## Quick start
//!
//! ```no_run
//! use recueil::config::{CorpusSettings, Metrics, Taxonomy};
//! use recueil::import::Importer;
//! use recueil::validation;
//!
//! # fn main() -> recueil::Result<()> {
//! let taxonomy = Taxonomy::default();
//! let metrics = Metrics::default();
//! let settings = CorpusSettings { start_year: 2012 };
//!
//! let importer = Importer::new(&taxonomy, &metrics, &settings);
//! let outcome = importer.import_file("poemes/brume.md".as_ref(), "s3")?;
//!
//! let partial = importer.scan_partial_file("poemes/brume.md".as_ref(), "s3")?;
//! for anomaly in validation::check_partial(&partial, &metrics) {
//!     eprintln!("{}: {anomaly}", outcome.poem.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: collaborator configuration (taxonomy, metrics, corpus settings)
//! - [`error`]: error types and result alias
//! - [`import`]: per-line import state machine and the two dialect processors
//! - [`metric`]: variable-metric resolution
//! - [`model`]: data models (Poem, Category, Paragraph, PartialImport)
//! - [`render`]: frontmatter regeneration from assembled poems
//! - [`tags`]: extra-tag filtering
//! - [`taxonomy`]: category taxonomy mapping
//! - [`validation`]: post-import anomaly checks

/// Collaborator configuration passed explicitly to every component.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `RecueilError` enum and `Result<T>` type alias.
pub mod error;

/// Poem file import: state machine, dialect processors, body segmenter.
pub mod import;

/// Variable-metric resolution.
pub mod metric;

/// Data models for poems.
pub mod model;

/// Frontmatter regeneration from assembled poems.
pub mod render;

/// Extra-tag filtering.
pub mod tags;

/// Category taxonomy mapping.
pub mod taxonomy;

/// Post-import anomaly validation.
///
/// Anomalies are returned as data, never raised as errors.
pub mod validation;

pub use error::{RecueilError, Result};
