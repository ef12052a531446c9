//! Data models for poems.
//!
//! Includes [`Poem`], [`Category`], [`Paragraph`], [`Acrostiche`] and the
//! [`PartialImport`] projection used for anomaly scanning.

mod partial;
mod poem;

pub use partial::PartialImport;
pub use poem::{Acrostiche, Category, Paragraph, Poem, parse_poem_date};
