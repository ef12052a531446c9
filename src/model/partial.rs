use crate::config::Metrics;
use crate::error::Result;
use crate::metric;
use crate::model::Poem;
use crate::tags;

/// Lightweight projection of a poem used solely for anomaly scanning.
///
/// Single-use: created either from a full import (via [`PartialImport::from_poem`])
/// or from a metadata-only scan ([`crate::import::Importer::scan_partial`]),
/// then handed to [`crate::validation::check_partial`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialImport {
    pub poem_id: String,
    pub year: i32,
    /// Full tag list as declared in the poem file, before extra-tag filtering.
    pub tags: Vec<String>,
    pub variable: bool,
    pub detailed_metric: String,
    pub info: Option<String>,
    pub description: Option<String>,
}

impl PartialImport {
    /// Projects an assembled poem, rebuilding its structural tag list.
    pub fn from_poem(poem: &Poem, metrics: &Metrics) -> Result<Self> {
        Ok(Self {
            poem_id: poem.id.clone(),
            year: poem.year()?,
            tags: tags::rebuild_tags(poem, metrics)?,
            variable: poem.is_variable(),
            // verse_length already holds the expanded form after import
            detailed_metric: poem.verse_length.clone(),
            info: poem.info.clone(),
            description: poem.description.clone(),
        })
    }

    /// Whether `info` carries the variable-metric marker phrase.
    pub fn has_metric_marker(&self) -> bool {
        self.info
            .as_deref()
            .is_some_and(|info| info.contains(metric::VARIABLE_MARKER))
    }
}
