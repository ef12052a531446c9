//! Collaborator configuration passed explicitly to the import components.
//!
//! These structures are deserialized by the caller (configuration loading is
//! not part of this crate) and handed to [`crate::import::Importer`], the
//! taxonomy mapper and the tag filter as plain arguments, keeping those
//! components pure and independently testable.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The two-level category hierarchy every poem category must resolve into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub categories: Vec<CategoryDef>,
}

/// A top-level taxonomy bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default)]
    pub sub_categories: Vec<SubCategoryDef>,
}

/// A named subcategory, optionally carrying a secondary-language alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCategoryDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Taxonomy {
    /// The top-level category whose subcategory set contains `label`.
    pub fn category_of(&self, label: &str) -> Option<&CategoryDef> {
        self.categories
            .iter()
            .find(|c| c.sub_categories.iter().any(|s| s.name == label))
    }

    /// Resolve a secondary-language alias to its category and canonical
    /// subcategory.
    pub fn category_of_alias(&self, alias: &str) -> Option<(&CategoryDef, &SubCategoryDef)> {
        self.categories.iter().find_map(|c| {
            c.sub_categories
                .iter()
                .find(|s| s.alias.as_deref() == Some(alias))
                .map(|s| (c, s))
        })
    }

    /// Case-insensitive membership test over top-level names.
    pub fn has_category_name(&self, name: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// The configured verse-metric table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub metrics: Vec<MetricDef>,
}

/// One verse length with its display name, e.g. `8` → "octosyllabe".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDef {
    pub length: u32,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Metrics {
    /// Display name configured for a verse length.
    pub fn name_for(&self, length: u32) -> Option<&str> {
        self.metrics
            .iter()
            .find(|m| m.length == length)
            .map(|m| m.name.as_str())
    }

    /// Case-insensitive membership test over display names.
    pub fn has_name(&self, name: &str) -> bool {
        self.metrics.iter().any(|m| {
            // eq_ignore_ascii_case misses accented names like "décasyllabe"
            m.name.to_lowercase() == name.to_lowercase()
        })
    }
}

/// Corpus-wide settings relevant to the import core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CorpusSettings {
    /// First year a poem of this corpus may be dated.
    pub start_year: i32,
}

impl CorpusSettings {
    /// Years a tag may legitimately refer to: corpus start through today.
    pub fn year_range(&self) -> RangeInclusive<i32> {
        self.start_year..=Utc::now().year()
    }
}
