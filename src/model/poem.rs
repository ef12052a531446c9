use crate::error::{RecueilError, Result};
use crate::metric;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A fully assembled poem record.
///
/// Built by [`crate::import::Importer`]; the persistence layer serializes it
/// as-is. The `verse_length` field always holds the expanded detailed metric,
/// never the `-1` sentinel found in poem files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    pub id: String,
    pub title: String,

    /// Textual date in `day.month.year` form, parsed lazily via [`Poem::date`].
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poem_type: Option<String>,

    /// Single integer as string, or a comma-separated list for variable
    /// metric poems.
    pub verse_length: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub categories: Vec<Category>,

    pub paragraphs: Vec<Paragraph>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pictures: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acrostiche: Option<Acrostiche>,
}

impl Poem {
    pub fn date(&self) -> Result<NaiveDate> {
        parse_poem_date(&self.date)
    }

    pub fn year(&self) -> Result<i32> {
        Ok(self.date()?.year())
    }

    /// Whether this poem's verse length differs across verses.
    pub fn is_variable(&self) -> bool {
        metric::is_variable(&self.verse_length)
    }
}

/// Parses the `day.month.year` textual date used throughout the corpus.
pub fn parse_poem_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y").map_err(|_| RecueilError::Format {
        field: "date",
        value: raw.to_string(),
    })
}

/// A top-level taxonomy bucket with the subcategory labels this poem asserts,
/// in first-seen order. Built by the taxonomy mapper, never supplied directly
/// by metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub sub_categories: Vec<String>,
}

/// An ordered, non-empty group of verse lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paragraph {
    pub verses: Vec<String>,
}

/// Acrostic text of a poem: a single phrase, or a first/second pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Acrostiche {
    Simple(String),
    Double { first: String, second: String },
}
