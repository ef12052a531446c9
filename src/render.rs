//! Frontmatter regeneration.
//!
//! Turns an assembled [`Poem`] back into a complete poem file in either
//! dialect. The structural tag list (year, metric names, form and acrostic
//! markers, category names) is rebuilt from the record, so re-importing the
//! output yields an equivalent tag/category/metric set — not necessarily
//! byte-identical text.

use crate::config::Metrics;
use crate::error::Result;
use crate::model::{Acrostiche, Poem};
use crate::tags;
use serde::Serialize;

#[derive(Serialize)]
struct Frontmatter<'a> {
    title: &'a str,
    id: &'a str,
    date: &'a str,

    #[serde(rename = "verseLength")]
    verse_length: &'a str,

    #[serde(rename = "poemType", skip_serializing_if = "Option::is_none")]
    poem_type: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    info: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    acrostiche: Option<&'a str>,

    #[serde(rename = "doubleAcrostiche", skip_serializing_if = "Option::is_none")]
    double_acrostiche: Option<String>,

    weight: usize,

    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    categories: Vec<&'a str>,

    tags: Vec<String>,

    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pictures: &'a [String],

    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    locations: &'a [String],
}

fn frontmatter<'a>(poem: &'a Poem, metrics: &Metrics, position: usize) -> Result<Frontmatter<'a>> {
    let (acrostiche, double_acrostiche) = match &poem.acrostiche {
        Some(Acrostiche::Simple(text)) => (Some(text.as_str()), None),
        Some(Acrostiche::Double { first, second }) => (None, Some(format!("{first} | {second}"))),
        None => (None, None),
    };
    Ok(Frontmatter {
        title: &poem.title,
        id: &poem.id,
        date: &poem.date,
        verse_length: &poem.verse_length,
        poem_type: poem.poem_type.as_deref(),
        info: poem.info.as_deref(),
        description: poem.description.as_deref(),
        acrostiche,
        double_acrostiche,
        weight: position + 1,
        categories: poem
            .categories
            .iter()
            .flat_map(|c| c.sub_categories.iter().map(String::as_str))
            .collect(),
        tags: tags::rebuild_tags(poem, metrics)?,
        pictures: &poem.pictures,
        locations: &poem.locations,
    })
}

/// Renders a complete poem file in the block-style dialect.
pub fn to_block_string(poem: &Poem, metrics: &Metrics, position: usize) -> Result<String> {
    let fm = toml::to_string(&frontmatter(poem, metrics, position)?)?;
    Ok(format!("+++\n{fm}+++\n\n{}", render_body(poem)))
}

/// Renders a complete poem file in the indent-style dialect.
pub fn to_indent_string(poem: &Poem, metrics: &Metrics, position: usize) -> Result<String> {
    let fm = serde_yaml::to_string(&frontmatter(poem, metrics, position)?)?;
    Ok(format!("---\n{fm}---\n\n{}", render_body(poem)))
}

fn render_body(poem: &Poem) -> String {
    let mut out = String::new();
    for (index, paragraph) in poem.paragraphs.iter().enumerate() {
        if index > 0 {
            out.push_str("\\\n");
        }
        for verse in &paragraph.verses {
            out.push_str(verse);
            out.push('\n');
        }
    }
    out
}
