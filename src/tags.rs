//! Extra-tag filtering.
//!
//! Poem files carry one flat tag list mixing structural tags (year, metric
//! names, category names, form markers) with ad hoc topical labels. Only the
//! latter are kept on the record; everything structural is rebuilt from the
//! record itself when needed.

use crate::config::{Metrics, Taxonomy};
use crate::error::Result;
use crate::model::Poem;
use std::ops::RangeInclusive;

/// Tokens that never count as extra tags: poem-form names plus the acrostic
/// and variable-metric markers. Compared case-insensitively.
pub const RESERVED_TAGS: &[&str] = &[
    "sonnet",
    "pantoum",
    "acrostiche",
    "doubleacrostiche",
    "métrique variable",
];

/// Keeps only the free-form "extra" tags of a poem.
///
/// Removes every top-level taxonomy category name, every configured metric
/// display name, every integer year inside `years`, and the reserved tokens.
/// Order is preserved; the function is idempotent and has no side effects.
pub fn extra_tags(
    tags: &[String],
    taxonomy: &Taxonomy,
    metrics: &Metrics,
    years: RangeInclusive<i32>,
) -> Vec<String> {
    tags.iter()
        .filter(|tag| {
            if taxonomy.has_category_name(tag) || metrics.has_name(tag) {
                return false;
            }
            if let Ok(year) = tag.parse::<i32>() {
                if years.contains(&year) {
                    return false;
                }
            }
            let lowered = tag.to_lowercase();
            !RESERVED_TAGS.contains(&lowered.as_str())
        })
        .cloned()
        .collect()
}

/// Rebuilds the full structural tag list of an assembled poem: the inverse
/// of [`extra_tags`], used for frontmatter regeneration and for projecting a
/// [`crate::model::PartialImport`] out of a full import.
pub fn rebuild_tags(poem: &Poem, metrics: &Metrics) -> Result<Vec<String>> {
    let mut tags = vec![poem.year()?.to_string()];

    for value in poem.verse_length.split(',') {
        let Ok(length) = value.trim().parse::<u32>() else {
            continue;
        };
        if let Some(name) = metrics.name_for(length) {
            if !tags.iter().any(|t| t == name) {
                tags.push(name.to_string());
            }
        }
    }

    if poem.is_variable() {
        tags.push("métrique variable".to_string());
    }
    if let Some(poem_type) = &poem.poem_type {
        tags.push(poem_type.clone());
    }
    match &poem.acrostiche {
        Some(crate::model::Acrostiche::Simple(_)) => tags.push("acrostiche".to_string()),
        Some(crate::model::Acrostiche::Double { .. }) => {
            tags.push("doubleAcrostiche".to_string());
        }
        None => {}
    }
    for category in &poem.categories {
        tags.push(category.name.clone());
    }
    tags.extend(poem.extra_tags.iter().cloned());

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryDef, MetricDef, SubCategoryDef};

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            categories: vec![CategoryDef {
                name: "Nature".to_string(),
                color: None,
                sub_categories: vec![SubCategoryDef {
                    name: "Automne".to_string(),
                    color: None,
                    alias: None,
                }],
            }],
        }
    }

    fn metrics() -> Metrics {
        Metrics {
            metrics: vec![MetricDef {
                length: 8,
                name: "octosyllabe".to_string(),
                color: None,
            }],
        }
    }

    fn tag_list(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_filters_structural_tags() {
        let tags = tag_list(&[
            "2023",
            "octosyllabe",
            "Nature",
            "sonnet",
            "mer",
            "voyage",
        ]);
        let extras = extra_tags(&tags, &taxonomy(), &metrics(), 2012..=2026);
        assert_eq!(extras, tag_list(&["mer", "voyage"]));
    }

    #[test]
    fn test_category_and_metric_names_match_case_insensitively() {
        let tags = tag_list(&["nature", "Octosyllabe", "mer"]);
        let extras = extra_tags(&tags, &taxonomy(), &metrics(), 2012..=2026);
        assert_eq!(extras, tag_list(&["mer"]));
    }

    #[test]
    fn test_years_outside_range_are_kept() {
        let tags = tag_list(&["1789", "2023"]);
        let extras = extra_tags(&tags, &taxonomy(), &metrics(), 2012..=2026);
        assert_eq!(extras, tag_list(&["1789"]));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let tags = tag_list(&["2023", "octosyllabe", "mer", "acrostiche"]);
        let once = extra_tags(&tags, &taxonomy(), &metrics(), 2012..=2026);
        let twice = extra_tags(&once, &taxonomy(), &metrics(), 2012..=2026);
        assert_eq!(once, twice);
        assert_eq!(once, tag_list(&["mer"]));
    }

    #[test]
    fn test_variable_metric_marker_is_reserved() {
        let tags = tag_list(&["métrique variable", "mer"]);
        let extras = extra_tags(&tags, &taxonomy(), &metrics(), 2012..=2026);
        assert_eq!(extras, tag_list(&["mer"]));
    }
}
