//! Category taxonomy mapping.
//!
//! Poem metadata only carries flat subcategory labels; this module groups
//! them under their configured top-level categories. A label absent from the
//! taxonomy is a configuration mismatch and fails the whole import, which
//! distinguishes it from a harmless extra tag.

use crate::config::Taxonomy;
use crate::error::{RecueilError, Result};
use crate::model::Category;

/// Groups flat subcategory labels under their top-level categories.
///
/// Each top-level name appears at most once and carries every label from the
/// input that belongs to it, in first-seen order (duplicates collapsed).
pub fn map_categories(
    labels: &[String],
    taxonomy: &Taxonomy,
    poem_id: &str,
) -> Result<Vec<Category>> {
    let mut categories: Vec<Category> = Vec::new();
    for label in labels {
        let def = taxonomy
            .category_of(label)
            .ok_or_else(|| RecueilError::UnmappedCategory {
                poem_id: poem_id.to_string(),
                label: label.clone(),
            })?;
        push_label(&mut categories, &def.name, label);
    }
    Ok(categories)
}

/// Alias-resolving variant for the secondary-language corpus.
///
/// Labels are matched against subcategory aliases and replaced by their
/// canonical names in the result.
pub fn map_categories_by_alias(
    labels: &[String],
    taxonomy: &Taxonomy,
    poem_id: &str,
) -> Result<Vec<Category>> {
    let mut categories: Vec<Category> = Vec::new();
    for label in labels {
        let (def, sub) =
            taxonomy
                .category_of_alias(label)
                .ok_or_else(|| RecueilError::UnmappedCategory {
                    poem_id: poem_id.to_string(),
                    label: label.clone(),
                })?;
        push_label(&mut categories, &def.name, &sub.name);
    }
    Ok(categories)
}

fn push_label(categories: &mut Vec<Category>, category_name: &str, label: &str) {
    match categories.iter_mut().find(|c| c.name == category_name) {
        Some(category) => {
            if !category.sub_categories.iter().any(|s| s == label) {
                category.sub_categories.push(label.to_string());
            }
        }
        None => categories.push(Category {
            name: category_name.to_string(),
            sub_categories: vec![label.to_string()],
        }),
    }
}
