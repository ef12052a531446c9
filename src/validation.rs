//! Post-import consistency checks.
//!
//! Anomalies are routine data-quality findings, returned as human-readable
//! strings and never raised as errors; the caller decides whether they block
//! a build.

use crate::config::Metrics;
use crate::error::Result;
use crate::model::{PartialImport, Poem};

/// Tag every variable-metric poem must carry verbatim.
pub const VARIABLE_METRIC_TAG: &str = "métrique variable";

/// Runs the consistency rules over a [`PartialImport`].
///
/// Pure and non-throwing; safe to call repeatedly on the same projection.
pub fn check_partial(partial: &PartialImport, metrics: &Metrics) -> Vec<String> {
    let mut anomalies = Vec::new();

    let year = partial.year.to_string();
    if !partial.tags.iter().any(|tag| *tag == year) {
        anomalies.push("Missing year tag".to_string());
    }

    if partial.variable {
        if !partial.tags.iter().any(|tag| tag == VARIABLE_METRIC_TAG) {
            anomalies.push(format!("Missing '{VARIABLE_METRIC_TAG}' tag"));
        }
        if !partial.has_metric_marker() {
            anomalies.push("Missing variable metric marker in info".to_string());
        }
    }

    let lowered: Vec<String> = partial.tags.iter().map(|tag| tag.to_lowercase()).collect();
    for value in partial.detailed_metric.split(',') {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match value.parse::<u32>().ok().and_then(|n| metrics.name_for(n)) {
            Some(name) => {
                if !lowered.iter().any(|tag| *tag == name.to_lowercase()) {
                    anomalies.push(format!("Missing '{name}' tag"));
                }
            }
            None => anomalies.push(format!("No metric name configured for length '{value}'")),
        }
    }

    anomalies
}

/// Full-import variant: everything [`check_partial`] reports, plus an
/// anomaly for an empty or zero verse length.
pub fn check_poem(poem: &Poem, metrics: &Metrics) -> Result<Vec<String>> {
    let partial = PartialImport::from_poem(poem, metrics)?;
    let mut anomalies = check_partial(&partial, metrics);
    let verse_length = poem.verse_length.trim();
    if verse_length.is_empty() || verse_length == "0" {
        anomalies.push("Empty verse length".to_string());
    }
    Ok(anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricDef;
    use crate::model::Paragraph;

    fn metrics() -> Metrics {
        Metrics {
            metrics: vec![
                MetricDef {
                    length: 8,
                    name: "octosyllabe".to_string(),
                    color: None,
                },
                MetricDef {
                    length: 6,
                    name: "hexasyllabe".to_string(),
                    color: None,
                },
                MetricDef {
                    length: 3,
                    name: "trisyllabe".to_string(),
                    color: None,
                },
            ],
        }
    }

    fn partial(tags: &[&str], detailed: &str, variable: bool, info: Option<&str>) -> PartialImport {
        PartialImport {
            poem_id: "p_s1".to_string(),
            year: 2023,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            variable,
            detailed_metric: detailed.to_string(),
            info: info.map(String::from),
            description: None,
        }
    }

    #[test]
    fn test_well_tagged_poem_has_no_anomalies() {
        let p = partial(&["2023", "octosyllabe"], "8", false, None);
        assert!(check_partial(&p, &metrics()).is_empty());
    }

    #[test]
    fn test_missing_year_tag() {
        let p = partial(&["octosyllabe"], "8", false, None);
        assert_eq!(check_partial(&p, &metrics()), vec!["Missing year tag"]);
    }

    #[test]
    fn test_metric_names_match_case_folded() {
        let p = partial(&["2023", "Octosyllabe"], "8", false, None);
        assert!(check_partial(&p, &metrics()).is_empty());
    }

    #[test]
    fn test_variable_poem_needs_tag_and_marker() {
        let p = partial(
            &["2023", "hexasyllabe", "trisyllabe"],
            "6, 3",
            true,
            Some("Un poème libre."),
        );
        let anomalies = check_partial(&p, &metrics());
        assert_eq!(
            anomalies,
            vec![
                "Missing 'métrique variable' tag",
                "Missing variable metric marker in info",
            ]
        );
    }

    #[test]
    fn test_each_metric_value_needs_its_name_tag() {
        let p = partial(
            &["2023", "métrique variable", "hexasyllabe"],
            "6, 3",
            true,
            Some("Métrique variable : 6, 3."),
        );
        assert_eq!(check_partial(&p, &metrics()), vec!["Missing 'trisyllabe' tag"]);
    }

    #[test]
    fn test_unconfigured_length_is_reported() {
        let p = partial(&["2023"], "14", false, None);
        assert_eq!(
            check_partial(&p, &metrics()),
            vec!["No metric name configured for length '14'"]
        );
    }

    #[test]
    fn test_validator_is_repeatable() {
        let p = partial(&["octosyllabe"], "8", false, None);
        let m = metrics();
        assert_eq!(check_partial(&p, &m), check_partial(&p, &m));
    }

    #[test]
    fn test_check_poem_reports_empty_verse_length() {
        let poem = Poem {
            id: "p_s1".to_string(),
            title: "P".to_string(),
            date: "01.01.2023".to_string(),
            poem_type: None,
            verse_length: "0".to_string(),
            info: None,
            description: None,
            categories: Vec::new(),
            paragraphs: vec![Paragraph {
                verses: vec!["Un vers".to_string()],
            }],
            pictures: Vec::new(),
            locations: Vec::new(),
            extra_tags: Vec::new(),
            acrostiche: None,
        };
        let anomalies = check_poem(&poem, &metrics()).unwrap();
        assert!(anomalies.contains(&"Empty verse length".to_string()));
    }
}
